//! Front-matter parsing

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

use super::error::{ContentError, Result};

/// Accepts any YAML scalar and keeps its textual form.
///
/// Authors write `date: 2024-01-15` or `title: 1984` without quotes; both
/// must survive as strings. Nulls become `None`.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a scalar value")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Only an explicit boolean `false` unpublishes a post.
fn published_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_yaml::Value::Bool(false)))
}

fn default_published() -> bool {
    true
}

/// Metadata block of a post
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "published_flag", default = "default_published")]
    pub published: bool,

    /// Keys this blog does not interpret (`content` included)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            excerpt: None,
            date: None,
            author: None,
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Split a document into its metadata and body.
    ///
    /// `path` is only used for error messages. Documents without an opening
    /// `---` have no metadata and the whole text is the body.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let rest = match content
            .strip_prefix("---")
            .map(|rest| rest.trim_start_matches([' ', '\t']))
        {
            Some(rest) if rest.starts_with('\n') || rest.starts_with("\r\n") => rest,
            _ => return Ok((FrontMatter::default(), content)),
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let (yaml, body) = match split_closing_fence(rest) {
            Some(split) => split,
            None => {
                return Err(ContentError::UnterminatedFrontMatter {
                    path: path.to_path_buf(),
                })
            }
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml).map_err(|source| {
            ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok((fm, body))
    }
}

/// Find the line holding only `---` (trailing blanks allowed) and split around it
fn split_closing_fence(rest: &str) -> Option<(&str, &str)> {
    if let Some(body) = rest.strip_prefix("---") {
        let body = body.trim_start_matches([' ', '\t']);
        if body.is_empty() || body.starts_with('\n') || body.starts_with("\r\n") {
            return Some(("", body.trim_start_matches(['\n', '\r'])));
        }
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if start > 0 && line.trim_end_matches(['\n', '\r', ' ', '\t']) == "---" {
            let yaml = &rest[..start];
            let body = rest[offset..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
    }

    None
}
