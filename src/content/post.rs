//! Post model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use super::FrontMatter;

/// Placeholder values for metadata an author left out
#[derive(Debug, Clone)]
pub struct PostDefaults {
    pub title: String,
    pub author: String,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            author: "Unknown".to_string(),
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Source file name without the `.md` extension
    pub slug: String,

    pub title: String,

    pub excerpt: String,

    /// Raw markdown in listings, rendered HTML when loaded on its own
    pub content: String,

    /// Publication date as authored (ISO 8601)
    pub date: String,

    pub author: String,

    pub published: bool,
}

impl Post {
    /// Build a post from parsed front-matter, filling in defaults.
    ///
    /// Empty strings count as missing. `body` becomes `content` as-is.
    pub fn from_front_matter(
        slug: &str,
        fm: FrontMatter,
        body: &str,
        defaults: &PostDefaults,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            title: non_empty(fm.title).unwrap_or_else(|| defaults.title.clone()),
            excerpt: non_empty(fm.excerpt).unwrap_or_default(),
            content: body.to_string(),
            date: non_empty(fm.date).unwrap_or_else(today),
            author: non_empty(fm.author).unwrap_or_else(|| defaults.author.clone()),
            published: fm.published,
        }
    }

    /// Parsed publication date, if the authored string is understood
    pub fn date_value(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }
}

/// Newest first. Posts with unparsable dates go last.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (a.date_value(), b.date_value()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Today's date in `YYYY-MM-DD` form (UTC)
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a date string in the formats authors actually write
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
