//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::PostDefaults;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// Route prefix for single posts (`/post/<slug>/`)
    pub post_dir: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,

    // Writing
    pub default_title: String,
    pub default_author: String,
    /// chrono format used to display post dates
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Matt's Blog".to_string(),
            description: "A minimal blog focused on thoughts, ideas, and stories with clean typography and white space".to_string(),
            author: "Matt".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            post_dir: "post".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            default_title: "Untitled".to_string(),
            default_author: "Unknown".to_string(),
            date_format: "%B %-d, %Y".to_string(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Placeholders for posts missing a title or author
    pub fn post_defaults(&self) -> PostDefaults {
        PostDefaults {
            title: self.default_title.clone(),
            author: self.default_author.clone(),
        }
    }

    /// Site-relative URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        crate::helpers::url_for(self, &self.post_path(slug))
    }

    /// Path of a post page below the site root
    pub fn post_path(&self, slug: &str) -> String {
        format!(
            "{}/{}/",
            self.post_dir.trim_matches('/'),
            crate::helpers::encode_path_segment(slug)
        )
    }

    /// `root` normalized to start and end with `/`
    pub fn root_path(&self) -> String {
        let trimmed = self.root.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Matt's Blog");
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.default_title, "Untitled");
        assert_eq!(config.default_author, "Unknown");
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
posts_dir: content/posts
highlight:
  enable: false
analytics: plausible
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.public_dir, "public");
        assert!(!config.highlight.enable);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert!(config.extra.contains_key("analytics"));
    }

    #[test]
    fn test_post_url() {
        let mut config = SiteConfig::default();
        assert_eq!(config.post_url("welcome-post"), "/post/welcome-post/");
        assert_eq!(config.post_url("hello world"), "/post/hello%20world/");

        config.root = "/blog".to_string();
        config.post_dir = "/articles/".to_string();
        assert_eq!(config.post_url("a"), "/blog/articles/a/");
    }
}
