//! Built-in theme templates using the Tera template engine
//!
//! Templates are embedded in the binary; a site needs nothing but its posts
//! directory and an optional `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers;

/// Stylesheet shipped with the theme
pub const STYLE_CSS: &str = include_str!("theme/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
    config: SiteConfig,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("404.html", include_str!("theme/404.html")),
        ])?;

        let date_format = config.date_format.clone();
        tera.register_filter(
            "date_format",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let s = tera::try_get_value!("date_format", "value", String, value);
                let format = match args.get("format") {
                    Some(val) => tera::try_get_value!("date_format", "format", String, val),
                    None => date_format.clone(),
                };
                Ok(tera::Value::String(helpers::format_date(&s, &format)))
            },
        );
        tera.register_filter("date_iso", date_iso_filter);

        Ok(Self {
            tera,
            config: config.clone(),
        })
    }

    /// Render the post list page
    pub fn render_index(&self, posts: &[Post]) -> Result<String> {
        let posts: Vec<PostData> = posts.iter().map(|p| self.post_data(p)).collect();

        let mut context = self.base_context();
        context.insert("posts", &posts);
        context.insert("is_home", &true);

        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a single post page; `post.content` must already be HTML
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let mut context = self.base_context();
        context.insert("post", &self.post_data(post));
        context.insert("is_home", &false);

        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the "not found" page
    pub fn render_not_found(&self) -> Result<String> {
        let mut context = self.base_context();
        context.insert("is_home", &false);

        Ok(self.tera.render("404.html", &context)?)
    }

    fn base_context(&self) -> Context {
        let site = SiteData {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            author: self.config.author.clone(),
            language: self.config.language.clone(),
            url: helpers::full_url_for(&self.config, "/"),
            home_url: helpers::url_for(&self.config, "/"),
            style_url: helpers::url_for(&self.config, "/style.css"),
        };

        let mut context = Context::new();
        context.insert("site", &site);
        context
    }

    fn post_data(&self, post: &Post) -> PostData {
        PostData {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            date: post.date.clone(),
            author: post.author.clone(),
            url: self.config.post_url(&post.slug),
            permalink: helpers::full_url_for(&self.config, &self.config.post_path(&post.slug)),
            content: post.content.clone(),
        }
    }
}

/// Tera filter: date as `YYYY-MM-DD`
fn date_iso_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_iso", "value", String, value);
    Ok(tera::Value::String(helpers::date_iso(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub home_url: String,
    pub style_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub author: String,
    pub url: String,
    pub permalink: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, content: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: "An excerpt".to_string(),
            content: content.to_string(),
            date: "2024-01-15".to_string(),
            author: "Matt".to_string(),
            published: true,
        }
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new(&SiteConfig::default()).unwrap();
        let html = renderer
            .render_index(&[post("welcome-post", "Welcome", "# raw")])
            .unwrap();
        assert!(html.contains(r#"href="/post/welcome-post/""#));
        assert!(html.contains("January 15, 2024"));
        assert!(html.contains(r#"datetime="2024-01-15""#));
        assert!(html.contains("By Matt"));
        assert!(html.contains("An excerpt"));
        assert!(!html.contains("# raw"));
    }

    #[test]
    fn test_render_empty_index() {
        let renderer = TemplateRenderer::new(&SiteConfig::default()).unwrap();
        let html = renderer.render_index(&[]).unwrap();
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_render_post_keeps_html_and_escapes_title() {
        let renderer = TemplateRenderer::new(&SiteConfig::default()).unwrap();
        let html = renderer
            .render_post(&post("a", "Tom & Jerry", "<h1>Body</h1>"))
            .unwrap();
        assert!(html.contains("<h1>Body</h1>"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("Back to Blog"));
    }

    #[test]
    fn test_og_url_is_absolute() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();

        let html = renderer.render_post(&post("a b", "A", "")).unwrap();
        assert!(html.contains(
            r#"<meta property="og:url" content="https://example.com/blog/post/a%20b/">"#
        ));

        let html = renderer.render_index(&[]).unwrap();
        assert!(html.contains(r#"<meta property="og:url" content="https://example.com/blog/">"#));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new(&SiteConfig::default()).unwrap();
        let html = renderer.render_not_found().unwrap();
        assert!(html.contains("Not Found"));
    }

    #[test]
    fn test_custom_date_format() {
        let config = SiteConfig {
            date_format: "%d.%m.%Y".to_string(),
            ..Default::default()
        };
        let renderer = TemplateRenderer::new(&config).unwrap();
        let html = renderer.render_index(&[post("a", "A", "")]).unwrap();
        assert!(html.contains("15.01.2024"));
    }
}
