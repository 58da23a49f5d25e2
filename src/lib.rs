//! folio: a minimal Markdown blog
//!
//! Posts are Markdown files with YAML front-matter in a single directory.
//! The content pipeline loads them into [`content::Post`] records; the
//! generator and the development server turn those into a list page and one
//! page per post.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::{MarkdownRenderer, Post, PostStore};

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the post files
    pub posts_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        }
    }

    /// Post store configured for this site
    pub fn store(&self) -> PostStore {
        PostStore::new(&self.posts_dir)
            .with_defaults(self.config.post_defaults())
            .with_renderer(MarkdownRenderer::from_config(&self.config.highlight))
    }

    /// Create the posts directory with sample posts on first run
    pub fn seed(&self) -> Result<bool> {
        Ok(content::seed::seed(&self.posts_dir)?)
    }

    /// Published posts, newest first
    pub fn list_published(&self) -> Result<Vec<Post>> {
        Ok(self.store().list_published()?)
    }

    /// One published post with rendered HTML content
    pub fn load_one(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.store().load_one(slug)?)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title)
    }
}
