//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{loader::POST_EXTENSION, today};
use crate::Folio;

/// Write a new post file named after the slugified title
pub fn create_post(folio: &Folio, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(format!("{}{}", slug, POST_EXTENSION));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\nexcerpt: \"\"\ndate: \"{}\"\nauthor: {}\npublished: true\n---\n\n",
        serde_yaml::to_string(title)?.trim_end(),
        today(),
        serde_yaml::to_string(&folio.config.author)?.trim_end(),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
