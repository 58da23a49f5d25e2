//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::{content, CONFIG_FILE};

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, default_config())?;
    }

    let config = SiteConfig::load(&config_path)?;
    content::seed::seed(&target_dir.join(&config.posts_dir))?;

    Ok(())
}

fn default_config() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# Site
title: "{title}"
description: "{description}"
author: "{author}"
language: {language}

# URL
url: {url}
root: /
post_dir: post

# Directory
posts_dir: posts
public_dir: public

# Writing
default_title: Untitled
default_author: Unknown
date_format: "%B %-d, %Y"
highlight:
  enable: true
  line_number: false
  theme: base16-ocean.dark
"#,
        title = defaults.title,
        description = defaults.description,
        author = defaults.author,
        language = defaults.language,
        url = defaults.url,
    )
}
