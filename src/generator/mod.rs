//! Generator module - writes the static site using the built-in templates

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::templates::{TemplateRenderer, STYLE_CSS};
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new(&folio.config)?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Generate the entire site from the published posts.
    ///
    /// Returns the number of post pages written.
    pub fn generate(&self, posts: &[Post]) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        write_file(&self.folio.public_dir.join("style.css"), STYLE_CSS)?;

        let index = self.renderer.render_index(posts)?;
        write_file(&self.folio.public_dir.join("index.html"), &index)?;

        let not_found = self.renderer.render_not_found()?;
        write_file(&self.folio.public_dir.join("404.html"), &not_found)?;

        let mut written = 0;
        for listed in posts {
            // Listing carries raw markdown; the page needs the rendered post
            let Some(post) = self.folio.load_one(&listed.slug)? else {
                tracing::warn!("Post {:?} disappeared during generation", listed.slug);
                continue;
            };

            let html = self
                .renderer
                .render_post(&post)
                .with_context(|| format!("Failed to render post {:?}", post.slug))?;
            let output_path = self
                .folio
                .public_dir
                .join(self.folio.config.post_dir.trim_matches('/'))
                .join(&post.slug)
                .join("index.html");
            write_file(&output_path, &html)?;
            written += 1;
        }

        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_pages() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        folio.seed().unwrap();
        fs::write(
            folio.posts_dir.join("draft.md"),
            "---\ntitle: Secret\npublished: false\n---\nhidden",
        )
        .unwrap();

        let posts = folio.list_published().unwrap();
        let written = Generator::new(&folio).unwrap().generate(&posts).unwrap();
        assert_eq!(written, 2);

        let public = &folio.public_dir;
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains("Welcome to My Blog"));
        assert!(index.contains("Why Typography Matters"));
        assert!(!index.contains("Secret"));
        assert!(
            index.find("Welcome to My Blog").unwrap()
                < index.find("Why Typography Matters").unwrap()
        );

        let page = fs::read_to_string(public.join("post/welcome-post/index.html")).unwrap();
        assert!(page.contains("<h2>What to Expect</h2>"));

        assert!(!public.join("post/draft").exists());
        assert!(public.join("404.html").exists());
        assert!(public.join("style.css").exists());
    }
}
