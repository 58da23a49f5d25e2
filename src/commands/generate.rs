//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Seed on first run, then write every page of the site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    if folio.seed()? {
        tracing::info!("Seeded sample posts into {:?}", folio.posts_dir);
    }

    let posts = folio.list_published()?;
    tracing::info!("Loaded {} published posts", posts.len());

    let generator = Generator::new(folio)?;
    let written = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} post pages into {:?} in {:.2}s",
        written,
        folio.public_dir,
        duration.as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_on_fresh_site_seeds_first() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio).unwrap();

        assert!(folio.posts_dir.join("welcome-post.md").exists());
        assert!(folio
            .public_dir
            .join("post/typography-matters/index.html")
            .exists());
    }
}
