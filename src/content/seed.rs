//! First-run bootstrap of the posts directory

use std::fs;
use std::path::Path;

use super::error::{ContentError, Result};
use super::loader::POST_EXTENSION;

/// A post written to a freshly created posts directory
pub struct SeedPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub date: &'static str,
    pub author: &'static str,
    pub body: &'static str,
}

impl SeedPost {
    /// The document as it is written to disk
    pub fn to_document(&self) -> String {
        format!(
            "---\ntitle: {}\nexcerpt: {}\ndate: {}\nauthor: {}\npublished: true\n---\n\n{}\n",
            yaml_string(self.title),
            yaml_string(self.excerpt),
            yaml_string(self.date),
            yaml_string(self.author),
            self.body
        )
    }
}

/// Double-quoted YAML scalar
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

pub const SEED_POSTS: &[SeedPost] = &[
    SeedPost {
        slug: "welcome-post",
        title: "Welcome to My Blog",
        excerpt: "A brief introduction to this space where I share thoughts, ideas, and stories.",
        date: "2024-01-15",
        author: "Matt",
        body: r#"# Welcome to My Blog

This is the beginning of something wonderful. Here I'll share my thoughts, ideas, and stories in a space designed for clarity and focus.

## What to Expect

- Thoughts on design and typography
- Personal reflections and experiences
- Ideas worth sharing

Stay tuned for more content coming soon."#,
    },
    SeedPost {
        slug: "typography-matters",
        title: "Why Typography Matters",
        excerpt: "Exploring the importance of good typography in web design and how it affects readability.",
        date: "2024-01-10",
        author: "Matt",
        body: r#"# Why Typography Matters

Typography is more than just choosing fonts. It's about creating a reading experience that guides the eye and enhances understanding.

## The Impact of Good Typography

Good typography can:
- Improve readability
- Enhance user experience
- Convey professionalism
- Guide user attention

## Principles to Follow

1. **Hierarchy**: Use size and weight to create clear information hierarchy
2. **Contrast**: Ensure sufficient contrast between text and background
3. **Spacing**: Give text room to breathe with proper line height and margins
4. **Consistency**: Maintain consistent typography throughout your design

Typography is the foundation of good design. When done well, it becomes invisible, allowing the content to shine."#,
    },
];

/// Create the posts directory and fill it with the sample posts.
///
/// Does nothing when the directory already exists, even if it is empty.
/// Returns whether anything was written.
pub fn seed(posts_dir: &Path) -> Result<bool> {
    if posts_dir.exists() {
        return Ok(false);
    }

    fs::create_dir_all(posts_dir).map_err(|source| ContentError::Seed {
        path: posts_dir.to_path_buf(),
        source,
    })?;

    for post in SEED_POSTS {
        let path = posts_dir.join(format!("{}{}", post.slug, POST_EXTENSION));
        fs::write(&path, post.to_document())
            .map_err(|source| ContentError::Seed { path, source })?;
    }

    tracing::info!(
        "Created {:?} with {} sample posts",
        posts_dir,
        SEED_POSTS.len()
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostStore;
    use tempfile::TempDir;

    #[test]
    fn test_seed_creates_sample_posts() {
        let dir = TempDir::new().unwrap();
        let posts_dir = dir.path().join("posts");

        assert!(seed(&posts_dir).unwrap());

        let posts = PostStore::new(&posts_dir).list_published().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["welcome-post", "typography-matters"]);
        assert_eq!(posts[0].title, "Welcome to My Blog");
        assert_eq!(posts[0].author, "Matt");
        assert_eq!(posts[0].date, "2024-01-15");
        assert!(posts[0].content.starts_with("# Welcome to My Blog"));
    }

    #[test]
    fn test_seed_leaves_existing_directory_alone() {
        let dir = TempDir::new().unwrap();
        let posts_dir = dir.path().join("posts");
        fs::create_dir(&posts_dir).unwrap();

        assert!(!seed(&posts_dir).unwrap());
        assert_eq!(fs::read_dir(&posts_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_seeded_post_renders() {
        let dir = TempDir::new().unwrap();
        let posts_dir = dir.path().join("posts");
        seed(&posts_dir).unwrap();

        let post = PostStore::new(&posts_dir)
            .load_one("typography-matters")
            .unwrap()
            .unwrap();
        assert!(post.content.contains("<h1>Why Typography Matters</h1>"));
        assert!(post.content.contains("<strong>Hierarchy</strong>"));
    }
}
