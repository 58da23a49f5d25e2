//! Show a single post

use anyhow::Result;

use crate::Folio;

/// Print one published post with its rendered HTML
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    match folio.load_one(slug)? {
        Some(post) => {
            println!("{}", post.title);
            println!("{} - by {}", post.date, post.author);
            if !post.excerpt.is_empty() {
                println!("{}", post.excerpt);
            }
            println!();
            println!("{}", post.content);
            Ok(())
        }
        None => anyhow::bail!("Post not found: {}", slug),
    }
}
