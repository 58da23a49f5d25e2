//! List posts

use anyhow::Result;

use crate::content::Post;
use crate::Folio;

/// Print posts, newest first. Drafts are included only when asked for.
pub fn run(folio: &Folio, drafts: bool, json: bool) -> Result<()> {
    let posts = collect(folio, drafts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("{}", format_line(post));
    }

    Ok(())
}

fn collect(folio: &Folio, drafts: bool) -> Result<Vec<Post>> {
    let store = folio.store();
    let posts = if drafts {
        store.list_all()?
    } else {
        store.list_published()?
    };
    Ok(posts)
}

fn format_line(post: &Post) -> String {
    let draft = if post.published { "" } else { " (draft)" };
    format!(
        "  {} - {} [{}]{}",
        post.date, post.title, post.slug, draft
    )
}
