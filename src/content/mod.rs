//! Content module - posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod seed;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::PostStore;
pub use markdown::MarkdownRenderer;
pub use post::{parse_date_string, today, Post, PostDefaults};
