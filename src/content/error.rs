//! Errors raised while loading posts

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the current load.
///
/// A missing or unreadable single post is not one of these: the single-post
/// loader reports it as an absent result.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to list posts directory: {path}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read post file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed front-matter in {path}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Front-matter in {path} has no closing `---`")]
    UnterminatedFrontMatter { path: PathBuf },

    #[error("Failed to write seed post: {path}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
