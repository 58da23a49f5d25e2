//! Post loader - reads posts from the posts directory
//!
//! Every call goes back to disk; nothing is cached between calls, so
//! concurrent callers never share state.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::post::newest_first;
use super::{FrontMatter, MarkdownRenderer, Post, PostDefaults};

/// Extension a file needs to be picked up as a post
pub const POST_EXTENSION: &str = ".md";

/// Loads posts from a directory of markdown files
#[derive(Debug, Clone)]
pub struct PostStore {
    posts_dir: PathBuf,
    defaults: PostDefaults,
    renderer: MarkdownRenderer,
}

impl PostStore {
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            defaults: PostDefaults::default(),
            renderer: MarkdownRenderer::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: PostDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Published posts, newest first, with raw markdown as content
    pub fn list_published(&self) -> Result<Vec<Post>> {
        let mut posts = self.list_all()?;
        posts.retain(|post| post.published);
        Ok(posts)
    }

    /// Every post including drafts, newest first
    pub fn list_all(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::ListDir {
                path: self.posts_dir.clone(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(slug) = slug_from_file_name(entry.path()) else {
                continue;
            };

            let path = entry.path();
            let content = read_post(path).map_err(|source| ContentError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            posts.push(self.parse_post(&slug, &content, path)?);
        }

        posts.sort_by(newest_first);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.posts_dir);

        Ok(posts)
    }

    /// A single published post with its body rendered to HTML.
    ///
    /// Returns `Ok(None)` when the post is missing, unreadable or
    /// unpublished. Only malformed front-matter is an error.
    pub fn load_one(&self, slug: &str) -> Result<Option<Post>> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejected post identifier {:?}", slug);
            return Ok(None);
        }

        let path = self.post_path(slug);
        let content = match read_post(&path) {
            Ok(content) => content,
            Err(e) => {
                match e.kind() {
                    ErrorKind::NotFound => tracing::debug!("Post not found: {:?}", path),
                    ErrorKind::PermissionDenied => {
                        tracing::warn!("Permission denied reading post {:?}: {}", path, e)
                    }
                    _ => tracing::warn!("Error reading post {:?}: {}", path, e),
                }
                return Ok(None);
            }
        };

        let (fm, body) = FrontMatter::parse(&content, &path)?;
        log_ignored_content_key(&fm, &path);

        let mut post = Post::from_front_matter(slug, fm, body, &self.defaults);
        if !post.published {
            tracing::debug!("Post {:?} is unpublished", slug);
            return Ok(None);
        }

        post.content = self.renderer.render(body);
        Ok(Some(post))
    }

    /// Path a post with the given identifier lives at
    pub fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{}{}", slug, POST_EXTENSION))
    }

    fn parse_post(&self, slug: &str, content: &str, path: &Path) -> Result<Post> {
        let (fm, body) = FrontMatter::parse(content, path)?;
        log_ignored_content_key(&fm, path);
        Ok(Post::from_front_matter(slug, fm, body, &self.defaults))
    }
}

/// `welcome-post.md` -> `welcome-post`; `None` for anything else
fn slug_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let slug = name.strip_suffix(POST_EXTENSION)?;
    (!slug.is_empty()).then(|| slug.to_string())
}

/// Post files are read as UTF-8, with invalid bytes replaced
fn read_post(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The `.md` suffix is always appended, so any identifier without a path
/// separator names a file directly inside the posts directory.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\', '\0'])
}

fn log_ignored_content_key(fm: &FrontMatter, path: &Path) {
    if fm.extra.contains_key("content") {
        tracing::debug!(
            "Ignoring `content` key in front-matter of {:?}; the body is used",
            path
        );
    }
}
