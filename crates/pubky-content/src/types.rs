//! Core data types for content roots and resolved content.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A named, read-only directory holding one logical collection of bundled material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRoot {
    pub name: String,
    pub path: PathBuf,
}

impl ContentRoot {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Bytes read from a content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Binary(e.into_bytes()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Content::Text(text) => text.len(),
            Content::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Readability of a single root, as observed by [`crate::ContentResolver::verify`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootStatus {
    pub name: String,
    pub path: PathBuf,
    pub readable: bool,
}

/// Startup verification result across all configured roots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootReport {
    pub roots: Vec<RootStatus>,
}

impl RootReport {
    /// True only when every configured root is readable. An empty report is not healthy.
    pub fn all_readable(&self) -> bool {
        !self.roots.is_empty() && self.roots.iter().all(|r| r.readable)
    }

    pub fn unreadable(&self) -> impl Iterator<Item = &RootStatus> {
        self.roots.iter().filter(|r| !r.readable)
    }
}

/// Errors raised while resolving or reading content.
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("Unknown content root: {0}")]
    UnknownRoot(String),

    #[error("Path escapes content root '{root}': {path}")]
    OutsideRoot { root: String, path: String },

    #[error("File not found: {root}/{path}")]
    NotFound { root: String, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether the error means "nothing at that address" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound { .. } | ContentError::UnknownRoot(_)
        )
    }
}

/// Convenience result type.
pub type ContentResult<T> = Result<T, ContentError>;
