//! Content store errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the content store.
///
/// A missing document is never an error; lookups return `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in post '{slug}': {source}")]
    Frontmatter {
        slug: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid project manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate project slug: {0}")]
    DuplicateSlug(String),

    #[error("Invalid project slug: {0:?}")]
    InvalidSlug(String),
}
