//! Error types shared by the directory engine.
//!
//! Application plumbing (config loading, terminal setup, CLI) uses
//! `anyhow`; everything the controllers need to branch on is typed here.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors produced by the directory API transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, unexpected HTTP status)
    #[error("network failure: {0}")]
    Network(String),
    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The requested resource does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// The server rejected a committed profile diff
    #[error("rejected: {message}")]
    ValidationRejected {
        message: String,
        /// Per-field reasons keyed by the wire field name, when supplied
        fields: BTreeMap<String, String>,
    },
}

impl ApiError {
    /// Short label for inline status messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Decode(_) => "decode",
            ApiError::NotFound(_) => "not found",
            ApiError::ValidationRejected { .. } => "rejected",
        }
    }
}

/// Reference-data validation failures, raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("tag vocabulary contains an empty tag")]
    EmptyTag,
    #[error("tags `{first}` and `{second}` both normalize to slug `{slug}`")]
    SlugCollision {
        first: String,
        second: String,
        slug: String,
    },
}

/// Errors raised while mutating a profile draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("not in edit mode")]
    NotEditing,
    #[error("a save is in progress")]
    Saving,
    #[error("unknown country code `{0}`")]
    UnknownCountry(String),
    #[error("unknown tag `{0}`")]
    UnknownTag(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    /// The commit request itself failed; the draft is kept
    #[error(transparent)]
    Api(#[from] ApiError),
}
