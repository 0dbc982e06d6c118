//! Directory API abstraction.
//!
//! - `Transport` trait, the seam every controller talks through
//! - `HttpTransport`, the reqwest-backed implementation

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use crate::draft::ProfileDiff;
use crate::error::ApiError;
use crate::model::{ArtistProfile, SearchPage, TrendPoint};

pub use http::HttpTransport;

/// Operations the dashboard needs from the directory service.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetch one page of the directory for an encoded filter query.
    async fn search(&self, query: &str) -> Result<SearchPage, ApiError>;

    /// Fetch the recent trend series of one profile, oldest first.
    async fn trends(&self, user_id: &str) -> Result<Vec<TrendPoint>, ApiError>;

    /// Send a partial update; returns the server's representation.
    async fn update_profile(&self, id: &str, diff: &ProfileDiff)
        -> Result<ArtistProfile, ApiError>;
}
