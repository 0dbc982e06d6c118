//! Wire types returned by the directory API.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)@(\w+)").expect("mention pattern is valid"));

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)?(www\.)?").expect("scheme pattern is valid"));

const PROFILE_LINK_BASE: &str = "https://x.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub id: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Lower-case ISO code, as stored by the API
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub tweets_count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated_at: OffsetDateTime,
    #[serde(default)]
    pub images: ProfileImages,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImages {
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub banner: Option<String>,
}

impl ArtistProfile {
    /// Name to show in lists, falling back to the handle.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Link to the account itself.
    pub fn profile_url(&self) -> String {
        match &self.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("{}/{}", PROFILE_LINK_BASE, self.username),
        }
    }
}

/// One sampled day of counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub followers_count: u64,
    pub tweets_count: u64,
}

/// `{status, response}` wrapper used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    pub response: T,
}

/// One page of directory search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<ArtistProfile>,
    #[serde(default)]
    pub has_next: bool,
}

/// Body returned alongside a 400/422 from the update endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectionBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: std::collections::BTreeMap<String, String>,
}

/// Strip scheme and `www.` for compact display of a website.
pub fn website_label(website: &str) -> String {
    SCHEME_RE.replace(website.trim(), "").into_owned()
}

/// A run of bio text, either plain or an `@handle` mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioSegment {
    Text(String),
    Mention { handle: String, url: String },
}

/// Split a bio into plain text and mention segments.
///
/// A mention must start the bio or follow whitespace; the whitespace stays
/// with the preceding text.
pub fn bio_segments(bio: &str) -> Vec<BioSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in MENTION_RE.captures_iter(bio) {
        let Some(handle) = caps.get(1) else { continue };
        // `@` sits right before the handle
        let at = handle.start() - 1;
        if at > cursor {
            segments.push(BioSegment::Text(bio[cursor..at].to_string()));
        }
        segments.push(BioSegment::Mention {
            handle: handle.as_str().to_string(),
            url: format!("{}/{}", PROFILE_LINK_BASE, handle.as_str()),
        });
        cursor = handle.end();
    }

    if cursor < bio.len() {
        segments.push(BioSegment::Text(bio[cursor..].to_string()));
    }
    segments
}
