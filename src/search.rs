//! Directory search coordination.
//!
//! Every request is tagged with a generation. Only the response carrying the
//! latest generation is committed to the snapshot; anything older is dropped,
//! whatever order responses arrive in.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::Transport;
use crate::error::ApiError;
use crate::filter::{encode, DirectoryFilter};
use crate::model::{ArtistProfile, SearchPage};
use crate::observe::Observable;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub status: SearchStatus,
    pub items: Vec<ArtistProfile>,
    pub has_next: bool,
    /// Encoded filter of the request this snapshot belongs to
    pub key: Option<String>,
    pub generation: u64,
}

impl SearchSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }
}

/// Handle for one issued request; hand it back to `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    key: String,
    generation: u64,
}

impl SearchTicket {
    /// The encoded query to send.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct SearchCoordinator {
    generation: u64,
    closed: bool,
    state: Observable<SearchSnapshot>,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self {
            generation: 0,
            closed: false,
            state: Observable::new(SearchSnapshot::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.get()
    }

    /// Start a request for `filter` unless the same key is already loading
    /// or loaded.
    pub fn begin(&mut self, filter: &DirectoryFilter) -> Option<SearchTicket> {
        let key = encode(filter);
        {
            let current = self.state.snapshot();
            let same_key = current.key.as_deref() == Some(key.as_str());
            if same_key && matches!(current.status, SearchStatus::Loading | SearchStatus::Ready) {
                debug!(key = %key, "search already current, skipping");
                return None;
            }
        }
        self.issue(key)
    }

    /// Start a request even when the key is unchanged.
    pub fn refresh(&mut self, filter: &DirectoryFilter) -> Option<SearchTicket> {
        self.issue(encode(filter))
    }

    fn issue(&mut self, key: String) -> Option<SearchTicket> {
        if self.closed {
            return None;
        }
        self.generation += 1;
        let generation = self.generation;
        debug!(key = %key, generation, "search issued");
        self.state.publish(SearchSnapshot {
            status: SearchStatus::Loading,
            items: Vec::new(),
            has_next: false,
            key: Some(key.clone()),
            generation,
        });
        Some(SearchTicket { key, generation })
    }

    /// Apply a response. Returns `false` when it was stale and dropped.
    pub fn resolve(&mut self, ticket: SearchTicket, result: Result<SearchPage, ApiError>) -> bool {
        if self.closed {
            debug!(generation = ticket.generation, "search resolved after close, dropped");
            return false;
        }
        if ticket.generation != self.generation {
            debug!(
                key = %ticket.key,
                generation = ticket.generation,
                latest = self.generation,
                "stale search response dropped"
            );
            return false;
        }

        let snapshot = match result {
            Ok(page) => SearchSnapshot {
                status: SearchStatus::Ready,
                items: page.data,
                has_next: page.has_next,
                key: Some(ticket.key),
                generation: ticket.generation,
            },
            Err(err) => {
                warn!(key = %ticket.key, error = %err, "directory search failed");
                SearchSnapshot {
                    status: SearchStatus::Failed(err.to_string()),
                    items: Vec::new(),
                    has_next: false,
                    key: Some(ticket.key),
                    generation: ticket.generation,
                }
            }
        };
        self.state.publish(snapshot);
        true
    }

    /// Issue, await and resolve in one go.
    pub async fn run<T: Transport>(&mut self, transport: &T, filter: &DirectoryFilter) -> bool {
        let Some(ticket) = self.begin(filter) else {
            return false;
        };
        let result = transport.search(ticket.key()).await;
        self.resolve(ticket, result)
    }

    /// Swap a listed profile for its updated representation.
    pub fn replace_item(&mut self, profile: &ArtistProfile) {
        self.state.modify(|snapshot| {
            for item in snapshot.items.iter_mut().filter(|item| item.id == profile.id) {
                *item = profile.clone();
            }
        });
    }

    /// Stop accepting responses.
    pub fn close(&mut self) {
        self.closed = true;
    }
}
