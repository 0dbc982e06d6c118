//! Tracks which directory entry is open and lazily loads its trend series.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::Transport;
use crate::error::ApiError;
use crate::model::{ArtistProfile, TrendPoint};
use crate::observe::Observable;

/// What the detail panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailView {
    #[default]
    Empty,
    Loading {
        profile: ArtistProfile,
    },
    Loaded {
        profile: ArtistProfile,
        trends: Vec<TrendPoint>,
    },
    Failed {
        profile: ArtistProfile,
        error: ApiError,
    },
}

impl DetailView {
    pub fn profile(&self) -> Option<&ArtistProfile> {
        match self {
            DetailView::Empty => None,
            DetailView::Loading { profile }
            | DetailView::Loaded { profile, .. }
            | DetailView::Failed { profile, .. } => Some(profile),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.profile().map(|profile| profile.user_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendTicket {
    user_id: String,
    generation: u64,
}

impl TrendTicket {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug)]
pub struct SelectionController {
    generation: u64,
    closed: bool,
    state: Observable<DetailView>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            generation: 0,
            closed: false,
            state: Observable::new(DetailView::Empty),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.state.subscribe()
    }

    pub fn view(&self) -> DetailView {
        self.state.get()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.state.snapshot().selected_id().map(str::to_string)
    }

    /// Open `profile`. Returns a ticket when its trends must be fetched.
    ///
    /// Re-selecting the open entry is a no-op unless its last fetch failed.
    pub fn select(&mut self, profile: ArtistProfile) -> Option<TrendTicket> {
        if self.closed {
            return None;
        }
        {
            let current = self.state.snapshot();
            if current.selected_id() == Some(profile.user_id.as_str())
                && !matches!(*current, DetailView::Failed { .. })
            {
                return None;
            }
        }

        self.generation += 1;
        let ticket = TrendTicket {
            user_id: profile.user_id.clone(),
            generation: self.generation,
        };
        debug!(user_id = %ticket.user_id, generation = ticket.generation, "selection changed");
        self.state.publish(DetailView::Loading { profile });
        Some(ticket)
    }

    pub fn deselect(&mut self) {
        // in-flight fetches become stale
        self.generation += 1;
        self.state.publish(DetailView::Empty);
    }

    /// Apply a trend response. Returns `false` when it was stale and dropped.
    pub fn resolve(&mut self, ticket: TrendTicket, result: Result<Vec<TrendPoint>, ApiError>) -> bool {
        if self.closed || ticket.generation != self.generation {
            debug!(
                user_id = %ticket.user_id,
                generation = ticket.generation,
                latest = self.generation,
                "stale trend response dropped"
            );
            return false;
        }

        let profile = {
            let current = self.state.snapshot();
            match &*current {
                DetailView::Loading { profile } if profile.user_id == ticket.user_id => {
                    profile.clone()
                }
                _ => return false,
            }
        };

        let next = match result {
            Ok(trends) => DetailView::Loaded { profile, trends },
            Err(error) => {
                warn!(user_id = %ticket.user_id, error = %error, "trend fetch failed");
                DetailView::Failed { profile, error }
            }
        };
        self.state.publish(next);
        true
    }

    /// Select and load in one go.
    pub async fn load<T: Transport>(&mut self, transport: &T, profile: ArtistProfile) -> bool {
        let Some(ticket) = self.select(profile) else {
            return false;
        };
        let result = transport.trends(ticket.user_id()).await;
        self.resolve(ticket, result)
    }

    /// Swap in the accepted representation after a commit, keeping trends.
    pub fn replace_profile(&mut self, updated: ArtistProfile) {
        self.state.modify(|view| match view {
            DetailView::Loading { profile }
            | DetailView::Loaded { profile, .. }
            | DetailView::Failed { profile, .. }
                if profile.user_id == updated.user_id =>
            {
                *profile = updated;
            }
            _ => {}
        });
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::model::fixtures;

    #[test]
    fn test_select_moves_to_loading() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        assert_eq!(ticket.user_id(), "1");
        assert!(matches!(selection.view(), DetailView::Loading { .. }));
    }

    #[test]
    fn test_resolve_loads_trends() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        assert!(selection.resolve(ticket, Ok(vec![fixtures::trend(0, 10, 1)])));
        match selection.view() {
            DetailView::Loaded { profile, trends } => {
                assert_eq!(profile.user_id, "1");
                assert_eq!(trends.len(), 1);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_reselect_is_noop_unless_failed() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        assert!(selection.select(fixtures::profile("1", "a")).is_none());

        selection.resolve(ticket, Err(ApiError::Network("down".to_string())));
        assert!(matches!(selection.view(), DetailView::Failed { .. }));
        assert_eq!(selection.selected_id().as_deref(), Some("1"));

        let retry = selection.select(fixtures::profile("1", "a")).unwrap();
        assert!(selection.resolve(retry, Ok(Vec::new())));
        assert!(selection.select(fixtures::profile("1", "a")).is_none());
    }

    #[test]
    fn test_switching_selection_drops_previous_response() {
        let mut selection = SelectionController::new();
        let first = selection.select(fixtures::profile("1", "a")).unwrap();
        let second = selection.select(fixtures::profile("2", "b")).unwrap();

        assert!(selection.resolve(second, Ok(vec![fixtures::trend(0, 5, 5)])));
        assert!(!selection.resolve(first, Ok(vec![fixtures::trend(0, 1, 1)])));
        assert_eq!(selection.selected_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_deselect_clears_and_invalidates() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        selection.deselect();
        assert_eq!(selection.view(), DetailView::Empty);
        assert!(!selection.resolve(ticket, Ok(Vec::new())));
        assert_eq!(selection.view(), DetailView::Empty);
    }

    #[test]
    fn test_replace_profile_keeps_trends() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        selection.resolve(ticket, Ok(vec![fixtures::trend(0, 1, 1)]));

        let mut updated = fixtures::profile("1", "a");
        updated.bio = Some("new bio".to_string());
        selection.replace_profile(updated);

        match selection.view() {
            DetailView::Loaded { profile, trends } => {
                assert_eq!(profile.bio.as_deref(), Some("new bio"));
                assert_eq!(trends.len(), 1);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_replace_profile_ignores_other_ids() {
        let mut selection = SelectionController::new();
        selection.select(fixtures::profile("1", "a"));
        selection.replace_profile(fixtures::profile("2", "b"));
        assert_eq!(selection.selected_id().as_deref(), Some("1"));
    }

    #[test]
    fn test_close_drops_responses() {
        let mut selection = SelectionController::new();
        let ticket = selection.select(fixtures::profile("1", "a")).unwrap();
        selection.close();
        assert!(!selection.resolve(ticket, Ok(Vec::new())));
    }

    #[tokio::test]
    async fn test_load_through_transport() {
        let transport =
            FakeTransport::new().with_trends("1", 0, Ok(vec![fixtures::trend(0, 3, 4)]));
        let mut selection = SelectionController::new();
        assert!(selection.load(&transport, fixtures::profile("1", "a")).await);
        assert!(matches!(selection.view(), DetailView::Loaded { .. }));
        assert_eq!(transport.calls(), vec!["trends:1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_first_selection_loses_to_fast_second() {
        let transport = Arc::new(
            FakeTransport::new()
                .with_trends("A", 500, Ok(vec![fixtures::trend(0, 1, 1)]))
                .with_trends("B", 50, Ok(vec![fixtures::trend(0, 2, 2), fixtures::trend(1, 3, 3)])),
        );
        let mut selection = SelectionController::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        for user_id in ["A", "B"] {
            let ticket = selection.select(fixtures::profile(user_id, user_id)).unwrap();
            let transport = Arc::clone(&transport);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = transport.trends(ticket.user_id()).await;
                let _ = tx.send((ticket, result));
            });
        }
        drop(tx);

        let mut arrivals = Vec::new();
        while let Some((ticket, result)) = rx.recv().await {
            arrivals.push(ticket.user_id().to_string());
            selection.resolve(ticket, result);
        }

        assert_eq!(arrivals, vec!["B", "A"]);
        match selection.view() {
            DetailView::Loaded { profile, trends } => {
                assert_eq!(profile.user_id, "B");
                assert_eq!(trends.len(), 2);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }
}
