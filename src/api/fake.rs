//! In-memory transport for controller tests. Each response can be delayed so
//! overlapping requests complete in a chosen order under paused tokio time.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::sleep;

use super::Transport;
use crate::draft::ProfileDiff;
use crate::error::ApiError;
use crate::model::{ArtistProfile, SearchPage, TrendPoint};

type Scripted<T> = (Duration, Result<T, ApiError>);

#[derive(Default)]
pub struct FakeTransport {
    pages: HashMap<String, Scripted<SearchPage>>,
    trends: HashMap<String, Scripted<Vec<TrendPoint>>>,
    update: Mutex<Option<Result<ArtistProfile, ApiError>>>,
    calls: Mutex<Vec<String>>,
    sent_diffs: Mutex<Vec<ProfileDiff>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, query: &str, delay_ms: u64, page: Result<SearchPage, ApiError>) -> Self {
        self.pages
            .insert(query.to_string(), (Duration::from_millis(delay_ms), page));
        self
    }

    pub fn with_trends(
        mut self,
        user_id: &str,
        delay_ms: u64,
        trends: Result<Vec<TrendPoint>, ApiError>,
    ) -> Self {
        self.trends
            .insert(user_id.to_string(), (Duration::from_millis(delay_ms), trends));
        self
    }

    pub fn with_update(self, result: Result<ArtistProfile, ApiError>) -> Self {
        *self.update.lock().unwrap() = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_diffs(&self) -> Vec<ProfileDiff> {
        self.sent_diffs.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn search(&self, query: &str) -> Result<SearchPage, ApiError> {
        self.calls.lock().unwrap().push(format!("search:{}", query));
        let (delay, result) = self
            .pages
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(SearchPage::default())));
        sleep(delay).await;
        result
    }

    async fn trends(&self, user_id: &str) -> Result<Vec<TrendPoint>, ApiError> {
        self.calls.lock().unwrap().push(format!("trends:{}", user_id));
        let (delay, result) = self
            .trends
            .get(user_id)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        sleep(delay).await;
        result
    }

    async fn update_profile(
        &self,
        id: &str,
        diff: &ProfileDiff,
    ) -> Result<ArtistProfile, ApiError> {
        self.calls.lock().unwrap().push(format!("update:{}", id));
        self.sent_diffs.lock().unwrap().push(diff.clone());
        self.update
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted update".to_string())))
    }
}
