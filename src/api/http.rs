use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::Transport;
use crate::config::ApiConfig;
use crate::draft::ProfileDiff;
use crate::error::ApiError;
use crate::model::{ArtistProfile, Envelope, RejectionBody, SearchPage, TrendPoint};

const SESSION_COOKIE: &str = "accessToken";
const DEFAULT_REJECTION: &str = "the server rejected the update";

/// reqwest-backed transport. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
    trend_range_days: u32,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.api_url)
            .with_context(|| format!("invalid api_url `{}`", config.api_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.access_token {
            let mut cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token))
                .context("access token contains characters not allowed in a cookie")?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base,
            trend_range_days: config.trend_range_days,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("api_url `{}` cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn search_url(&self, query: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["artists"])?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    pub fn trends_url(&self, user_id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["trends", user_id])?;
        url.query_pairs_mut()
            .append_pair("range", &self.trend_range_days.to_string());
        Ok(url)
    }

    pub fn profile_url(&self, id: &str) -> Result<Url, ApiError> {
        self.endpoint(&["artists", id])
    }
}

impl Transport for HttpTransport {
    async fn search(&self, query: &str) -> Result<SearchPage, ApiError> {
        let url = self.search_url(query)?;
        debug!(%url, "directory search");
        let response = self.client.get(url).send().await.map_err(request_error)?;
        read_envelope(response, "directory page").await
    }

    async fn trends(&self, user_id: &str) -> Result<Vec<TrendPoint>, ApiError> {
        let url = self.trends_url(user_id)?;
        debug!(%url, "trend fetch");
        let response = self.client.get(url).send().await.map_err(request_error)?;
        read_envelope(response, &format!("trends for {}", user_id)).await
    }

    async fn update_profile(
        &self,
        id: &str,
        diff: &ProfileDiff,
    ) -> Result<ArtistProfile, ApiError> {
        let url = self.profile_url(id)?;
        debug!(%url, fields = diff.len(), "profile update");
        let response = self
            .client
            .patch(url)
            .json(diff)
            .send()
            .await
            .map_err(request_error)?;
        read_envelope(response, &format!("profile {}", id)).await
    }
}

fn request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network("request timed out".to_string())
    } else if err.is_connect() {
        ApiError::Network(format!("connection failed: {}", err))
    } else {
        ApiError::Network(err.to_string())
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(request_error)?;

    if !status.is_success() {
        return Err(error_for_status(status, &body, what));
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)
        .map_err(|err| ApiError::Decode(format!("{}: {}", what, err)))?;
    Ok(envelope.response)
}

/// Map a non-success response to the error the controllers branch on.
fn error_for_status(status: StatusCode, body: &str, what: &str) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(what.to_string()),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let rejection = parse_rejection(body);
            ApiError::ValidationRejected {
                message: rejection
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
                fields: rejection.errors,
            }
        }
        _ => ApiError::Network(format!("HTTP {} for {}", status, what)),
    }
}

/// Rejections arrive either bare or wrapped in the usual envelope.
fn parse_rejection(body: &str) -> RejectionBody {
    if let Ok(envelope) = serde_json::from_str::<Envelope<RejectionBody>>(body) {
        return envelope.response;
    }
    serde_json::from_str::<RejectionBody>(body).unwrap_or_default()
}
