//! REST API Client
//!
//! Frontend bindings to the reviewer backend, organized by domain.

mod screenshots;
mod categories;
mod state;

use std::future::Future;
use std::pin::pin;

use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use log::warn;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use review_state::{ReviewError, ReviewResult};
use serde::de::DeserializeOwned;

// Re-export all public items
pub use screenshots::*;
pub use categories::*;
pub use state::*;

/// Timeout for ordinary requests
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;
/// Timeout for the initial selection fetch; the cache takes over after it
pub const HYDRATION_TIMEOUT_MS: u32 = 5_000;

const DEV_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u32,
    pub hydration_timeout_ms: u32,
}

impl ApiConfig {
    /// `REVIEWER_API_URL` at build time, else the page origin
    pub fn from_env() -> Self {
        let base_url = option_env!("REVIEWER_API_URL")
            .filter(|url| !url.is_empty())
            .map(String::from)
            .or_else(|| web_sys::window().and_then(|window| window.location().origin().ok()))
            .unwrap_or_else(|| DEV_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            hydration_timeout_ms: HYDRATION_TIMEOUT_MS,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Shared HTTP client bound to one `ApiConfig`
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

thread_local! {
    static CLIENT: ApiClient = ApiClient::new(ApiConfig::from_env());
}

/// The app-wide client
pub fn client() -> ApiClient {
    CLIENT.with(Clone::clone)
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send with the default timeout and require a 2xx status
    pub(crate) async fn execute(&self, request: reqwest::RequestBuilder) -> ReviewResult<reqwest::Response> {
        self.execute_within(request, self.config.request_timeout_ms).await
    }

    pub(crate) async fn execute_within(
        &self,
        request: reqwest::RequestBuilder,
        timeout_ms: u32,
    ) -> ReviewResult<reqwest::Response> {
        let response = with_timeout(timeout_ms, async {
            request.send().await.map_err(network_error)
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            warn!("[API] {} returned {}", url, status);
            return Err(ReviewError::Status { status: status.as_u16(), url });
        }
        Ok(response)
    }

    pub(crate) async fn json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ReviewResult<T> {
        let response = self.execute(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ReviewError::Malformed(e.to_string()))
    }
}

/// Race `future` against a timer
pub async fn with_timeout<T, F>(timeout_ms: u32, future: F) -> ReviewResult<T>
where
    F: Future<Output = ReviewResult<T>>,
{
    let future = pin!(future);
    let timer = pin!(TimeoutFuture::new(timeout_ms));
    match select(future, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            warn!("[API] Request timed out after {} ms", timeout_ms);
            Err(ReviewError::Timeout(timeout_ms as u64))
        }
    }
}

pub(crate) fn network_error(err: reqwest::Error) -> ReviewError {
    warn!("[API] Network error: {}", err);
    ReviewError::Network(err.to_string())
}

/// Encode one path segment (`/categories/{id}`)
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
