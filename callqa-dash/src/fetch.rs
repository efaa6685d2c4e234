//! JSON fetch client
//!
//! A single GET per call: no retries, no timeout. The caller decides whether
//! a failure is fatal.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("callqa-dash/", env!("CARGO_PKG_VERSION"));

/// Fetch failures; every variant names the URL
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Anything that can answer a JSON GET
///
/// The HTTP client is the production source; [`MemorySource`] serves
/// canned documents for headless use.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// HTTP implementation over reqwest
pub struct HttpJsonClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpJsonClient {
    /// Create a client resolving relative endpoint paths against `base_url`
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URLs pass through; paths join onto the base
    pub fn resolve_url(&self, url: &str) -> Result<Url, FetchError> {
        self.base_url.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl JsonSource for HttpJsonClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let target = self.resolve_url(url)?;
        tracing::debug!(url = %target, "GET");

        let response = self
            .http_client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory source of canned documents
///
/// Unknown URLs answer 404. Every request is logged in order so callers can
/// assert which endpoints were tried.
#[derive(Default)]
pub struct MemorySource {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

struct Route {
    response: Result<Value, u16>,
    delay: Option<Duration>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `url`
    pub fn with_json(mut self, url: impl Into<String>, document: Value) -> Self {
        self.routes.insert(
            url.into(),
            Route {
                response: Ok(document),
                delay: None,
            },
        );
        self
    }

    /// Answer `url` with an HTTP error status
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.routes.insert(
            url.into(),
            Route {
                response: Err(status),
                delay: None,
            },
        );
        self
    }

    /// Delay the response for `url` (the route must already exist)
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(url) {
            route.delay = Some(delay);
        }
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JsonSource for MemorySource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        let Some(route) = self.routes.get(url) else {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        route.response.clone().map_err(|status| FetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}
