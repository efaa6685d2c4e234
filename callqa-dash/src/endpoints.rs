//! Endpoint resolution
//!
//! Builds the complete URL mapping for every logical resource. Per-call
//! routes (from the page's `rid`/`call` query) take precedence over
//! configured endpoints, which take precedence over built-in defaults.
//! Resolution never fails: every resource always has a URL.

use callqa_common::models::call::RECORD_PARAM;
use callqa_common::models::CallReference;
use callqa_common::DashboardConfig;
use reqwest::Url;
use tracing::{debug, warn};

/// Base used to parse page locations given as a bare path
const PAGE_BASE: &str = "http://dashboard.local/";

/// Logical resources the dashboard consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Metadata,
    Report,
    Report2,
    Transcript,
    Audio,
    QcScore,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Metadata,
        Resource::Report,
        Resource::Report2,
        Resource::Transcript,
        Resource::Audio,
        Resource::QcScore,
    ];

    /// Configuration key and per-call route segment
    pub fn name(self) -> &'static str {
        match self {
            Resource::Metadata => "metadata",
            Resource::Report => "report",
            Resource::Report2 => "report2",
            Resource::Transcript => "transcript",
            Resource::Audio => "audio",
            Resource::QcScore => "qcscore",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Built-in fallback path
    pub fn default_path(self) -> &'static str {
        match self {
            Resource::Metadata => "/api/metadata",
            Resource::Report => "/api/report",
            Resource::Report2 => "/api/report2",
            Resource::Transcript => "/api/transcript",
            Resource::Audio => "/audio",
            Resource::QcScore => "/api/qcscore",
        }
    }

    /// Whether the backend serves this resource under a per-call route
    pub fn is_per_call(self) -> bool {
        !matches!(self, Resource::QcScore)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// `/api/records/{rid}/calls/{call}/{resource}` with percent-encoded ids
pub fn call_resource_url(call: &CallReference, resource: Resource) -> String {
    format!(
        "/api/records/{}/calls/{}/{}",
        urlencoding::encode(&call.record_id),
        urlencoding::encode(&call.call_id),
        resource.name()
    )
}

/// `/api/records/{rid}` with percent-encoded id
pub fn record_url(record_id: &str) -> String {
    format!("/api/records/{}", urlencoding::encode(record_id))
}

/// Parse a page location given as an absolute URL or a path with query
fn page_url(page: &str) -> Option<Url> {
    match Url::parse(page) {
        Ok(url) => Some(url),
        Err(_) => Url::parse(PAGE_BASE).ok()?.join(page).ok(),
    }
}

/// Read the call reference from a page location
///
/// Accepts an absolute URL or a path with query (`/index.html?rid=R&call=1`).
pub fn call_reference_from_page(page: &str) -> Option<CallReference> {
    CallReference::from_query_pairs(page_url(page)?.query_pairs())
}

/// Read just the record identifier (`rid`) from a page location
pub fn record_id_from_page(page: &str) -> Option<String> {
    page_url(page)?
        .query_pairs()
        .find(|(key, value)| key == RECORD_PARAM && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

/// Complete resource → URL mapping, fixed for the page session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    urls: [String; 6],
}

impl EndpointSet {
    /// Merge per-call routes, configured endpoints and defaults, per key
    pub fn resolve(call: Option<&CallReference>, config: &DashboardConfig) -> Self {
        for name in config.endpoints.keys() {
            if Resource::from_name(name).is_none() {
                warn!(endpoint = %name, "Ignoring unknown endpoint name in configuration");
            }
        }

        let urls = Resource::ALL.map(|resource| {
            let url = match call {
                Some(call) if resource.is_per_call() => call_resource_url(call, resource),
                _ => Self::configured_url(config, resource),
            };
            debug!(resource = resource.name(), url = %url, "Resolved endpoint");
            url
        });

        Self { urls }
    }

    /// Resolve from a page location and configuration
    pub fn for_page(page: &str, config: &DashboardConfig) -> (Option<CallReference>, Self) {
        let call = call_reference_from_page(page);
        let endpoints = Self::resolve(call.as_ref(), config);
        (call, endpoints)
    }

    pub fn url(&self, resource: Resource) -> &str {
        &self.urls[resource.index()]
    }

    /// Static (non per-call) URL for a resource: configuration, then default
    pub fn configured_url(config: &DashboardConfig, resource: Resource) -> String {
        config
            .endpoint(resource.name())
            .map(str::to_string)
            .unwrap_or_else(|| resource.default_path().to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, &str)> {
        Resource::ALL.into_iter().map(move |r| (r, self.url(r)))
    }
}
