//! # Call QA Dashboard (callqa-dash)
//!
//! Two-part, audio-synchronised review of one recorded call's QA results.
//!
//! **Purpose:** Fetch metadata, the QA report, the secondary QC report and
//! the transcript from the analysis API, and render them into a tabbed view
//! with transport controls and transcript highlighting.
//!
//! **Architecture:** Endpoint resolution → concurrent primary fetch →
//! QC report reconciliation → side-effect-free renderers placed on a
//! [`render::Surface`]. The crate ships a headless surface that serialises
//! to printable HTML.

pub mod dashboard;
pub mod endpoints;
pub mod error;
pub mod export;
pub mod fetch;
pub mod playback;
pub mod reconciler;
pub mod render;
pub mod tabs;

pub use dashboard::{Dashboard, PrimaryDocs, RefreshOutcome};
pub use endpoints::{EndpointSet, Resource};
pub use error::{DashError, Result};
pub use fetch::{FetchError, HttpJsonClient, JsonSource, MemorySource};
pub use reconciler::{ReportReconciler, ReportSource, ResolvedReport};
pub use tabs::Tab;
