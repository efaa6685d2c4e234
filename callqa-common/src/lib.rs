//! # CallQA Common Library
//!
//! Shared code for the call QA review dashboard:
//! - API document models (metadata, reports, transcript, QC score, records)
//! - Configuration loading
//! - `m:ss` time formatting and parsing
//! - QC score and question summary computation

pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod time_format;

pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use models::CallReference;
