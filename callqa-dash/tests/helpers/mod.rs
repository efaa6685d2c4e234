//! Test Helper Utilities
//!
//! Shared utilities for testing callqa-dash

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod mock_api;

pub use fixtures::{metadata_doc, qc_doc, record_doc, report_doc, transcript_doc};
pub use mock_api::{MockApi, MockApiBuilder};
