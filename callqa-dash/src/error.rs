//! Error types for callqa-dash

use crate::fetch::FetchError;
use thiserror::Error;

/// Message shown to the user when the primary documents cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

/// Main error type for callqa-dash
#[derive(Error, Debug)]
pub enum DashError {
    /// One of the primary documents (metadata, report, transcript) failed
    #[error("Failed to load dashboard data: {0}")]
    Load(#[source] FetchError),

    /// File I/O errors (export)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using DashError
pub type Result<T> = std::result::Result<T, DashError>;
