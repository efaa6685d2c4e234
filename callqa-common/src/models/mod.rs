//! API document models
//!
//! Every document the dashboard consumes is read-only JSON produced by the
//! analysis backend. Fields are optional throughout: a renderer must be able
//! to draw a placeholder for anything missing, so the models never reject a
//! document for an absent or null field.

pub mod call;
pub mod documents;
pub mod qc;
pub mod record;

pub use call::CallReference;
pub use documents::{
    ComplianceCheck, IdProof, MetadataDoc, PersonalParticulars, ProcessCompliance, QaItem,
    ReportDoc, ReportMeta, ReportSummary, Segment, SpeakerStats, TopMetrics, TranscriptDoc,
};
pub use qc::{LabeledTimestamp, QcParameter, QcReport, QcScoreDerived, QcScoreDoc, Timestamps};
pub use record::{DecisionIssue, RecordCall, RecordDoc, DECISION_CATEGORIES};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Decode a fetched document, degrading to the empty default when its shape
/// does not match the model
pub fn decode_lenient<T>(value: &Value, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match T::deserialize(value) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(document = what, error = %e, "Document shape mismatch, rendering placeholders");
            T::default()
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
