//! Record-level document (GET /api/records/{rid})

use super::documents::{lenient_f64, lenient_string};
use super::null_as_default;
use super::qc::QcScoreDoc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final-decision categories in display order
pub const DECISION_CATEGORIES: &[&str] = &["ASSIGNBACK", "OPS_ATTENTION", "FLAGS", "TECH_ISSUES"];

/// Processed record with per-call results and merged artifacts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDoc {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Set by the backend when the record has not been processed
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calls: Vec<RecordCall>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aggregate: QcScoreDoc,
    /// Merged artifacts across calls (`qa`, `qc`, `transcript`)
    #[serde(default)]
    pub merged: Value,
    #[serde(default)]
    pub final_decision: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordCall {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub index: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_sec: Option<f64>,
}

/// One final-decision finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionIssue {
    pub issue: String,
    pub details: Option<String>,
}

impl RecordDoc {
    pub fn is_processed(&self) -> bool {
        self.error.is_none()
    }

    /// Findings listed under a final-decision category
    ///
    /// Object details are shown as compact JSON.
    pub fn decision_issues(&self, category: &str) -> Vec<DecisionIssue> {
        let Some(items) = self.final_decision.get(category).and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| {
                let issue = match item.get("issue") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => "-".to_string(),
                    Some(other) => other.to_string(),
                };
                let details = match item.get("details") {
                    Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                    Some(Value::Null) | None => None,
                    Some(Value::String(_)) => None,
                    Some(other) => Some(other.to_string()),
                };
                DecisionIssue { issue, details }
            })
            .collect()
    }
}
