//! Secondary QC report reconciliation
//!
//! Resolves the Part-2 QC report through an ordered fallback chain:
//!
//! 1. Per-call route `/api/records/{rid}/calls/{call}/report2` (call known)
//! 2. Statically configured `report2` endpoint (step 1 produced nothing, or
//!    no call is known)
//! 3. Merged record `/api/records/{rid}` → `merged.qc`, when the report so
//!    far lacks `qc_parameters` and a call is known
//!
//! Steps run sequentially and every failure falls through silently. The
//! result is re-resolved from step 1 on each Part-2 activation.

use crate::endpoints::{call_resource_url, record_url, Resource};
use crate::fetch::JsonSource;
use callqa_common::models::{CallReference, QcReport};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Where a resolved report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    PerCall,
    Static,
    MergedRecord,
}

/// Outcome of one reconciliation
///
/// `report` is `None` when every source failed or was incomplete; the
/// renderers show a "No data" state for that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedReport {
    pub report: Option<QcReport>,
    pub source: Option<ReportSource>,
}

impl ResolvedReport {
    fn found(report: QcReport, source: ReportSource) -> Self {
        Self {
            report: Some(report),
            source: Some(source),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.report.is_none()
    }
}

/// Resolves the secondary QC report
#[derive(Debug, Clone)]
pub struct ReportReconciler {
    static_report2_url: String,
}

impl ReportReconciler {
    /// `static_report2_url` is the configured (or default) `report2` endpoint
    pub fn new(static_report2_url: impl Into<String>) -> Self {
        Self {
            static_report2_url: static_report2_url.into(),
        }
    }

    pub fn static_url(&self) -> &str {
        &self.static_report2_url
    }

    /// Run the fallback chain; never fails
    pub async fn resolve<S>(&self, source: &S, call: Option<&CallReference>) -> ResolvedReport
    where
        S: JsonSource + ?Sized,
    {
        let mut document: Option<(Value, ReportSource)> = None;

        // Step 1: per-call report
        if let Some(call) = call {
            let url = call_resource_url(call, Resource::Report2);
            match source.get_json(&url).await {
                Ok(doc) => document = Some((doc, ReportSource::PerCall)),
                Err(e) => warn!(error = %e, "Per-call QC report unavailable, trying configured endpoint"),
            }
        }

        // Step 2: statically configured report
        if document.is_none() {
            match source.get_json(&self.static_report2_url).await {
                Ok(doc) => document = Some((doc, ReportSource::Static)),
                Err(e) => warn!(error = %e, "Configured QC report unavailable"),
            }
        }

        if let Some((doc, origin)) = &document {
            if let Some(report) = QcReport::from_document(doc) {
                debug!(source = ?origin, "Resolved QC report");
                return ResolvedReport::found(report, *origin);
            }
            debug!(source = ?origin, "QC report lacks qc_parameters");
        }

        // Step 3: merged record artifacts
        if let Some(call) = call {
            let url = record_url(&call.record_id);
            match source.get_json(&url).await {
                Ok(record) => {
                    if let Some(report) = record
                        .pointer("/merged/qc")
                        .and_then(QcReport::from_document)
                    {
                        debug!(record_id = %call.record_id, "Resolved QC report from merged record");
                        return ResolvedReport::found(report, ReportSource::MergedRecord);
                    }
                    warn!(record_id = %call.record_id, "Merged record has no QC parameters");
                }
                Err(e) => warn!(error = %e, "Merged record unavailable"),
            }
        }

        // Step 4: nothing usable
        ResolvedReport::default()
    }
}

/// Token identifying one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

/// Issues monotonically increasing refresh tokens
///
/// Only the most recently issued token is current, so a slow response from
/// an earlier refresh can be recognised and discarded.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    latest: AtomicU64,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RefreshToken {
        RefreshToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RefreshToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemorySource;
    use serde_json::json;

    const PER_CALL: &str = "/api/records/R1/calls/2/report2";
    const STATIC: &str = "/api/report2";
    const RECORD: &str = "/api/records/R1";

    fn call() -> CallReference {
        CallReference::new("R1", "2")
    }

    fn qc(value: &str) -> Value {
        json!({"qc_parameters": {"greetings": {"value": value}}})
    }

    #[tokio::test]
    async fn test_per_call_wins() {
        let source = MemorySource::new()
            .with_json(PER_CALL, qc("Yes"))
            .with_json(STATIC, qc("No"));
        let resolved = ReportReconciler::new(STATIC)
            .resolve(&source, Some(&call()))
            .await;

        assert_eq!(resolved.source, Some(ReportSource::PerCall));
        assert_eq!(resolved.report.unwrap().value_of("greetings"), Some("Yes"));
        assert_eq!(source.requests(), vec![PER_CALL]);
    }

    #[tokio::test]
    async fn test_static_when_per_call_fails() {
        let source = MemorySource::new()
            .with_status(PER_CALL, 500)
            .with_json(STATIC, qc("No"));
        let resolved = ReportReconciler::new(STATIC)
            .resolve(&source, Some(&call()))
            .await;

        assert_eq!(resolved.source, Some(ReportSource::Static));
        assert_eq!(source.requests(), vec![PER_CALL, STATIC]);
    }

    #[tokio::test]
    async fn test_merged_when_both_fail() {
        let source = MemorySource::new().with_json(
            RECORD,
            json!({"merged": {"qc": qc("Partial")}}),
        );
        let resolved = ReportReconciler::new(STATIC)
            .resolve(&source, Some(&call()))
            .await;

        assert_eq!(resolved.source, Some(ReportSource::MergedRecord));
        assert_eq!(resolved.report.unwrap().value_of("greetings"), Some("Partial"));
        assert_eq!(source.requests(), vec![PER_CALL, STATIC, RECORD]);
    }

    #[tokio::test]
    async fn test_incomplete_per_call_skips_static() {
        // A present-but-incomplete per-call document goes straight to step 3
        let source = MemorySource::new()
            .with_json(PER_CALL, json!({"note": "pending"}))
            .with_json(STATIC, qc("No"))
            .with_json(RECORD, json!({"merged": {"qc": qc("Yes")}}));
        let resolved = ReportReconciler::new(STATIC)
            .resolve(&source, Some(&call()))
            .await;

        assert_eq!(resolved.source, Some(ReportSource::MergedRecord));
        assert_eq!(source.requests(), vec![PER_CALL, RECORD]);
    }

    #[tokio::test]
    async fn test_all_sources_fail() {
        let source = MemorySource::new().with_json(RECORD, json!({"merged": {}}));
        let resolved = ReportReconciler::new(STATIC)
            .resolve(&source, Some(&call()))
            .await;
        assert!(resolved.is_empty());
        assert_eq!(resolved.source, None);
    }

    #[tokio::test]
    async fn test_without_call_only_static_is_tried() {
        let source = MemorySource::new().with_json(STATIC, json!({}));
        let resolved = ReportReconciler::new(STATIC).resolve(&source, None).await;

        assert!(resolved.is_empty());
        assert_eq!(source.requests(), vec![STATIC]);
    }

    #[test]
    fn test_refresh_sequencer() {
        let sequencer = RefreshSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }
}
