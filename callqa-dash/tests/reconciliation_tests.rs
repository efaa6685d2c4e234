//! End-to-end QC report reconciliation over HTTP

mod helpers;

use callqa_dash::render::{qc, HeadlessDocument, Target, NO_DATA};
use callqa_dash::{HttpJsonClient, ReportReconciler, ReportSource};
use callqa_common::models::CallReference;
use helpers::{qc_doc, MockApiBuilder};
use serde_json::json;

const PER_CALL: &str = "/api/records/R%201/calls/2/report2";
const STATIC: &str = "/api/report2";
const RECORD: &str = "/api/records/R%201";

fn call() -> CallReference {
    CallReference::new("R 1", "2")
}

#[tokio::test]
async fn test_static_report_used_when_per_call_fails() {
    // Given: per-call report errors, static report is complete
    let api = MockApiBuilder::new()
        .status(PER_CALL, 500)
        .json(STATIC, qc_doc("No"))
        .spawn()
        .await;
    let client = HttpJsonClient::new(&api.base_url).unwrap();

    // When: resolving for a known call
    let resolved = ReportReconciler::new(STATIC)
        .resolve(&client, Some(&call()))
        .await;

    // Then: the static report wins and the merged record is never fetched
    assert_eq!(resolved.source, Some(ReportSource::Static));
    assert_eq!(resolved.report.unwrap().value_of("greetings"), Some("No"));
    assert_eq!(api.requests(), vec![PER_CALL, STATIC]);
}

#[tokio::test]
async fn test_merged_record_used_when_both_fail() {
    let api = MockApiBuilder::new()
        .status(PER_CALL, 404)
        .text(STATIC, "not json")
        .json(RECORD, json!({"merged": {"qc": qc_doc("Partial")}}))
        .spawn()
        .await;
    let client = HttpJsonClient::new(&api.base_url).unwrap();

    let resolved = ReportReconciler::new(STATIC)
        .resolve(&client, Some(&call()))
        .await;

    assert_eq!(resolved.source, Some(ReportSource::MergedRecord));
    assert_eq!(resolved.report.unwrap().value_of("greetings"), Some("Partial"));
    assert_eq!(api.requests(), vec![PER_CALL, STATIC, RECORD]);
}

#[tokio::test]
async fn test_all_sources_failing_renders_no_data() {
    let api = MockApiBuilder::new()
        .json(STATIC, json!({"status": "pending"}))
        .json(RECORD, json!({"merged": {"qc": {"note": "no parameters"}}}))
        .spawn()
        .await;
    let client = HttpJsonClient::new(&api.base_url).unwrap();

    let resolved = ReportReconciler::new(STATIC)
        .resolve(&client, Some(&call()))
        .await;
    assert!(resolved.is_empty());

    let mut surface = HeadlessDocument::new();
    qc::draw(&resolved, &mut surface);
    assert_eq!(surface.text(Target::QcParameters), NO_DATA);
    assert!(surface.alerts().is_empty());
}

#[tokio::test]
async fn test_each_resolution_starts_from_the_per_call_route() {
    let api = MockApiBuilder::new()
        .json(PER_CALL, qc_doc("Yes"))
        .spawn()
        .await;
    let client = HttpJsonClient::new(&api.base_url).unwrap();
    let reconciler = ReportReconciler::new(STATIC);

    for _ in 0..2 {
        let resolved = reconciler.resolve(&client, Some(&call())).await;
        assert_eq!(resolved.source, Some(ReportSource::PerCall));
    }
    assert_eq!(api.requests(), vec![PER_CALL, PER_CALL]);
}
