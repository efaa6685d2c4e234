//! QC score computation
//!
//! Mirrors the backend's `/api/qcscore` rubric so the score summary can be
//! derived locally when no score endpoint serves the current call.
//!
//! 16 items at 100 points each:
//! - QC parameters scored binary, graded or contextual
//! - MER completeness and documentation accuracy, banded
//! - Call duration and doctor rate of speech
//! - Visual presentation (always full marks)

use crate::models::{QcReport, QcScoreDerived, QcScoreDoc, ReportDoc};
use std::collections::BTreeMap;

/// Maximum attainable total
pub const MAX_SCORE: f64 = 1600.0;

/// Expected responses that mark a Personal Particulars item not applicable
const NOT_APPLICABLE: &[&str] = &["", "na", "n/a", "not applicable", "null", "none"];

/// Question counts derived from the QA matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiSummary {
    /// Correct answers as a percentage of scored questions
    pub overall_compliance_score: f64,
    pub total_questions: u32,
    pub questions_asked: u32,
    pub questions_missed: u32,
    pub incorrect_responses: u32,
    pub paraphrased_responses: u32,
    pub clubbed_questions: u32,
    pub critical_errors: u32,
}

/// Normalise a free-text status to one of the known buckets
///
/// Substring checks run in a fixed order so "Incorrect" is never read as
/// "correct".
pub fn normalize_status(value: Option<&str>) -> String {
    let s = value.unwrap_or("").trim().to_lowercase();
    for bucket in ["incorrect", "missing", "clubbed", "paraphrased", "correct"] {
        if s.contains(bucket) {
            return bucket.to_string();
        }
    }
    if s.is_empty() {
        "unknown".to_string()
    } else {
        s
    }
}

/// Count questions by outcome, skipping non-applicable Personal Particulars
pub fn compute_ui_summary(report: &ReportDoc) -> UiSummary {
    let mut summary = UiSummary::default();
    let mut correct = 0u32;

    for item in &report.qa_matrix {
        let qid = item.question_id.as_deref().unwrap_or("").trim();
        let expected = item
            .expected_response
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if qid.starts_with("PP.") && NOT_APPLICABLE.contains(&expected.as_str()) {
            continue;
        }

        summary.total_questions += 1;
        let status = normalize_status(item.status.as_deref());
        if status == "missing" {
            summary.questions_missed += 1;
        } else {
            summary.questions_asked += 1;
        }
        match status.as_str() {
            "incorrect" => summary.incorrect_responses += 1,
            "paraphrased" => summary.paraphrased_responses += 1,
            "clubbed" => summary.clubbed_questions += 1,
            "correct" => correct += 1,
            _ => {}
        }
    }

    summary.overall_compliance_score = if summary.total_questions > 0 {
        round2(correct as f64 / summary.total_questions as f64 * 100.0)
    } else {
        0.0
    };
    summary.critical_errors = report.summary.critical_issues.len() as u32;
    summary
}

fn pct_to_score(pct: f64) -> f64 {
    match pct {
        p if p >= 100.0 => 100.0,
        p if p >= 95.0 => 80.0,
        p if p >= 85.0 => 60.0,
        p if p >= 70.0 => 40.0,
        _ => 20.0,
    }
}

fn answer(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_lowercase()
}

fn graded(value: Option<&str>) -> f64 {
    match answer(value).as_str() {
        "yes" => 100.0,
        "partial" => 50.0,
        _ => 0.0,
    }
}

fn binary(value: Option<&str>) -> f64 {
    if answer(value) == "yes" {
        100.0
    } else {
        0.0
    }
}

fn contextual(value: Option<&str>) -> f64 {
    match answer(value).as_str() {
        "yes" | "na" => 100.0,
        _ => 0.0,
    }
}

fn duration_score(minutes: f64) -> f64 {
    if minutes >= 10.0 {
        100.0
    } else if minutes >= 7.0 {
        70.0
    } else {
        30.0
    }
}

/// Rate-of-speech score from doctor words per minute
///
/// Unknown or zero rate scores 50.
fn rate_of_speech_score(wpm: Option<f64>) -> f64 {
    let Some(wpm) = wpm.filter(|w| *w != 0.0) else {
        return 50.0;
    };
    if (120.0..=160.0).contains(&wpm) {
        100.0
    } else if (100.0..=119.0).contains(&wpm) || (161.0..=180.0).contains(&wpm) {
        70.0
    } else if (80.0..=99.0).contains(&wpm) || (181.0..=200.0).contains(&wpm) {
        30.0
    } else {
        0.0
    }
}

/// Category label for a total score
pub fn category_for(total: f64) -> &'static str {
    if total >= 1500.0 {
        "Good"
    } else if total >= 1400.0 {
        "Above Average"
    } else if total >= 1300.0 {
        "Average"
    } else {
        "Poor"
    }
}

/// Compute the full QC score
///
/// # Arguments
///
/// * `report` - Part-1 QA report
/// * `qc` - Resolved secondary QC report, if any
/// * `duration_sec` - Call duration in seconds, if known
/// * `doctor_wpm` - Doctor speaking rate, if known
pub fn compute_qc_score(
    report: &ReportDoc,
    qc: Option<&QcReport>,
    duration_sec: Option<f64>,
    doctor_wpm: Option<f64>,
) -> QcScoreDoc {
    let value = |name: &str| qc.and_then(|q| q.value_of(name));

    let summary = compute_ui_summary(report);
    let complete_mer_pct = if summary.total_questions > 0 {
        summary.questions_asked as f64 / summary.total_questions as f64 * 100.0
    } else {
        0.0
    };
    let correct_doc_pct = summary.overall_compliance_score;
    let duration_min = duration_sec.map(|s| s / 60.0).unwrap_or(0.0);

    let breakdown: BTreeMap<String, f64> = [
        ("greetings", binary(value("greetings"))),
        ("call_opening", graded(value("call_opening"))),
        ("language_preference", binary(value("language_preference"))),
        ("id_validation", binary(value("id_validation"))),
        ("disclaimer", binary(value("disclaimer"))),
        ("politeness", graded(value("politeness"))),
        ("empathy", contextual(value("empathy"))),
        ("communication_skills", graded(value("communication_skills"))),
        ("probing", contextual(value("probing"))),
        ("observations", contextual(value("observations"))),
        ("call_closure", graded(value("call_closure"))),
        ("complete_mer_questions", pct_to_score(complete_mer_pct)),
        ("correct_documentation", pct_to_score(correct_doc_pct)),
        ("call_duration", duration_score(duration_min)),
        ("rate_of_speech", rate_of_speech_score(doctor_wpm)),
        ("visual_presentation", 100.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let total: f64 = breakdown.values().sum();

    QcScoreDoc {
        total_score: Some(total),
        max_score: Some(MAX_SCORE),
        percentage: Some(round2(total / MAX_SCORE * 100.0)),
        category: Some(category_for(total).to_string()),
        breakdown,
        derived: QcScoreDerived {
            complete_mer_pct: Some(round2(complete_mer_pct)),
            correct_documentation_pct: Some(round2(correct_doc_pct)),
            call_duration_min: Some(round2(duration_min)),
            doctor_wpm: doctor_wpm.map(round2),
        },
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode_lenient, QaItem};
    use serde_json::json;

    fn item(qid: &str, status: &str, expected: &str) -> QaItem {
        QaItem {
            question_id: Some(qid.to_string()),
            status: Some(status.to_string()),
            expected_response: Some(expected.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_status_order() {
        assert_eq!(normalize_status(Some("Incorrect")), "incorrect");
        assert_eq!(normalize_status(Some(" Correct ")), "correct");
        assert_eq!(normalize_status(Some("Missing Question")), "missing");
        assert_eq!(normalize_status(Some("NA")), "na");
        assert_eq!(normalize_status(None), "unknown");
    }

    #[test]
    fn test_ui_summary_counts() {
        let report = ReportDoc {
            qa_matrix: vec![
                item("1.1", "Correct", "yes"),
                item("1.2", "Incorrect", "no"),
                item("1.3", "Missing", "yes"),
                item("1.4", "Paraphrased", "yes"),
                item("PP.1", "Missing", "N/A"),
            ],
            ..Default::default()
        };
        let summary = compute_ui_summary(&report);
        assert_eq!(summary.total_questions, 4);
        assert_eq!(summary.questions_asked, 3);
        assert_eq!(summary.questions_missed, 1);
        assert_eq!(summary.incorrect_responses, 1);
        assert_eq!(summary.paraphrased_responses, 1);
        assert_eq!(summary.overall_compliance_score, 25.0);
    }

    #[test]
    fn test_empty_inputs_score() {
        let score = compute_qc_score(&ReportDoc::default(), None, None, None);
        // complete_mer 20 + documentation 20 + duration 30 + speech 50 + visual 100
        assert_eq!(score.total_score, Some(220.0));
        assert_eq!(score.max_score, Some(1600.0));
        assert_eq!(score.category.as_deref(), Some("Poor"));
        assert_eq!(score.breakdown.len(), 16);
    }

    #[test]
    fn test_full_marks_call() {
        let qc = QcReport::from_document(&json!({
            "qc_parameters": {
                "greetings": {"value": "Yes"},
                "call_opening": {"value": "Yes"},
                "language_preference": {"value": "Yes"},
                "id_validation": {"value": "Yes"},
                "disclaimer": {"value": "Yes"},
                "politeness": {"value": "Yes"},
                "empathy": {"value": "NA"},
                "communication_skills": {"value": "Yes"},
                "probing": {"value": "Yes"},
                "observations": {"value": "na"},
                "call_closure": {"value": "Yes"}
            }
        }))
        .unwrap();
        let report: ReportDoc = decode_lenient(
            &json!({"qa_matrix": [{"question_id": "1", "status": "Correct"}]}),
            "report",
        );

        let score = compute_qc_score(&report, Some(&qc), Some(660.0), Some(140.0));
        assert_eq!(score.total_score, Some(1600.0));
        assert_eq!(score.percentage, Some(100.0));
        assert_eq!(score.category.as_deref(), Some("Good"));
        assert_eq!(score.derived.call_duration_min, Some(11.0));
    }

    #[test]
    fn test_partial_answers_and_bands() {
        let qc = QcReport::from_document(&json!({
            "qc_parameters": {"call_opening": {"value": "Partial"}, "empathy": {"value": "No"}}
        }))
        .unwrap();
        let score = compute_qc_score(&ReportDoc::default(), Some(&qc), Some(480.0), Some(110.0));
        assert_eq!(score.breakdown["call_opening"], 50.0);
        assert_eq!(score.breakdown["empathy"], 0.0);
        assert_eq!(score.breakdown["call_duration"], 70.0);
        assert_eq!(score.breakdown["rate_of_speech"], 70.0);
    }

    #[test]
    fn test_rate_of_speech_edges() {
        assert_eq!(rate_of_speech_score(Some(0.0)), 50.0);
        assert_eq!(rate_of_speech_score(Some(85.0)), 30.0);
        assert_eq!(rate_of_speech_score(Some(250.0)), 0.0);
        assert_eq!(rate_of_speech_score(Some(119.5)), 0.0);
    }

    #[test]
    fn test_categories() {
        assert_eq!(category_for(1500.0), "Good");
        assert_eq!(category_for(1450.0), "Above Average");
        assert_eq!(category_for(1300.0), "Average");
        assert_eq!(category_for(1299.0), "Poor");
    }
}
