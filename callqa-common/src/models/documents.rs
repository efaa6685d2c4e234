//! Part-1 documents: call metadata, QA report and transcript

use super::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept a JSON number or a numeric string; anything else is `None`
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a JSON string or number as text; anything else is `None`
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

// ========================================
// Metadata (GET .../metadata)
// ========================================

/// Top metrics and speaker statistics for one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDoc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top: TopMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speaker: SpeakerStats,
    /// Link to the Medical Examination Report, when one was uploaded
    #[serde(default)]
    pub mer_pdf_url: Option<String>,
}

/// Headline QA metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMetrics {
    /// Accuracy percentage (0-100)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub questions_asked: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_questions: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub documentation_errors: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub critical_errors: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub questions_missed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub paraphrased_responses: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clubbed_questions: Option<f64>,
    /// Call duration as `m:ss`
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee: Option<String>,
}

/// Talk-time split and speaking rate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerStats {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub agent_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub customer_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dead_air_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub agent_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub customer_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dead_air_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub doctor_wpm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub customer_wpm: Option<f64>,
}

// ========================================
// QA report (GET .../report)
// ========================================

/// Part-1 QA report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDoc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: ReportSummary,
    #[serde(default)]
    pub personal_particulars: Option<PersonalParticulars>,
    #[serde(default)]
    pub process_compliance: Option<ProcessCompliance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qa_matrix: Vec<QaItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_issues: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee: Option<String>,
    /// Doctor speaking rate (words per minute) embedded by the analyser
    #[serde(default, deserialize_with = "lenient_f64")]
    pub doctor_wpm: Option<f64>,
}

/// Personal particulars captured during the call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalParticulars {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_proofs: Vec<IdProof>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nominee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nominee_dob: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdProof {
    /// PAN, Aadhar, Passport, DL, VoterID, OCI
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default)]
    pub present_in_mer: Option<bool>,
}

/// Mandatory process steps that are not part of the MER
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessCompliance {
    #[serde(default)]
    pub disclaimer: Option<ComplianceCheck>,
    #[serde(default)]
    pub language_preference: Option<ComplianceCheck>,
}

/// One process-compliance check
///
/// The disclaimer reports `stated`, the language preference reports `asked`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    #[serde(default)]
    pub stated: Option<bool>,
    #[serde(default)]
    pub asked: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub insurer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub selected_language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

impl ComplianceCheck {
    /// Whether the step was performed, if the report says
    pub fn performed(&self) -> Option<bool> {
        self.stated.or(self.asked)
    }

    /// Insurer name or selected language, whichever applies
    pub fn detail(&self) -> Option<&str> {
        self.insurer_name
            .as_deref()
            .or(self.selected_language.as_deref())
    }
}

/// One row of the question matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QaItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub captured_response: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub expected_response: Option<String>,
    /// Correct, Incorrect, Missing, Paraphrased, Clubbed, NA
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub suggested_correction: Option<String>,
    /// When the question was asked (`m:ss`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

// ========================================
// Transcript (GET .../transcript)
// ========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDoc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<Segment>,
}

/// One diarised transcript segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub speaker: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decode_lenient;
    use serde_json::json;

    #[test]
    fn test_metadata_with_nulls_and_strings() {
        let doc: MetadataDoc = decode_lenient(
            &json!({
                "top": {"accuracy": "87.5", "questions_asked": 12, "duration": null},
                "speaker": null
            }),
            "metadata",
        );
        assert_eq!(doc.top.accuracy, Some(87.5));
        assert_eq!(doc.top.questions_asked, Some(12.0));
        assert_eq!(doc.top.duration, None);
        assert_eq!(doc.speaker, SpeakerStats::default());
        assert_eq!(doc.mer_pdf_url, None);
    }

    #[test]
    fn test_report_null_lists() {
        let doc: ReportDoc = decode_lenient(
            &json!({"summary": {"critical_issues": null}, "qa_matrix": null}),
            "report",
        );
        assert!(doc.summary.critical_issues.is_empty());
        assert!(doc.qa_matrix.is_empty());
    }

    #[test]
    fn test_wrong_shape_degrades_to_default() {
        let doc: TranscriptDoc = decode_lenient(&json!({"segments": "nope"}), "transcript");
        assert!(doc.segments.is_empty());

        let doc: ReportDoc = decode_lenient(&json!([1, 2, 3]), "report");
        assert_eq!(doc, ReportDoc::default());
    }

    #[test]
    fn test_compliance_check_accessors() {
        let check: ComplianceCheck = serde_json::from_value(json!({
            "asked": true, "selected_language": "Hindi", "timestamp": "0:15"
        }))
        .unwrap();
        assert_eq!(check.performed(), Some(true));
        assert_eq!(check.detail(), Some("Hindi"));
    }
}
