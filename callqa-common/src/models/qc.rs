//! Part-2 documents: secondary QC report and QC score

use super::documents::{lenient_f64, lenient_string};
use super::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field whose presence marks a QC report as complete
pub const QC_PARAMETERS_FIELD: &str = "qc_parameters";

/// Rubric order used when listing QC parameters
pub const QC_PARAMETER_ORDER: &[&str] = &[
    "greetings",
    "call_opening",
    "language_preference",
    "id_validation",
    "disclaimer",
    "politeness",
    "empathy",
    "communication_skills",
    "probing",
    "observations",
    "call_closure",
];

/// Secondary QC report with its parameters present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub qc_parameters: BTreeMap<String, QcParameter>,
}

impl QcReport {
    /// Extract a complete QC report from a fetched document
    ///
    /// Returns `None` when the document is not an object, when
    /// `qc_parameters` is missing or null, or when it is not an object.
    /// An explicitly empty `qc_parameters` object counts as complete.
    pub fn from_document(document: &Value) -> Option<Self> {
        let params = document
            .as_object()?
            .get(QC_PARAMETERS_FIELD)?
            .as_object()?;
        let qc_parameters = params
            .iter()
            .map(|(name, value)| (name.clone(), QcParameter::from_value(value)))
            .collect();
        Some(Self { qc_parameters })
    }

    pub fn parameter(&self, name: &str) -> Option<&QcParameter> {
        self.qc_parameters.get(name)
    }

    /// Parameter value (`Yes`, `No`, `Partial`, `NA`) by name
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.parameter(name).and_then(|p| p.value.as_deref())
    }

    /// Parameters in rubric order, followed by any others alphabetically
    pub fn ordered(&self) -> Vec<(&str, &QcParameter)> {
        let mut out: Vec<(&str, &QcParameter)> = QC_PARAMETER_ORDER
            .iter()
            .filter_map(|name| self.qc_parameters.get_key_value(*name))
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        out.extend(
            self.qc_parameters
                .iter()
                .filter(|(k, _)| !QC_PARAMETER_ORDER.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v)),
        );
        out
    }
}

/// One rubric item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcParameter {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub explanation: Option<String>,
    /// Accepts both `timestamps` and the singular `timestamp` key
    #[serde(default, alias = "timestamp")]
    pub timestamps: Timestamps,
}

impl QcParameter {
    /// Decode one parameter; a bare string is taken as the value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self {
                value: Some(s.clone()),
                ..Default::default()
            },
            other => Self::deserialize(other).unwrap_or_default(),
        }
    }
}

/// Timestamp with an optional label (`self_intro`, `good_examples`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledTimestamp {
    pub label: Option<String>,
    pub time: String,
}

/// Normalised timestamps of a QC parameter
///
/// The analyser emits a single string, a list of strings, or a table of
/// named timestamps whose values are strings or lists. All shapes flatten
/// to an ordered list; empty strings and non-string entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timestamps(pub Vec<LabeledTimestamp>);

impl Timestamps {
    pub fn from_value(value: &Value) -> Self {
        let mut out = Vec::new();
        match value {
            Value::String(_) | Value::Array(_) => push_times(&mut out, None, value),
            Value::Object(map) => {
                for (label, inner) in map {
                    push_times(&mut out, Some(label), inner);
                }
            }
            _ => {}
        }
        Self(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledTimestamp> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn push_times(out: &mut Vec<LabeledTimestamp>, label: Option<&String>, value: &Value) {
    match value {
        Value::String(s) if !s.trim().is_empty() => out.push(LabeledTimestamp {
            label: label.cloned(),
            time: s.trim().to_string(),
        }),
        Value::Array(items) => {
            for item in items {
                if let Value::String(_) = item {
                    push_times(out, label, item);
                }
            }
        }
        _ => {}
    }
}

impl<'de> Deserialize<'de> for Timestamps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

// ========================================
// QC score (GET /api/qcscore)
// ========================================

/// Weighted QC score for one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcScoreDoc {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
    /// Good, Above Average, Average, Poor
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breakdown: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub derived: QcScoreDerived,
}

/// Inputs the score was derived from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcScoreDerived {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub complete_mer_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub correct_documentation_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub call_duration_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub doctor_wpm: Option<f64>,
}
