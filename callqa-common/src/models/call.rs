//! Call reference parsed from the page location

use serde::{Deserialize, Serialize};

/// Query parameter carrying the record identifier
pub const RECORD_PARAM: &str = "rid";

/// Query parameter carrying the call identifier
pub const CALL_PARAM: &str = "call";

/// Identifies which recorded call's data to display
///
/// Read once from the page query string and immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallReference {
    pub record_id: String,
    pub call_id: String,
}

impl CallReference {
    pub fn new(record_id: impl Into<String>, call_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            call_id: call_id.into(),
        }
    }

    /// Build a reference from decoded query pairs
    ///
    /// Both `rid` and `call` must be present and non-empty; the first
    /// occurrence of each wins.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record_id = None;
        let mut call_id = None;
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                RECORD_PARAM if record_id.is_none() => record_id = Some(value.to_string()),
                CALL_PARAM if call_id.is_none() => call_id = Some(value.to_string()),
                _ => {}
            }
        }
        Some(Self::new(record_id?, call_id?))
    }
}
