use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded submission plus the capture timestamp, as persisted to
/// the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub doc: Value,
}

impl Record {
    /// Stamp a decoded submission with the current capture time. The
    /// `date` field is always assigned here; a value arriving on the
    /// wire under that key is overwritten, never trusted.
    pub fn stamped(mut fields: Map<String, Value>) -> Self {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        fields.insert("date".to_string(), Value::String(date));
        Record {
            doc: Value::Object(fields),
        }
    }

    /// Field accessor for string values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(|v| v.as_str())
    }
}
