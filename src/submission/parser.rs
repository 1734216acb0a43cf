use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

#[derive(Debug)]
pub struct DecodeError {
    pub message: String,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for DecodeError {
    fn from(s: String) -> Self {
        DecodeError { message: s }
    }
}

/// Decode a whole URL-encoded body: `+` becomes a space, then percent
/// escapes are resolved. This runs on the front-end before the payload
/// is relayed; the collector splits the already-decoded text.
pub fn unquote_plus(input: &str) -> String {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Parse a relayed payload into an ordered field mapping.
///
/// Fields are `&`-separated and split on the first `=` only, so a
/// value may itself contain `=`. A field with no `=` at all makes the
/// whole payload malformed and nothing is kept from it. A repeated key
/// keeps its last value.
pub fn parse_submission(payload: &str) -> Result<Map<String, Value>, DecodeError> {
    let mut fields = Map::new();

    for field in payload.split('&') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| DecodeError::from(format!("field {field:?} has no '='")))?;
        fields.insert(key.to_string(), Value::String(value.to_string()));
    }

    Ok(fields)
}
