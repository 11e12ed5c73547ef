use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub extracted_info: Option<serde_json::Value>,
}

impl ExtractResponse {
    /// The answer as display text. Strings pass through; other JSON values keep their
    /// JSON rendering. `None` when the field is missing or null.
    pub fn into_text(self) -> Option<String> {
        match self.extracted_info? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}
