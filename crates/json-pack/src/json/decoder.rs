//! JSON text decoder into the wire value model.

use serde_json::Value;

use super::error::JsonError;

/// Decodes JSON text into [`Value`]s.
#[derive(Debug, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a UTF-8 JSON document.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, JsonError> {
        let text = std::str::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8)?;
        self.decode_str(text)
    }

    pub fn decode_str(&self, text: &str) -> Result<Value, JsonError> {
        Ok(serde_json::from_str(text)?)
    }
}
