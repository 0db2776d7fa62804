use crate::core::PredictError;
use serde_json::Value;

/// The two accepted `/predict` request shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictRequest {
    Text(String),
    Paragraph(String),
}

impl PredictRequest {
    /// Parse a raw request body.
    ///
    /// `text` is looked up before `paragraph`, so a body carrying both keys is
    /// treated as a text request.
    pub fn from_body(body: &[u8]) -> Result<Self, PredictError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(PredictError::MissingInput);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| PredictError::MalformedBody(e.to_string()))?;
        let object = value.as_object().ok_or_else(|| {
            PredictError::MalformedBody("expected a JSON object".to_string())
        })?;

        if let Some(text) = object.get("text") {
            return string_field("text", text).map(PredictRequest::Text);
        }
        if let Some(paragraph) = object.get("paragraph") {
            return string_field("paragraph", paragraph).map(PredictRequest::Paragraph);
        }

        Err(PredictError::MissingInput)
    }
}

fn string_field(name: &str, value: &Value) -> Result<String, PredictError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PredictError::MalformedBody(format!("`{name}` must be a string")))
}
