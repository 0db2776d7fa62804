use thiserror::Error;

/// Returned by the paragraph aggregators when there is nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot aggregate an empty set of sentence scores")]
pub struct EmptyInputError;

/// Failure of a single `/predict` request.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Neither `text` nor `paragraph` was supplied.
    #[error("No text or paragraph provided")]
    MissingInput,

    /// `paragraph` was supplied but is empty after trimming.
    #[error("No paragraph provided")]
    EmptyParagraph,

    /// The body is not a JSON object, or a field has the wrong type.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),

    /// The underlying model failed. Never converted into a payload.
    #[error("inference failed: {0}")]
    Inference(#[from] anyhow::Error),
}

impl PredictError {
    /// Client errors are answered with an `{"error": ...}` payload and status 200.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictError::MissingInput | PredictError::EmptyParagraph | PredictError::MalformedBody(_)
        )
    }
}

/// Invalid service configuration, detected at start-up.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
