//! HTTP surface: a single `POST /predict` endpoint.
//!
//! Client mistakes (missing fields, empty paragraph, malformed JSON, bodies
//! over [`MAX_BODY_BYTES`]) are answered with `{"error": "..."}` and status
//! 200. Inference failures are logged and answered with status 500.

pub mod request;

pub use request::PredictRequest;

use crate::core::PredictError;
use crate::pipelines::affect_pipeline::{AffectPipeline, ParagraphPrediction, Scorer, TextPrediction};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Largest request body read before answering with an error payload.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body of every `/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Text(TextPrediction),
    Paragraph(ParagraphPrediction),
    Error { error: String },
}

/// Parse `body` and run the matching prediction.
pub fn handle_request<S: Scorer>(
    pipeline: &AffectPipeline<S>,
    body: &[u8],
) -> Result<PredictResponse, PredictError> {
    match PredictRequest::from_body(body)? {
        PredictRequest::Text(text) => {
            debug!(bytes = text.len(), "text prediction");
            pipeline.predict_text(&text).map(PredictResponse::Text)
        }
        PredictRequest::Paragraph(paragraph) => {
            debug!(bytes = paragraph.len(), "paragraph prediction");
            pipeline
                .predict_paragraph(&paragraph)
                .map(PredictResponse::Paragraph)
        }
    }
}

/// Failure that is not reported as a payload.
#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("prediction failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}

impl From<PredictError> for ServerError {
    fn from(err: PredictError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

async fn predict<S>(
    State(pipeline): State<Arc<AffectPipeline<S>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictResponse>, ServerError>
where
    S: Scorer + Send + Sync + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return Ok(error_payload(PredictError::MalformedBody(
                rejection.body_text(),
            )))
        }
    };

    let outcome = tokio::task::spawn_blocking(move || handle_request(&pipeline, &body))
        .await
        .map_err(|e| ServerError(anyhow::anyhow!("prediction task aborted: {e}")))?;

    match outcome {
        Ok(response) => Ok(Json(response)),
        Err(err) if err.is_client_error() => Ok(error_payload(err)),
        Err(err) => Err(err.into()),
    }
}

fn error_payload(err: PredictError) -> Json<PredictResponse> {
    debug!(%err, "rejected request");
    Json(PredictResponse::Error {
        error: err.to_string(),
    })
}

pub fn create_router<S>(pipeline: AffectPipeline<S>) -> Router
where
    S: Scorer + Send + Sync + 'static,
{
    Router::new()
        .route("/predict", post(predict::<S>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(Arc::new(pipeline))
}

/// Bind `addr` and serve the router until the process is stopped.
pub async fn serve<S>(addr: SocketAddr, pipeline: AffectPipeline<S>) -> anyhow::Result<()>
where
    S: Scorer + Send + Sync + 'static,
{
    let router = create_router(pipeline);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind listener to {}: {}", addr, e);
        anyhow::anyhow!("Failed to bind listener to {}: {}", addr, e)
    })?;

    info!("listening on http://{}/predict", addr);

    axum::serve(listener, router).await.map_err(|e| {
        error!("server error: {}", e);
        anyhow::anyhow!("server error: {}", e)
    })
}
