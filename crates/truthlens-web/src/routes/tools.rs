//! Tool route handlers.
//!
//! Each request runs through its own orchestrator, so concurrent requests
//! never share submission state.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use truthlens_core::{AnalysisRequest, AnalysisResult, ImagePayload, InputError, Outcome, ToolKind};

use crate::error::ApiError;
use crate::render::markdown_to_html;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    pub input: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
    pub model: Option<String>,
}

/// A displayed result plus its markdown rendered to HTML.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub html: String,
}

pub async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(
        ToolKind::ALL
            .iter()
            .map(|tool| ToolInfo {
                name: tool.as_str(),
                title: tool.title(),
                caption: tool.caption(),
                input: tool.input_kind().as_str(),
            })
            .collect(),
    )
}

pub async fn analyze_article(
    State(state): State<AppState>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(req) = body?;
    submit(&state, AnalysisRequest::article(req.text), req.model).await
}

pub async fn check_source(
    State(state): State<AppState>,
    body: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(req) = body?;
    submit(&state, AnalysisRequest::source(req.url), req.model).await
}

pub async fn detect_bias(
    State(state): State<AppState>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(req) = body?;
    submit(&state, AnalysisRequest::bias(req.text), req.model).await
}

/// Multipart upload: an `image` file part and an optional `model` part.
pub async fn verify_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut image = None;
    let mut model = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let data = field.bytes().await?;
                debug!(len = data.len(), "Received image upload");
                image = Some(data);
            }
            "model" => {
                let value = field.text().await?;
                model = Some(value);
            }
            _ => {}
        }
    }

    let image = image.ok_or(InputError::Empty(ToolKind::ImageAuthenticity))?;
    let payload = ImagePayload::from_bytes(image)?;
    submit(&state, AnalysisRequest::image(payload), model).await
}

async fn submit(
    state: &AppState,
    request: AnalysisRequest,
    model: Option<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let request = match model {
        Some(model) => request.with_model(model),
        None => request,
    };
    let mut orchestrator = state.orchestrator(request.tool());

    match orchestrator.submit(request).await {
        Outcome::Displayed { result } => {
            let html = markdown_to_html(result.markdown());
            Ok(Json(AnalysisResponse { result, html }))
        }
        Outcome::Failed(failure) => Err(failure.into()),
    }
}
