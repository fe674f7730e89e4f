//! API request handlers
//!
//! Info endpoints answer with the JSON `ApiResponse` envelope. Render
//! endpoints answer with the workbook itself, or with an envelope carrying
//! the error kind when rendering fails.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::delivery::{content_disposition, XLSX_MIME};
use crate::error::QuoteError;
use crate::excel::{QuotationRenderer, RenderedQuotation, TemplateSource};
use crate::layout::{TemplateLayout, BUILTIN_LAYOUTS};
use crate::parser::parse_quotation_str;
use crate::types::Quotation;

use super::server::AppState;

/// Layout used when a request names none
pub const DEFAULT_LAYOUT: &str = "simple";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }

    /// Failed request that still carries structured details
    pub fn fail(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(path: &str, method: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Quoteforge API Server".to_string(),
        version: state.version.clone(),
        description: "Fill quotation spreadsheet templates over HTTP".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint("/api/v1/layouts/:name", "GET", "Get a built-in template layout"),
            endpoint("/api/v1/render", "POST", "Render a quotation (JSON body)"),
            endpoint(
                "/api/v1/render/upload",
                "POST",
                "Render a quotation with an uploaded template (multipart)",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub layouts: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        layouts: BUILTIN_LAYOUTS.iter().map(|s| s.to_string()).collect(),
    }))
}

/// GET /api/v1/layouts/:name - A built-in layout
pub async fn layout(Path(name): Path<String>) -> Response {
    match TemplateLayout::builtin(&name) {
        Ok(layout) => Json(ApiResponse::ok(layout)).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<RenderFailure>::fail(
                RenderFailure::new(&e),
                e.to_string(),
            )),
        )
            .into_response(),
    }
}

/// Render request (JSON)
#[derive(Deserialize)]
pub struct RenderRequest {
    /// Built-in layout name
    #[serde(default)]
    pub layout: Option<String>,
    /// Template file name in the server's template directory; the server
    /// default when absent
    #[serde(default)]
    pub template_path: Option<String>,
    pub quotation: Quotation,
}

/// Error details returned when rendering fails
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct RenderFailure {
    pub kind: String,
}

impl RenderFailure {
    pub fn new(error: &QuoteError) -> Self {
        Self {
            kind: error.kind().to_string(),
        }
    }
}

/// HTTP status for a render error
pub fn status_for(error: &QuoteError) -> StatusCode {
    match error {
        QuoteError::Io(_) if error.is_not_found() => StatusCode::NOT_FOUND,
        QuoteError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        QuoteError::MalformedTemplate(_) => StatusCode::UNPROCESSABLE_ENTITY,
        QuoteError::InvalidData(_) | QuoteError::Layout(_) | QuoteError::Order(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

fn error_response(error: &QuoteError) -> Response {
    warn!(kind = error.kind(), "render failed: {}", error);
    (
        status_for(error),
        Json(ApiResponse::fail(RenderFailure::new(error), error.to_string())),
    )
        .into_response()
}

fn xlsx_response(rendered: RenderedQuotation) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&rendered.file_name),
            ),
        ],
        rendered.bytes,
    )
        .into_response()
}

/// Look up the built-in layout and render on the blocking pool
///
/// Layout files are a CLI feature; over HTTP only built-in names resolve.
async fn render_blocking(
    layout: Option<String>,
    source: TemplateSource,
    quotation: Quotation,
) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let layout = TemplateLayout::builtin(layout.as_deref().unwrap_or(DEFAULT_LAYOUT))?;
        QuotationRenderer::new(layout).render(&source, &quotation)
    })
    .await;

    match result {
        Ok(Ok(rendered)) => {
            info!(file_name = %rendered.file_name, "serving quotation");
            xlsx_response(rendered)
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<RenderFailure>::err(format!(
                "Render task failed: {}",
                e
            ))),
        )
            .into_response(),
    }
}

/// POST /api/v1/render - Render from a JSON quotation
pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Response {
    let template = match state.template_path(req.template_path.as_deref()) {
        Ok(path) => path,
        Err(e) => return error_response(&e),
    };

    render_blocking(req.layout, TemplateSource::Path(template), req.quotation).await
}

fn bad_request(message: String) -> Response {
    let error = QuoteError::Order(message);
    error_response(&error)
}

/// POST /api/v1/render/upload - Render with an uploaded template
///
/// Parts: `template` (xlsx file, optional), `quotation` (JSON or YAML text),
/// `layout` (optional built-in layout name).
pub async fn render_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut template: Option<Vec<u8>> = None;
    let mut quotation_text: Option<String> = None;
    let mut layout: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Invalid multipart body: {}", e)),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "template" => match field.bytes().await {
                Ok(bytes) if !bytes.is_empty() => template = Some(bytes.to_vec()),
                Ok(_) => {}
                Err(e) => return bad_request(format!("Failed to read template part: {}", e)),
            },
            "quotation" => match field.text().await {
                Ok(text) => quotation_text = Some(text),
                Err(e) => return bad_request(format!("Failed to read quotation part: {}", e)),
            },
            "layout" => match field.text().await {
                Ok(text) if !text.trim().is_empty() => layout = Some(text.trim().to_string()),
                Ok(_) => {}
                Err(e) => return bad_request(format!("Failed to read layout part: {}", e)),
            },
            _ => {}
        }
    }

    let Some(text) = quotation_text else {
        return bad_request("Missing 'quotation' part".to_string());
    };
    let quotation = match parse_quotation_str(&text) {
        Ok(quotation) => quotation,
        Err(e) => return error_response(&e),
    };

    let source = match template {
        Some(bytes) => TemplateSource::Bytes(bytes),
        None => TemplateSource::Path(state.default_template.clone()),
    };

    render_blocking(layout, source, quotation).await
}
