//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::TextCompletion;
use crate::core::converter::CodeConverter;
use crate::core::errors::RequestError;
use crate::core::models::{ConversionRequest, Language};

/// Application state
pub struct AppState<C> {
    converter: CodeConverter<C>,
}

impl<C> AppState<C> {
    /// Wrap a converter for sharing between handlers
    pub fn new(converter: CodeConverter<C>) -> Self {
        Self { converter }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: String,
    /// Package name
    pub service: String,
    /// Package version
    pub version: String,
}

/// Languages list response
#[derive(Serialize)]
pub struct LanguagesResponse {
    /// Supported languages in display order
    pub data: Vec<LanguageInfo>,
}

/// One entry of the languages list
#[derive(Serialize)]
pub struct LanguageInfo {
    /// Identifier accepted by `/v1/convert`
    pub value: String,
    /// Display name
    pub label: String,
}

/// Conversion request body.
///
/// Languages stay as strings here so unknown names get the same error
/// shape as the other validation failures.
#[derive(Deserialize)]
pub struct ConvertRequest {
    /// Code to convert
    pub source_code: String,
    /// Language of `source_code`
    pub source_language: String,
    /// Language to convert into
    pub target_language: String,
}

/// Conversion response body
#[derive(Serialize)]
pub struct ConvertResponse {
    /// Sanitized model output
    pub converted_code: String,
    /// Language converted from
    pub source_language: Language,
    /// Language converted into
    pub target_language: Language,
    /// Unix timestamp of the response
    pub created: i64,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error body
    pub error: ErrorDetail,
}

/// Error message and machine-readable code
#[derive(Serialize)]
pub struct ErrorDetail {
    /// Human readable message
    pub message: String,
    /// Stable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: String, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail {
                message,
                code: Some(code.to_string()),
            },
        }),
    )
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Supported languages handler
async fn get_languages() -> Json<LanguagesResponse> {
    let data = Language::ALL
        .iter()
        .map(|lang| LanguageInfo {
            value: lang.value().to_string(),
            label: lang.label().to_string(),
        })
        .collect();

    Json(LanguagesResponse { data })
}

fn invalid_request(message: String) -> ApiError {
    warn!("Rejected conversion request: {}", message);
    api_error(StatusCode::BAD_REQUEST, message, "invalid_request")
}

/// Parse and validate a request body
fn parse_request(payload: ConvertRequest) -> Result<ConversionRequest, RequestError> {
    let source_language = payload.source_language.parse::<Language>()?;
    let target_language = payload.target_language.parse::<Language>()?;
    let request = ConversionRequest::new(payload.source_code, source_language, target_language);
    request.validate()?;
    Ok(request)
}

/// Conversion handler
async fn convert<C: TextCompletion>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| invalid_request(e.body_text()))?;
    let request = parse_request(payload).map_err(|e| invalid_request(e.to_string()))?;

    match state.converter.convert_request(&request).await {
        Ok(converted_code) => Ok(Json(ConvertResponse {
            converted_code,
            source_language: request.source_language,
            target_language: request.target_language,
            created: chrono::Utc::now().timestamp(),
        })),
        Err(e) => Err(api_error(StatusCode::BAD_GATEWAY, e.to_string(), "conversion_failed")),
    }
}

/// Build the router around a converter
pub fn router<C: TextCompletion + 'static>(converter: CodeConverter<C>) -> Router {
    let state = Arc::new(AppState::new(converter));

    Router::new()
        .route("/", get(health_check))
        .route("/v1/languages", get(get_languages))
        .route("/v1/convert", post(convert::<C>))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server<C: TextCompletion + 'static>(
    converter: CodeConverter<C>,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    let app = router(converter);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
