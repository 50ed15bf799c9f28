//! HTTP surface for the admin backend.
//!
//! Locale codes accepted and returned here are host codes.

use crate::autofill::{
    auto_fill_language, AutoFillEntry, AutoFillLanguageRequest, AutoFillLanguageResponse,
};
use crate::config::Config;
use crate::error::TranslationError;
use crate::locale::{from_provider_code, to_provider_code};
use crate::provider::MachineTranslator;
use crate::types::LanguageDescriptor;
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn MachineTranslator>,
    /// Cancelled on shutdown so in-flight batches stop between texts
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Arc<Config>, translator: Arc<dyn MachineTranslator>) -> Self {
        Self {
            config,
            translator,
            shutdown: CancellationToken::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub text: String,
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateReply {
    pub translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_source_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutoFillBody {
    #[serde(flatten)]
    pub request: AutoFillLanguageRequest,
    #[serde(default)]
    pub entries: Vec<AutoFillEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutoFillReply {
    #[serde(flatten)]
    pub summary: AutoFillLanguageResponse,
    pub translations: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityReply {
    pub available: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid or missing API key".to_string(),
        }
    }
}

impl From<TranslationError> for ApiError {
    fn from(err: TranslationError) -> Self {
        let status = match err {
            TranslationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TranslationError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };
        if status != StatusCode::BAD_REQUEST {
            error!("Machine translation request failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Constant-time comparison for the shared API key
fn api_key_matches(provided: &str, expected: &str) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(expected) = state.config.api_key.as_deref() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !api_key_matches(provided, expected) {
            return ApiError::unauthorized().into_response();
        }
    }
    next.run(request).await
}

pub fn router(state: AppState) -> Router {
    let machine_translate = Router::new()
        .route("/languages", get(list_languages))
        .route("/health", get(provider_health))
        .route("/translate", post(translate))
        .route("/auto-fill", post(auto_fill))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/machine-translate", machine_translate)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_languages(
    State(state): State<AppState>,
) -> Result<Json<Vec<LanguageDescriptor>>, ApiError> {
    let languages = state.translator.supported_languages().await?;
    Ok(Json(languages))
}

async fn provider_health(State(state): State<AppState>) -> Json<AvailabilityReply> {
    Json(AvailabilityReply {
        available: state.translator.is_available().await,
    })
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateReply>, ApiError> {
    let Json(body) = payload?;
    let source = body
        .source_lang
        .as_deref()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or("auto");
    let result = state
        .translator
        .translate(
            &body.text,
            to_provider_code(source),
            to_provider_code(&body.target_lang),
        )
        .await?;

    Ok(Json(TranslateReply {
        translated_text: result.translated_text,
        detected_source_lang: result
            .detected_source_lang
            .as_deref()
            .map(|code| from_provider_code(code).to_string()),
    }))
}

async fn auto_fill(
    State(state): State<AppState>,
    payload: Result<Json<AutoFillBody>, JsonRejection>,
) -> Result<Json<AutoFillReply>, ApiError> {
    let Json(body) = payload?;
    let cancel = state.shutdown.child_token();
    let outcome = auto_fill_language(
        state.translator.as_ref(),
        &body.request,
        &body.entries,
        &state.config.default_source_lang,
        &cancel,
    )
    .await?;

    Ok(Json(AutoFillReply {
        summary: outcome.response,
        translations: outcome.filled.into_iter().collect(),
    }))
}

/// Bind and serve until Ctrl+C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
            shutdown.cancel();
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
