//! HTTP handlers for REST API endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use lepriorite::{PriorityScorer, ScoreResult};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{panic_response, ApiError, ApiResult};
use crate::requests::AnalyzeRequest;
use crate::responses::{HealthResponse, ServiceInfoResponse};

/// State shared across all handlers
///
/// The scorer is stateless, so handlers share it without locking.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Priority scorer
    pub scorer: Arc<PriorityScorer>,

    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new AppState instance with scorer and configuration
    pub fn new(scorer: PriorityScorer, config: ServerConfig) -> Self {
        Self {
            scorer: Arc::new(scorer),
            config: Arc::new(config),
        }
    }
}

/// POST /analyze - Suggest a priority for a task
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ScoreResult>> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Unreadable analyze body: {}", rejection);
            return Err(ApiError::analysis_failed(rejection.body_text()));
        }
    };

    let input = AnalyzeRequest::from_json(&body).map_err(|e| {
        warn!("Analyze request rejected: {}", e);
        e
    })?;

    let result = state.scorer.score(&input);
    info!(
        "Analyzed '{}': {} ({})",
        input.title, result.suggested_priority, result.confidence
    );
    Ok(Json(result))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET / - Service description
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse::current())
}

/// Create router with all API endpoints
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
}

/// Build the CORS layer for the configured origins
///
/// Origins that are not valid header values are skipped.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Router with state and middleware applied
pub fn build_app(state: AppState) -> Router {
    apply_layers(create_router(), state)
}

/// Attach state, panic recovery, CORS and request tracing to `router`
///
/// A panicking handler becomes a 500 `Analysis failed: ...` response.
pub fn apply_layers(router: Router<AppState>, state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let app = router
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(&config));

    if config.enable_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}
