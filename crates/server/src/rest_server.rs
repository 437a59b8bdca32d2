//! REST API server implementation using Axum
//!
//! This module provides the REST API server with OpenAPI documentation,
//! integrating the service layer from the `api` module.

use crate::api::{
    get_records, search_records, RecordsResponse, SearchParams, SearchResponse, WelcomeResponse,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use lessonsearch_core::config::{Config, SearchConfig, ServerConfig};
use lessonsearch_core::error::{Error, Result};
use lessonsearch_search::QueryTokenizer;
use lessonsearch_upstream::{HttpPageTransport, RecordAggregator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<RecordAggregator>,
    pub(crate) tokenizer: Arc<QueryTokenizer>,
    pub(crate) search: Arc<SearchConfig>,
    pub(crate) fallback_token: Option<String>,
}

/// OpenAPI documentation for the REST API
#[derive(OpenApi)]
#[openapi(
    paths(welcome_handler, records_handler, search_handler, health_handler),
    components(schemas(
        WelcomeResponse,
        RecordsResponse,
        crate::api::SubstringSearchResponse,
        crate::api::FuzzySearchResponse,
        crate::api::ScoredRecord,
    )),
    tags(
        (name = "records", description = "Aggregated lesson-learnt records"),
        (name = "search", description = "Natural language search")
    )
)]
struct ApiDoc;

/// Build the Axum router with all endpoints
pub(crate) fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        // Welcome payload
        .route("/", get(welcome_handler))
        // Record aggregation
        .route("/api/v1/records", get(records_handler))
        // Natural language search
        .route("/api/v1/search", get(search_handler))
        // Health check
        .route("/health", get(health_handler))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Configure CORS based on allowed_origins
    let cors_layer = if server_config.allowed_origins.is_empty() {
        // CORS disabled
        CorsLayer::new()
    } else if server_config.allowed_origins.contains(&"*".to_string()) {
        // Allow all origins
        CorsLayer::permissive()
    } else {
        // Allow specific origins
        let mut cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ]);

        for origin in &server_config.allowed_origins {
            if let Ok(header_value) = HeaderValue::from_str(origin) {
                cors = cors.allow_origin(header_value);
            }
        }
        cors
    };

    router
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the REST server for the given configuration until shutdown
pub(crate) async fn run_server_impl(config: Config) -> Result<()> {
    let transport = Arc::new(HttpPageTransport::new(&config.upstream)?);
    let aggregator = Arc::new(RecordAggregator::new(transport, &config.upstream));
    let tokenizer = Arc::new(QueryTokenizer::new(&config.search));

    let state = AppState {
        aggregator,
        tokenizer,
        search: Arc::new(config.search.clone()),
        fallback_token: config.upstream.api_token.clone(),
    };

    let app = build_router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("REST API server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::with_context("REST server failed", e))?;

    Ok(())
}

/// Resolves the upstream credentials for one request
///
/// Preference order: `Authorization: Bearer` header, raw `token` header,
/// then the configured fallback token.
fn request_token(headers: &HeaderMap, fallback: Option<&str>) -> std::result::Result<String, ApiError> {
    if let Some(value) = headers.get(axum::http::header::AUTHORIZATION) {
        if let Ok(text) = value.to_str() {
            if let Some(token) = text.strip_prefix("Bearer ") {
                return Ok(token.trim().to_string());
            }
        }
    }

    if let Some(value) = headers.get("token") {
        if let Ok(text) = value.to_str() {
            return Ok(text.trim().to_string());
        }
    }

    if let Some(token) = fallback {
        return Ok(token.to_string());
    }

    Err(ApiError::Unauthorized(
        "missing credentials: supply an Authorization bearer header or a token header".to_string(),
    ))
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome payload with example queries", body = WelcomeResponse)
    ),
    tag = "records"
)]
async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::payload())
}

/// GET /api/v1/records
#[utoipa::path(
    get,
    path = "/api/v1/records",
    responses(
        (status = 200, description = "The fully aggregated record collection", body = RecordsResponse),
        (status = 401, description = "Missing or rejected credentials"),
        (status = 404, description = "Upstream holds no records")
    ),
    tag = "records"
)]
async fn records_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> std::result::Result<Json<RecordsResponse>, ApiError> {
    let token = request_token(&headers, state.fallback_token.as_deref())?;

    tracing::info!("Records request");

    let response = get_records(&state.aggregator, &token).await?;
    Ok(Json(response))
}

/// GET /api/v1/search
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching records for the query"),
        (status = 400, description = "Query has no usable search terms"),
        (status = 401, description = "Missing or rejected credentials"),
        (status = 404, description = "Upstream holds no records")
    ),
    tag = "search"
)]
async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<SearchResponse>, ApiError> {
    let token = request_token(&headers, state.fallback_token.as_deref())?;

    tracing::info!("Search request: query='{}'", params.query);

    let response = search_records(
        &state.aggregator,
        &state.tokenizer,
        &state.search,
        &token,
        &params.query,
    )
    .await?;
    Ok(Json(response))
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "records"
)]
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    use serde_json::json;

    let health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "search_mode": format!("{:?}", state.search.mode),
    });

    (StatusCode::OK, Json(health_status))
}

/// Error handling for API endpoints
#[derive(Debug)]
pub(crate) enum ApiError {
    InvalidRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => {
                // Log the full error details for debugging
                tracing::error!("Internal server error: {err:?}");
                // Return a generic message to the client to avoid information disclosure
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidQuery(msg) | Error::InvalidInput(msg) => ApiError::InvalidRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::EmptyResult(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }
}
