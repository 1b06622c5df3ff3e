//! Thin HTTP transport over plan generation and place resolution.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tripflow_agents::{
    GeminiClient, GeminiConfig, GenerationError, GenerativeBackend, PlanError, TripPlanner,
};
use tripflow_core::{PlanRequest, ResolvedPlace, ValidationError};
use tripflow_observability::{AppMetrics, MetricsSnapshot};
use tripflow_places::{GooglePlacesClient, PlaceResolver, PlaceSearch, PlacesConfig};

pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 6 * 60 * 60;
pub const MAX_NAMES_PER_BATCH: usize = 100;

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub generation: bool,
    pub place_search: bool,
}

pub struct ApiState<G, S> {
    pub planner: Arc<TripPlanner<G>>,
    pub resolver: Arc<PlaceResolver<S>>,
    pub metrics: Arc<AppMetrics>,
    pub capabilities: Capabilities,
    pub allowed_origins: Arc<Vec<String>>,
}

impl<G, S> Clone for ApiState<G, S> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
            resolver: Arc::clone(&self.resolver),
            metrics: Arc::clone(&self.metrics),
            capabilities: self.capabilities,
            allowed_origins: Arc::clone(&self.allowed_origins),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    metrics: MetricsSnapshot,
    capabilities: Capabilities,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolvePlacesRequest {
    names: Vec<String>,
    #[serde(default)]
    destination: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResolvePlacesResponse {
    destination: String,
    results: BTreeMap<String, ResolvedPlace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceDetailsRequest {
    #[serde(alias = "name")]
    place_name: String,
    #[serde(default)]
    destination: Option<String>,
}

/// Production wiring: Gemini for generation, Google Places for resolution,
/// everything configured from the environment.
pub async fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();
    let cache_ttl = chrono::Duration::seconds(
        env::var("TRIPFLOW_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
    );

    let gemini =
        GeminiClient::new(GeminiConfig::from_env()).context("failed to build Gemini client")?;
    let places = GooglePlacesClient::new(PlacesConfig::from_env())
        .context("failed to build Google Places client")?;

    let capabilities = Capabilities {
        generation: gemini.is_configured(),
        place_search: places.is_configured(),
    };
    info!(
        generation = capabilities.generation,
        place_search = capabilities.place_search,
        model = %gemini.model(),
        cache_ttl_seconds = cache_ttl.num_seconds(),
        "tripflow backends configured"
    );

    let state = ApiState {
        planner: Arc::new(TripPlanner::new(gemini, metrics.clone())),
        resolver: Arc::new(PlaceResolver::new(places, cache_ttl, metrics.clone())),
        metrics,
        capabilities,
        allowed_origins: Arc::new(parse_allowed_origins()),
    };

    Ok(build_router(state))
}

pub fn build_router<G, S>(state: ApiState<G, S>) -> Router
where
    G: GenerativeBackend + 'static,
    S: PlaceSearch + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::<G, S>))
        .route("/api/generate-plan", post(generate_plan::<G, S>))
        .route("/api/resolve-places", post(resolve_places::<G, S>))
        .route("/api/place-details", post(place_details::<G, S>))
        .route("/api/get-place-details", post(place_details::<G, S>))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "TripFlow API is running" }))
}

async fn health<G, S>(State(state): State<ApiState<G, S>>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: state.capabilities,
    };
    (StatusCode::OK, Json(payload))
}

async fn generate_plan<G, S>(
    State(state): State<ApiState<G, S>>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Response
where
    G: GenerativeBackend,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(error) = request.validate() {
        return validation_response(&error);
    }

    match state.planner.generate_plan(&request).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => plan_error_response(&error),
    }
}

async fn resolve_places<G, S>(
    State(state): State<ApiState<G, S>>,
    payload: Result<Json<ResolvePlacesRequest>, JsonRejection>,
) -> Response
where
    S: PlaceSearch,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(error) = validate_names(&request.names) {
        return validation_response(&error);
    }

    let destination = request
        .destination
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let results = state
        .resolver
        .resolve_batch(&request.names, &destination)
        .await
        .into_iter()
        .collect::<BTreeMap<_, _>>();

    (
        StatusCode::OK,
        Json(ResolvePlacesResponse {
            destination,
            results,
        }),
    )
        .into_response()
}

async fn place_details<G, S>(
    State(state): State<ApiState<G, S>>,
    payload: Result<Json<PlaceDetailsRequest>, JsonRejection>,
) -> Response
where
    S: PlaceSearch,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };
    let place_name = request.place_name.trim().to_string();
    if place_name.is_empty() {
        return validation_response(&ValidationError::Missing { field: "placeName" });
    }

    let destination = request.destination.as_deref().map(str::trim).unwrap_or_default();
    let resolved = state
        .resolver
        .resolve_batch(&[place_name], destination)
        .await
        .into_iter()
        .next()
        .map(|(_, resolved)| resolved)
        .unwrap_or_else(ResolvedPlace::not_found);

    (StatusCode::OK, Json(resolved)).into_response()
}

fn validate_names(names: &[String]) -> Result<(), ValidationError> {
    if names.is_empty() || names.len() > MAX_NAMES_PER_BATCH {
        return Err(ValidationError::OutOfRange {
            field: "names",
            reason: format!("expected 1..={MAX_NAMES_PER_BATCH} names, got {}", names.len()),
        });
    }
    if let Some(idx) = names.iter().position(|name| name.trim().is_empty()) {
        return Err(ValidationError::OutOfRange {
            field: "names",
            reason: format!("name at index {idx} is blank"),
        });
    }
    Ok(())
}

fn error_response(status: StatusCode, error: &str, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

fn validation_response(error: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, "invalid_request", error.to_string())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
}

fn plan_error_response(error: &PlanError) -> Response {
    let (status, code) = match error {
        PlanError::Generation(GenerationError::NotConfigured(_)) => {
            (StatusCode::SERVICE_UNAVAILABLE, "generation_unavailable")
        }
        PlanError::Generation(_) => (StatusCode::BAD_GATEWAY, "generation_failed"),
        PlanError::Parse(_) => (StatusCode::BAD_GATEWAY, "plan_parse_failed"),
    };
    error_response(status, code, error.to_string())
}

fn parse_allowed_origins() -> Vec<String> {
    env::var("TRIPFLOW_ALLOWED_ORIGINS")
        .ok()
        .map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}
