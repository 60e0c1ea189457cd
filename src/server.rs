// SUNAT Lookup - HTTP surface
// Axum router exposing the query endpoint; used by bin/server.rs and tests

use crate::endpoint::{handle, QueryParams, QueryResponse};
use crate::lookup::LookupService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: LookupService,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    records: usize,
    external: bool,
}

impl IntoResponse for QueryResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        records: state.service.store().len(),
        external: state.service.is_external(),
    }))
}

/// GET /api/sunat?type=ruc|name&value=... - Taxpayer lookup
///
/// Pairs are taken as a list so repeated keys reach validation
/// (first occurrence wins) instead of failing extraction.
async fn sunat_query(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> QueryResponse {
    let params = QueryParams::from_pairs(pairs);
    handle(&state.service, &params).await
}

// ============================================================================
// Router
// ============================================================================

pub fn router(service: LookupService) -> Router {
    let state = AppState { service };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/sunat", get(sunat_query))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
