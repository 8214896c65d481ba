use crate::business_service::BusinessService;
use crate::errors::{AppError, ResultExt};
use crate::models::Business;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

const NO_MATCHING_BUSINESS: &str = "No matching business.";

/// Shared application state injected into handlers.
pub struct AppState {
    /// Business lookup and COLIN enrichment.
    pub business_service: BusinessService,
}

/// Business routes, without rate limiting or other middleware.
pub fn business_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/business/:identifier", get(get_business))
        .route("/v1/business/:identifier/details", get(get_business_details))
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "business-ar-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /v1/business/:identifier
///
/// Returns the stored business record.
pub async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Business>, AppError> {
    tracing::info!("GET /v1/business/{}", identifier);

    let business = find_business(&state, &identifier).await?;
    Ok(Json(business))
}

/// GET /v1/business/:identifier/details
///
/// Looks up the stored business, then fetches its COLIN details using the
/// stored legal type. The response carries `business.nextARYear`.
pub async fn get_business_details(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("GET /v1/business/{}/details", identifier);

    let business = find_business(&state, &identifier).await?;
    let details = state
        .business_service
        .get_business_details_from_colin(&business.identifier, &business.legal_type)
        .await
        .context(format!("Fetching COLIN details for {}", business.identifier))?;

    Ok(Json(details))
}

async fn find_business(state: &AppState, identifier: &str) -> Result<Business, AppError> {
    let business = state
        .business_service
        .find_by_business_identifier(identifier)
        .await?;
    require_business(business)
}

fn require_business(business: Option<Business>) -> Result<Business, AppError> {
    business.ok_or_else(|| AppError::NotFound(NO_MATCHING_BUSINESS.to_string()))
}
