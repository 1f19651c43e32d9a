//! REST endpoints for contractor contracts.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde_json::{Value, json};

use crate::access::Feature;
use crate::api::caller::{RoleQuery, authorize};
use crate::api::{ApiError, AppState};

/// GET /contracts
async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Contracts).await?;
    let contracts = state.catalog.contracts.all();
    Ok(Json(json!({
        "success": true,
        "contracts": contracts,
        "role": role,
        "total_count": contracts.len(),
    })))
}

/// GET /contracts/expiring
///
/// Contracts expiring within 30 days of today, including ones already past.
async fn expiring_contracts(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Contracts).await?;
    let expiring = state.catalog.contracts.expiring(Local::now().date_naive());
    Ok(Json(json!({
        "success": true,
        "contracts": expiring,
        "role": role,
        "total_count": expiring.len(),
    })))
}

pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/contracts", get(list_contracts))
        .route("/contracts/expiring", get(expiring_contracts))
}
