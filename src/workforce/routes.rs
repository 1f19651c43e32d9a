//! REST endpoints for the workforce catalogs.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::access::Feature;
use crate::api::caller::{RoleQuery, authorize};
use crate::api::{ApiError, AppState};

/// GET /time-off
async fn time_off(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::TimeOff).await?;
    Ok(Json(json!({
        "success": true,
        "time_off": state.catalog.workforce.time_off,
        "role": role,
    })))
}

/// GET /time-tracking
async fn time_tracking(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::TimeTracking).await?;
    Ok(Json(json!({
        "success": true,
        "time_tracking": state.catalog.workforce.time_tracking,
        "role": role,
    })))
}

/// GET /groups
async fn groups(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Groups).await?;
    Ok(Json(json!({
        "success": true,
        "groups": state.catalog.workforce.groups,
        "role": role,
    })))
}

/// GET /entities
async fn entities(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Entities).await?;
    let entities = &state.catalog.workforce.entities;
    Ok(Json(json!({
        "success": true,
        "entities": entities,
        "role": role,
        "total_count": entities.len(),
    })))
}

pub fn workforce_routes() -> Router<AppState> {
    Router::new()
        .route("/time-off", get(time_off))
        .route("/time-tracking", get(time_tracking))
        .route("/groups", get(groups))
        .route("/entities", get(entities))
}
