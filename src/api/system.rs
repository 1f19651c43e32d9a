//! Liveness, health, and the per-role module listing.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::caller::{RoleQuery, identify};
use super::{ApiError, AppState};

async fn root() -> &'static str {
    "MuvHR is live"
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /modules
///
/// The dashboard modules the caller's role may open, in display order.
async fn modules(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = identify(&state, &headers, &[query.role.as_deref()]).await?;
    let modules: Vec<Value> = state
        .gate
        .features_for(role)
        .into_iter()
        .map(|feature| json!({ "id": feature, "label": feature.label() }))
        .collect();
    Ok(Json(json!({
        "success": true,
        "role": role,
        "role_label": role.label(),
        "modules": modules,
    })))
}

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/modules", get(modules))
}
