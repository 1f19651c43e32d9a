//! REST endpoints for the resource library.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::access::Feature;
use crate::api::caller::{RoleQuery, authorize};
use crate::api::{ApiError, AppState};

/// GET /resources
///
/// Only resources whose `allowed_roles` include the caller are listed.
async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Resources).await?;
    let resources = state.catalog.resources.visible_to(role);
    Ok(Json(json!({
        "success": true,
        "resources": resources,
        "role": role,
        "total_count": resources.len(),
    })))
}

/// GET /files/{filename}
///
/// Returns file metadata; the file body is never served.
async fn file_info(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Resources).await?;
    let record = state.catalog.resources.access_file(&filename, role)?;
    Ok(Json(json!({
        "success": true,
        "message": format!("File '{filename}' access granted"),
        "file_info": record,
        "access_granted": true,
        "user_role": role,
    })))
}

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/files/{filename}", get(file_info))
}
