//! REST endpoints for onboarding checklists.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::access::Feature;
use crate::api::caller::{RoleQuery, authorize};
use crate::api::{ApiError, AppState};

/// Body of a toggle request. `task_id` is checked by hand so a missing id
/// gets the usual error envelope instead of axum's rejection text.
#[derive(Debug, Deserialize)]
struct ToggleRequest {
    task_id: Option<u32>,
    role: Option<String>,
}

/// GET /onboarding
async fn list_onboarding(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let role = authorize(&state, &headers, &[query.role.as_deref()], Feature::Onboarding).await?;
    let staff = state.onboarding.list_staff();
    Ok(Json(json!({
        "success": true,
        "staff": staff,
        "role": role,
        "total_count": staff.len(),
    })))
}

/// POST /onboarding/{staff_id}/toggle
///
/// Role comes from the body, then the query string, then the session.
async fn toggle_task(
    State(state): State<AppState>,
    Path(staff_id): Path<String>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let request: Option<ToggleRequest> = body
        .map(|Json(value)| serde_json::from_value(value))
        .transpose()
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;
    let (task_id, body_role) = match request {
        Some(ToggleRequest { task_id, role }) => (task_id, role),
        None => (None, None),
    };

    authorize(
        &state,
        &headers,
        &[body_role.as_deref(), query.role.as_deref()],
        Feature::Onboarding,
    )
    .await?;

    let task_id = task_id.ok_or_else(|| ApiError::bad_request("task_id is required"))?;
    let completed = state.onboarding.toggle_task(&staff_id, task_id).await?;

    Ok(Json(json!({
        "success": true,
        "staff_id": staff_id,
        "task_id": task_id,
        "completed": completed,
        "message": if completed { "Task completed" } else { "Task marked incomplete" },
    })))
}

pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/onboarding", get(list_onboarding))
        .route("/onboarding/{staff_id}/toggle", post(toggle_task))
}
