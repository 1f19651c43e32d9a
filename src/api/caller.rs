//! Resolving who is calling: an explicit role parameter or a bearer session.

use axum::http::HeaderMap;
use serde::Deserialize;
use tracing::debug;

use crate::access::{Feature, Role};
use crate::error::AuthError;

use super::error::ApiError;
use super::state::AppState;

/// `?role=` on any gated route.
#[derive(Debug, Default, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?;
    let value = value.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim)
}

/// Raw role string for this request.
///
/// `explicit` lists request-supplied roles in precedence order; the first
/// non-empty one wins. Otherwise the bearer session's role is used. A bearer
/// token that names no live session is rejected rather than ignored.
pub async fn resolve_role(
    state: &AppState,
    headers: &HeaderMap,
    explicit: &[Option<&str>],
) -> Result<Option<String>, ApiError> {
    if let Some(role) = explicit
        .iter()
        .flatten()
        .map(|r| r.trim())
        .find(|r| !r.is_empty())
    {
        return Ok(Some(role.to_string()));
    }

    let Some(token) = extract_bearer(headers) else {
        return Ok(None);
    };
    let session = state
        .sessions
        .lookup(token)
        .await
        .ok_or(AuthError::InvalidSession)?;
    debug!(username = %session.username, role = %session.role, "Role taken from session");
    Ok(Some(session.role.as_str().to_string()))
}

/// Resolve the caller's role and run it through the access gate.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    explicit: &[Option<&str>],
    feature: Feature,
) -> Result<Role, ApiError> {
    let role = resolve_role(state, headers, explicit).await?;
    Ok(state.gate.authorize(role.as_deref(), feature)?)
}

/// Resolve the caller's role without a feature check.
pub async fn identify(
    state: &AppState,
    headers: &HeaderMap,
    explicit: &[Option<&str>],
) -> Result<Role, ApiError> {
    let role = resolve_role(state, headers, explicit).await?;
    Ok(state.gate.identify(role.as_deref())?)
}
