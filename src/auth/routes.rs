//! Login, logout, and session introspection.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::caller::extract_bearer;
use crate::api::{ApiError, AppState};
use crate::error::AuthError;

#[derive(Debug, Default, Deserialize)]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.unwrap_or_default();
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(AuthError::MissingCredentials.into());
    };
    let session = state.sessions.login(&username, &password).await?;
    Ok(Json(json!({
        "success": true,
        "role": session.role,
        "username": session.username,
        "token": session.token,
    })))
}

/// POST /logout
///
/// Succeeds whether or not the token named a live session.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = extract_bearer(&headers) {
        state.sessions.logout(token).await;
    }
    Json(json!({ "success": true }))
}

/// GET /me
async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let session = match extract_bearer(&headers) {
        Some(token) => state.sessions.lookup(token).await,
        None => None,
    };
    match session {
        Some(session) => Json(json!({
            "success": true,
            "authenticated": true,
            "role": session.role,
            "username": session.username,
        })),
        None => Json(json!({
            "success": true,
            "authenticated": false,
            "role": null,
        })),
    }
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
