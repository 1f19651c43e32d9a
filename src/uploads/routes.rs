//! REST endpoints for uploading documents and browsing the archive.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde_json::{Value, json};

use crate::access::{Feature, Role};
use crate::api::caller::{RoleQuery, authorize};
use crate::api::{ApiError, AppState};
use crate::error::UploadError;

use super::model::{FilePart, MAX_UPLOAD_BYTES, UploadForm, UploadRecord};

/// Room for the other form fields and multipart framing, so a file just
/// over the limit is reported as too large rather than as a broken body.
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

fn multipart_error(err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::BodyTooLarge
    } else {
        UploadError::Multipart(err.body_text())
    }
}

/// Count the file part's bytes without keeping them.
async fn measure(mut field: Field<'_>) -> Result<usize, UploadError> {
    let mut size = 0;
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size += chunk.len();
    }
    Ok(size)
}

/// Read the form, authorizing the caller before any file bytes are read.
///
/// The role is settled when the first file part starts, or at the end of
/// the form when there is none: an `uploaded_by` field seen so far, then
/// `?role=`, then the bearer session. A rejected caller never has its file
/// streamed, so role errors come before any size error.
async fn read_form(
    state: &AppState,
    headers: &HeaderMap,
    query: &RoleQuery,
    mut multipart: Multipart,
) -> Result<(Role, UploadForm), ApiError> {
    let mut form = UploadForm::default();
    let mut role = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if role.is_none() {
                    role = Some(authorize_uploader(state, headers, query, &form).await?);
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let size = measure(field).await?;
                form.file = Some(FilePart { filename, size });
            }
            "uploaded_by" | "title" | "category" => {
                let value = field.text().await.map_err(multipart_error)?;
                match name.as_str() {
                    "uploaded_by" => form.uploaded_by = Some(value),
                    "title" => form.title = Some(value),
                    _ => form.category = Some(value),
                }
            }
            // Unknown parts are drained and ignored.
            _ => {
                measure(field).await?;
            }
        }
    }
    let role = match role {
        Some(role) => role,
        None => authorize_uploader(state, headers, query, &form).await?,
    };
    Ok((role, form))
}

async fn authorize_uploader(
    state: &AppState,
    headers: &HeaderMap,
    query: &RoleQuery,
    form: &UploadForm,
) -> Result<Role, ApiError> {
    authorize(
        state,
        headers,
        &[form.uploaded_by.as_deref(), query.role.as_deref()],
        Feature::Uploads,
    )
    .await
}

/// POST /upload
///
/// Multipart fields: `uploaded_by` (role), `file`, `title`, `category`.
async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (role, form) = read_form(&state, &headers, &query, multipart).await?;

    let upload = form.validate()?;
    let record = UploadRecord::new(upload, role, &state.upload_dir, Local::now().naive_local());
    let record = state.uploads.append(record).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "File uploaded successfully",
            "file_info": record.receipt(),
        })),
    ))
}

/// GET /files
async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &[query.role.as_deref()], Feature::Resources).await?;
    let files: Vec<_> = state
        .uploads
        .list()
        .iter()
        .map(UploadRecord::summary)
        .collect();
    Ok(Json(json!({
        "success": true,
        "files": files,
        "total_count": files.len(),
    })))
}

/// GET /files/download/{file_id}
///
/// Returns metadata and the download path; no bytes are streamed.
async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Query(query): Query<RoleQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers, &[query.role.as_deref()], Feature::Resources).await?;
    let record = state.uploads.get(&file_id)?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Download started: {}", record.title),
        "file_info": record.download_info(),
        "download_url": format!("/files/download/{file_id}"),
    })))
}

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
        .route("/files", get(list_files))
        .route("/files/download/{file_id}", get(download_file))
}
