//! HTTP error envelope and the mapping from domain errors to status codes.
//!
//! Every failure leaves the service as
//! `{ "success": false, "error": <message>, "code": <code> }`.
//! Persistence details are logged server-side and replaced with a generic
//! message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::{
    AccessError, AuthError, OnboardingError, ResourceError, StoreError, UploadError,
};

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

/// An HTTP status paired with an error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                success: false,
                error: message.into(),
                code,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// Log the store failure and return a generic 500.
    pub fn internal(message: &str, err: &StoreError) -> Self {
        tracing::error!(error = %err, "{message}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        let message = err.to_string();
        match err {
            AccessError::MissingParameter { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "missing_parameter", message)
            }
            AccessError::UnknownRole { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, "unknown_role", message)
            }
            AccessError::AccessDenied { .. } => {
                Self::new(StatusCode::FORBIDDEN, "access_denied", message)
            }
        }
    }
}

impl From<OnboardingError> for ApiError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::Persistence(ref e) => Self::internal("Failed to save changes", e),
            other => Self::not_found(other.to_string()),
        }
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        let message = err.to_string();
        match err {
            ResourceError::NotFound { .. } => Self::not_found(message),
            ResourceError::Forbidden { .. } => {
                Self::new(StatusCode::FORBIDDEN, "access_denied", message)
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Persistence(ref e) => Self::internal("Failed to save file metadata", e),
            UploadError::TooLarge { .. } | UploadError::BodyTooLarge => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                err.to_string(),
            ),
            UploadError::NotFound { .. } => Self::not_found("File not found"),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::MissingCredentials => Self::bad_request(message),
            AuthError::InvalidCredentials | AuthError::InvalidSession => {
                Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Feature;

    #[test]
    fn access_errors_keep_distinct_statuses() {
        let missing: ApiError = AccessError::MissingParameter {
            name: "role".into(),
        }
        .into();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.body.code, "missing_parameter");
        assert!(!missing.body.success);

        let unknown: ApiError = AccessError::UnknownRole { role: "ceo".into() }.into();
        assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

        let denied: ApiError = AccessError::AccessDenied {
            role: "intern".into(),
            feature: Feature::Uploads,
        }
        .into();
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
        assert_eq!(denied.body.code, "access_denied");
    }

    #[test]
    fn onboarding_errors_map_to_404_and_500() {
        let staff: ApiError = OnboardingError::StaffNotFound {
            staff_id: "S999".into(),
        }
        .into();
        assert_eq!(staff.status, StatusCode::NOT_FOUND);

        let persist: ApiError =
            OnboardingError::Persistence(StoreError::Query("disk full".into())).into();
        assert_eq!(persist.status, StatusCode::INTERNAL_SERVER_ERROR);
        // Internal detail stays out of the response body.
        assert!(!persist.body.error.contains("disk full"));
    }

    #[test]
    fn upload_errors_map_to_expected_statuses() {
        let missing: ApiError = UploadError::MissingTitle.into();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);

        let big: ApiError = UploadError::TooLarge { size: 20, max: 10 }.into();
        assert_eq!(big.status, StatusCode::PAYLOAD_TOO_LARGE);

        let gone: ApiError = UploadError::NotFound { id: "x".into() }.into();
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_400_and_401() {
        let missing: ApiError = AuthError::MissingCredentials.into();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        let bad: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    }
}
