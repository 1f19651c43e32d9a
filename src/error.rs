//! Error types for MuvHR.

use crate::access::Feature;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backing store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection {kind} has never been saved")]
    MissingCollection { kind: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Outcomes of the access gate other than "granted".
///
/// The three variants stay distinct all the way to the HTTP layer:
/// missing maps to 400, unknown to 401, denied to 403.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("{name} parameter is required")]
    MissingParameter { name: String },

    #[error("Invalid role: {role}")]
    UnknownRole { role: String },

    #[error("Access denied - role {role} lacks {feature} permission")]
    AccessDenied { role: String, feature: Feature },
}

/// Onboarding task store errors.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Staff member {staff_id} not found")]
    StaffNotFound { staff_id: String },

    #[error("Task {task_id} not found for staff member {staff_id}")]
    TaskNotFound { staff_id: String, task_id: u32 },

    #[error("Failed to save changes: {0}")]
    Persistence(#[from] StoreError),
}

impl OnboardingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StaffNotFound { .. } | Self::TaskNotFound { .. })
    }
}

/// Per-file access errors for the resource library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("File not found: {filename}")]
    NotFound { filename: String },

    #[error("Access denied - insufficient permissions for {filename}")]
    Forbidden { filename: String },
}

/// Upload validation and persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Title is required")]
    MissingTitle,

    #[error("Category is required")]
    MissingCategory,

    #[error("File type not allowed: {extension}")]
    DisallowedType { extension: String },

    #[error("File is too large: {size} bytes exceeds {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Request body exceeds the upload limit")]
    BodyTooLarge,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Upload record {id} not found")]
    NotFound { id: String },

    #[error("Failed to save file metadata: {0}")]
    Persistence(#[from] StoreError),
}

/// Session/login errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Username and password required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired session")]
    InvalidSession,
}
