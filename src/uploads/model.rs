//! Upload metadata, validation, and the archive's public views.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Role;
use crate::error::UploadError;

/// Largest accepted file, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 12] = [
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "zip", "rar",
];

/// Lower-cased extension of `filename` if it is on the allow list.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Human-readable size: "0 B", "512.0 B", "1.5 KB", "16.0 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

/// Reduce a client-supplied filename to ASCII `[A-Za-z0-9._-]`.
///
/// Path separators and whitespace become `_`; dots and underscores are
/// trimmed from both ends so the result can never be hidden or escape the
/// upload directory. May return an empty string.
pub fn secure_filename(raw: &str) -> String {
    let joined = raw
        .replace(['/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Persisted metadata for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub title: String,
    pub original_filename: String,
    pub stored_filename: String,
    pub category: String,
    pub uploaded_by: Role,
    pub upload_date: NaiveDate,
    pub upload_time: NaiveTime,
    pub file_size: String,
    pub file_type: String,
    pub file_path: String,
}

impl UploadRecord {
    /// Build the record for a validated upload received at `now`.
    pub fn new(upload: ValidUpload, uploaded_by: Role, upload_dir: &Path, now: NaiveDateTime) -> Self {
        let stored_filename = format!("{}.{}", Uuid::new_v4().simple(), upload.extension);
        let file_path = upload_dir.join(&stored_filename).display().to_string();
        let upload_time = now.time();
        Self {
            id: Uuid::new_v4().to_string(),
            title: upload.title,
            original_filename: upload.original_filename,
            stored_filename,
            category: upload.category,
            uploaded_by,
            upload_date: now.date(),
            upload_time: upload_time.with_nanosecond(0).unwrap_or(upload_time),
            file_size: format_file_size(upload.size as u64),
            file_type: upload.extension,
            file_path,
        }
    }

    /// Archive listing entry. Storage location stays private.
    pub fn summary(&self) -> UploadSummary {
        UploadSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            original_filename: self.original_filename.clone(),
            category: self.category.clone(),
            uploaded_by: self.uploaded_by,
            upload_date: self.upload_date,
            upload_time: self.upload_time,
            file_size: self.file_size.clone(),
            file_type: self.file_type.clone(),
        }
    }

    /// Confirmation returned from a successful upload.
    pub fn receipt(&self) -> UploadReceipt {
        UploadReceipt {
            id: self.id.clone(),
            title: self.title.clone(),
            filename: self.original_filename.clone(),
            category: self.category.clone(),
            uploaded_by: self.uploaded_by,
            upload_date: self.upload_date,
            file_size: self.file_size.clone(),
        }
    }

    pub fn download_info(&self) -> DownloadInfo {
        DownloadInfo {
            title: self.title.clone(),
            original_filename: self.original_filename.clone(),
            category: self.category.clone(),
            file_size: self.file_size.clone(),
            uploaded_by: self.uploaded_by,
            upload_date: self.upload_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub id: String,
    pub title: String,
    pub original_filename: String,
    pub category: String,
    pub uploaded_by: Role,
    pub upload_date: NaiveDate,
    pub upload_time: NaiveTime,
    pub file_size: String,
    pub file_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub category: String,
    pub uploaded_by: Role,
    pub upload_date: NaiveDate,
    pub file_size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadInfo {
    pub title: String,
    pub original_filename: String,
    pub category: String,
    pub file_size: String,
    pub uploaded_by: Role,
    pub upload_date: NaiveDate,
}

/// The file part of an upload form. Only the name and byte count are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub filename: String,
    pub size: usize,
}

/// Raw fields collected from a multipart upload.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub uploaded_by: Option<String>,
    pub file: Option<FilePart>,
    pub title: Option<String>,
    pub category: Option<String>,
}

/// An upload that passed every check in [`UploadForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpload {
    pub original_filename: String,
    pub extension: String,
    pub title: String,
    pub category: String,
    pub size: usize,
}

impl UploadForm {
    /// Check the form in a fixed order: file present, filename, title,
    /// category, extension, size. The role is checked by the caller first.
    pub fn validate(self) -> Result<ValidUpload, UploadError> {
        let file = self.file.ok_or(UploadError::NoFile)?;
        if file.filename.is_empty() {
            return Err(UploadError::NoFileSelected);
        }

        let title = trimmed(self.title).ok_or(UploadError::MissingTitle)?;
        let category = trimmed(self.category).ok_or(UploadError::MissingCategory)?;

        let extension =
            allowed_extension(&file.filename).ok_or_else(|| UploadError::DisallowedType {
                extension: file
                    .filename
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase())
                    .unwrap_or_default(),
            })?;

        if file.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: file.size,
                max: MAX_UPLOAD_BYTES,
            });
        }

        let mut original_filename = secure_filename(&file.filename);
        if !original_filename.contains('.') {
            original_filename = format!("upload.{extension}");
        }

        Ok(ValidUpload {
            original_filename,
            extension,
            title,
            category,
            size: file.size,
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
