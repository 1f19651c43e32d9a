//! Document uploads. Only metadata is recorded; file bodies are counted
//! and discarded.

pub mod log;
pub mod model;
pub mod routes;

pub use log::UploadLog;
pub use model::{
    MAX_UPLOAD_BYTES, UploadForm, UploadRecord, allowed_extension, format_file_size,
    secure_filename,
};
pub use routes::upload_routes;
