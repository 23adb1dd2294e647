//! Upload handling: extension checks and on-disk persistence.

pub mod storage;
pub mod validation;

pub use storage::{secure_filename, LocalUploadStore, UploadError, UploadKind, UploadStore};
pub use validation::{allowed_file, ALLOWED_EXCEL_EXTS, ALLOWED_IMAGE_EXTS};
