//! Activity report generation - turns a [`ReportPayload`] into PDF bytes.
//!
//! - `models` - the payload and its sections
//! - `attendance` - participant list parsing
//! - `images` - downscaling of oversized uploads
//! - `pdf` - flowables, layout and PDF output
//! - `builder` - payload to story, the report generator

pub mod attendance;
pub mod builder;
pub mod images;
pub mod models;
pub mod pdf;
pub mod traits;

pub use builder::{build_story, ActivityReportGenerator};
pub use models::{FieldTable, ReportPayload};
pub use traits::Generator;

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to write PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Result of a successful report generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}
