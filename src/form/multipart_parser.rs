use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Raw contents of a submitted report form.
#[derive(Debug, Clone, Default)]
pub struct ParsedReportForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl ParsedReportForm {
    /// Text value of `name`, or the empty string when it was not submitted.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn field_opt(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 in field {field}: {reason}")]
    Utf8Error { field: String, reason: String },
}

pub struct MultipartParser;

impl MultipartParser {
    pub async fn parse_report_multipart(
        mut multipart: Multipart,
    ) -> Result<ParsedReportForm, MultipartParseError> {
        let mut form = ParsedReportForm::default();

        while let Some(mut field) = multipart
            .try_next()
            .await
            .map_err(|e| MultipartParseError::FieldError(e.to_string()))?
        {
            let content_disposition = field.content_disposition().ok_or_else(|| {
                MultipartParseError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(|s| s.to_string());

            let data = read_field(&mut field).await?;

            // Repeated names keep their first value.
            match maybe_filename {
                Some(filename) => {
                    if filename.is_empty() {
                        debug!("File field '{}' left empty", name);
                        continue;
                    }
                    form.files
                        .entry(name)
                        .or_insert(UploadedFile { filename, data });
                }
                None => {
                    let value = String::from_utf8(data).map_err(|e| {
                        MultipartParseError::Utf8Error {
                            field: name.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    form.fields.entry(name).or_insert(value);
                }
            }
        }

        debug!(
            "Parsed report form: {} field(s), {} file(s)",
            form.fields.len(),
            form.files.len()
        );
        Ok(form)
    }
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, MultipartParseError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| MultipartParseError::IoError(e.to_string()))?
    {
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}
