//! Extension allow-lists for uploaded files.

pub const ALLOWED_IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const ALLOWED_EXCEL_EXTS: &[&str] = &["xlsx"];

/// Lowercased text after the last `.`, if the filename has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// True when `filename` carries an extension from `allowed`.
pub fn allowed_file(filename: &str, allowed: &[&str]) -> bool {
    match file_extension(filename) {
        Some(ext) => allowed.contains(&ext.as_str()),
        None => false,
    }
}
