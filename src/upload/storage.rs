use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use sanitize_filename::sanitize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write upload {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Upload slot group; each maps to its own subfolder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Speaker,
    Photos,
    Attendance,
    Attachments,
    Feedback,
}

impl UploadKind {
    pub fn subfolder(&self) -> &'static str {
        match self {
            Self::Speaker => "speaker",
            Self::Photos => "photos",
            Self::Attendance => "attendance",
            Self::Attachments => "attachments",
            Self::Feedback => "feedback",
        }
    }
}

#[async_trait]
pub trait UploadStore {
    /// Persist an uploaded file. `Ok(None)` means the filename sanitized to
    /// nothing and the upload was ignored.
    async fn save(
        &self,
        kind: UploadKind,
        original_filename: &str,
        data: &[u8],
    ) -> Result<Option<PathBuf>, UploadError>;
}

/// Make a client supplied filename safe to use on disk.
pub fn secure_filename(original: &str) -> String {
    let cleaned = sanitize(original);
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .trim_start_matches('.')
        .to_string()
}

/// Stores uploads beneath a local directory as `{subfolder}/{millis}_{name}`.
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn destination(&self, kind: UploadKind, filename: &str) -> (PathBuf, PathBuf) {
        let ts = chrono::Utc::now().timestamp_millis();
        let dir = self.root.join(kind.subfolder());
        let path = dir.join(format!("{}_{}", ts, filename));
        (dir, path)
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn save(
        &self,
        kind: UploadKind,
        original_filename: &str,
        data: &[u8],
    ) -> Result<Option<PathBuf>, UploadError> {
        let filename = secure_filename(original_filename);
        if filename.is_empty() {
            debug!("Ignoring upload with unusable filename {:?}", original_filename);
            return Ok(None);
        }

        let (dir, path) = self.destination(kind, &filename);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        info!("Saved {} byte upload to {}", data.len(), path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("my photo.png"), "my_photo.png");
        assert_eq!(secure_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(secure_filename("   "), "");
        assert_eq!(secure_filename(".hidden.png"), "hidden.png");
    }

    #[test]
    fn test_subfolders() {
        assert_eq!(UploadKind::Speaker.subfolder(), "speaker");
        assert_eq!(UploadKind::Feedback.subfolder(), "feedback");
    }

    #[tokio::test]
    async fn test_local_store_writes_into_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path());

        let path = store
            .save(UploadKind::Photos, "group shot.jpg", b"jpeg bytes")
            .await
            .unwrap()
            .expect("file should be stored");

        assert!(path.starts_with(dir.path().join("photos")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("_group_shot.jpg"));
        let (prefix, _) = name.split_once('_').unwrap();
        assert!(prefix.parse::<i64>().is_ok());
        assert_eq!(std::fs::read(&path).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_local_store_ignores_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(dir.path());

        let saved = store.save(UploadKind::Attachments, "", b"x").await;
        assert!(saved.unwrap().is_none());
    }
}
