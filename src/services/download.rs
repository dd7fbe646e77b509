//! Download service — fetch the selected image's bytes and save them locally.
//!
//! DESIGN
//! ======
//! Two steps through two collaborators: `ByteFetcher` retrieves the payload,
//! `Persist` writes it under the suggested filename. Downloads are
//! independent; two clicks start two fetches and produce two files.
//!
//! ERROR HANDLING
//! ==============
//! Failures surface as `DownloadError` to the session, which logs them. The
//! inspector state is never touched by a download outcome.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::source::ByteFetcher;
use crate::source::types::NetworkError;
use crate::state::inspector::DownloadRequest;

/// Highest numeric suffix tried before giving up on a free filename.
const MAX_NAME_SUFFIX: u32 = 999;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not prepare {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("no free filename for {0}")]
    NameExhausted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

// =============================================================================
// PERSIST
// =============================================================================

/// Local save boundary.
#[async_trait::async_trait]
pub trait Persist: Send + Sync {
    /// Save `bytes` under `filename` (or a close variant) and return the path.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the file cannot be written.
    async fn persist(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, PersistError>;
}

/// Saves into one directory. Existing files are never overwritten: a taken
/// name gets a ` (1)`, ` (2)`, ... suffix before the extension.
pub struct DirPersist {
    dir: PathBuf,
}

impl DirPersist {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait::async_trait]
impl Persist for DirPersist {
    async fn persist(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, PersistError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PersistError::CreateDir { path: self.dir.clone(), source })?;

        for attempt in 0..=MAX_NAME_SUFFIX {
            let path = self.dir.join(candidate_name(filename, attempt));
            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let mut file = match file {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(PersistError::Write { path, source }),
            };

            if let Err(source) = write_all(&mut file, bytes).await {
                return Err(PersistError::Write { path, source });
            }
            return Ok(path);
        }

        Err(PersistError::NameExhausted(filename.to_string()))
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// `name.ext` for attempt 0, then `name (n).ext`.
fn candidate_name(filename: &str, attempt: u32) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    let path = Path::new(filename);
    match (path.file_stem().and_then(|s| s.to_str()), path.extension().and_then(|s| s.to_str())) {
        (Some(stem), Some(ext)) => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{filename} ({attempt})"),
    }
}

// =============================================================================
// DOWNLOAD
// =============================================================================

/// Fetch the bytes behind `request.source_url` and persist them.
///
/// # Errors
///
/// Returns a [`DownloadError`] if either the fetch or the save fails.
pub async fn run_download(
    fetcher: &dyn ByteFetcher,
    persist: &dyn Persist,
    job: Uuid,
    request: &DownloadRequest,
) -> Result<PathBuf, DownloadError> {
    info!(%job, url = %request.source_url, "download: fetching");
    let bytes = fetcher.fetch_bytes(&request.source_url).await?;
    let path = persist.persist(&bytes, &request.filename).await?;
    info!(%job, path = %path.display(), bytes = bytes.len(), "download: saved");
    Ok(path)
}

#[cfg(test)]
#[path = "download_test.rs"]
mod tests;
