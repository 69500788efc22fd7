//! Saving generated archives to disk

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AppError, Result};

/// Destination for a downloaded payload.
///
/// One attempt per call; failures are returned, never retried.
pub trait FileSaver {
    fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf>;
}

/// Writes payloads into a fixed directory
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf> {
        // The filename must stay inside the output directory.
        let name = Path::new(filename);
        if name.file_name().map(|n| n != name.as_os_str()).unwrap_or(true) {
            return Err(AppError::save(
                filename,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "filename must not contain path separators",
                ),
            ));
        }

        let path = self.dir.join(name);
        fs::write(&path, payload).map_err(|e| AppError::save(filename, e))?;
        info!("Saved {} bytes to {}", payload.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        let payload = vec![0u8, 1, 2, 255];
        let path = saver.save(&payload, "demo-game-engine.zip").unwrap();
        assert_eq!(path, dir.path().join("demo-game-engine.zip"));
        assert_eq!(fs::read(path).unwrap(), payload);
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        let err = saver.save(b"x", "../escape-game-engine.zip").unwrap_err();
        assert!(matches!(err, AppError::Save { .. }));
    }

    #[test]
    fn test_missing_directory_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path().join("does-not-exist"));
        let err = saver.save(b"x", "demo-game-engine.zip").unwrap_err();
        assert!(matches!(err, AppError::Save { .. }));
    }
}
