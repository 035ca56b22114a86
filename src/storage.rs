use crate::error::SegmentError;
use std::fs;
use std::path::{Path, PathBuf};

const INPUT_FILE: &str = "received.png";
const SYMBOLS_DIR: &str = "symbols";

/// Per-request storage root.
///
/// Each request owns a unique directory under the configured data dir,
/// holding the received image and its segmented symbol tiles. The directory
/// is kept after the request so downstream consumers can pick up the tiles.
pub struct RequestStorage {
    root: PathBuf,
}

impl RequestStorage {
    /// Create a fresh uniquely-named directory under `data_dir`,
    /// creating `data_dir` itself if absent.
    pub fn create(data_dir: &Path) -> Result<Self, SegmentError> {
        fs::create_dir_all(data_dir).map_err(|e| {
            SegmentError::Storage(format!("failed to create {}: {}", data_dir.display(), e))
        })?;

        let root = tempfile::Builder::new()
            .prefix("request-")
            .tempdir_in(data_dir)
            .map_err(|e| {
                SegmentError::Storage(format!(
                    "failed to create request dir in {}: {}",
                    data_dir.display(),
                    e
                ))
            })?
            .keep();

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the decoded request image is written.
    pub fn input_path(&self) -> PathBuf {
        self.root.join(INPUT_FILE)
    }

    /// Where the segmentation routine writes symbol tiles.
    pub fn symbols_dir(&self) -> PathBuf {
        self.root.join(SYMBOLS_DIR)
    }

    /// Persist the decoded image bytes as this request's input file.
    pub fn write_input(&self, bytes: &[u8]) -> Result<PathBuf, SegmentError> {
        let path = self.input_path();
        fs::write(&path, bytes).map_err(|e| {
            SegmentError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_request_gets_a_unique_root() {
        let data_dir = tempfile::tempdir().unwrap();

        let a = RequestStorage::create(data_dir.path()).unwrap();
        let b = RequestStorage::create(data_dir.path()).unwrap();

        assert_ne!(a.root(), b.root());
        assert!(a.root().starts_with(data_dir.path()));
        assert!(b.root().starts_with(data_dir.path()));
    }

    #[test]
    fn test_write_input_round_trips() {
        let data_dir = tempfile::tempdir().unwrap();
        let storage = RequestStorage::create(data_dir.path()).unwrap();

        let path = storage.write_input(b"png bytes").unwrap();

        assert_eq!(path, storage.input_path());
        assert_eq!(fs::read(&path).unwrap(), b"png bytes");
    }

    #[test]
    fn test_root_survives_storage_drop() {
        let data_dir = tempfile::tempdir().unwrap();
        let root = {
            let storage = RequestStorage::create(data_dir.path()).unwrap();
            storage.write_input(b"bytes").unwrap();
            storage.root().to_path_buf()
        };

        assert!(root.exists());
        assert!(root.join(INPUT_FILE).exists());
    }
}
