//! Media file reader backed by `std::fs`

use bridge_traits::{
    error::{BridgeError, Result},
    storage::MediaFileReader,
};
use bytes::Bytes;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Largest file the reader loads by default (256 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 256 * 1024 * 1024;

/// Filesystem implementation of [`MediaFileReader`].
///
/// Still images are decoded from a single in-memory buffer, so the reader
/// refuses files larger than a configurable limit instead of exhausting
/// memory on a mislabelled video.
pub struct FsMediaFileReader {
    max_file_bytes: u64,
}

impl FsMediaFileReader {
    /// Create a reader with the default size limit
    pub fn new() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    /// Create a reader with a custom size limit
    pub fn with_max_file_bytes(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }
}

impl Default for FsMediaFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaFileReader for FsMediaFileReader {
    fn read_all(&self, path: &Path) -> Result<Bytes> {
        let metadata = fs::metadata(path)?;

        if metadata.is_dir() {
            return Err(BridgeError::OperationFailed(format!(
                "{} is a directory",
                path.display()
            )));
        }

        if metadata.len() > self.max_file_bytes {
            return Err(BridgeError::OperationFailed(format!(
                "{} is {} bytes, limit is {}",
                path.display(),
                metadata.len(),
                self.max_file_bytes
            )));
        }

        let data = fs::read(path)?;
        debug!(path = ?path, bytes = data.len(), "Read media file");
        Ok(Bytes::from(data))
    }
}
