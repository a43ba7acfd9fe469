//! File access abstraction used by the still-image fast path.

use bytes::Bytes;
use std::path::Path;

use crate::{error::Result, platform::PlatformSendSync};

/// Whole-file reader.
///
/// Still images are decoded from the raw file contents rather than through
/// the demuxer, so the core needs a way to load a file into memory. Desktop
/// hosts read from the filesystem; sandboxed hosts may route through their
/// own document APIs.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::MediaFileReader;
///
/// fn image_size(reader: &dyn MediaFileReader, path: &Path) -> Result<usize> {
///     Ok(reader.read_all(path)?.len())
/// }
/// ```
pub trait MediaFileReader: PlatformSendSync {
    /// Read the entire file into memory.
    fn read_all(&self, path: &Path) -> Result<Bytes>;
}
