//! # Core Configuration Module
//!
//! Provides the capability wiring for the playback core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the bridge implementations the player depends on. It
//! enforces fail-fast validation so a missing capability surfaces when the
//! host starts up rather than when the first file is opened.
//!
//! ## Required Dependencies
//!
//! - `MediaBackend` - Demuxer, decoder and converter factory
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `MediaFileReader` - Whole-file reads for still images (desktop default: `std::fs`)
//!
//! When the `desktop-shims` feature is enabled, the desktop `MediaFileReader`
//! is injected automatically if none is provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .media_backend(Arc::new(MyFfmpegBackend::new()))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! The builder returns [`Error::CapabilityMissing`] with an actionable message
//! when a required bridge was not provided:
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let err = CoreConfig::builder().build().unwrap_err();
//! assert!(err.to_string().contains("MediaBackend"));
//! ```

use crate::error::{Error, Result};
use bridge_traits::{MediaBackend, MediaFileReader};
use std::sync::Arc;

/// Capability configuration for the playback core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Factory for demuxers, decoders and converters (required)
    pub media_backend: Arc<dyn MediaBackend>,

    /// Whole-file reader used by the still-image path
    pub file_reader: Arc<dyn MediaFileReader>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("media_backend", &"MediaBackend { ... }")
            .field("file_reader", &"MediaFileReader { ... }")
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

fn media_backend_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "MediaBackend".to_string(),
        message: "A MediaBackend implementation is required to open media resources. \
                 Inject the host's demux/decode binding (e.g. an FFmpeg adapter) with \
                 .media_backend()."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn file_reader_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "MediaFileReader".to_string(),
        message: "MediaFileReader implementation is required to decode still images. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default FsMediaFileReader. \
                 Mobile/Web: inject a reader backed by the platform's document APIs."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_file_reader() -> Result<Arc<dyn MediaFileReader>> {
    use bridge_desktop::FsMediaFileReader;

    let reader: Arc<dyn MediaFileReader> = Arc::new(FsMediaFileReader::new());
    Ok(reader)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_file_reader() -> Result<Arc<dyn MediaFileReader>> {
    Err(file_reader_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Call [`build()`](CoreConfigBuilder::build) once every required capability
/// has been set.
#[derive(Default)]
pub struct CoreConfigBuilder {
    media_backend: Option<Arc<dyn MediaBackend>>,
    file_reader: Option<Arc<dyn MediaFileReader>>,
}

impl CoreConfigBuilder {
    /// Sets the media backend (required).
    pub fn media_backend(mut self, backend: Arc<dyn MediaBackend>) -> Self {
        self.media_backend = Some(backend);
        self
    }

    /// Sets the file reader used for still images.
    ///
    /// If not provided, the desktop default is used when the `desktop-shims`
    /// feature is enabled.
    pub fn file_reader(mut self, reader: Arc<dyn MediaFileReader>) -> Self {
        self.file_reader = Some(reader);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when the media backend is missing,
    /// or when no file reader was given and no platform default exists.
    pub fn build(self) -> Result<CoreConfig> {
        let media_backend = self.media_backend.ok_or_else(media_backend_missing_error)?;

        let file_reader = match self.file_reader {
            Some(reader) => reader,
            None => provide_default_file_reader()?,
        };

        Ok(CoreConfig {
            media_backend,
            file_reader,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::{
        BridgeError, ConversionSpec, Decoder, Demuxer, FrameConverter, StreamDescriptor,
    };
    use bytes::Bytes;
    use std::path::Path;

    struct MockBackend;

    impl MediaBackend for MockBackend {
        fn open_input(&self, url: &str) -> bridge_traits::error::Result<Box<dyn Demuxer>> {
            Err(BridgeError::OperationFailed(format!("cannot open {}", url)))
        }

        fn open_decoder(
            &self,
            stream: &StreamDescriptor,
        ) -> bridge_traits::error::Result<Box<dyn Decoder>> {
            Err(BridgeError::CodecNotFound(stream.codec_id.clone()))
        }

        fn create_converter(
            &self,
            _spec: ConversionSpec,
        ) -> bridge_traits::error::Result<Box<dyn FrameConverter>> {
            Err(BridgeError::NotAvailable("converter".to_string()))
        }
    }

    struct MockFileReader;

    impl MediaFileReader for MockFileReader {
        fn read_all(&self, _path: &Path) -> bridge_traits::error::Result<Bytes> {
            Ok(Bytes::from_static(b"raw"))
        }
    }

    #[test]
    fn test_builder_requires_media_backend() {
        let result = CoreConfig::builder()
            .file_reader(Arc::new(MockFileReader))
            .build();

        let err = result.unwrap_err();
        assert!(matches!(err, Error::CapabilityMissing { .. }));
        assert!(err.to_string().contains("MediaBackend"));
    }

    #[test]
    fn test_builder_with_all_capabilities() {
        let config = CoreConfig::builder()
            .media_backend(Arc::new(MockBackend))
            .file_reader(Arc::new(MockFileReader))
            .build()
            .unwrap();

        let bytes = config.file_reader.read_all(Path::new("still.png")).unwrap();
        assert_eq!(bytes.as_ref(), b"raw");
        assert!(config.media_backend.open_input("missing.mkv").is_err());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_file_reader_without_shims() {
        let err = CoreConfig::builder()
            .media_backend(Arc::new(MockBackend))
            .build()
            .unwrap_err();

        let err_msg = err.to_string();
        assert!(err_msg.contains("MediaFileReader"));
        assert!(err_msg.contains("still images"));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_builder_uses_desktop_file_reader() {
        let config = CoreConfig::builder()
            .media_backend(Arc::new(MockBackend))
            .build()
            .unwrap();

        assert!(config
            .file_reader
            .read_all(Path::new("/definitely/not/here.png"))
            .is_err());
    }

    #[test]
    fn test_config_debug_hides_bridges() {
        let config = CoreConfig::builder()
            .media_backend(Arc::new(MockBackend))
            .file_reader(Arc::new(MockFileReader))
            .build()
            .unwrap();

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("MediaBackend { ... }"));
        let cloned = config.clone();
        assert!(Arc::ptr_eq(&cloned.media_backend, &config.media_backend));
    }
}
