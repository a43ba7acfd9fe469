//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `MediaFileReader` using `std::fs`
//!
//! Media backends are not provided here; hosts link their own demux/decode
//! binding and register it through `core_runtime::config::CoreConfig`.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::FsMediaFileReader;
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .media_backend(backend)
//!     .file_reader(Arc::new(FsMediaFileReader::new()))
//!     .build()?;
//! ```

mod filesystem;

pub use filesystem::{FsMediaFileReader, DEFAULT_MAX_FILE_BYTES};
