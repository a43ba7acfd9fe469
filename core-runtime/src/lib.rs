//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the playback core:
//! - Logging and tracing infrastructure
//! - Capability configuration
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the player depends on. It
//! establishes the logging conventions and the fail-fast capability wiring
//! used throughout the workspace.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
