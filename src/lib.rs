//! Workspace facade crate.
//!
//! Re-exports the playback core and its runtime so host applications can
//! depend on `reelcore-workspace` and enable the documented features without
//! wiring each crate individually.

pub use core_playback as playback;
pub use core_runtime as runtime;
