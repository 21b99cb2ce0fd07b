//! # Larder Core
//!
//! Data model and editing machinery for the larder recipe editor.
//!
//! - [`staged`]: a sequence with a committed and a working copy
//! - [`record`]: ingredient and recipe rows
//! - [`form`]: per-table edit forms built on staged sequences
//! - [`store`]: JSON / YAML persistence
//! - [`warnings`]: duplicate-id detection

pub mod dataset;
pub mod form;
pub mod record;
pub mod staged;
pub mod store;
pub mod warnings;

pub use dataset::Dataset;
pub use staged::{StagedError, StagedResult, StagedSequence};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
