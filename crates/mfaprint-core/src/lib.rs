//! Core types for the mfaprint reconnaissance tool.
//!
//! This crate provides the shared data model and error taxonomy that all
//! other mfaprint crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Startup error types (`ConfigError`, `InputError`)
//! - [`types`] - Per-target outcome records and the final scan report

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, InputError};
pub use types::{ensure_scheme, DebugInfo, ScanReport, TargetOutcome};
