//! Concurrent reconnaissance pipeline for MFA provider fingerprinting.
//!
//! This crate drives the scan: one [`session`] per target URL renders the
//! page, extracts its content and script resources, and matches them
//! against the signature catalog; the [`orchestrator`] fans sessions out
//! concurrently and folds every outcome into one report.
//!
//! Sessions are infallible by contract: every failure is captured into the
//! target's own outcome record, so one target's total failure can never
//! abort the scan of the others.
//!
//! # Example
//!
//! ```rust,ignore
//! use mfaprint_scanner::{NoProgress, ScanOrchestrator};
//! use std::sync::Arc;
//!
//! let orchestrator = ScanOrchestrator::new(Arc::new(engine), Arc::new(catalog));
//! let report = orchestrator.scan(&urls, &NoProgress).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod orchestrator;
pub mod progress;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use orchestrator::{ScanOptions, ScanOrchestrator};
pub use progress::{NoProgress, ScanProgress};
pub use session::{scan_target, SessionOptions};
