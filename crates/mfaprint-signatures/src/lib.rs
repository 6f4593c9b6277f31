//! Signature catalog and content analysis for MFA provider detection.
//!
//! This crate owns the mapping from provider name to signature patterns and
//! the pure matching logic that decides which providers a blob of rendered
//! content or a resource URL points at.
//!
//! # Architecture
//!
//! - **Catalog** ([`catalog`]): TOML-backed, compiled once at startup,
//!   immutable for the process lifetime
//! - **Analyzer** ([`analyzer`]): pure, side-effect-free pattern matching
//!
//! # Example
//!
//! ```rust
//! use mfaprint_signatures::{analyze, SignatureCatalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = SignatureCatalog::from_toml_str(
//!     r#"Duo = ["duosecurity\\.com", "duo-mfa"]"#,
//!     "inline",
//! )?;
//!
//! let detected = analyze(&catalog, "loads DuoSecurity.com/widget", "https://example.com");
//! assert!(detected.contains("Duo"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod analyzer;
pub mod catalog;

// Re-export commonly used types
pub use analyzer::analyze;
pub use catalog::{ProviderSignature, SignatureCatalog};

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, mfaprint_core::ConfigError>;
