//! Browser rendering engine for target page analysis.
//!
//! Exposes the capability interface the scanner consumes (navigation with a
//! bounded wait, rendered document text, script enumeration, in-page script
//! fetch) and a chromiumoxide-backed implementation of it.

pub mod chromium;
pub mod engine;
pub mod error;

pub use chromium::ChromiumEngine;
pub use engine::{NavigationMetadata, PageContext, RenderingEngine};
pub use error::{BrowserError, Result};
