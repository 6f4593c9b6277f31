//! Shared types for per-target outcomes and the aggregated scan report.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Normalize a target URL, prepending `https://` when no scheme is present.
///
/// URLs that already carry a scheme are passed through unchanged.
#[must_use]
pub fn ensure_scheme(url: &str) -> String {
    if Url::parse(url).is_ok() {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Diagnostic detail captured while analyzing one target.
///
/// `status`, `headers` and `script_urls` are only populated when the caller
/// requested verbose output. `errors` is always recorded regardless of
/// verbosity so failures stay visible in the report's status column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DebugInfo {
    /// HTTP status of the initial navigation, when observed
    pub status: Option<u16>,
    /// Response headers of the initial navigation
    pub headers: BTreeMap<String, String>,
    /// Script URLs whose text was successfully fetched and analyzed
    pub script_urls: Vec<String>,
    /// Human-readable failure descriptions, one per failure event
    pub errors: Vec<String>,
}

/// The record produced for one input URL.
///
/// Exactly one outcome exists per input URL, even on total failure.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    /// The normalized (scheme-qualified) target URL
    pub url: String,
    /// Provider names whose signatures matched
    pub detected_providers: BTreeSet<String>,
    /// Diagnostic detail, populated according to verbosity
    pub debug: DebugInfo,
}

impl TargetOutcome {
    /// Create an empty outcome for a normalized URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detected_providers: BTreeSet::new(),
            debug: DebugInfo::default(),
        }
    }

    /// Whether the target was analyzed without any recorded failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.debug.errors.is_empty()
    }

    /// Append a failure description to the outcome.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.debug.errors.push(message.into());
    }
}

/// The aggregated result of one scan run.
///
/// Outcomes are kept in input order, one per input URL. Duplicate input
/// URLs are processed independently and each keeps its own outcome, so
/// `len()` always equals the number of input URLs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Per-target outcomes in input order
    pub outcomes: Vec<TargetOutcome>,
}

impl ScanReport {
    /// Number of outcomes in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the report holds no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over the outcomes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter()
    }
}
