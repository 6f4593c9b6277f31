//! Scan orchestration across many targets.
//!
//! The orchestrator fans one session per input URL out onto the runtime,
//! waits for all of them to finish, and folds their outcomes into one
//! report. Sessions are fully independent: none waits on another, and a
//! single target's total failure never aborts the rest of the run.

use crate::progress::ScanProgress;
use crate::session::{scan_target, SessionOptions};
use futures::stream::{FuturesUnordered, StreamExt};
use mfaprint_browser::RenderingEngine;
use mfaprint_core::{ScanReport, TargetOutcome};
use mfaprint_signatures::SignatureCatalog;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Run-level behaviour knobs.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Upper bound on each target's navigation wait
    pub navigation_timeout: Duration,
    /// Capture status, headers and script URLs into every outcome
    pub verbose: bool,
    /// Cap on simultaneously running sessions; `None` fans out unbounded
    pub max_concurrent: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(30),
            verbose: false,
            max_concurrent: None,
        }
    }
}

/// Orchestrates concurrent target sessions over one shared engine.
pub struct ScanOrchestrator {
    /// Shared rendering engine; sessions acquire isolated contexts from it
    engine: Arc<dyn RenderingEngine>,
    /// Signature catalog, shared read-only by every session
    catalog: Arc<SignatureCatalog>,
    options: ScanOptions,
}

impl ScanOrchestrator {
    /// Create an orchestrator with default options.
    #[must_use]
    pub fn new(engine: Arc<dyn RenderingEngine>, catalog: Arc<SignatureCatalog>) -> Self {
        Self {
            engine,
            catalog,
            options: ScanOptions::default(),
        }
    }

    /// Replace the run options.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Scan every input URL concurrently and collect all outcomes.
    ///
    /// Every input URL yields exactly one outcome, duplicates included, in
    /// input order. `progress` is advanced once per finished session
    /// regardless of that session's result.
    pub async fn scan(&self, urls: &[String], progress: &dyn ScanProgress) -> ScanReport {
        let session_options = SessionOptions {
            navigation_timeout: self.options.navigation_timeout,
            verbose: self.options.verbose,
        };

        info!(targets = urls.len(), "starting scan");

        let mut sessions = FuturesUnordered::new();
        let mut outcomes: Vec<Option<TargetOutcome>> = urls.iter().map(|_| None).collect();

        for (index, url) in urls.iter().enumerate() {
            let session_options = &session_options;
            sessions.push(async move {
                let outcome =
                    scan_target(self.engine.as_ref(), &self.catalog, url, session_options).await;
                (index, outcome)
            });

            if let Some(cap) = self.options.max_concurrent {
                while sessions.len() >= cap.max(1) {
                    if let Some((index, outcome)) = sessions.next().await {
                        progress.advance();
                        outcomes[index] = Some(outcome);
                    }
                }
            }
        }

        while let Some((index, outcome)) = sessions.next().await {
            progress.advance();
            outcomes[index] = Some(outcome);
        }

        let report = ScanReport {
            outcomes: outcomes.into_iter().flatten().collect(),
        };

        info!(
            targets = report.len(),
            failed = report.iter().filter(|o| !o.is_success()).count(),
            "scan complete"
        );

        report
    }

    /// Shut the shared engine down. Call only after [`scan`](Self::scan)
    /// returned, when every session has already released its context.
    pub async fn shutdown(&self) -> mfaprint_browser::Result<()> {
        self.engine.close().await
    }
}
