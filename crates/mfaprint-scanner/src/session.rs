//! One target session: one browser context, one navigation, zero or more
//! script fetches.

use mfaprint_browser::{BrowserError, PageContext, RenderingEngine};
use mfaprint_core::{ensure_scheme, TargetOutcome};
use mfaprint_signatures::{analyze, SignatureCatalog};
use std::time::Duration;
use tracing::{error, warn};

/// Per-session behaviour knobs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Upper bound on the navigation wait
    pub navigation_timeout: Duration,
    /// Capture status, headers and script URLs into the outcome's debug info
    pub verbose: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(30),
            verbose: false,
        }
    }
}

/// Analyze one target URL and produce its outcome record.
///
/// Never fails: navigation timeouts, navigation errors and context
/// acquisition failures are all captured into the outcome's error list,
/// and the browser context is released on every exit path on which it was
/// actually acquired.
pub async fn scan_target(
    engine: &dyn RenderingEngine,
    catalog: &SignatureCatalog,
    raw_url: &str,
    options: &SessionOptions,
) -> TargetOutcome {
    let url = ensure_scheme(raw_url);
    let mut outcome = TargetOutcome::new(url.clone());

    // Only a successfully acquired context may be closed later.
    let mut context = match engine.new_context(true).await {
        Ok(context) => context,
        Err(e) => {
            error!(%url, error = %e, "failed to acquire browser context");
            outcome.record_error(format!("error processing {url}: {e}"));
            return outcome;
        }
    };

    if let Err(e) = analyze_page(context.as_mut(), catalog, &url, options, &mut outcome).await {
        if e.is_timeout() {
            error!(%url, "timeout while processing target");
            outcome.record_error(format!("timeout while processing {url}"));
        } else {
            error!(%url, error = %e, "error processing target");
            outcome.record_error(format!("error processing {url}: {e}"));
        }
    }

    if let Err(e) = context.close().await {
        warn!(%url, error = %e, "failed to release browser context");
    }

    outcome
}

/// Navigation, content extraction and script analysis for one target.
///
/// Returns `Err` only for navigation-level failures; individual script
/// fetch failures are contained here and recorded in the outcome without
/// aborting the remaining scripts.
async fn analyze_page(
    page: &mut dyn PageContext,
    catalog: &SignatureCatalog,
    url: &str,
    options: &SessionOptions,
    outcome: &mut TargetOutcome,
) -> Result<(), BrowserError> {
    let metadata = page.navigate(url, options.navigation_timeout).await?;

    if options.verbose {
        outcome.debug.status = metadata.status;
        outcome.debug.headers = metadata.headers;
    }

    let document = page.document_text().await?;
    outcome
        .detected_providers
        .extend(analyze(catalog, &document, url));

    for script_url in page.script_urls().await? {
        match page.fetch_text(&script_url).await {
            Ok(body) => {
                outcome
                    .detected_providers
                    .extend(analyze(catalog, &body, &script_url));
                if options.verbose {
                    outcome.debug.script_urls.push(script_url);
                }
            }
            Err(e) => {
                warn!(script = %script_url, error = %e, "error fetching script");
                outcome.record_error(format!("error fetching {script_url}: {e}"));
            }
        }
    }

    Ok(())
}
