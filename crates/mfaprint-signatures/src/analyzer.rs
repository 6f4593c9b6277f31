//! Pure pattern matching of rendered content against the catalog.

use crate::catalog::SignatureCatalog;
use std::collections::BTreeSet;

/// Return the providers whose signatures match `text` or `source_url`.
///
/// For each provider, patterns are tried in declaration order against both
/// inputs; the first match detects the provider and the remaining patterns
/// for that provider are skipped. Matching is case-insensitive (patterns
/// are compiled that way at catalog load) and deterministic for given
/// inputs.
#[must_use]
pub fn analyze(catalog: &SignatureCatalog, text: &str, source_url: &str) -> BTreeSet<String> {
    let mut detected = BTreeSet::new();

    for provider in catalog.providers() {
        let matched = provider
            .patterns()
            .iter()
            .any(|pattern| pattern.is_match(text) || pattern.is_match(source_url));

        if matched {
            detected.insert(provider.name().to_string());
        }
    }

    detected
}
