//! Signature catalog loading from a TOML document.
//!
//! The catalog file is a flat TOML mapping of provider name to a non-empty
//! array of case-insensitive regular expression strings:
//!
//! ```toml
//! "Duo Security" = ["duosecurity\\.com", "duo-mfa"]
//! Okta = ["oktacdn\\.com", "okta-signin-widget"]
//! ```
//!
//! Patterns are compiled here, exactly once, so a malformed pattern is a
//! load-time `ConfigError` rather than a per-match concern.

use crate::Result;
use mfaprint_core::ConfigError;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// One provider and its compiled signature patterns.
///
/// Patterns keep their declared order; the analyzer tries them in that
/// order and stops at the first match.
#[derive(Debug, Clone)]
pub struct ProviderSignature {
    name: String,
    patterns: Vec<Regex>,
}

impl ProviderSignature {
    /// Provider name, unique within the catalog.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled patterns in declaration order.
    #[must_use]
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }
}

/// Immutable catalog of provider signatures.
///
/// Loaded once at process start and shared read-only by every session;
/// it is never mutated afterwards, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    providers: Vec<ProviderSignature>,
}

impl SignatureCatalog {
    /// Load and compile a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_toml_str(&raw, &path.display().to_string())?;

        info!(
            providers = catalog.len(),
            path = %path.display(),
            "loaded signature catalog"
        );

        Ok(catalog)
    }

    /// Parse and compile a catalog from a TOML string.
    ///
    /// `origin` names the source in error messages (a path, or "inline").
    pub fn from_toml_str(raw: &str, origin: &str) -> Result<Self> {
        let entries: BTreeMap<String, Vec<String>> =
            toml::from_str(raw).map_err(|source| ConfigError::Malformed {
                path: origin.to_string(),
                source,
            })?;

        if entries.is_empty() {
            return Err(ConfigError::Empty {
                path: origin.to_string(),
            });
        }

        let mut providers = Vec::with_capacity(entries.len());
        for (name, patterns) in entries {
            providers.push(Self::compile_provider(name, &patterns)?);
        }

        Ok(Self { providers })
    }

    fn compile_provider(name: String, patterns: &[String]) -> Result<ProviderSignature> {
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatterns { provider: name });
        }

        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    provider: name.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
            compiled.push(regex);
        }

        Ok(ProviderSignature {
            name,
            patterns: compiled,
        })
    }

    /// Iterate over the providers in the catalog.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderSignature> {
        self.providers.iter()
    }

    /// Number of providers in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the catalog holds no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
