//! Startup error types.
//!
//! Both error families here are fatal before any scanning starts: the
//! process prints one diagnostic and exits. Per-target failures during a
//! scan are never represented as errors; they are recorded inside the
//! target's outcome instead (see [`crate::types::DebugInfo`]).

use thiserror::Error;

/// Errors raised while loading the signature catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Catalog file could not be read
    #[error("failed to read signature catalog {path}: {source}")]
    Unreadable {
        /// Path to the catalog file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a valid TOML mapping of provider to patterns
    #[error("failed to parse signature catalog {path}: {source}")]
    Malformed {
        /// Path to the catalog file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// A provider was declared with no patterns
    #[error("provider {provider:?} has an empty pattern list")]
    EmptyPatterns {
        /// Offending provider name
        provider: String,
    },

    /// A pattern failed to compile as a regular expression
    #[error("invalid pattern {pattern:?} for provider {provider:?}: {source}")]
    InvalidPattern {
        /// Provider the pattern belongs to
        provider: String,
        /// The raw pattern string
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Catalog parsed but contains no providers at all
    #[error("signature catalog {path} contains no providers")]
    Empty {
        /// Path to the catalog file
        path: String,
    },
}

/// Errors in the user-supplied target list.
#[derive(Error, Debug)]
pub enum InputError {
    /// Neither a URL nor an input file was given
    #[error("no targets provided; pass a URL (-u) or an input file (-i)")]
    NoTargets,

    /// The URL list file could not be read
    #[error("failed to read URL list {path}: {source}")]
    UnreadableFile {
        /// Path to the list file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The URL list file contained no usable URLs
    #[error("URL list {path} contains no URLs")]
    EmptyList {
        /// Path to the list file
        path: String,
    },
}
