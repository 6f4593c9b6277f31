use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation timed out after {0:?}")]
    NavigationTimeout(Duration),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("script fetch failed: {0}")]
    Fetch(String),

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("chromium error: {0}")]
    Chromium(String),

    #[error("browser context already closed")]
    ContextClosed,
}

impl BrowserError {
    /// Whether this error is the per-navigation timeout bound firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NavigationTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert_eq!(
            err.to_string(),
            "navigation failed: net::ERR_NAME_NOT_RESOLVED"
        );
    }

    #[test]
    fn test_timeout_classification() {
        assert!(BrowserError::NavigationTimeout(Duration::from_secs(30)).is_timeout());
        assert!(!BrowserError::Fetch("connection reset".to_string()).is_timeout());
    }
}
