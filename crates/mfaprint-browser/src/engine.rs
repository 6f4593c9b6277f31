use crate::error::Result;
use std::collections::BTreeMap;
use std::time::Duration;

/// Response metadata of the initial navigation, captured best-effort.
#[derive(Debug, Clone, Default)]
pub struct NavigationMetadata {
    pub status: Option<u16>,
    pub headers: BTreeMap<String, String>,
}

/// The shared rendering engine for one scan run.
///
/// One engine instance (one browser process) serves the whole run; each
/// target session acquires its own isolated context so cookies and state
/// from one target cannot leak into another.
#[async_trait::async_trait]
pub trait RenderingEngine: Send + Sync {
    /// Acquire an isolated browser context with a fresh page.
    ///
    /// When `ignore_tls_errors` is set, certificate errors must not abort
    /// navigation; recon targets routinely present self-signed or otherwise
    /// non-standard certificates.
    async fn new_context(&self, ignore_tls_errors: bool) -> Result<Box<dyn PageContext>>;

    /// Shut the engine down. Call only after every context is released.
    async fn close(&self) -> Result<()>;
}

/// One exclusively owned browser context/page.
#[async_trait::async_trait]
pub trait PageContext: Send {
    /// Navigate to `url`, waiting for network idleness up to `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<NavigationMetadata>;

    /// The fully rendered document text.
    async fn document_text(&mut self) -> Result<String>;

    /// URLs of every script resource referenced by the rendered document.
    async fn script_urls(&mut self) -> Result<Vec<String>>;

    /// Fetch a script resource's text via the page's own fetch capability.
    async fn fetch_text(&mut self, url: &str) -> Result<String>;

    /// Release the context. Must be called on every exit path.
    async fn close(&mut self) -> Result<()>;
}
