//! chromiumoxide-backed implementation of the rendering engine capability.
//!
//! One `ChromiumEngine` owns one headless Chromium process for the whole
//! run. Each scanner session gets its own CDP browser context
//! (`Target.createBrowserContext`) holding exactly one page, disposed when
//! the session releases it.

use crate::engine::{NavigationMetadata, PageContext, RenderingEngine};
use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::{EventResponseReceived, Response};
use chromiumoxide::cdp::browser_protocol::security::SetIgnoreCertificateErrorsParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// How long to keep draining buffered network events for the main-document
/// response after navigation settles.
const RESPONSE_DRAIN: Duration = Duration::from_millis(250);

const SCRIPT_URLS_FN: &str = "() => Array.from(document.getElementsByTagName('script')) \
     .filter((script) => script.src) \
     .map((script) => script.src)";

fn chromium_err(err: CdpError) -> BrowserError {
    BrowserError::Chromium(err.to_string())
}

/// Shared headless Chromium process implementing [`RenderingEngine`].
pub struct ChromiumEngine {
    browser: Arc<Mutex<Browser>>,
}

impl ChromiumEngine {
    /// Launch a headless browser for the run.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive CDP message dispatch until the browser goes away.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
        })
    }
}

#[async_trait::async_trait]
impl RenderingEngine for ChromiumEngine {
    async fn new_context(&self, ignore_tls_errors: bool) -> Result<Box<dyn PageContext>> {
        let browser = self.browser.lock().await;

        let context = browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(chromium_err)?;
        let context_id = context.result.browser_context_id.clone();

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(BrowserError::Chromium)?;

        let page = browser.new_page(target).await.map_err(chromium_err)?;

        if ignore_tls_errors {
            page.execute(SetIgnoreCertificateErrorsParams { ignore: true })
                .await
                .map_err(chromium_err)?;
        }

        debug!(context = ?context_id, "acquired browser context");

        Ok(Box::new(ChromiumPage {
            browser: Arc::clone(&self.browser),
            context_id,
            page: Some(page),
        }))
    }

    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(chromium_err)?;
        let _ = browser.wait().await;
        Ok(())
    }
}

/// One isolated context/page pair, exclusively owned by one session.
struct ChromiumPage {
    browser: Arc<Mutex<Browser>>,
    context_id: BrowserContextId,
    page: Option<Page>,
}

impl ChromiumPage {
    fn page(&self) -> Result<&Page> {
        self.page.as_ref().ok_or(BrowserError::ContextClosed)
    }
}

#[async_trait::async_trait]
impl PageContext for ChromiumPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<NavigationMetadata> {
        let page = self.page()?;

        let mut responses = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(chromium_err)?;

        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, CdpError>(())
        };

        match tokio::time::timeout(timeout, navigation).await {
            Err(_) => return Err(BrowserError::NavigationTimeout(timeout)),
            Ok(Err(e)) => return Err(BrowserError::Navigation(e.to_string())),
            Ok(Ok(())) => {}
        }

        // The handler buffered network events while we navigated; drain them
        // for the main-document response, falling back to the first response
        // seen when redirects changed the final URL.
        let mut main_response: Option<Response> = None;
        loop {
            match tokio::time::timeout(RESPONSE_DRAIN, responses.next()).await {
                Ok(Some(event)) => {
                    let is_document = event.response.url == url;
                    if main_response.is_none() || is_document {
                        main_response = Some(event.response.clone());
                    }
                    if is_document {
                        break;
                    }
                }
                _ => break,
            }
        }

        Ok(main_response
            .as_ref()
            .map(navigation_metadata)
            .unwrap_or_default())
    }

    async fn document_text(&mut self) -> Result<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn script_urls(&mut self) -> Result<Vec<String>> {
        self.page()?
            .evaluate_function(SCRIPT_URLS_FN)
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))?
            .into_value()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn fetch_text(&mut self, url: &str) -> Result<String> {
        let quoted =
            serde_json::to_string(url).map_err(|e| BrowserError::Fetch(e.to_string()))?;
        let fetch_fn = format!(
            "async () => {{ \
                 const response = await fetch({quoted}); \
                 if (!response.ok) {{ \
                     throw new Error('HTTP ' + response.status); \
                 }} \
                 return await response.text(); \
             }}"
        );

        self.page()?
            .evaluate_function(fetch_fn)
            .await
            .map_err(|e| BrowserError::Fetch(e.to_string()))?
            .into_value()
            .map_err(|e| BrowserError::Fetch(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!(error = %e, "failed to close page");
            }

            let browser = self.browser.lock().await;
            browser
                .execute(DisposeBrowserContextParams {
                    browser_context_id: self.context_id.clone(),
                })
                .await
                .map_err(chromium_err)?;

            debug!(context = ?self.context_id, "released browser context");
        }
        Ok(())
    }
}

fn navigation_metadata(response: &Response) -> NavigationMetadata {
    let status = u16::try_from(response.status).ok();

    let mut headers = BTreeMap::new();
    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(&response.headers) {
        for (name, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            headers.insert(name, value);
        }
    }

    NavigationMetadata { status, headers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_urls_fn_shape() {
        // Guard against accidental edits breaking the in-page enumeration.
        assert!(SCRIPT_URLS_FN.starts_with("() =>"));
        assert!(SCRIPT_URLS_FN.contains("script.src"));
    }

    #[test]
    fn test_fetch_fn_quotes_url() {
        let quoted = serde_json::to_string("https://example.com/\"quote\".js").expect("quote");
        assert!(quoted.starts_with('"'));
        assert!(quoted.contains("\\\""));
    }
}
