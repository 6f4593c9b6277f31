//! Scripted rendering-engine mock shared by session and orchestrator tests.

use mfaprint_browser::{
    BrowserError, NavigationMetadata, PageContext, RenderingEngine, Result,
};
use mfaprint_signatures::SignatureCatalog;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn catalog(raw: &str) -> SignatureCatalog {
    SignatureCatalog::from_toml_str(raw, "inline").expect("valid test catalog")
}

#[derive(Clone)]
enum NavigationScript {
    Success,
    Timeout,
    Failure(String),
}

/// Scripted behaviour for one target URL.
#[derive(Clone)]
pub struct PageFixture {
    navigation: NavigationScript,
    metadata: NavigationMetadata,
    document: String,
    scripts: Vec<(String, std::result::Result<String, String>)>,
}

impl PageFixture {
    pub fn success(document: &str) -> Self {
        Self {
            navigation: NavigationScript::Success,
            metadata: NavigationMetadata::default(),
            document: document.to_string(),
            scripts: Vec::new(),
        }
    }

    pub fn timeout() -> Self {
        Self {
            navigation: NavigationScript::Timeout,
            metadata: NavigationMetadata::default(),
            document: String::new(),
            scripts: Vec::new(),
        }
    }

    pub fn navigation_failure(message: &str) -> Self {
        Self {
            navigation: NavigationScript::Failure(message.to_string()),
            metadata: NavigationMetadata::default(),
            document: String::new(),
            scripts: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: NavigationMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_script(mut self, url: &str, body: &str) -> Self {
        self.scripts.push((url.to_string(), Ok(body.to_string())));
        self
    }

    pub fn with_failing_script(mut self, url: &str, cause: &str) -> Self {
        self.scripts.push((url.to_string(), Err(cause.to_string())));
        self
    }
}

/// In-memory [`RenderingEngine`] serving scripted pages keyed by URL.
#[derive(Default)]
pub struct MockEngine {
    fixtures: HashMap<String, PageFixture>,
    fail_contexts: bool,
    pub contexts_opened: Arc<AtomicUsize>,
    pub contexts_closed: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn with_fixture(mut self, url: &str, fixture: PageFixture) -> Self {
        self.fixtures.insert(url.to_string(), fixture);
        self
    }

    /// Make every context acquisition fail.
    pub fn failing_contexts(mut self) -> Self {
        self.fail_contexts = true;
        self
    }
}

#[async_trait::async_trait]
impl RenderingEngine for MockEngine {
    async fn new_context(&self, _ignore_tls_errors: bool) -> Result<Box<dyn PageContext>> {
        if self.fail_contexts {
            return Err(BrowserError::Chromium("context creation refused".to_string()));
        }

        self.contexts_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockPage {
            fixtures: self.fixtures.clone(),
            current: None,
            closed: Arc::clone(&self.contexts_closed),
        }))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct MockPage {
    fixtures: HashMap<String, PageFixture>,
    current: Option<PageFixture>,
    closed: Arc<AtomicUsize>,
}

impl MockPage {
    fn current(&self) -> Result<&PageFixture> {
        self.current
            .as_ref()
            .ok_or_else(|| BrowserError::Navigation("no page loaded".to_string()))
    }
}

#[async_trait::async_trait]
impl PageContext for MockPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<NavigationMetadata> {
        let fixture = self
            .fixtures
            .get(url)
            .cloned()
            .ok_or_else(|| BrowserError::Navigation(format!("no fixture for {url}")))?;

        let result = match &fixture.navigation {
            NavigationScript::Success => Ok(fixture.metadata.clone()),
            NavigationScript::Timeout => Err(BrowserError::NavigationTimeout(timeout)),
            NavigationScript::Failure(message) => {
                Err(BrowserError::Navigation(message.clone()))
            }
        };

        self.current = Some(fixture);
        result
    }

    async fn document_text(&mut self) -> Result<String> {
        Ok(self.current()?.document.clone())
    }

    async fn script_urls(&mut self) -> Result<Vec<String>> {
        Ok(self
            .current()?
            .scripts
            .iter()
            .map(|(url, _)| url.clone())
            .collect())
    }

    async fn fetch_text(&mut self, url: &str) -> Result<String> {
        let (_, body) = self
            .current()?
            .scripts
            .iter()
            .find(|(script_url, _)| script_url == url)
            .ok_or_else(|| BrowserError::Fetch(format!("unknown script {url}")))?;

        body.clone().map_err(BrowserError::Fetch)
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
