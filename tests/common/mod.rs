//! Test utilities and in-memory browser doubles for the sitesnap test suite

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use sitesnap::capture::SavedScreenshot;
use sitesnap::convergence::ExclusionSelectorSet;
use sitesnap::{
    BrowserHost, CaptureConfig, CaptureError, CaptureReporter, CaptureUrl, DeviceProfile,
    PageDriver, normalize_capture_url,
};
use tempfile::TempDir;

/// Bytes written by `FakePage::screenshot`
#[allow(dead_code)]
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

#[allow(dead_code)]
pub fn url(raw: &str) -> CaptureUrl {
    normalize_capture_url(raw).unwrap()
}

#[allow(dead_code)]
pub fn urls(raws: &[&str]) -> Vec<CaptureUrl> {
    raws.iter().map(|raw| url(raw)).collect()
}

/// One page of the fake site
#[derive(Debug, Clone, Default)]
pub struct FakeDoc {
    pub links: Vec<String>,
    /// URL reported by `current_url` after navigation
    pub redirect_to: Option<String>,
    /// Heights returned by successive scroll passes; the last one repeats
    pub scroll_heights: Vec<f64>,
    pub dom_never_ready: bool,
    /// `wait_for_network_idle` always fails
    pub network_never_idle: bool,
    pub assets: AssetBehavior,
}

/// How the asset settle script behaves on a `FakeDoc`
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetBehavior {
    #[default]
    Settled,
    /// The in-page race loses to its own timer
    TimedOut,
    /// The evaluation never returns within any sane budget
    Hangs,
}

/// In-memory link graph keyed by normalized URL
#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    docs: HashMap<String, FakeDoc>,
    unreachable: Vec<String>,
    close_fails: bool,
}

#[allow(dead_code)]
impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given raw `href` values
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.docs.entry(url.to_string()).or_default().links =
            links.iter().map(|l| (*l).to_string()).collect();
        self
    }

    pub fn redirect(mut self, url: &str, to: &str) -> Self {
        self.docs.entry(url.to_string()).or_default().redirect_to = Some(to.to_string());
        self
    }

    pub fn scroll_heights(mut self, url: &str, heights: &[f64]) -> Self {
        self.docs.entry(url.to_string()).or_default().scroll_heights = heights.to_vec();
        self
    }

    pub fn dom_never_ready(mut self, url: &str) -> Self {
        self.docs.entry(url.to_string()).or_default().dom_never_ready = true;
        self
    }

    pub fn network_never_idle(mut self, url: &str) -> Self {
        self.docs.entry(url.to_string()).or_default().network_never_idle = true;
        self
    }

    pub fn assets(mut self, url: &str, behavior: AssetBehavior) -> Self {
        self.docs.entry(url.to_string()).or_default().assets = behavior;
        self
    }

    /// Every `close` call reports an error
    pub fn close_fails(mut self) -> Self {
        self.close_fails = true;
        self
    }

    /// Navigation to `url` fails
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_string());
        self
    }

    fn doc(&self, url: &str) -> FakeDoc {
        self.docs.get(url).cloned().unwrap_or_default()
    }
}

/// Ordered record of everything the fakes were asked to do
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// URLs navigated to, in order
    pub fn navigations(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix("navigate ").map(str::to_string))
            .collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

/// A page over `FakeSite`
pub struct FakePage {
    site: Arc<FakeSite>,
    journal: Journal,
    /// URL last navigated to; selects the `FakeDoc`
    loaded: Mutex<Option<String>>,
    /// URL reported by `current_url`
    current: Mutex<Option<String>>,
    scroll_pass: Mutex<usize>,
}

#[allow(dead_code)]
impl FakePage {
    pub fn new(site: Arc<FakeSite>, journal: Journal) -> Self {
        Self {
            site,
            journal,
            loaded: Mutex::new(None),
            current: Mutex::new(None),
            scroll_pass: Mutex::new(0),
        }
    }

    fn current_doc(&self) -> FakeDoc {
        let loaded = self.loaded.lock().unwrap().clone();
        loaded.map(|url| self.site.doc(&url)).unwrap_or_default()
    }

    fn next_scroll_height(&self) -> f64 {
        let doc = self.current_doc();
        let mut pass = self.scroll_pass.lock().unwrap();
        let height = doc
            .scroll_heights
            .get(*pass)
            .or(doc.scroll_heights.last())
            .copied()
            .unwrap_or(1000.0);
        *pass += 1;
        height
    }
}

impl PageDriver for FakePage {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.journal.push(format!("navigate {url}"));
        if self.site.unreachable.iter().any(|u| u == url) {
            return Err(anyhow!("net::ERR_NAME_NOT_RESOLVED at {url}"));
        }
        let doc = self.site.doc(url);
        *self.loaded.lock().unwrap() = Some(url.to_string());
        *self.current.lock().unwrap() = Some(doc.redirect_to.unwrap_or_else(|| url.to_string()));
        *self.scroll_pass.lock().unwrap() = 0;
        Ok(())
    }

    async fn current_url(&self) -> Result<Option<String>> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        let value = if script.contains("waitForDomReady") {
            self.journal.push("script waitForDomReady");
            json!(!self.current_doc().dom_never_ready)
        } else if script.contains("promoteLazyContent") {
            self.journal.push("script promoteLazyContent");
            json!(0)
        } else if script.contains("documentHeight") {
            self.journal.push("script documentHeight");
            json!(1000.0)
        } else if script.contains("scrollPass") {
            self.journal.push("script scrollPass");
            json!(self.next_scroll_height())
        } else if script.contains("scrollToTop") {
            self.journal.push("script scrollToTop");
            json!(true)
        } else if script.contains("waitForAssets") {
            self.journal.push("script waitForAssets");
            match self.current_doc().assets {
                AssetBehavior::Settled => json!(true),
                AssetBehavior::TimedOut => json!(false),
                AssetBehavior::Hangs => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    json!(true)
                }
            }
        } else if script.contains("applyDeterminism") {
            self.journal.push(format!("script applyDeterminism {script}"));
            json!(0)
        } else {
            self.journal.push("script unknown");
            Value::Null
        };
        Ok(value)
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<()> {
        self.journal.push("network idle");
        if self.current_doc().network_never_idle {
            return Err(anyhow!("network still busy after {} ms", timeout.as_millis()));
        }
        Ok(())
    }

    async fn query_links(&self) -> Result<Vec<String>> {
        Ok(self.current_doc().links)
    }

    async fn screenshot(&self, path: &Path) -> Result<u64> {
        self.journal.push(format!("screenshot {}", path.display()));
        tokio::fs::write(path, FAKE_PNG).await?;
        Ok(FAKE_PNG.len() as u64)
    }

    async fn close(self) -> Result<()> {
        self.journal.push("close");
        if self.site.close_fails {
            return Err(anyhow!("target already detached"));
        }
        Ok(())
    }
}

/// A browser over `FakeSite`
#[derive(Clone)]
pub struct FakeBrowser {
    pub site: Arc<FakeSite>,
    pub journal: Journal,
}

#[allow(dead_code)]
impl FakeBrowser {
    pub fn new(site: FakeSite) -> Self {
        Self {
            site: Arc::new(site),
            journal: Journal::default(),
        }
    }

    pub fn page(&self) -> FakePage {
        FakePage::new(Arc::clone(&self.site), self.journal.clone())
    }
}

impl BrowserHost for FakeBrowser {
    type Page = FakePage;

    async fn open_page(&self, profile: Option<&DeviceProfile>) -> Result<FakePage> {
        let label = profile.map_or("crawl", |p| p.name);
        self.journal.push(format!("open {label}"));
        Ok(self.page())
    }
}

/// Reporter that records events as strings
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl CaptureReporter for RecordingReporter {
    fn report_run_started(&self, _config: &CaptureConfig, selectors: &ExclusionSelectorSet) {
        self.record(format!("started {}", selectors.len()));
    }

    fn report_crawl_finished(&self, seeds: usize, discovered: usize) {
        self.record(format!("crawled {seeds} -> {discovered}"));
    }

    fn report_screenshot_saved(&self, shot: &SavedScreenshot<'_>) {
        let file = shot.path.file_name().unwrap().to_string_lossy().into_owned();
        self.record(format!("saved {} {file} {}", shot.url, shot.bytes));
    }

    fn report_target_failed(&self, url: &CaptureUrl, error: &CaptureError) {
        self.record(format!("failed {url}: {error}"));
    }

    fn report_run_finished(&self, captured: usize, failed: usize, _elapsed: Duration) {
        self.record(format!("finished {captured} {failed}"));
    }
}
