//! Link resolution and filtering for crawl discovery
//!
//! Raw `href` values go through, in order: non-navigational prefix check,
//! resolution against the page URL, scheme check, origin gate, asset
//! extension denylist, then fragment stripping.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use url::{Origin, Url};

use crate::utils::{ASSET_EXTENSIONS, CaptureUrl, is_http_scheme};

/// Path ending in a known non-page extension
static ASSET_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = ASSET_EXTENSIONS.join("|");
    Regex::new(&format!(r"(?i)\.(?:{alternation})$")).expect("ASSET_PATH_RE: hardcoded regex is valid")
});

const NON_NAVIGATIONAL_PREFIXES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

/// Origins (scheme, host, port) of the seed URLs, fixed for the whole crawl
#[derive(Debug, Clone, Default)]
pub struct OriginAllowSet {
    origins: HashSet<Origin>,
}

impl OriginAllowSet {
    #[must_use]
    pub fn from_seeds(seeds: &[CaptureUrl]) -> Self {
        let origins = seeds
            .iter()
            .filter_map(|seed| seed.to_url().ok())
            .map(|url| url.origin())
            .collect();
        Self { origins }
    }

    #[must_use]
    pub fn allows(&self, url: &Url) -> bool {
        self.origins.contains(&url.origin())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Whether the URL path names a non-page asset
#[must_use]
pub fn is_asset_path(url: &Url) -> bool {
    ASSET_PATH_RE.is_match(url.path())
}

/// Turns raw hyperlink targets into crawlable capture URLs
#[derive(Debug, Clone)]
pub struct LinkFilter {
    /// `None` when cross-origin links are allowed
    allowed_origins: Option<OriginAllowSet>,
}

impl LinkFilter {
    #[must_use]
    pub fn new(seeds: &[CaptureUrl], same_origin_only: bool) -> Self {
        Self {
            allowed_origins: same_origin_only.then(|| OriginAllowSet::from_seeds(seeds)),
        }
    }

    /// Resolve `href` against `base` and apply every filter
    #[must_use]
    pub fn accept(&self, base: &Url, href: &str) -> Option<CaptureUrl> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let lowered = href.to_ascii_lowercase();
        if NON_NAVIGATIONAL_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
        {
            trace!(target: "sitesnap::links", "skipping non-navigational link {href}");
            return None;
        }

        let resolved = base.join(href).ok()?;
        if !is_http_scheme(resolved.scheme()) {
            trace!(target: "sitesnap::links", "skipping {resolved}: scheme {}", resolved.scheme());
            return None;
        }

        if let Some(origins) = &self.allowed_origins
            && !origins.allows(&resolved)
        {
            trace!(target: "sitesnap::links", "skipping {resolved}: outside seed origins");
            return None;
        }

        if is_asset_path(&resolved) {
            trace!(target: "sitesnap::links", "skipping {resolved}: asset extension");
            return None;
        }

        CaptureUrl::from_parsed(resolved).ok()
    }
}
