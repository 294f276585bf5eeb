//! Output key derivation
//!
//! A key is a filesystem-safe slug of the URL's last path segment. Keys are
//! unique within a run: collisions fall back to a host-qualified key, then a
//! host-and-timestamp key, then a numeric suffix.

use std::collections::HashSet;

use url::Url;

use crate::utils::CaptureUrl;

const ROOT_KEY: &str = "home";
const FALLBACK_KEY: &str = "page";
const FALLBACK_HOST_KEY: &str = "site";

/// Hands out unique output keys for one run
#[derive(Debug, Clone)]
pub struct OutputKeyResolver {
    used: HashSet<String>,
    timestamp: String,
}

impl Default for OutputKeyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputKeyResolver {
    /// Resolver stamped with the current local time
    #[must_use]
    pub fn new() -> Self {
        Self::with_timestamp(chrono::Local::now().format("%Y%m%d-%H%M%S").to_string())
    }

    #[must_use]
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            used: HashSet::new(),
            timestamp: timestamp.into(),
        }
    }

    /// Key for `url`, never equal to a key returned earlier by this resolver
    pub fn resolve(&mut self, url: &CaptureUrl) -> String {
        let parsed = url.to_url().ok();
        let candidate = parsed.as_ref().map_or_else(|| FALLBACK_KEY.to_string(), base_key);
        let host = parsed
            .as_ref()
            .and_then(Url::host_str)
            .map(slugify)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_HOST_KEY.to_string());

        let qualified = format!("{host}-{candidate}");
        let stamped = format!("{qualified}-{}", self.timestamp);
        for key in [candidate, qualified, stamped.clone()] {
            if self.used.insert(key.clone()) {
                return key;
            }
        }

        let mut suffix = 2u64;
        loop {
            let key = format!("{stamped}-{suffix}");
            if self.used.insert(key.clone()) {
                return key;
            }
            suffix += 1;
        }
    }
}

/// Slug of the last non-empty path segment; `home` for the root
#[must_use]
pub fn base_key(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()));

    let Some(segment) = last else {
        return ROOT_KEY.to_string();
    };

    let decoded = urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |d| d.into_owned());
    let slug = slugify(&decoded);
    if slug.is_empty() {
        FALLBACK_KEY.to_string()
    } else {
        slug
    }
}

/// Lowercase ASCII alphanumerics with single hyphens between runs
#[must_use]
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
