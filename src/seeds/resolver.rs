//! Seed resolution
//!
//! Positional URLs come first, then each URL file in argument order. The
//! merged list is deduplicated keeping first-seen order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;

use super::documents::read_document_text;
use super::extractor::extract_urls_from_text;
use crate::error::{CaptureError, CaptureResult};
use crate::utils::{CaptureUrl, DEFAULT_SEED_URL, normalize_capture_url};

/// Ordered, duplicate-free seed URLs for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    urls: Vec<CaptureUrl>,
    seen: HashSet<CaptureUrl>,
}

impl SeedSet {
    /// Append `url` unless it is already present; returns whether it was added
    fn push(&mut self, url: CaptureUrl) -> bool {
        if self.seen.insert(url.clone()) {
            self.urls.push(url);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CaptureUrl] {
        &self.urls
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<CaptureUrl> {
        self.urls
    }
}

impl FromIterator<CaptureUrl> for SeedSet {
    fn from_iter<I: IntoIterator<Item = CaptureUrl>>(iter: I) -> Self {
        let mut set = Self::default();
        for url in iter {
            set.push(url);
        }
        set
    }
}

/// Merge positional URLs and URL-file contents into one seed set
///
/// With no URLs and no files the built-in default seed is used.
///
/// # Errors
///
/// Fails on the first positional URL that does not normalize, and on any file
/// that is unreadable, of an unsupported type, or yields no URLs.
pub async fn resolve_seeds(urls: &[String], url_files: &[PathBuf]) -> CaptureResult<SeedSet> {
    if urls.is_empty() && url_files.is_empty() {
        info!("No URLs given, using default seed {DEFAULT_SEED_URL}");
        return Ok(std::iter::once(normalize_capture_url(DEFAULT_SEED_URL)?).collect());
    }

    let mut seeds = SeedSet::default();
    for raw in urls {
        seeds.push(normalize_capture_url(raw)?);
    }

    for path in url_files {
        let file_urls = urls_from_file(path).await?;
        let total = file_urls.len();
        let added = file_urls.into_iter().filter(|url| seeds.push(url.clone())).count();
        info!(
            "Loaded {total} URLs from {} ({added} new)",
            path.display()
        );
    }

    Ok(seeds)
}

async fn urls_from_file(path: &Path) -> CaptureResult<Vec<CaptureUrl>> {
    let text = read_document_text(path).await?;
    let urls = extract_urls_from_text(&text);
    if urls.is_empty() {
        return Err(CaptureError::unsupported_input(path, "no URLs found in file"));
    }
    Ok(urls)
}
