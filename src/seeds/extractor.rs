//! Free-form text URL extraction
//!
//! Three independent passes (absolute tokens, Markdown link targets, bare
//! domain lines) feed one ordered-unique candidate list. Each candidate is
//! normalized on its own and dropped silently if it fails.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::utils::{CaptureUrl, normalize_capture_url};

static ABSOLUTE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"'`]{1,2000}"#).expect("ABSOLUTE_URL_RE: hardcoded regex is valid")
});

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Bounded quantifiers prevent catastrophic backtracking
    Regex::new(r"\[[^\]]{0,500}\]\((https?://[^)\s]{1,2000})\)")
        .expect("MARKDOWN_LINK_RE: hardcoded regex is valid")
});

static BARE_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}(?::\d{1,5})?(?:/\S*)?$")
        .expect("BARE_DOMAIN_RE: hardcoded regex is valid")
});

/// Characters trimmed from the end of an absolute URL token
const TRAILING_PUNCTUATION: &[char] = &[')', '.', ',', ';'];

/// Extract normalized, deduplicated URLs from arbitrary text
///
/// Output order is first-seen across the passes: all absolute tokens, then
/// Markdown link targets, then bare domain lines.
#[must_use]
pub fn extract_urls_from_text(text: &str) -> Vec<CaptureUrl> {
    let mut candidates: Vec<&str> = Vec::new();
    let mut seen_candidates: HashSet<&str> = HashSet::new();

    let absolute = ABSOLUTE_URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION));
    let markdown = MARKDOWN_LINK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));
    let bare = text.lines().map(str::trim).filter(|line| is_bare_domain_line(line));

    for candidate in absolute.chain(markdown).chain(bare) {
        if !candidate.is_empty() && seen_candidates.insert(candidate) {
            candidates.push(candidate);
        }
    }

    let mut urls = Vec::with_capacity(candidates.len());
    let mut seen_urls = HashSet::new();
    for candidate in candidates {
        match normalize_capture_url(candidate) {
            Ok(url) => {
                if seen_urls.insert(url.clone()) {
                    urls.push(url);
                }
            }
            Err(e) => debug!("Discarding URL candidate '{candidate}': {e}"),
        }
    }
    urls
}

/// A whole line that looks like `host.tld[/path]` with no scheme
fn is_bare_domain_line(line: &str) -> bool {
    !line.is_empty()
        && !line.contains(char::is_whitespace)
        && !line.contains('@')
        && BARE_DOMAIN_RE.is_match(line)
}
