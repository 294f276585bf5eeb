//! URL normalization utilities.
//!
//! `normalize_capture_url` is the only way to produce a [`CaptureUrl`]: an
//! absolute http(s) URL with no fragment, serialized canonically.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{CaptureError, CaptureResult};

/// `scheme:` prefix per RFC 3986
static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("SCHEME_PREFIX: hardcoded regex is valid")
});

/// `host:port` with no scheme, which would otherwise look like `host:` scheme
static HOST_PORT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/:?#\s]+:\d+(?:[/?#]|$)").expect("HOST_PORT_PREFIX: hardcoded regex is valid")
});

/// A normalized absolute URL ready for capture or crawl
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureUrl(String);

impl CaptureUrl {
    /// Build from an already-parsed URL, enforcing the capture invariants
    pub(crate) fn from_parsed(mut url: Url) -> CaptureResult<Self> {
        if !is_http_scheme(url.scheme()) {
            return Err(CaptureError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: url.to_string(),
            });
        }
        url.set_fragment(None);
        Ok(Self(url.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Re-parse into a `Url`; infallible in practice because the string came from one
    pub fn to_url(&self) -> CaptureResult<Url> {
        Url::parse(&self.0).map_err(|e| CaptureError::InvalidUrl {
            url: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for CaptureUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CaptureUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a raw string into a capture URL.
///
/// Trims, defaults the scheme to `https://` when none is present, rejects
/// non-http(s) schemes and strips the fragment. Idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```
/// use sitesnap::utils::normalize_capture_url;
///
/// let url = normalize_capture_url("membershealth.ca/programs#intro").unwrap();
/// assert_eq!(url.as_str(), "https://membershealth.ca/programs");
/// ```
pub fn normalize_capture_url(raw: &str) -> CaptureResult<CaptureUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CaptureError::EmptyUrl);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| CaptureError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    CaptureUrl::from_parsed(parsed)
}

/// Whether `raw` starts with an explicit scheme (`host:port` does not count)
#[must_use]
pub fn has_scheme(raw: &str) -> bool {
    SCHEME_PREFIX.is_match(raw) && !HOST_PORT_PREFIX.is_match(raw)
}

#[must_use]
pub fn is_http_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}
