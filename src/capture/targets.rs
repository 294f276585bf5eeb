//! Capture targets: each URL paired with its output key.

use std::path::{Path, PathBuf};

use super::output_key::OutputKeyResolver;
use crate::driver::DeviceProfile;
use crate::utils::CaptureUrl;

/// One URL to capture under one output key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    pub url: CaptureUrl,
    pub output_key: String,
}

impl CaptureTarget {
    /// `<output_dir>/<key>-<profile suffix>.png`
    #[must_use]
    pub fn output_path(&self, output_dir: &Path, profile: &DeviceProfile) -> PathBuf {
        output_dir.join(profile.file_name(&self.output_key))
    }
}

/// Pair every URL with a run-unique output key, preserving order
#[must_use]
pub fn build_capture_targets(urls: &[CaptureUrl], resolver: &mut OutputKeyResolver) -> Vec<CaptureTarget> {
    urls.iter()
        .map(|url| CaptureTarget {
            output_key: resolver.resolve(url),
            url: url.clone(),
        })
        .collect()
}
