//! Per-run Chrome profile directory
//!
//! Each capture run launches Chromium against a fresh UUID-named profile
//! directory so that no cookies, storage or cache leak in from earlier runs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Prefix for every profile directory this crate creates in temp
pub const PROFILE_DIR_PREFIX: &str = "sitesnap_chrome";

/// RAII wrapper for Chrome profile directory
///
/// Automatically cleans up the profile directory on drop.
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
}

impl BrowserProfile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.path.exists() {
            debug!("BrowserProfile cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to cleanup profile directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Create a unique Chrome profile directory under the system temp dir
///
/// `create_dir` (not `create_dir_all`) makes a UUID collision an error
/// instead of a silently shared profile.
pub fn create_unique_profile() -> Result<BrowserProfile> {
    create_unique_profile_in(&std::env::temp_dir())
}

/// Create a unique Chrome profile directory under `parent`
pub fn create_unique_profile_in(parent: &Path) -> Result<BrowserProfile> {
    let path = parent.join(format!("{PROFILE_DIR_PREFIX}_{}", Uuid::new_v4()));

    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    info!("Created Chrome profile directory: {}", path.display());
    Ok(BrowserProfile { path })
}
