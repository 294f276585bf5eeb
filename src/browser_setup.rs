//! Chromium discovery and launch
//!
//! Lookup order: `CHROMIUM_PATH`, well-known install locations, `which`, and
//! finally a managed download cached under the user cache directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use tokio::process::Command;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

use crate::utils::constants::DESKTOP_VIEWPORT;

/// Environment variable that overrides browser discovery
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

#[cfg(target_os = "windows")]
const INSTALL_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"%LOCALAPPDATA%\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\Chromium\Application\chrome.exe",
];

#[cfg(target_os = "macos")]
const INSTALL_CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "~/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/opt/homebrew/bin/chromium",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/local/bin/chromium",
    "/opt/google/chrome/chrome",
];

const PATH_COMMANDS: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Flags that keep rendering identical between runs and machines
const CAPTURE_ARGS: &[&str] = &[
    "--hide-scrollbars",
    "--force-color-profile=srgb",
    "--font-render-hinting=none",
    "--disable-lcd-text",
    "--mute-audio",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-notifications",
    "--disable-infobars",
    "--disable-extensions",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-renderer-backgrounding",
    "--disable-dev-shm-usage",
    "--disable-breakpad",
    "--disable-features=TranslateUI",
    "--password-store=basic",
    "--use-mock-keychain",
    "--no-sandbox",
    "--disable-setuid-sandbox",
];

/// Expand `~/` and `%LOCALAPPDATA%\` prefixes; `None` when the base is unknown
fn expand_candidate(candidate: &str) -> Option<PathBuf> {
    if let Some(rest) = candidate.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    if let Some(rest) = candidate.strip_prefix(r"%LOCALAPPDATA%\") {
        return std::env::var("LOCALAPPDATA")
            .ok()
            .map(|base| Path::new(&base).join(rest));
    }
    Some(PathBuf::from(candidate))
}

async fn which(command: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(command).output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!found.is_empty()).then(|| PathBuf::from(found))
}

/// Find an installed Chrome or Chromium executable
///
/// # Errors
///
/// Fails when no candidate exists; callers fall back to [`download_managed_browser`].
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(raw) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(raw);
        if path.exists() {
            info!("Using browser from {CHROMIUM_PATH_ENV}: {}", path.display());
            return Ok(path);
        }
        warn!(
            "{CHROMIUM_PATH_ENV} points to a missing file: {}",
            path.display()
        );
    }

    if let Some(path) = INSTALL_CANDIDATES
        .iter()
        .filter_map(|c| expand_candidate(c))
        .find(|p| p.exists())
    {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if !cfg!(target_os = "windows") {
        for command in PATH_COMMANDS {
            if let Some(path) = which(command).await {
                info!("Found browser on PATH: {}", path.display());
                return Ok(path);
            }
        }
    }

    warn!("No Chrome/Chromium executable found locally");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download Chromium through the chromiumoxide fetcher and return its executable
///
/// # Errors
///
/// Fails when the cache directory cannot be created or the download fails.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir().join("sitesnap_chrome_cache");
            warn!(
                "No user cache directory, downloading into {}",
                fallback.display()
            );
            fallback
        })
        .join("sitesnap")
        .join("chromium");

    tokio::fs::create_dir_all(&cache_dir)
        .await
        .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;

    info!("Downloading managed Chromium into {}", cache_dir.display());
    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );
    let revision = fetcher.fetch().await.context("Failed to fetch browser")?;

    info!("Downloaded Chromium to {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

/// Chrome emits CDP events chromiumoxide cannot deserialize; they are noise.
/// See mattsse/chromiumoxide#167.
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// Find or download Chromium and launch it for deterministic capture
///
/// The returned handler task drives the CDP connection and must be aborted
/// once the browser is closed.
///
/// # Errors
///
/// Fails when no browser can be found or downloaded, or Chromium refuses to start.
pub async fn launch_browser(
    headless: bool,
    user_data_dir: &Path,
    request_timeout: Duration,
) -> Result<(Browser, JoinHandle<()>)> {
    let executable = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let (width, height) = DESKTOP_VIEWPORT;
    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(request_timeout)
        .window_size(width, height)
        .user_data_dir(user_data_dir.to_path_buf())
        .chrome_executable(executable)
        .args(CAPTURE_ARGS.iter().copied());

    builder = if headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    let config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser (headless: {headless})");
    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let message = e.to_string();
                if is_benign_handler_error(&message) {
                    trace!("Suppressed CDP deserialization error: {message}");
                } else {
                    error!("Browser handler error: {e:?}");
                }
            }
        }
        info!("Browser handler task completed");
    });

    Ok((browser, handler_task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_candidates_expand_unchanged() {
        assert_eq!(
            expand_candidate("/usr/bin/chromium"),
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn test_home_candidates_expand_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_candidate("~/Applications/Chromium.app"),
                Some(home.join("Applications/Chromium.app"))
            );
        }
    }

    #[test]
    fn test_benign_handler_errors() {
        assert!(is_benign_handler_error(
            "data did not match any variant of untagged enum Message"
        ));
        assert!(!is_benign_handler_error("connection closed"));
    }

    #[test]
    fn test_capture_args_stabilize_rendering() {
        assert!(CAPTURE_ARGS.contains(&"--hide-scrollbars"));
        assert!(CAPTURE_ARGS.contains(&"--force-color-profile=srgb"));
    }
}
