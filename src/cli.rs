//! Command-line surface
//!
//! Parses arguments with clap and turns them into a validated
//! [`CaptureConfig`]. Clap errors are mapped onto [`CaptureError`] so that the
//! binary reports every failure the same way.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ErrorKind};
use clap::{ArgAction, Parser};

use crate::config::CaptureConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::utils::constants::{
    DEFAULT_CRAWL_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_OUTPUT_DIR,
    DEFAULT_SCALE,
};

const SUPPORTED_MODE: &str = "full";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sitesnap",
    version,
    about = "Deterministic full-document screenshots, desktop and mobile, with optional crawl discovery"
)]
pub struct Cli {
    /// Seed URLs; the scheme defaults to https
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Text, Markdown, .doc or .docx file to read URLs from (repeatable)
    #[arg(long = "url-file", value_name = "PATH")]
    pub url_files: Vec<PathBuf>,

    /// Discover more pages by following links from the seeds
    #[arg(long, visible_alias = "loop", overrides_with = "no_crawl")]
    pub crawl: bool,

    /// Capture the seeds only
    #[arg(long, overrides_with = "crawl")]
    pub no_crawl: bool,

    /// Maximum link hops from any seed
    #[arg(long, visible_alias = "loop-depth", value_name = "N", default_value_t = DEFAULT_CRAWL_DEPTH)]
    pub crawl_depth: u32,

    /// Cap on discovered pages, seeds included
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Only follow links on the seed origins
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = true,
        action = ArgAction::Set,
        overrides_with = "no_same_origin_only"
    )]
    pub same_origin_only: bool,

    /// Follow links to any origin
    #[arg(long, overrides_with = "same_origin_only")]
    pub no_same_origin_only: bool,

    /// Class names to hide before capture (repeatable, comma-separated)
    #[arg(long = "exclude-class", value_name = "NAME", value_delimiter = ',')]
    pub exclude_classes: Vec<String>,

    /// Element ids to hide before capture (repeatable, comma-separated)
    #[arg(long = "exclude-id", value_name = "ID", value_delimiter = ',')]
    pub exclude_ids: Vec<String>,

    /// Directory for the PNG files
    #[arg(long, visible_alias = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Device pixel ratio for every profile
    #[arg(long, value_name = "FACTOR", default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Per-navigation timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_NAVIGATION_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Capture mode; only `full` is available
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Removed segment capture mode
    #[arg(long, hide = true)]
    pub segments: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

/// What the binary should do after parsing
#[derive(Debug)]
pub enum CliOutcome {
    /// Capture with this configuration
    Run(Box<CaptureConfig>),
    /// Print this text (help or version) and exit successfully
    Help(String),
}

impl Cli {
    /// Validate and convert into a capture configuration
    ///
    /// # Errors
    ///
    /// `NotSupported` for the removed segment mode, `InvalidArgument` for
    /// out-of-range values.
    pub fn into_config(self) -> CaptureResult<CaptureConfig> {
        if self.segments {
            return Err(CaptureError::NotSupported("--segments".to_string()));
        }
        if let Some(mode) = &self.mode
            && !mode.trim().eq_ignore_ascii_case(SUPPORTED_MODE)
        {
            return Err(CaptureError::NotSupported(format!("--mode={mode}")));
        }

        CaptureConfig::builder()
            .urls(self.urls)
            .url_files(self.url_files)
            .crawl_enabled(self.crawl && !self.no_crawl)
            .crawl_depth(self.crawl_depth)
            .max_pages(self.max_pages)
            .same_origin_only(self.same_origin_only && !self.no_same_origin_only)
            .exclude_classes(self.exclude_classes)
            .exclude_ids(self.exclude_ids)
            .output_dir(self.output_dir)
            .scale(self.scale)
            .navigation_timeout_ms(self.timeout_ms)
            .headless(!self.headed)
            .build()
    }
}

/// Parse `args` (program name first) into an outcome
///
/// # Errors
///
/// `UnknownOption` for flags the CLI does not define, `InvalidArgument` for
/// malformed or missing values, plus everything [`Cli::into_config`] rejects.
pub fn parse_args<I, T>(args: I) -> CaptureResult<CliOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.into_config().map(|config| CliOutcome::Run(Box::new(config))),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(CliOutcome::Help(err.render().to_string()))
            }
            ErrorKind::UnknownArgument => {
                let arg = err
                    .get(ContextKind::InvalidArg)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                Err(CaptureError::UnknownOption(arg))
            }
            _ => Err(CaptureError::InvalidArgument(clap_message(&err))),
        },
    }
}

/// First line of a clap error without its `error: ` prefix
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}
