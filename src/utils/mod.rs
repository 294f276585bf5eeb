pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{CaptureUrl, has_scheme, is_http_scheme, normalize_capture_url};
