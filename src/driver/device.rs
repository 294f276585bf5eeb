//! Device emulation profiles
//!
//! Every target is captured once per profile, desktop first.

use crate::utils::constants::{
    DESKTOP_USER_AGENT, DESKTOP_VIEWPORT, MOBILE_USER_AGENT, MOBILE_VIEWPORT,
};

/// Viewport and UA emulation for one capture pass
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub name: &'static str,
    /// Appended to the output key to form the file name
    pub file_suffix: &'static str,
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub mobile: bool,
    pub touch: bool,
    pub user_agent: &'static str,
}

impl DeviceProfile {
    #[must_use]
    pub fn desktop(scale: f64) -> Self {
        let (width, height) = DESKTOP_VIEWPORT;
        Self {
            name: "desktop",
            file_suffix: "fullpage-document",
            width,
            height,
            device_scale_factor: scale,
            mobile: false,
            touch: false,
            user_agent: DESKTOP_USER_AGENT,
        }
    }

    #[must_use]
    pub fn mobile(scale: f64) -> Self {
        let (width, height) = MOBILE_VIEWPORT;
        Self {
            name: "mobile",
            file_suffix: "fullpage-mobile-document",
            width,
            height,
            device_scale_factor: scale,
            mobile: true,
            touch: true,
            user_agent: MOBILE_USER_AGENT,
        }
    }

    /// Capture order for every target: desktop, then mobile
    #[must_use]
    pub fn capture_order(scale: f64) -> [Self; 2] {
        [Self::desktop(scale), Self::mobile(scale)]
    }

    /// `<key>-<suffix>.png`
    #[must_use]
    pub fn file_name(&self, output_key: &str) -> String {
        format!("{output_key}-{}.png", self.file_suffix)
    }
}
