//! Frontend configuration: dev flag and sidebar appearance.
//!
//! Nested under `frontend` in the gateway config file; environment overrides
//! go through the gateway's `HACS__FRONTEND__*` keys.

use serde::{Deserialize, Serialize};

fn default_sidepanel_title() -> String {
    "HACS".to_string()
}

fn default_sidepanel_icon() -> String {
    "hacs:hacs".to_string()
}

/// Frontend-related settings.
///
/// | Key | Env | Default | Description |
/// |-----|-----|---------|-------------|
/// | frontend.dev | HACS__FRONTEND__DEV | false | Allow serving the bundle from `HACS_FRONTEND_DIR`. |
/// | frontend.sidepanel_title | HACS__FRONTEND__SIDEPANEL_TITLE | HACS | Sidebar entry title. |
/// | frontend.sidepanel_icon | HACS__FRONTEND__SIDEPANEL_ICON | hacs:hacs | Sidebar entry icon. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Development mode; only takes effect together with `HACS_FRONTEND_DIR`.
    #[serde(default)]
    pub dev: bool,
    #[serde(default = "default_sidepanel_title")]
    pub sidepanel_title: String,
    #[serde(default = "default_sidepanel_icon")]
    pub sidepanel_icon: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dev: false,
            sidepanel_title: default_sidepanel_title(),
            sidepanel_icon: default_sidepanel_icon(),
        }
    }
}
