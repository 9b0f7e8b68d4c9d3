//! Host capability traits: the boundary between this crate and the server.
//!
//! The host owns the static-asset server, the extra-script list and the panel
//! registry. Registrars in this crate only write into them through these traits.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{HookError, HostError};

/// A URL prefix bound to a directory or single file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBinding {
    pub url_prefix: String,
    pub source_path: PathBuf,
    /// When false the host must send no-cache headers.
    pub cacheable: bool,
}

/// `_panel_custom` payload understood by the host's custom panel element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelCustom {
    /// Custom element name rendered inside the panel.
    pub name: String,
    pub embed_iframe: bool,
    pub trust_external: bool,
    pub js_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPanelConfig {
    #[serde(rename = "_panel_custom")]
    pub panel_custom: PanelCustom,
}

/// Panel as handed to the host's built-in panel registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltInPanel {
    pub component_name: String,
    pub sidebar_title: String,
    pub sidebar_icon: String,
    pub frontend_url_path: String,
    pub config: CustomPanelConfig,
    pub require_admin: bool,
}

/// Static-asset server of the host.
pub trait StaticAssetHost: Send + Sync {
    /// Bind `binding.url_prefix`. Duplicate prefixes are the caller's problem.
    fn register_static_path(&self, binding: &StaticBinding) -> Result<(), HostError>;
}

/// Native "add extra script URL" capability. Older hosts do not have it.
pub trait ExtraScriptHost: Send + Sync {
    fn add_extra_js_url(&self, url: &str, es5: bool);
}

/// Sidebar panel registry of the host.
pub trait PanelHost: Send + Sync {
    /// Whether a panel is registered under `frontend_url_path`.
    fn has_panel(&self, frontend_url_path: &str) -> bool;

    fn register_built_in_panel(&self, panel: BuiltInPanel) -> Result<(), HostError>;
}

/// Hook for serving plugin files; runs last in every setup pass.
#[async_trait]
pub trait PluginEndpoint: Send + Sync {
    async fn setup(&self) -> Result<(), HookError>;
}
