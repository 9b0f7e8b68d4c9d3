//! hacs-frontend-core: registers the HACS frontend bundle into a host.
//!
//! Picks the bundle source (dev override or packaged build), binds static paths,
//! injects the iconset script and ensures the sidebar panel exists. The host is
//! reached only through the traits in [`host`], so any server can embed it.

pub mod config;
pub mod error;
pub mod extra_js;
pub mod host;
pub mod locator;
pub mod panel;
pub mod setup;
pub mod static_paths;

pub use config::FrontendConfig;
pub use error::{HookError, HostError, SetupError};
pub use extra_js::{
    CompatJsInjector, ExtraModuleRegistry, FallbackScriptInjection, NativeScriptInjection,
    ScriptInjection,
};
pub use host::{
    BuiltInPanel, CustomPanelConfig, ExtraScriptHost, PanelCustom, PanelHost, PluginEndpoint,
    StaticAssetHost, StaticBinding,
};
pub use locator::{AssetLocator, BundleMode, BundleSource, PackagedBundle};
pub use panel::{PanelOutcome, PanelRegistrar, PanelRegistration};
pub use setup::FrontendSetup;
pub use static_paths::StaticPathRegistrar;

/// Integration domain; also the sidebar panel's url path.
pub const DOMAIN: &str = "hacs";

/// Root URL under which every HACS asset is served.
pub const URL_BASE: &str = "/hacsfiles";

/// Environment override pointing at a local frontend checkout (dev mode only).
pub const FRONTEND_DIR_ENV: &str = "HACS_FRONTEND_DIR";

/// Sub-folder of the dev checkout that holds the built bundle.
pub const DEV_BUNDLE_SUBFOLDER: &str = "hacs_frontend";

/// Version tag used in dev mode; effectively disables cache busting.
pub const DEV_VERSION: &str = "dev";

/// Pinned version of the packaged frontend build shipped with this crate.
pub const FRONTEND_VERSION: &str = "20220906112053";

/// File name of the custom iconset script shipped with the integration.
pub const ICONSET_FILE: &str = "iconset.js";

/// URL prefix the bundle is served under.
pub fn frontend_url_prefix() -> String {
    format!("{URL_BASE}/frontend")
}

/// URL the iconset script is served at (and injected as an extra module).
pub fn iconset_url() -> String {
    format!("{URL_BASE}/{ICONSET_FILE}")
}
