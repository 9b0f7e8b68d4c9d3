//! Gateway configuration. Precedence: env `HACS__*` > config file > defaults.

use std::path::{Path, PathBuf};

use hacs_frontend_core::{FrontendConfig, PackagedBundle, FRONTEND_VERSION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub bind: String,
    pub port: u16,
    /// Host configuration directory; plugins live in `www/community` below it.
    pub config_dir: PathBuf,
    /// Directory shipping `iconset.js`. Defaults to this crate's `assets/`.
    #[serde(default)]
    pub integration_dir: Option<PathBuf>,
    /// Packaged frontend build. Defaults to [`PackagedBundle::locate`].
    #[serde(default)]
    pub packaged_frontend_dir: Option<PathBuf>,
    /// "storage" enables caching for `/hacsfiles/`, "yaml" disables it.
    pub lovelace_mode: String,
    /// Emulate a host without `add_extra_js_url` (fallback module set only).
    #[serde(default)]
    pub legacy_extra_js: bool,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

impl GatewayConfig {
    /// Load config from file and environment. File path: env `HACS_CONFIG` >
    /// `config/gateway.toml`. Env overrides use `HACS__KEY` (nested: `HACS__FRONTEND__DEV`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("HACS_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("bind", "127.0.0.1")?
            .set_default("port", 8123_i64)?
            .set_default("config_dir", ".")?
            .set_default("lovelace_mode", "storage")?
            .set_default("legacy_extra_js", false)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder.add_source(config::File::with_name(&config_path).required(false))
        };

        builder
            .add_source(
                config::Environment::with_prefix("HACS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn integration_dir(&self) -> PathBuf {
        self.integration_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    pub fn packaged_bundle(&self) -> PackagedBundle {
        match &self.packaged_frontend_dir {
            Some(dir) => PackagedBundle::new(dir, FRONTEND_VERSION),
            None => PackagedBundle::locate(),
        }
    }

    pub fn community_dir(&self) -> PathBuf {
        self.config_dir.join("www").join("community")
    }

    /// `/hacsfiles/` is cached only when dashboards are storage-managed.
    pub fn plugin_cache_enabled(&self) -> bool {
        self.lovelace_mode.trim().eq_ignore_ascii_case("storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(lovelace_mode: &str) -> GatewayConfig {
        GatewayConfig {
            bind: "127.0.0.1".into(),
            port: 8123,
            config_dir: PathBuf::from("/config"),
            integration_dir: None,
            packaged_frontend_dir: Some(PathBuf::from("/opt/hacs_frontend")),
            lovelace_mode: lovelace_mode.into(),
            legacy_extra_js: false,
            frontend: FrontendConfig::default(),
        }
    }

    #[test]
    fn community_dir_is_under_www() {
        assert_eq!(
            config("storage").community_dir(),
            PathBuf::from("/config/www/community")
        );
    }

    #[test]
    fn plugin_cache_follows_lovelace_mode() {
        assert!(config("storage").plugin_cache_enabled());
        assert!(!config("yaml").plugin_cache_enabled());
    }

    #[test]
    fn configured_packaged_dir_uses_pinned_version() {
        let bundle = config("storage").packaged_bundle();
        assert_eq!(bundle.root_dir, PathBuf::from("/opt/hacs_frontend"));
        assert_eq!(bundle.version, FRONTEND_VERSION);
    }

    #[test]
    fn integration_dir_defaults_to_assets() {
        let dir = config("storage").integration_dir();
        assert!(dir.ends_with("assets"));
        assert!(dir.join("iconset.js").exists());
    }

    #[test]
    #[serial]
    fn load_layers_defaults_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gateway.toml");
        std::fs::write(
            &file,
            "port = 9000\nlovelace_mode = \"yaml\"\n\n[frontend]\nsidepanel_title = \"Community\"\n",
        )
        .unwrap();

        std::env::set_var("HACS_CONFIG", &file);
        std::env::set_var("HACS__PORT", "9100");
        std::env::set_var("HACS__FRONTEND__DEV", "true");
        let loaded = GatewayConfig::load();
        std::env::remove_var("HACS_CONFIG");
        std::env::remove_var("HACS__PORT");
        std::env::remove_var("HACS__FRONTEND__DEV");

        let config = loaded.unwrap();
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 9100);
        assert_eq!(config.lovelace_mode, "yaml");
        assert!(config.frontend.dev);
        assert_eq!(config.frontend.sidepanel_title, "Community");
        assert_eq!(config.frontend.sidepanel_icon, "hacs:hacs");
        assert!(!config.legacy_extra_js);
    }

    #[test]
    #[serial]
    fn shipped_sample_config_loads() {
        let sample = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/gateway.toml");

        std::env::set_var("HACS_CONFIG", &sample);
        let loaded = GatewayConfig::load();
        std::env::remove_var("HACS_CONFIG");

        let config = loaded.unwrap();
        assert_eq!(config.port, 8123);
        assert_eq!(config.packaged_frontend_dir, None);
        assert!(!config.frontend.dev);
    }
}
