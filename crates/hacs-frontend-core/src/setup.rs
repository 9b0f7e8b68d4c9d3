//! FrontendSetup: runs one frontend registration pass against the host.
//!
//! Order is fixed: locate bundle, bind bundle, bind iconset, inject iconset,
//! ensure panel, then the plugin-endpoint hook. The first failure aborts the
//! pass; bindings already made stay in place, since rerunning is harmless.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::FrontendConfig;
use crate::error::SetupError;
use crate::extra_js::CompatJsInjector;
use crate::host::PluginEndpoint;
use crate::locator::{AssetLocator, BundleSource};
use crate::panel::{PanelRegistrar, PanelRegistration};
use crate::static_paths::StaticPathRegistrar;
use crate::{frontend_url_prefix, iconset_url, DOMAIN, ICONSET_FILE};

pub struct FrontendSetup {
    config: FrontendConfig,
    /// Directory shipping `iconset.js`.
    integration_dir: PathBuf,
    locator: AssetLocator,
    static_paths: StaticPathRegistrar,
    scripts: CompatJsInjector,
    panels: PanelRegistrar,
    plugin_endpoint: Arc<dyn PluginEndpoint>,
    /// Source bound by the last pass; its version is the cache-busting tag.
    source: RwLock<Option<BundleSource>>,
}

impl FrontendSetup {
    pub fn new(
        config: FrontendConfig,
        integration_dir: impl Into<PathBuf>,
        locator: AssetLocator,
        static_paths: StaticPathRegistrar,
        scripts: CompatJsInjector,
        panels: PanelRegistrar,
        plugin_endpoint: Arc<dyn PluginEndpoint>,
    ) -> Self {
        Self {
            config,
            integration_dir: integration_dir.into(),
            locator,
            static_paths,
            scripts,
            panels,
            plugin_endpoint,
            source: RwLock::new(None),
        }
    }

    /// Current frontend version; `None` until a pass has bound the bundle.
    pub fn frontend_version(&self) -> Option<String> {
        self.bundle_source().map(|s| s.version)
    }

    pub fn bundle_source(&self) -> Option<BundleSource> {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn setup(&self) -> Result<(), SetupError> {
        let source = self.locator.locate();
        tracing::info!(
            "<HacsFrontend> Registering frontend ({:?}, version {})",
            source.mode,
            source.version
        );

        self.static_paths
            .bind(frontend_url_prefix(), source.root_dir.clone(), false)?;
        let version = source.version.clone();
        *self.source.write().unwrap_or_else(PoisonError::into_inner) = Some(source);

        // Custom iconset
        let iconset = iconset_url();
        self.static_paths
            .bind(iconset.clone(), self.integration_dir.join(ICONSET_FILE), true)?;
        self.scripts.inject(&iconset);

        let registration = PanelRegistration::for_frontend(DOMAIN, &self.config, &version);
        self.panels.ensure_panel(&registration)?;

        self.plugin_endpoint
            .setup()
            .await
            .map_err(SetupError::Hook)?;

        tracing::info!("<HacsFrontend> Frontend ready at {}", frontend_url_prefix());
        Ok(())
    }
}
