//! Wiring: host, frontend setup, plugin endpoint and the axum router.

use std::sync::Arc;

use axum::{routing::get, Router};
use hacs_frontend_core::{
    AssetLocator, CompatJsInjector, ExtraModuleRegistry, ExtraScriptHost, FrontendSetup,
    PanelRegistrar, StaticPathRegistrar,
};

use crate::config::GatewayConfig;
use crate::handlers;
use crate::host::GatewayHost;
use crate::plugin_endpoint::CommunityPluginEndpoint;
use crate::static_files::serve_static;

#[derive(Clone)]
pub struct AppState {
    pub host: Arc<GatewayHost>,
    pub setup: Arc<FrontendSetup>,
    pub extra_modules: ExtraModuleRegistry,
}

/// Build the host and the frontend setup for `config`. `locator` decides the bundle source.
pub fn build_state(config: &GatewayConfig, locator: AssetLocator) -> AppState {
    let host = Arc::new(GatewayHost::new());
    let extra_modules = ExtraModuleRegistry::new();
    let static_paths = StaticPathRegistrar::new(host.clone());

    let native: Option<Arc<dyn ExtraScriptHost>> = if config.legacy_extra_js {
        None
    } else {
        Some(host.clone())
    };
    let plugin_endpoint = Arc::new(CommunityPluginEndpoint::new(
        static_paths.clone(),
        config.community_dir(),
        config.plugin_cache_enabled(),
    ));

    let setup = FrontendSetup::new(
        config.frontend.clone(),
        config.integration_dir(),
        locator,
        static_paths,
        CompatJsInjector::select(native, extra_modules.clone()),
        PanelRegistrar::new(host.clone()),
        plugin_endpoint,
    );

    AppState {
        host,
        setup: Arc::new(setup),
        extra_modules,
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/panels", get(handlers::frontend::list_panels))
        .route("/api/frontend/extra_js", get(handlers::frontend::extra_js))
        .route("/api/frontend/version", get(handlers::frontend::frontend_version))
        .route("/api/frontend/static_paths", get(handlers::frontend::static_paths))
        .fallback(serve_static)
        .with_state(state)
}
