//! Read-only views of what frontend setup registered in the host.

use axum::{extract::State, Json};
use hacs_frontend_core::{BuiltInPanel, BundleMode, StaticBinding};
use serde::Serialize;

use crate::app::AppState;
use crate::host::ExtraJsUrl;

#[derive(Serialize)]
pub struct ExtraJsResponse {
    /// URLs added through the native capability.
    pub extra_js_url: Vec<ExtraJsUrl>,
    /// Fallback module set, used when the native capability is disabled.
    pub frontend_extra_module_url: Vec<String>,
}

#[derive(Serialize)]
pub struct VersionResponse {
    pub version: Option<String>,
    pub mode: Option<BundleMode>,
}

/// GET /api/panels – registered sidebar panels.
pub async fn list_panels(State(state): State<AppState>) -> Json<Vec<BuiltInPanel>> {
    Json(state.host.panels())
}

/// GET /api/frontend/extra_js – extra module URLs from both injection paths.
pub async fn extra_js(State(state): State<AppState>) -> Json<ExtraJsResponse> {
    Json(ExtraJsResponse {
        extra_js_url: state.host.extra_js_urls(),
        frontend_extra_module_url: state.extra_modules.urls(),
    })
}

/// GET /api/frontend/version – bundle version used as the `hacstag` cache buster.
pub async fn frontend_version(State(state): State<AppState>) -> Json<VersionResponse> {
    let source = state.setup.bundle_source();
    Json(VersionResponse {
        version: source.as_ref().map(|s| s.version.clone()),
        mode: source.map(|s| s.mode),
    })
}

/// GET /api/frontend/static_paths – URL prefixes bound on the asset server.
pub async fn static_paths(State(state): State<AppState>) -> Json<Vec<StaticBinding>> {
    Json(state.host.static_bindings())
}
