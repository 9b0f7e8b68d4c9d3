//! GatewayHost: the gateway's static-path, extra-script and panel registries.
//!
//! Registrations land here during frontend setup. The HTTP layer reads them
//! per request, so bindings made by the plugin endpoint are served right away.

use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;
use hacs_frontend_core::{
    BuiltInPanel, ExtraScriptHost, HostError, PanelHost, StaticAssetHost, StaticBinding,
};
use serde::Serialize;

/// Extra module URL registered through the native capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraJsUrl {
    pub url: String,
    pub es5: bool,
}

/// A bound static path; whether it is a directory is fixed at bind time.
#[derive(Debug, Clone)]
pub struct StaticMount {
    pub binding: StaticBinding,
    pub is_dir: bool,
}

#[derive(Default)]
pub struct GatewayHost {
    static_paths: DashMap<String, StaticMount>,
    panels: DashMap<String, BuiltInPanel>,
    extra_js: RwLock<Vec<ExtraJsUrl>>,
}

impl GatewayHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Longest bound prefix matching `path` on a segment boundary, with the
    /// remainder of the path (empty or starting with `/`).
    pub fn resolve_static(&self, path: &str) -> Option<(StaticMount, String)> {
        self.static_paths
            .iter()
            .filter_map(|entry| {
                let prefix = entry.key();
                let rest = path.strip_prefix(prefix.as_str())?;
                if rest.is_empty() || rest.starts_with('/') {
                    Some((entry.value().clone(), rest.to_string()))
                } else {
                    None
                }
            })
            .max_by_key(|(mount, _)| mount.binding.url_prefix.len())
    }

    pub fn static_bindings(&self) -> Vec<StaticBinding> {
        let mut bindings: Vec<StaticBinding> =
            self.static_paths.iter().map(|e| e.value().binding.clone()).collect();
        bindings.sort_by(|a, b| a.url_prefix.cmp(&b.url_prefix));
        bindings
    }

    pub fn panels(&self) -> Vec<BuiltInPanel> {
        let mut panels: Vec<BuiltInPanel> = self.panels.iter().map(|e| e.value().clone()).collect();
        panels.sort_by(|a, b| a.frontend_url_path.cmp(&b.frontend_url_path));
        panels
    }

    pub fn extra_js_urls(&self) -> Vec<ExtraJsUrl> {
        self.extra_js
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl StaticAssetHost for GatewayHost {
    fn register_static_path(&self, binding: &StaticBinding) -> Result<(), HostError> {
        let Ok(metadata) = std::fs::metadata(&binding.source_path) else {
            return Err(HostError::ResourceNotFound(binding.source_path.clone()));
        };
        let prefix = normalize_prefix(&binding.url_prefix);
        let mount = StaticMount {
            binding: StaticBinding {
                url_prefix: prefix.clone(),
                ..binding.clone()
            },
            is_dir: metadata.is_dir(),
        };
        if let Some(previous) = self.static_paths.insert(prefix.clone(), mount) {
            tracing::warn!(
                "Static path {} re-bound (was {})",
                prefix,
                previous.binding.source_path.display()
            );
        }
        Ok(())
    }
}

impl ExtraScriptHost for GatewayHost {
    fn add_extra_js_url(&self, url: &str, es5: bool) {
        let mut urls = self.extra_js.write().unwrap_or_else(PoisonError::into_inner);
        if urls.iter().any(|u| u.url == url && u.es5 == es5) {
            return;
        }
        urls.push(ExtraJsUrl {
            url: url.to_string(),
            es5,
        });
    }
}

impl PanelHost for GatewayHost {
    fn has_panel(&self, frontend_url_path: &str) -> bool {
        self.panels.contains_key(frontend_url_path)
    }

    fn register_built_in_panel(&self, panel: BuiltInPanel) -> Result<(), HostError> {
        if panel.frontend_url_path.trim().is_empty() || panel.frontend_url_path.contains('/') {
            return Err(HostError::PanelRejected(format!(
                "invalid frontend_url_path '{}'",
                panel.frontend_url_path
            )));
        }
        if panel.sidebar_title.trim().is_empty() {
            return Err(HostError::PanelRejected("sidebar_title is empty".to_string()));
        }
        tracing::debug!("Panel '{}' added to sidebar", panel.frontend_url_path);
        self.panels.insert(panel.frontend_url_path.clone(), panel);
        Ok(())
    }
}
