//! **PanelRegistrar** — keeps exactly one HACS sidebar entry in the host.
//!
//! The panel embeds the bundle through the host's custom panel element in an
//! iframe. Content comes from the host's own asset server, so external content
//! is not trusted. `ensure_panel` is keyed by domain and safe to call on every
//! setup pass, including reloads in the same process.

use std::sync::Arc;

use serde::Serialize;

use crate::config::FrontendConfig;
use crate::error::SetupError;
use crate::host::{BuiltInPanel, CustomPanelConfig, PanelCustom, PanelHost};
use crate::URL_BASE;

/// Host panel component used for custom panels.
pub const PANEL_COMPONENT: &str = "custom";

/// Custom element rendered inside the panel.
pub const PANEL_ELEMENT: &str = "hacs-frontend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRegistration {
    pub domain: String,
    pub sidebar_title: String,
    pub sidebar_icon: String,
    pub url_path: String,
    pub js_url: String,
    pub require_admin: bool,
}

impl PanelRegistration {
    /// Admin-only panel at `/<domain>` loading the entrypoint tagged with `version`.
    pub fn for_frontend(domain: &str, config: &FrontendConfig, version: &str) -> Self {
        Self {
            domain: domain.to_string(),
            sidebar_title: config.sidepanel_title.clone(),
            sidebar_icon: config.sidepanel_icon.clone(),
            url_path: domain.to_string(),
            js_url: entrypoint_url(version),
            require_admin: true,
        }
    }

    fn to_built_in(&self) -> BuiltInPanel {
        BuiltInPanel {
            component_name: PANEL_COMPONENT.to_string(),
            sidebar_title: self.sidebar_title.clone(),
            sidebar_icon: self.sidebar_icon.clone(),
            frontend_url_path: self.url_path.clone(),
            config: CustomPanelConfig {
                panel_custom: PanelCustom {
                    name: PANEL_ELEMENT.to_string(),
                    embed_iframe: true,
                    trust_external: false,
                    js_url: self.js_url.clone(),
                },
            },
            require_admin: self.require_admin,
        }
    }
}

/// Entrypoint script URL with `version` as cache-busting tag.
pub fn entrypoint_url(version: &str) -> String {
    format!("{URL_BASE}/frontend/entrypoint.js?hacstag={version}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Registered,
    /// A panel already existed for the domain; nothing was written.
    AlreadyPresent,
}

#[derive(Clone)]
pub struct PanelRegistrar {
    host: Arc<dyn PanelHost>,
}

impl PanelRegistrar {
    pub fn new(host: Arc<dyn PanelHost>) -> Self {
        Self { host }
    }

    /// Register the panel unless one exists for `registration.domain`.
    pub fn ensure_panel(
        &self,
        registration: &PanelRegistration,
    ) -> Result<PanelOutcome, SetupError> {
        if self.host.has_panel(&registration.domain) {
            tracing::debug!("Panel '{}' already registered", registration.domain);
            return Ok(PanelOutcome::AlreadyPresent);
        }

        self.host
            .register_built_in_panel(registration.to_built_in())
            .map_err(|source| SetupError::Panel {
                domain: registration.domain.clone(),
                source,
            })?;
        tracing::info!(
            "Registered sidebar panel '{}' ({})",
            registration.domain,
            registration.js_url
        );
        Ok(PanelOutcome::Registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct PanelTable {
        panels: Mutex<HashMap<String, BuiltInPanel>>,
        writes: Mutex<usize>,
    }

    impl PanelHost for PanelTable {
        fn has_panel(&self, frontend_url_path: &str) -> bool {
            self.panels.lock().unwrap().contains_key(frontend_url_path)
        }

        fn register_built_in_panel(&self, panel: BuiltInPanel) -> Result<(), HostError> {
            if panel.sidebar_title.is_empty() {
                return Err(HostError::PanelRejected("empty title".into()));
            }
            *self.writes.lock().unwrap() += 1;
            self.panels
                .lock()
                .unwrap()
                .insert(panel.frontend_url_path.clone(), panel);
            Ok(())
        }
    }

    fn registration(version: &str) -> PanelRegistration {
        PanelRegistration::for_frontend("hacs", &FrontendConfig::default(), version)
    }

    #[test]
    fn js_url_carries_version_tag() {
        assert_eq!(
            registration("1.2.3").js_url,
            "/hacsfiles/frontend/entrypoint.js?hacstag=1.2.3"
        );
        assert_eq!(
            registration("dev").js_url,
            "/hacsfiles/frontend/entrypoint.js?hacstag=dev"
        );
    }

    #[test]
    fn ensure_twice_registers_once() {
        let host = Arc::new(PanelTable::default());
        let registrar = PanelRegistrar::new(host.clone());

        assert_eq!(
            registrar.ensure_panel(&registration("1.2.3")).unwrap(),
            PanelOutcome::Registered
        );
        assert_eq!(
            registrar.ensure_panel(&registration("1.2.3")).unwrap(),
            PanelOutcome::AlreadyPresent
        );
        assert_eq!(host.panels.lock().unwrap().len(), 1);
        assert_eq!(*host.writes.lock().unwrap(), 1);
    }

    #[test]
    fn existing_panel_is_kept_even_if_fields_differ() {
        let host = Arc::new(PanelTable::default());
        let registrar = PanelRegistrar::new(host.clone());
        registrar.ensure_panel(&registration("1.0.0")).unwrap();

        registrar.ensure_panel(&registration("2.0.0")).unwrap();

        let panels = host.panels.lock().unwrap();
        assert_eq!(
            panels["hacs"].config.panel_custom.js_url,
            "/hacsfiles/frontend/entrypoint.js?hacstag=1.0.0"
        );
    }

    #[test]
    fn built_in_panel_embeds_iframe_and_requires_admin() {
        let panel = registration("1.2.3").to_built_in();
        assert_eq!(panel.component_name, "custom");
        assert_eq!(panel.frontend_url_path, "hacs");
        assert_eq!(panel.sidebar_title, "HACS");
        assert_eq!(panel.sidebar_icon, "hacs:hacs");
        assert!(panel.require_admin);
        assert!(panel.config.panel_custom.embed_iframe);
        assert!(!panel.config.panel_custom.trust_external);
        assert_eq!(panel.config.panel_custom.name, "hacs-frontend");
    }

    #[test]
    fn host_rejection_propagates() {
        let host = Arc::new(PanelTable::default());
        let registrar = PanelRegistrar::new(host);
        let mut bad = registration("1.2.3");
        bad.sidebar_title.clear();

        let err = registrar.ensure_panel(&bad).unwrap_err();
        assert!(matches!(err, SetupError::Panel { ref domain, .. } if domain == "hacs"));
    }
}
