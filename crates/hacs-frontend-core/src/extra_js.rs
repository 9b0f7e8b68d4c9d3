//! **CompatJsInjector** — adds the iconset script as an always-loaded module.
//!
//! Newer hosts expose `add_extra_js_url`; older ones only read the shared
//! `frontend_extra_module_url` set. The adapter is picked once at startup and
//! injected, so a missing capability never fails setup.

use std::sync::Arc;

use dashmap::DashSet;

use crate::host::ExtraScriptHost;

/// Key the host reads the fallback set under.
pub const EXTRA_MODULE_URL_KEY: &str = "frontend_extra_module_url";

/// Process-wide set of extra module URLs used by hosts without the native API.
///
/// Created once at process start, append-only, never cleared. Clones share
/// the same set.
#[derive(Debug, Clone, Default)]
pub struct ExtraModuleRegistry {
    urls: Arc<DashSet<String>>,
}

impl ExtraModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> &'static str {
        EXTRA_MODULE_URL_KEY
    }

    /// Insert `url`; returns false when it was already present.
    pub fn insert(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Snapshot of the registered URLs, sorted.
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.iter().map(|u| u.key().clone()).collect();
        urls.sort();
        urls
    }
}

/// How a script URL reaches the page.
pub trait ScriptInjection: Send + Sync {
    fn inject(&self, url: &str);
}

/// Uses the host's native capability.
pub struct NativeScriptInjection {
    host: Arc<dyn ExtraScriptHost>,
}

impl NativeScriptInjection {
    pub fn new(host: Arc<dyn ExtraScriptHost>) -> Self {
        Self { host }
    }
}

impl ScriptInjection for NativeScriptInjection {
    fn inject(&self, url: &str) {
        self.host.add_extra_js_url(url, false);
    }
}

/// Degraded path for hosts that predate `add_extra_js_url`.
pub struct FallbackScriptInjection {
    registry: ExtraModuleRegistry,
}

impl FallbackScriptInjection {
    pub fn new(registry: ExtraModuleRegistry) -> Self {
        Self { registry }
    }
}

impl ScriptInjection for FallbackScriptInjection {
    fn inject(&self, url: &str) {
        tracing::error!("Could not use add_extra_js_url from the host frontend.");
        if !self.registry.insert(url) {
            tracing::debug!("{url} already present in {}", self.registry.key());
        }
    }
}

pub struct CompatJsInjector {
    injection: Box<dyn ScriptInjection>,
}

impl CompatJsInjector {
    pub fn new(injection: Box<dyn ScriptInjection>) -> Self {
        Self { injection }
    }

    /// Native adapter when the host has one, fallback registry otherwise.
    pub fn select(native: Option<Arc<dyn ExtraScriptHost>>, registry: ExtraModuleRegistry) -> Self {
        match native {
            Some(host) => Self::new(Box::new(NativeScriptInjection::new(host))),
            None => {
                tracing::info!(
                    "Host has no extra script capability; using {}",
                    EXTRA_MODULE_URL_KEY
                );
                Self::new(Box::new(FallbackScriptInjection::new(registry)))
            }
        }
    }

    pub fn inject(&self, url: &str) {
        self.injection.inject(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct NativeHost {
        urls: Mutex<Vec<(String, bool)>>,
    }

    impl ExtraScriptHost for NativeHost {
        fn add_extra_js_url(&self, url: &str, es5: bool) {
            self.urls.lock().unwrap().push((url.to_string(), es5));
        }
    }

    #[test]
    fn fallback_has_set_semantics() {
        let registry = ExtraModuleRegistry::new();
        let injector = CompatJsInjector::select(None, registry.clone());

        injector.inject("/hacsfiles/iconset.js");
        injector.inject("/hacsfiles/iconset.js");

        assert_eq!(registry.urls(), vec!["/hacsfiles/iconset.js".to_string()]);
    }

    #[test]
    fn native_never_touches_fallback_registry() {
        let host = Arc::new(NativeHost::default());
        let registry = ExtraModuleRegistry::new();
        let injector = CompatJsInjector::select(Some(host.clone()), registry.clone());

        injector.inject("/hacsfiles/iconset.js");

        assert!(registry.is_empty());
        assert_eq!(
            host.urls.lock().unwrap().as_slice(),
            &[("/hacsfiles/iconset.js".to_string(), false)]
        );
    }

    #[test]
    fn registry_clones_share_state() {
        let registry = ExtraModuleRegistry::new();
        let other = registry.clone();
        assert!(registry.insert("/a.js"));
        assert!(!other.insert("/a.js"));
        assert!(other.contains("/a.js"));
        assert_eq!(other.len(), 1);
        assert_eq!(other.key(), "frontend_extra_module_url");
    }
}
