//! Static path registration on the host's asset server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SetupError;
use crate::host::{StaticAssetHost, StaticBinding};

/// Thin wrapper over [`StaticAssetHost`]. Callers bind each prefix once per
/// setup pass; double binding is not guarded here.
#[derive(Clone)]
pub struct StaticPathRegistrar {
    host: Arc<dyn StaticAssetHost>,
}

impl StaticPathRegistrar {
    pub fn new(host: Arc<dyn StaticAssetHost>) -> Self {
        Self { host }
    }

    /// Bind `url_prefix` to `source_path`. A missing source surfaces as
    /// [`SetupError::StaticPath`] wrapping `HostError::ResourceNotFound`.
    pub fn bind(
        &self,
        url_prefix: impl Into<String>,
        source_path: impl Into<PathBuf>,
        cacheable: bool,
    ) -> Result<StaticBinding, SetupError> {
        let binding = StaticBinding {
            url_prefix: url_prefix.into(),
            source_path: source_path.into(),
            cacheable,
        };
        self.host
            .register_static_path(&binding)
            .map_err(|source| SetupError::StaticPath {
                url_prefix: binding.url_prefix.clone(),
                source,
            })?;
        tracing::debug!(
            "Bound {} -> {} (cacheable={})",
            binding.url_prefix,
            binding.source_path.display(),
            binding.cacheable
        );
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        bound: Mutex<Vec<StaticBinding>>,
    }

    impl StaticAssetHost for RecordingHost {
        fn register_static_path(&self, binding: &StaticBinding) -> Result<(), HostError> {
            if !binding.source_path.exists() {
                return Err(HostError::ResourceNotFound(binding.source_path.clone()));
            }
            self.bound.lock().unwrap().push(binding.clone());
            Ok(())
        }
    }

    #[test]
    fn bind_forwards_binding_to_host() {
        let dir = tempfile::tempdir().unwrap();
        let host = Arc::new(RecordingHost::default());
        let registrar = StaticPathRegistrar::new(host.clone());

        let binding = registrar.bind("/hacsfiles/frontend", dir.path(), false).unwrap();

        assert_eq!(binding.url_prefix, "/hacsfiles/frontend");
        assert!(!binding.cacheable);
        assert_eq!(host.bound.lock().unwrap().as_slice(), &[binding]);
    }

    #[test]
    fn missing_source_is_surfaced() {
        let host = Arc::new(RecordingHost::default());
        let registrar = StaticPathRegistrar::new(host.clone());

        let err = registrar
            .bind("/hacsfiles/iconset.js", "/definitely/not/here.js", true)
            .unwrap_err();

        assert!(err.is_resource_not_found());
        assert!(host.bound.lock().unwrap().is_empty());
    }
}
