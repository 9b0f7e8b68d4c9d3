//! **AssetLocator** — decides where the frontend bundle is served from.
//!
//! Dev mode needs both the `dev` flag and a non-empty `HACS_FRONTEND_DIR`.
//! Anything else serves the packaged build with its pinned version, which is
//! also the cache-busting tag appended to the panel's script URL.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::FrontendConfig;
use crate::{DEV_BUNDLE_SUBFOLDER, DEV_VERSION, FRONTEND_DIR_ENV, FRONTEND_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleMode {
    Dev,
    Packaged,
}

/// Resolved bundle location and version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSource {
    pub mode: BundleMode,
    pub root_dir: PathBuf,
    pub version: String,
}

/// The release build shipped with the integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedBundle {
    pub root_dir: PathBuf,
    pub version: String,
}

impl PackagedBundle {
    pub fn new(root_dir: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            version: version.into(),
        }
    }

    /// Default packaged build: `./hacs_frontend` when run from a checkout,
    /// otherwise the directory next to this crate's manifest.
    pub fn locate() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let from_cwd = cwd.join(DEV_BUNDLE_SUBFOLDER);
        let root_dir = if from_cwd.exists() {
            from_cwd
        } else {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEV_BUNDLE_SUBFOLDER)
        };
        Self::new(root_dir, FRONTEND_VERSION)
    }
}

pub struct AssetLocator {
    dev: bool,
    dev_dir: Option<PathBuf>,
    packaged: PackagedBundle,
}

impl AssetLocator {
    /// `dev_dir` is the raw override; an empty value counts as absent.
    pub fn new(dev: bool, dev_dir: Option<String>, packaged: PackagedBundle) -> Self {
        Self {
            dev,
            dev_dir: dev_dir.filter(|dir| !dir.is_empty()).map(PathBuf::from),
            packaged,
        }
    }

    /// Dev flag from `config`, override dir from `HACS_FRONTEND_DIR`.
    pub fn from_env(config: &FrontendConfig, packaged: PackagedBundle) -> Self {
        Self::new(config.dev, std::env::var(FRONTEND_DIR_ENV).ok(), packaged)
    }

    pub fn locate(&self) -> BundleSource {
        match (self.dev, self.dev_dir.as_deref()) {
            (true, Some(dir)) => {
                tracing::warn!(
                    "<HacsFrontend> Frontend development mode enabled. Do not run in production!"
                );
                dev_source(dir)
            }
            (true, None) => {
                tracing::warn!(
                    "<HacsFrontend> dev is enabled but {} is unset or empty; serving packaged frontend {}",
                    FRONTEND_DIR_ENV,
                    self.packaged.version
                );
                self.packaged_source()
            }
            (false, _) => self.packaged_source(),
        }
    }

    fn packaged_source(&self) -> BundleSource {
        BundleSource {
            mode: BundleMode::Packaged,
            root_dir: self.packaged.root_dir.clone(),
            version: self.packaged.version.clone(),
        }
    }
}

fn dev_source(dir: &Path) -> BundleSource {
    BundleSource {
        mode: BundleMode::Dev,
        root_dir: dir.join(DEV_BUNDLE_SUBFOLDER),
        version: DEV_VERSION.to_string(),
    }
}
