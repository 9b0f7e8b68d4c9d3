//! Plugin endpoint: serves `www/community` (downloaded dashboard plugins) under `/hacsfiles`.
//!
//! Runs at the end of every frontend setup pass but binds only once per process.
//! Nothing is bound while the community directory does not exist yet.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hacs_frontend_core::{HookError, PluginEndpoint, StaticPathRegistrar, URL_BASE};

pub struct CommunityPluginEndpoint {
    static_paths: StaticPathRegistrar,
    community_dir: PathBuf,
    use_cache: bool,
    active: AtomicBool,
}

impl CommunityPluginEndpoint {
    pub fn new(static_paths: StaticPathRegistrar, community_dir: PathBuf, use_cache: bool) -> Self {
        Self {
            static_paths,
            community_dir,
            use_cache,
            active: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginEndpoint for CommunityPluginEndpoint {
    async fn setup(&self) -> Result<(), HookError> {
        if self.is_active() {
            return Ok(());
        }
        if !tokio::fs::try_exists(&self.community_dir).await.unwrap_or(false) {
            tracing::debug!(
                "Plugin endpoint skipped; {} does not exist",
                self.community_dir.display()
            );
            return Ok(());
        }

        tracing::info!("Setting up plugin endpoint");
        tracing::info!("<HacsFrontend> cache for {}/: {}", URL_BASE, self.use_cache);
        self.static_paths
            .bind(URL_BASE, self.community_dir.clone(), self.use_cache)?;
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }
}
