use std::sync::Arc;

use crate::auth::{SessionError, SessionKeys};
use crate::config::AppConfig;
use crate::database::UserStore;
use crate::middleware::PublicPaths;
use crate::pages::PrerenderCache;
use crate::rpc::{self, RpcRouter};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
    pub rpc: Arc<RpcRouter>,
    pub keys: SessionKeys,
    pub public_paths: Arc<PublicPaths>,
    pub prerendered: Arc<PrerenderCache>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Result<Self, SessionError> {
        let keys = SessionKeys::new(&config.auth.session_secret)?;
        let public_paths = PublicPaths::new(&config.auth.public_paths);

        Ok(Self {
            config: Arc::new(config),
            store,
            rpc: Arc::new(rpc::app_router()),
            keys,
            public_paths: Arc::new(public_paths),
            prerendered: Arc::new(PrerenderCache::default()),
        })
    }
}
