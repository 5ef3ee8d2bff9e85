//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tollgate_auth::SessionManager;
use tollgate_core::config::AppConfig;
use tollgate_core::result::AppResult;
use tollgate_core::traits::{RevocationStore, UserStore};

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Revocation store, also probed by the health check
    pub store: Arc<dyn RevocationStore>,
    /// Auth flows
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Wire the auth flows over the given store and user store.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RevocationStore>,
        users: Arc<dyn UserStore>,
    ) -> AppResult<Self> {
        let session_manager = SessionManager::new(&config.auth, store.clone(), users)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            session_manager: Arc::new(session_manager),
        })
    }
}
