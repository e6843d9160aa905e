use std::sync::Arc;

use crate::config::AppConfig;
use crate::context::ContextResolver;
use crate::database::{DataAccessor, Stores};

/// Shared, read-only handles every handler receives.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DataAccessor>,
    pub resolver: Arc<ContextResolver>,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let resolver = ContextResolver::new(stores.identity, &config);
        Self {
            config: Arc::new(config),
            store: stores.data,
            resolver: Arc::new(resolver),
        }
    }
}
