use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::{AuthService, ProductService, StoreService};

/// Everything the guard chain and handlers need, built once at startup and
/// injected through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub stores: StoreService,
    pub products: ProductService,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let config = Arc::new(config);
        Self {
            auth: AuthService::new(pool.clone(), config.clone()),
            stores: StoreService::new(pool.clone()),
            products: ProductService::new(pool),
            config,
        }
    }
}
