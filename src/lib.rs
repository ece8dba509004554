pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<services::auth_service::AuthService>,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let credential_repository = Arc::new(repositories::SqliteCredentialRepository::new(pool));
        Self {
            auth_service: Arc::new(services::AuthService::new(credential_repository)),
        }
    }
}
