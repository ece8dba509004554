pub mod auth_handlers;

pub use auth_handlers::login_handler;

use crate::AppState;
use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
