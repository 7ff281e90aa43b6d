use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ConfigHandler;

pub fn config_routes(config_handler: Arc<ConfigHandler>) -> Router {
    Router::new()
        .route("/api/configure-chat", post(ConfigHandler::configure_chat))
        .with_state(config_handler)
}
