use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::MessageHandler;

pub fn message_routes(message_handler: Arc<MessageHandler>) -> Router {
    Router::new()
        .route("/api/send-message", post(MessageHandler::send_message))
        .with_state(message_handler)
}
