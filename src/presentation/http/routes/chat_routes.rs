use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/api/chats", get(ChatHandler::list_chats))
        .route("/api/delete-chat", delete(ChatHandler::delete_chat))
        .with_state(chat_handler)
}
