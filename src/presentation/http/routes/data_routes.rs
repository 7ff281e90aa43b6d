use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::DataHandler;

pub fn data_routes(data_handler: Arc<DataHandler>) -> Router {
    Router::new()
        .route("/api/get-data", get(DataHandler::get_data))
        .with_state(data_handler)
}
