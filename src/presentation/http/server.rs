use axum::Router;
use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{ChatHandler, ConfigHandler, DataHandler, MessageHandler},
    routes::{chat_routes, config_routes, data_routes, health_routes, message_routes},
};

pub struct HttpServer {
    chat_handler: Arc<ChatHandler>,
    config_handler: Arc<ConfigHandler>,
    message_handler: Arc<MessageHandler>,
    data_handler: Arc<DataHandler>,
    port: u16,
    static_dir: PathBuf,
}

impl HttpServer {
    pub fn new(
        chat_handler: Arc<ChatHandler>,
        config_handler: Arc<ConfigHandler>,
        message_handler: Arc<MessageHandler>,
        data_handler: Arc<DataHandler>,
    ) -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let static_dir =
            PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "./dist".to_string()));

        Self {
            chat_handler,
            config_handler,
            message_handler,
            data_handler,
            port,
            static_dir,
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // Any route the API doesn't claim serves the built frontend, with
        // index.html standing in for client-side routes.
        let spa = ServeDir::new(&self.static_dir)
            .not_found_service(ServeFile::new(self.static_dir.join("index.html")));

        let app = Router::new()
            .merge(health_routes())
            .merge(chat_routes(self.chat_handler))
            .merge(config_routes(self.config_handler))
            .merge(message_routes(self.message_handler))
            .merge(data_routes(self.data_handler))
            .fallback_service(spa)
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024)) // 2MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
