mod application;
mod domain;
mod infrastructure;
mod presentation;

use tracing_subscriber::EnvFilter;

use crate::infrastructure::AppContainer;
use crate::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mirage=info,tower_http=info")),
        )
        .init();

    let container = AppContainer::new().await?;

    let server = HttpServer::new(
        container.chat_handler.clone(),
        container.config_handler.clone(),
        container.message_handler.clone(),
        container.data_handler.clone(),
    );

    server.run().await
}
