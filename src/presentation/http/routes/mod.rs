pub mod chat_routes;
pub mod config_routes;
pub mod data_routes;
pub mod health_routes;
pub mod message_routes;

pub use chat_routes::chat_routes;
pub use config_routes::config_routes;
pub use data_routes::data_routes;
pub use health_routes::health_routes;
pub use message_routes::message_routes;
