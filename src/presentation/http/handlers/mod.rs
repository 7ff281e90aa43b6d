pub mod chat_handler;
pub mod config_handler;
pub mod data_handler;
pub mod message_handler;

pub use chat_handler::ChatHandler;
pub use config_handler::ConfigHandler;
pub use data_handler::DataHandler;
pub use message_handler::MessageHandler;
