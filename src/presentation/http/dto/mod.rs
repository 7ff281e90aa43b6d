pub mod chat_dto;
pub mod message_dto;
pub mod response_dto;

pub use chat_dto::*;
pub use message_dto::*;
pub use response_dto::*;
