pub mod chat_model_row;
pub mod rate_limit_row;

pub use chat_model_row::{ChatModelRow, NewChatModelRow};
pub use rate_limit_row::{NewRateLimitRow, RateLimitRow};
