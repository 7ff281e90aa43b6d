pub mod configure_chat;
pub mod delete_chat;
pub mod get_chat_data;
pub mod list_chats;
pub mod send_message;

pub use configure_chat::ConfigureChatUseCase;
pub use delete_chat::DeleteChatUseCase;
pub use get_chat_data::GetChatDataUseCase;
pub use list_chats::ListChatsUseCase;
pub use send_message::SendMessageUseCase;
