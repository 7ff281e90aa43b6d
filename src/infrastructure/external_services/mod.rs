pub mod completion_client;
pub mod rag_client;
pub mod scrape_client;

pub use completion_client::{CompletionClient, CompletionClientConfig};
pub use rag_client::{RagClient, RagClientConfig};
pub use scrape_client::{ScrapeClient, ScrapeClientConfig};
