pub mod completion_service;
pub mod rag_service;
pub mod scrape_service;
pub mod transcript_store;

pub use completion_service::CompletionService;
pub use rag_service::RagService;
pub use scrape_service::ScrapeService;
pub use transcript_store::TranscriptStore;
