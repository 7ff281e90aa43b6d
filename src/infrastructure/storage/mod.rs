pub mod json_transcript_store;

pub use json_transcript_store::JsonTranscriptStore;
