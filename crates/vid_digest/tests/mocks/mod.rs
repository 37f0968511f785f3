pub mod fetcher;
pub mod speech_model;
pub mod summarization_model;
