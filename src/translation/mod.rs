pub mod batch;
pub mod cache;
pub mod client;

pub use batch::{BatchOutcome, BatchSettings, BatchTranslator, TranslationReport};
pub use cache::TranslationCache;
pub use client::{GoogleTranslateClient, Translate};
