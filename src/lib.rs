pub mod csv_processor;
pub mod feed;
pub mod pipeline;
pub mod pricing;
pub mod search;
pub mod translation;
pub mod utils;

pub use csv_processor::{CsvStreamReader, CsvStreamWriter, OutputRow};
pub use feed::{FeedClient, PricePoint, ProductRecord};
pub use pipeline::{run_scout, Pipeline, PipelineOutput, RunSummary};
pub use pricing::{PriceStats, UnitNormalizer, UnitStats};
pub use translation::{BatchTranslator, Translate, TranslationCache, TranslationReport};
pub use utils::{AppConfig, OutputLayout, Result, ScoutError};
