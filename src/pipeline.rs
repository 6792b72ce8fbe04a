use crate::csv_processor::{export_rows, OutputRow};
use crate::feed::{FeedClient, ProductRecord};
use crate::pricing::{reduce_history, PriceStats, UnitNormalizer, UnitStats};
use crate::translation::{
    BatchSettings, BatchTranslator, GoogleTranslateClient, Translate, TranslationCache,
    TranslationReport,
};
use crate::utils::{AppConfig, Result};
use indexmap::IndexSet;
use std::path::PathBuf;
use uuid::Uuid;

/// A product after price reduction. The raw history is dropped here.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedProduct {
    pub name: String,
    pub url: String,
    pub stats: PriceStats,
    pub unit: UnitStats,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub run_id: String,
    pub rows: Vec<OutputRow>,
    pub unique_names: usize,
    pub translation: TranslationReport,
}

pub fn price_records(records: Vec<ProductRecord>, normalizer: &UnitNormalizer) -> Vec<PricedProduct> {
    records
        .into_iter()
        .map(|record| {
            let stats = reduce_history(&record.history);
            let unit = normalizer.normalize(&record, &stats);
            PricedProduct {
                name: record.name,
                url: record.url,
                stats,
                unit,
            }
        })
        .collect()
}

/// Distinct names in first-seen order.
pub fn unique_names(products: &[PricedProduct]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.name.clone())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Untranslated names fall back to the original name.
pub fn assemble_rows(products: Vec<PricedProduct>, cache: &TranslationCache) -> Vec<OutputRow> {
    products
        .into_iter()
        .map(|p| OutputRow {
            translated_name: cache.get(&p.name).unwrap_or(&p.name).to_string(),
            unit_price: p.unit.unit_price,
            current_price: p.stats.current_price,
            min_price: p.stats.min_price,
            max_price: p.stats.max_price,
            price_gap: p.stats.price_gap,
            url: Some(p.url),
            name: p.name,
        })
        .collect()
}

pub struct Pipeline<T: Translate> {
    normalizer: UnitNormalizer,
    translator: BatchTranslator<T>,
}

impl<T: Translate> Pipeline<T> {
    pub fn new(translator: BatchTranslator<T>) -> Result<Self> {
        Ok(Self {
            normalizer: UnitNormalizer::new()?,
            translator,
        })
    }

    pub fn translator(&self) -> &BatchTranslator<T> {
        &self.translator
    }

    /// Prices every record, translates names missing from `cache`, and builds
    /// the output rows in feed order.
    pub async fn run(
        &self,
        records: Vec<ProductRecord>,
        cache: &mut TranslationCache,
    ) -> Result<PipelineOutput> {
        let run_id = Uuid::new_v4().to_string();
        let record_count = records.len();

        let products = price_records(records, &self.normalizer);
        let without_prices = products.iter().filter(|p| p.stats.is_empty()).count();
        tracing::info!(
            run_id = %run_id,
            records = record_count,
            without_prices,
            "Price histories reduced"
        );

        let names = unique_names(&products);
        let pending = cache.pending(&names);
        tracing::info!(
            run_id = %run_id,
            unique_names = names.len(),
            cached = names.len() - pending.len(),
            to_translate = pending.len(),
            "Collected names for translation"
        );

        let translation = self.translator.run(&pending, cache).await?;

        let rows = assemble_rows(products, cache);

        tracing::info!(
            run_id = %run_id,
            rows = rows.len(),
            translated = translation.names_translated,
            pending = translation.names_pending,
            flagged = translation.flagged.len(),
            "Pipeline finished"
        );

        Ok(PipelineOutput {
            run_id,
            rows,
            unique_names: names.len(),
            translation,
        })
    }
}

/// Outcome of a full fetch → transform → export run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PipelineOutput,
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub cache_entries: usize,
}

/// Fetches the feed, runs the pipeline against the on-disk cache and writes
/// the CSV. A failed fetch aborts before anything is written.
pub async fn run_scout(config: &AppConfig) -> Result<RunSummary> {
    let feed = FeedClient::new(&config.feed)?;
    let records = feed.fetch().await?;

    let mut cache = TranslationCache::load(&config.cache.path)?;

    let client = GoogleTranslateClient::new(&config.translation)?;
    let translator = BatchTranslator::new(client, BatchSettings::from(&config.translation));
    let pipeline = Pipeline::new(translator)?;

    let output = pipeline.run(records, &mut cache).await?;

    let rows_written = export_rows(&config.output.path, config.output.layout, &output.rows)?;
    tracing::info!(
        run_id = %output.run_id,
        path = %config.output.path.display(),
        rows = rows_written,
        "Export written"
    );

    Ok(RunSummary {
        output,
        output_path: config.output.path.clone(),
        rows_written,
        cache_entries: cache.len(),
    })
}
