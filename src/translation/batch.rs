use crate::translation::cache::TranslationCache;
use crate::translation::client::Translate;
use crate::utils::{BatchFailure, Result, ScoutError, TranslationConfig};
use indexmap::IndexMap;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub batch_size: usize,
    pub delimiter: String,
    pub delay: Duration,
    /// Successful translations allowed per run before remaining batches are skipped.
    pub session_limit: usize,
}

impl From<&TranslationConfig> for BatchSettings {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            delimiter: config.delimiter.clone(),
            delay: config.batch_delay(),
            session_limit: config.session_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Translated(usize),
    Failed(BatchFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub batches_attempted: usize,
    pub batches_succeeded: usize,
    pub batches_failed: usize,
    pub names_translated: usize,
    /// Names still without a translation after this run, flagged ones included.
    pub names_pending: usize,
    /// Names containing the batch delimiter; never sent upstream.
    pub flagged: Vec<String>,
    pub limit_reached: bool,
    pub outcomes: Vec<BatchOutcome>,
}

/// Translates names in delimiter-joined batches, one upstream call per batch.
pub struct BatchTranslator<T: Translate> {
    translator: T,
    settings: BatchSettings,
}

impl<T: Translate> BatchTranslator<T> {
    pub fn new(translator: T, settings: BatchSettings) -> Self {
        Self {
            translator,
            settings,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    fn split_token(&self) -> &str {
        self.settings.delimiter.trim()
    }

    pub fn join_batch(&self, names: &[String]) -> String {
        names.join(&self.settings.delimiter)
    }

    /// Splits on the bare delimiter token so spacing changes made upstream
    /// do not matter.
    pub fn split_segments(&self, translated: &str) -> Vec<String> {
        translated
            .split(self.split_token())
            .map(|segment| segment.trim().to_string())
            .collect()
    }

    /// Translates one batch. The batch is all-or-nothing: any upstream error or
    /// a segment count different from the name count is an error.
    pub async fn translate_batch(&self, names: &[String]) -> Result<IndexMap<String, String>> {
        if names.is_empty() {
            return Ok(IndexMap::new());
        }

        let combined = self.join_batch(names);
        let translated = self.translator.translate(&combined).await?;
        let segments = self.split_segments(&translated);

        if segments.len() != names.len() {
            return Err(ScoutError::SegmentMismatch {
                expected: names.len(),
                got: segments.len(),
            });
        }

        Ok(names.iter().cloned().zip(segments).collect())
    }

    /// Works through `pending` batch by batch, merging and persisting every
    /// accepted batch into `cache`. Only a failed persist aborts the run.
    pub async fn run(
        &self,
        pending: &[String],
        cache: &mut TranslationCache,
    ) -> Result<TranslationReport> {
        let mut report = TranslationReport::default();

        let token = self.split_token();
        let (batchable, flagged): (Vec<String>, Vec<String>) = pending
            .iter()
            .cloned()
            .partition(|name| !name.contains(token));

        for name in &flagged {
            warn!(name = %name, delimiter = %token, "Name contains the batch delimiter, not translating");
        }
        report.flagged = flagged;

        let batches: Vec<&[String]> = batchable.chunks(self.settings.batch_size).collect();
        let total_batches = batches.len();

        info!(
            names = batchable.len(),
            batches = total_batches,
            batch_size = self.settings.batch_size,
            "Starting batch translation"
        );

        for (index, batch) in batches.iter().enumerate() {
            if report.names_translated >= self.settings.session_limit {
                report.limit_reached = true;
                info!(
                    limit = self.settings.session_limit,
                    batches_skipped = total_batches - index,
                    "Reached session limit, leaving the rest for a later run"
                );
                break;
            }

            report.batches_attempted += 1;

            let outcome = match self.translate_batch(batch).await {
                Ok(results) => {
                    let inserted = cache.merge(results);
                    cache.persist()?;
                    info!(
                        batch = index + 1,
                        total = total_batches,
                        translated = inserted,
                        cached = cache.len(),
                        "Batch translated"
                    );
                    BatchOutcome::Translated(inserted)
                }
                Err(e) => {
                    let failure = BatchFailure::from(e);
                    warn!(
                        batch = index + 1,
                        total = total_batches,
                        names = batch.len(),
                        error = %failure,
                        "Batch discarded"
                    );
                    BatchOutcome::Failed(failure)
                }
            };

            match &outcome {
                BatchOutcome::Translated(count) => {
                    report.batches_succeeded += 1;
                    report.names_translated += count;
                }
                BatchOutcome::Failed(_) => report.batches_failed += 1,
            }
            report.outcomes.push(outcome);

            if index + 1 < total_batches && !self.settings.delay.is_zero() {
                tokio::time::sleep(self.settings.delay).await;
            }
        }

        report.names_pending = pending.len().saturating_sub(report.names_translated);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTranslator {
        responses: Mutex<VecDeque<Result<String>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedTranslator {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translate for ScriptedTranslator {
        async fn translate(&self, text: &str) -> Result<String> {
            self.requests.lock().unwrap().push(text.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ScoutError::Translation("script exhausted".to_string())))
        }
    }

    /// Prefixes every segment with `zh:`, keeping the delimiter.
    struct PrefixTranslator {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl Translate for PrefixTranslator {
        async fn translate(&self, text: &str) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            Ok(text
                .split(" ||| ")
                .map(|s| format!("zh:{}", s))
                .collect::<Vec<_>>()
                .join(" ||| "))
        }
    }

    fn settings(batch_size: usize, session_limit: usize) -> BatchSettings {
        BatchSettings {
            batch_size,
            delimiter: " ||| ".to_string(),
            delay: Duration::ZERO,
            session_limit,
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_call_per_batch_with_joined_names() {
        let translator = ScriptedTranslator::new(vec![Ok("牛奶 |||面包|||  鸡蛋 ".to_string())]);
        let batcher = BatchTranslator::new(translator, settings(20, 100));

        let result = batcher
            .translate_batch(&names(&["Milk", "Bread", "Eggs"]))
            .await
            .unwrap();

        assert_eq!(batcher.translator().requests(), vec!["Milk ||| Bread ||| Eggs"]);
        assert_eq!(result.get("Milk").map(String::as_str), Some("牛奶"));
        assert_eq!(result.get("Bread").map(String::as_str), Some("面包"));
        assert_eq!(result.get("Eggs").map(String::as_str), Some("鸡蛋"));
    }

    #[tokio::test]
    async fn segment_mismatch_discards_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let translator = ScriptedTranslator::new(vec![Ok("牛奶 ||| 面包".to_string())]);
        let batcher = BatchTranslator::new(translator, settings(20, 100));

        let report = batcher
            .run(&names(&["Milk", "Bread", "Eggs"]), &mut cache)
            .await
            .unwrap();

        assert!(cache.is_empty());
        assert!(!cache.path().exists(), "nothing to persist after a discarded batch");
        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.names_translated, 0);
        assert_eq!(report.names_pending, 3);
        assert_eq!(
            report.outcomes,
            vec![BatchOutcome::Failed(BatchFailure::SegmentMismatch {
                expected: 3,
                got: 2
            })]
        );
    }

    #[tokio::test]
    async fn upstream_error_skips_to_next_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let translator = ScriptedTranslator::new(vec![
            Err(ScoutError::Translation("429 Too Many Requests".to_string())),
            Ok("茶 ||| 咖啡".to_string()),
        ]);
        let batcher = BatchTranslator::new(translator, settings(2, 100));

        let report = batcher
            .run(&names(&["Milk", "Bread", "Tea", "Coffee"]), &mut cache)
            .await
            .unwrap();

        assert_eq!(batcher.translator().requests().len(), 2);
        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.batches_succeeded, 1);
        assert_eq!(cache.get("Tea"), Some("茶"));
        assert_eq!(cache.get("Milk"), None);
        assert!(matches!(
            report.outcomes[0],
            BatchOutcome::Failed(BatchFailure::Upstream(_))
        ));

        let on_disk = TranslationCache::load(cache.path()).unwrap();
        assert_eq!(on_disk.len(), 2);
    }

    #[tokio::test]
    async fn session_limit_stops_before_later_batches() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let translator = PrefixTranslator {
            calls: Mutex::new(0),
        };
        let batcher = BatchTranslator::new(translator, settings(2, 4));
        let pending = names(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);

        let report = batcher.run(&pending, &mut cache).await.unwrap();

        assert_eq!(*batcher.translator().calls.lock().unwrap(), 2);
        assert!(report.limit_reached);
        assert_eq!(report.batches_attempted, 2);
        assert_eq!(report.names_translated, 4);
        assert_eq!(report.names_pending, 6);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get("d"), Some("zh:d"));
        assert!(!cache.contains("e"));
    }

    #[tokio::test]
    async fn names_with_delimiter_are_flagged_not_sent() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let translator = PrefixTranslator {
            calls: Mutex::new(0),
        };
        let batcher = BatchTranslator::new(translator, settings(20, 100));

        let report = batcher
            .run(&names(&["Chips|||Salt", "Rice"]), &mut cache)
            .await
            .unwrap();

        assert_eq!(report.flagged, names(&["Chips|||Salt"]));
        assert_eq!(cache.get("Rice"), Some("zh:Rice"));
        assert!(!cache.contains("Chips|||Salt"));
        assert_eq!(report.names_pending, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_separates_batches_but_not_the_last() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let translator = PrefixTranslator {
            calls: Mutex::new(0),
        };
        let batcher = BatchTranslator::new(
            translator,
            BatchSettings {
                delay: Duration::from_millis(100),
                ..settings(2, 100)
            },
        );

        let started = tokio::time::Instant::now();
        let report = batcher
            .run(&names(&["a", "b", "c", "d", "e"]), &mut cache)
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(report.batches_succeeded, 3);
        assert!(elapsed >= Duration::from_millis(200), "waited only {elapsed:?}");
        assert!(elapsed < Duration::from_millis(300), "waited after the last batch: {elapsed:?}");
    }

    #[tokio::test]
    async fn failed_persist_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut cache = TranslationCache::empty(blocker.join("cache.json"));
        let translator = PrefixTranslator {
            calls: Mutex::new(0),
        };
        let batcher = BatchTranslator::new(translator, settings(2, 100));

        let result = batcher.run(&names(&["a", "b", "c", "d"]), &mut cache).await;

        assert!(result.is_err());
        assert_eq!(*batcher.translator().calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TranslationCache::empty(dir.path().join("cache.json"));
        let batcher = BatchTranslator::new(ScriptedTranslator::default(), settings(20, 100));

        let report = batcher.run(&[], &mut cache).await.unwrap();

        assert!(batcher.translator().requests().is_empty());
        assert_eq!(report, TranslationReport::default());
    }
}
