use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub translation: TranslationConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout_seconds: u64,
    pub batch_size: usize,
    pub delimiter: String,
    pub batch_delay_ms: u64,
    pub session_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub layout: OutputLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Column set of the exported CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    #[default]
    Basic,
    Extended,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://product.grocermatic.org/cleanProductInfo.json".to_string(),
            timeout_seconds: 30,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            source_lang: "en".to_string(),
            target_lang: "zh-CN".to_string(),
            timeout_seconds: 30,
            batch_size: 20,
            delimiter: " ||| ".to_string(),
            batch_delay_ms: 1000,
            session_limit: 30000,
        }
    }
}

impl TranslationConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("translation_cache.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("processed_data.csv"),
            layout: OutputLayout::Basic,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> crate::utils::errors::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::utils::errors::ScoutError::ConfigError(e.to_string()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::utils::errors::ScoutError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Missing file means defaults; a file that exists but does not parse is an error.
    pub fn load_or_default(path: Option<&str>) -> crate::utils::errors::Result<Self> {
        match path {
            Some(p) if std::path::Path::new(p).exists() => Self::load_from_file(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> crate::utils::errors::Result<()> {
        if self.translation.batch_size == 0 {
            return Err(crate::utils::errors::ScoutError::ConfigError(
                "translation.batch_size must be at least 1".to_string(),
            ));
        }
        if self.translation.delimiter.trim().is_empty() {
            return Err(crate::utils::errors::ScoutError::ConfigError(
                "translation.delimiter must contain a non-whitespace token".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [translation]
            batch_size = 15
            batch_delay_ms = 500

            [output]
            layout = "extended"
            "#,
        )
        .unwrap();

        assert_eq!(config.translation.batch_size, 15);
        assert_eq!(config.translation.batch_delay(), Duration::from_millis(500));
        assert_eq!(config.translation.delimiter, " ||| ");
        assert_eq!(config.translation.session_limit, 30000);
        assert_eq!(config.output.layout, OutputLayout::Extended);
        assert_eq!(config.cache.path, PathBuf::from("translation_cache.json"));
        assert_eq!(config.feed.timeout_seconds, 30);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.toml");
        std::fs::write(&path, "[translation]\nbatch_size = 0\n").unwrap();

        let err = AppConfig::load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let config = AppConfig::load_or_default(path.to_str()).unwrap();
        assert_eq!(config.output.layout, OutputLayout::Basic);
    }
}
