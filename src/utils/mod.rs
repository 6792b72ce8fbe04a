pub mod config;
pub mod errors;

pub use config::{
    AppConfig, CacheConfig, FeedConfig, LoggingConfig, OutputConfig, OutputLayout,
    TranslationConfig,
};
pub use errors::{BatchFailure, Result, ScoutError};

const FORMULA_LEADS: [char; 5] = ['=', '+', '-', '@', '\''];

/// Prefixes a `'` to text a spreadsheet would treat as a formula. A value that
/// already starts with `'` is prefixed too, so [`unsanitize_cell`] is exact.
pub fn sanitize_cell(value: &str) -> String {
    if value.starts_with(FORMULA_LEADS) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Inverse of [`sanitize_cell`].
pub fn unsanitize_cell(value: &str) -> String {
    match value.strip_prefix('\'') {
        Some(rest) if rest.starts_with(FORMULA_LEADS) => rest.to_string(),
        _ => value.to_string(),
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
