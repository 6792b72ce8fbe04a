use crate::feed::ProductRecord;
use crate::pricing::history::PriceStats;
use crate::utils::{round2, Result};
use regex::Regex;
use serde::Serialize;

const WEIGHT_PATTERN: &str = r"([0-9]+\.?[0-9]*)\s*(kg|g|l|ml)\b";

/// Weight used when neither the text nor the feed quantity gives one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitStats {
    /// Kilograms or litres, always > 0.
    pub weight: f64,
    pub unit_price: Option<f64>,
}

pub struct UnitNormalizer {
    pattern: Regex,
}

impl UnitNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(WEIGHT_PATTERN)?,
        })
    }

    /// First `<number><unit>` token in the lowercased text, in kg or l.
    pub fn parse_weight(&self, text: &str) -> Option<f64> {
        let lowered = text.to_lowercase();
        let captures = self.pattern.captures(&lowered)?;
        let value: f64 = captures.get(1)?.as_str().parse().ok()?;

        match captures.get(2)?.as_str() {
            "g" | "ml" => Some(value / 1000.0),
            _ => Some(value),
        }
    }

    pub fn weight(&self, name: &str, url: &str, declared_quantity: Option<f64>) -> f64 {
        let search_text = format!("{} {}", name, url);

        if let Some(parsed) = self.parse_weight(&search_text).filter(|w| *w > 0.0) {
            return parsed;
        }

        match declared_quantity {
            Some(quantity) if quantity > 0.0 && quantity.is_finite() => quantity,
            _ => DEFAULT_WEIGHT,
        }
    }

    pub fn normalize(&self, record: &ProductRecord, stats: &PriceStats) -> UnitStats {
        let weight = self.weight(&record.name, &record.url, record.declared_quantity);
        UnitStats {
            weight,
            unit_price: stats.current_price.map(|price| round2(price / weight)),
        }
    }
}
