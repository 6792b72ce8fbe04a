use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One product as published by the feed.
///
/// `history` is kept as raw JSON: a missing, non-array or partially broken
/// history must not fail decoding of the whole feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, rename = "quantity", deserialize_with = "lenient_f64")]
    pub declared_quantity: Option<f64>,
    #[serde(default)]
    pub history: JsonValue,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            declared_quantity: None,
            history: JsonValue::Null,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.declared_quantity = Some(quantity);
        self
    }

    pub fn with_history(mut self, history: JsonValue) -> Self {
        self.history = history;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub day_since_epoch: i64,
}

impl PricePoint {
    /// Accepts an entry only when both `price` and `daySinceEpoch` are numbers.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        let entry = value.as_object()?;
        let price = entry.get("price")?.as_f64()?;
        let day = entry.get("daySinceEpoch")?;
        let day_since_epoch = day.as_i64().or_else(|| {
            day.as_f64()
                .filter(|d| d.fract() == 0.0 && d.is_finite())
                .map(|d| d as i64)
        })?;

        Some(Self {
            price,
            day_since_epoch,
        })
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => s,
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(value.as_f64())
}
