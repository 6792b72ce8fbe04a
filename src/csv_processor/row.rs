use crate::utils::{sanitize_cell, OutputLayout};
use serde::{Deserialize, Serialize};

/// One exported product line. `unit_price` and `url` only appear in the
/// extended layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub translated_name: String,
    pub name: String,
    #[serde(default)]
    pub unit_price: Option<f64>,
    pub current_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub price_gap: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl OutputLayout {
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            OutputLayout::Basic => &[
                "translated_name",
                "name",
                "current_price",
                "min_price",
                "max_price",
                "price_gap",
            ],
            OutputLayout::Extended => &[
                "translated_name",
                "name",
                "unit_price",
                "current_price",
                "min_price",
                "max_price",
                "price_gap",
                "url",
            ],
        }
    }
}

fn price_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputRow {
    /// Cells in header order for `layout`. Text cells are sanitized, missing
    /// prices are left empty.
    pub fn cells(&self, layout: OutputLayout) -> Vec<String> {
        let mut cells = vec![sanitize_cell(&self.translated_name), sanitize_cell(&self.name)];

        if layout == OutputLayout::Extended {
            cells.push(price_cell(self.unit_price));
        }

        cells.extend([
            price_cell(self.current_price),
            price_cell(self.min_price),
            price_cell(self.max_price),
            price_cell(self.price_gap),
        ]);

        if layout == OutputLayout::Extended {
            cells.push(sanitize_cell(self.url.as_deref().unwrap_or_default()));
        }

        cells
    }
}
