use crate::feed::PricePoint;
use crate::utils::round2;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Price statistics of one product. All four fields are `None` together when
/// the history holds no usable point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceStats {
    pub current_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub price_gap: Option<f64>,
}

impl PriceStats {
    pub fn is_empty(&self) -> bool {
        self.current_price.is_none()
    }
}

pub fn valid_points(history: &JsonValue) -> Vec<PricePoint> {
    match history.as_array() {
        Some(entries) => entries.iter().filter_map(PricePoint::from_value).collect(),
        None => Vec::new(),
    }
}

pub fn reduce_history(history: &JsonValue) -> PriceStats {
    reduce_points(&valid_points(history))
}

/// The current price is taken from the latest day; among points sharing the
/// latest day, the first one in input order wins.
pub fn reduce_points(points: &[PricePoint]) -> PriceStats {
    let Some(first) = points.first() else {
        return PriceStats::default();
    };

    let mut latest = first;
    let mut min_price = first.price;
    let mut max_price = first.price;

    for point in &points[1..] {
        if point.day_since_epoch > latest.day_since_epoch {
            latest = point;
        }
        min_price = min_price.min(point.price);
        max_price = max_price.max(point.price);
    }

    let current_price = latest.price;

    PriceStats {
        current_price: Some(current_price),
        min_price: Some(min_price),
        max_price: Some(max_price),
        price_gap: Some(round2(current_price - min_price)),
    }
}
