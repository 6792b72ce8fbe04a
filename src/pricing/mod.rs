pub mod history;
pub mod unit;

pub use history::{reduce_history, reduce_points, valid_points, PriceStats};
pub use unit::{UnitNormalizer, UnitStats, DEFAULT_WEIGHT};
