pub mod client;
pub mod model;

pub use client::FeedClient;
pub use model::{PricePoint, ProductRecord};
