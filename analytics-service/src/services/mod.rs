pub mod aggregator;
pub mod normalizer;
pub mod prompt;
pub mod providers;

pub use aggregator::{DataAggregator, SystemSnapshot};
