//! Amount extraction and aggregation.

mod aggregator;
pub mod rules;

pub use aggregator::{aggregate, Aggregate, Aggregator};
