pub mod aggregator;
pub mod supply;

pub use aggregator::Aggregation;
pub use aggregator::TransferAggregator;
pub use supply::SupplyLookup;
