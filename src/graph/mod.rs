pub mod entity;
pub mod sentence;
pub mod triple;

// Re-export the aggregator for convenience
pub use crate::graph::sentence::SentenceEntityAggregator;
