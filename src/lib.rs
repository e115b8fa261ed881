// Expose modules as public for use by other crates
pub mod error;
pub mod extraction;
pub mod graph;
pub mod input;
pub mod output;

// Re-export core types for convenience
pub use error::{InputError, UnknownEntityType};
pub use extraction::{ExtractionOptions, ExtractionReport, Extractor};
pub use graph::entity::{EntityType, OntologyClass, Predicate};
pub use graph::sentence::{
    AggregatorOptions, DedupPolicy, SentenceEntityAggregator, UnmappedPolicy,
};
pub use graph::triple::Triple;
