//! Phone-number enrichment: search strategies per record, run in
//! checkpointed batches.

pub mod batch;
pub mod error;
pub mod search;
pub mod strategy;

pub use batch::{run_batches, BatchOptions, BatchOutcome};
pub use error::EnrichError;
pub use search::{DuckDuckGoBackend, SearchBackend, SearchResult};
pub use strategy::{build_queries, find_phone, PhoneLookup};
