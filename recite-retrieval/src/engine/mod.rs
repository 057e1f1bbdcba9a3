//! Retrieval engine
//!
//! - `orchestrator`: one retrieval pass for one identity
//! - `driver`: bounded fan-out over a batch of identities
//! - `accumulator`: insert-if-absent merge of strategy results
//! - `cross_source`: primary/secondary source reconciliation

pub mod accumulator;
pub mod cross_source;
pub mod driver;
pub mod orchestrator;

pub use accumulator::ResultAccumulator;
pub use cross_source::{CrossSourceResolver, Reconciliation};
pub use driver::RetrievalDriver;
pub use orchestrator::{PassSummary, RetrievalOrchestrator};
