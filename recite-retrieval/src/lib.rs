//! # Recite Retrieval
//!
//! Finds the bibliographic records attributed to a researcher identity by
//! running a sequence of increasingly broad search strategies against a
//! primary record source, reconciling the results with a secondary source,
//! and recording name aliases spotted along the way.
//!
//! Record sources and stores are trait collaborators (see [`client`] and
//! [`store`]); this crate only builds queries and decides what to run.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod names;
pub mod store;
pub mod strategy;

pub use crate::client::{PubMedSource, RecordSources, ScopusSource, SearchHits};
pub use crate::config::RetrievalSettings;
pub use crate::engine::{PassSummary, RetrievalDriver, RetrievalOrchestrator};
pub use crate::error::{Result, RetrievalError};
pub use crate::store::{MemoryStore, SqliteStore, Stores};
pub use crate::strategy::{RetrievalStrategy, StrategyKind, StrategySet};
