//! # Recite Common Library
//!
//! Shared code for the recite retrieval services including:
//! - Identity and bibliographic record models
//! - Common error type
//! - TOML configuration loading
//! - Logging bootstrap
//! - SQLite pool and table initialization

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod logging;
pub mod model;

pub use error::{Error, Result};
