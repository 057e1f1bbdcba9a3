//! Name handling: cleaning registered names and spotting new variants

pub mod alias;
pub mod normalizer;

pub use alias::AliasDetector;
pub use normalizer::{derive_additional_names, NameNormalizer};
