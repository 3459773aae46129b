//! Language-specific analyzers.
//!
//! # Available Languages
//!
//! - [`japanese`] - Japanese text analysis over a pluggable morphological tokenizer

pub mod japanese;
