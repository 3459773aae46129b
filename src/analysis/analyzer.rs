//! Analyzers that combine char filters, a tokenizer and token filters.

pub mod analyzer;
pub mod language;
pub mod pipeline;
