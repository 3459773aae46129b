//! # Kotodama
//!
//! Japanese text analysis components for search engines.
//!
//! ## Features
//!
//! - Iteration mark normalization (々, ゝ, ゞ, ヽ, ヾ) with offset correction
//! - Part-of-speech and stop word filtering with position increments
//! - Katakana and romaji reading forms
//! - Katakana long-vowel stemming
//! - Morphological analysis with Lindera and the IPADIC dictionary
//! - JSON configured analysis pipelines over a pluggable tokenizer

pub mod analysis;
pub mod cli;
pub mod error;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
