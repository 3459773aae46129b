//! Text analysis module for Kotodama.
//!
//! This module provides Japanese text analysis: iteration mark normalization,
//! tokenization through a pluggable morphological tokenizer, token filters and
//! configuration-driven analysis pipelines.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::analyzer::analyzer::Analyzer;
//! use kotodama::analysis::analyzer::language::japanese::JapaneseAnalyzer;
//! use kotodama::analysis::tokenizer::lexicon::LexiconTokenizer;
//! use std::sync::Arc;
//!
//! let tokenizer = LexiconTokenizer::from_csv("コピー,名詞-サ変接続,コピー,コピー").unwrap();
//! let analyzer = JapaneseAnalyzer::new(Arc::new(tokenizer));
//! let tokens: Vec<_> = analyzer.analyze("コピー").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "コピー");
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod registry;
pub mod romanizer;
pub mod settings;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod word_list;
