//! Core analyzer trait definition.
//!
//! This module defines the [`Analyzer`] trait, the main interface for text
//! analysis in Kotodama. Analyzers combine char filters, a tokenizer and
//! token filters to transform raw text into index terms.
//!
//! # Role in Analysis Pipeline
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Index
//!             ↓
//!         Char Filters (iteration marks)
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 .. Filter N
//!             ↓
//!         Offset correction
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Custom char filter + tokenizer + filter chains
//! - [`JapaneseAnalyzer`](super::language::japanese::JapaneseAnalyzer) - The default Japanese chain
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use kotodama::analysis::analyzer::analyzer::Analyzer;
//! use kotodama::analysis::token::TokenStream;
//! use kotodama::error::Result;
//!
//! struct MyAnalyzer;
//!
//! impl Analyzer for MyAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "my_analyzer"
//!     }
//!
//!     fn as_any(&self) -> &dyn std::any::Any {
//!         self
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// # Thread Safety
///
/// The trait requires `Send + Sync`: one analyzer is built once and then
/// shared by any number of concurrent `analyze` calls. Each call owns the
/// stream it returns.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// Token offsets refer to byte positions in `text`, before any char
    /// filter was applied.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}
