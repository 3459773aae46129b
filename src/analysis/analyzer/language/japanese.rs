//! Japanese language analyzer implementation.
//!
//! # Pipeline
//!
//! 1. Morphological tokenizer (any [`Tokenizer`])
//! 2. Base form filter
//! 3. Part-of-speech stop filter (default stop tags)
//! 4. Japanese stop word filter
//! 5. Katakana stem filter (minimum length 4)
//! 6. Lowercase filter
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::analyzer::analyzer::Analyzer;
//! use kotodama::analysis::analyzer::language::japanese::JapaneseAnalyzer;
//! use kotodama::analysis::tokenizer::lexicon::LexiconTokenizer;
//! use std::sync::Arc;
//!
//! let tokenizer = LexiconTokenizer::from_csv(
//!     "パーティー,名詞-一般,パーティー,パーティー\nに,助詞-格助詞-一般,に,ニ\n行く,動詞-自立,行く,イク",
//! ).unwrap();
//! let analyzer = JapaneseAnalyzer::new(Arc::new(tokenizer));
//! let tokens: Vec<_> = analyzer.analyze("パーティーに行く").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "パーティ");
//! assert_eq!(tokens[1].text, "行く");
//! ```

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::base_form::BaseFormFilter;
use crate::analysis::token_filter::katakana_stem::KatakanaStemFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::part_of_speech::PartOfSpeechStopFilter;
use crate::analysis::token_filter::stop::JapaneseStopFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Name under which the default Japanese chain is registered.
pub const JAPANESE_ANALYZER_NAME: &str = "kuromoji";

/// Analyzer for Japanese text.
///
/// Search-oriented defaults on top of a morphological tokenizer: inflected
/// forms are folded to their base form, function words are dropped by
/// grammatical category and by list, and loanword long-vowel variants are
/// unified.
pub struct JapaneseAnalyzer {
    inner: PipelineAnalyzer,
}

impl JapaneseAnalyzer {
    /// Create a Japanese analyzer on top of the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            inner: Self::pipeline(tokenizer),
        }
    }

    /// The default Japanese chain as a plain pipeline, for further extension.
    pub fn pipeline(tokenizer: Arc<dyn Tokenizer>) -> PipelineAnalyzer {
        PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(BaseFormFilter::new()))
            .add_filter(Arc::new(PartOfSpeechStopFilter::new()))
            .add_filter(Arc::new(JapaneseStopFilter::japanese()))
            .add_filter(Arc::new(KatakanaStemFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name(JAPANESE_ANALYZER_NAME)
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for JapaneseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "japanese"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Debug for JapaneseAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JapaneseAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
