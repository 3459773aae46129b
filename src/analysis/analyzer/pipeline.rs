//! Pipeline analyzer that combines char filters, a tokenizer and filters.
//!
//! This is the main building block for custom analyzers.
//!
//! # Architecture
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: Normalize raw text, recording every rewrite
//! 2. Tokenizer: Splits the normalized text into tokens
//! 3. Token Filters: Applied sequentially in the order they were added
//! 4. Offset correction: Token offsets are mapped back onto the raw text
//!
//! Char filters run over the whole document before tokenization. For
//! incremental normalization without a tokenizer, use the char-level
//! iterator of the iteration mark filter directly.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::analyzer::analyzer::Analyzer;
//! use kotodama::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use kotodama::analysis::char_filter::japanese_iteration_mark::JapaneseIterationMarkCharFilter;
//! use kotodama::analysis::token_filter::reading_form::ReadingFormFilter;
//! use kotodama::analysis::tokenizer::lexicon::LexiconTokenizer;
//! use std::sync::Arc;
//!
//! let tokenizer = LexiconTokenizer::from_csv("時時,名詞-副詞可能,時時,トキドキ").unwrap();
//! let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
//!     .add_char_filter(Arc::new(JapaneseIterationMarkCharFilter::default()))
//!     .add_filter(Arc::new(ReadingFormFilter::new().use_romaji(true)));
//!
//! let tokens: Vec<_> = analyzer.analyze("時々").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "tokidoki");
//! assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 6));
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::{CharFilter, Transformation, correct_offset};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The configured name of this pipeline.
    pub fn analyzer_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Run only the char filter stage.
    pub fn normalize(&self, text: &str) -> String {
        self.apply_char_filters(text).0
    }

    /// Analyze many documents in parallel, preserving input order.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<Token>>>
    where
        S: AsRef<str> + Sync,
    {
        log::debug!("analyzing {} documents with {}", texts.len(), self.name);
        texts
            .par_iter()
            .map(|text| Ok(self.analyze(text.as_ref())?.collect()))
            .collect()
    }

    fn apply_char_filters(&self, text: &str) -> (String, Vec<Vec<Transformation>>) {
        let mut filtered_text = text.to_string();
        let mut filter_transformations = Vec::with_capacity(self.char_filters.len());

        for char_filter in &self.char_filters {
            let (new_text, transformations) = char_filter.filter(&filtered_text);
            filtered_text = new_text;
            filter_transformations.push(transformations);
        }

        (filtered_text, filter_transformations)
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let (filtered_text, filter_transformations) = self.apply_char_filters(text);
        log::trace!(
            "{}: {} bytes in, {} bytes after char filters",
            self.name,
            text.len(),
            filtered_text.len()
        );

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        if filter_transformations.iter().all(|t| t.is_empty()) {
            return Ok(tokens);
        }

        // Map from the last char filter's output back to the raw text.
        Ok(Box::new(tokens.map(move |mut token| {
            for transformations in filter_transformations.iter().rev() {
                token.start_offset = correct_offset(token.start_offset, transformations);
                token.end_offset = correct_offset(token.end_offset, transformations);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::japanese_iteration_mark::{
        IterationMarkMode, JapaneseIterationMarkCharFilter,
    };
    use crate::analysis::token::positions;
    use crate::analysis::token_filter::katakana_stem::KatakanaStemFilter;
    use crate::analysis::token_filter::part_of_speech::PartOfSpeechStopFilter;
    use crate::analysis::tokenizer::lexicon::LexiconTokenizer;

    const MIXED: &str = "ところゞゝゝ、ジヾが、時々、馬鹿々々しい";

    fn analyzer(mode: IterationMarkMode) -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(LexiconTokenizer::new()))
            .add_char_filter(Arc::new(JapaneseIterationMarkCharFilter::new(mode)))
    }

    #[test]
    fn test_pipeline_normalizes_before_tokenizing() {
        let tokens: Vec<Token> = analyzer(IterationMarkMode::NormalizeAll)
            .analyze(MIXED)
            .unwrap()
            .collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["ところどころ", "ジジ", "が", "時時", "馬鹿馬鹿", "しい"]
        );
    }

    #[test]
    fn test_offsets_point_into_original_text() {
        for mode in [
            IterationMarkMode::NormalizeKanji,
            IterationMarkMode::NormalizeKana,
            IterationMarkMode::NormalizeAll,
        ] {
            let tokens: Vec<Token> = analyzer(mode).analyze(MIXED).unwrap().collect();
            let mut previous_end = 0;
            for token in &tokens {
                assert!(token.start_offset <= token.end_offset);
                assert!(token.start_offset >= previous_end);
                assert!(token.end_offset <= MIXED.len());
                assert!(MIXED.is_char_boundary(token.start_offset));
                assert!(MIXED.is_char_boundary(token.end_offset));
                previous_end = token.end_offset;
            }
            assert_eq!(&MIXED[tokens[0].start_offset..tokens[0].end_offset], "ところゞゝゝ");
        }
    }

    #[test]
    fn test_offset_correction_with_length_change() {
        // 々 is 3 bytes, its source 𠀋 is 4.
        let tokens: Vec<Token> = analyzer(IterationMarkMode::NormalizeKanji)
            .analyze("𠀋々です")
            .unwrap()
            .collect();
        assert_eq!(tokens[0].text, "𠀋𠀋");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 7));
        assert_eq!(tokens[1].text, "です");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 13));
    }

    #[test]
    fn test_position_increments_are_conserved() {
        let tokenizer = LexiconTokenizer::from_csv(
            "私,名詞-代名詞-一般,私,ワタシ\n\
             は,助詞-係助詞,は,ハ\n\
             制限,名詞-サ変接続,制限,セイゲン\n\
             スピード,名詞-一般,スピード,スピード\n\
             を,助詞-格助詞-一般,を,ヲ\n\
             超える,動詞-自立,超える,コエル",
        )
        .unwrap();
        let text = "私は制限スピードを超える";
        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(PartOfSpeechStopFilter::new()))
            .add_filter(Arc::new(KatakanaStemFilter::new()));

        let tokens: Vec<Token> = analyzer.analyze(text).unwrap().collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["私", "制限", "スピード", "超える"]);
        // Surviving tokens keep the positions they had before filtering.
        assert_eq!(positions(&tokens), vec![0, 2, 3, 5]);
    }

    #[test]
    fn test_analyze_batch_preserves_order() {
        let analyzer = analyzer(IterationMarkMode::NormalizeAll);
        let texts: Vec<String> = (0..64)
            .map(|i| if i % 2 == 0 { "時々".to_string() } else { "ジヾ".to_string() })
            .collect();
        let results = analyzer.analyze_batch(&texts).unwrap();
        assert_eq!(results.len(), 64);
        for (i, tokens) in results.iter().enumerate() {
            let expected = if i % 2 == 0 { "時時" } else { "ジジ" };
            assert_eq!(tokens[0].text, expected);
        }
    }

    #[test]
    fn test_concurrent_analyze_matches_sequential() {
        let analyzer = Arc::new(analyzer(IterationMarkMode::NormalizeAll));
        let expected: Vec<Token> = analyzer.analyze(MIXED).unwrap().collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let analyzer = Arc::clone(&analyzer);
                std::thread::spawn(move || analyzer.analyze(MIXED).unwrap().collect::<Vec<Token>>())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_normalize_only() {
        assert_eq!(
            analyzer(IterationMarkMode::NormalizeKana).normalize(MIXED),
            "ところどころ、ジジが、時々、馬鹿々々しい"
        );
    }

    #[test]
    fn test_streaming_normalization_matches_pipeline() {
        let filter = JapaneseIterationMarkCharFilter::default();
        let streamed: String = filter.normalize_chars(MIXED.chars()).map(|c| c.ch).collect();
        assert_eq!(
            streamed,
            analyzer(IterationMarkMode::NormalizeAll).normalize(MIXED)
        );
    }

    #[test]
    fn test_pipeline_names() {
        let analyzer = analyzer(IterationMarkMode::NormalizeAll).with_name("ja");
        assert_eq!(analyzer.name(), "pipeline");
        assert_eq!(analyzer.analyzer_name(), "ja");
        assert_eq!(analyzer.char_filters().len(), 1);
        assert!(analyzer.filters().is_empty());
    }
}
