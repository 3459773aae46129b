//! Part-of-speech stop filter implementation.
//!
//! Removes tokens whose part-of-speech tag is in a stop set. Tags are
//! matched as whole strings: listing "助詞" does not remove
//! "助詞-格助詞-一般". Tokens that carry no tag are always kept.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//! use kotodama::analysis::token_filter::Filter;
//! use kotodama::analysis::token_filter::part_of_speech::PartOfSpeechStopFilter;
//!
//! let filter = PartOfSpeechStopFilter::from_tags(vec!["助詞-係助詞"]);
//! let tokens = vec![
//!     Token::new("私").with_part_of_speech("名詞-代名詞-一般"),
//!     Token::new("は").with_part_of_speech("助詞-係助詞"),
//!     Token::new("制限").with_part_of_speech("名詞-サ変接続"),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "制限");
//! assert_eq!(result[1].position_increment, 2);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::filtering::filtering;
use crate::error::Result;

/// Default stop tags (IPADIC tag set): particles, auxiliary verbs,
/// conjunctions, symbols, fillers and non-verbal sounds.
const DEFAULT_STOP_TAGS: &[&str] = &[
    "接続詞",
    "助詞",
    "助詞-格助詞",
    "助詞-格助詞-一般",
    "助詞-格助詞-引用",
    "助詞-格助詞-連語",
    "助詞-接続助詞",
    "助詞-係助詞",
    "助詞-副助詞",
    "助詞-間投助詞",
    "助詞-並立助詞",
    "助詞-終助詞",
    "助詞-副助詞／並立助詞／終助詞",
    "助詞-連体化",
    "助詞-副詞化",
    "助詞-特殊",
    "助動詞",
    "記号",
    "記号-一般",
    "記号-読点",
    "記号-句点",
    "記号-空白",
    "記号-括弧開",
    "記号-括弧閉",
    "その他-間投",
    "フィラー",
    "非言語音",
];

/// Default stop tags as a HashSet.
pub static DEFAULT_STOP_TAGS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| DEFAULT_STOP_TAGS.iter().map(|&s| s.to_string()).collect());

/// A filter that removes tokens by part-of-speech tag.
#[derive(Clone, Debug)]
pub struct PartOfSpeechStopFilter {
    stop_tags: Arc<HashSet<String>>,
    enable_position_increments: bool,
}

impl PartOfSpeechStopFilter {
    /// Create a filter with the default stop tags.
    pub fn new() -> Self {
        Self::with_stop_tags(DEFAULT_STOP_TAGS_SET.clone())
    }

    /// Create a filter with a custom set of stop tags.
    pub fn with_stop_tags(stop_tags: HashSet<String>) -> Self {
        PartOfSpeechStopFilter {
            stop_tags: Arc::new(stop_tags),
            enable_position_increments: true,
        }
    }

    /// Create a filter from a list of stop tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_tags(tags.into_iter().map(|s| s.into()).collect())
    }

    /// Set whether removed tokens hand their position increment to the next
    /// surviving token (default: true).
    pub fn enable_position_increments(mut self, enable: bool) -> Self {
        self.enable_position_increments = enable;
        self
    }

    /// Check if a tag is in the stop set.
    pub fn is_stop_tag(&self, tag: &str) -> bool {
        self.stop_tags.contains(tag)
    }

    /// Get the number of stop tags.
    pub fn len(&self) -> usize {
        self.stop_tags.len()
    }

    /// Check if the stop set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_tags.is_empty()
    }
}

impl Default for PartOfSpeechStopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for PartOfSpeechStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.stop_tags.is_empty() {
            return Ok(tokens);
        }
        let stop_tags = Arc::clone(&self.stop_tags);
        Ok(filtering(
            tokens,
            move |token| token.part_of_speech().is_none_or(|tag| !stop_tags.contains(tag)),
            self.enable_position_increments,
        ))
    }

    fn name(&self) -> &'static str {
        "kuromoji_part_of_speech"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn sentence() -> Vec<Token> {
        // 私は制限スピードを超える。
        vec![
            Token::with_offsets("私", 0, 3).with_part_of_speech("名詞-代名詞-一般"),
            Token::with_offsets("は", 3, 6).with_part_of_speech("助詞-係助詞"),
            Token::with_offsets("制限", 6, 12).with_part_of_speech("名詞-サ変接続"),
            Token::with_offsets("スピード", 12, 24).with_part_of_speech("名詞-一般"),
            Token::with_offsets("を", 24, 27).with_part_of_speech("助詞-格助詞-一般"),
            Token::with_offsets("超える", 27, 36).with_part_of_speech("動詞-自立"),
            Token::with_offsets("。", 36, 39).with_part_of_speech("記号-句点"),
        ]
    }

    #[test]
    fn test_removes_stop_tags() {
        let filter = PartOfSpeechStopFilter::from_tags(vec!["動詞-自立"]);
        let result: Vec<Token> = filter
            .filter(Box::new(sentence().into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["私", "は", "制限", "スピード", "を", "。"]);
        assert_eq!(result[5].position_increment, 2);
    }

    #[test]
    fn test_default_tags() {
        let filter = PartOfSpeechStopFilter::new();
        let result: Vec<Token> = filter
            .filter(Box::new(sentence().into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["私", "制限", "スピード", "超える"]);
        let increments: Vec<usize> = result.iter().map(|t| t.position_increment).collect();
        assert_eq!(increments, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_exact_match_only() {
        let filter = PartOfSpeechStopFilter::from_tags(vec!["助詞"]);
        let result: Vec<Token> = filter
            .filter(Box::new(sentence().into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn test_position_increments_disabled() {
        let filter = PartOfSpeechStopFilter::new().enable_position_increments(false);
        let result: Vec<Token> = filter
            .filter(Box::new(sentence().into_iter()))
            .unwrap()
            .collect();
        assert!(result.iter().all(|t| t.position_increment == 1));
    }

    #[test]
    fn test_untagged_tokens_are_kept() {
        let filter = PartOfSpeechStopFilter::new();
        let tokens = vec![Token::new("foo")];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_set_passes_through() {
        let filter = PartOfSpeechStopFilter::with_stop_tags(HashSet::new());
        assert!(filter.is_empty());
        let result: Vec<Token> = filter
            .filter(Box::new(sentence().into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result, sentence());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(PartOfSpeechStopFilter::new().name(), "kuromoji_part_of_speech");
    }
}
