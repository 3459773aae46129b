//! Stop word filter implementation.
//!
//! Removes tokens whose text is in a stop word set. Matching is exact and
//! case-sensitive; normalize tokens beforehand if needed. This is lexical
//! stopping, as opposed to the grammatical stopping done by
//! [`PartOfSpeechStopFilter`](super::part_of_speech::PartOfSpeechStopFilter).
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//! use kotodama::analysis::token_filter::Filter;
//! use kotodama::analysis::token_filter::stop::JapaneseStopFilter;
//!
//! let filter = JapaneseStopFilter::japanese();
//! let tokens = vec![Token::new("これ"), Token::new("は"), Token::new("本")];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "本");
//! assert_eq!(result[0].position_increment, 3);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::filtering::filtering;
use crate::error::Result;

/// Name of the built-in Japanese list in `stopwords` settings.
pub const JAPANESE_STOP_WORDS_NAME: &str = "_japanese_";

const DEFAULT_JAPANESE_STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も", "する",
    "から", "な", "こと", "として", "い", "や", "れる", "など", "なっ", "ない", "この", "ため", "その", "あっ",
    "よう", "また", "もの", "という", "あり", "まで", "られ", "なる", "へ", "か", "だ", "これ", "によって", "により",
    "おり", "より", "による", "ず", "なり", "られる", "において", "ば", "なかっ", "なく", "しかし", "について", "せ",
    "だっ", "その後", "できる", "それ", "う", "ので", "なお", "のみ", "でき", "き", "つ", "における", "および", "いう",
    "さらに", "でも", "ら", "たり", "その他", "に関する", "たち", "ます", "ん", "なら", "に対して", "特に", "せる",
    "及び", "これら", "とき", "では", "にて", "ほか", "ながら", "うち", "そして", "とともに", "ただし", "かつて", "それぞれ",
    "または", "お", "ほど", "ものの", "に対する", "ほとんど", "と共に", "といった", "です", "とも", "ところ", "ここ",
];

/// Default Japanese stop words as a HashSet.
pub static DEFAULT_JAPANESE_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_JAPANESE_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug)]
pub struct JapaneseStopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
    /// Whether removed tokens hand their increment to the next token
    enable_position_increments: bool,
}

impl JapaneseStopFilter {
    /// Create a new stop filter with an empty stop word set.
    pub fn new() -> Self {
        Self::with_stop_words(HashSet::new())
    }

    /// Create a new stop filter with the built-in Japanese stop words.
    pub fn japanese() -> Self {
        Self::with_stop_words(DEFAULT_JAPANESE_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        JapaneseStopFilter {
            stop_words: Arc::new(stop_words),
            enable_position_increments: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Set whether removed tokens hand their position increment to the next
    /// surviving token (default: true).
    pub fn enable_position_increments(mut self, enable: bool) -> Self {
        self.enable_position_increments = enable;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for JapaneseStopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for JapaneseStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.stop_words.is_empty() {
            return Ok(tokens);
        }
        let stop_words = Arc::clone(&self.stop_words);
        Ok(filtering(
            tokens,
            move |token| !stop_words.contains(token.text.as_str()),
            self.enable_position_increments,
        ))
    }

    fn name(&self) -> &'static str {
        "ja_stop"
    }
}
