//! Lexicon-driven Japanese tokenizer.
//!
//! A small, deterministic tokenizer for test fixtures and closed vocabularies;
//! general text goes through [`LinderaTokenizer`](super::lindera::LinderaTokenizer). Text is
//! segmented by longest match against a user lexicon; stretches not covered
//! by the lexicon are grouped into unknown-word tokens by script. Whitespace
//! is never emitted and punctuation is dropped unless
//! [`LexiconTokenizer::discard_punctuation`] is turned off.
//!
//! # Lexicon format
//!
//! One entry per line, comma separated, `#` starts a comment line:
//!
//! ```text
//! # surface,part_of_speech,base_form,reading
//! 今夜,名詞-副詞可能,今夜,コンヤ
//! 話し,動詞-自立,話す,ハナシ
//! ```
//!
//! Empty `base_form` or `reading` fields mean the attribute is absent.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{KotodamaError, Result};
use crate::util::script::{is_hiragana, is_kanji, is_katakana, is_punctuation};

/// Part-of-speech tag of tokens not found in the lexicon.
pub const UNKNOWN_PART_OF_SPEECH: &str = "未知語";

/// Part-of-speech tag of punctuation tokens.
pub const SYMBOL_PART_OF_SPEECH: &str = "記号-一般";

/// A single lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub surface: String,
    pub part_of_speech: String,
    pub base_form: Option<String>,
    pub reading: Option<String>,
}

impl LexiconEntry {
    pub fn new<S: Into<String>, P: Into<String>>(surface: S, part_of_speech: P) -> Self {
        LexiconEntry {
            surface: surface.into(),
            part_of_speech: part_of_speech.into(),
            base_form: None,
            reading: None,
        }
    }

    pub fn with_base_form<S: Into<String>>(mut self, base_form: S) -> Self {
        self.base_form = Some(base_form.into());
        self
    }

    pub fn with_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = Some(reading.into());
        self
    }

    fn parse(line_number: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(KotodamaError::invalid_config(
                "lexicon",
                format!(
                    "line {line_number}: expected 4 fields \
                     (surface,part_of_speech,base_form,reading), found {}",
                    fields.len()
                ),
            ));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(KotodamaError::invalid_config(
                "lexicon",
                format!("line {line_number}: surface and part_of_speech must not be empty"),
            ));
        }
        let optional = |field: &str| (!field.is_empty()).then(|| field.to_string());
        Ok(LexiconEntry {
            surface: fields[0].to_string(),
            part_of_speech: fields[1].to_string(),
            base_form: optional(fields[2]),
            reading: optional(fields[3]),
        })
    }

    fn to_token(&self, start: usize, end: usize) -> Token {
        let mut token =
            Token::with_offsets(self.surface.as_str(), start, end).with_part_of_speech(&self.part_of_speech);
        token.base_form = self.base_form.clone();
        token.reading = self.reading.clone();
        token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Kanji,
    Hiragana,
    Katakana,
    Alphanumeric,
    Punctuation,
    Whitespace,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_punctuation(c) {
        CharClass::Punctuation
    } else if is_kanji(c) || matches!(c, '々' | '〆' | '〇' | '〻') {
        CharClass::Kanji
    } else if is_hiragana(c) {
        CharClass::Hiragana
    } else if is_katakana(c) {
        CharClass::Katakana
    } else if c.is_alphanumeric() {
        CharClass::Alphanumeric
    } else {
        CharClass::Other
    }
}

/// Longest-match tokenizer over a user lexicon.
#[derive(Debug, Clone)]
pub struct LexiconTokenizer {
    entries: HashMap<String, LexiconEntry>,
    max_entry_chars: usize,
    discard_punctuation: bool,
}

impl LexiconTokenizer {
    /// Create a tokenizer with an empty lexicon.
    pub fn new() -> Self {
        LexiconTokenizer {
            entries: HashMap::new(),
            max_entry_chars: 0,
            discard_punctuation: true,
        }
    }

    /// Create a tokenizer from lexicon entries. Later duplicates win.
    pub fn from_entries<I: IntoIterator<Item = LexiconEntry>>(entries: I) -> Self {
        let mut tokenizer = Self::new();
        for entry in entries {
            tokenizer.add_entry(entry);
        }
        tokenizer
    }

    /// Parse a lexicon in CSV form.
    pub fn from_csv(csv: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in csv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(LexiconEntry::parse(index + 1, line)?);
        }
        Ok(Self::from_entries(entries))
    }

    /// Load a lexicon CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let csv = fs::read_to_string(path.as_ref())?;
        let tokenizer = Self::from_csv(&csv)?;
        log::debug!(
            "loaded {} lexicon entries from {}",
            tokenizer.len(),
            path.as_ref().display()
        );
        Ok(tokenizer)
    }

    pub fn add_entry(&mut self, entry: LexiconEntry) {
        self.max_entry_chars = self.max_entry_chars.max(entry.surface.chars().count());
        self.entries.insert(entry.surface.clone(), entry);
    }

    /// Set whether punctuation is dropped (default: true).
    pub fn discard_punctuation(mut self, discard: bool) -> Self {
        self.discard_punctuation = discard;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest lexicon entry starting at char index `i`, with its length in chars.
    fn longest_match(&self, text: &str, boundaries: &[usize], i: usize) -> Option<(&LexiconEntry, usize)> {
        let available = boundaries.len() - 1 - i;
        (1..=self.max_entry_chars.min(available)).rev().find_map(|len| {
            self.entries
                .get(&text[boundaries[i]..boundaries[i + len]])
                .map(|entry| (entry, len))
        })
    }

    fn segment(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());

        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if let Some((entry, len)) = self.longest_match(text, &boundaries, i) {
                tokens.push(entry.to_token(boundaries[i], boundaries[i + len]));
                i += len;
                continue;
            }

            let class = classify(chars[i]);
            let mut end = i + 1;
            if class != CharClass::Punctuation {
                while end < chars.len()
                    && classify(chars[end]) == class
                    && self.longest_match(text, &boundaries, end).is_none()
                {
                    end += 1;
                }
            }

            let (start_byte, end_byte) = (boundaries[i], boundaries[end]);
            match class {
                CharClass::Whitespace => {}
                CharClass::Punctuation if self.discard_punctuation => {}
                CharClass::Punctuation => tokens.push(
                    Token::with_offsets(&text[start_byte..end_byte], start_byte, end_byte)
                        .with_part_of_speech(SYMBOL_PART_OF_SPEECH),
                ),
                _ => tokens.push(
                    Token::with_offsets(&text[start_byte..end_byte], start_byte, end_byte)
                        .with_part_of_speech(UNKNOWN_PART_OF_SPEECH),
                ),
            }
            i = end;
        }
        tokens
    }
}

impl Default for LexiconTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.segment(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
