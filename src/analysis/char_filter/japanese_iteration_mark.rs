//! Japanese iteration mark normalization.
//!
//! Expands 々 (kanji), ゝ/ヽ (kana, unvoiced) and ゞ/ヾ (kana, voiced) into the
//! characters they repeat. A run of N marks repeats the N characters right
//! before it, so "馬鹿々々しい" becomes "馬鹿馬鹿しい" and "ところゞゝゝ"
//! becomes "ところどころ". When fewer characters precede the run than it
//! has marks, the leading marks repeat what is there and the rest repeat the
//! expanded text, so "時々々" becomes "時時時".
//!
//! The expansion is available as a pull-based iterator,
//! [`IterationMarkChars`], which needs at most [`MAX_ITERATION_MARK_SPAN`]
//! characters of lookback and lookahead. The [`CharFilter`] implementation is
//! built on top of it.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::char_filter::CharFilter;
//! use kotodama::analysis::char_filter::japanese_iteration_mark::{
//!     IterationMarkMode, JapaneseIterationMarkCharFilter,
//! };
//!
//! let filter = JapaneseIterationMarkCharFilter::new(IterationMarkMode::NormalizeKana);
//! let (text, _) = filter.filter("ところゞゝゝ、時々");
//! assert_eq!(text, "ところどころ、時々");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CharFilter, Transformation};
use crate::error::KotodamaError;
use crate::util::script::{is_hiragana, is_kanji, is_katakana};

const KANJI_ITERATION_MARK: char = '々';
const HIRAGANA_ITERATION_MARK: char = 'ゝ';
const HIRAGANA_DAKUON_ITERATION_MARK: char = 'ゞ';
const KATAKANA_ITERATION_MARK: char = 'ヽ';
const KATAKANA_DAKUON_ITERATION_MARK: char = 'ヾ';

/// Longest run of marks expanded at once; also the lookback kept in memory.
/// Longer runs are handled in chunks of this size.
pub const MAX_ITERATION_MARK_SPAN: usize = 32;

/// Which iteration marks are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationMarkMode {
    /// Only 々.
    NormalizeKanji,
    /// Only ゝ ゞ ヽ ヾ.
    NormalizeKana,
    /// Every iteration mark, without checking the script of the antecedent.
    #[default]
    NormalizeAll,
}

impl IterationMarkMode {
    pub fn normalizes_kanji(self) -> bool {
        matches!(self, Self::NormalizeKanji | Self::NormalizeAll)
    }

    pub fn normalizes_kana(self) -> bool {
        matches!(self, Self::NormalizeKana | Self::NormalizeAll)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NormalizeKanji => "normalize_kanji",
            Self::NormalizeKana => "normalize_kana",
            Self::NormalizeAll => "normalize_all",
        }
    }
}

impl fmt::Display for IterationMarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IterationMarkMode {
    type Err = KotodamaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normalize_kanji" => Ok(Self::NormalizeKanji),
            "normalize_kana" => Ok(Self::NormalizeKana),
            "normalize_all" => Ok(Self::NormalizeAll),
            other => Err(KotodamaError::invalid_config(
                "mode",
                format!(
                    "unknown iteration mark mode '{other}', expected one of \
                     normalize_kanji, normalize_kana, normalize_all"
                ),
            )),
        }
    }
}

fn is_iteration_mark(c: char) -> bool {
    matches!(
        c,
        KANJI_ITERATION_MARK
            | HIRAGANA_ITERATION_MARK
            | HIRAGANA_DAKUON_ITERATION_MARK
            | KATAKANA_ITERATION_MARK
            | KATAKANA_DAKUON_ITERATION_MARK
    )
}

fn shift(c: char, delta: i32) -> char {
    char::from_u32((c as i32 + delta) as u32).unwrap_or(c)
}

fn hiragana_add_dakuon(c: char) -> char {
    let cp = c as u32;
    match cp {
        0x304b..=0x3062 if cp % 2 == 1 => shift(c, 1),
        0x3064..=0x3069 if cp % 2 == 0 => shift(c, 1),
        0x306f..=0x307d if cp % 3 == 0 => shift(c, 1),
        0x3046 => 'ゔ',
        _ => c,
    }
}

fn hiragana_remove_dakuon(c: char) -> char {
    let cp = c as u32;
    match cp {
        0x304b..=0x3062 if cp % 2 == 0 => shift(c, -1),
        0x3064..=0x3069 if cp % 2 == 1 => shift(c, -1),
        0x306f..=0x307d if cp % 3 == 1 => shift(c, -1),
        0x3094 => 'う',
        _ => c,
    }
}

fn katakana_add_dakuon(c: char) -> char {
    let cp = c as u32;
    match cp {
        0x30ab..=0x30c2 if cp % 2 == 1 => shift(c, 1),
        0x30c4..=0x30c9 if cp % 2 == 0 => shift(c, 1),
        0x30cf..=0x30dd if cp % 3 == 0 => shift(c, 1),
        0x30a6 => 'ヴ',
        0x30ef..=0x30f2 => shift(c, 8),
        _ => c,
    }
}

fn katakana_remove_dakuon(c: char) -> char {
    let cp = c as u32;
    match cp {
        0x30ab..=0x30c2 if cp % 2 == 0 => shift(c, -1),
        0x30c4..=0x30c9 if cp % 2 == 1 => shift(c, -1),
        0x30cf..=0x30dd if cp % 3 == 1 => shift(c, -1),
        0x30f4 => 'ウ',
        0x30f7..=0x30fa => shift(c, -8),
        _ => c,
    }
}

fn add_dakuon(c: char) -> char {
    if is_hiragana(c) {
        hiragana_add_dakuon(c)
    } else if is_katakana(c) {
        katakana_add_dakuon(c)
    } else {
        c
    }
}

fn remove_dakuon(c: char) -> char {
    if is_hiragana(c) {
        hiragana_remove_dakuon(c)
    } else if is_katakana(c) {
        katakana_remove_dakuon(c)
    } else {
        c
    }
}

/// A character of normalized output with the byte range of the input
/// character it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedChar {
    pub ch: char,
    pub original_start: usize,
    pub original_end: usize,
    /// True when `ch` replaced an iteration mark.
    pub expanded: bool,
}

/// Lazily expands iteration marks in a character stream.
pub struct IterationMarkChars<I: Iterator<Item = char>> {
    source: Peekable<I>,
    mode: IterationMarkMode,
    offset: usize,
    history: VecDeque<char>,
    pending: VecDeque<NormalizedChar>,
}

impl<I: Iterator<Item = char>> IterationMarkChars<I> {
    pub fn new(source: I, mode: IterationMarkMode) -> Self {
        Self {
            source: source.peekable(),
            mode,
            offset: 0,
            history: VecDeque::with_capacity(MAX_ITERATION_MARK_SPAN),
            pending: VecDeque::new(),
        }
    }

    fn is_active_mark(&self, c: char) -> bool {
        match c {
            KANJI_ITERATION_MARK => self.mode.normalizes_kanji(),
            HIRAGANA_ITERATION_MARK
            | HIRAGANA_DAKUON_ITERATION_MARK
            | KATAKANA_ITERATION_MARK
            | KATAKANA_DAKUON_ITERATION_MARK => self.mode.normalizes_kana(),
            _ => false,
        }
    }

    fn remember(&mut self, c: char) {
        if self.history.len() == MAX_ITERATION_MARK_SPAN {
            self.history.pop_front();
        }
        self.history.push_back(c);
    }

    fn read(&mut self) -> Option<(char, usize)> {
        let c = self.source.next()?;
        let start = self.offset;
        self.offset += c.len_utf8();
        Some((c, start))
    }

    fn accepts_antecedent(&self, mark: char, source: char) -> bool {
        if is_iteration_mark(source) {
            return false;
        }
        if self.mode == IterationMarkMode::NormalizeAll {
            return true;
        }
        match mark {
            KANJI_ITERATION_MARK => is_kanji(source),
            HIRAGANA_ITERATION_MARK | HIRAGANA_DAKUON_ITERATION_MARK => is_hiragana(source),
            _ => is_katakana(source),
        }
    }

    /// Characters emitted since the last mark left as written.
    fn available_sources(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|&&c| !is_iteration_mark(c))
            .count()
    }

    /// Replacement characters for a run of marks, or `None` when the run
    /// cannot be fully resolved and has to stay as written.
    fn resolve(&self, run: &[(char, usize)]) -> Option<Vec<char>> {
        if run.len() > self.history.len() {
            return None;
        }
        let first_source = self.history.len() - run.len();
        run.iter()
            .zip(self.history.iter().skip(first_source))
            .map(|(&(mark, _), &source)| {
                if !self.accepts_antecedent(mark, source) {
                    return None;
                }
                Some(match mark {
                    KANJI_ITERATION_MARK => source,
                    HIRAGANA_DAKUON_ITERATION_MARK | KATAKANA_DAKUON_ITERATION_MARK => {
                        add_dakuon(source)
                    }
                    _ => remove_dakuon(source),
                })
            })
            .collect()
    }
}

impl<I: Iterator<Item = char>> Iterator for IterationMarkChars<I> {
    type Item = NormalizedChar;

    fn next(&mut self) -> Option<NormalizedChar> {
        if let Some(c) = self.pending.pop_front() {
            return Some(c);
        }

        let (ch, start) = self.read()?;
        if !self.is_active_mark(ch) {
            self.remember(ch);
            return Some(NormalizedChar {
                ch,
                original_start: start,
                original_end: start + ch.len_utf8(),
                expanded: false,
            });
        }

        let mut run = vec![(ch, start)];
        while run.len() < MAX_ITERATION_MARK_SPAN {
            let next = self.source.peek().copied();
            match next {
                Some(next) if self.is_active_mark(next) => {
                    if let Some(mark) = self.read() {
                        run.push(mark);
                    }
                }
                _ => break,
            }
        }

        let mut remaining = run.as_slice();
        while !remaining.is_empty() {
            let available = self.available_sources();
            let (chunk, rest) = remaining.split_at(remaining.len().min(available).max(1));
            let replacements = if available == 0 { None } else { self.resolve(chunk) };
            for (i, &(mark, mark_start)) in chunk.iter().enumerate() {
                let (out, expanded) = match &replacements {
                    Some(chars) => (chars[i], true),
                    None => (mark, false),
                };
                // Later marks look back at the output, not at the marks.
                self.remember(out);
                self.pending.push_back(NormalizedChar {
                    ch: out,
                    original_start: mark_start,
                    original_end: mark_start + mark.len_utf8(),
                    expanded,
                });
            }
            remaining = rest;
        }

        self.pending.pop_front()
    }
}

/// Char filter that normalizes Japanese iteration marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseIterationMarkCharFilter {
    mode: IterationMarkMode,
}

impl JapaneseIterationMarkCharFilter {
    pub fn new(mode: IterationMarkMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IterationMarkMode {
        self.mode
    }

    /// Stream the normalized form of `chars`.
    pub fn normalize_chars<I: Iterator<Item = char>>(&self, chars: I) -> IterationMarkChars<I> {
        IterationMarkChars::new(chars, self.mode)
    }
}

impl CharFilter for JapaneseIterationMarkCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for normalized in self.normalize_chars(input.chars()) {
            let new_start = output.len();
            output.push(normalized.ch);
            if normalized.expanded {
                transformations.push(Transformation::new(
                    normalized.original_start,
                    normalized.original_end,
                    new_start,
                    output.len(),
                ));
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "kuromoji_iteration_mark"
    }
}
