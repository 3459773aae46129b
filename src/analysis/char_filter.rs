//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the text before it reaches the tokenizer. Every
//! change they make is recorded as a [`Transformation`], so that token
//! offsets computed on the filtered text can be mapped back onto the
//! original input with [`correct_offset`].
//!
//! A [`CharFilter`] works on whole documents because tokenizers segment whole
//! sentences. Callers that read text incrementally can use
//! [`JapaneseIterationMarkCharFilter::normalize_chars`](japanese_iteration_mark::JapaneseIterationMarkCharFilter::normalize_chars),
//! which yields [`IterationMarkChars`](japanese_iteration_mark::IterationMarkChars)
//! with original byte ranges and bounded lookback.
//!
//! # Available Filters
//!
//! - [`japanese_iteration_mark::JapaneseIterationMarkCharFilter`] - Japanese iteration mark normalization
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::char_filter::{CharFilter, correct_offset};
//! use kotodama::analysis::char_filter::japanese_iteration_mark::JapaneseIterationMarkCharFilter;
//!
//! let filter = JapaneseIterationMarkCharFilter::default();
//! let (text, transformations) = filter.filter("時々");
//! assert_eq!(text, "時時");
//! assert_eq!(correct_offset(6, &transformations), 6);
//! ```

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
///
/// Implementations return the filtered text along with the transformations
/// describing each change, ordered by position.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// - The filtered text.
    /// - A vector of `Transformation`s describing changes made.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Maps an offset in filtered text back to the text the filter was applied to.
///
/// Offsets before a transformation are unaffected by it, offsets after it are
/// shifted by the length difference, and offsets inside the replaced range
/// snap to the start of the original range. The result always lies on a
/// boundary that existed in the original text.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut delta: isize = 0;
    for t in transformations {
        if offset >= t.new_end {
            let original_len = (t.original_end - t.original_start) as isize;
            let new_len = (t.new_end - t.new_start) as isize;
            delta += original_len - new_len;
        } else if offset > t.new_start {
            return t.original_start;
        } else {
            break;
        }
    }
    (offset as isize + delta) as usize
}

pub mod japanese_iteration_mark;
