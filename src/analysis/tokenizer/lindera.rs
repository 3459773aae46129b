//! Morphological tokenizer backed by Lindera.
//!
//! Tokens carry the dictionary's part-of-speech tag (levels joined with
//! `-`, as in `名詞-固有名詞-人名-名`), base form and katakana reading. The
//! IPADIC layout of the token details is assumed:
//!
//! ```text
//! pos, pos1, pos2, pos3, conjugation type, conjugation form, base form, reading, pronunciation
//! ```
//!
//! Unset fields (`*`) are left empty on the token.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use lindera::dictionary::{load_dictionary, load_user_dictionary};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{KotodamaError, Result};
use crate::util::script::is_punctuation;

use super::Tokenizer;

/// Dictionary used when none is configured.
pub const DEFAULT_DICTIONARY: &str = "embedded://ipadic";

/// Segmentation mode used when none is configured.
pub const DEFAULT_MODE: &str = "search";

const UNSET: &str = "*";
const BASE_FORM_FIELD: usize = 6;
const READING_FIELD: usize = 7;

/// Map a segmentation mode name onto Lindera's modes.
///
/// `search` splits long compounds the way `decompose` does.
pub fn parse_mode(mode: &str) -> Result<Mode> {
    let lindera_mode = match mode.to_ascii_lowercase().as_str() {
        "normal" => "normal",
        "search" | "decompose" => "decompose",
        _ => {
            return Err(KotodamaError::invalid_config(
                "mode",
                format!("unknown mode '{mode}', expected normal, search or decompose"),
            ));
        }
    };
    Mode::from_str(lindera_mode)
        .map_err(|e| KotodamaError::analysis(format!("Invalid mode '{mode}': {e}")))
}

pub struct LinderaTokenizer {
    inner: Segmenter,
    discard_punctuation: bool,
}

impl LinderaTokenizer {
    /// Create a new Lindera tokenizer.
    pub fn new(mode_str: &str, dict_uri: &str, user_dict_uri: Option<&str>) -> Result<Self> {
        let mode = parse_mode(mode_str)?;
        let dict = load_dictionary(dict_uri)
            .map_err(|e| KotodamaError::analysis(format!("Failed to load dictionary: {e}")))?;
        let metadata = &dict.metadata;
        let user_dict = match user_dict_uri {
            Some(uri) => Some(load_user_dictionary(uri, metadata).map_err(|e| {
                KotodamaError::analysis(format!("Failed to load user dictionary: {e}"))
            })?),
            None => None,
        };
        log::debug!("loaded dictionary {dict_uri} (mode {mode_str})");
        let inner = Segmenter::new(mode, dict, user_dict);

        Ok(Self {
            inner,
            discard_punctuation: true,
        })
    }

    /// Set whether punctuation tokens are dropped (default: true).
    pub fn discard_punctuation(mut self, discard: bool) -> Self {
        self.discard_punctuation = discard;
        self
    }

    fn is_discarded(&self, surface: &str) -> bool {
        self.discard_punctuation
            && surface
                .chars()
                .all(|c| is_punctuation(c) || c.is_whitespace())
    }
}

fn detail(details: &[&str], index: usize) -> Option<String> {
    details
        .get(index)
        .filter(|value| !value.is_empty() && **value != UNSET)
        .map(|value| value.to_string())
}

fn part_of_speech(details: &[&str]) -> Option<String> {
    let levels: Vec<&str> = details
        .iter()
        .take(4)
        .copied()
        .filter(|level| !level.is_empty() && *level != UNSET && *level != "UNK")
        .collect();
    (!levels.is_empty()).then(|| levels.join("-"))
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        for mut token in self
            .inner
            .segment(Cow::Borrowed(text))
            .map_err(|e| KotodamaError::analysis(format!("Failed to segment text: {e}")))?
        {
            let surface = token.surface.to_string();
            if self.is_discarded(&surface) {
                continue;
            }
            let (start, end) = (token.byte_start, token.byte_end);
            let details = token.details();

            let mut output = Token::with_offsets(surface, start, end);
            if let Some(tag) = part_of_speech(&details) {
                output = output.with_part_of_speech(tag);
            }
            output.base_form = detail(&details, BASE_FORM_FIELD);
            output.reading = detail(&details, READING_FIELD);
            tokens.push(output);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

impl fmt::Debug for LinderaTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinderaTokenizer")
            .field("discard_punctuation", &self.discard_punctuation)
            .finish()
    }
}
