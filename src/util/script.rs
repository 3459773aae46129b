//! Character classification for Japanese scripts.
//!
//! Block-level checks are used throughout; they include a handful of
//! unassigned or symbol codepoints (e.g. U+3040, U+30FB) which never show up
//! as iteration mark antecedents or dictionary readings.

/// Katakana-hiragana prolonged sound mark.
pub const PROLONGED_SOUND_MARK: char = 'ー';

/// Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Katakana block (U+30A0..U+30FF). Includes ー and the middle dot.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK unified ideographs, extension A and extension B.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Fold a hiragana character to katakana. Other characters are returned as is.
pub fn hiragana_to_katakana(c: char) -> char {
    if ('\u{3041}'..='\u{3096}').contains(&c) || ('\u{309D}'..='\u{309E}').contains(&c) {
        char::from_u32(c as u32 + 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// ASCII, CJK and fullwidth punctuation, including the ideographic space.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c, '\u{3000}'..='\u{3004}' | '\u{3008}'..='\u{303A}' | '\u{303C}'..='\u{303F}')
        || matches!(
            c,
            '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
                | '\u{FF3B}'..='\u{FF40}'
                | '\u{FF5B}'..='\u{FF65}'
                | '・'
        )
}

/// True when `text` is non-empty and made up only of katakana block characters.
pub fn is_all_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_katakana)
}
