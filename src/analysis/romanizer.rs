//! Romanization of katakana and hiragana readings.
//!
//! The mora table is data ([`RomajiTable`]); the contextual rules applied on
//! top of it are fixed:
//!
//! - two-character morae (キャ, ファ, ...) are matched before single ones
//! - hiragana is folded to katakana first
//! - ッ doubles the first consonant of the next mora (`t` before `ch`)
//! - ン is `m` before b/m/p, `n'` before a vowel or y, `n` otherwise
//! - a mora ending in o or u followed by ウ becomes ō or ū
//! - ー is dropped
//! - anything the table does not cover is copied as is
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::romanizer::{Romanizer, TableRomanizer};
//!
//! let romanizer = TableRomanizer::default();
//! assert_eq!(romanizer.romanize("コンヤ"), "kon'ya");
//! assert_eq!(romanizer.romanize("ロバート"), "robato");
//! assert_eq!(romanizer.romanize("ガッコウ"), "gakkō");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::error::{KotodamaError, Result};
use crate::util::script::{PROLONGED_SOUND_MARK, hiragana_to_katakana};

const SOKUON: char = 'ッ';
const HATSUON: char = 'ン';
const LONG_U: char = 'ウ';

/// Modified Hepburn mora table.
const HEPBURN: &[(&str, &str)] = &[
    ("ア", "a"), ("イ", "i"), ("ウ", "u"), ("エ", "e"), ("オ", "o"),
    ("カ", "ka"), ("キ", "ki"), ("ク", "ku"), ("ケ", "ke"), ("コ", "ko"),
    ("ガ", "ga"), ("ギ", "gi"), ("グ", "gu"), ("ゲ", "ge"), ("ゴ", "go"),
    ("サ", "sa"), ("シ", "shi"), ("ス", "su"), ("セ", "se"), ("ソ", "so"),
    ("ザ", "za"), ("ジ", "ji"), ("ズ", "zu"), ("ゼ", "ze"), ("ゾ", "zo"),
    ("タ", "ta"), ("チ", "chi"), ("ツ", "tsu"), ("テ", "te"), ("ト", "to"),
    ("ダ", "da"), ("ヂ", "ji"), ("ヅ", "zu"), ("デ", "de"), ("ド", "do"),
    ("ナ", "na"), ("ニ", "ni"), ("ヌ", "nu"), ("ネ", "ne"), ("ノ", "no"),
    ("ハ", "ha"), ("ヒ", "hi"), ("フ", "fu"), ("ヘ", "he"), ("ホ", "ho"),
    ("バ", "ba"), ("ビ", "bi"), ("ブ", "bu"), ("ベ", "be"), ("ボ", "bo"),
    ("パ", "pa"), ("ピ", "pi"), ("プ", "pu"), ("ペ", "pe"), ("ポ", "po"),
    ("マ", "ma"), ("ミ", "mi"), ("ム", "mu"), ("メ", "me"), ("モ", "mo"),
    ("ヤ", "ya"), ("ユ", "yu"), ("ヨ", "yo"),
    ("ラ", "ra"), ("リ", "ri"), ("ル", "ru"), ("レ", "re"), ("ロ", "ro"),
    ("ワ", "wa"), ("ヰ", "i"), ("ヱ", "e"), ("ヲ", "o"),
    ("ヴ", "vu"), ("ヷ", "va"), ("ヸ", "vi"), ("ヹ", "ve"), ("ヺ", "vo"),
    ("ァ", "a"), ("ィ", "i"), ("ゥ", "u"), ("ェ", "e"), ("ォ", "o"),
    ("ャ", "ya"), ("ュ", "yu"), ("ョ", "yo"), ("ヮ", "wa"), ("ヵ", "ka"), ("ヶ", "ke"),
    ("キャ", "kya"), ("キュ", "kyu"), ("キョ", "kyo"),
    ("ギャ", "gya"), ("ギュ", "gyu"), ("ギョ", "gyo"),
    ("シャ", "sha"), ("シュ", "shu"), ("ショ", "sho"), ("シェ", "she"),
    ("ジャ", "ja"), ("ジュ", "ju"), ("ジョ", "jo"), ("ジェ", "je"),
    ("チャ", "cha"), ("チュ", "chu"), ("チョ", "cho"), ("チェ", "che"),
    ("ヂャ", "ja"), ("ヂュ", "ju"), ("ヂョ", "jo"),
    ("ニャ", "nya"), ("ニュ", "nyu"), ("ニョ", "nyo"),
    ("ヒャ", "hya"), ("ヒュ", "hyu"), ("ヒョ", "hyo"),
    ("ビャ", "bya"), ("ビュ", "byu"), ("ビョ", "byo"),
    ("ピャ", "pya"), ("ピュ", "pyu"), ("ピョ", "pyo"),
    ("ミャ", "mya"), ("ミュ", "myu"), ("ミョ", "myo"),
    ("リャ", "rya"), ("リュ", "ryu"), ("リョ", "ryo"),
    ("ファ", "fa"), ("フィ", "fi"), ("フェ", "fe"), ("フォ", "fo"), ("フュ", "fyu"),
    ("ティ", "ti"), ("ディ", "di"), ("トゥ", "tu"), ("ドゥ", "du"),
    ("テュ", "tyu"), ("デュ", "dyu"),
    ("ウィ", "wi"), ("ウェ", "we"), ("ウォ", "wo"),
    ("ヴァ", "va"), ("ヴィ", "vi"), ("ヴェ", "ve"), ("ヴォ", "vo"),
    ("ツァ", "tsa"), ("ツィ", "tsi"), ("ツェ", "tse"), ("ツォ", "tso"),
    ("イェ", "ye"),
    ("クァ", "kwa"), ("クィ", "kwi"), ("クェ", "kwe"), ("クォ", "kwo"), ("グァ", "gwa"),
];

static HEPBURN_TABLE: LazyLock<Arc<RomajiTable>> = LazyLock::new(|| {
    let mut table = RomajiTable::empty();
    for &(kana, romaji) in HEPBURN {
        let mut chars = kana.chars();
        if let Some(first) = chars.next() {
            table.insert_mora(first, chars.next(), romaji);
        }
    }
    Arc::new(table)
});

/// Converts a kana reading to Latin script.
pub trait Romanizer: Send + Sync {
    fn romanize(&self, reading: &str) -> String;
}

/// Mapping from one- and two-character katakana morae to romaji.
#[derive(Debug, Clone, Default)]
pub struct RomajiTable {
    monographs: HashMap<char, String>,
    digraphs: HashMap<(char, char), String>,
}

impl RomajiTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in modified Hepburn table.
    pub fn hepburn() -> Arc<RomajiTable> {
        Arc::clone(&HEPBURN_TABLE)
    }

    /// Build a table from `(kana, romaji)` entries.
    pub fn from_entries<I, K, R>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: Into<String>,
    {
        let mut table = Self::empty();
        for (kana, romaji) in entries {
            table.insert(kana.as_ref(), romaji)?;
        }
        Ok(table)
    }

    /// Add or replace an entry. Hiragana keys are folded to katakana.
    pub fn insert<R: Into<String>>(&mut self, kana: &str, romaji: R) -> Result<()> {
        let chars: Vec<char> = kana.chars().map(hiragana_to_katakana).collect();
        match chars.as_slice() {
            [c] => self.insert_mora(*c, None, romaji),
            [first, second] => self.insert_mora(*first, Some(*second), romaji),
            _ => {
                return Err(KotodamaError::invalid_config(
                    "romaji_table",
                    format!("entry '{kana}' must be one or two characters"),
                ));
            }
        }
        Ok(())
    }

    fn insert_mora<R: Into<String>>(&mut self, first: char, second: Option<char>, romaji: R) {
        match second {
            Some(second) => self.digraphs.insert((first, second), romaji.into()),
            None => self.monographs.insert(first, romaji.into()),
        };
    }

    pub fn len(&self) -> usize {
        self.monographs.len() + self.digraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mora starting at `chars[i]`, with the number of characters it spans.
    fn mora_at(&self, chars: &[char], i: usize) -> Option<(&str, usize)> {
        let first = *chars.get(i)?;
        if let Some(&second) = chars.get(i + 1)
            && let Some(romaji) = self.digraphs.get(&(first, second))
        {
            return Some((romaji.as_str(), 2));
        }
        self.monographs.get(&first).map(|romaji| (romaji.as_str(), 1))
    }
}

/// Table-driven romanizer; uses the Hepburn table by default.
#[derive(Debug, Clone)]
pub struct TableRomanizer {
    table: Arc<RomajiTable>,
}

impl TableRomanizer {
    pub fn new(table: Arc<RomajiTable>) -> Self {
        Self { table }
    }

    fn next_initial(&self, chars: &[char], i: usize) -> Option<char> {
        self.table
            .mora_at(chars, i)
            .and_then(|(romaji, _)| romaji.chars().next())
    }
}

impl Default for TableRomanizer {
    fn default() -> Self {
        Self::new(RomajiTable::hepburn())
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

impl Romanizer for TableRomanizer {
    fn romanize(&self, reading: &str) -> String {
        let chars: Vec<char> = reading.chars().map(hiragana_to_katakana).collect();
        let mut output = String::with_capacity(reading.len());
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                SOKUON => {
                    if let Some((romaji, _)) = self.table.mora_at(&chars, i + 1) {
                        if romaji.starts_with("ch") {
                            output.push('t');
                        } else if let Some(initial) = romaji.chars().next()
                            && !is_vowel(initial)
                        {
                            output.push(initial);
                        }
                    }
                    i += 1;
                }
                HATSUON => {
                    match self.next_initial(&chars, i + 1) {
                        Some('b' | 'm' | 'p') => output.push('m'),
                        Some(c) if is_vowel(c) || c == 'y' => output.push_str("n'"),
                        _ => output.push('n'),
                    }
                    i += 1;
                }
                PROLONGED_SOUND_MARK => i += 1,
                c => match self.table.mora_at(&chars, i) {
                    Some((romaji, len)) => {
                        output.push_str(romaji);
                        i += len;
                        if chars.get(i) == Some(&LONG_U) {
                            let long = match output.chars().last() {
                                Some('o') => Some('ō'),
                                Some('u') => Some('ū'),
                                _ => None,
                            };
                            if let Some(long) = long {
                                output.pop();
                                output.push(long);
                                i += 1;
                            }
                        }
                    }
                    None => {
                        output.push(c);
                        i += 1;
                    }
                },
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn romanize(reading: &str) -> String {
        TableRomanizer::default().romanize(reading)
    }

    #[test]
    fn test_readings() {
        assert_eq!(romanize("コンヤ"), "kon'ya");
        assert_eq!(romanize("ハ"), "ha");
        assert_eq!(romanize("ロバート"), "robato");
        assert_eq!(romanize("センセイ"), "sensei");
        assert_eq!(romanize("ト"), "to");
        assert_eq!(romanize("ハナシ"), "hanashi");
        assert_eq!(romanize("タ"), "ta");
    }

    #[test]
    fn test_hepburn_table_is_complete() {
        let table = RomajiTable::hepburn();
        assert_eq!(table.len(), HEPBURN.len());
        for &(kana, romaji) in HEPBURN {
            let chars: Vec<char> = kana.chars().collect();
            assert_eq!(table.mora_at(&chars, 0), Some((romaji, chars.len())), "{kana}");
        }
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(romanize("キョウト"), "kyōto");
        assert_eq!(romanize("シャシン"), "shashin");
        assert_eq!(romanize("ファイル"), "fairu");
    }

    #[test]
    fn test_geminates() {
        assert_eq!(romanize("ガッコウ"), "gakkō");
        assert_eq!(romanize("マッチャ"), "matcha");
        assert_eq!(romanize("キップ"), "kippu");
        // Nothing to double.
        assert_eq!(romanize("アッ"), "a");
    }

    #[test]
    fn test_syllabic_n() {
        assert_eq!(romanize("シンブン"), "shimbun");
        assert_eq!(romanize("サンマ"), "samma");
        assert_eq!(romanize("テンプラ"), "tempura");
        assert_eq!(romanize("キンエン"), "kin'en");
        assert_eq!(romanize("ホン"), "hon");
        assert_eq!(romanize("ミンナ"), "minna");
    }

    #[test]
    fn test_long_vowels() {
        assert_eq!(romanize("トウキョウ"), "tōkyō");
        assert_eq!(romanize("スウジ"), "sūji");
        assert_eq!(romanize("コーヒー"), "kohi");
    }

    #[test]
    fn test_hiragana_and_passthrough() {
        assert_eq!(romanize("こんや"), "kon'ya");
        assert_eq!(romanize("ABC"), "ABC");
        assert_eq!(romanize("漢字カ"), "漢字ka");
        assert_eq!(romanize(""), "");
    }

    #[test]
    fn test_custom_table() {
        let table = RomajiTable::from_entries(vec![("カ", "ca"), ("きゃ", "kia")]).unwrap();
        assert_eq!(table.len(), 2);
        let romanizer = TableRomanizer::new(Arc::new(table));
        assert_eq!(romanizer.romanize("カキャ"), "cakia");
        assert_eq!(romanizer.romanize("ア"), "ア");
    }

    #[test]
    fn test_invalid_table_entry() {
        let err = RomajiTable::from_entries(vec![("キャア", "kyaa")]).unwrap_err();
        assert_eq!(err.option(), Some("romaji_table"));
    }
}
