//! Component settings.
//!
//! [`Settings`] is the option map of one configured char filter or token
//! filter, as it appears in an analysis configuration:
//!
//! ```json
//! {"type": "kuromoji_stemmer", "minimum_length": 6}
//! ```
//!
//! Typed getters validate values at build time and report failures as
//! [`KotodamaError::InvalidConfig`] naming the offending option.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::word_list::WordListLoader;
use crate::error::{KotodamaError, Result};

/// Suffix of options that name a word list resource instead of listing entries inline.
pub const PATH_SUFFIX: &str = "_path";

/// Options of a single analysis component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from a JSON object. `null` yields empty settings.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Settings { values }),
            Value::Null => Ok(Settings::new()),
            other => Err(KotodamaError::invalid_config(
                "settings",
                format!("expected an object, found {other}"),
            )),
        }
    }

    /// Set an option, builder style.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read a boolean option. Accepts JSON booleans and the strings `"true"`/`"false"`.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(KotodamaError::invalid_config(
                    key,
                    format!("expected true or false, found '{other}'"),
                )),
            },
            Some(other) => Err(KotodamaError::invalid_config(
                key,
                format!("expected a boolean, found {other}"),
            )),
        }
    }

    /// Read a non-negative integer option. Numeric strings are accepted.
    pub fn get_usize(&self, key: &str, default: usize) -> Result<usize> {
        let invalid = |found: &dyn std::fmt::Display| {
            KotodamaError::invalid_config(
                key,
                format!("expected a non-negative integer, found {found}"),
            )
        };
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| invalid(n)),
            Some(Value::String(s)) => s.trim().parse::<usize>().map_err(|_| invalid(&format!("'{s}'"))),
            Some(other) => Err(invalid(other)),
        }
    }

    /// Read a string option.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(KotodamaError::invalid_config(
                key,
                format!("expected a string, found {other}"),
            )),
        }
    }

    /// Read a list option. A single string is a one-element list.
    pub fn get_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(KotodamaError::invalid_config(
                        key,
                        format!("expected a list of strings, found element {other}"),
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(KotodamaError::invalid_config(
                key,
                format!("expected a list of strings, found {other}"),
            )),
        }
    }

    /// Read a word list given inline under `key` or as a resource under `{key}_path`.
    ///
    /// Inline entries win when both are present. Returns `None` when neither is set.
    pub fn get_word_list(&self, key: &str, loader: &dyn WordListLoader) -> Result<Option<Vec<String>>> {
        if let Some(words) = self.get_list(key)? {
            return Ok(Some(words));
        }
        let path_key = format!("{key}{PATH_SUFFIX}");
        match self.get_str(&path_key)? {
            Some(name) => loader.load(name).map(Some),
            None => Ok(None),
        }
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(values: Map<String, Value>) -> Self {
        Settings { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::word_list::MemoryWordListLoader;
    use serde_json::json;

    #[test]
    fn test_get_bool() {
        let settings = Settings::new()
            .with("a", true)
            .with("b", "false")
            .with("c", "yes")
            .with("d", 1);
        assert!(settings.get_bool("a", false).unwrap());
        assert!(!settings.get_bool("b", true).unwrap());
        assert!(settings.get_bool("missing", true).unwrap());

        let err = settings.get_bool("c", false).unwrap_err();
        assert_eq!(err.option(), Some("c"));
        assert!(settings.get_bool("d", false).is_err());
    }

    #[test]
    fn test_get_usize() {
        let settings = Settings::new()
            .with("a", 6)
            .with("b", "4")
            .with("c", -1)
            .with("d", 2.5)
            .with("e", "four");
        assert_eq!(settings.get_usize("a", 0).unwrap(), 6);
        assert_eq!(settings.get_usize("b", 0).unwrap(), 4);
        assert_eq!(settings.get_usize("missing", 4).unwrap(), 4);
        assert_eq!(settings.get_usize("c", 0).unwrap_err().option(), Some("c"));
        assert!(settings.get_usize("d", 0).is_err());
        assert!(settings.get_usize("e", 0).is_err());
    }

    #[test]
    fn test_get_list() {
        let settings = Settings::from_value(json!({
            "tags": ["助詞", "助動詞"],
            "single": "_japanese_",
            "bad": [1, 2],
        }))
        .unwrap();
        assert_eq!(settings.get_list("tags").unwrap().unwrap(), vec!["助詞", "助動詞"]);
        assert_eq!(settings.get_list("single").unwrap().unwrap(), vec!["_japanese_"]);
        assert!(settings.get_list("missing").unwrap().is_none());
        assert_eq!(settings.get_list("bad").unwrap_err().option(), Some("bad"));
    }

    #[test]
    fn test_get_word_list() {
        let loader = MemoryWordListLoader::new().with_list("tags.txt", vec!["動詞-自立"]);

        let inline = Settings::new().with("stoptags", json!(["助詞"]));
        assert_eq!(
            inline.get_word_list("stoptags", &loader).unwrap().unwrap(),
            vec!["助詞"]
        );

        let from_path = Settings::new().with("stoptags_path", "tags.txt");
        assert_eq!(
            from_path.get_word_list("stoptags", &loader).unwrap().unwrap(),
            vec!["動詞-自立"]
        );

        assert!(Settings::new().get_word_list("stoptags", &loader).unwrap().is_none());

        let missing = Settings::new().with("stoptags_path", "nope.txt");
        assert!(missing.get_word_list("stoptags", &loader).is_err());
    }

    #[test]
    fn test_from_value() {
        assert!(Settings::from_value(Value::Null).unwrap().is_empty());
        assert!(Settings::from_value(json!([1])).is_err());
        let settings: Settings = serde_json::from_value(json!({"mode": "normalize_kana"})).unwrap();
        assert_eq!(settings.get_str("mode").unwrap(), Some("normalize_kana"));
    }
}
