//! Component registry and configuration-driven pipeline building.
//!
//! Every tokenizer, char filter and token filter is registered under a fixed
//! name together with a constructor taking its [`Settings`]. An
//! [`AnalysisConfig`] declares named, configured instances of those components
//! and the analyzers chaining them:
//!
//! ```json
//! {
//!   "tokenizer": {"ja": {"type": "kuromoji_tokenizer", "mode": "normal"}},
//!   "char_filter": {"marks": {"type": "kuromoji_iteration_mark", "mode": "normalize_kana"}},
//!   "filter": {"kuromoji_ks": {"type": "kuromoji_stemmer", "minimum_length": 6}},
//!   "analyzer": {"my": {"tokenizer": "ja", "char_filter": ["marks"], "filter": ["kuromoji_baseform", "kuromoji_ks"]}}
//! }
//! ```
//!
//! Analyzer entries may name a declared component or a registered type
//! directly, which then runs with default settings. An analyzer without a
//! `tokenizer` runs on the tokenizer passed to
//! [`AnalysisConfig::build_analyzer`]. All options are validated while
//! building; nothing is looked up again per document.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::analyzer::analyzer::Analyzer;
//! use kotodama::analysis::registry::{AnalysisConfig, AnalysisRegistry};
//! use kotodama::analysis::tokenizer::lexicon::LexiconTokenizer;
//! use kotodama::analysis::word_list::MemoryWordListLoader;
//! use std::sync::Arc;
//!
//! let config = AnalysisConfig::from_json(r#"{
//!     "filter": {"romaji": {"type": "kuromoji_readingform", "use_romaji": true}},
//!     "analyzer": {"reading": {"filter": ["romaji"]}}
//! }"#).unwrap();
//!
//! let tokenizer = LexiconTokenizer::from_csv("今夜,名詞-副詞可能,今夜,コンヤ").unwrap();
//! let analyzer = config
//!     .build_analyzer(
//!         "reading",
//!         Arc::new(tokenizer),
//!         &AnalysisRegistry::with_builtins(),
//!         &MemoryWordListLoader::new(),
//!     )
//!     .unwrap();
//!
//! let tokens: Vec<_> = analyzer.analyze("今夜").unwrap().collect();
//! assert_eq!(tokens[0].text, "kon'ya");
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::analyzer::language::japanese::{JAPANESE_ANALYZER_NAME, JapaneseAnalyzer};
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::japanese_iteration_mark::{
    IterationMarkMode, JapaneseIterationMarkCharFilter,
};
use crate::analysis::settings::Settings;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::base_form::BaseFormFilter;
use crate::analysis::token_filter::katakana_stem::{DEFAULT_MINIMUM_LENGTH, KatakanaStemFilter};
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::part_of_speech::PartOfSpeechStopFilter;
use crate::analysis::token_filter::reading_form::ReadingFormFilter;
use crate::analysis::token_filter::stop::{
    DEFAULT_JAPANESE_STOP_WORDS_SET, JAPANESE_STOP_WORDS_NAME, JapaneseStopFilter,
};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::lindera::{DEFAULT_DICTIONARY, DEFAULT_MODE, LinderaTokenizer};
use crate::analysis::word_list::WordListLoader;
use crate::error::{KotodamaError, Result};

/// Constructor of a configured tokenizer.
pub type TokenizerFactory = fn(&Settings, &dyn WordListLoader) -> Result<Arc<dyn Tokenizer>>;

/// Constructor of a configured token filter.
pub type FilterFactory = fn(&Settings, &dyn WordListLoader) -> Result<Arc<dyn Filter>>;

/// Constructor of a configured char filter.
pub type CharFilterFactory = fn(&Settings, &dyn WordListLoader) -> Result<Arc<dyn CharFilter>>;

/// Name to constructor mapping for tokenizers, char filters and token filters.
#[derive(Clone)]
pub struct AnalysisRegistry {
    tokenizers: HashMap<String, TokenizerFactory>,
    char_filters: HashMap<String, CharFilterFactory>,
    filters: HashMap<String, FilterFactory>,
}

impl AnalysisRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        AnalysisRegistry {
            tokenizers: HashMap::new(),
            char_filters: HashMap::new(),
            filters: HashMap::new(),
        }
    }

    /// Create a registry with every built-in component.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_tokenizer("kuromoji_tokenizer", kuromoji_tokenizer);
        registry.register_char_filter("kuromoji_iteration_mark", iteration_mark);
        registry.register_filter("kuromoji_part_of_speech", part_of_speech);
        registry.register_filter("kuromoji_readingform", reading_form);
        registry.register_filter("kuromoji_stemmer", katakana_stem);
        registry.register_filter("ja_stop", japanese_stop);
        registry.register_filter("kuromoji_baseform", base_form);
        registry.register_filter("keyword_marker", keyword_marker);
        registry.register_filter("lowercase", lowercase);
        registry
    }

    /// Register a tokenizer type, replacing any previous registration.
    pub fn register_tokenizer<S: Into<String>>(&mut self, name: S, factory: TokenizerFactory) {
        self.tokenizers.insert(name.into(), factory);
    }

    /// Register a token filter type, replacing any previous registration.
    pub fn register_filter<S: Into<String>>(&mut self, name: S, factory: FilterFactory) {
        self.filters.insert(name.into(), factory);
    }

    /// Register a char filter type, replacing any previous registration.
    pub fn register_char_filter<S: Into<String>>(&mut self, name: S, factory: CharFilterFactory) {
        self.char_filters.insert(name.into(), factory);
    }

    pub fn has_tokenizer(&self, name: &str) -> bool {
        self.tokenizers.contains_key(name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn has_char_filter(&self, name: &str) -> bool {
        self.char_filters.contains_key(name)
    }

    /// Registered tokenizer types, sorted.
    pub fn tokenizer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tokenizers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered token filter types, sorted.
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered char filter types, sorted.
    pub fn char_filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.char_filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct a tokenizer of the given type.
    pub fn create_tokenizer(
        &self,
        kind: &str,
        settings: &Settings,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn Tokenizer>> {
        let factory = self
            .tokenizers
            .get(kind)
            .ok_or_else(|| KotodamaError::not_found(format!("tokenizer type '{kind}'")))?;
        factory(settings, loader)
    }

    /// Construct a token filter of the given type.
    pub fn create_filter(
        &self,
        kind: &str,
        settings: &Settings,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn Filter>> {
        let factory = self
            .filters
            .get(kind)
            .ok_or_else(|| KotodamaError::not_found(format!("token filter type '{kind}'")))?;
        factory(settings, loader)
    }

    /// Construct a char filter of the given type.
    pub fn create_char_filter(
        &self,
        kind: &str,
        settings: &Settings,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn CharFilter>> {
        let factory = self
            .char_filters
            .get(kind)
            .ok_or_else(|| KotodamaError::not_found(format!("char filter type '{kind}'")))?;
        factory(settings, loader)
    }
}

impl Default for AnalysisRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for AnalysisRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRegistry")
            .field("tokenizers", &self.tokenizer_names())
            .field("char_filters", &self.char_filter_names())
            .field("filters", &self.filter_names())
            .finish()
    }
}

fn kuromoji_tokenizer(settings: &Settings, loader: &dyn WordListLoader) -> Result<Arc<dyn Tokenizer>> {
    let mode = settings.get_str("mode")?.unwrap_or(DEFAULT_MODE);
    let dictionary = settings.get_str("dictionary")?.unwrap_or(DEFAULT_DICTIONARY);
    let user_dictionary = settings
        .get_str("user_dictionary")?
        .map(|name| loader.locate(name).to_string_lossy().into_owned());
    let discard = settings.get_bool("discard_punctuation", true)?;
    let tokenizer = LinderaTokenizer::new(mode, dictionary, user_dictionary.as_deref())?;
    Ok(Arc::new(tokenizer.discard_punctuation(discard)))
}

fn iteration_mark(settings: &Settings, _: &dyn WordListLoader) -> Result<Arc<dyn CharFilter>> {
    let mode = match settings.get_str("mode")? {
        Some(mode) => mode.parse::<IterationMarkMode>()?,
        None => IterationMarkMode::default(),
    };
    Ok(Arc::new(JapaneseIterationMarkCharFilter::new(mode)))
}

fn part_of_speech(settings: &Settings, loader: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    let tags = settings.get_word_list("stoptags", loader)?.unwrap_or_default();
    let filter = PartOfSpeechStopFilter::from_tags(tags);
    let enable = settings.get_bool("enable_position_increments", true)?;
    Ok(Arc::new(filter.enable_position_increments(enable)))
}

fn reading_form(settings: &Settings, _: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    let use_romaji = settings.get_bool("use_romaji", false)?;
    Ok(Arc::new(ReadingFormFilter::new().use_romaji(use_romaji)))
}

fn katakana_stem(settings: &Settings, _: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    let minimum_length = settings.get_usize("minimum_length", DEFAULT_MINIMUM_LENGTH)?;
    Ok(Arc::new(KatakanaStemFilter::with_minimum_length(minimum_length)?))
}

fn japanese_stop(settings: &Settings, loader: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    let mut stop_words = HashSet::new();
    for word in settings.get_word_list("stopwords", loader)?.unwrap_or_default() {
        if word == JAPANESE_STOP_WORDS_NAME {
            stop_words.extend(DEFAULT_JAPANESE_STOP_WORDS_SET.iter().cloned());
        } else {
            stop_words.insert(word);
        }
    }
    let enable = settings.get_bool("enable_position_increments", true)?;
    Ok(Arc::new(
        JapaneseStopFilter::with_stop_words(stop_words).enable_position_increments(enable),
    ))
}

fn base_form(_: &Settings, _: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    Ok(Arc::new(BaseFormFilter::new()))
}

fn keyword_marker(settings: &Settings, loader: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    let keywords = settings.get_word_list("keywords", loader)?.unwrap_or_default();
    Ok(Arc::new(KeywordMarkerFilter::from_words(keywords)))
}

fn lowercase(_: &Settings, _: &dyn WordListLoader) -> Result<Arc<dyn Filter>> {
    Ok(Arc::new(LowercaseFilter::new()))
}

/// A named, configured component: its registered type plus options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ComponentConfig {
    pub fn settings(&self) -> Settings {
        Settings::from(self.options.clone())
    }
}

/// Declaration of one analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// `custom` (default) or `kuromoji` for the default Japanese chain.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<String>,
    #[serde(default)]
    pub char_filter: Vec<String>,
    #[serde(default)]
    pub filter: Vec<String>,
}

/// Analysis configuration: named tokenizers, char filters, token filters and
/// analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub tokenizer: BTreeMap<String, ComponentConfig>,
    #[serde(default)]
    pub char_filter: BTreeMap<String, ComponentConfig>,
    #[serde(default)]
    pub filter: BTreeMap<String, ComponentConfig>,
    #[serde(default)]
    pub analyzer: BTreeMap<String, AnalyzerConfig>,
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        log::debug!("loading analysis config from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    /// Declared analyzer names, sorted.
    pub fn analyzer_names(&self) -> Vec<&str> {
        self.analyzer.keys().map(String::as_str).collect()
    }

    /// Build the analyzer declared under `name`.
    ///
    /// `tokenizer` is used unless the analyzer declares its own. `kuromoji` is
    /// always available, even when not declared.
    pub fn build_analyzer(
        &self,
        name: &str,
        tokenizer: Arc<dyn Tokenizer>,
        registry: &AnalysisRegistry,
        loader: &dyn WordListLoader,
    ) -> Result<PipelineAnalyzer> {
        let Some(declaration) = self.analyzer.get(name) else {
            if name == JAPANESE_ANALYZER_NAME {
                return Ok(JapaneseAnalyzer::pipeline(tokenizer));
            }
            return Err(KotodamaError::not_found(format!("analyzer '{name}'")));
        };

        let tokenizer = match &declaration.tokenizer {
            Some(tokenizer_name) => self.tokenizer(tokenizer_name, registry, loader)?,
            None => tokenizer,
        };

        match declaration.kind.as_deref() {
            None | Some("custom") => {}
            Some(JAPANESE_ANALYZER_NAME) => {
                if !declaration.filter.is_empty() {
                    return Err(KotodamaError::invalid_config(
                        "filter",
                        format!("analyzer '{name}' of type 'kuromoji' has a fixed filter chain"),
                    ));
                }
                let mut analyzer = JapaneseAnalyzer::pipeline(tokenizer).with_name(name);
                for char_filter in &declaration.char_filter {
                    analyzer = analyzer.add_char_filter(self.char_filter(char_filter, registry, loader)?);
                }
                return Ok(analyzer);
            }
            Some(other) => {
                return Err(KotodamaError::invalid_config(
                    "type",
                    format!("unknown analyzer type '{other}' for analyzer '{name}'"),
                ));
            }
        }

        let mut analyzer = PipelineAnalyzer::new(tokenizer).with_name(name);
        for char_filter in &declaration.char_filter {
            analyzer = analyzer.add_char_filter(self.char_filter(char_filter, registry, loader)?);
        }
        for filter in &declaration.filter {
            analyzer = analyzer.add_filter(self.filter(filter, registry, loader)?);
        }
        log::debug!("built analyzer {analyzer:?}");
        Ok(analyzer)
    }

    fn tokenizer(
        &self,
        name: &str,
        registry: &AnalysisRegistry,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn Tokenizer>> {
        match self.tokenizer.get(name) {
            Some(component) => registry.create_tokenizer(&component.kind, &component.settings(), loader),
            None if registry.has_tokenizer(name) => {
                registry.create_tokenizer(name, &Settings::new(), loader)
            }
            None => Err(KotodamaError::not_found(format!("tokenizer '{name}'"))),
        }
    }

    fn char_filter(
        &self,
        name: &str,
        registry: &AnalysisRegistry,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn CharFilter>> {
        match self.char_filter.get(name) {
            Some(component) => registry.create_char_filter(&component.kind, &component.settings(), loader),
            None if registry.has_char_filter(name) => {
                registry.create_char_filter(name, &Settings::new(), loader)
            }
            None => Err(KotodamaError::not_found(format!("char filter '{name}'"))),
        }
    }

    fn filter(
        &self,
        name: &str,
        registry: &AnalysisRegistry,
        loader: &dyn WordListLoader,
    ) -> Result<Arc<dyn Filter>> {
        match self.filter.get(name) {
            Some(component) => registry.create_filter(&component.kind, &component.settings(), loader),
            None if registry.has_filter(name) => registry.create_filter(name, &Settings::new(), loader),
            None => Err(KotodamaError::not_found(format!("token filter '{name}'"))),
        }
    }
}
