//! Command implementations for Kotodama CLI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::japanese_iteration_mark::JapaneseIterationMarkCharFilter;
use crate::analysis::registry::{AnalysisConfig, AnalysisRegistry};
use crate::analysis::romanizer::{Romanizer, TableRomanizer};
use crate::analysis::tokenizer::lindera::{DEFAULT_DICTIONARY, LinderaTokenizer};
use crate::analysis::word_list::FileWordListLoader;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::util::script::hiragana_to_katakana;

/// Execute a CLI command.
pub fn execute_command(args: KotodamaArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => {
            let result = run_analyze(analyze_args)?;
            output_result(
                &format!("Analyzed with {}", result.analyzer),
                &result,
                &args,
            )
        }
        Command::Normalize(normalize_args) => {
            let result = run_normalize(normalize_args);
            output_result(&format!("Normalized ({})", result.mode), &result, &args)
        }
        Command::Romanize(romanize_args) => {
            let result = run_romanize(romanize_args);
            output_result("Romanized", &result, &args)
        }
    }
}

/// Build the requested analyzer and run the text through it.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let user_dictionary = args
        .user_dictionary
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    let tokenizer = LinderaTokenizer::new(&args.mode, DEFAULT_DICTIONARY, user_dictionary.as_deref())?
        .discard_punctuation(!args.keep_punctuation);

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };

    let loader = FileWordListLoader::new(resource_dir(args));
    let analyzer = config.build_analyzer(
        &args.analyzer,
        Arc::new(tokenizer),
        &AnalysisRegistry::with_builtins(),
        &loader,
    )?;
    log::info!("using {analyzer:?}");

    Ok(AnalysisResult {
        analyzer: args.analyzer.clone(),
        text: args.text.clone(),
        tokens: analyzer.analyze(&args.text)?.collect(),
    })
}

/// Expand iteration marks in the given text.
pub fn run_normalize(args: &NormalizeArgs) -> NormalizationResult {
    let filter = JapaneseIterationMarkCharFilter::new(args.mode);
    let mut expanded = 0;
    let normalized: String = filter
        .normalize_chars(args.text.chars())
        .inspect(|c| expanded += usize::from(c.expanded))
        .map(|c| c.ch)
        .collect();
    log::debug!("expanded {expanded} iteration marks");
    NormalizationResult {
        mode: args.mode.to_string(),
        original: args.text.clone(),
        normalized,
    }
}

/// Romanize a reading with the Hepburn table.
pub fn run_romanize(args: &RomanizeArgs) -> RomanizationResult {
    let katakana: String = args.reading.chars().map(hiragana_to_katakana).collect();
    RomanizationResult {
        reading: katakana.clone(),
        romaji: TableRomanizer::default().romanize(&katakana),
    }
}

fn resource_dir(args: &AnalyzeArgs) -> PathBuf {
    if let Some(dir) = &args.resources {
        return dir.clone();
    }
    args.config
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::japanese_iteration_mark::IterationMarkMode;
    use std::fs;
    use tempfile::TempDir;

    fn analyze_args(text: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            text: text.to_string(),
            config: None,
            analyzer: "kuromoji".to_string(),
            mode: "normal".to_string(),
            user_dictionary: None,
            resources: None,
            keep_punctuation: false,
        }
    }

    #[cfg(feature = "embedded-ipadic")]
    #[test]
    fn test_run_analyze_with_config_and_resources() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stoptags.txt"), "# particles\n助詞-係助詞\n").unwrap();
        fs::write(
            dir.path().join("analysis.json"),
            r#"{
                "filter": {
                    "pos": {"type": "kuromoji_part_of_speech", "stoptags_path": "stoptags.txt"},
                    "romaji": {"type": "kuromoji_readingform", "use_romaji": "true"}
                },
                "analyzer": {"my": {"filter": ["pos", "romaji"]}}
            }"#,
        )
        .unwrap();

        let mut args = analyze_args("今夜は");
        args.config = Some(dir.path().join("analysis.json"));
        args.analyzer = "my".to_string();

        let result = run_analyze(&args).unwrap();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].text, "kon'ya");
    }

    #[test]
    fn test_run_analyze_invalid_mode() {
        let mut args = analyze_args("今夜");
        args.mode = "extended".to_string();
        assert_eq!(run_analyze(&args).unwrap_err().option(), Some("mode"));
    }

    #[test]
    fn test_run_analyze_unknown_analyzer() {
        let mut args = analyze_args("今夜");
        args.analyzer = "missing".to_string();
        assert!(run_analyze(&args).is_err());
    }

    #[test]
    fn test_run_normalize() {
        let result = run_normalize(&NormalizeArgs {
            text: "時々、ジヾ".to_string(),
            mode: IterationMarkMode::NormalizeKanji,
        });
        assert_eq!(result.normalized, "時時、ジヾ");
        assert_eq!(result.mode, "normalize_kanji");
    }

    #[test]
    fn test_run_romanize_accepts_hiragana() {
        let result = run_romanize(&RomanizeArgs {
            reading: "こんや".to_string(),
        });
        assert_eq!(result.reading, "コンヤ");
        assert_eq!(result.romaji, "kon'ya");
    }

    #[test]
    fn test_resource_dir_defaults_to_config_dir() {
        let mut args = analyze_args("x");
        assert_eq!(resource_dir(&args), PathBuf::from("."));
        args.config = Some(PathBuf::from("conf/analysis.json"));
        assert_eq!(resource_dir(&args), PathBuf::from("conf"));
        args.resources = Some(PathBuf::from("words"));
        assert_eq!(resource_dir(&args), PathBuf::from("words"));
    }
}
