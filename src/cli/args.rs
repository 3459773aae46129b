//! Command line argument parsing for Kotodama CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::analyzer::language::japanese::JAPANESE_ANALYZER_NAME;
use crate::analysis::char_filter::japanese_iteration_mark::IterationMarkMode;
use crate::analysis::tokenizer::lindera::DEFAULT_MODE;

/// Kotodama - Japanese text analysis for search
#[derive(Parser, Debug, Clone)]
#[command(name = "kotodama")]
#[command(about = "Japanese text analysis: iteration marks, readings, stemming and stop filtering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KotodamaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KotodamaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run text through an analyzer and print the tokens
    Analyze(AnalyzeArgs),

    /// Normalize iteration marks
    Normalize(NormalizeArgs),

    /// Romanize a kana reading
    Romanize(RomanizeArgs),
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Analysis configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "KOTODAMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Analyzer to use
    #[arg(short, long, default_value = JAPANESE_ANALYZER_NAME)]
    pub analyzer: String,

    /// Segmentation mode of the morphological tokenizer (normal, search, decompose)
    #[arg(short, long, default_value = DEFAULT_MODE)]
    pub mode: String,

    /// User dictionary (CSV: surface,part_of_speech,reading)
    #[arg(short, long, value_name = "CSV_FILE", env = "KOTODAMA_USER_DICTIONARY")]
    pub user_dictionary: Option<PathBuf>,

    /// Directory word list paths are resolved against
    /// (default: the directory of the configuration file)
    #[arg(short, long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Keep punctuation tokens
    #[arg(long)]
    pub keep_punctuation: bool,
}

/// Arguments for iteration mark normalization
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Which iteration marks to expand
    #[arg(short, long, default_value = "normalize_all")]
    pub mode: IterationMarkMode,
}

/// Arguments for romanization
#[derive(Parser, Debug, Clone)]
pub struct RomanizeArgs {
    /// Katakana or hiragana reading
    #[arg(value_name = "READING")]
    pub reading: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_analyze_command() {
        let args = KotodamaArgs::try_parse_from([
            "kotodama",
            "analyze",
            "今夜はロバート先生と話した",
            "--config",
            "analysis.json",
            "--analyzer",
            "reading",
            "--mode",
            "normal",
            "--user-dictionary",
            "userdic.csv",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.text, "今夜はロバート先生と話した");
            assert_eq!(analyze_args.config, Some(PathBuf::from("analysis.json")));
            assert_eq!(analyze_args.analyzer, "reading");
            assert_eq!(analyze_args.mode, "normal");
            assert_eq!(analyze_args.user_dictionary, Some(PathBuf::from("userdic.csv")));
            assert!(analyze_args.resources.is_none());
            assert!(!analyze_args.keep_punctuation);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_analyze_defaults() {
        let args = KotodamaArgs::try_parse_from(["kotodama", "analyze", "時々"]).unwrap();
        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.analyzer, "kuromoji");
            assert_eq!(analyze_args.mode, "search");
            assert!(analyze_args.user_dictionary.is_none());
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_normalize_command() {
        let args = KotodamaArgs::try_parse_from([
            "kotodama",
            "normalize",
            "--mode",
            "normalize_kana",
            "ジヾ",
        ])
        .unwrap();

        if let Command::Normalize(normalize_args) = args.command {
            assert_eq!(normalize_args.mode, IterationMarkMode::NormalizeKana);
            assert_eq!(normalize_args.text, "ジヾ");
        } else {
            panic!("Expected Normalize command");
        }

        assert!(KotodamaArgs::try_parse_from(["kotodama", "normalize", "--mode", "bogus", "x"]).is_err());
    }

    #[test]
    fn test_global_options() {
        let args = KotodamaArgs::try_parse_from([
            "kotodama",
            "-vv",
            "--format",
            "json",
            "romanize",
            "コンヤ",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_mode() {
        let args = KotodamaArgs::try_parse_from(["kotodama", "-q", "-v", "romanize", "コンヤ"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
