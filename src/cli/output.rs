//! Output formatting for Kotodama CLI.

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, positions};
use crate::cli::args::*;
use crate::error::Result;

/// Tokens produced by one analyzer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analyzer: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

/// Result of iteration mark normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub mode: String,
    pub original: String,
    pub normalized: String,
}

/// Result of romanizing a reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomanizationResult {
    pub reading: String,
    pub romaji: String,
}

/// Values that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

impl HumanOutput for AnalysisResult {
    fn render_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.tokens.len());
        for (token, position) in self.tokens.iter().zip(positions(&self.tokens)) {
            let mut line = format!(
                "{position:>3}  {}  [{}..{}]",
                token.text, token.start_offset, token.end_offset
            );
            if let Some(pos) = token.part_of_speech() {
                line.push_str(&format!("  {pos}"));
            }
            if let Some(reading) = &token.reading {
                line.push_str(&format!("  ({reading})"));
            }
            if token.keyword {
                line.push_str("  *");
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl HumanOutput for NormalizationResult {
    fn render_human(&self) -> String {
        self.normalized.clone()
    }
}

impl HumanOutput for RomanizationResult {
    fn render_human(&self) -> String {
        self.romaji.clone()
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &KotodamaArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &KotodamaArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &KotodamaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_analysis() {
        let result = AnalysisResult {
            analyzer: "kuromoji".to_string(),
            text: "今夜は".to_string(),
            tokens: vec![
                Token::with_offsets("今夜", 0, 6)
                    .with_part_of_speech("名詞-副詞可能")
                    .with_reading("コンヤ"),
                Token::with_offsets("ABC", 9, 12).with_position_increment(2).as_keyword(),
            ],
        };
        let rendered = result.render_human();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "  0  今夜  [0..6]  名詞-副詞可能  (コンヤ)");
        assert_eq!(lines[1], "  2  ABC  [9..12]  *");
    }

    #[test]
    fn test_json_shape() {
        let result = RomanizationResult {
            reading: "コンヤ".to_string(),
            romaji: "kon'ya".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["romaji"], "kon'ya");
    }
}
