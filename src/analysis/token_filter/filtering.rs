//! Token removal with position increment bookkeeping.
//!
//! Shared by the filters that drop tokens. When increments are enabled, the
//! increments of dropped tokens are carried onto the next token that
//! survives. Dropped trailing tokens have no successor and their increments
//! are discarded.

use crate::analysis::token::{Token, TokenStream};

/// Iterator adapter that keeps the tokens for which `accept` returns true.
pub struct Filtering<I, P> {
    tokens: I,
    accept: P,
    enable_position_increments: bool,
    skipped_positions: usize,
}

impl<I, P> Filtering<I, P>
where
    I: Iterator<Item = Token>,
    P: FnMut(&Token) -> bool,
{
    pub fn new(tokens: I, accept: P, enable_position_increments: bool) -> Self {
        Self {
            tokens,
            accept,
            enable_position_increments,
            skipped_positions: 0,
        }
    }
}

impl<I, P> Iterator for Filtering<I, P>
where
    I: Iterator<Item = Token>,
    P: FnMut(&Token) -> bool,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        for mut token in self.tokens.by_ref() {
            if (self.accept)(&token) {
                if self.enable_position_increments {
                    token.position_increment += self.skipped_positions;
                    self.skipped_positions = 0;
                }
                return Some(token);
            }
            if self.enable_position_increments {
                self.skipped_positions += token.position_increment;
            }
        }
        None
    }
}

/// Box a [`Filtering`] adapter as a token stream.
pub fn filtering<P>(tokens: TokenStream, accept: P, enable_position_increments: bool) -> TokenStream
where
    P: FnMut(&Token) -> bool + 'static,
{
    Box::new(Filtering::new(tokens, accept, enable_position_increments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(texts: &[&str]) -> Vec<Token> {
        texts.iter().map(|t| Token::new(*t)).collect()
    }

    #[test]
    fn test_increments_accumulate() {
        let input = tokens(&["私", "は", "が", "制限"]);
        let result: Vec<Token> =
            Filtering::new(input.into_iter(), |t| t.text != "は" && t.text != "が", true)
                .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].position_increment, 1);
        assert_eq!(result[1].text, "制限");
        assert_eq!(result[1].position_increment, 3);
    }

    #[test]
    fn test_increments_disabled() {
        let input = tokens(&["私", "は", "制限"]);
        let result: Vec<Token> =
            Filtering::new(input.into_iter(), |t| t.text != "は", false).collect();

        assert_eq!(result[1].position_increment, 1);
    }

    #[test]
    fn test_leading_and_stacked_tokens() {
        let input = vec![
            Token::new("は"),
            Token::new("x").with_position_increment(0),
            Token::new("私"),
        ];
        let result: Vec<Token> =
            Filtering::new(input.into_iter(), |t| t.text == "私", true).collect();

        // 1 (は) + 0 (x) + 1 (私)
        assert_eq!(result[0].position_increment, 2);
    }

    #[test]
    fn test_conserves_relative_positions() {
        let input = tokens(&["a", "b", "c", "d", "e"]);
        let result: Vec<Token> =
            Filtering::new(input.into_iter(), |t| t.text != "c", true).collect();

        let total: usize = result.iter().map(|t| t.position_increment).sum();
        // "e" keeps the position it had before "c" was removed.
        assert_eq!(total, 5);
        assert_eq!(result.len(), 4);
    }
}
