//! Base form filter implementation.
//!
//! Replaces inflected tokens with their dictionary form ("超え" → "超える")
//! when the tokenizer supplied one. Keyword tokens are left as they are.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that replaces token text with its base form.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseFormFilter;

impl BaseFormFilter {
    pub fn new() -> Self {
        BaseFormFilter
    }
}

impl Filter for BaseFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if !token.keyword
                && let Some(base_form) = token.base_form.as_deref().filter(|b| !b.is_empty())
            {
                token.text = base_form.to_string();
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "kuromoji_baseform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_base_form_filter() {
        let tokens = vec![
            Token::new("それ"),
            Token::new("を").with_base_form("を"),
            Token::new("超え").with_base_form("超える"),
            Token::new("まし").with_base_form("ます").as_keyword(),
        ];
        let result: Vec<String> = BaseFormFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["それ", "を", "超える", "まし"]);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(BaseFormFilter::new().name(), "kuromoji_baseform");
    }
}
