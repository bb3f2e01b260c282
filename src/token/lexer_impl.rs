//! Tokenization of math source text
//!
//! The classification is handled entirely by logos; this module only maps the
//! raw classes to [`Token`] text (trimming control words, collapsing whitespace).

use crate::token::tokens::{RawToken, Token};
use logos::Logos;

/// Tokenize source text, keeping the byte span of every token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::ControlWord) => {
                let name = slice.trim_end();
                Token::new(name, span.start..span.start + name.len())
            }
            Ok(RawToken::Whitespace) => Token::new(" ", span),
            // a lone trailing `\` is not a valid class; pass it through as is
            Ok(RawToken::ControlSymbol) | Ok(RawToken::Char) | Err(()) => Token::new(slice, span),
        };
        tokens.push(token);
    }

    tokens
}
