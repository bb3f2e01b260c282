//! Tokens of the math markup and the tokenizer that produces them
//!
//! The host engine owns tokenization; this module is the reference tokenizer
//! used by [`crate::expander::Expander`] and by tests. It follows the usual
//! math-markup conventions: control words swallow trailing whitespace, a run
//! of whitespace becomes a single `" "` token, `%` comments are dropped and
//! every other character is a token of its own.

pub mod detokenizer;
pub mod lexer_impl;
pub mod tokens;

pub use detokenizer::detokenize;
pub use lexer_impl::tokenize;
pub use tokens::{RawToken, Token, EOF};
