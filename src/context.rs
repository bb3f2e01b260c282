//! The token cursor a macro handler reads from
//!
//! [`MacroContext`] is the contract between the host's macro loop and the
//! handlers: lookahead, consume, and balanced-group argument gathering. A
//! handler receives `&mut dyn MacroContext` and the only side effect it may
//! have is advancing it. Consumed tokens are never put back by primitives.
//!
//! [`TokenStream`] is the stack-backed implementation used by the reference
//! host and by tests.

use crate::error::{ExpandError, ExpandResult};
use crate::token::{detokenize, tokenize, Token};

/// One consumed macro argument.
///
/// Tokens are stored in gathered (reverse) order, matching the stack the host
/// reads from; use [`Argument::natural`] or [`Argument::text`] for the
/// left-to-right spelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Argument {
    tokens: Vec<Token>,
}

impl Argument {
    /// Build from tokens already in reverse order.
    pub fn from_reversed(tokens: Vec<Token>) -> Self {
        Argument { tokens }
    }

    /// Build from tokens in natural order.
    pub fn from_natural(mut tokens: Vec<Token>) -> Self {
        tokens.reverse();
        Argument { tokens }
    }

    /// The gathered (reverse) storage.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens in left-to-right order.
    pub fn natural(&self) -> Vec<Token> {
        self.tokens.iter().rev().cloned().collect()
    }

    /// Re-reversed and joined spelling of the argument.
    pub fn text(&self) -> String {
        detokenize(self.tokens.iter().rev())
    }

    /// First token in natural order.
    pub fn first(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Cursor over the remaining token stream, as exposed by the host.
pub trait MacroContext {
    /// Next token without consuming it; the EOF sentinel at end of input.
    fn future(&mut self) -> &Token;

    /// Consume and return the next token; the EOF sentinel at end of input.
    fn pop_token(&mut self) -> Token;

    /// Push tokens (natural order) so that they are read next.
    fn push_tokens(&mut self, tokens: Vec<Token>);

    /// Gather one argument: a balanced `{...}` group with the outer braces
    /// stripped, or a single token. Leading whitespace is skipped.
    fn consume_arg(&mut self) -> ExpandResult<Argument> {
        while self.future().is_whitespace() {
            self.pop_token();
        }
        let start = self.pop_token();
        if start.is_eof() {
            return Err(ExpandError::ArgumentUnavailable);
        }
        if !start.is("{") {
            return Ok(Argument::from_natural(vec![start]));
        }

        let mut tokens = Vec::new();
        let mut depth = 1usize;
        loop {
            let token = self.pop_token();
            if token.is_eof() {
                return Err(ExpandError::ArgumentUnavailable);
            }
            if token.is("{") {
                depth += 1;
            } else if token.is("}") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            tokens.push(token);
        }
        Ok(Argument::from_natural(tokens))
    }

    /// Gather exactly `n` arguments.
    fn consume_args(&mut self, n: usize) -> ExpandResult<Vec<Argument>> {
        (0..n).map(|_| self.consume_arg()).collect()
    }
}

/// Stack-backed token stream; the top of the stack is the next token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    stack: Vec<Token>,
    eof: Token,
}

impl TokenStream {
    /// Stream over tokens given in natural order.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.reverse();
        TokenStream {
            stack: tokens,
            eof: Token::eof(),
        }
    }

    pub fn from_source(source: &str) -> Self {
        TokenStream::new(tokenize(source))
    }

    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The unread remainder, detokenized.
    pub fn remaining_text(&self) -> String {
        detokenize(self.stack.iter().rev())
    }
}

impl MacroContext for TokenStream {
    fn future(&mut self) -> &Token {
        self.stack.last().unwrap_or(&self.eof)
    }

    fn pop_token(&mut self) -> Token {
        self.stack.pop().unwrap_or_else(Token::eof)
    }

    fn push_tokens(&mut self, tokens: Vec<Token>) {
        self.stack.extend(tokens.into_iter().rev());
    }
}
