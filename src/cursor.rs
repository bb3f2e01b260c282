//! Token cursor primitives
//!
//! The small set of stream operations every notation rule is built from. They
//! are provided as the extension trait [`Cursor`], implemented for every
//! [`MacroContext`] (including `dyn MacroContext`), so a handler can write
//! `ctx.is_starred()` or `ctx.square_parameter()?` directly.
//!
//! Primitives that look ahead (`is_starred`, `square_parameter`,
//! `optional_group`) first discard any whitespace at the cursor. Past that,
//! they consume nothing unless the construct they test for is present.

use crate::context::{Argument, MacroContext};
use crate::error::{ExpandError, ExpandResult};
use crate::token::{detokenize, Token};

pub trait Cursor: MacroContext {
    /// Discard any run of whitespace tokens at the cursor.
    fn skip_whitespace(&mut self) {
        while self.future().is_whitespace() {
            self.pop_token();
        }
    }

    /// Whether the next non-whitespace token is `text`. Consumes only whitespace.
    fn next_is(&mut self, text: &str) -> bool {
        self.skip_whitespace();
        self.future().is(text)
    }

    /// Detect and consume the `*` of a starred invocation.
    fn is_starred(&mut self) -> bool {
        if self.next_is("*") {
            self.pop_token();
            true
        } else {
            false
        }
    }

    /// Consume tokens up to and including `delimiter`, returning the ones before it.
    ///
    /// Fails with [`ExpandError::UnterminatedDelimiter`] when the stream ends first.
    fn take_until(&mut self, delimiter: &str) -> ExpandResult<Vec<Token>> {
        let mut taken = Vec::new();
        loop {
            let token = self.pop_token();
            if token.is_eof() {
                return Err(ExpandError::unterminated(delimiter));
            }
            if token.is(delimiter) {
                return Ok(taken);
            }
            taken.push(token);
        }
    }

    /// Detect an optional `[...]` parameter, returning its trimmed interior.
    ///
    /// `None` when the next token is not `[` (nothing but whitespace consumed).
    fn square_parameter(&mut self) -> ExpandResult<Option<String>> {
        if !self.next_is("[") {
            return Ok(None);
        }
        self.pop_token();
        let interior = self.take_until("]").map_err(|err| match err {
            ExpandError::UnterminatedDelimiter { .. } => ExpandError::UnterminatedParameter,
            other => other,
        })?;
        Ok(Some(detokenize(&interior).trim().to_string()))
    }

    /// Gather the next argument and return its natural spelling.
    fn pop_next_arg(&mut self) -> ExpandResult<String> {
        self.consume_arg().map(|arg| arg.text())
    }

    /// Like [`Cursor::pop_next_arg`], but an exhausted stream means "absent".
    fn optional_arg(&mut self) -> ExpandResult<Option<String>> {
        match self.pop_next_arg() {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.is_recoverable() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Gather a braced argument only if one follows.
    fn optional_group(&mut self) -> ExpandResult<Option<Argument>> {
        if !self.next_is("{") {
            return Ok(None);
        }
        match self.consume_arg() {
            Ok(arg) => Ok(Some(arg)),
            Err(err) if err.is_recoverable() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Gather consecutive braced arguments until something else follows.
    fn braced_groups(&mut self) -> ExpandResult<Vec<Argument>> {
        let mut groups = Vec::new();
        while let Some(arg) = self.optional_group()? {
            groups.push(arg);
        }
        Ok(groups)
    }

    /// Consume one token and parse it as a non-negative integer.
    fn pop_integer(&mut self) -> ExpandResult<usize> {
        let text = self.pop_next_arg()?;
        text.trim()
            .parse()
            .map_err(|_| ExpandError::InvalidInteger { found: text })
    }
}

impl<C: MacroContext + ?Sized> Cursor for C {}
