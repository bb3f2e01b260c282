//! Delimited-body scanner
//!
//! The one recursive-descent routine behind `\qty`, `\abs`, `\eval` and
//! `\mqty`. Given a [`DelimiterPair`] whose opener has already been consumed,
//! it pops tokens until the closer is seen at nesting depth zero:
//!
//! - a token equal to the closer terminates the body when `opened == 0`,
//!   otherwise it is kept and `opened` decrements
//! - a token equal to the opener is kept and, for pairs that nest, increments
//!   `opened`
//! - the EOF sentinel before termination is [`ExpandError::UnterminatedDelimiter`]
//!   unless the caller allows unterminated bodies
//!
//! The closer test comes first, so pairs whose opener and closer coincide
//! (`|`) never nest.
//!
//! The body is kept as tokens. Markup around it is added as synthetic tokens
//! and the whole sequence is detokenized once in [`ScannedBody::enclose`], so
//! the body text comes out exactly as it was written.

use crate::context::MacroContext;
use crate::delimiters::{DelimSize, DelimiterPair};
use crate::error::{ExpandError, ExpandResult};
use crate::token::{detokenize, Token};

/// Caller-controlled knobs of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Explicit delimiter size; `None` renders auto-sizing `\left`/`\right`.
    pub size: Option<DelimSize>,
    /// Accept end of input as an implicit closer.
    pub allow_unterminated: bool,
}

impl ScanOptions {
    pub fn sized(size: Option<DelimSize>) -> Self {
        ScanOptions {
            size,
            ..ScanOptions::default()
        }
    }

    pub fn allow_unterminated(mut self, allow: bool) -> Self {
        self.allow_unterminated = allow;
        self
    }
}

/// Result of a scan: the body tokens strictly between the outermost pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBody {
    pub pair: DelimiterPair,
    pub size: Option<DelimSize>,
    pub body: Vec<Token>,
    /// False when the body ran to end of input under `allow_unterminated`.
    pub terminated: bool,
}

impl ScannedBody {
    /// Concatenated literal content between the delimiters.
    pub fn body_text(&self) -> String {
        detokenize(&self.body)
    }

    /// Detokenize `before`, the body and `after` as one token sequence.
    pub fn enclose(&self, before: &[&str], after: &[&str]) -> String {
        let tokens: Vec<Token> = before
            .iter()
            .map(|text| Token::synthetic(*text))
            .chain(self.body.iter().cloned())
            .chain(after.iter().map(|text| Token::synthetic(*text)))
            .collect();
        detokenize(&tokens)
    }

    /// Left sizing command: `\bigl`.. or `\left`.
    pub fn left(&self) -> &'static str {
        self.size.map_or("\\left", DelimSize::left)
    }

    /// Right sizing command: `\bigr`.. or `\right`.
    pub fn right(&self) -> &'static str {
        self.size.map_or("\\right", DelimSize::right)
    }

    /// Render the body, bracketed by sized delimiters when `wrap` is set.
    ///
    /// Brace delimiters render escaped (`\{ ... \}`) since `{ }` is the
    /// markup's own grouping syntax.
    pub fn render(&self, wrap: bool) -> String {
        if !wrap {
            return self.body_text();
        }
        self.enclose(
            &[self.left(), self.pair.rendered_open()],
            &[self.right(), self.pair.rendered_close()],
        )
    }
}

/// Scan a delimited body from `ctx`; the opener must already be consumed.
pub fn scan(
    ctx: &mut dyn MacroContext,
    pair: DelimiterPair,
    options: ScanOptions,
) -> ExpandResult<ScannedBody> {
    let mut body = Vec::new();
    let mut opened = 0usize;

    let terminated = loop {
        let token = ctx.pop_token();
        if token.is_eof() {
            if options.allow_unterminated {
                break false;
            }
            return Err(ExpandError::unterminated(pair.close));
        }
        if token.is(pair.close) {
            if opened == 0 {
                break true;
            }
            opened -= 1;
        } else if pair.nests && token.is(pair.open) {
            opened += 1;
        }
        body.push(token);
    };

    tracing::trace!(
        open = pair.open,
        close = pair.close,
        tokens = body.len(),
        terminated,
        "scanned delimited body"
    );

    Ok(ScannedBody {
        pair,
        size: options.size,
        body,
        terminated,
    })
}

/// Scan and render in one step.
pub fn scan_rendered(
    ctx: &mut dyn MacroContext,
    pair: DelimiterPair,
    options: ScanOptions,
    wrap: bool,
) -> ExpandResult<String> {
    scan(ctx, pair, options).map(|scanned| scanned.render(wrap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TokenStream;
    use crate::delimiters::{BRACES, EVAL_BRACES};

    fn scan_source(source: &str, open: &str) -> (ExpandResult<ScannedBody>, TokenStream) {
        let mut stream = TokenStream::from_source(source);
        let first = stream.pop_token();
        assert_eq!(first.text, open);
        let pair = BRACES.lookup(open).unwrap();
        let result = scan(&mut stream, pair, ScanOptions::default());
        (result, stream)
    }

    #[test]
    fn nested_same_kind_pairs_are_preserved() {
        let (result, stream) = scan_source("(a(b)c)d", "(");
        let scanned = result.unwrap();
        assert_eq!(scanned.body_text(), "a(b)c");
        assert!(scanned.terminated);
        assert_eq!(stream.remaining_text(), "d");
    }

    #[test]
    fn other_bracket_kinds_do_not_nest() {
        let (result, _) = scan_source("(a[b)c]", "(");
        assert_eq!(result.unwrap().body_text(), "a[b");
    }

    #[test]
    fn bars_close_immediately() {
        let (result, stream) = scan_source("|x|y|", "|");
        assert_eq!(result.unwrap().body_text(), "x");
        assert_eq!(stream.remaining_text(), "y|");
    }

    #[test]
    fn escaped_braces() {
        let (result, _) = scan_source("\\{a\\{b\\}\\}", "\\{");
        assert_eq!(result.unwrap().body_text(), "a\\{b\\}");
    }

    #[test]
    fn unterminated_is_fatal() {
        let (result, _) = scan_source("(a(b)", "(");
        assert_eq!(result, Err(ExpandError::unterminated(")")));
    }

    #[test]
    fn unterminated_allowed() {
        let mut stream = TokenStream::from_source("a+b");
        let pair = BRACES.lookup("|").unwrap();
        let scanned = scan(
            &mut stream,
            pair,
            ScanOptions::default().allow_unterminated(true),
        )
        .unwrap();
        assert!(!scanned.terminated);
        assert_eq!(scanned.body_text(), "a+b");
    }

    #[test]
    fn renders_auto_sized() {
        let (result, _) = scan_source("(x)", "(");
        assert_eq!(result.unwrap().render(true), "\\left(x\\right)");
    }

    #[test]
    fn renders_braces_escaped() {
        let (result, _) = scan_source("{x}", "{");
        assert_eq!(result.unwrap().render(true), "\\left\\{x\\right\\}");
    }

    #[test]
    fn renders_control_words_in_the_body_intact() {
        let (result, _) = scan_source("(\\text{speed})", "(");
        assert_eq!(
            result.unwrap().render(true),
            "\\left(\\text{speed}\\right)"
        );
    }

    #[test]
    fn renders_explicit_size() {
        let mut stream = TokenStream::from_source("x]");
        let pair = BRACES.lookup("[").unwrap();
        let scanned = scan(
            &mut stream,
            pair,
            ScanOptions::sized(Some(DelimSize::Bigg)),
        )
        .unwrap();
        assert_eq!(scanned.render(true), "\\biggl[x\\biggr]");
        assert_eq!(scanned.render(false), "x");
    }

    #[test]
    fn eval_bar_ignores_parenthesis_nesting() {
        let mut stream = TokenStream::from_source("f(x)|_0");
        let pair = EVAL_BRACES.lookup("(").unwrap();
        let scanned = scan(&mut stream, pair, ScanOptions::default()).unwrap();
        assert_eq!(scanned.body_text(), "f(x)");
        assert_eq!(stream.remaining_text(), "_0");
    }
}
