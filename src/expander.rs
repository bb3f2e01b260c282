//! Reference host macro loop
//!
//! The host side of the handler contract: pop tokens, emit the ones that are
//! not registered, invoke the rule for those that are, re-tokenize the
//! replacement text, fill `#n` placeholders with arguments gathered after the
//! handler ran, and push the result back so it is expanded in turn.
//!
//! Recursion is therefore a property of this loop, never of the registry.
//! Every invocation counts against a budget ([`DEFAULT_MAX_EXPANSIONS`] unless
//! configured); exhausting it is how alias cycles such as `\a -> \b -> \a`
//! surface, as [`ExpandError::ExpansionLimitExceeded`].

use crate::config::ExpansionConfig;
use crate::context::{Argument, MacroContext, TokenStream};
use crate::error::{Diagnostic, ExpandError, ExpandResult};
use crate::registry::MacroRegistry;
use crate::token::{detokenize, tokenize, Token};
use tracing::{debug, trace, warn};

/// Invocations allowed while expanding one source string.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1000;

/// Expands math source against a [`MacroRegistry`].
#[derive(Debug, Clone)]
pub struct Expander<'r> {
    registry: &'r MacroRegistry,
    max_expansions: usize,
}

impl<'r> Expander<'r> {
    pub fn new(registry: &'r MacroRegistry) -> Self {
        Expander {
            registry,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    pub fn from_config(registry: &'r MacroRegistry, config: &ExpansionConfig) -> Self {
        Expander::new(registry).with_max_expansions(config.max_expansions)
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Fully expand `source` and return the resulting markup.
    pub fn expand(&self, source: &str) -> Result<String, Diagnostic> {
        let mut stream = TokenStream::from_source(source);
        let output = self.expand_stream(&mut stream)?;
        Ok(detokenize(&output))
    }

    /// Expand everything left in `stream`, returning the emitted tokens.
    pub fn expand_stream(&self, stream: &mut TokenStream) -> Result<Vec<Token>, Diagnostic> {
        let mut output = Vec::new();
        let mut expansions = 0usize;

        loop {
            let token = stream.pop_token();
            if token.is_eof() {
                break;
            }
            if !self.registry.has(&token.text) {
                output.push(token);
                continue;
            }

            expansions += 1;
            if expansions > self.max_expansions {
                warn!(name = %token.text, limit = self.max_expansions, "expansion limit exceeded");
                return Err(Diagnostic::new(
                    token.text,
                    token.span,
                    ExpandError::ExpansionLimitExceeded {
                        limit: self.max_expansions,
                    },
                ));
            }

            debug!(name = %token.text, expansions, "expanding macro");
            match self.expand_once(&token, stream) {
                Ok(replacement) => stream.push_tokens(replacement),
                Err(error) => {
                    warn!(name = %token.text, %error, "macro expansion aborted");
                    return Err(Diagnostic::new(token.text, token.span, error));
                }
            }
        }

        Ok(output)
    }

    /// Run one invocation and return its substituted replacement tokens.
    fn expand_once(&self, invocation: &Token, stream: &mut TokenStream) -> ExpandResult<Vec<Token>> {
        let Some(expansion) = self.registry.invoke(&invocation.text, stream)? else {
            return Ok(vec![invocation.clone()]);
        };
        trace!(name = %invocation.text, replacement = %expansion.text, "replacement text");

        // replacement tokens inherit the invocation's location for diagnostics
        let mut tokens: Vec<Token> = tokenize(&expansion.text)
            .into_iter()
            .map(|token| Token {
                text: token.text,
                span: invocation.span.clone(),
            })
            .collect();

        if expansion.num_args > 0 {
            let args = stream.consume_args(expansion.num_args)?;
            tokens = substitute(tokens, &args);
        }
        Ok(tokens)
    }
}

/// Replace `#n` with the natural tokens of argument `n`; `##` becomes `#`.
pub fn substitute(tokens: Vec<Token>, args: &[Argument]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token.is("#") {
            if tokens.peek().is_some_and(|next| next.is("#")) {
                tokens.next();
                output.push(token);
                continue;
            }
            let arg = tokens
                .peek()
                .and_then(|next| placeholder_index(&next.text))
                .and_then(|index| args.get(index - 1));
            if let Some(arg) = arg {
                tokens.next();
                output.extend(arg.natural());
                continue;
            }
        }
        output.push(token);
    }

    output
}

fn placeholder_index(text: &str) -> Option<usize> {
    match text.as_bytes() {
        [d @ b'1'..=b'9'] => Some((d - b'0') as usize),
        _ => None,
    }
}
