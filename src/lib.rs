//! # physmac
//!
//! Macro expansion for physics notation in LaTeX-like math markup.
//!
//! The crate is split along the path a macro invocation takes:
//!
//! - [`token`]: the `logos` tokenizer and its inverse, [`token::detokenize`]
//! - [`context`]: the cursor contract a handler reads from ([`MacroContext`])
//! - [`cursor`]: lookahead primitives on top of it (stars, `[...]`, groups)
//! - [`delimiters`] and [`scanner`]: matching a delimited body
//! - [`registry`]: name to rule bindings
//! - [`expander`]: the host loop that re-expands replacement text
//! - [`physics`]: the notation itself
//!
//! ```text
//! \abs{x}        ->  \left|{x}\right|
//! \dmat{1,2}     ->  \begin{matrix}{1}&{0}\\{0}&{2}\end{matrix}
//! ```
//!
//! Configuration ([`config`]) is layered over embedded defaults, and the
//! library logs through `tracing` only.

pub mod config;
pub mod context;
pub mod cursor;
pub mod delimiters;
pub mod error;
pub mod expander;
pub mod physics;
pub mod registry;
pub mod scanner;
pub mod token;

pub use config::{Loader, PhysmacConfig};
pub use context::{Argument, MacroContext, TokenStream};
pub use cursor::Cursor;
pub use error::{Diagnostic, ExpandError, ExpandResult};
pub use expander::Expander;
pub use registry::{MacroDefinition, MacroRegistry};
pub use token::Token;

/// Expand `source` with the default physics notation.
pub fn expand(source: &str) -> Result<String, Diagnostic> {
    let registry = MacroRegistry::with_physics();
    Expander::new(&registry).expand(source)
}

/// Expand `source` with notation and host settings taken from `config`.
pub fn expand_with_config(source: &str, config: &PhysmacConfig) -> Result<String, Diagnostic> {
    let registry = MacroRegistry::with_physics_config(&config.notation);
    Expander::from_config(&registry, &config.expansion).expand(source)
}
