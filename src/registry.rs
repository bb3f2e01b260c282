//! Macro registry
//!
//! Associates an invocable name with a [`MacroDefinition`]: either a literal
//! replacement template (with `#1`..`#9` placeholders) or a handler that reads
//! from the cursor and returns replacement text. Registering a name again
//! replaces the previous rule. An alias is a template naming another macro;
//! the registry does no recursion of its own, the host re-expands the text.

use crate::context::MacroContext;
use crate::error::ExpandResult;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handler signature: read what is needed from the cursor, return replacement text.
pub type HandlerFn = dyn Fn(&mut dyn MacroContext) -> ExpandResult<String> + Send + Sync;

/// The rule bound to a macro name.
#[derive(Clone)]
pub enum MacroDefinition {
    /// Fixed replacement text, possibly with positional placeholders.
    Template(String),
    /// Dynamic rule computed from the token stream.
    Handler(Arc<HandlerFn>),
}

impl MacroDefinition {
    pub fn template(text: impl Into<String>) -> Self {
        MacroDefinition::Template(text.into())
    }

    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&mut dyn MacroContext) -> ExpandResult<String> + Send + Sync + 'static,
    {
        MacroDefinition::Handler(Arc::new(handler))
    }

    pub fn is_template(&self) -> bool {
        matches!(self, MacroDefinition::Template(_))
    }
}

impl fmt::Debug for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroDefinition::Template(text) => f.debug_tuple("Template").field(text).finish(),
            MacroDefinition::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<&str> for MacroDefinition {
    fn from(text: &str) -> Self {
        MacroDefinition::template(text)
    }
}

impl From<String> for MacroDefinition {
    fn from(text: String) -> Self {
        MacroDefinition::Template(text)
    }
}

/// Replacement produced by one invocation, before placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansion {
    pub text: String,
    /// Arguments the host must gather after the invocation (highest `#n`).
    pub num_args: usize,
}

impl MacroExpansion {
    pub fn new(text: String) -> Self {
        let num_args = count_placeholders(&text);
        MacroExpansion { text, num_args }
    }
}

/// Highest `#n` placeholder index in `text`; `##` is an escaped `#`.
pub fn count_placeholders(text: &str) -> usize {
    let mut highest = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        if let Some(d @ '1'..='9') = chars.next() {
            highest = highest.max(d as usize - '0' as usize);
        }
    }
    highest
}

/// Registry of macro rules keyed by name (including the leading `\`).
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, MacroDefinition>,
}

impl MacroRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        MacroRegistry {
            macros: HashMap::new(),
        }
    }

    /// Register a rule; an existing rule with the same name is replaced.
    pub fn register(&mut self, name: impl Into<String>, definition: impl Into<MacroDefinition>) {
        self.macros.insert(name.into(), definition.into());
    }

    /// Register a handler function.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut dyn MacroContext) -> ExpandResult<String> + Send + Sync + 'static,
    {
        self.register(name, MacroDefinition::handler(handler));
    }

    /// Make `name` expand to an invocation of `target`.
    pub fn alias(&mut self, name: impl Into<String>, target: &str) {
        self.register(name, MacroDefinition::template(target));
    }

    /// Current rule for `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Run the rule for `name` against the cursor.
    ///
    /// Returns `Ok(None)` when `name` is not registered.
    pub fn invoke(
        &self,
        name: &str,
        ctx: &mut dyn MacroContext,
    ) -> ExpandResult<Option<MacroExpansion>> {
        let Some(definition) = self.resolve(name) else {
            return Ok(None);
        };
        let text = match definition {
            MacroDefinition::Template(text) => text.clone(),
            MacroDefinition::Handler(handler) => handler(ctx)?,
        };
        Ok(Some(MacroExpansion::new(text)))
    }

    /// All registered names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.macros.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("macros", &self.macros.len())
            .finish()
    }
}
