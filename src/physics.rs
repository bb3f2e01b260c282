//! Physics notation rule set
//!
//! The concrete registrations of the physics package: automatic bracing,
//! vector notation, operators, quick quad text, derivatives, Dirac bra-ket
//! notation and matrix builders. Every rule is a template or a short handler
//! built from the [`crate::cursor::Cursor`] primitives and the
//! [`crate::scanner`].
//!
//! Long names carry the rule; short names are aliases to them (`\qty` to
//! `\quantity`), so overriding a long name also changes its aliases.

pub mod bracing;
pub mod braket;
pub mod derivatives;
pub mod matrices;
pub mod operators;
pub mod text;
pub mod vectors;

use crate::config::NotationConfig;
use crate::context::MacroContext;
use crate::cursor::Cursor;
use crate::registry::MacroRegistry;

/// Install the complete notation into `registry`.
pub fn register(registry: &mut MacroRegistry, config: &NotationConfig) {
    bracing::register(registry, config);
    vectors::register(registry);
    operators::register(registry);
    text::register(registry);
    derivatives::register(registry);
    braket::register(registry);
    matrices::register(registry, config);
    tracing::debug!(macros = registry.len(), "physics notation registered");
}

impl MacroRegistry {
    /// Registry holding the physics notation with default settings.
    pub fn with_physics() -> Self {
        Self::with_physics_config(&NotationConfig::default())
    }

    pub fn with_physics_config(config: &NotationConfig) -> Self {
        let mut registry = Self::new();
        register(&mut registry, config);
        registry
    }
}

/// Register each `(alias, target)` pair.
fn aliases(registry: &mut MacroRegistry, pairs: &[(&str, &str)]) {
    for (alias, target) in pairs {
        registry.alias(*alias, target);
    }
}

/// Register a rule whose starred form renders `starred` and plain form `plain`.
fn register_starred(
    registry: &mut MacroRegistry,
    name: &str,
    starred: &'static str,
    plain: &'static str,
) {
    registry.register_handler(name, move |ctx: &mut dyn MacroContext| {
        let text = if ctx.is_starred() { starred } else { plain };
        Ok(text.to_string())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_group() {
        let registry = MacroRegistry::with_physics();
        for name in [
            "\\qty", "\\vb", "\\sin", "\\qq", "\\dv", "\\ket", "\\mqty", "\\pmat",
        ] {
            assert!(registry.has(name), "{name} missing");
        }
        assert!(registry.len() > 150);
    }

    #[test]
    fn aliases_are_templates() {
        let registry = MacroRegistry::with_physics();
        assert!(registry.resolve("\\qty").unwrap().is_template());
        assert!(!registry.resolve("\\quantity").unwrap().is_template());
    }
}
