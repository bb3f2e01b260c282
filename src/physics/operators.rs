//! Operators
//!
//! Trigonometric, hyperbolic and inverse functions take an optional power in
//! brackets (`\sin[2]` renders sin squared). Re-expansion of the emitted
//! `\sin^{2}` finds no bracket and settles on `\operatorname{sin}^{2}`.

use super::aliases;
use crate::cursor::Cursor;
use crate::registry::MacroRegistry;

pub const TRIG_FUNCTIONS: [&str; 24] = [
    "sin", "cos", "tan", "csc", "sec", "cot", "sinh", "cosh", "tanh", "csch", "sech", "coth",
    "arcsin", "arccos", "arctan", "arccsc", "arcsec", "arccot", "asin", "acos", "atan", "acsc",
    "asec", "acot",
];

const LONG_NAMES: &[(&str, &str)] = &[
    ("\\sine", "\\sin"),
    ("\\cosine", "\\cos"),
    ("\\tangent", "\\tan"),
    ("\\cosecant", "\\csc"),
    ("\\secant", "\\sec"),
    ("\\cotangent", "\\cot"),
    ("\\hypsine", "\\sinh"),
    ("\\hypcosine", "\\cosh"),
    ("\\hyptangent", "\\tanh"),
    ("\\hypcosecant", "\\csch"),
    ("\\hypsecant", "\\sech"),
    ("\\hypcotangent", "\\coth"),
    ("\\arcsine", "\\arcsin"),
    ("\\arccosine", "\\arccos"),
    ("\\arctangent", "\\arctan"),
    ("\\arccosecant", "\\arccsc"),
    ("\\arcsecant", "\\arcsec"),
    ("\\arccotangent", "\\arccot"),
    ("\\asine", "\\arcsin"),
    ("\\acosine", "\\arccos"),
    ("\\atangent", "\\arctan"),
    ("\\acosecant", "\\arccsc"),
    ("\\asecant", "\\arcsec"),
    ("\\acotangent", "\\arccot"),
    ("\\exponential", "\\exp"),
    ("\\logarithm", "\\log"),
    ("\\naturallogarithm", "\\ln"),
    ("\\determinant", "\\det"),
    ("\\Probability", "\\Pr"),
    ("\\tr", "\\trace"),
    ("\\Tr", "\\Trace"),
    ("\\pv", "\\principalvalue"),
];

pub fn register(registry: &mut MacroRegistry) {
    for op in TRIG_FUNCTIONS {
        registry.register_handler(format!("\\{op}"), move |ctx| {
            Ok(match ctx.square_parameter()? {
                Some(power) if !power.is_empty() => format!("\\{op}^{{{power}}}"),
                _ => format!("\\operatorname{{{op}}}"),
            })
        });
    }

    registry.register("\\trace", "\\operatorname{tr}");
    registry.register("\\Trace", "\\operatorname{Tr}");
    registry.register("\\rank", "\\operatorname{rank}");
    registry.register("\\erf", "\\operatorname{erf}");
    registry.register("\\Res", "\\operatorname{Res}");
    registry.register("\\principalvalue", "\\mathcal{P}");
    registry.register("\\PV", "\\operatorname{P.V.}");
    registry.register("\\Re", "\\operatorname{Re}\\left\\{#1\\right\\}");
    registry.register("\\real", "\\mathfrak{R}");
    registry.register("\\Im", "\\operatorname{Im}\\left\\{#1\\right\\}");
    registry.register("\\imaginary", "\\mathfrak{I}");

    aliases(registry, LONG_NAMES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::Expander;
    use rstest::rstest;

    fn expand(source: &str) -> String {
        let mut registry = MacroRegistry::new();
        register(&mut registry);
        Expander::new(&registry).expand(source).unwrap()
    }

    #[rstest]
    #[case("\\sin x", "\\operatorname{sin}x")]
    #[case("\\sin[2]x", "\\operatorname{sin}^{2}x")]
    #[case("\\arccosh", "\\arccosh")]
    #[case("\\hypsine[n] x", "\\operatorname{sinh}^{n} x")]
    #[case("\\asine{y}", "\\operatorname{arcsin}{y}")]
    #[case("\\cos[]t", "\\operatorname{cos}t")]
    fn trig_functions(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(expand(source), expected);
    }

    #[test]
    fn named_operators() {
        assert_eq!(expand("\\tr\\rho"), "\\operatorname{tr}\\rho");
        assert_eq!(expand("\\Tr A"), "\\operatorname{Tr}A");
        assert_eq!(expand("\\pv\\int"), "\\mathcal{P}\\int");
        assert_eq!(expand("\\exponential"), "\\exp");
    }

    #[test]
    fn real_and_imaginary_parts() {
        assert_eq!(expand("\\Re{z}"), "\\operatorname{Re}\\left\\{z\\right\\}");
        assert_eq!(expand("\\Im z"), "\\operatorname{Im}\\left\\{z\\right\\}");
        assert_eq!(expand("\\real"), "\\mathfrak{R}");
    }
}
