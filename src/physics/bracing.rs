//! Automatic bracing
//!
//! `\quantity` scans the body after an (optionally sized) opening delimiter
//! and re-emits it between `\left`/`\right` or the explicit size commands.
//! `\evaluated` does the same against the evaluated-bar table, closing on a
//! bar with a strut so the bar spans the whole expression.

use super::{aliases, register_starred};
use crate::config::NotationConfig;
use crate::context::MacroContext;
use crate::cursor::Cursor;
use crate::delimiters::{size_prefix, BRACES, EVAL_BRACES};
use crate::error::ExpandResult;
use crate::registry::MacroRegistry;
use crate::scanner::{scan, scan_rendered, ScanOptions};

const EVAL_CLOSE: &str = "\\rule{0px}{1.2em}\\right|";

pub fn register(registry: &mut MacroRegistry, config: &NotationConfig) {
    let close_at_end = config.close_at_end_of_input;
    registry.register_handler("\\quantity", move |ctx| quantity(ctx, close_at_end));
    registry.register("\\pqty", "\\qty({#1})");
    registry.register("\\bqty", "\\qty[{#1}]");
    registry.register("\\vqty", "\\qty|{#1}|");
    registry.register("\\Bqty", "\\qty{{#1}}");

    register_starred(registry, "\\absolutevalue", "\\lvert{#1}\\rvert", "\\qty|{#1}|");
    register_starred(
        registry,
        "\\norm",
        "\\|{#1}\\|",
        "\\left\\Vert{#1}\\right\\Vert",
    );
    registry.register_handler("\\evaluated", evaluated);
    register_starred(
        registry,
        "\\order",
        "\\mathcal{O}({#1})",
        "\\mathcal{O}\\left(#1\\right)",
    );
    register_starred(registry, "\\commutator", "[{#1},{#2}]", "\\left[#1,#2\\right]");
    register_starred(
        registry,
        "\\anticommutator",
        "\\{{#1},{#2}\\}",
        "\\left\\{#1,#2\\right\\}",
    );

    aliases(
        registry,
        &[
            ("\\qty", "\\quantity"),
            ("\\abs", "\\absolutevalue"),
            ("\\eval", "\\evaluated"),
            ("\\comm", "\\commutator"),
            ("\\acomm", "\\anticommutator"),
            ("\\poissonbracket", "\\anticommutator"),
            ("\\pb", "\\anticommutator"),
        ],
    );
}

/// `\quantity[size](body)`: body between auto-sized or explicitly sized delimiters.
fn quantity(ctx: &mut dyn MacroContext, close_at_end: bool) -> ExpandResult<String> {
    ctx.skip_whitespace();
    let first = ctx.pop_token();
    let size = size_prefix(&first.text, &BRACES)?;
    let open = if size.is_some() {
        ctx.skip_whitespace();
        ctx.pop_token()
    } else {
        first
    };
    let pair = BRACES.lookup(&open.text)?;
    let options = ScanOptions::sized(size).allow_unterminated(close_at_end);
    scan_rendered(ctx, pair, options, true)
}

/// `\evaluated(body|`: body with an invisible or literal opener and a tall closing bar.
fn evaluated(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    // the starred form renders the same
    ctx.is_starred();
    ctx.skip_whitespace();
    let open = ctx.pop_token();
    let pair = EVAL_BRACES.lookup(&open.text)?;
    let scanned = scan(ctx, pair, ScanOptions::default())?;

    let opener = if pair.is_grouping() { "." } else { pair.open };
    Ok(scanned.enclose(&["\\left", opener], &[EVAL_CLOSE]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TokenStream;
    use crate::delimiters::DelimSize;
    use crate::error::ExpandError;

    fn run(
        handler: fn(&mut dyn MacroContext) -> ExpandResult<String>,
        source: &str,
    ) -> (ExpandResult<String>, String) {
        let mut stream = TokenStream::from_source(source);
        let result = handler(&mut stream);
        (result, stream.remaining_text())
    }

    fn strict_quantity(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
        quantity(ctx, false)
    }

    #[test]
    fn quantity_parentheses() {
        let (result, rest) = run(strict_quantity, "(a+(b))c");
        assert_eq!(result.unwrap(), "\\left(a+(b)\\right)");
        assert_eq!(rest, "c");
    }

    #[test]
    fn quantity_sized() {
        for size in DelimSize::ALL {
            let source = format!("{}[x]", size.prefix());
            let (result, _) = run(strict_quantity, &source);
            assert_eq!(
                result.unwrap(),
                format!("{}[x{}]", size.left(), size.right())
            );
        }
    }

    #[test]
    fn quantity_braces_are_escaped() {
        let (result, _) = run(strict_quantity, "{x}");
        assert_eq!(result.unwrap(), "\\left\\{x\\right\\}");
        let (result, _) = run(strict_quantity, "\\{x\\}");
        assert_eq!(result.unwrap(), "\\left\\{x\\right\\}");
    }

    #[test]
    fn quantity_rejects_unknown_opener() {
        let (result, _) = run(strict_quantity, "<x>");
        assert_eq!(
            result,
            Err(ExpandError::InvalidDelimiterSpecifier {
                found: "<".to_string(),
                table: "braces",
            })
        );
        let (result, _) = run(strict_quantity, "\\huge(x)");
        assert_eq!(
            result,
            Err(ExpandError::InvalidSizeSpecifier {
                found: "\\huge".to_string()
            })
        );
    }

    #[test]
    fn quantity_unterminated() {
        let (result, _) = run(strict_quantity, "(x");
        assert_eq!(result, Err(ExpandError::unterminated(")")));

        let mut stream = TokenStream::from_source("(x");
        assert_eq!(quantity(&mut stream, true).unwrap(), "\\left(x\\right)");
    }

    #[test]
    fn evaluated_parenthesis_closes_on_bar() {
        let (result, rest) = run(evaluated, "(f(x)|_0^1");
        assert_eq!(
            result.unwrap(),
            "\\left(f(x)\\rule{0px}{1.2em}\\right|"
        );
        assert_eq!(rest, "_0^1");
    }

    #[test]
    fn evaluated_brace_is_invisible() {
        let (result, _) = run(evaluated, "*{x^2}_0");
        assert_eq!(result.unwrap(), "\\left.x^2\\rule{0px}{1.2em}\\right|");
    }

    #[test]
    fn evaluated_unterminated_names_the_closer() {
        let (result, _) = run(evaluated, "(f(x");
        assert_eq!(result, Err(ExpandError::unterminated("|")));
        let (result, _) = run(evaluated, "{x^2");
        assert_eq!(result, Err(ExpandError::unterminated("}")));
    }

    #[test]
    fn evaluated_rejects_bar_opener() {
        let (result, _) = run(evaluated, "|x|");
        assert_eq!(
            result,
            Err(ExpandError::InvalidDelimiterSpecifier {
                found: "|".to_string(),
                table: "evaluated braces",
            })
        );
    }
}
