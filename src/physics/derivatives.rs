//! Derivatives
//!
//! `\dd` and `\pd` render a (possibly powered) differential operator, applied
//! to a following braced group when there is one. `\dv` and `\pdv` build
//! fractions out of those two; the order comes from `[n]` and the variables
//! from the braced groups that follow the function.

use super::aliases;
use crate::context::MacroContext;
use crate::cursor::Cursor;
use crate::error::ExpandResult;
use crate::registry::MacroRegistry;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid digits pattern"));

pub fn register(registry: &mut MacroRegistry) {
    registry.register_handler("\\differential", |ctx| differential(ctx, "\\mathrm{d}"));
    registry.register_handler("\\pd", |ctx| differential(ctx, "\\partial"));
    registry.register_handler("\\derivative", derivative);
    registry.register_handler("\\partialderivative", partial_derivative);
    registry.register("\\variation", "\\delta");
    registry.register("\\functionalderivative", "\\frac{\\delta{#1}}{\\delta{#2}}");

    aliases(
        registry,
        &[
            ("\\dd", "\\differential"),
            ("\\dv", "\\derivative"),
            ("\\pdv", "\\partialderivative"),
            ("\\var", "\\variation"),
            ("\\fdv", "\\functionalderivative"),
        ],
    );
}

/// Whether an order shows as a power: anything symbolic, or a number above one.
pub fn shows_power(order: &str) -> bool {
    if order.is_empty() {
        return false;
    }
    if !DIGITS.is_match(order) {
        return true;
    }
    order.parse::<u64>().map_or(true, |n| n > 1)
}

/// `op` raised to `order` when the order shows.
fn powered(op: &str, order: Option<&str>) -> String {
    match order {
        Some(order) if shows_power(order) => format!("{op}^{{{order}}}"),
        _ => op.to_string(),
    }
}

/// Invocation of `macro_name` (`\dd`/`\pd`) of the given order applied to `arg`.
fn applied(macro_name: &str, order: Option<&str>, arg: &str) -> String {
    match order {
        Some(order) if shows_power(order) => format!("{macro_name}[{order}]{{{arg}}}"),
        _ => format!("{macro_name}{{{arg}}}"),
    }
}

fn differential(ctx: &mut dyn MacroContext, op: &str) -> ExpandResult<String> {
    let order = ctx.square_parameter()?;
    let op = powered(op, order.as_deref());
    match ctx.optional_group()? {
        Some(arg) => Ok(format!("\\mathop{{}}\\!{op}{{{}}}", arg.text())),
        None => Ok(op),
    }
}

/// `\dv[n]{f}{x}`, or `\dv[n]{x}` for the bare operator.
fn derivative(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let order = ctx.square_parameter()?;
    let order = order.as_deref().filter(|order| !order.is_empty());
    let function = ctx.pop_next_arg()?;

    let Some(variable) = ctx.optional_group()? else {
        return Ok(format!(
            "\\frac{{{}}}{{{}}}",
            powered("\\dd", order),
            powered(&applied("\\dd", None, &function), order)
        ));
    };
    Ok(format!(
        "\\frac{{{}}}{{{}}}",
        applied("\\dd", order, &function),
        powered(&applied("\\dd", None, &variable.text()), order)
    ))
}

/// `\pdv[n]{f}{x}`, or `\pdv{f}{x}{y}..` for mixed partials.
fn partial_derivative(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let order = ctx.square_parameter()?;
    let order = order.as_deref().filter(|order| !order.is_empty());
    let function = ctx.pop_next_arg()?;

    if let Some(order) = order {
        let Some(variable) = ctx.optional_group()? else {
            return Ok(format!(
                "\\frac{{{}}}{{{}}}",
                powered("\\pd", Some(order)),
                powered(&applied("\\pd", None, &function), Some(order))
            ));
        };
        return Ok(format!(
            "\\frac{{{}}}{{{}}}",
            applied("\\pd", Some(order), &function),
            powered(&applied("\\pd", None, &variable.text()), Some(order))
        ));
    }

    let variables = ctx.braced_groups()?;
    if variables.is_empty() {
        return Ok(format!(
            "\\frac{{\\partial}}{{{}}}",
            applied("\\pd", None, &function)
        ));
    }
    let count = variables.len().to_string();
    let denominator: String = variables
        .iter()
        .map(|variable| applied("\\pd", None, &variable.text()))
        .collect();
    Ok(format!(
        "\\frac{{{}}}{{{}}}",
        applied("\\pd", Some(&count), &function),
        denominator
    ))
}
