//! Dirac bra-ket notation
//!
//! The second argument of `\ip` and `\op` is optional: without one the macro
//! renders the self product (`\ip{a}` is `<a|a>`).

use super::aliases;
use crate::context::MacroContext;
use crate::cursor::Cursor;
use crate::error::ExpandResult;
use crate::registry::MacroRegistry;

pub fn register(registry: &mut MacroRegistry) {
    registry.register("\\ket", "\\left|{#1}\\right>");
    registry.register_handler("\\bra", bra);
    registry.register_handler("\\innerproduct", inner_product);
    registry.register_handler("\\outerproduct", outer_product);
    registry.register_handler("\\expectationvalue", expectation_value);
    registry.register_handler("\\matrixelement", matrix_element);

    aliases(
        registry,
        &[
            ("\\braket", "\\innerproduct"),
            ("\\ip", "\\innerproduct"),
            ("\\dyad", "\\outerproduct"),
            ("\\ketbra", "\\outerproduct"),
            ("\\op", "\\outerproduct"),
            ("\\expval", "\\expectationvalue"),
            ("\\ev", "\\expectationvalue"),
            ("\\matrixel", "\\matrixelement"),
            ("\\mel", "\\matrixelement"),
        ],
    );
}

/// `\bra{a}`, absorbing a directly following `\ket{b}` into `<a|b>`.
fn bra(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let a = ctx.pop_next_arg()?;
    if !ctx.next_is("\\ket") {
        return Ok(format!("\\left<{{{a}}}\\right|"));
    }
    ctx.pop_token();
    let b = ctx.pop_next_arg()?;
    Ok(format!("\\left<{{{a}}}\\middle|{{{b}}}\\right>"))
}

fn inner_product(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let a = ctx.pop_next_arg()?;
    let b = ctx.optional_group()?.map_or_else(|| a.clone(), |arg| arg.text());
    Ok(format!("\\left<{{{a}}}\\middle|{{{b}}}\\right>"))
}

fn outer_product(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let a = ctx.pop_next_arg()?;
    let b = ctx.optional_group()?.map_or_else(|| a.clone(), |arg| arg.text());
    Ok(format!("\\left|{{{a}}}\\middle>\\middle<{{{b}}}\\right|"))
}

/// `\ev{A}` is `<A>`; `\ev{A}{psi}` is `<psi|A|psi>`.
fn expectation_value(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let a = ctx.pop_next_arg()?;
    match ctx.optional_group()? {
        None => Ok(format!("\\left<{{{a}}}\\right>")),
        Some(state) => {
            let b = state.text();
            Ok(format!(
                "\\left<{{{b}}}\\middle|{{{a}}}\\middle|{{{b}}}\\right>"
            ))
        }
    }
}

fn matrix_element(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let args = ctx.consume_args(3)?;
    let [a, b, c] = [&args[0], &args[1], &args[2]].map(|arg| arg.text());
    Ok(format!(
        "\\left<{{{a}}}\\middle|{{{b}}}\\middle|{{{c}}}\\right>"
    ))
}
