//! Matrix builders
//!
//! `\mqty` wraps a scanned body in a matrix environment between the scanned
//! delimiters; a bare `{` opener means no visible delimiters at all. The
//! generators (`\imat`, `\xmat`, `\zmat`, `\pmat`, `\dmat`, `\admat`) emit a
//! complete `matrix` environment. Their dimensions are checked against
//! `[notation] max_matrix_size` before anything is built.

use super::aliases;
use crate::config::NotationConfig;
use crate::context::MacroContext;
use crate::cursor::Cursor;
use crate::delimiters::BRACES;
use crate::error::{ExpandError, ExpandResult};
use crate::registry::MacroRegistry;
use crate::scanner::{scan, ScanOptions};
use crate::token::{detokenize, tokenize};

const PAULI_SELECTORS: &str = "0, 1, 2, 3, x, y, z";

pub fn register(registry: &mut MacroRegistry, config: &NotationConfig) {
    registry.register_handler("\\matrixquantity", matrix_quantity);
    registry.register(
        "\\smallmatrixquantity",
        "\\begin{smallmatrix}#1\\end{smallmatrix}",
    );
    registry.register(
        "\\matrixdeterminant",
        "\\left|\\begin{matrix}#1\\end{matrix}\\right|",
    );
    let limit = config.max_matrix_size;
    registry.register_handler("\\identitymatrix", move |ctx| identity_matrix(ctx, limit));
    registry.register_handler("\\xmatrix", move |ctx| x_matrix(ctx, limit));
    registry.register_handler("\\zeromatrix", move |ctx| zero_matrix(ctx, limit));
    registry.register_handler("\\paulimatrix", pauli_matrix);

    let fill = config.matrix_fill.clone();
    registry.register_handler("\\diagonalmatrix", move |ctx| {
        diagonal(ctx, &fill, limit, |i, _| i)
    });
    let fill = config.matrix_fill.clone();
    registry.register_handler("\\antidiagonalmatrix", move |ctx| {
        diagonal(ctx, &fill, limit, |i, n| n - i - 1)
    });

    aliases(
        registry,
        &[
            ("\\mqty", "\\matrixquantity"),
            ("\\smqty", "\\smallmatrixquantity"),
            ("\\mdet", "\\matrixdeterminant"),
            ("\\imat", "\\identitymatrix"),
            ("\\xmat", "\\xmatrix"),
            ("\\zmat", "\\zeromatrix"),
            ("\\pmat", "\\paulimatrix"),
            ("\\dmat", "\\diagonalmatrix"),
            ("\\admat", "\\antidiagonalmatrix"),
        ],
    );
}

/// Wrap rows in a `matrix` environment.
fn environment(rows: &[String]) -> String {
    format!("\\begin{{matrix}}{}\\end{{matrix}}", rows.join("\\\\"))
}

fn matrix_quantity(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    ctx.skip_whitespace();
    let open = ctx.pop_token();
    let pair = BRACES.lookup(&open.text)?;
    let scanned = scan(ctx, pair, ScanOptions::default())?;

    if pair.is_grouping() {
        return Ok(scanned.enclose(&["\\begin{matrix}"], &["\\end{matrix}"]));
    }
    Ok(scanned.enclose(
        &["\\left", pair.rendered_open(), "\\begin{matrix}"],
        &["\\end{matrix}", "\\right", pair.rendered_close()],
    ))
}

/// Check a matrix dimension against the configured maximum.
fn bounded(size: usize, limit: usize) -> ExpandResult<usize> {
    if size > limit {
        return Err(ExpandError::MatrixTooLarge { found: size, limit });
    }
    Ok(size)
}

/// Pop an integer matrix dimension, bounded by `limit`.
fn pop_dimension(ctx: &mut dyn MacroContext, limit: usize) -> ExpandResult<usize> {
    bounded(ctx.pop_integer()?, limit)
}

/// `\imat{n}`: delegates to `\dmat` with an explicit zero fill.
fn identity_matrix(ctx: &mut dyn MacroContext, limit: usize) -> ExpandResult<String> {
    let n = pop_dimension(ctx, limit)?;
    Ok(format!("\\dmat[0]{{{}}}", vec!["1"; n].join(",")))
}

/// `\xmat{x}{n}{m}`: n by m copies of `x`; starred forms index them.
fn x_matrix(ctx: &mut dyn MacroContext, limit: usize) -> ExpandResult<String> {
    let labelled = ctx.is_starred();
    let x = ctx.pop_next_arg()?;
    let n = pop_dimension(ctx, limit)?;
    let m = pop_dimension(ctx, limit)?;

    let rows: Vec<String> = (1..=n)
        .map(|i| {
            (1..=m)
                .map(|j| {
                    if !labelled || (n == 1 && m == 1) {
                        return x.clone();
                    }
                    let row = if n > 1 { i.to_string() } else { String::new() };
                    let column = if m > 1 { j.to_string() } else { String::new() };
                    format!("{x}_{{{row}{column}}}")
                })
                .collect::<Vec<_>>()
                .join("&")
        })
        .collect();
    Ok(environment(&rows))
}

fn zero_matrix(ctx: &mut dyn MacroContext, limit: usize) -> ExpandResult<String> {
    let n = pop_dimension(ctx, limit)?;
    let m = pop_dimension(ctx, limit)?;
    let row = vec!["0"; m].join("&");
    Ok(environment(&vec![row; n]))
}

fn pauli_matrix(ctx: &mut dyn MacroContext) -> ExpandResult<String> {
    let selector = ctx.pop_next_arg()?;
    let body = match selector.as_str() {
        "0" => "1 & 0\\\\ 0 & 1",
        "1" | "x" => "0 & 1\\\\ 1 & 0",
        "2" | "y" => "0 & -i\\\\ i & 0",
        "3" | "z" => "1 & 0\\\\ 0 & -1",
        _ => {
            return Err(ExpandError::InvalidEnumeratedArgument {
                found: selector,
                expected: PAULI_SELECTORS,
            })
        }
    };
    Ok(format!("\\begin{{matrix}}{body}\\end{{matrix}}"))
}

/// Square matrix with `elements` on the cells chosen by `place(row, size)`.
fn diagonal(
    ctx: &mut dyn MacroContext,
    default_fill: &str,
    limit: usize,
    place: fn(usize, usize) -> usize,
) -> ExpandResult<String> {
    let fill = ctx
        .square_parameter()?
        .unwrap_or_else(|| default_fill.to_string());
    let list = ctx.pop_next_arg()?;
    let elements: Vec<&str> = list.split(',').collect();
    let size = bounded(elements.len(), limit)?;

    let rows: Vec<String> = elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let mut cells = vec![fill.clone(); size];
            cells[place(i, size)] = expand_element(element);
            cells
                .iter()
                .map(|cell| format!("{{{cell}}}"))
                .collect::<Vec<_>>()
                .join("&")
        })
        .collect();
    Ok(environment(&rows))
}

/// An element holding `&` or `\\` becomes a nested matrix; plain elements
/// lose their whitespace.
pub fn expand_element(element: &str) -> String {
    if element.contains('&') || element.contains("\\\\") {
        let rows: Vec<String> = element
            .split("\\\\")
            .map(|row| {
                row.split('&')
                    .map(expand_element)
                    .collect::<Vec<_>>()
                    .join("&")
            })
            .collect();
        return environment(&rows);
    }
    let tokens = tokenize(element);
    detokenize(tokens.iter().filter(|token| !token.is_whitespace()))
}
