//! Quick quad text
//!
//! `\qq{word}` and the fixed `\q<word>` macros set a word of text padded with
//! quads; the starred forms drop the leading quad.

use super::aliases;
use crate::cursor::Cursor;
use crate::registry::MacroRegistry;

pub const QUICK_WORDS: &[(&str, &str)] = &[
    ("qcc", "c.c."),
    ("qif", "if"),
    ("qthen", "then"),
    ("qelse", "else"),
    ("qotherwise", "otherwise"),
    ("qunless", "unless"),
    ("qgiven", "given"),
    ("qusing", "using"),
    ("qassume", "assume"),
    ("qsince", "since"),
    ("qlet", "let"),
    ("qfor", "for"),
    ("qall", "all"),
    ("qeven", "even"),
    ("qodd", "odd"),
    ("qinteger", "integer"),
    ("qand", "and"),
    ("qor", "or"),
    ("qas", "as"),
    ("qin", "in"),
];

fn quad_text(starred: bool, text: &str) -> String {
    let lead = if starred { "" } else { "\\quad" };
    format!("{lead}\\text{{{text}}}\\quad")
}

pub fn register(registry: &mut MacroRegistry) {
    registry.register_handler("\\qqtext", |ctx| {
        let starred = ctx.is_starred();
        let text = ctx.pop_next_arg()?;
        Ok(quad_text(starred, &text))
    });
    registry.register("\\qcomma", ",\\quad");

    for (name, text) in QUICK_WORDS {
        registry.register_handler(format!("\\{name}"), move |ctx| {
            Ok(quad_text(ctx.is_starred(), text))
        });
    }

    aliases(registry, &[("\\qq", "\\qqtext"), ("\\qc", "\\qcomma")]);
}
