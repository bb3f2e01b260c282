//! Detokenizer
//!
//! Joins tokens back into markup text. A control word directly followed by a
//! letter gets a separating space, otherwise `\left` and `x` would fuse into
//! the unrelated `\leftx`.
use crate::token::tokens::Token;

/// Detokenize tokens (in natural left-to-right order) into a string
pub fn detokenize<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut result = String::new();
    let mut after_control_word = false;

    for token in tokens {
        if after_control_word && starts_with_letter(&token.text) {
            result.push(' ');
        }
        result.push_str(&token.text);
        after_control_word = token.is_control_word();
    }

    result
}

fn starts_with_letter(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '@')
}
