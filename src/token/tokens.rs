//! Token definitions
//!
//! [`RawToken`] is the `logos` classification of the source; [`Token`] is the
//! unit handed to macro handlers. Handlers only ever read [`Token::text`].
use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Text of the end-of-stream sentinel.
pub const EOF: &str = "EOF";

/// Lexical classes of the math markup
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"%[^\n]*")]
pub enum RawToken {
    // `\alpha`, `\left`, `\@ifstar`; trailing whitespace is part of the match
    #[regex(r"\\[a-zA-Z@]+[ \t\r\n]*")]
    ControlWord,

    // `\{`, `\|`, `\\`, `\,`
    #[regex(r"\\[^a-zA-Z@]")]
    ControlSymbol,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[^\\ \t\r\n%]")]
    Char,
}

/// One token of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Literal spelling (`"\\qty"`, `"("`, `" "`, or [`EOF`]).
    pub text: String,
    /// Byte range in the source; `None` for tokens synthesized from replacement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Range<usize>>,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            text: text.into(),
            span: Some(span),
        }
    }

    /// A token with no source location.
    pub fn synthetic(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            span: None,
        }
    }

    /// The end-of-stream sentinel.
    pub fn eof() -> Self {
        Token::synthetic(EOF)
    }

    pub fn is_eof(&self) -> bool {
        self.text == EOF
    }

    pub fn is_whitespace(&self) -> bool {
        self.text == " "
    }

    /// `\` followed by letters only.
    pub fn is_control_word(&self) -> bool {
        self.text
            .strip_prefix('\\')
            .is_some_and(|name| {
                !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '@')
            })
    }

    /// Control word or control symbol.
    pub fn is_control_sequence(&self) -> bool {
        self.text.starts_with('\\') && self.text.len() > 1
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
