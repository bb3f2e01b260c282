//! Delimiter table
//!
//! Static mapping of opening delimiter tokens to their required closing
//! counterparts, in three flavours:
//!
//! - [`BRACES`]: the plain pairs used by `\qty` and `\mqty`
//! - [`EVAL_BRACES`]: the evaluated-bar pairs used by `\eval`, where every
//!   bracket opener closes on a bar
//! - [`DelimSize`]: the `\big`..`\Bigg` prefixes and their `l`/`r` forms
//!
//! Lookups on an opener outside a table are errors, never silent fallbacks.

use crate::error::{ExpandError, ExpandResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// An opening delimiter together with the closer that terminates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: &'static str,
    pub close: &'static str,
    /// Whether a repeated opener inside the body raises the nesting depth.
    pub nests: bool,
}

impl DelimiterPair {
    const fn new(open: &'static str, close: &'static str, nests: bool) -> Self {
        DelimiterPair { open, close, nests }
    }

    /// Opening delimiter as visible markup (`{` becomes `\{`).
    pub fn rendered_open(&self) -> &'static str {
        if self.open == "{" {
            "\\{"
        } else {
            self.open
        }
    }

    /// Closing delimiter as visible markup (`}` becomes `\}`).
    pub fn rendered_close(&self) -> &'static str {
        if self.close == "}" {
            "\\}"
        } else {
            self.close
        }
    }

    /// A bare `{` opener is the markup's own grouping, not a visible bracket.
    pub fn is_grouping(&self) -> bool {
        self.open == "{"
    }
}

/// A table of delimiter pairs keyed by opener.
#[derive(Debug)]
pub struct DelimiterTable {
    name: &'static str,
    pairs: HashMap<&'static str, DelimiterPair>,
}

impl DelimiterTable {
    fn from_pairs(name: &'static str, pairs: &[DelimiterPair]) -> Self {
        DelimiterTable {
            name,
            pairs: pairs.iter().map(|pair| (pair.open, *pair)).collect(),
        }
    }

    pub fn get(&self, open: &str) -> Option<DelimiterPair> {
        self.pairs.get(open).copied()
    }

    pub fn contains(&self, open: &str) -> bool {
        self.pairs.contains_key(open)
    }

    /// Look up `open`, failing with [`ExpandError::InvalidDelimiterSpecifier`].
    pub fn lookup(&self, open: &str) -> ExpandResult<DelimiterPair> {
        self.get(open)
            .ok_or_else(|| ExpandError::InvalidDelimiterSpecifier {
                found: open.to_string(),
                table: self.name,
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Openers in a stable order.
    pub fn openers(&self) -> Vec<&'static str> {
        let mut openers: Vec<_> = self.pairs.keys().copied().collect();
        openers.sort_unstable();
        openers
    }
}

/// Plain bracket pairs.
pub static BRACES: Lazy<DelimiterTable> = Lazy::new(|| {
    DelimiterTable::from_pairs(
        "braces",
        &[
            DelimiterPair::new("(", ")", true),
            DelimiterPair::new("[", "]", true),
            DelimiterPair::new("{", "}", true),
            DelimiterPair::new("\\{", "\\}", true),
            // open and close coincide, so a bar can never nest
            DelimiterPair::new("|", "|", false),
        ],
    )
});

/// Evaluated-at pairs: bracket openers close on a bar.
pub static EVAL_BRACES: Lazy<DelimiterTable> = Lazy::new(|| {
    DelimiterTable::from_pairs(
        "evaluated braces",
        &[
            DelimiterPair::new("(", "|", false),
            DelimiterPair::new("[", "|", false),
            DelimiterPair::new("{", "}", true),
        ],
    )
});

/// Explicit delimiter sizes, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimSize {
    Big,
    BigCap,
    Bigg,
    BiggCap,
}

impl DelimSize {
    pub const ALL: [DelimSize; 4] = [
        DelimSize::Big,
        DelimSize::BigCap,
        DelimSize::Bigg,
        DelimSize::BiggCap,
    ];

    /// The size prefix as written before a delimiter (`\big`).
    pub fn prefix(self) -> &'static str {
        match self {
            DelimSize::Big => "\\big",
            DelimSize::BigCap => "\\Big",
            DelimSize::Bigg => "\\bigg",
            DelimSize::BiggCap => "\\Bigg",
        }
    }

    /// Left-hand sizing command (`\bigl`).
    pub fn left(self) -> &'static str {
        match self {
            DelimSize::Big => "\\bigl",
            DelimSize::BigCap => "\\Bigl",
            DelimSize::Bigg => "\\biggl",
            DelimSize::BiggCap => "\\Biggl",
        }
    }

    /// Right-hand sizing command (`\bigr`).
    pub fn right(self) -> &'static str {
        match self {
            DelimSize::Big => "\\bigr",
            DelimSize::BigCap => "\\Bigr",
            DelimSize::Bigg => "\\biggr",
            DelimSize::BiggCap => "\\Biggr",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        DelimSize::ALL
            .into_iter()
            .find(|size| size.prefix() == prefix)
    }
}

impl fmt::Display for DelimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Classify the token following `\qty`-style macros.
///
/// Returns `Ok(Some(size))` for a size prefix and `Ok(None)` for anything
/// that may be an opener of `table`. A `\`-prefixed token that is neither is
/// an [`ExpandError::InvalidSizeSpecifier`].
pub fn size_prefix(token: &str, table: &DelimiterTable) -> ExpandResult<Option<DelimSize>> {
    if let Some(size) = DelimSize::from_prefix(token) {
        return Ok(Some(size));
    }
    if token.starts_with('\\') && !table.contains(token) {
        return Err(ExpandError::InvalidSizeSpecifier {
            found: token.to_string(),
        });
    }
    Ok(None)
}
