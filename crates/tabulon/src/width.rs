//! Column width tokens.
//!
//! Widths are positional: the i-th token sizes the i-th rendered column.
//! Columns past the end of the width list use [`WidthToken::Auto`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// How a rendered column is sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WidthRaw", into = "WidthRaw")]
pub enum WidthToken {
    /// Size the column from its content.
    #[default]
    Auto,
    /// Percentage of the table's total width.
    Percent(f64),
    /// Fixed size in display columns.
    Fixed(usize),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthRaw {
    Fixed(usize),
    Token(String),
}

impl From<WidthToken> for WidthRaw {
    fn from(width: WidthToken) -> Self {
        match width {
            WidthToken::Fixed(n) => WidthRaw::Fixed(n),
            other => WidthRaw::Token(other.to_string()),
        }
    }
}

impl TryFrom<WidthRaw> for WidthToken {
    type Error = TableError;

    fn try_from(raw: WidthRaw) -> Result<Self, Self::Error> {
        match raw {
            WidthRaw::Fixed(n) => Ok(WidthToken::Fixed(n)),
            WidthRaw::Token(s) => s.parse(),
        }
    }
}

impl FromStr for WidthToken {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || TableError::InvalidWidth(s.to_string());

        if token.eq_ignore_ascii_case("auto") {
            return Ok(WidthToken::Auto);
        }
        if let Some(pct) = token.strip_suffix('%') {
            let pct: f64 = pct.trim().parse().map_err(|_| invalid())?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(invalid());
            }
            return Ok(WidthToken::Percent(pct));
        }
        let digits = token
            .strip_suffix("px")
            .or_else(|| token.strip_suffix("ch"))
            .unwrap_or(token);
        digits
            .trim()
            .parse::<usize>()
            .map(WidthToken::Fixed)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for WidthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthToken::Auto => f.write_str("auto"),
            WidthToken::Percent(p) => write!(f, "{}%", p),
            WidthToken::Fixed(n) => write!(f, "{}", n),
        }
    }
}

/// Width token for the column at `position`, `auto` past the end of `widths`.
pub fn width_at(widths: Option<&[WidthToken]>, position: usize) -> WidthToken {
    widths
        .and_then(|w| w.get(position))
        .copied()
        .unwrap_or_default()
}
