//! Washing of request arguments and raw patterns.
//!
//! Request parameters may arrive either as a single value or as a list of values. Search
//! code wants one shape, so [`wash_url_argument`] coerces whatever arrived into the requested
//! kind. [`wash_pattern`] tidies the text typed into a search box before compilation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// A request argument as it arrived: one value or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlArgument {
    /// A single value.
    Scalar(String),
    /// Zero or more values.
    Sequence(Vec<String>),
}

impl UrlArgument {
    /// Returns the first value, or the empty string for an empty sequence.
    pub fn head(&self) -> &str {
        match self {
            Self::Scalar(value) => value,
            Self::Sequence(values) => values.first().map_or("", String::as_str),
        }
    }
}

impl From<&str> for UrlArgument {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for UrlArgument {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for UrlArgument {
    fn from(values: Vec<String>) -> Self {
        Self::Sequence(values)
    }
}

impl From<&[&str]> for UrlArgument {
    fn from(values: &[&str]) -> Self {
        Self::Sequence(values.iter().map(|v| v.to_string()).collect())
    }
}

/// The shape an argument should be washed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// A base-10 integer.
    Int,
    /// A single string.
    Str,
    /// A list of strings.
    List,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::List => "list",
        })
    }
}

impl FromStr for ArgKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            "list" => Ok(Self::List),
            _ => Err(UnitError::UnknownArgKind(s.to_string())),
        }
    }
}

/// A washed argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WashedArgument {
    /// Result of washing to [`ArgKind::Int`].
    Int(i64),
    /// Result of washing to [`ArgKind::Str`].
    Str(String),
    /// Result of washing to [`ArgKind::List`].
    List(Vec<String>),
}

/// Coerces a request argument into `kind`.
///
/// Lists keep the argument's values as they arrived, wrapping a single value. Strings and
/// integers only look at the first value. An integer that does not parse becomes 0.
pub fn wash_url_argument(value: &UrlArgument, kind: ArgKind) -> WashedArgument {
    match kind {
        ArgKind::List => match value {
            UrlArgument::Scalar(v) => WashedArgument::List(vec![v.clone()]),
            UrlArgument::Sequence(values) => WashedArgument::List(values.clone()),
        },
        ArgKind::Str => WashedArgument::Str(value.head().to_string()),
        ArgKind::Int => WashedArgument::Int(value.head().trim().parse().unwrap_or(0)),
    }
}

/// Tidies a raw search pattern.
///
/// Trims the pattern, collapses runs of whitespace outside quotes to a single space, and
/// drops the truncation wildcard `*` from the end of bare words. Quoted phrases and regexps
/// are left as typed.
pub fn wash_pattern(pattern: &str) -> String {
    let mut washed = String::with_capacity(pattern.len());
    let mut rest = pattern.trim();

    while !rest.is_empty() {
        let token_len = quoted_len(rest)
            .unwrap_or_else(|| rest.find(char::is_whitespace).unwrap_or(rest.len()));
        let (token, tail) = rest.split_at(token_len);
        rest = tail.trim_start();

        let token = if quoted_len(token).is_some() {
            token
        } else {
            token.trim_end_matches('*')
        };
        if token.is_empty() {
            continue;
        }
        if !washed.is_empty() {
            washed.push(' ');
        }
        washed.push_str(token);
    }

    washed
}

/// Length of a closed quote or regexp at the start of `text`, including any word glued to it.
fn quoted_len(text: &str) -> Option<usize> {
    let body_start = text.find(|c: char| !matches!(c, '+' | '|' | '-'))?;
    let body = &text[body_start..];
    let (colon, body) = match body.find(':') {
        Some(idx) if body[..idx].bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') => {
            (idx + 1, &body[idx + 1..])
        }
        _ => (0, body),
    };
    let delimiter = body.chars().next().filter(|c| matches!(c, '"' | '\'' | '/'))?;
    let close = body[1..].find(delimiter)? + 2;
    let glued = body[close..]
        .find(char::is_whitespace)
        .unwrap_or(body.len() - close);
    Some(body_start + colon + close + glued)
}
