//! Basic search units.
//!
//! A compiled search pattern is an ordered list of [`SearchUnit`]s. Each unit is one
//! `(operator, term, field, match type)` instruction for the retrieval engine. The single
//! character codes used by the wire form (`|`, `+`, `-` and `w`, `a`, `r`) are what downstream
//! consumers key off, so they never change.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Field marker used when a phrase was requested but no field was in effect.
pub const ANY_FIELD: &str = "anyfield";

/// How a unit combines with the result set built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Union (`|`). On the first unit it means "start of the result set".
    Or,
    /// Intersection (`+`).
    And,
    /// Difference (`-`).
    AndNot,
}

impl Operator {
    /// Returns the wire code for this operator.
    pub fn code(self) -> char {
        match self {
            Self::Or => '|',
            Self::And => '+',
            Self::AndNot => '-',
        }
    }

    /// Decodes a wire code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '|' => Some(Self::Or),
            '+' => Some(Self::And),
            '-' => Some(Self::AndNot),
            _ => None,
        }
    }

    /// Recognises a standalone boolean word or symbol (`and`, `or`, `not`, `+`, `|`, `-`).
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") || word == "+" {
            Some(Self::And)
        } else if word.eq_ignore_ascii_case("or") || word == "|" {
            Some(Self::Or)
        } else if word.eq_ignore_ascii_case("not") || word == "-" {
            Some(Self::AndNot)
        } else {
            None
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Operator {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => None,
        }
        .ok_or_else(|| UnitError::UnknownOperator(s.to_string()))
    }
}

/// How a unit's term is matched against field content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Tokenized word match.
    Word,
    /// Verbatim match of the whole field value.
    Exact,
    /// Substring match; the term is wrapped in `%` wildcards.
    Partial,
    /// Regular expression match.
    Regexp,
}

impl MatchType {
    /// Returns the wire code. Exact and partial share `a`.
    pub fn code(self) -> char {
        match self {
            Self::Word => 'w',
            Self::Exact | Self::Partial => 'a',
            Self::Regexp => 'r',
        }
    }

    /// Decodes a wire code, using the term to tell partial from exact phrases.
    pub fn from_code(code: char, term: &str) -> Option<Self> {
        match code {
            'w' => Some(Self::Word),
            'a' if is_wildcard_wrapped(term) => Some(Self::Partial),
            'a' => Some(Self::Exact),
            'r' => Some(Self::Regexp),
            _ => None,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Wraps a phrase in `%` wildcards for partial matching.
pub(crate) fn wrap_partial(phrase: &str) -> String {
    format!("%{phrase}%")
}

/// Checks whether a term carries the partial-phrase `%...%` wrapping.
fn is_wildcard_wrapped(term: &str) -> bool {
    term.len() >= 2 && term.starts_with('%') && term.ends_with('%')
}

/// One atomic search instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "WireUnit", try_from = "WireUnit")]
pub struct SearchUnit {
    /// How this unit combines with what precedes it.
    pub operator: Operator,
    /// Literal text to look for.
    pub term: String,
    /// Logical field, physical tag, [`ANY_FIELD`], or empty for "unspecified".
    pub field: String,
    /// Matching strategy for `term`.
    pub match_type: MatchType,
}

impl SearchUnit {
    /// Creates a unit.
    pub fn new(
        operator: Operator,
        term: impl Into<String>,
        field: impl Into<String>,
        match_type: MatchType,
    ) -> Self {
        Self {
            operator,
            term: term.into(),
            field: field.into(),
            match_type,
        }
    }

    /// Builds a unit from its four wire-level parts.
    pub fn from_wire(operator: &str, term: &str, field: &str, code: &str) -> Result<Self, UnitError> {
        let operator = operator.parse()?;
        let mut chars = code.chars();
        let match_type = match (chars.next(), chars.next()) {
            (Some(c), None) => MatchType::from_code(c, term),
            _ => None,
        }
        .ok_or_else(|| UnitError::UnknownMatchType(code.to_string()))?;
        Ok(Self::new(operator, term, field, match_type))
    }

    /// Returns the four wire-level parts of this unit.
    pub fn to_wire(&self) -> [String; 4] {
        [
            self.operator.code().to_string(),
            self.term.clone(),
            self.field.clone(),
            self.match_type.code().to_string(),
        ]
    }
}

impl fmt::Display for SearchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}, {:?}, {:?}, {:?}]",
            self.operator.code().to_string(),
            self.term,
            self.field,
            self.match_type.code().to_string()
        )
    }
}

/// Serde representation: `[operator, term, field, match]`.
#[derive(Serialize, Deserialize)]
struct WireUnit(String, String, String, String);

impl From<SearchUnit> for WireUnit {
    fn from(unit: SearchUnit) -> Self {
        Self(
            unit.operator.code().to_string(),
            unit.term,
            unit.field,
            unit.match_type.code().to_string(),
        )
    }
}

impl TryFrom<WireUnit> for SearchUnit {
    type Error = UnitError;

    fn try_from(wire: WireUnit) -> Result<Self, Self::Error> {
        Self::from_wire(&wire.0, &wire.1, &wire.2, &wire.3)
    }
}
