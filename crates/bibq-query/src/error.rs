//! Error types for decoding wire-level vocabulary.
//!
//! Compilation itself never fails. These errors only arise when text coming from outside
//! (wire units, command-line flags, configuration) names an operator, match type, argument
//! kind, or matching mode that does not exist.

use thiserror::Error;

/// An unrecognised code or name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Operator code other than `|`, `+`, `-`.
    #[error("unknown operator code: {0:?}")]
    UnknownOperator(String),

    /// Match-type code other than `w`, `a`, `r`.
    #[error("unknown match type code: {0:?}")]
    UnknownMatchType(String),

    /// Argument kind other than `int`, `str`, `list`.
    #[error("unknown argument kind: {0:?}")]
    UnknownArgKind(String),

    /// Matching mode that is neither a known name nor a legacy code.
    #[error("unknown matching mode: {0:?}")]
    UnknownMatchingMode(String),
}

impl UnitError {
    /// Returns a hint listing the accepted values.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownOperator(_) => "operators are '|', '+' and '-'",
            Self::UnknownMatchType(_) => "match types are 'w', 'a' and 'r'",
            Self::UnknownArgKind(_) => "argument kinds are int, str and list",
            Self::UnknownMatchingMode(_) => {
                "matching modes are all, any, exact, partial and regexp"
            }
        }
    }
}
