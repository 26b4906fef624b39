//! Search pattern compiler.
//!
//! Compiles a user-typed pattern into an ordered list of [`SearchUnit`]s.
//!
//! # Syntax
//!
//! ```text
//! pattern  → segment (FIELD ":" segment)*
//! segment  → item*
//! item     → OPWORD | [OPSYM] WORD | [OPSYM] PHRASE
//! OPWORD   → "and" | "or" | "not" | "+" | "|" | "-"
//! OPSYM    → "+" | "|" | "-"            (glued, no whitespace)
//! PHRASE   → '"' text '"' | "'" text "'" | "/" regexp "/"
//! ```
//!
//! Every input compiles. Unclosed delimiters, partial phrases or regexps without a field,
//! and operator symbols run together without whitespace all degrade to plain words.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::UnitError,
    field::{FieldKind, FieldResolver},
    lexer::{Delimiter, Segment, Token, split_segments, symbol_operator, tokenize_segment},
    unit::{ANY_FIELD, MatchType, Operator, SearchUnit, wrap_partial},
};

/// How the caller wants the pattern interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// Full syntax; adjacent words are intersected.
    #[default]
    #[serde(alias = "a")]
    All,
    /// Full syntax; adjacent words are united.
    #[serde(alias = "o")]
    Any,
    /// The whole pattern is one exact phrase.
    #[serde(alias = "e")]
    Exact,
    /// The whole pattern is one partial phrase.
    #[serde(alias = "p")]
    Partial,
    /// The whole pattern is one regular expression.
    #[serde(alias = "r")]
    Regexp,
}

impl MatchingMode {
    /// All modes, in display order.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Any,
        Self::Exact,
        Self::Partial,
        Self::Regexp,
    ];

    /// Returns the mode's name.
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::Regexp => "regexp",
        }
    }
}

impl fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchingMode {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "a" => Ok(Self::All),
            "any" | "o" => Ok(Self::Any),
            "exact" | "e" => Ok(Self::Exact),
            "partial" | "p" => Ok(Self::Partial),
            "regexp" | "regex" | "r" => Ok(Self::Regexp),
            _ => Err(UnitError::UnknownMatchingMode(s.to_string())),
        }
    }
}

/// A compiler bound to a field resolver.
#[derive(Debug, Clone, Default)]
pub struct SearchUnitCompiler<R> {
    /// Classifies fields as logical, tag, or unknown.
    resolver: R,
}

impl<R: FieldResolver> SearchUnitCompiler<R> {
    /// Creates a compiler that consults `resolver` for field kinds.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Compiles `pattern`. See [`compile`].
    pub fn compile(
        &self,
        pattern: &str,
        default_field: &str,
        mode: Option<MatchingMode>,
    ) -> Vec<SearchUnit> {
        compile(pattern, default_field, mode, &self.resolver)
    }
}

/// Compiles a search pattern into basic search units.
///
/// `default_field` applies wherever the pattern has no inline `field:` prefix; an empty
/// string means no field. The first unit always carries [`Operator::Or`]. A blank pattern
/// yields no units; any other pattern yields at least one. When nothing in the pattern
/// compiles to a unit, as with `and or` or `title:""`, the whole trimmed pattern is searched
/// as one word in `default_field`, inline prefixes included.
pub fn compile<R>(
    pattern: &str,
    default_field: &str,
    mode: Option<MatchingMode>,
    resolver: &R,
) -> Vec<SearchUnit>
where
    R: FieldResolver + ?Sized,
{
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mode = mode.unwrap_or_default();
    let phrase_field = || {
        if default_field.is_empty() {
            ANY_FIELD
        } else {
            default_field
        }
    };
    match mode {
        MatchingMode::Exact => {
            return vec![SearchUnit::new(
                Operator::Or,
                trimmed,
                phrase_field(),
                MatchType::Exact,
            )];
        }
        MatchingMode::Partial => {
            return vec![SearchUnit::new(
                Operator::Or,
                wrap_partial(trimmed),
                phrase_field(),
                MatchType::Partial,
            )];
        }
        MatchingMode::Regexp => {
            return vec![SearchUnit::new(
                Operator::Or,
                trimmed,
                phrase_field(),
                MatchType::Regexp,
            )];
        }
        MatchingMode::All | MatchingMode::Any => {}
    }

    let implicit = if mode == MatchingMode::Any {
        Operator::Or
    } else {
        Operator::And
    };
    let mut emitter = Emitter::new(resolver, implicit);
    for segment in split_segments(trimmed, !default_field.is_empty()) {
        emitter.segment(&segment, default_field);
    }

    if emitter.units.is_empty() {
        debug!(pattern = trimmed, "no units produced, searching pattern as one word");
        emitter.word(None, trimmed, default_field, true);
    }
    emitter.units
}

/// Accumulates units for a single compilation.
struct Emitter<'r, R: ?Sized> {
    /// Field classification.
    resolver: &'r R,
    /// Operator for tokens that name none.
    implicit: Operator,
    /// Units produced so far.
    units: Vec<SearchUnit>,
    /// Operator set by a preceding boolean word, waiting for its operand.
    pending: Option<Operator>,
}

impl<'r, R: FieldResolver + ?Sized> Emitter<'r, R> {
    /// Creates an empty emitter.
    fn new(resolver: &'r R, implicit: Operator) -> Self {
        Self {
            resolver,
            implicit,
            units: Vec::new(),
            pending: None,
        }
    }

    /// Compiles one field-scoped segment.
    fn segment(&mut self, segment: &Segment<'_>, default_field: &str) {
        let field = segment.field.unwrap_or(default_field);
        if segment.operator.is_some() {
            self.pending = segment.operator;
        }

        let tokens = tokenize_segment(segment.text, !field.is_empty());
        if is_ambiguous(segment.text) && !matches!(tokens.as_slice(), [Token::Quoted { .. }]) {
            debug!(
                text = segment.text.trim(),
                "operator symbols without whitespace, searching as one word"
            );
            let text = segment.text.trim();
            let mut chars = text.chars();
            match chars.next().and_then(symbol_operator) {
                Some(op) => self.word(Some(op), chars.as_str(), field, true),
                None => self.word(None, text, field, true),
            }
            return;
        }

        for token in tokens {
            match token {
                Token::Operator(op) => self.pending = Some(op),
                Token::Word { operator, text } => self.word(operator, text, field, false),
                Token::Quoted {
                    operator,
                    delimiter,
                    text,
                } => self.quoted(operator, delimiter, text, field),
            }
        }
    }

    /// Emits a word unit.
    ///
    /// Commas make the word an exact value unless `literal` is set. Words in tag fields are
    /// always exact.
    fn word(&mut self, operator: Option<Operator>, text: &str, field: &str, literal: bool) {
        let mut match_type = if !literal && text.contains(',') {
            MatchType::Exact
        } else {
            MatchType::Word
        };
        if match_type == MatchType::Word && self.resolver.resolve(field) == FieldKind::Tag {
            match_type = MatchType::Exact;
        }
        self.push(operator, text.to_string(), field, match_type);
    }

    /// Emits a phrase or regexp unit.
    fn quoted(&mut self, operator: Option<Operator>, delimiter: Delimiter, text: &str, field: &str) {
        if text.is_empty() {
            debug!(?delimiter, "empty phrase skipped");
            if operator.is_some() {
                self.pending = operator;
            }
            return;
        }

        let (term, field, match_type) = match delimiter {
            Delimiter::Exact => {
                let field = if field.is_empty() { ANY_FIELD } else { field };
                (text.to_string(), field, MatchType::Exact)
            }
            Delimiter::Partial => (wrap_partial(text), field, MatchType::Partial),
            Delimiter::Regexp => (text.to_string(), field, MatchType::Regexp),
        };
        self.push(operator, term, field, match_type);
    }

    /// Appends a unit, settling its operator.
    ///
    /// The first unit is always OR. Later units take the glued operator, then a pending
    /// boolean word, then the implicit default.
    fn push(&mut self, operator: Option<Operator>, term: String, field: &str, match_type: MatchType) {
        let pending = self.pending.take();
        let operator = if self.units.is_empty() {
            Operator::Or
        } else {
            operator.or(pending).unwrap_or(self.implicit)
        };
        self.units.push(SearchUnit {
            operator,
            term,
            field: field.to_string(),
            match_type,
        });
    }
}

/// Detects operator symbols run together with words so that boundaries cannot be told.
///
/// A leading symbol is unambiguous and does not count.
fn is_ambiguous(text: &str) -> bool {
    let text = text.trim();
    let body = text
        .strip_prefix(|c: char| symbol_operator(c).is_some())
        .unwrap_or(text);
    !body.is_empty()
        && !body.contains(char::is_whitespace)
        && body.contains(|c: char| symbol_operator(c).is_some())
}
