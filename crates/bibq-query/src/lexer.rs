//! Pattern lexer.
//!
//! Lexing happens in two passes. [`split_segments`] cuts the whole pattern at inline
//! `field:` prefixes. [`tokenize_segment`] then turns each segment's text into words,
//! boolean operators and delimited phrases. Neither pass can fail: malformed input simply
//! lexes as plain words.

use tracing::trace;

use crate::unit::Operator;

/// Characters that act as operators when glued to the front of a token.
const OPERATOR_SYMBOLS: [char; 3] = ['+', '|', '-'];

/// A field-scoped stretch of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    /// Inline field from a `field:` prefix; `None` means the caller's default.
    pub field: Option<&'a str>,
    /// Operator symbol glued to the prefix, as in `-title:draft`.
    pub operator: Option<Operator>,
    /// Text following the prefix, up to the next prefix.
    pub text: &'a str,
}

/// Phrase delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `"..."`
    Exact,
    /// `'...'`
    Partial,
    /// `/.../`
    Regexp,
}

impl Delimiter {
    /// Maps a character to the delimiter it opens.
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Self::Exact),
            '\'' => Some(Self::Partial),
            '/' => Some(Self::Regexp),
            _ => None,
        }
    }

    /// The delimiter character.
    fn as_char(self) -> char {
        match self {
            Self::Exact => '"',
            Self::Partial => '\'',
            Self::Regexp => '/',
        }
    }

    /// Partial phrases and regexps need a field to be recognised at all.
    fn needs_field(self) -> bool {
        !matches!(self, Self::Exact)
    }
}

/// A token within a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// A standalone boolean word or symbol, applying to the next token.
    Operator(Operator),
    /// A whitespace-delimited word.
    Word {
        /// Operator symbol glued to the front of the word.
        operator: Option<Operator>,
        /// The word, without the glued symbol.
        text: &'a str,
    },
    /// A properly closed phrase or regexp.
    Quoted {
        /// Operator symbol glued to the opening delimiter.
        operator: Option<Operator>,
        /// Which delimiter enclosed the text.
        delimiter: Delimiter,
        /// Enclosed text, delimiters stripped.
        text: &'a str,
    },
}

/// Maps a glued operator symbol to its operator.
pub(crate) fn symbol_operator(ch: char) -> Option<Operator> {
    if OPERATOR_SYMBOLS.contains(&ch) {
        Operator::from_code(ch)
    } else {
        None
    }
}

/// Splits a pattern at inline `field:` prefixes.
///
/// A prefix starts at a token boundary (start of input or after whitespace), may carry a
/// glued operator symbol, and must be immediately followed by its value. Closed phrases and
/// regexps are skipped so that `"note: this"` is not cut, under the same rules
/// [`tokenize_segment`] uses to recognise them: `'` and `/` only count while a field is in
/// effect, either from a prefix or because `default_fielded` is set. Text before the first
/// prefix forms a segment without a field; blank stretches are dropped.
pub(crate) fn split_segments(pattern: &str, default_fielded: bool) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut field = None;
    let mut operator = None;
    let mut start = 0;
    let mut pos = 0;
    let mut at_boundary = true;

    while let Some(ch) = pattern[pos..].chars().next() {
        if ch.is_whitespace() {
            at_boundary = true;
            pos += ch.len_utf8();
            continue;
        }
        if !at_boundary {
            pos += ch.len_utf8();
            continue;
        }
        at_boundary = false;

        let glued = symbol_operator(ch);
        let body = if glued.is_some() { pos + 1 } else { pos };

        if let Some((name, value_start)) = field_prefix(pattern, body) {
            push_segment(&mut segments, field, operator, &pattern[start..pos]);
            field = Some(name);
            operator = glued;
            start = value_start;
            pos = skip_delimited(pattern, value_start, true).unwrap_or(value_start);
            continue;
        }

        let fielded = field.is_some() || default_fielded;
        pos = skip_delimited(pattern, body, fielded).unwrap_or(pos + ch.len_utf8());
    }

    push_segment(&mut segments, field, operator, &pattern[start..]);
    segments
}

/// Records a segment unless it carries nothing.
fn push_segment<'a>(
    segments: &mut Vec<Segment<'a>>,
    field: Option<&'a str>,
    operator: Option<Operator>,
    text: &'a str,
) {
    if field.is_none() && operator.is_none() && text.trim().is_empty() {
        return;
    }
    segments.push(Segment {
        field,
        operator,
        text,
    });
}

/// Recognises `identifier:` at `at`, returning the identifier and where its value begins.
fn field_prefix(pattern: &str, at: usize) -> Option<(&str, usize)> {
    let rest = &pattern[at..];
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if len == 0 {
        return None;
    }

    let mut after = rest[len..].chars();
    if after.next() != Some(':') {
        return None;
    }
    match after.next() {
        Some(c) if !c.is_whitespace() => Some((&rest[..len], at + len + 1)),
        _ => None,
    }
}

/// If a span opens at `at`, returns the position after its closing delimiter.
fn skip_delimited(pattern: &str, at: usize, fielded: bool) -> Option<usize> {
    delimited_span(pattern, at, fielded).map(|(_, _, end)| end + 1)
}

/// Recognises a phrase or regexp opening at `at`.
///
/// Returns the delimiter and the byte range of the enclosed text. `'` and `/` need a field in
/// effect and a non-empty body; otherwise, like an unclosed delimiter, they are ordinary
/// characters.
fn delimited_span(text: &str, at: usize, fielded: bool) -> Option<(Delimiter, usize, usize)> {
    let delimiter = text[at..].chars().next().and_then(Delimiter::from_char)?;
    if delimiter.needs_field() && !fielded {
        trace!(?delimiter, "no field in effect, delimiter kept literal");
        return None;
    }
    let start = at + 1;
    let Some(len) = find_closing(&text[start..], delimiter) else {
        trace!(?delimiter, "unbalanced delimiter kept literal");
        return None;
    };
    if len == 0 && delimiter.needs_field() {
        trace!(?delimiter, "empty span kept literal");
        return None;
    }
    Some((delimiter, start, start + len))
}

/// Finds the closing delimiter in `text`. Inside regexps, `\/` does not close.
fn find_closing(text: &str, delimiter: Delimiter) -> Option<usize> {
    let close = delimiter.as_char();
    if delimiter != Delimiter::Regexp {
        return text.find(close);
    }

    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == close {
            return Some(idx);
        }
    }
    None
}

/// Tokenizes one segment's text.
///
/// `fielded` tells whether a field is in effect; without one, `'` and `/` are ordinary
/// characters. A delimiter that is never closed, or an empty `''` or `//`, is also ordinary
/// and stays glued to the word it starts.
pub(crate) fn tokenize_segment(text: &str, fielded: bool) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        let glued = symbol_operator(ch);
        let body = if glued.is_some() { pos + 1 } else { pos };

        if let Some((delimiter, start, end)) = delimited_span(text, body, fielded) {
            tokens.push(Token::Quoted {
                operator: glued,
                delimiter,
                text: &text[start..end],
            });
            pos = end + 1;
            continue;
        }

        let end = text[pos..]
            .find(char::is_whitespace)
            .map_or(text.len(), |offset| pos + offset);
        let word = &text[pos..end];
        pos = end;

        if let Some(op) = Operator::from_word(word) {
            tokens.push(Token::Operator(op));
        } else if glued.is_some() && word.len() > 1 {
            tokens.push(Token::Word {
                operator: glued,
                text: &word[1..],
            });
        } else {
            tokens.push(Token::Word {
                operator: None,
                text: word,
            });
        }
    }

    tokens
}
