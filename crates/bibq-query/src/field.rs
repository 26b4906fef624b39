//! Field-kind resolution.
//!
//! The compiler needs to know whether a field designates a logical, word-indexed field or a
//! physical record tag. That knowledge lives with whoever configures the index, so it is
//! injected through [`FieldResolver`].

/// What a field token designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A named search field such as `title`.
    Logical,
    /// A physical tag code such as `500` or `100__a`.
    Tag,
    /// Anything else, including the empty field.
    Unknown,
}

/// Classifies field tokens. Must be total over any string.
pub trait FieldResolver {
    /// Reports what `field` designates.
    fn resolve(&self, field: &str) -> FieldKind;
}

impl<F> FieldResolver for F
where
    F: Fn(&str) -> FieldKind,
{
    fn resolve(&self, field: &str) -> FieldKind {
        self(field)
    }
}

/// Resolver that only recognises tag-shaped codes.
///
/// Used when no field table is configured: `500` and `100__a` are tags, everything else is
/// unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagShape;

impl FieldResolver for TagShape {
    fn resolve(&self, field: &str) -> FieldKind {
        if is_tag_code(field) {
            FieldKind::Tag
        } else {
            FieldKind::Unknown
        }
    }
}

/// Checks whether `code` looks like a physical tag.
///
/// A tag is three ASCII digits, optionally followed by up to two indicator characters and a
/// subfield code, each an ASCII alphanumeric or `_`.
pub fn is_tag_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() >= 3
        && bytes.len() <= 6
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && bytes[3..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_codes() {
        assert!(is_tag_code("500"));
        assert!(is_tag_code("100__a"));
        assert!(is_tag_code("8564_u"));
        assert!(!is_tag_code("50"));
        assert!(!is_tag_code("title"));
        assert!(!is_tag_code("a500"));
        assert!(!is_tag_code("100__ab"));
        assert!(!is_tag_code(""));
    }

    #[test]
    fn tag_shape_resolver() {
        assert_eq!(TagShape.resolve("245"), FieldKind::Tag);
        assert_eq!(TagShape.resolve("title"), FieldKind::Unknown);
        assert_eq!(TagShape.resolve(""), FieldKind::Unknown);
    }

    #[test]
    fn closures_resolve() {
        let resolver = |f: &str| {
            if f == "title" {
                FieldKind::Logical
            } else {
                FieldKind::Unknown
            }
        };
        assert_eq!(resolver.resolve("title"), FieldKind::Logical);
        assert_eq!(resolver.resolve("500"), FieldKind::Unknown);
    }
}
