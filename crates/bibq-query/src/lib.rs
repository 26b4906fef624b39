//! Search pattern compilation for bibliographic retrieval.
//!
//! This crate turns the text typed into a search box into basic search units, the
//! `(operator, term, field, match type)` instructions a retrieval engine combines:
//!
//! - **Words**: `muon kaon` - all words, in the default field
//! - **Booleans**: `muon or kaon not cern`, `muon |kaon -cern`
//! - **Fields**: `title:muon`, `100__a:ellis` - logical fields or physical tags
//! - **Exact phrases**: `"the word"`
//! - **Partial phrases**: `title:'the word'` - substring match, needs a field
//! - **Regexps**: `title:/(one|two)/` - needs a field
//!
//! Compilation never fails; malformed input degrades to plain words. The crate also carries
//! the small washing helpers applied to request input before compilation.
//!
//! # Example
//!
//! ```
//! use bibq_query::{MatchType, Operator, TagShape, compile};
//!
//! let units = compile("title:muon not 245:draft", "", None, &TagShape);
//! assert_eq!(units.len(), 2);
//! assert_eq!(units[1].operator, Operator::AndNot);
//! assert_eq!(units[1].match_type, MatchType::Exact);
//! ```

#![warn(missing_docs)]

mod compiler;
mod error;
mod field;
mod lexer;
mod normalize;
mod unit;
mod wash;

pub use compiler::{MatchingMode, SearchUnitCompiler, compile};
pub use error::UnitError;
pub use field::{FieldKind, FieldResolver, TagShape, is_tag_code};
pub use normalize::strip_accents;
pub use unit::{ANY_FIELD, MatchType, Operator, SearchUnit};
pub use wash::{ArgKind, UrlArgument, WashedArgument, wash_pattern, wash_url_argument};
