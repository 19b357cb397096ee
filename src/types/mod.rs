//! Type layer: turning reference names into [`ClassType`]s.
//!
//! Two collaborators of the stub layer live here:
//!
//! - [`ReferenceParser`] parses source-text names into a [`CodeReference`]
//!   and rejects malformed ones with a [`ReferenceParseError`].
//! - [`TypeFactory`] wraps a parsed reference, or a raw compiled name, as a
//!   [`ClassType`].

mod class_type;
mod lexer;
mod parser;
mod reference;

pub use class_type::{ClassType, TypeFactory};
pub use parser::{ParseOptions, ReferenceParseError, ReferenceParser};
pub use reference::{
    CodeReference, ReferenceKind, ReferenceSegment, TypeArgument, TypeRef, TypeRefBase,
    WildcardBound,
};
