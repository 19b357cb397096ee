//! # refstub
//!
//! Reference-list stubs with lazy materialization of resolved class types.
//!
//! An indexer keeps each declaration's `extends` / `implements` / `throws`
//! (and similar) clauses as plain name arrays. Types are only built when a
//! query asks for them, and the result is cached lock-free on the stub.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! stubs   → Stub tree, reference-list stubs, role classifier, materializer
//!   ↓
//! types   → Reference parser, structured references, ClassType
//!   ↓
//! base    → Primitives (FileId, StubId, StubOrigin, text ranges)
//! ```
//!
//! ## Usage
//!
//! ```
//! use refstub::{FileId, StubKind, StubOrigin, StubTree};
//!
//! let mut tree = StubTree::new();
//! let file = tree.add_file(FileId::new(0), "/src/Foo.java", StubOrigin::Source)?;
//! let class = tree.add_declaration(file, StubKind::Class, "Foo")?;
//! let list = tree.add_reference_list(
//!     class,
//!     StubKind::ImplementsList,
//!     ["Runnable", "123BadName", "java.io.Closeable"],
//! )?;
//!
//! let types = tree.referenced_types(list).unwrap_or_default();
//! let names: Vec<_> = types.iter().map(|t| t.canonical_text()).collect();
//! assert_eq!(names, ["Runnable", "java.io.Closeable"]);
//! # Ok::<(), refstub::StubError>(())
//! ```

/// Foundation types: FileId, StubId, StubOrigin, text ranges
pub mod base;

/// Stub tree and reference-list stubs
pub mod stubs;

/// Reference parsing and resolved class types
pub mod types;

pub use base::{FileId, LocalStubId, StubId, StubOrigin};
pub use stubs::{
    ReferenceListHost, ReferenceListStub, ReferenceRole, StubData, StubError, StubKind, StubNode,
    StubTree,
};
pub use types::{ClassType, ParseOptions, ReferenceParseError, ReferenceParser, TypeFactory};
