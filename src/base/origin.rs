//! Origin of a stub: live source text or a precompiled class file.

use std::fmt;

/// Where the declaration behind a stub came from.
///
/// The origin is a property of the file a stub belongs to. It selects how
/// reference names are turned into types: compiled names are trusted as-is,
/// source names go through the reference parser.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StubOrigin {
    /// Derived from a compiled class file. Names are assumed well-formed.
    Compiled,
    /// Derived from source text. Names may be malformed.
    Source,
}

impl StubOrigin {
    /// Whether stubs of this origin were read from compiled classes.
    #[inline]
    pub const fn is_compiled(self) -> bool {
        matches!(self, StubOrigin::Compiled)
    }
}

impl fmt::Display for StubOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StubOrigin::Compiled => "compiled",
            StubOrigin::Source => "source",
        })
    }
}
