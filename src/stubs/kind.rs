//! Stub kinds and the role classifier for reference lists.

use std::fmt;

/// Structural kind of a stub node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StubKind {
    File,
    Class,
    Method,
    TypeParameter,
    /// A `provides Service with Impl` directive of a module declaration.
    Provides,

    // Reference lists
    ExtendsList,
    ImplementsList,
    ThrowsList,
    ExtendsBoundList,
    PermitsList,
    ProvidesWithList,
}

impl StubKind {
    /// Whether stubs of this kind are reference lists.
    pub fn is_reference_list(self) -> bool {
        ReferenceRole::try_from_kind(self).is_some()
    }

    /// Human-readable name used in error messages.
    pub fn display(self) -> &'static str {
        match self {
            StubKind::File => "file",
            StubKind::Class => "class",
            StubKind::Method => "method",
            StubKind::TypeParameter => "type parameter",
            StubKind::Provides => "provides directive",
            StubKind::ExtendsList => "extends list",
            StubKind::ImplementsList => "implements list",
            StubKind::ThrowsList => "throws list",
            StubKind::ExtendsBoundList => "extends-bound list",
            StubKind::PermitsList => "permits list",
            StubKind::ProvidesWithList => "provides-with list",
        }
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Semantic role of a reference list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReferenceRole {
    /// `class A extends B`, `interface I extends J, K`
    Extends,
    /// `class A implements I`
    Implements,
    /// `void m() throws E`
    Throws,
    /// `<T extends A & B>`
    ExtendsBounds,
    /// `sealed class S permits A, B`
    Permits,
    /// `provides S with A, B`
    ProvidesWith,
}

impl ReferenceRole {
    /// Classify a reference-list stub kind.
    ///
    /// # Panics
    /// Panics if `kind` is not a reference-list kind. Reaching that case
    /// means a stub was built with the wrong kind, which no caller can
    /// recover from.
    pub fn from_kind(kind: StubKind) -> ReferenceRole {
        match Self::try_from_kind(kind) {
            Some(role) => role,
            None => panic!("stub kind `{kind}` has no reference-list role"),
        }
    }

    /// Like [`from_kind`](Self::from_kind), but `None` for kinds with no role.
    pub fn try_from_kind(kind: StubKind) -> Option<ReferenceRole> {
        match kind {
            StubKind::ExtendsList => Some(ReferenceRole::Extends),
            StubKind::ImplementsList => Some(ReferenceRole::Implements),
            StubKind::ThrowsList => Some(ReferenceRole::Throws),
            StubKind::ExtendsBoundList => Some(ReferenceRole::ExtendsBounds),
            StubKind::PermitsList => Some(ReferenceRole::Permits),
            StubKind::ProvidesWithList => Some(ReferenceRole::ProvidesWith),
            StubKind::File
            | StubKind::Class
            | StubKind::Method
            | StubKind::TypeParameter
            | StubKind::Provides => None,
        }
    }

    /// The stub kind that carries this role.
    pub fn kind(self) -> StubKind {
        match self {
            ReferenceRole::Extends => StubKind::ExtendsList,
            ReferenceRole::Implements => StubKind::ImplementsList,
            ReferenceRole::Throws => StubKind::ThrowsList,
            ReferenceRole::ExtendsBounds => StubKind::ExtendsBoundList,
            ReferenceRole::Permits => StubKind::PermitsList,
            ReferenceRole::ProvidesWith => StubKind::ProvidesWithList,
        }
    }

    /// The kind of declaration a list with this role hangs off.
    pub fn owner_kind(self) -> StubKind {
        match self {
            ReferenceRole::Extends | ReferenceRole::Implements | ReferenceRole::Permits => {
                StubKind::Class
            }
            ReferenceRole::Throws => StubKind::Method,
            ReferenceRole::ExtendsBounds => StubKind::TypeParameter,
            ReferenceRole::ProvidesWith => StubKind::Provides,
        }
    }

    /// Upper-case tag used by the stub `Display`, e.g. `EXTENDS_LIST`.
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceRole::Extends => "EXTENDS_LIST",
            ReferenceRole::Implements => "IMPLEMENTS_LIST",
            ReferenceRole::Throws => "THROWS_LIST",
            ReferenceRole::ExtendsBounds => "EXTENDS_BOUNDS_LIST",
            ReferenceRole::Permits => "PERMITS_LIST",
            ReferenceRole::ProvidesWith => "PROVIDES_WITH_LIST",
        }
    }
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
