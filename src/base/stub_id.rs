//! Identifiers for nodes of a stub tree.

use std::fmt;

use crate::base::FileId;

/// Handle for one node of a [`StubTree`](crate::stubs::StubTree).
///
/// Stubs refer to their parent through this handle instead of a pointer, so
/// a child never keeps its parent alive and the tree has no reference cycles.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StubId {
    /// The file whose stub tree contains this node
    pub file: FileId,
    /// Position of the node within its file, in creation order
    pub local: LocalStubId,
}

impl StubId {
    /// Combine a file and a file-local index.
    #[inline]
    pub const fn new(file: FileId, local: LocalStubId) -> Self {
        Self { file, local }
    }
}

impl fmt::Debug for StubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StubId({}:{})", self.file.0, self.local.0)
    }
}

impl fmt::Display for StubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/stub#{}", self.file, self.local.0)
    }
}

/// A file-local stub index. The file root is always `0`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalStubId(pub u32);

impl LocalStubId {
    /// The file root stub.
    pub const ROOT: LocalStubId = LocalStubId(0);

    /// Wrap a raw file-local index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw file-local index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalStubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalStubId({})", self.0)
    }
}
