//! File identifiers for the files a stub tree was built from.

use std::fmt;

use super::stub_id::{LocalStubId, StubId};

/// Handle for a file that contributed stubs, either a `.java` source or a
/// compiled `.class` file.
///
/// The path and origin of the file are kept by the owning
/// [`StubTree`](crate::stubs::StubTree). Every stub id carries the file it
/// lives in, so the handle also mints those ids.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Wrap a raw file number assigned by the indexer.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw file number.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Id of the file's root stub.
    #[inline]
    pub const fn root(self) -> StubId {
        StubId::new(self, LocalStubId::ROOT)
    }

    /// Id of the `local`-th stub created in this file.
    #[inline]
    pub const fn stub(self, local: u32) -> StubId {
        StubId::new(self, LocalStubId::new(local))
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_display() {
        assert_eq!(FileId::new(7).to_string(), "file#7");
        assert_eq!(format!("{:?}", FileId::new(3)), "FileId(3)");
    }

    #[test]
    fn test_stub_ids_belong_to_file() {
        let file = FileId::new(4);
        assert_eq!(file.root(), StubId::new(file, LocalStubId::ROOT));
        assert_eq!(file.stub(6).local, LocalStubId::new(6));
        assert_eq!(file.stub(6).file, file);
        assert_ne!(file.root(), FileId::new(5).root());
    }
}
