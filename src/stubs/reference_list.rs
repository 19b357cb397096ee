//! The reference-list stub: names now, types on demand.

use std::fmt;

use once_cell::race::OnceBox;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::StubId;
use crate::types::ClassType;

use super::StubError;
use super::kind::{ReferenceRole, StubKind};
use super::materialize::{ReferenceListHost, materialize};

/// Stub for an ordered list of type names attached to a declaration: the
/// `extends`, `implements`, `throws`, bound, `permits` or `provides ... with`
/// clause.
///
/// The names are fixed at construction. The resolved types are built the
/// first time [`referenced_types`](Self::referenced_types) is called and
/// cached for every later call.
///
/// # Concurrency
///
/// The cache is a lock-free once-cell. Readers never block. Threads that
/// find it empty at the same time each materialize, then race to publish
/// with a single compare-and-swap; the first array published stays and the
/// others are dropped. Every array is a pure function of the immutable
/// names, so which one wins is unobservable. A partially filled array is
/// never visible.
pub struct ReferenceListStub {
    kind: StubKind,
    parent: StubId,
    names: Box<[SmolStr]>,
    types: OnceBox<Box<[ClassType]>>,
}

impl ReferenceListStub {
    /// Create a stub for `names` in declaration order.
    ///
    /// # Panics
    /// Panics if any name is empty or blank, or `kind` is not a
    /// reference-list kind.
    /// Both mean the stub data is corrupt. Use [`try_new`](Self::try_new)
    /// to get the error instead.
    pub fn new<I>(kind: StubKind, parent: StubId, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        match Self::try_new(kind, parent, names) {
            Ok(stub) => stub,
            Err(err) => panic!("corrupt reference-list stub under {parent}: {err}"),
        }
    }

    /// Like [`new`](Self::new), but reports corrupt input as a [`StubError`].
    pub fn try_new<I>(kind: StubKind, parent: StubId, names: I) -> Result<Self, StubError>
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        if !kind.is_reference_list() {
            return Err(StubError::NotAReferenceList(kind));
        }

        let names: Box<[SmolStr]> = names.into_iter().map(Into::into).collect();
        if let Some(index) = names.iter().position(|name| name.trim().is_empty()) {
            return Err(StubError::EmptyName { index });
        }

        Ok(Self {
            kind,
            parent,
            names,
            types: OnceBox::new(),
        })
    }

    /// The list's stub kind, e.g. [`StubKind::ImplementsList`].
    pub fn kind(&self) -> StubKind {
        self.kind
    }

    /// Semantic role of the list, derived from its kind.
    pub fn role(&self) -> ReferenceRole {
        ReferenceRole::from_kind(self.kind)
    }

    /// The declaration this list belongs to.
    pub fn parent(&self) -> StubId {
        self.parent
    }

    /// Borrow the stored names.
    pub fn names(&self) -> &[SmolStr] {
        &self.names
    }

    /// A fresh copy of the names, in declaration order.
    pub fn referenced_names(&self) -> Vec<SmolStr> {
        self.names.to_vec()
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the type cache has been published.
    pub fn is_materialized(&self) -> bool {
        self.types.get().is_some()
    }

    /// A fresh copy of the resolved types, materializing them on first use.
    ///
    /// For compiled stubs there is one type per name. For source stubs,
    /// names that do not parse are left out and the rest keep their order.
    pub fn referenced_types<H>(&self, host: &H) -> Vec<ClassType>
    where
        H: ReferenceListHost + ?Sized,
    {
        if let Some(types) = self.types.get() {
            trace!(parent = %self.parent, "reference list cache hit");
            return types.to_vec();
        }

        let types = self
            .types
            .get_or_init(|| Box::new(materialize(self, host).into_boxed_slice()));
        types.to_vec()
    }
}

impl fmt::Display for ReferenceListStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefListStub[{}:", self.role())?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for ReferenceListStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceListStub")
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("names", &self.names)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LocalStubId, StubOrigin};
    use crate::types::{
        CodeReference, ReferenceKind, ReferenceParseError, ReferenceParser, TypeFactory,
    };

    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHost {
        origin: StubOrigin,
        runs: AtomicUsize,
    }

    impl CountingHost {
        fn new(origin: StubOrigin) -> Self {
            Self {
                origin,
                runs: AtomicUsize::new(0),
            }
        }
    }

    impl ReferenceListHost for CountingHost {
        fn origin(&self, _stub: &ReferenceListStub) -> StubOrigin {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.origin
        }

        fn binary_reference_type(&self, owner: StubId, name: &str) -> ClassType {
            TypeFactory.binary_reference_type(owner, name)
        }

        fn parse_reference(
            &self,
            name: &str,
            owner: StubId,
            kind: ReferenceKind,
        ) -> Result<CodeReference, ReferenceParseError> {
            ReferenceParser::new().parse_reference(name, owner, Some(kind))
        }

        fn wrap_as_type(&self, reference: CodeReference) -> ClassType {
            TypeFactory.wrap_as_type(reference)
        }
    }

    fn parent() -> StubId {
        StubId::new(FileId::new(0), LocalStubId::new(1))
    }

    #[test]
    fn test_names_are_copied() {
        let stub = ReferenceListStub::new(StubKind::ExtendsList, parent(), ["Base", "Other"]);

        let mut names = stub.referenced_names();
        assert_eq!(names, ["Base", "Other"]);
        names.push(SmolStr::new("Injected"));
        names[0] = SmolStr::new("Changed");

        assert_eq!(stub.referenced_names(), ["Base", "Other"]);
        assert_eq!(stub.len(), 2);
    }

    #[test]
    fn test_role_follows_kind() {
        let a = ReferenceListStub::new(StubKind::ThrowsList, parent(), ["IOException"]);
        let b = ReferenceListStub::new(StubKind::ThrowsList, parent(), Vec::<String>::new());
        assert_eq!(a.role(), ReferenceRole::Throws);
        assert_eq!(a.role(), a.role());
        assert_eq!(a.role(), b.role());
    }

    #[test]
    #[should_panic(expected = "empty reference name at index 1")]
    fn test_empty_name_panics() {
        ReferenceListStub::new(StubKind::ImplementsList, parent(), ["Runnable", "", "Closeable"]);
    }

    #[test]
    fn test_try_new_reports_errors() {
        let err = ReferenceListStub::try_new(StubKind::ImplementsList, parent(), ["A", ""])
            .unwrap_err();
        assert_eq!(err, StubError::EmptyName { index: 1 });

        let err = ReferenceListStub::try_new(StubKind::Class, parent(), ["A"]).unwrap_err();
        assert_eq!(err, StubError::NotAReferenceList(StubKind::Class));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        for blank in [" ", "  ", "\t"] {
            let err = ReferenceListStub::try_new(StubKind::ImplementsList, parent(), ["A", blank])
                .unwrap_err();
            assert_eq!(err, StubError::EmptyName { index: 1 });
        }
    }

    #[test]
    fn test_compiled_type_keeps_raw_text() {
        let stub = ReferenceListStub::new(StubKind::ExtendsList, parent(), [" Base "]);
        let host = CountingHost::new(StubOrigin::Compiled);

        let types = stub.referenced_types(&host);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].canonical_text(), " Base ");
        assert_eq!(types[0].qualified_name(), "Base");
    }

    #[test]
    fn test_types_are_cached() {
        let stub =
            ReferenceListStub::new(StubKind::ImplementsList, parent(), ["Runnable", "Closeable"]);
        let host = CountingHost::new(StubOrigin::Source);
        assert!(!stub.is_materialized());

        let first = stub.referenced_types(&host);
        assert!(stub.is_materialized());
        let second = stub.referenced_types(&host);

        assert_eq!(first, second);
        assert_eq!(host.runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_returned_types_are_copies() {
        let stub = ReferenceListStub::new(StubKind::ImplementsList, parent(), ["Runnable"]);
        let host = CountingHost::new(StubOrigin::Compiled);

        let mut types = stub.referenced_types(&host);
        types.clear();

        assert_eq!(stub.referenced_types(&host).len(), 1);
    }

    #[test]
    fn test_empty_list_materializes_to_empty() {
        let stub = ReferenceListStub::new(StubKind::PermitsList, parent(), Vec::<&str>::new());
        let host = CountingHost::new(StubOrigin::Source);
        assert!(stub.referenced_types(&host).is_empty());
        assert!(stub.is_materialized());
    }

    #[test]
    fn test_display() {
        let stub =
            ReferenceListStub::new(StubKind::ExtendsList, parent(), ["Runnable", "Closeable"]);
        assert_eq!(stub.to_string(), "RefListStub[EXTENDS_LIST:Runnable, Closeable]");
    }
}
