//! The stub tree: owner of all stub nodes across files.
//!
//! Nodes refer to each other only through [`StubId`]s, so a reference list
//! reaches its declaration by looking the id up here. The tree is also the
//! standard [`ReferenceListHost`]: it knows each file's origin and carries
//! the reference parser and type factory.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{FileId, LocalStubId, StubId, StubOrigin};
use crate::types::{
    ClassType, CodeReference, ParseOptions, ReferenceKind, ReferenceParseError, ReferenceParser,
    TypeFactory,
};

use super::StubError;
use super::kind::{ReferenceRole, StubKind};
use super::materialize::ReferenceListHost;
use super::reference_list::ReferenceListStub;

/// What a node holds besides its links.
#[derive(Debug)]
pub enum StubData {
    File { path: Arc<str> },
    Declaration { kind: StubKind, name: SmolStr },
    ReferenceList(ReferenceListStub),
}

/// One node of the stub tree.
#[derive(Debug)]
pub struct StubNode {
    id: StubId,
    parent: Option<StubId>,
    children: Vec<StubId>,
    data: StubData,
}

impl StubNode {
    /// This node's id.
    pub fn id(&self) -> StubId {
        self.id
    }

    /// `None` only for file roots.
    pub fn parent(&self) -> Option<StubId> {
        self.parent
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[StubId] {
        &self.children
    }

    /// The node payload.
    pub fn data(&self) -> &StubData {
        &self.data
    }

    /// Kind of the payload.
    pub fn kind(&self) -> StubKind {
        match &self.data {
            StubData::File { .. } => StubKind::File,
            StubData::Declaration { kind, .. } => *kind,
            StubData::ReferenceList(list) => list.kind(),
        }
    }

    /// Declared name, for declaration nodes.
    pub fn name(&self) -> Option<&str> {
        match &self.data {
            StubData::Declaration { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The reference-list payload, if this node is one.
    pub fn as_reference_list(&self) -> Option<&ReferenceListStub> {
        match &self.data {
            StubData::ReferenceList(list) => Some(list),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct FileEntry {
    origin: StubOrigin,
    next_local: u32,
}

/// All stubs of a set of files.
///
/// Built once with `&mut self`, then shared read-only (`&StubTree` is
/// `Sync`). Reference-list types are materialized lazily through shared
/// references.
#[derive(Debug, Default)]
pub struct StubTree {
    files: FxHashMap<FileId, FileEntry>,
    nodes: IndexMap<StubId, StubNode>,
    parser: ReferenceParser,
    factory: TypeFactory,
}

impl StubTree {
    /// Create an empty tree with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `options` when parsing source-origin reference names.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parser = ReferenceParser::with_options(options);
        self
    }

    /// Options used when parsing source-origin names.
    pub fn parse_options(&self) -> &ParseOptions {
        self.parser.options()
    }

    /// Add the root stub of a file and return its id.
    pub fn add_file(
        &mut self,
        file: FileId,
        path: impl Into<Arc<str>>,
        origin: StubOrigin,
    ) -> Result<StubId, StubError> {
        if self.files.contains_key(&file) {
            return Err(StubError::DuplicateFile(file));
        }
        self.files.insert(
            file,
            FileEntry {
                origin,
                next_local: LocalStubId::ROOT.index() + 1,
            },
        );

        let id = file.root();
        self.nodes.insert(
            id,
            StubNode {
                id,
                parent: None,
                children: Vec::new(),
                data: StubData::File { path: path.into() },
            },
        );
        debug!(%file, %origin, "added stub file");
        Ok(id)
    }

    /// Add a class, method, type-parameter or provides stub under `parent`.
    pub fn add_declaration(
        &mut self,
        parent: StubId,
        kind: StubKind,
        name: impl Into<SmolStr>,
    ) -> Result<StubId, StubError> {
        let parent_kind = self.kind_of(parent)?;
        let allowed = match kind {
            StubKind::Class => matches!(
                parent_kind,
                StubKind::File | StubKind::Class | StubKind::Method
            ),
            StubKind::Method => parent_kind == StubKind::Class,
            StubKind::TypeParameter => {
                matches!(parent_kind, StubKind::Class | StubKind::Method)
            }
            StubKind::Provides => parent_kind == StubKind::File,
            _ => false,
        };
        if !allowed {
            return Err(StubError::InvalidParent {
                kind,
                parent: parent_kind,
            });
        }

        let data = StubData::Declaration {
            kind,
            name: name.into(),
        };
        Ok(self.push_child(parent, data))
    }

    /// Add a reference list under the declaration that owns it.
    ///
    /// The list kind must match its parent: `extends`, `implements` and
    /// `permits` under a class, `throws` under a method, bounds under a type
    /// parameter, `provides ... with` under a provides directive.
    pub fn add_reference_list<I>(
        &mut self,
        parent: StubId,
        kind: StubKind,
        names: I,
    ) -> Result<StubId, StubError>
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        let role = ReferenceRole::try_from_kind(kind).ok_or(StubError::NotAReferenceList(kind))?;
        let parent_kind = self.kind_of(parent)?;
        if parent_kind != role.owner_kind() {
            return Err(StubError::InvalidParent {
                kind,
                parent: parent_kind,
            });
        }

        let list = ReferenceListStub::try_new(kind, parent, names)?;
        Ok(self.push_child(parent, StubData::ReferenceList(list)))
    }

    /// Drop every stub of `file`. Returns whether the file was present.
    pub fn remove_file(&mut self, file: FileId) -> bool {
        if self.files.remove(&file).is_none() {
            return false;
        }
        self.nodes.retain(|id, _| id.file != file);
        debug!(%file, "removed stub file");
        true
    }

    /// Look up a node by id.
    pub fn get(&self, id: StubId) -> Option<&StubNode> {
        self.nodes.get(&id)
    }

    /// The parent node of `id`. `None` for file roots.
    pub fn parent_of(&self, id: StubId) -> Option<&StubNode> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    /// Child nodes of `id` in insertion order.
    pub fn children(&self, id: StubId) -> impl Iterator<Item = &StubNode> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&child| self.get(child))
    }

    /// Walk parent links up to the file root.
    pub fn root_of(&self, id: StubId) -> Option<&StubNode> {
        let mut node = self.get(id)?;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
        }
        Some(node)
    }

    /// Origin of the file that holds `id`.
    pub fn origin_of(&self, id: StubId) -> Option<StubOrigin> {
        self.files.get(&id.file).map(|entry| entry.origin)
    }

    /// Path recorded for `file`.
    pub fn path_of(&self, file: FileId) -> Option<&str> {
        match &self.get(file.root())?.data {
            StubData::File { path } => Some(&**path),
            _ => None,
        }
    }

    /// The reference list stored at `id`.
    pub fn reference_list(&self, id: StubId) -> Option<&ReferenceListStub> {
        self.get(id)?.as_reference_list()
    }

    /// Reference lists directly under the declaration `id`.
    pub fn reference_lists_of(&self, id: StubId) -> impl Iterator<Item = &ReferenceListStub> + '_ {
        self.children(id).filter_map(StubNode::as_reference_list)
    }

    /// The list under `id` with the given role, if any.
    pub fn reference_list_with_role(
        &self,
        id: StubId,
        role: ReferenceRole,
    ) -> Option<&ReferenceListStub> {
        self.reference_lists_of(id).find(|list| list.role() == role)
    }

    /// Resolved types of the reference list `id`. `None` if `id` is not a
    /// reference list of this tree.
    pub fn referenced_types(&self, id: StubId) -> Option<Vec<ClassType>> {
        Some(self.reference_list(id)?.referenced_types(self))
    }

    /// All reference lists in the tree, in insertion order.
    pub fn reference_lists(&self) -> impl Iterator<Item = &ReferenceListStub> + '_ {
        self.nodes.values().filter_map(StubNode::as_reference_list)
    }

    /// Total number of stub nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of registered files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn kind_of(&self, id: StubId) -> Result<StubKind, StubError> {
        self.get(id)
            .map(StubNode::kind)
            .ok_or(StubError::UnknownParent(id))
    }

    /// Caller has checked that `parent` exists, so its file is registered.
    fn push_child(&mut self, parent: StubId, data: StubData) -> StubId {
        let entry = self
            .files
            .get_mut(&parent.file)
            .expect("parent stub belongs to a registered file");
        let id = parent.file.stub(entry.next_local);
        entry.next_local += 1;

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        self.nodes.insert(
            id,
            StubNode {
                id,
                parent: Some(parent),
                children: Vec::new(),
                data,
            },
        );
        id
    }
}

impl ReferenceListHost for StubTree {
    fn origin(&self, stub: &ReferenceListStub) -> StubOrigin {
        match self.origin_of(stub.parent()) {
            Some(origin) => origin,
            None => panic!(
                "reference list under {} does not belong to this stub tree",
                stub.parent()
            ),
        }
    }

    fn binary_reference_type(&self, owner: StubId, name: &str) -> ClassType {
        self.factory.binary_reference_type(owner, name)
    }

    fn parse_reference(
        &self,
        name: &str,
        owner: StubId,
        kind: ReferenceKind,
    ) -> Result<CodeReference, ReferenceParseError> {
        self.parser.parse_reference(name, owner, Some(kind))
    }

    fn wrap_as_type(&self, reference: CodeReference) -> ClassType {
        self.factory.wrap_as_type(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_in(tree: &mut StubTree, file: u32, origin: StubOrigin) -> StubId {
        let root = tree
            .add_file(FileId::new(file), format!("/src/F{file}.java"), origin)
            .unwrap();
        tree.add_declaration(root, StubKind::Class, "Foo").unwrap()
    }

    #[test]
    fn test_build_and_navigate() {
        let mut tree = StubTree::new();
        let class = class_in(&mut tree, 0, StubOrigin::Source);
        let list = tree
            .add_reference_list(class, StubKind::ImplementsList, ["Runnable", "Closeable"])
            .unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.parent_of(list).map(StubNode::id), Some(class));
        assert_eq!(tree.root_of(list).map(StubNode::kind), Some(StubKind::File));
        assert_eq!(tree.get(class).and_then(StubNode::name), Some("Foo"));
        assert_eq!(tree.path_of(FileId::new(0)), Some("/src/F0.java"));
        assert_eq!(tree.reference_lists_of(class).count(), 1);
        assert!(tree
            .reference_list_with_role(class, ReferenceRole::Implements)
            .is_some());
        assert!(tree
            .reference_list_with_role(class, ReferenceRole::Extends)
            .is_none());
    }

    #[test]
    fn test_origin_is_per_file() {
        let mut tree = StubTree::new();
        let source = class_in(&mut tree, 0, StubOrigin::Source);
        let compiled = class_in(&mut tree, 1, StubOrigin::Compiled);

        let a = tree
            .add_reference_list(source, StubKind::ExtendsList, ["9Bad"])
            .unwrap();
        let b = tree
            .add_reference_list(compiled, StubKind::ExtendsList, ["9Bad"])
            .unwrap();

        assert_eq!(tree.referenced_types(a).unwrap().len(), 0);
        assert_eq!(tree.referenced_types(b).unwrap().len(), 1);
    }

    #[test]
    fn test_list_must_match_parent_kind() {
        let mut tree = StubTree::new();
        let class = class_in(&mut tree, 0, StubOrigin::Source);

        let err = tree
            .add_reference_list(class, StubKind::ThrowsList, ["IOException"])
            .unwrap_err();
        assert_eq!(
            err,
            StubError::InvalidParent {
                kind: StubKind::ThrowsList,
                parent: StubKind::Class,
            }
        );

        let method = tree.add_declaration(class, StubKind::Method, "run").unwrap();
        assert!(tree
            .add_reference_list(method, StubKind::ThrowsList, ["IOException"])
            .is_ok());
    }

    #[test]
    fn test_build_errors() {
        let mut tree = StubTree::new();
        let class = class_in(&mut tree, 0, StubOrigin::Source);
        let missing = StubId::new(FileId::new(9), LocalStubId::new(3));

        assert_eq!(
            tree.add_declaration(missing, StubKind::Class, "X").unwrap_err(),
            StubError::UnknownParent(missing)
        );
        assert_eq!(
            tree.add_reference_list(class, StubKind::Method, ["A"]).unwrap_err(),
            StubError::NotAReferenceList(StubKind::Method)
        );
        assert_eq!(
            tree.add_reference_list(class, StubKind::ExtendsList, ["A", ""]).unwrap_err(),
            StubError::EmptyName { index: 1 }
        );
        assert_eq!(
            tree.add_file(FileId::new(0), "/dup.java", StubOrigin::Source).unwrap_err(),
            StubError::DuplicateFile(FileId::new(0))
        );
    }

    #[test]
    fn test_ids_are_file_local() {
        let mut tree = StubTree::new();
        let a = class_in(&mut tree, 0, StubOrigin::Source);
        let b = class_in(&mut tree, 1, StubOrigin::Source);

        assert_eq!(a.local, b.local);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_file() {
        let mut tree = StubTree::new();
        let class = class_in(&mut tree, 0, StubOrigin::Source);
        let list = tree
            .add_reference_list(class, StubKind::ExtendsList, ["Base"])
            .unwrap();
        class_in(&mut tree, 1, StubOrigin::Compiled);

        assert!(tree.remove_file(FileId::new(0)));
        assert!(!tree.remove_file(FileId::new(0)));
        assert!(tree.get(list).is_none());
        assert!(tree.referenced_types(list).is_none());
        assert_eq!(tree.file_count(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_parse_options_are_used() {
        let mut tree = StubTree::new().with_parse_options(ParseOptions {
            allow_wildcards: false,
            ..ParseOptions::default()
        });
        let class = class_in(&mut tree, 0, StubOrigin::Source);
        let list = tree
            .add_reference_list(class, StubKind::ImplementsList, ["List<?>", "List<String>"])
            .unwrap();

        assert!(!tree.parse_options().allow_wildcards);
        let types = tree.referenced_types(list).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].canonical_text(), "List<String>");
    }
}
