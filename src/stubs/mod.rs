//! Stub layer: compact declaration summaries and their reference lists.
//!
//! ## Key Data Structures
//!
//! - [`StubTree`] - Owns every stub node; parents are referenced by [`StubId`]
//! - [`ReferenceListStub`] - Names of a reference list plus a lazily built type cache
//! - [`ReferenceRole`] - Semantic role of a list, classified from its [`StubKind`]
//! - [`ReferenceListHost`] - Services used to turn names into types

mod kind;
mod materialize;
mod reference_list;
mod tree;

use thiserror::Error;

use crate::base::{FileId, StubId};

pub use kind::{ReferenceRole, StubKind};
pub use materialize::ReferenceListHost;
pub use reference_list::ReferenceListStub;
pub use tree::{StubData, StubNode, StubTree};

/// Errors raised while building stubs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StubError {
    #[error("empty reference name at index {index}")]
    EmptyName { index: usize },
    #[error("`{0}` is not a reference-list kind")]
    NotAReferenceList(StubKind),
    #[error("a {kind} cannot be placed under a {parent}")]
    InvalidParent { kind: StubKind, parent: StubKind },
    #[error("unknown parent stub {0}")]
    UnknownParent(StubId),
    #[error("{0} is already part of the stub tree")]
    DuplicateFile(FileId),
}
