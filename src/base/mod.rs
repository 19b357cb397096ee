//! Foundation types shared by the stub tree and the type layer.
//!
//! - [`FileId`] - Handle for a source or class file
//! - [`StubId`], [`LocalStubId`] - Handles for nodes of a stub tree
//! - [`StubOrigin`] - Whether a stub came from source text or a compiled class
//! - [`TextRange`], [`TextSize`] - Offsets into reference text
//!
//! This module has NO dependencies on other refstub modules.

mod file_id;
mod origin;
mod stub_id;

pub use file_id::FileId;
pub use origin::StubOrigin;
pub use stub_id::{LocalStubId, StubId};

pub use text_size::{TextRange, TextSize};

// Re-export text-size for callers working with reference ranges
pub use text_size;
