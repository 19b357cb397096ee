//! Materialization of reference names into [`ClassType`]s.
//!
//! The strategy is picked from the stub's [`StubOrigin`]:
//!
//! - **Compiled**: every name becomes a type as-is. Output length always
//!   equals input length.
//! - **Source**: every name is parsed as a class-name reference and then
//!   wrapped. Names that fail to parse are dropped. The survivors keep
//!   their relative order.

use tracing::{debug, trace};

use crate::base::{StubId, StubOrigin};
use crate::types::{ClassType, CodeReference, ReferenceKind, ReferenceParseError};

use super::reference_list::ReferenceListStub;

/// Services a reference list needs from its surroundings to build types.
///
/// [`StubTree`](super::StubTree) is the standard implementation.
pub trait ReferenceListHost {
    /// Origin of the file `stub` belongs to.
    fn origin(&self, stub: &ReferenceListStub) -> StubOrigin;

    /// Build a type from a trusted compiled name. Must not fail.
    fn binary_reference_type(&self, owner: StubId, name: &str) -> ClassType;

    /// Parse a source name in the context of `owner`.
    fn parse_reference(
        &self,
        name: &str,
        owner: StubId,
        kind: ReferenceKind,
    ) -> Result<CodeReference, ReferenceParseError>;

    fn wrap_as_type(&self, reference: CodeReference) -> ClassType;
}

/// Build the full type array for `stub`.
pub(crate) fn materialize<H: ReferenceListHost + ?Sized>(
    stub: &ReferenceListStub,
    host: &H,
) -> Vec<ClassType> {
    let origin = host.origin(stub);
    trace!(
        parent = %stub.parent(),
        role = %stub.role(),
        %origin,
        count = stub.len(),
        "materializing reference list"
    );

    match origin {
        StubOrigin::Compiled => materialize_compiled(stub, host),
        StubOrigin::Source => materialize_source(stub, host),
    }
}

fn materialize_compiled<H: ReferenceListHost + ?Sized>(
    stub: &ReferenceListStub,
    host: &H,
) -> Vec<ClassType> {
    let owner = stub.parent();
    stub.names()
        .iter()
        .map(|name| host.binary_reference_type(owner, name))
        .collect()
}

fn materialize_source<H: ReferenceListHost + ?Sized>(
    stub: &ReferenceListStub,
    host: &H,
) -> Vec<ClassType> {
    let owner = stub.parent();
    let mut failed = 0usize;

    let types: Vec<ClassType> = stub
        .names()
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            match host.parse_reference(name, owner, ReferenceKind::ClassName) {
                Ok(mut reference) => {
                    reference.set_kind(ReferenceKind::ClassName);
                    Some(host.wrap_as_type(reference))
                }
                Err(error) => {
                    failed += 1;
                    debug!(%owner, index, name = %name, %error, "dropping malformed reference");
                    None
                }
            }
        })
        .collect();

    if failed > 0 {
        debug!(
            %owner,
            kept = types.len(),
            failed,
            "reference list materialized with malformed entries"
        );
    }
    types
}
