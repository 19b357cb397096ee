//! Resolved class types and the factory that builds them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{StubId, StubOrigin};

use super::reference::CodeReference;

/// A class type named by a reference list, e.g. the `Comparable<T>` in
/// `class Foo implements Comparable<T>`.
///
/// Cloning is cheap (one `Arc`). Two types are equal when their canonical
/// text and origin match; the owner and the parsed reference (with its source
/// range) are not compared.
#[derive(Clone)]
pub struct ClassType {
    data: Arc<ClassTypeData>,
}

struct ClassTypeData {
    canonical_text: SmolStr,
    qualified_name: SmolStr,
    type_arguments: Box<[SmolStr]>,
    origin: StubOrigin,
    owner: StubId,
    /// Only present for types parsed from source text.
    reference: Option<CodeReference>,
}

impl ClassType {
    /// Normalized text for source types, the stored text for compiled ones.
    pub fn canonical_text(&self) -> &str {
        &self.data.canonical_text
    }

    /// Dotted name with all type arguments removed.
    pub fn qualified_name(&self) -> &str {
        &self.data.qualified_name
    }

    /// Last segment of [`qualified_name`](Self::qualified_name).
    pub fn simple_name(&self) -> &str {
        let qualified = self.qualified_name();
        qualified.rsplit('.').next().unwrap_or(qualified)
    }

    /// Canonical text of each type argument of the innermost class.
    pub fn type_arguments(&self) -> &[SmolStr] {
        &self.data.type_arguments
    }

    /// Whether the innermost class has any type arguments.
    pub fn has_type_arguments(&self) -> bool {
        !self.data.type_arguments.is_empty()
    }

    /// Which kind of file the type was built from.
    pub fn origin(&self) -> StubOrigin {
        self.data.origin
    }

    /// The declaration stub this type was created for.
    pub fn owner(&self) -> StubId {
        self.data.owner
    }

    /// The parsed reference, for source-origin types.
    pub fn reference(&self) -> Option<&CodeReference> {
        self.data.reference.as_ref()
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            || (self.data.origin == other.data.origin
                && self.data.canonical_text == other.data.canonical_text)
    }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.canonical_text.hash(state);
        self.data.origin.hash(state);
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassType({}, {})", self.data.canonical_text, self.data.origin)
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.canonical_text)
    }
}

/// Builds [`ClassType`]s from the two kinds of input a reference list holds.
#[derive(Copy, Clone, Debug, Default)]
pub struct TypeFactory;

impl TypeFactory {
    /// Create a factory. It holds no state.
    pub fn new() -> Self {
        Self
    }

    /// Build a type straight from a name stored in a compiled class.
    ///
    /// Compiled names are trusted: nothing is validated and this never
    /// fails. The canonical text is `name` exactly as stored. Type arguments
    /// of the innermost class are split out as-is.
    pub fn binary_reference_type(&self, owner: StubId, name: &str) -> ClassType {
        let (qualified_name, type_arguments) = split_binary_name(name);
        ClassType {
            data: Arc::new(ClassTypeData {
                canonical_text: SmolStr::new(name),
                qualified_name: SmolStr::new(qualified_name),
                type_arguments: type_arguments.into_boxed_slice(),
                origin: StubOrigin::Compiled,
                owner,
                reference: None,
            }),
        }
    }

    /// Wrap a parsed source reference as a type.
    pub fn wrap_as_type(&self, reference: CodeReference) -> ClassType {
        let type_arguments = reference
            .type_arguments()
            .iter()
            .map(|arg| SmolStr::new(arg.to_string()))
            .collect();
        ClassType {
            data: Arc::new(ClassTypeData {
                canonical_text: SmolStr::new(reference.canonical_text()),
                qualified_name: SmolStr::new(reference.qualified_name()),
                type_arguments,
                origin: StubOrigin::Source,
                owner: reference.context(),
                reference: Some(reference),
            }),
        }
    }
}

/// Split `a.B<X, Map<K, V>>` into `a.B` and `["X", "Map<K, V>"]`.
///
/// Unbalanced brackets are tolerated: a stray `>` is ignored and an
/// unterminated group keeps what was collected so far.
fn split_binary_name(text: &str) -> (String, Vec<SmolStr>) {
    let mut qualified = String::with_capacity(text.len());
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    for ch in text.chars() {
        match ch {
            '<' => {
                if depth == 0 {
                    args.clear();
                    current.clear();
                } else {
                    current.push(ch);
                }
                depth += 1;
            }
            '.' if depth == 0 => {
                // a new segment starts; earlier arguments belong to an outer class
                args.clear();
                qualified.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    push_arg(&mut args, &mut current);
                } else {
                    current.push(ch);
                }
            }
            ',' if depth == 1 => push_arg(&mut args, &mut current),
            _ if depth == 0 => {
                if !ch.is_whitespace() {
                    qualified.push(ch);
                }
            }
            _ => current.push(ch),
        }
    }
    if depth > 0 {
        push_arg(&mut args, &mut current);
    }

    (qualified, args)
}

fn push_arg(args: &mut Vec<SmolStr>, current: &mut String) {
    let arg = current.trim();
    if !arg.is_empty() {
        args.push(SmolStr::new(arg));
    }
    current.clear();
}
