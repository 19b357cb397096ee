//! Structured references produced by the reference parser.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{StubId, TextRange};

/// What a reference is expected to name.
///
/// Reference text on its own is ambiguous: `a.b.C` could be a class or a
/// package path. Callers that know the answer pass a hint; otherwise the
/// parser infers one from the shape of the text.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReferenceKind {
    /// A class name, possibly qualified and parameterized.
    ClassName,
    /// Either a class or a package; the text alone cannot tell.
    ClassOrPackageName,
    /// A package path.
    PackageName,
}

impl ReferenceKind {
    /// Guess the kind of a reference with no caller-supplied hint.
    ///
    /// Type arguments or a capitalized last segment mean a class; anything
    /// else stays ambiguous.
    pub fn infer(segments: &[ReferenceSegment]) -> ReferenceKind {
        let has_args = segments.iter().any(|s| !s.type_arguments.is_empty());
        let capitalized = segments
            .last()
            .and_then(|s| s.name.chars().next())
            .is_some_and(char::is_uppercase);
        if has_args || capitalized {
            ReferenceKind::ClassName
        } else {
            ReferenceKind::ClassOrPackageName
        }
    }
}

/// A parsed code reference like `java.util.Map.Entry<K, V>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodeReference {
    pub(crate) segments: Vec<ReferenceSegment>,
    pub(crate) range: TextRange,
    pub(crate) kind: ReferenceKind,
    /// The stub whose context the text was parsed in.
    pub(crate) context: StubId,
}

impl CodeReference {
    /// Dotted segments, outermost first.
    pub fn segments(&self) -> &[ReferenceSegment] {
        &self.segments
    }

    /// Range of the reference within the text it was parsed from.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// What the reference is known to name.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Override the inferred kind.
    pub fn set_kind(&mut self, kind: ReferenceKind) {
        self.kind = kind;
    }

    /// The declaration the reference was parsed for.
    pub fn context(&self) -> StubId {
        self.context
    }

    /// Dotted name without type arguments, e.g. `java.util.Map.Entry`.
    pub fn qualified_name(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.name);
        }
        out
    }

    /// The last segment's name.
    pub fn reference_name(&self) -> &str {
        self.segments.last().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Type arguments of the last segment.
    pub fn type_arguments(&self) -> &[TypeArgument] {
        self.segments
            .last()
            .map(|s| s.type_arguments.as_slice())
            .unwrap_or(&[])
    }

    /// Normalized text: no whitespace, no annotations, `,` between arguments.
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// One dotted component of a reference with its own type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceSegment {
    pub name: SmolStr,
    pub type_arguments: Vec<TypeArgument>,
}

impl fmt::Display for ReferenceSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Type(TypeRef),
    /// `?`, `? extends T` or `? super T`.
    Wildcard(WildcardBound),
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Type(ty) => write!(f, "{ty}"),
            TypeArgument::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            TypeArgument::Wildcard(WildcardBound::Extends(ty)) => write!(f, "? extends {ty}"),
            TypeArgument::Wildcard(WildcardBound::Super(ty)) => write!(f, "? super {ty}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

/// A type used as a type argument: a class reference or a primitive array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub base: TypeRefBase,
    pub array_dimensions: u8,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            TypeRefBase::Class(reference) => write!(f, "{reference}")?,
            TypeRefBase::Primitive(name) => f.write_str(name)?,
        }
        for _ in 0..self.array_dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRefBase {
    Class(CodeReference),
    Primitive(SmolStr),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LocalStubId};

    fn segment(name: &str, args: Vec<TypeArgument>) -> ReferenceSegment {
        ReferenceSegment {
            name: SmolStr::new(name),
            type_arguments: args,
        }
    }

    fn reference(segments: Vec<ReferenceSegment>) -> CodeReference {
        CodeReference {
            kind: ReferenceKind::infer(&segments),
            segments,
            range: TextRange::default(),
            context: StubId::new(FileId::new(0), LocalStubId::ROOT),
        }
    }

    #[test]
    fn test_infer_kind() {
        let class = [segment("java", vec![]), segment("Foo", vec![])];
        assert_eq!(ReferenceKind::infer(&class), ReferenceKind::ClassName);

        let ambiguous = [segment("java", vec![]), segment("util", vec![])];
        assert_eq!(ReferenceKind::infer(&ambiguous), ReferenceKind::ClassOrPackageName);
    }

    #[test]
    fn test_canonical_text() {
        let string = TypeArgument::Type(TypeRef {
            base: TypeRefBase::Class(reference(vec![segment("String", vec![])])),
            array_dimensions: 0,
        });
        let ints = TypeArgument::Wildcard(WildcardBound::Super(Box::new(TypeRef {
            base: TypeRefBase::Primitive(SmolStr::new("int")),
            array_dimensions: 2,
        })));
        let map = reference(vec![
            segment("java", vec![]),
            segment("util", vec![]),
            segment("Map", vec![string, ints]),
        ]);

        assert_eq!(map.canonical_text(), "java.util.Map<String,? super int[][]>");
        assert_eq!(map.qualified_name(), "java.util.Map");
        assert_eq!(map.reference_name(), "Map");
        assert_eq!(map.type_arguments().len(), 2);
    }
}
