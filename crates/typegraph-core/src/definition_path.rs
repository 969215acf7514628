use crate::types::TypeKind;

/// One step in a [`DefinitionPath`].
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum PathSegment {
    Argument(String),
    Directive(String),
    EnumValue(String),
    Field(String),
    InputField(String),
    Type {
        kind: TypeKind,
        name: String,
    },
}
impl PathSegment {
    pub fn name(&self) -> &str {
        match self {
            Self::Argument(name)
                | Self::Directive(name)
                | Self::EnumValue(name)
                | Self::Field(name)
                | Self::InputField(name)
                | Self::Type { name, .. }
                => name.as_str(),
        }
    }
}

/// The syntactic ancestry of a definition that is currently being built
/// (e.g. `type -> field -> argument`).
///
/// A [`DefinitionPath`] is immutable: descending into a nested definition
/// produces a new path via [`DefinitionPath::child()`] which borrows its
/// parent. Each recursive build step therefore owns exactly the ancestry
/// it was handed, and nothing can leak from one top-level definition into
/// the next.
#[derive(Clone, Debug)]
pub struct DefinitionPath<'a> {
    parent: Option<&'a DefinitionPath<'a>>,
    segment: Option<PathSegment>,
}
impl DefinitionPath<'static> {
    /// The empty path that every top-level definition starts from.
    pub fn root() -> Self {
        Self {
            parent: None,
            segment: None,
        }
    }
}
impl<'a> DefinitionPath<'a> {
    pub fn child(&self, segment: PathSegment) -> DefinitionPath<'_> {
        DefinitionPath {
            parent: Some(self),
            segment: Some(segment),
        }
    }

    pub fn depth(&self) -> usize {
        self.segments().len()
    }

    /// The innermost field enclosing this path (including the last segment
    /// itself), if any.
    pub fn enclosing_field(&self) -> Option<&str> {
        self.segments()
            .into_iter()
            .rev()
            .find_map(|segment| match segment {
                PathSegment::Field(name) => Some(name.as_str()),
                _ => None,
            })
    }

    /// The innermost type enclosing this path (including the last segment
    /// itself), if any.
    pub fn enclosing_type(&self) -> Option<(TypeKind, &str)> {
        self.segments()
            .into_iter()
            .rev()
            .find_map(|segment| match segment {
                PathSegment::Type { kind, name } => Some((*kind, name.as_str())),
                _ => None,
            })
    }

    pub fn is_root(&self) -> bool {
        self.segment.is_none() && self.parent.is_none()
    }

    /// All segments of this path, outermost first.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments = vec![];
        let mut current = Some(self);
        while let Some(path) = current {
            if let Some(segment) = &path.segment {
                segments.push(segment);
            }
            current = path.parent;
        }
        segments.reverse();
        segments
    }

    /// An owned copy of [`DefinitionPath::segments()`] which can outlive the
    /// build step that produced this path.
    pub fn to_vec(&self) -> Vec<PathSegment> {
        self.segments().into_iter().cloned().collect()
    }
}
impl std::fmt::Display for DefinitionPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_segments(f, self.segments().into_iter())
    }
}

/// Renders segments as `Type.field(arg:)`, `Input.field`, `Enum.VALUE` or
/// `@directive(arg:)`.
pub(crate) fn fmt_segments<'s>(
    f: &mut std::fmt::Formatter<'_>,
    segments: impl Iterator<Item = &'s PathSegment>,
) -> std::fmt::Result {
    for (idx, segment) in segments.enumerate() {
        match segment {
            PathSegment::Type { name, .. } if idx == 0 => write!(f, "{name}")?,
            PathSegment::Type { name, .. } => write!(f, ".{name}")?,
            PathSegment::Argument(name) => write!(f, "({name}:)")?,
            PathSegment::Directive(name) => write!(f, "@{name}")?,
            PathSegment::EnumValue(name)
                | PathSegment::Field(name)
                | PathSegment::InputField(name)
                => write!(f, ".{name}")?,
        }
    }
    Ok(())
}

/// Formats an owned ancestry snapshot the same way a [`DefinitionPath`]
/// would be formatted.
pub struct DisplayAncestry<'a>(pub &'a [PathSegment]);
impl std::fmt::Display for DisplayAncestry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<schema>");
        }
        fmt_segments(f, self.0.iter())
    }
}
