use crate::DirectiveLocation;

/// The kind of a [`TypeDefinition`](crate::types::TypeDefinition).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl TypeKind {
    /// The [`DirectiveLocation`] of a directive annotating a type of this
    /// kind.
    pub fn directive_location(&self) -> DirectiveLocation {
        match self {
            Self::Enum => DirectiveLocation::Enum,
            Self::InputObject => DirectiveLocation::InputObject,
            Self::Interface => DirectiveLocation::Interface,
            Self::Object => DirectiveLocation::Object,
            Self::Scalar => DirectiveLocation::Scalar,
            Self::Union => DirectiveLocation::Union,
        }
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Enum | Self::InputObject | Self::Scalar)
    }

    pub fn is_output_type(&self) -> bool {
        !matches!(self, Self::InputObject)
    }
}
impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Enum => "enum",
            Self::InputObject => "input",
            Self::Interface => "interface",
            Self::Object => "type",
            Self::Scalar => "scalar",
            Self::Union => "union",
        })
    }
}
