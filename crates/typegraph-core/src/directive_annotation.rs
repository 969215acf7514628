use crate::definition_path::PathSegment;
use crate::loc;
use crate::Value;
use indexmap::IndexMap;

/// The syntactic locations a directive may be declared for.
///
/// https://spec.graphql.org/October2021/#DirectiveLocations
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum DirectiveLocation {
    ArgumentDefinition,
    Enum,
    EnumValue,
    Field,
    FieldDefinition,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    InputFieldDefinition,
    InputObject,
    Interface,
    Mutation,
    Object,
    Query,
    Scalar,
    Schema,
    Subscription,
    Union,
    VariableDefinition,
}
impl DirectiveLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::Field => "FIELD",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
            Self::InputObject => "INPUT_OBJECT",
            Self::Interface => "INTERFACE",
            Self::Mutation => "MUTATION",
            Self::Object => "OBJECT",
            Self::Query => "QUERY",
            Self::Scalar => "SCALAR",
            Self::Schema => "SCHEMA",
            Self::Subscription => "SUBSCRIPTION",
            Self::Union => "UNION",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }

    pub(crate) fn from_ast(ast_loc: &graphql_parser::schema::DirectiveLocation) -> Self {
        use graphql_parser::schema::DirectiveLocation as AstLoc;
        match ast_loc {
            AstLoc::ArgumentDefinition => Self::ArgumentDefinition,
            AstLoc::Enum => Self::Enum,
            AstLoc::EnumValue => Self::EnumValue,
            AstLoc::Field => Self::Field,
            AstLoc::FieldDefinition => Self::FieldDefinition,
            AstLoc::FragmentDefinition => Self::FragmentDefinition,
            AstLoc::FragmentSpread => Self::FragmentSpread,
            AstLoc::InlineFragment => Self::InlineFragment,
            AstLoc::InputFieldDefinition => Self::InputFieldDefinition,
            AstLoc::InputObject => Self::InputObject,
            AstLoc::Interface => Self::Interface,
            AstLoc::Mutation => Self::Mutation,
            AstLoc::Object => Self::Object,
            AstLoc::Query => Self::Query,
            AstLoc::Scalar => Self::Scalar,
            AstLoc::Schema => Self::Schema,
            AstLoc::Subscription => Self::Subscription,
            AstLoc::Union => Self::Union,
            AstLoc::VariableDefinition => Self::VariableDefinition,
        }
    }
}
impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a
/// [directive annotation](https://spec.graphql.org/October2021/#sec-Language.Directives)
/// applied to some type, field, argument, input field or enum value
/// definition.
///
/// Besides the directive's name and arguments, each annotation remembers the
/// [`DirectiveLocation`] of the definition it is attached to and the
/// ancestry of that definition at the time it was built (e.g. the enclosing
/// type and field of an argument).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DirectiveAnnotation {
    pub(crate) ancestry: Vec<PathSegment>,
    pub(crate) arguments: IndexMap<String, Value>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) location: DirectiveLocation,
    pub(crate) name: String,
}
impl DirectiveAnnotation {
    /// The definitions enclosing the annotated definition, outermost first.
    ///
    /// For a directive on an argument this is `[Type, Field]`; for a
    /// directive on a type it is empty.
    pub fn ancestry(&self) -> &[PathSegment] {
        self.ancestry.as_slice()
    }

    /// A map from ArgumentName -> [`Value`] for all arguments passed to this
    /// annotation, in the order they were written.
    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    /// The name of the directive this annotation applies.
    pub fn directive_name(&self) -> &str {
        self.name.as_str()
    }

    /// The kind of definition this annotation is attached to.
    pub fn location(&self) -> DirectiveLocation {
        self.location
    }
}
