use crate::DirectiveAnnotation;
use crate::loc;
use crate::types::ArgumentDefinition;
use crate::types::DefinitionTrait;
use crate::types::TypeRef;
use indexmap::IndexMap;
use inherent::inherent;

/// A field of an object or interface type.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) bind_to: Option<String>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
}
impl FieldDefinition {
    /// A map from ArgumentName -> [`ArgumentDefinition`], in the order the
    /// arguments were declared.
    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    /// The external binding identifier given with `@bind(to: "...")`.
    pub fn bind_to(&self) -> Option<&str> {
        self.bind_to.as_deref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

#[inherent]
impl DefinitionTrait for FieldDefinition {
    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
