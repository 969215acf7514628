use crate::DirectiveAnnotation;
use crate::loc;
use crate::types::DefinitionTrait;
use crate::types::TypeRef;
use crate::Value;
use inherent::inherent;

/// An argument of a [`FieldDefinition`](crate::types::FieldDefinition), or a
/// field of an input object type (both are "input values" in GraphQL).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ArgumentDefinition {
    pub(crate) bind_to: Option<String>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) default_value: Option<Value>,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
}
impl ArgumentDefinition {
    pub fn bind_to(&self) -> Option<&str> {
        self.bind_to.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
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
impl DefinitionTrait for ArgumentDefinition {
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
