use crate::DirectiveLocation;
use crate::loc;
use crate::types::ArgumentDefinition;
use crate::types::NamedTypeRef;
use crate::types::TypeRef;
use crate::types::TypeReferenceRegistry;
use crate::Value;
use indexmap::IndexMap;

pub const BIND_DIRECTIVE_NAME: &str = "bind";
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";
pub const DEPRECATED_DIRECTIVE_NAME: &str = "deprecated";

/// A directive declared with `directive @name(...) on ...` (or built into
/// GraphQL).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DirectiveDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) description: Option<String>,
    pub(crate) locations: Vec<DirectiveLocation>,
    pub(crate) name: String,
    pub(crate) repeatable: bool,
}
impl DirectiveDefinition {
    /// The directives every schema has without declaring them.
    pub(crate) fn builtins(registry: &mut TypeReferenceRegistry) -> Vec<Self> {
        use DirectiveLocation::*;
        vec![
            Self::builtin(
                registry,
                "skip",
                "Directs the executor to skip this field or fragment when the \
                `if` argument is true.",
                ("if", "Boolean", /* non_null = */ true, None),
                &[Field, FragmentSpread, InlineFragment],
            ),
            Self::builtin(
                registry,
                "include",
                "Directs the executor to include this field or fragment only \
                when the `if` argument is true.",
                ("if", "Boolean", /* non_null = */ true, None),
                &[Field, FragmentSpread, InlineFragment],
            ),
            Self::builtin(
                registry,
                DEPRECATED_DIRECTIVE_NAME,
                "Marks an element of a GraphQL schema as no longer supported.",
                (
                    "reason",
                    "String",
                    /* non_null = */ false,
                    Some(Value::String(DEFAULT_DEPRECATION_REASON.to_string())),
                ),
                &[FieldDefinition, ArgumentDefinition, InputFieldDefinition, EnumValue],
            ),
            Self::builtin(
                registry,
                "specifiedBy",
                "Exposes a URL that specifies the behavior of this scalar.",
                ("url", "String", /* non_null = */ true, None),
                &[Scalar],
            ),
            Self::builtin(
                registry,
                BIND_DIRECTIVE_NAME,
                "Binds a schema element to an external runtime value.",
                ("to", "String", /* non_null = */ true, None),
                &[
                    ArgumentDefinition,
                    Enum,
                    EnumValue,
                    FieldDefinition,
                    InputFieldDefinition,
                    InputObject,
                    Interface,
                    Object,
                    Scalar,
                    Union,
                ],
            ),
        ]
    }

    fn builtin(
        registry: &mut TypeReferenceRegistry,
        name: &str,
        description: &str,
        (arg_name, arg_type_name, arg_non_null, arg_default): (&str, &str, bool, Option<Value>),
        locations: &[DirectiveLocation],
    ) -> Self {
        let named_ref: NamedTypeRef = registry.declare(
            arg_type_name,
            loc::SourceLocation::GraphQLBuiltIn,
        );
        let type_ref =
            if arg_non_null {
                TypeRef::NonNull(Box::new(TypeRef::Named(named_ref)))
            } else {
                TypeRef::Named(named_ref)
            };

        Self {
            arguments: IndexMap::from([(arg_name.to_string(), ArgumentDefinition {
                bind_to: None,
                def_location: loc::SourceLocation::GraphQLBuiltIn,
                default_value: arg_default,
                deprecation_reason: None,
                description: None,
                directives: vec![],
                name: arg_name.to_string(),
                type_ref,
            })]),
            def_location: loc::SourceLocation::GraphQLBuiltIn,
            description: Some(description.to_string()),
            locations: locations.to_vec(),
            name: name.to_string(),
            repeatable: false,
        }
    }

    pub fn allows_location(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, loc::SourceLocation::GraphQLBuiltIn)
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        self.locations.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
