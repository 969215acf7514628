use crate::DirectiveAnnotation;
use crate::loc;
use crate::types::ArgumentDefinition;
use crate::types::DefinitionTrait;
use crate::types::EnumValueDefinition;
use crate::types::FieldDefinition;
use crate::types::NamedTypeRef;
use crate::types::TypeKind;
use indexmap::IndexMap;
use inherent::inherent;

/// A named type defined in a schema (or built into GraphQL).
///
/// Only the collections relevant to the type's [`TypeKind`] are ever
/// populated: `fields` and `interfaces` for object and interface types,
/// `input_fields` for input object types, `enum_values` for enum types and
/// `union_members` for union types.
///
/// A [`TypeDefinition`] is mutable while the schema is being built (its
/// extensions are merged into it) and frozen once it is part of a
/// [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TypeDefinition {
    pub(crate) bind_to: Option<String>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) enum_values: IndexMap<String, EnumValueDefinition>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) input_fields: IndexMap<String, ArgumentDefinition>,
    pub(crate) interfaces: Vec<NamedTypeRef>,
    pub(crate) kind: TypeKind,
    pub(crate) name: String,
    pub(crate) union_members: Vec<NamedTypeRef>,
}
impl TypeDefinition {
    pub(crate) fn new(
        kind: TypeKind,
        name: impl Into<String>,
        def_location: loc::SourceLocation,
    ) -> Self {
        Self {
            bind_to: None,
            def_location,
            description: None,
            directives: vec![],
            enum_values: IndexMap::new(),
            fields: IndexMap::new(),
            input_fields: IndexMap::new(),
            interfaces: vec![],
            kind,
            name: name.into(),
            union_members: vec![],
        }
    }

    pub(crate) fn builtin_scalar(name: &str, description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Self::new(TypeKind::Scalar, name, loc::SourceLocation::GraphQLBuiltIn)
        }
    }

    /// The external binding identifier given with `@bind(to: "...")`.
    pub fn bind_to(&self) -> Option<&str> {
        self.bind_to.as_deref()
    }

    /// A map from ValueName -> [`EnumValueDefinition`] in declaration order.
    pub fn enum_values(&self) -> &IndexMap<String, EnumValueDefinition> {
        &self.enum_values
    }

    /// A map from FieldName -> [`FieldDefinition`] for all fields of this
    /// object or interface type.
    ///
    /// Fields keep the order they were declared in. Fields added by a type
    /// extension follow the fields of the type they extend.
    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    /// A map from FieldName -> [`ArgumentDefinition`] for all fields of this
    /// input object type.
    pub fn input_fields(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.input_fields
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|iface_ref| iface_ref.name()).collect()
    }

    pub fn interfaces(&self) -> &[NamedTypeRef] {
        self.interfaces.as_slice()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, loc::SourceLocation::GraphQLBuiltIn)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn union_member_names(&self) -> Vec<&str> {
        self.union_members.iter().map(|member_ref| member_ref.name()).collect()
    }

    pub fn union_members(&self) -> &[NamedTypeRef] {
        self.union_members.as_slice()
    }

    /// Every [`NamedTypeRef`] held by this definition: interfaces, union
    /// members, and the innermost refs of all field, argument and input field
    /// types.
    pub fn named_type_refs(&self) -> Vec<&NamedTypeRef> {
        let mut refs: Vec<&NamedTypeRef> = vec![];
        refs.extend(self.interfaces.iter());
        refs.extend(self.union_members.iter());
        for field in self.fields.values() {
            refs.push(field.type_ref.innermost_named_ref());
            for arg in field.arguments.values() {
                refs.push(arg.type_ref.innermost_named_ref());
            }
        }
        for input_field in self.input_fields.values() {
            refs.push(input_field.type_ref.innermost_named_ref());
        }
        refs
    }
}

#[inherent]
impl DefinitionTrait for TypeDefinition {
    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Directive annotations in the order they were applied. Annotations
    /// added by type extensions follow those of the extended type.
    pub fn directives(&self) -> &[DirectiveAnnotation] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
