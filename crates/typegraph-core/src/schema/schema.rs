use crate::schema::SchemaBuilder;
use crate::types::DerefError;
use crate::types::DirectiveDefinition;
use crate::types::NamedTypeRef;
use crate::types::TypeBindings;
use crate::types::TypeDefinition;
use crate::types::TypeId;
use crate::types::TypeKind;
use indexmap::IndexMap;

/// Represents a fully typechecked and immutable GraphQL schema.
///
/// Every [`TypeDefinition`] lives in a single ordered table (in the order
/// types were first defined, after the built-in scalars) and is addressed
/// by its [`TypeId`]. Every [`NamedTypeRef`] within the schema is bound to
/// exactly one [`TypeId`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Schema {
    pub(crate) bindings: TypeBindings,
    pub(crate) directive_defs: IndexMap<String, DirectiveDefinition>,
    pub(crate) mutation_type: Option<TypeId>,
    pub(crate) query_type: TypeId,
    pub(crate) subscription_type: Option<TypeId>,
    pub(crate) types: IndexMap<String, TypeDefinition>,
}
impl Schema {
    /// Returns an [`IndexMap<String, DirectiveDefinition>`] containing all
    /// directives defined within this [`Schema`].
    ///
    /// [^note] This map includes both directives defined while building this
    /// [`Schema`] as well as implicitly-defined, built-in directives like
    /// `@deprecated`.
    pub fn all_directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directive_defs
    }

    /// Returns an [`IndexMap<String, TypeDefinition>`] containing all types
    /// defined within this [`Schema`].
    ///
    /// [^note] This map includes both types defined while building this
    /// [`Schema`] as well as the built-in scalars like `Boolean`.
    pub fn all_types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Types defined by schema documents (i.e. excluding built-in scalars),
    /// in definition order.
    pub fn defined_types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values().filter(|typedef| !typedef.is_builtin())
    }

    pub fn directive_def(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directive_defs.get(name)
    }

    /// Returns this [`Schema`]'s Mutation root operation type (if one was
    /// defined).
    ///
    /// This factors in any override given by a `schema { ... }` block, so it
    /// should be preferred over looking up an object type named
    /// `"Mutation"`.
    pub fn mutation_type(&self) -> Option<&TypeDefinition> {
        self.mutation_type.and_then(|type_id| self.type_by_id(type_id))
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// This factors in any override given by a `schema { ... }` block, so it
    /// should be preferred over looking up an object type named `"Query"`.
    pub fn query_type(&self) -> &TypeDefinition {
        &self.types[self.query_type.index()]
    }

    /// The [`TypeDefinition`] a [`NamedTypeRef`] from this schema is bound
    /// to.
    pub fn resolve(&self, named_ref: &NamedTypeRef) -> Result<&TypeDefinition, DerefError> {
        self.resolve_id(named_ref)
            .and_then(|type_id| self.type_by_id(type_id))
            .ok_or_else(|| DerefError::DanglingReference(named_ref.name().to_string()))
    }

    /// The [`TypeId`] a [`NamedTypeRef`] from this schema is bound to.
    ///
    /// A reference that was not issued while building this schema (and so
    /// is bound to a differently named type, or to nothing) yields `None`.
    pub fn resolve_id(&self, named_ref: &NamedTypeRef) -> Option<TypeId> {
        self.bindings
            .get(named_ref.symbol())
            .filter(|type_id| {
                self.types
                    .get_index(type_id.index())
                    .is_some_and(|(type_name, _)| type_name == named_ref.name())
            })
    }

    /// Returns this [`Schema`]'s Subscription root operation type (if one
    /// was defined).
    pub fn subscription_type(&self) -> Option<&TypeDefinition> {
        self.subscription_type.and_then(|type_id| self.type_by_id(type_id))
    }

    pub fn type_by_id(&self, type_id: TypeId) -> Option<&TypeDefinition> {
        self.types.get_index(type_id.index()).map(|(_, typedef)| typedef)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.types.get_index_of(name).map(TypeId)
    }

    /// All types of the given [`TypeKind`], in definition order.
    pub fn types_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values().filter(move |typedef| typedef.kind() == kind)
    }
}
