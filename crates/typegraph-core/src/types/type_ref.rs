use crate::ast;
use crate::loc;
use crate::schema::Schema;
use crate::types::DerefError;
use crate::types::NamedTypeRef;
use crate::types::TypeDefinition;
use crate::types::TypeReferenceRegistry;

/// The declared type of a field, argument or input field.
///
/// List and non-null wrappers are kept structurally; only the innermost
/// [`NamedTypeRef`] refers to a [`TypeDefinition`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeRef {
    List(Box<TypeRef>),
    Named(NamedTypeRef),
    NonNull(Box<TypeRef>),
}
impl TypeRef {
    pub(crate) fn from_ast_type(
        registry: &mut TypeReferenceRegistry,
        ref_location: &loc::SourceLocation,
        ast_type: &ast::query::Type,
    ) -> Self {
        use graphql_parser::query::Type as AstType;
        match ast_type {
            AstType::ListType(inner) =>
                Self::List(Box::new(Self::from_ast_type(registry, ref_location, inner))),

            AstType::NamedType(name) =>
                Self::Named(registry.declare(name, ref_location.to_owned())),

            AstType::NonNullType(inner) =>
                Self::NonNull(Box::new(Self::from_ast_type(registry, ref_location, inner))),
        }
    }

    /// Recursively unwrap this [`TypeRef`] and return the innermost
    /// [`NamedTypeRef`].
    pub fn innermost_named_ref(&self) -> &NamedTypeRef {
        match self {
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_named_ref(),
            Self::Named(named_ref) => named_ref,
        }
    }

    /// The [`TypeDefinition`] of the innermost named type.
    pub fn innermost_type<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Result<&'schema TypeDefinition, DerefError> {
        self.innermost_named_ref().deref(schema)
    }

    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::Named(_) => false,
            Self::NonNull(inner) => inner.is_list(),
        }
    }

    pub fn nullable(&self) -> bool {
        !matches!(self, Self::NonNull(_))
    }
}
impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named(named_ref) => write!(f, "{}", named_ref.name()),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
