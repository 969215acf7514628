use crate::loc;
use crate::schema::Schema;
use crate::types::TypeDefinition;

/// Identifies one symbolic type reference issued by a
/// [`TypeReferenceRegistry`](crate::types::TypeReferenceRegistry).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct SymbolId(pub(crate) usize);
impl SymbolId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Identifies a [`TypeDefinition`] within a [`Schema`]'s type arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct TypeId(pub(crate) usize);
impl TypeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A by-name reference to some [`TypeDefinition`].
///
/// A [`NamedTypeRef`] never holds the [`TypeDefinition`] it refers to.
/// While a schema is being built it is only a name plus the [`SymbolId`]
/// handed out by the
/// [`TypeReferenceRegistry`](crate::types::TypeReferenceRegistry); once the
/// [`Schema`] is built, the schema maps that [`SymbolId`] to the [`TypeId`]
/// of the matching definition. This is what lets two types refer to each
/// other (or a type refer to itself) without either owning the other.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NamedTypeRef {
    pub(crate) name: String,
    pub(crate) ref_location: loc::SourceLocation,
    pub(crate) symbol: SymbolId,
}
impl NamedTypeRef {
    /// Look up the [`TypeDefinition`] this reference was resolved to.
    pub fn deref<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Result<&'schema TypeDefinition, DerefError> {
        schema.resolve(self)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Where this reference was written in the schema.
    pub fn ref_location(&self) -> &loc::SourceLocation {
        &self.ref_location
    }

    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DerefError {
    #[error("No type named `{0}` is bound to this reference")]
    DanglingReference(String),
}
