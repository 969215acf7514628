use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::NamedTypeRef;
use crate::types::SymbolId;
use crate::types::TypeDefinition;
use crate::types::TypeId;
use indexmap::IndexMap;

#[derive(Clone, Debug)]
struct DeclaredSymbol {
    name: String,
    ref_location: loc::SourceLocation,
}

/// Issues symbolic [`NamedTypeRef`]s while a schema is being built and later
/// binds all of them to concrete [`TypeDefinition`]s in one pass.
///
/// References may be declared before (or without) the type they name being
/// defined. Nothing is looked up until [`TypeReferenceRegistry::resolve_all()`]
/// runs, after every definition and extension has been collected, so forward
/// references, mutual references and self references all resolve the same
/// way.
#[derive(Debug, Default)]
pub struct TypeReferenceRegistry {
    symbols: Vec<DeclaredSymbol>,
}
impl TypeReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a reference to the type named `name`.
    pub fn declare(
        &mut self,
        name: impl AsRef<str>,
        ref_location: loc::SourceLocation,
    ) -> NamedTypeRef {
        let symbol = SymbolId(self.symbols.len());
        let name = name.as_ref().to_string();
        self.symbols.push(DeclaredSymbol {
            name: name.clone(),
            ref_location: ref_location.clone(),
        });
        NamedTypeRef {
            name,
            ref_location,
            symbol,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Bind every declared reference to the definition in `types` with the
    /// same name. A [`TypeId`] is the index of a definition within `types`.
    ///
    /// Every reference that names no definition produces one
    /// [`SchemaBuildError::UnresolvedTypeReference`].
    pub fn resolve_all(
        &self,
        types: &IndexMap<String, TypeDefinition>,
    ) -> Result<TypeBindings, Vec<SchemaBuildError>> {
        let mut bindings = Vec::with_capacity(self.symbols.len());
        let mut errors = vec![];
        for symbol in &self.symbols {
            match types.get_index_of(symbol.name.as_str()) {
                Some(type_idx) => bindings.push(TypeId(type_idx)),
                None => errors.push(SchemaBuildError::UnresolvedTypeReference {
                    ref_location: symbol.ref_location.clone(),
                    type_name: symbol.name.clone(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        log::debug!(
            "Resolved {} type references against {} types.",
            bindings.len(),
            types.len(),
        );
        Ok(TypeBindings(bindings))
    }
}

/// The result of [`TypeReferenceRegistry::resolve_all()`]: a [`TypeId`] for
/// every [`SymbolId`] the registry issued.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TypeBindings(Vec<TypeId>);
impl TypeBindings {
    pub fn get(&self, symbol: SymbolId) -> Option<TypeId> {
        self.0.get(symbol.0).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
