use crate::loc;
use crate::schema::SchemaBuildError;
use crate::test_utils;
use crate::types::TypeDefinition;
use crate::types::TypeId;
use crate::types::TypeReferenceRegistry;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

fn types_map(typedefs: Vec<TypeDefinition>) -> IndexMap<String, TypeDefinition> {
    typedefs.into_iter()
        .map(|typedef| (typedef.name().to_string(), typedef))
        .collect()
}

#[test]
fn each_declaration_gets_its_own_symbol() {
    let mut registry = TypeReferenceRegistry::new();
    assert!(registry.is_empty());

    let ref1 = registry.declare("User", loc::SourceLocation::GraphQLBuiltIn);
    let ref2 = registry.declare("User", loc::SourceLocation::GraphQLBuiltIn);

    assert_ne!(ref1.symbol(), ref2.symbol());
    assert_eq!(ref1.name(), "User");
    assert_eq!(registry.len(), 2);
}

#[test]
fn forward_mutual_and_self_references_resolve() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    // `Node` is referenced before it is built.
    let query = test_utils::build_type(&mut registry, "type Query { node: Node }")?;
    let node = test_utils::build_type(&mut registry, "
        type Node {
            parent: Node
            children: [Node!]!
            query: Query
        }
    ")?;
    let types = types_map(vec![query, node]);

    let bindings = registry.resolve_all(&types)?;
    assert_eq!(bindings.len(), registry.len());

    let query = &types["Query"];
    let node = &types["Node"];
    let symbol_of = |typedef: &TypeDefinition, field_name: &str| {
        typedef.fields()[field_name].type_ref().innermost_named_ref().symbol()
    };
    assert_eq!(bindings.get(symbol_of(query, "node")), Some(TypeId(1)));
    assert_eq!(bindings.get(symbol_of(node, "parent")), Some(TypeId(1)));
    assert_eq!(bindings.get(symbol_of(node, "children")), Some(TypeId(1)));
    assert_eq!(bindings.get(symbol_of(node, "query")), Some(TypeId(0)));

    Ok(())
}

#[test]
fn every_unresolved_reference_is_reported() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let query = test_utils::build_type(&mut registry, "
        type Query {
            a: Missing
            b: [Missing]
            c: Query
        }
    ")?;
    let types = types_map(vec![query]);

    let errors = registry.resolve_all(&types).expect_err("references should not resolve");
    assert_eq!(errors.len(), 2);
    for err in &errors {
        assert!(matches!(
            err,
            SchemaBuildError::UnresolvedTypeReference { type_name, .. } if type_name == "Missing",
        ));
    }

    Ok(())
}

#[test]
fn empty_registry_resolves_to_no_bindings() -> Result<()> {
    let registry = TypeReferenceRegistry::new();
    let bindings = registry.resolve_all(&IndexMap::new())?;
    assert!(bindings.is_empty());
    Ok(())
}
