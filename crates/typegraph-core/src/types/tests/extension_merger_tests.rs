use crate::schema::SchemaBuildError;
use crate::test_utils;
use crate::types::DirectiveDefinition;
use crate::types::ExtensionMerger;
use crate::types::TypeKind;
use crate::types::TypeReferenceRegistry;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

fn directive_defs(registry: &mut TypeReferenceRegistry) -> IndexMap<String, DirectiveDefinition> {
    test_utils::build_directive_defs(registry, "
        directive @key(fields: String!) on OBJECT
        directive @tag(name: String!) repeatable on OBJECT | FIELD_DEFINITION
    ")
}

#[test]
fn fields_are_appended_after_base_fields() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let mut base = test_utils::build_type(&mut registry, "type Query { b: Int a: Int }")?;
    let extension = test_utils::build_type_ext(&mut registry, "extend type Query { c: Int }")?;

    ExtensionMerger::new(&directive_defs).merge(&mut base, extension)?;

    assert_eq!(
        base.fields().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["b", "a", "c"],
    );

    Ok(())
}

#[test]
fn interfaces_and_union_members_are_unioned() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let merger = ExtensionMerger::new(&directive_defs);

    let mut object = test_utils::build_type(
        &mut registry,
        "type Dog implements Pet & Named { name: String }",
    )?;
    let object_ext = test_utils::build_type_ext(
        &mut registry,
        "extend type Dog implements Named & Animal",
    )?;
    merger.merge(&mut object, object_ext)?;
    assert_eq!(object.interface_names(), vec!["Pet", "Named", "Animal"]);

    let mut union = test_utils::build_type(&mut registry, "union Search = User | Post")?;
    let union_ext = test_utils::build_type_ext(
        &mut registry,
        "extend union Search = Post | Comment",
    )?;
    merger.merge(&mut union, union_ext)?;
    assert_eq!(union.union_member_names(), vec!["User", "Post", "Comment"]);

    Ok(())
}

#[test]
fn enum_values_and_input_fields_are_appended() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let merger = ExtensionMerger::new(&directive_defs);

    let mut color = test_utils::build_type(&mut registry, "enum Color { RED GREEN }")?;
    let color_ext = test_utils::build_type_ext(&mut registry, "extend enum Color { BLUE }")?;
    merger.merge(&mut color, color_ext)?;
    assert_eq!(
        color.enum_values().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["RED", "GREEN", "BLUE"],
    );

    let mut filter = test_utils::build_type(&mut registry, "input Filter { limit: Int }")?;
    let filter_ext = test_utils::build_type_ext(
        &mut registry,
        "extend input Filter { offset: Int }",
    )?;
    merger.merge(&mut filter, filter_ext)?;
    assert_eq!(
        filter.input_fields().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["limit", "offset"],
    );

    Ok(())
}

#[test]
fn conflicting_extension_leaves_base_untouched() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let mut base = test_utils::build_type(&mut registry, "type Query { a: Int }")?;
    let original = base.clone();
    let extension = test_utils::build_type_ext(&mut registry, "
        extend type Query implements Node @tag(name: \"x\") {
            b: Int
            a: String
        }
    ")?;

    let errors = ExtensionMerger::new(&directive_defs)
        .merge(&mut base, extension)
        .expect_err("conflicting field should fail");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SchemaBuildError::ExtensionFieldConflict { field_name, type_name, .. }
            if field_name == "a" && type_name == "Query",
    ));
    assert_eq!(base, original);

    Ok(())
}

#[test]
fn conflicting_enum_values_are_reported() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let mut base = test_utils::build_type(&mut registry, "enum Color { RED }")?;
    let extension = test_utils::build_type_ext(&mut registry, "extend enum Color { RED }")?;

    let errors = ExtensionMerger::new(&directive_defs)
        .merge(&mut base, extension)
        .expect_err("conflicting enum value should fail");

    assert!(matches!(
        &errors[0],
        SchemaBuildError::ExtensionEnumValueConflict { value_name, .. } if value_name == "RED",
    ));

    Ok(())
}

#[test]
fn only_non_repeatable_directives_conflict() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let merger = ExtensionMerger::new(&directive_defs);

    let mut base = test_utils::build_type(&mut registry, r#"
        type User @key(fields: "id") @tag(name: "a") { id: ID }
    "#)?;
    let conflicting_ext = test_utils::build_type_ext(&mut registry, r#"
        extend type User @key(fields: "email") @tag(name: "b")
    "#)?;
    let errors = merger.merge(&mut base, conflicting_ext)
        .expect_err("repeated @key should fail");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SchemaBuildError::ExtensionDirectiveConflict { directive_name, .. }
            if directive_name == "key",
    ));

    let repeatable_ext = test_utils::build_type_ext(&mut registry, r#"
        extend type User @tag(name: "b") @undeclared
    "#)?;
    merger.merge(&mut base, repeatable_ext)?;
    assert_eq!(
        base.directives().iter().map(|annot| annot.directive_name()).collect::<Vec<_>>(),
        vec!["key", "tag", "tag", "undeclared"],
    );

    Ok(())
}

#[test]
fn extension_kind_must_match() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let mut base = test_utils::build_type(&mut registry, "type Node { id: ID }")?;
    let extension = test_utils::build_type_ext(
        &mut registry,
        "extend interface Node { name: String }",
    )?;

    let errors = ExtensionMerger::new(&directive_defs)
        .merge(&mut base, extension)
        .expect_err("interface extension of an object should fail");

    assert!(matches!(
        &errors[0],
        SchemaBuildError::InvalidExtensionType {
            extension_kind: TypeKind::Interface,
            type_kind: TypeKind::Object,
            ..
        },
    ));
    assert!(base.fields().get("name").is_none());

    Ok(())
}

#[test]
fn base_binding_is_kept() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = directive_defs(&mut registry);
    let merger = ExtensionMerger::new(&directive_defs);

    let mut bound = test_utils::build_type(
        &mut registry,
        r#"type User @bind(to: "app::User") { id: ID }"#,
    )?;
    let rebinding_ext = test_utils::build_type_ext(
        &mut registry,
        r#"extend type User @bind(to: "app::Other") { name: String }"#,
    )?;
    merger.merge(&mut bound, rebinding_ext)?;
    assert_eq!(bound.bind_to(), Some("app::User"));

    let mut unbound = test_utils::build_type(&mut registry, "type Post { id: ID }")?;
    let binding_ext = test_utils::build_type_ext(
        &mut registry,
        r#"extend type Post @bind(to: "app::Post")"#,
    )?;
    merger.merge(&mut unbound, binding_ext)?;
    assert_eq!(unbound.bind_to(), Some("app::Post"));

    Ok(())
}
