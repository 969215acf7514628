use crate::DirectiveLocation;
use crate::PathSegment;
use crate::schema::SchemaBuildError;
use crate::test_utils;
use crate::types::TypeDefinitionBuilder;
use crate::types::TypeKind;
use crate::types::TypeReferenceRegistry;
use crate::Value;
use std::path::Path;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

fn type_segment(kind: TypeKind, name: &str) -> PathSegment {
    PathSegment::Type {
        kind,
        name: name.to_string(),
    }
}

#[test]
fn fields_keep_declaration_order() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, "
        type Query {
            b: Int
            a: String
            c: [Int!]!
        }
    ")?;

    assert_eq!(typedef.kind(), TypeKind::Object);
    assert_eq!(typedef.name(), "Query");
    assert_eq!(
        typedef.fields().keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["b", "a", "c"],
    );
    assert_eq!(typedef.fields()["c"].type_ref().to_string(), "[Int!]!");
    assert_eq!(registry.len(), 3);

    Ok(())
}

#[test]
fn directive_annotations_see_their_ancestry() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, r#"
        type Query @tag(name: "type") {
            user(id: ID! @tag(name: "arg")): String @tag(name: "field")
        }
    "#)?;

    let type_annot = &typedef.directives()[0];
    assert_eq!(type_annot.directive_name(), "tag");
    assert_eq!(type_annot.location(), DirectiveLocation::Object);
    assert!(type_annot.ancestry().is_empty());
    assert_eq!(
        type_annot.arguments().get("name"),
        Some(&Value::String("type".to_string())),
    );

    let field = &typedef.fields()["user"];
    let field_annot = &field.directives()[0];
    assert_eq!(field_annot.location(), DirectiveLocation::FieldDefinition);
    assert_eq!(field_annot.ancestry(), &[type_segment(TypeKind::Object, "Query")]);

    let arg_annot = &field.arguments()["id"].directives()[0];
    assert_eq!(arg_annot.location(), DirectiveLocation::ArgumentDefinition);
    assert_eq!(arg_annot.ancestry(), &[
        type_segment(TypeKind::Object, "Query"),
        PathSegment::Field("user".to_string()),
    ]);

    Ok(())
}

#[test]
fn ancestry_does_not_leak_between_definitions() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let schema_path = Path::new(test_utils::SCHEMA_PATH);
    let doc = test_utils::parse_schema("
        type First { a(x: Int @one): Int @one }
        interface Second @two { b: Int @two }
    ");

    let mut builder = TypeDefinitionBuilder::new(&mut registry, Some(schema_path));
    let mut typedefs = vec![];
    for def in &doc.definitions {
        if let graphql_parser::schema::Definition::TypeDefinition(type_def) = def {
            typedefs.push(builder.build(type_def)?);
        }
    }

    let second = &typedefs[1];
    assert!(second.directives()[0].ancestry().is_empty());
    assert_eq!(second.directives()[0].location(), DirectiveLocation::Interface);
    assert_eq!(
        second.fields()["b"].directives()[0].ancestry(),
        &[type_segment(TypeKind::Interface, "Second")],
    );

    Ok(())
}

#[test]
fn deprecation_reasons() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, r#"
        enum Color {
            RED @deprecated
            GREEN @deprecated(reason: "use LIME")
            BLUE @deprecated(reason: "")
            LIME
        }
    "#)?;

    let values = typedef.enum_values();
    assert_eq!(
        values.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["RED", "GREEN", "BLUE", "LIME"],
    );
    assert_eq!(values["RED"].deprecation_reason(), Some("No longer supported"));
    assert_eq!(values["GREEN"].deprecation_reason(), Some("use LIME"));
    assert_eq!(values["BLUE"].deprecation_reason(), None);
    assert!(!values["LIME"].is_deprecated());

    // The annotation itself is still recorded.
    assert_eq!(values["RED"].directives()[0].directive_name(), "deprecated");
    assert_eq!(values["RED"].directives()[0].location(), DirectiveLocation::EnumValue);

    Ok(())
}

#[test]
fn bind_directive_sets_binding_and_is_not_recorded() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, r#"
        type User @bind(to: "app::User") {
            id: ID! @bind(to: "user_id")
            name(format: String @bind(to: "fmt")): String
        }
    "#)?;

    assert_eq!(typedef.bind_to(), Some("app::User"));
    assert!(typedef.directives().is_empty());

    let id_field = &typedef.fields()["id"];
    assert_eq!(id_field.bind_to(), Some("user_id"));
    assert!(id_field.directives().is_empty());

    let name_field = &typedef.fields()["name"];
    assert_eq!(name_field.bind_to(), None);
    assert_eq!(name_field.arguments()["format"].bind_to(), Some("fmt"));

    Ok(())
}

#[test]
fn misused_bind_directives_are_reported() {
    let mut registry = TypeReferenceRegistry::new();

    let errors = test_utils::build_type(&mut registry, r#"
        type User @bind(to: "app::User") @bind(to: "app::Other") {
            id: ID
        }
    "#).expect_err("repeated @bind should fail");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateNonRepeatableDirective { directive_name, .. }
            if directive_name == "bind",
    ));

    let errors = test_utils::build_type(&mut registry, "
        type Post {
            id: ID @bind(to: 5)
            title(format: String @bind): String
        }
    ").expect_err("ill-typed @bind should fail");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|err| matches!(
        err,
        SchemaBuildError::InvalidBindDirective { .. },
    )));
}

#[test]
fn descriptions_and_types_are_kept() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, r#"
        "T desc"
        type T {
            "f desc"
            f(
                "a desc"
                a: [Int!]! = [1, 2]
            ): String
            plain: Int
        }
    "#)?;

    assert_eq!(typedef.name(), "T");
    assert_eq!(typedef.description(), Some("T desc"));

    let f = &typedef.fields()["f"];
    assert_eq!(f.description(), Some("f desc"));
    assert_eq!(f.type_ref().to_string(), "String");

    let a = &f.arguments()["a"];
    assert_eq!(a.name(), "a");
    assert_eq!(a.description(), Some("a desc"));
    assert_eq!(a.type_ref().to_string(), "[Int!]!");
    assert_eq!(a.default_value(), Some(&Value::List(vec![Value::Int(1), Value::Int(2)])));

    assert_eq!(typedef.fields()["plain"].description(), None);

    Ok(())
}

#[test]
fn input_fields_and_defaults() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let typedef = test_utils::build_type(&mut registry, "
        input Filter {
            limit: Int = 10 @deprecated
            tags: [String!]
        }
    ")?;

    assert_eq!(typedef.kind(), TypeKind::InputObject);
    assert!(typedef.fields().is_empty());

    let limit = &typedef.input_fields()["limit"];
    assert_eq!(limit.default_value(), Some(&Value::Int(10)));
    assert_eq!(limit.deprecation_reason(), Some("No longer supported"));
    assert_eq!(limit.directives()[0].location(), DirectiveLocation::InputFieldDefinition);
    assert_eq!(
        limit.directives()[0].ancestry(),
        &[type_segment(TypeKind::InputObject, "Filter")],
    );

    let tags = &typedef.input_fields()["tags"];
    assert_eq!(tags.default_value(), None);
    assert_eq!(tags.type_ref().to_string(), "[String!]");

    Ok(())
}

#[test]
fn interfaces_and_union_members_keep_order() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let object = test_utils::build_type(
        &mut registry,
        "type Dog implements Pet & Named { name: String }",
    )?;
    assert_eq!(object.interface_names(), vec!["Pet", "Named"]);

    let union = test_utils::build_type(&mut registry, "union Animal = Dog | Cat | Bird")?;
    assert_eq!(union.kind(), TypeKind::Union);
    assert_eq!(union.union_member_names(), vec!["Dog", "Cat", "Bird"]);

    Ok(())
}

#[test]
fn duplicate_field_names_are_reported() {
    let mut registry = TypeReferenceRegistry::new();
    let errors = test_utils::build_type(&mut registry, "
        type Query {
            a: Int
            a: String
        }
    ").expect_err("duplicate field should fail");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateFieldNameDefinition { field_name, type_name, .. }
            if field_name == "a" && type_name == "Query",
    ));
}

#[test]
fn duplicate_member_names_are_reported() {
    let mut registry = TypeReferenceRegistry::new();

    let errors = test_utils::build_type(
        &mut registry,
        "type Dog implements Pet & Pet { name: String }",
    ).expect_err("duplicate interface should fail");
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateInterfaceImplementsDeclaration { duplicated_interface_name, .. }
            if duplicated_interface_name == "Pet",
    ));

    let errors = test_utils::build_type(&mut registry, "union U = A | B | A")
        .expect_err("duplicate union member should fail");
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateUnionMember { member_name, .. } if member_name == "A",
    ));

    let errors = test_utils::build_type(&mut registry, "type T { f(x: Int, x: Int): Int }")
        .expect_err("duplicate argument should fail");
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateArgumentName { argument_name, owner, .. }
            if argument_name == "x" && owner == "T.f",
    ));

    let errors = test_utils::build_type(&mut registry, "enum E { A B A }")
        .expect_err("duplicate enum value should fail");
    assert!(matches!(
        &errors[0],
        SchemaBuildError::DuplicateEnumValueDefinition { value_name, .. } if value_name == "A",
    ));
}

#[test]
fn every_problem_in_a_definition_is_collected() {
    let mut registry = TypeReferenceRegistry::new();
    let errors = test_utils::build_type(&mut registry, "
        type __Reserved {
            __field: Int
            ok: Int
            ok: Int
        }
    ").expect_err("invalid names should fail");

    assert_eq!(errors.len(), 3);
    let dunder_names = errors.iter().filter_map(|err| match err {
        SchemaBuildError::InvalidDunderPrefixedName { name, .. } => Some(name.as_str()),
        _ => None,
    }).collect::<Vec<_>>();
    assert_eq!(dunder_names, vec!["__Reserved", "__field"]);
}

#[test]
fn extensions_build_like_definitions() -> Result<()> {
    let mut registry = TypeReferenceRegistry::new();
    let extension = test_utils::build_type_ext(&mut registry, "
        extend type Query @tag {
            extra(limit: Int): [String]
        }
    ")?;

    assert_eq!(extension.kind(), TypeKind::Object);
    assert_eq!(extension.name(), "Query");
    assert_eq!(extension.description(), None);
    assert!(extension.directives()[0].ancestry().is_empty());
    assert_eq!(
        extension.fields()["extra"].arguments()["limit"].type_ref().to_string(),
        "Int",
    );

    Ok(())
}

#[test]
fn directive_definitions() {
    let mut registry = TypeReferenceRegistry::new();
    let directive_defs = test_utils::build_directive_defs(&mut registry, r#"
        "Tags a definition."
        directive @tag(name: String! = "none") repeatable on OBJECT | FIELD_DEFINITION
    "#);

    let tag = &directive_defs["tag"];
    assert!(tag.is_repeatable());
    assert!(!tag.is_builtin());
    assert_eq!(tag.description(), Some("Tags a definition."));
    assert_eq!(tag.locations(), &[DirectiveLocation::Object, DirectiveLocation::FieldDefinition]);
    assert!(tag.allows_location(DirectiveLocation::FieldDefinition));
    assert!(!tag.allows_location(DirectiveLocation::Scalar));
    assert_eq!(tag.arguments()["name"].type_ref().to_string(), "String!");
    assert_eq!(
        tag.arguments()["name"].default_value(),
        Some(&Value::String("none".to_string())),
    );
}
