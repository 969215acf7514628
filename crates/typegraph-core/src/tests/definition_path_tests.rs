use crate::DefinitionPath;
use crate::DisplayAncestry;
use crate::PathSegment;
use crate::types::TypeKind;

fn query_type_segment() -> PathSegment {
    PathSegment::Type {
        kind: TypeKind::Object,
        name: "Query".to_string(),
    }
}

#[test]
fn root_path_is_empty() {
    let root = DefinitionPath::root();

    assert!(root.is_root());
    assert_eq!(root.depth(), 0);
    assert!(root.segments().is_empty());
    assert_eq!(root.enclosing_type(), None);
    assert_eq!(root.to_string(), "");
}

#[test]
fn child_paths_nest_without_modifying_parents() {
    let root = DefinitionPath::root();
    let type_path = root.child(query_type_segment());
    let field_path = type_path.child(PathSegment::Field("user".to_string()));
    let arg_path = field_path.child(PathSegment::Argument("id".to_string()));

    assert_eq!(arg_path.depth(), 3);
    assert_eq!(arg_path.to_string(), "Query.user(id:)");
    assert_eq!(arg_path.enclosing_type(), Some((TypeKind::Object, "Query")));
    assert_eq!(arg_path.enclosing_field(), Some("user"));
    assert_eq!(arg_path.to_vec(), vec![
        query_type_segment(),
        PathSegment::Field("user".to_string()),
        PathSegment::Argument("id".to_string()),
    ]);

    assert_eq!(type_path.depth(), 1);
    assert_eq!(type_path.enclosing_field(), None);
    assert!(root.is_root());
}

#[test]
fn sibling_paths_share_only_their_parent() {
    let root = DefinitionPath::root();
    let type_path = root.child(query_type_segment());
    let field_a = type_path.child(PathSegment::Field("a".to_string()));
    let field_b = type_path.child(PathSegment::Field("b".to_string()));

    assert_eq!(field_a.to_string(), "Query.a");
    assert_eq!(field_b.to_string(), "Query.b");
}

#[test]
fn directive_argument_paths_display_with_at_sign() {
    let root = DefinitionPath::root();
    let directive_path = root.child(PathSegment::Directive("tag".to_string()));
    let arg_path = directive_path.child(PathSegment::Argument("name".to_string()));

    assert_eq!(arg_path.to_string(), "@tag(name:)");
    assert_eq!(arg_path.enclosing_type(), None);
}

#[test]
fn empty_ancestry_displays_as_schema() {
    assert_eq!(DisplayAncestry(&[]).to_string(), "<schema>");
    assert_eq!(
        DisplayAncestry(&[
            query_type_segment(),
            PathSegment::Field("user".to_string()),
        ]).to_string(),
        "Query.user",
    );
}
