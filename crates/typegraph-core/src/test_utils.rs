use crate::ast;
use crate::schema::SchemaBuildError;
use crate::types::DirectiveDefinition;
use crate::types::TypeDefinition;
use crate::types::TypeDefinitionBuilder;
use crate::types::TypeReferenceRegistry;
use indexmap::IndexMap;
use std::path::Path;

pub(crate) const SCHEMA_PATH: &str = "str://0";

pub(crate) fn parse_schema(sdl: &str) -> ast::schema::Document {
    ast::schema::parse(sdl).expect("parse error")
}

pub(crate) fn parse_type_def(sdl: &str) -> ast::schema::TypeDefinition {
    parse_schema(sdl).definitions.into_iter().find_map(|def| match def {
        graphql_parser::schema::Definition::TypeDefinition(type_def) => Some(type_def),
        _ => None,
    }).expect("no type definition found")
}

pub(crate) fn parse_type_ext(sdl: &str) -> ast::schema::TypeExtension {
    parse_schema(sdl).definitions.into_iter().find_map(|def| match def {
        graphql_parser::schema::Definition::TypeExtension(type_ext) => Some(type_ext),
        _ => None,
    }).expect("no type extension found")
}

pub(crate) fn build_type(
    registry: &mut TypeReferenceRegistry,
    sdl: &str,
) -> Result<TypeDefinition, Vec<SchemaBuildError>> {
    TypeDefinitionBuilder::new(registry, Some(Path::new(SCHEMA_PATH)))
        .build(&parse_type_def(sdl))
}

pub(crate) fn build_type_ext(
    registry: &mut TypeReferenceRegistry,
    sdl: &str,
) -> Result<TypeDefinition, Vec<SchemaBuildError>> {
    TypeDefinitionBuilder::new(registry, Some(Path::new(SCHEMA_PATH)))
        .build_extension(&parse_type_ext(sdl))
}

/// Builds every `directive @...` definition in `sdl`, keyed by name.
pub(crate) fn build_directive_defs(
    registry: &mut TypeReferenceRegistry,
    sdl: &str,
) -> IndexMap<String, DirectiveDefinition> {
    let doc = parse_schema(sdl);
    let mut builder = TypeDefinitionBuilder::new(registry, Some(Path::new(SCHEMA_PATH)));
    doc.definitions.iter().filter_map(|def| match def {
        graphql_parser::schema::Definition::DirectiveDefinition(directive_def) => Some(
            builder.build_directive_definition(directive_def)
                .expect("directive build error")
        ),
        _ => None,
    }).map(|directive_def| (directive_def.name().to_string(), directive_def)).collect()
}
