use crate::ast;
use crate::definition_path::DefinitionPath;
use crate::DirectiveAnnotation;
use crate::DirectiveLocation;
use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::BIND_DIRECTIVE_NAME;
use crate::types::DEFAULT_DEPRECATION_REASON;
use crate::types::DEPRECATED_DIRECTIVE_NAME;
use crate::Value;
use indexmap::IndexMap;

#[derive(Debug)]
pub struct DirectiveAnnotationBuilder;
impl DirectiveAnnotationBuilder {
    /// Build the annotations for a definition at `location` whose ancestry is
    /// `path`.
    ///
    /// The `@bind` directive is metadata for the definition itself (see
    /// `DirectiveAnnotationBuilder::binding_from_ast()`) and is not
    /// included in the returned annotations.
    pub fn from_ast(
        annotated_item_srcloc: &loc::SourceLocation,
        location: DirectiveLocation,
        path: &DefinitionPath<'_>,
        directives: &[ast::query::Directive],
    ) -> Vec<DirectiveAnnotation> {
        directives.iter()
            .filter(|ast_annot| ast_annot.name != BIND_DIRECTIVE_NAME)
            .map(|ast_annot| {
                let mut arguments = IndexMap::new();
                for (arg_name, ast_arg) in ast_annot.arguments.iter() {
                    arguments.insert(arg_name.to_string(), Value::from_ast(ast_arg));
                }
                DirectiveAnnotation {
                    ancestry: path.to_vec(),
                    arguments,
                    def_location: annotated_item_srcloc.with_ast_position(
                        &ast_annot.position,
                    ),
                    location,
                    name: ast_annot.name.to_string(),
                }
            })
            .collect()
    }

    /// The external binding identifier given by `@bind(to: "...")`, if any.
    ///
    /// `@bind` may only be applied once per definition and must be given a
    /// string `to:` argument; anything else is reported in `errors`.
    pub(crate) fn binding_from_ast(
        annotated_item_srcloc: &loc::SourceLocation,
        directives: &[ast::query::Directive],
        errors: &mut Vec<SchemaBuildError>,
    ) -> Option<String> {
        let mut bind_to = None;
        let mut seen = false;
        for ast_annot in directives.iter().filter(|d| d.name == BIND_DIRECTIVE_NAME) {
            let location = annotated_item_srcloc.with_ast_position(&ast_annot.position);
            if seen {
                errors.push(SchemaBuildError::DuplicateNonRepeatableDirective {
                    directive_name: BIND_DIRECTIVE_NAME.to_string(),
                    location,
                });
                continue;
            }
            seen = true;

            match ast_annot.arguments.as_slice() {
                [(arg_name, graphql_parser::query::Value::String(to))] if arg_name == "to" =>
                    bind_to = Some(to.to_string()),
                _ => errors.push(SchemaBuildError::InvalidBindDirective { location }),
            }
        }
        bind_to
    }

    /// The deprecation reason given by a `@deprecated` annotation.
    ///
    /// A bare `@deprecated` uses the default reason. An explicitly empty
    /// reason leaves the definition undeprecated.
    pub fn deprecation_reason_from_ast(
        directives: &[ast::query::Directive],
    ) -> Option<String> {
        let ast_annot = directives.iter()
            .find(|ast_annot| ast_annot.name == DEPRECATED_DIRECTIVE_NAME)?;

        let reason = ast_annot.arguments.iter().find_map(|(arg_name, arg_value)| {
            (arg_name == "reason").then_some(arg_value)
        });

        match reason {
            None | Some(graphql_parser::query::Value::Null) =>
                Some(DEFAULT_DEPRECATION_REASON.to_string()),
            Some(graphql_parser::query::Value::String(reason)) if !reason.is_empty() =>
                Some(reason.to_string()),
            Some(_) => None,
        }
    }
}
