use crate::DirectiveAnnotation;
use crate::schema::DiagnosticLevel;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuildOptions;
use crate::types::DirectiveDefinition;
use crate::types::TypeDefinition;
use indexmap::IndexMap;

/// Checks every [`DirectiveAnnotation`] in a schema against the
/// [`DirectiveDefinition`] it names: the directive must be defined, it must
/// allow the location it was placed at, and (unless it is repeatable) it may
/// only annotate a given definition once.
pub(crate) struct DirectiveAnnotationValidator<'a> {
    directive_defs: &'a IndexMap<String, DirectiveDefinition>,
    errors: Vec<SchemaBuildError>,
    options: &'a SchemaBuildOptions,
}
impl<'a> DirectiveAnnotationValidator<'a> {
    pub fn new(
        directive_defs: &'a IndexMap<String, DirectiveDefinition>,
        options: &'a SchemaBuildOptions,
    ) -> Self {
        Self {
            directive_defs,
            errors: vec![],
            options,
        }
    }

    pub fn validate(
        mut self,
        types: &IndexMap<String, TypeDefinition>,
    ) -> Vec<SchemaBuildError> {
        for typedef in types.values() {
            self.validate_annotations(&typedef.directives);
            for field in typedef.fields.values() {
                self.validate_annotations(&field.directives);
                for argument in field.arguments.values() {
                    self.validate_annotations(&argument.directives);
                }
            }
            for input_field in typedef.input_fields.values() {
                self.validate_annotations(&input_field.directives);
            }
            for enum_value in typedef.enum_values.values() {
                self.validate_annotations(&enum_value.directives);
            }
        }

        let directive_defs = self.directive_defs;
        for directive_def in directive_defs.values() {
            for argument in directive_def.arguments.values() {
                self.validate_annotations(&argument.directives);
            }
        }

        self.errors
    }

    /// `annotations` are all of the annotations on a single definition.
    fn validate_annotations(&mut self, annotations: &[DirectiveAnnotation]) {
        let mut seen_non_repeatable: Vec<&str> = vec![];
        for annot in annotations {
            let directive_name = annot.directive_name();
            let Some(directive_def) = self.directive_defs.get(directive_name) else {
                self.errors.push(SchemaBuildError::UndefinedDirective {
                    directive_name: directive_name.to_string(),
                    location: annot.def_location().to_owned(),
                });
                continue;
            };

            if !directive_def.allows_location(annot.location()) {
                let err = SchemaBuildError::InvalidDirectiveLocation {
                    ancestry: annot.ancestry().to_vec(),
                    allowed: directive_def.locations.clone(),
                    directive_name: directive_name.to_string(),
                    location: annot.location(),
                    srcloc: annot.def_location().to_owned(),
                };
                match self.options.invalid_directive_location {
                    DiagnosticLevel::Error => self.errors.push(err),
                    DiagnosticLevel::Warn => log::warn!("{err}"),
                }
            }

            if directive_def.repeatable {
                continue;
            }
            if seen_non_repeatable.contains(&directive_name) {
                self.errors.push(SchemaBuildError::DuplicateNonRepeatableDirective {
                    directive_name: directive_name.to_string(),
                    location: annot.def_location().to_owned(),
                });
            } else {
                seen_non_repeatable.push(directive_name);
            }
        }
    }
}
