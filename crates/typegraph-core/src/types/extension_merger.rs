use crate::schema::SchemaBuildError;
use crate::types::DirectiveDefinition;
use crate::types::TypeDefinition;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

/// Merges type extensions (`extend type Foo ...`) into the base
/// [`TypeDefinition`] they extend.
///
/// A merge either applies completely or not at all: every conflict between
/// the base and the extension is collected before anything is modified.
pub struct ExtensionMerger<'a> {
    directive_defs: &'a IndexMap<String, DirectiveDefinition>,
}
impl<'a> ExtensionMerger<'a> {
    /// `directive_defs` decides which directives may be repeated across a
    /// base type and its extensions.
    pub fn new(directive_defs: &'a IndexMap<String, DirectiveDefinition>) -> Self {
        Self { directive_defs }
    }

    /// Merge `extension` into `base`.
    ///
    /// Fields, input fields and enum values are appended after the base's
    /// own, in the extension's declaration order. Interfaces and union
    /// members are unioned (first occurrence wins). Directive annotations
    /// are appended unless a non-repeatable directive would then appear
    /// twice. The base's description and bind target are never replaced.
    pub fn merge(
        &self,
        base: &mut TypeDefinition,
        extension: TypeDefinition,
    ) -> Result<()> {
        if base.name != extension.name {
            return Err(vec![SchemaBuildError::ExtensionNameMismatch {
                base_name: base.name.to_string(),
                extension_location: extension.def_location,
                extension_name: extension.name,
            }]);
        }

        if base.kind != extension.kind {
            return Err(vec![SchemaBuildError::InvalidExtensionType {
                extension_kind: extension.kind,
                extension_location: extension.def_location,
                type_kind: base.kind,
                type_name: base.name.to_string(),
            }]);
        }

        let mut errors = vec![];

        for ext_annot in &extension.directives {
            if self.is_repeatable(ext_annot.directive_name()) {
                continue;
            }
            let base_annot = base.directives.iter().find(|base_annot| {
                base_annot.directive_name() == ext_annot.directive_name()
            });
            if let Some(base_annot) = base_annot {
                errors.push(SchemaBuildError::ExtensionDirectiveConflict {
                    base_location: base_annot.def_location().to_owned(),
                    directive_name: ext_annot.directive_name().to_string(),
                    extension_location: ext_annot.def_location().to_owned(),
                    type_name: base.name.to_string(),
                });
            }
        }

        for (field_name, ext_field) in &extension.fields {
            if let Some(base_field) = base.fields.get(field_name) {
                errors.push(SchemaBuildError::ExtensionFieldConflict {
                    base_def: base_field.def_location.clone(),
                    extension_def: ext_field.def_location.clone(),
                    field_name: field_name.to_string(),
                    type_name: base.name.to_string(),
                });
            }
        }

        for (field_name, ext_field) in &extension.input_fields {
            if let Some(base_field) = base.input_fields.get(field_name) {
                errors.push(SchemaBuildError::ExtensionFieldConflict {
                    base_def: base_field.def_location.clone(),
                    extension_def: ext_field.def_location.clone(),
                    field_name: field_name.to_string(),
                    type_name: base.name.to_string(),
                });
            }
        }

        for (value_name, ext_value) in &extension.enum_values {
            if let Some(base_value) = base.enum_values.get(value_name) {
                errors.push(SchemaBuildError::ExtensionEnumValueConflict {
                    base_def: base_value.def_location.clone(),
                    extension_def: ext_value.def_location.clone(),
                    type_name: base.name.to_string(),
                    value_name: value_name.to_string(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        log::debug!(
            "Merging extension of {} `{}` from {}.",
            base.kind,
            base.name,
            extension.def_location,
        );

        base.directives.extend(extension.directives);
        base.fields.extend(extension.fields);
        base.input_fields.extend(extension.input_fields);
        base.enum_values.extend(extension.enum_values);
        for iface_ref in extension.interfaces {
            if !base.interfaces.iter().any(|existing| existing.name() == iface_ref.name()) {
                base.interfaces.push(iface_ref);
            }
        }
        for member_ref in extension.union_members {
            if !base.union_members.iter().any(|existing| existing.name() == member_ref.name()) {
                base.union_members.push(member_ref);
            }
        }
        if base.bind_to.is_none() {
            base.bind_to = extension.bind_to;
        }

        Ok(())
    }

    /// Directives with no definition are treated as repeatable here; they
    /// are reported as undefined once the whole schema is validated.
    fn is_repeatable(&self, directive_name: &str) -> bool {
        self.directive_defs
            .get(directive_name)
            .is_none_or(|directive_def| directive_def.repeatable)
    }
}
