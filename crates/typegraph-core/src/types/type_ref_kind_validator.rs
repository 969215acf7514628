use crate::schema::SchemaBuildError;
use crate::types::DirectiveDefinition;
use crate::types::NamedTypeRef;
use crate::types::TypeBindings;
use crate::types::TypeDefinition;
use crate::types::TypeKind;
use indexmap::IndexMap;

/// Once every [`NamedTypeRef`] is bound, checks that each reference points
/// at a kind of type that is valid where the reference appears.
///
/// https://spec.graphql.org/October2021/#sec-Input-and-Output-Types
pub(crate) struct TypeRefKindValidator<'a> {
    bindings: &'a TypeBindings,
    errors: Vec<SchemaBuildError>,
    types: &'a IndexMap<String, TypeDefinition>,
}
impl<'a> TypeRefKindValidator<'a> {
    pub fn new(
        types: &'a IndexMap<String, TypeDefinition>,
        bindings: &'a TypeBindings,
    ) -> Self {
        Self {
            bindings,
            errors: vec![],
            types,
        }
    }

    pub fn validate(
        mut self,
        directive_defs: &IndexMap<String, DirectiveDefinition>,
    ) -> Vec<SchemaBuildError> {
        let types = self.types;
        for typedef in types.values() {
            for iface_ref in &typedef.interfaces {
                if self.kind_of(iface_ref) != Some(TypeKind::Interface) {
                    self.errors.push(SchemaBuildError::ImplementsNonInterfaceType {
                        location: iface_ref.ref_location().to_owned(),
                        non_interface_type_name: iface_ref.name().to_string(),
                        type_name: typedef.name.to_string(),
                    });
                }
            }

            for member_ref in &typedef.union_members {
                if self.kind_of(member_ref) != Some(TypeKind::Object) {
                    self.errors.push(SchemaBuildError::InvalidUnionMemberType {
                        location: member_ref.ref_location().to_owned(),
                        member_name: member_ref.name().to_string(),
                        type_name: typedef.name.to_string(),
                    });
                }
            }

            for (field_name, field) in &typedef.fields {
                let field_path = format!("{}.{field_name}", typedef.name);
                let inner_ref = field.type_ref.innermost_named_ref();
                if !self.kind_of(inner_ref).is_some_and(|kind| kind.is_output_type()) {
                    self.errors.push(SchemaBuildError::InvalidOutputFieldType {
                        location: inner_ref.ref_location().to_owned(),
                        path: field_path.to_string(),
                        type_name: inner_ref.name().to_string(),
                    });
                }
                for (arg_name, argument) in &field.arguments {
                    self.check_input_ref(
                        format!("{field_path}({arg_name}:)"),
                        argument.type_ref.innermost_named_ref(),
                    );
                }
            }

            for (input_field_name, input_field) in &typedef.input_fields {
                self.check_input_ref(
                    format!("{}.{input_field_name}", typedef.name),
                    input_field.type_ref.innermost_named_ref(),
                );
            }
        }

        for directive_def in directive_defs.values() {
            for (arg_name, argument) in &directive_def.arguments {
                self.check_input_ref(
                    format!("@{}({arg_name}:)", directive_def.name),
                    argument.type_ref.innermost_named_ref(),
                );
            }
        }

        self.errors
    }

    fn check_input_ref(&mut self, path: String, inner_ref: &NamedTypeRef) {
        if !self.kind_of(inner_ref).is_some_and(|kind| kind.is_input_type()) {
            self.errors.push(SchemaBuildError::InvalidInputValueType {
                location: inner_ref.ref_location().to_owned(),
                path,
                type_name: inner_ref.name().to_string(),
            });
        }
    }

    fn kind_of(&self, named_ref: &NamedTypeRef) -> Option<TypeKind> {
        self.bindings
            .get(named_ref.symbol())
            .and_then(|type_id| self.types.get_index(type_id.index()))
            .map(|(_, typedef)| typedef.kind)
    }
}
