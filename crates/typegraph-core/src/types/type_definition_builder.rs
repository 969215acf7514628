use crate::ast;
use crate::definition_path::DefinitionPath;
use crate::definition_path::PathSegment;
use crate::DirectiveAnnotationBuilder;
use crate::DirectiveLocation;
use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::ArgumentDefinition;
use crate::types::DirectiveDefinition;
use crate::types::EnumValueDefinition;
use crate::types::FieldDefinition;
use crate::types::TypeDefinition;
use crate::types::TypeKind;
use crate::types::TypeRef;
use crate::types::TypeReferenceRegistry;
use crate::Value;
use indexmap::IndexMap;
use std::path::Path;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

/// The parts of a type definition or type extension node that building
/// needs, independent of the node's kind.
struct TypeNode<'n> {
    description: Option<&'n str>,
    directives: &'n [ast::query::Directive],
    enum_values: &'n [ast::schema::EnumValue],
    fields: &'n [ast::schema::Field],
    input_fields: &'n [ast::schema::InputValue],
    interfaces: &'n [String],
    kind: TypeKind,
    name: &'n str,
    position: &'n ast::Pos,
    union_members: &'n [String],
}
impl<'n> TypeNode<'n> {
    fn new(
        kind: TypeKind,
        name: &'n str,
        position: &'n ast::Pos,
        directives: &'n [ast::query::Directive],
    ) -> Self {
        Self {
            description: None,
            directives,
            enum_values: &[],
            fields: &[],
            input_fields: &[],
            interfaces: &[],
            kind,
            name,
            position,
            union_members: &[],
        }
    }

    fn from_type_def(def: &'n ast::schema::TypeDefinition) -> Self {
        use graphql_parser::schema::TypeDefinition as Def;
        match def {
            Def::Enum(def) => Self {
                description: def.description.as_deref(),
                enum_values: &def.values,
                ..Self::new(TypeKind::Enum, &def.name, &def.position, &def.directives)
            },
            Def::InputObject(def) => Self {
                description: def.description.as_deref(),
                input_fields: &def.fields,
                ..Self::new(TypeKind::InputObject, &def.name, &def.position, &def.directives)
            },
            Def::Interface(def) => Self {
                description: def.description.as_deref(),
                fields: &def.fields,
                interfaces: &def.implements_interfaces,
                ..Self::new(TypeKind::Interface, &def.name, &def.position, &def.directives)
            },
            Def::Object(def) => Self {
                description: def.description.as_deref(),
                fields: &def.fields,
                interfaces: &def.implements_interfaces,
                ..Self::new(TypeKind::Object, &def.name, &def.position, &def.directives)
            },
            Def::Scalar(def) => Self {
                description: def.description.as_deref(),
                ..Self::new(TypeKind::Scalar, &def.name, &def.position, &def.directives)
            },
            Def::Union(def) => Self {
                description: def.description.as_deref(),
                union_members: &def.types,
                ..Self::new(TypeKind::Union, &def.name, &def.position, &def.directives)
            },
        }
    }

    fn from_type_ext(ext: &'n ast::schema::TypeExtension) -> Self {
        use graphql_parser::schema::TypeExtension as Ext;
        match ext {
            Ext::Enum(ext) => Self {
                enum_values: &ext.values,
                ..Self::new(TypeKind::Enum, &ext.name, &ext.position, &ext.directives)
            },
            Ext::InputObject(ext) => Self {
                input_fields: &ext.fields,
                ..Self::new(TypeKind::InputObject, &ext.name, &ext.position, &ext.directives)
            },
            Ext::Interface(ext) => Self {
                fields: &ext.fields,
                interfaces: &ext.implements_interfaces,
                ..Self::new(TypeKind::Interface, &ext.name, &ext.position, &ext.directives)
            },
            Ext::Object(ext) => Self {
                fields: &ext.fields,
                interfaces: &ext.implements_interfaces,
                ..Self::new(TypeKind::Object, &ext.name, &ext.position, &ext.directives)
            },
            Ext::Scalar(ext) =>
                Self::new(TypeKind::Scalar, &ext.name, &ext.position, &ext.directives),
            Ext::Union(ext) => Self {
                union_members: &ext.types,
                ..Self::new(TypeKind::Union, &ext.name, &ext.position, &ext.directives)
            },
        }
    }
}

/// Builds [`TypeDefinition`]s (and [`DirectiveDefinition`]s) from SDL syntax
/// nodes.
///
/// Every named type mentioned while building (field types, argument types,
/// interfaces, union members) is declared with the borrowed
/// [`TypeReferenceRegistry`] rather than looked up, so definitions can be
/// built in any order.
///
/// Each directive annotation is built with the [`DefinitionPath`] of the
/// definition it annotates: type annotations see an empty path, field
/// annotations see `[Type]` and argument annotations see `[Type, Field]`.
pub struct TypeDefinitionBuilder<'a> {
    file_path: Option<&'a Path>,
    registry: &'a mut TypeReferenceRegistry,
}
impl<'a> TypeDefinitionBuilder<'a> {
    pub fn new(
        registry: &'a mut TypeReferenceRegistry,
        file_path: Option<&'a Path>,
    ) -> Self {
        Self {
            file_path,
            registry,
        }
    }

    /// Build the [`TypeDefinition`] for a base type definition node.
    pub fn build(
        &mut self,
        def: &ast::schema::TypeDefinition,
    ) -> Result<TypeDefinition> {
        self.build_node(TypeNode::from_type_def(def))
    }

    /// Build a [`TypeDefinition`] for a type extension node. The result has
    /// the same shape as a base definition and is merged into the base type
    /// later by an [`ExtensionMerger`](crate::types::ExtensionMerger).
    pub fn build_extension(
        &mut self,
        ext: &ast::schema::TypeExtension,
    ) -> Result<TypeDefinition> {
        self.build_node(TypeNode::from_type_ext(ext))
    }

    pub fn build_directive_definition(
        &mut self,
        def: &ast::schema::DirectiveDefinition,
    ) -> Result<DirectiveDefinition> {
        let mut errors = vec![];
        let directivedef_srcloc =
            loc::SourceLocation::from_schema_ast_position(self.file_path, &def.position);
        check_name(&mut errors, &directivedef_srcloc, def.name.as_str());

        let root_path = DefinitionPath::root();
        let directive_path = root_path.child(PathSegment::Directive(def.name.to_string()));
        let arguments = self.build_arguments(
            &directive_path,
            &directivedef_srcloc,
            &def.arguments,
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DirectiveDefinition {
            arguments,
            def_location: directivedef_srcloc,
            description: def.description.to_owned(),
            locations: def.locations.iter().map(DirectiveLocation::from_ast).collect(),
            name: def.name.to_string(),
            repeatable: def.repeatable,
        })
    }

    fn build_node(&mut self, node: TypeNode<'_>) -> Result<TypeDefinition> {
        let mut errors = vec![];
        let typedef_srcloc =
            loc::SourceLocation::from_schema_ast_position(self.file_path, node.position);
        check_name(&mut errors, &typedef_srcloc, node.name);

        let root_path = DefinitionPath::root();
        let type_path = root_path.child(PathSegment::Type {
            kind: node.kind,
            name: node.name.to_string(),
        });

        let mut typedef = TypeDefinition::new(node.kind, node.name, typedef_srcloc.clone());
        typedef.description = node.description.map(str::to_string);
        typedef.bind_to = DirectiveAnnotationBuilder::binding_from_ast(
            &typedef_srcloc,
            node.directives,
            &mut errors,
        );
        typedef.directives = DirectiveAnnotationBuilder::from_ast(
            &typedef_srcloc,
            node.kind.directive_location(),
            &root_path,
            node.directives,
        );

        for iface_name in node.interfaces {
            // https://spec.graphql.org/October2021/#sel-HAHZhCFFABABsCqgY
            if typedef.interfaces.iter().any(|iface_ref| iface_ref.name() == iface_name) {
                errors.push(SchemaBuildError::DuplicateInterfaceImplementsDeclaration {
                    def_location: typedef_srcloc.clone(),
                    duplicated_interface_name: iface_name.to_string(),
                    type_name: node.name.to_string(),
                });
                continue;
            }
            typedef.interfaces.push(self.registry.declare(iface_name, typedef_srcloc.clone()));
        }

        for member_name in node.union_members {
            if typedef.union_members.iter().any(|member_ref| member_ref.name() == member_name) {
                errors.push(SchemaBuildError::DuplicateUnionMember {
                    def_location: typedef_srcloc.clone(),
                    member_name: member_name.to_string(),
                    type_name: node.name.to_string(),
                });
                continue;
            }
            typedef.union_members.push(self.registry.declare(member_name, typedef_srcloc.clone()));
        }

        for field in node.fields {
            let fielddef_srcloc = typedef_srcloc.with_ast_position(&field.position);
            if let Some(existing_field) = typedef.fields.get(field.name.as_str()) {
                errors.push(SchemaBuildError::DuplicateFieldNameDefinition {
                    field_def1: existing_field.def_location.clone(),
                    field_def2: fielddef_srcloc,
                    field_name: field.name.to_string(),
                    type_name: node.name.to_string(),
                });
                continue;
            }
            let field_def = self.build_field(&type_path, fielddef_srcloc, field, &mut errors);
            typedef.fields.insert(field.name.to_string(), field_def);
        }

        for input_field in node.input_fields {
            let input_field_srcloc = typedef_srcloc.with_ast_position(&input_field.position);
            if let Some(existing_field) = typedef.input_fields.get(input_field.name.as_str()) {
                errors.push(SchemaBuildError::DuplicateFieldNameDefinition {
                    field_def1: existing_field.def_location.clone(),
                    field_def2: input_field_srcloc,
                    field_name: input_field.name.to_string(),
                    type_name: node.name.to_string(),
                });
                continue;
            }
            let input_field_path =
                type_path.child(PathSegment::InputField(input_field.name.to_string()));
            let input_field_def = self.build_input_value(
                &type_path,
                &input_field_path,
                input_field_srcloc,
                DirectiveLocation::InputFieldDefinition,
                input_field,
                &mut errors,
            );
            typedef.input_fields.insert(input_field.name.to_string(), input_field_def);
        }

        for enum_value in node.enum_values {
            let value_srcloc = typedef_srcloc.with_ast_position(&enum_value.position);
            if let Some(existing_value) = typedef.enum_values.get(enum_value.name.as_str()) {
                errors.push(SchemaBuildError::DuplicateEnumValueDefinition {
                    type_name: node.name.to_string(),
                    value_def1: existing_value.def_location.clone(),
                    value_def2: value_srcloc,
                    value_name: enum_value.name.to_string(),
                });
                continue;
            }
            check_name(&mut errors, &value_srcloc, enum_value.name.as_str());
            typedef.enum_values.insert(enum_value.name.to_string(), EnumValueDefinition {
                deprecation_reason: DirectiveAnnotationBuilder::deprecation_reason_from_ast(
                    &enum_value.directives,
                ),
                description: enum_value.description.to_owned(),
                directives: DirectiveAnnotationBuilder::from_ast(
                    &value_srcloc,
                    DirectiveLocation::EnumValue,
                    &type_path,
                    &enum_value.directives,
                ),
                name: enum_value.name.to_string(),
                def_location: value_srcloc,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        log::trace!(
            "Built {} `{}` with {} fields, {} input fields and {} enum values.",
            typedef.kind,
            typedef.name,
            typedef.fields.len(),
            typedef.input_fields.len(),
            typedef.enum_values.len(),
        );
        Ok(typedef)
    }

    fn build_field(
        &mut self,
        type_path: &DefinitionPath<'_>,
        fielddef_srcloc: loc::SourceLocation,
        field: &ast::schema::Field,
        errors: &mut Vec<SchemaBuildError>,
    ) -> FieldDefinition {
        check_name(errors, &fielddef_srcloc, field.name.as_str());

        let directives = DirectiveAnnotationBuilder::from_ast(
            &fielddef_srcloc,
            DirectiveLocation::FieldDefinition,
            type_path,
            &field.directives,
        );

        let field_path = type_path.child(PathSegment::Field(field.name.to_string()));
        let arguments = self.build_arguments(
            &field_path,
            &fielddef_srcloc,
            &field.arguments,
            errors,
        );

        FieldDefinition {
            arguments,
            bind_to: DirectiveAnnotationBuilder::binding_from_ast(
                &fielddef_srcloc,
                &field.directives,
                errors,
            ),
            deprecation_reason: DirectiveAnnotationBuilder::deprecation_reason_from_ast(
                &field.directives,
            ),
            description: field.description.to_owned(),
            directives,
            name: field.name.to_string(),
            // graphql_parser doesn't give us a location for the field's type
            // itself.
            type_ref: TypeRef::from_ast_type(self.registry, &fielddef_srcloc, &field.field_type),
            def_location: fielddef_srcloc,
        }
    }

    fn build_arguments(
        &mut self,
        parent_path: &DefinitionPath<'_>,
        parent_srcloc: &loc::SourceLocation,
        ast_arguments: &[ast::schema::InputValue],
        errors: &mut Vec<SchemaBuildError>,
    ) -> IndexMap<String, ArgumentDefinition> {
        let mut arguments: IndexMap<String, ArgumentDefinition> = IndexMap::new();
        for argument in ast_arguments {
            let arg_srcloc = parent_srcloc.with_ast_position(&argument.position);
            if let Some(existing_arg) = arguments.get(argument.name.as_str()) {
                errors.push(SchemaBuildError::DuplicateArgumentName {
                    argument_name: argument.name.to_string(),
                    def1: existing_arg.def_location.clone(),
                    def2: arg_srcloc,
                    owner: parent_path.to_string(),
                });
                continue;
            }
            let arg_path = parent_path.child(PathSegment::Argument(argument.name.to_string()));
            let arg_def = self.build_input_value(
                parent_path,
                &arg_path,
                arg_srcloc,
                DirectiveLocation::ArgumentDefinition,
                argument,
                errors,
            );
            arguments.insert(argument.name.to_string(), arg_def);
        }
        arguments
    }

    /// `parent_path` is the ancestry seen by the input value's own
    /// directives; `value_path` includes the input value itself and is only
    /// used for diagnostics.
    fn build_input_value(
        &mut self,
        parent_path: &DefinitionPath<'_>,
        value_path: &DefinitionPath<'_>,
        value_srcloc: loc::SourceLocation,
        location: DirectiveLocation,
        input_value: &ast::schema::InputValue,
        errors: &mut Vec<SchemaBuildError>,
    ) -> ArgumentDefinition {
        check_name(errors, &value_srcloc, input_value.name.as_str());
        log::trace!("Building input value `{value_path}`.");

        ArgumentDefinition {
            bind_to: DirectiveAnnotationBuilder::binding_from_ast(
                &value_srcloc,
                &input_value.directives,
                errors,
            ),
            default_value: input_value.default_value.as_ref().map(Value::from_ast),
            deprecation_reason: DirectiveAnnotationBuilder::deprecation_reason_from_ast(
                &input_value.directives,
            ),
            description: input_value.description.to_owned(),
            directives: DirectiveAnnotationBuilder::from_ast(
                &value_srcloc,
                location,
                parent_path,
                &input_value.directives,
            ),
            name: input_value.name.to_string(),
            type_ref: TypeRef::from_ast_type(self.registry, &value_srcloc, &input_value.value_type),
            def_location: value_srcloc,
        }
    }
}

/// Names starting with "__" are reserved for GraphQL's introspection system.
///
/// https://spec.graphql.org/October2021/#sec-Names.Reserved-Names
fn check_name(
    errors: &mut Vec<SchemaBuildError>,
    location: &loc::SourceLocation,
    name: &str,
) {
    if name.starts_with("__") {
        errors.push(SchemaBuildError::InvalidDunderPrefixedName {
            location: location.to_owned(),
            name: name.to_string(),
        });
    }
}
