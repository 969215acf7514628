use crate::ast;
use crate::definition_path::DisplayAncestry;
use crate::DirectiveLocation;
use crate::file_reader;
use crate::loc;
use crate::PathSegment;
use crate::schema::Schema;
use crate::schema::SchemaBuildOptions;
use crate::types::DirectiveAnnotationValidator;
use crate::types::DirectiveDefinition;
use crate::types::ExtensionMerger;
use crate::types::TypeDefinition;
use crate::types::TypeDefinitionBuilder;
use crate::types::TypeId;
use crate::types::TypeKind;
use crate::types::TypeRefKindValidator;
use crate::types::TypeReferenceRegistry;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALARS: [(&str, &str); 5] = [
    ("Boolean", "The `Boolean` scalar type represents `true` or `false`."),
    ("Float", "The `Float` scalar type represents signed double-precision fractional values."),
    ("ID", "The `ID` scalar type represents a unique identifier."),
    ("Int", "The `Int` scalar type represents non-fractional signed whole numeric values."),
    ("String", "The `String` scalar type represents textual data as UTF-8 character sequences."),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}
impl OperationType {
    /// The name of the object type used for this operation when no
    /// `schema { ... }` block overrides it.
    ///
    /// https://spec.graphql.org/October2021/#sec-Root-Operation-Types.Default-Root-Operation-Type-Names
    pub fn default_type_name(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

/// Utility for building a [`Schema`].
///
/// Schema documents may be loaded in any number of calls to
/// [`SchemaBuilder::load_str()`] or [`SchemaBuilder::load_files()`]. Every
/// problem found while loading (other than a syntax error) is collected
/// and reported together by [`SchemaBuilder::build()`].
///
/// Building happens in phases:
///
///   1. Loading: each definition is turned into a [`TypeDefinition`] (or
///      [`DirectiveDefinition`]) as it is visited. Type extensions are
///      built the same way but held back.
///   2. Merging: every type extension is merged into its base type, in the
///      order the extensions were loaded.
///   3. Resolution: every named type reference is bound to a type.
///   4. Validation: directive annotations and the kinds of referenced types
///      are checked, and root operation types are chosen.
#[derive(Debug)]
pub struct SchemaBuilder {
    directive_defs: IndexMap<String, DirectiveDefinition>,
    errors: Vec<SchemaBuildError>,
    extensions: Vec<TypeDefinition>,
    failed_type_names: HashSet<String>,
    mutation_type: Option<NamedTypeDefLocation>,
    options: SchemaBuildOptions,
    query_type: Option<NamedTypeDefLocation>,
    registry: TypeReferenceRegistry,
    str_load_counter: u16,
    subscription_type: Option<NamedTypeDefLocation>,
    types: IndexMap<String, TypeDefinition>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        let mut errors = std::mem::take(&mut self.errors);

        let merger = ExtensionMerger::new(&self.directive_defs);
        for extension in self.extensions.drain(..) {
            match self.types.get_mut(extension.name.as_str()) {
                Some(base) => {
                    if let Err(merge_errors) = merger.merge(base, extension) {
                        errors.extend(merge_errors);
                    }
                },

                // The base definition's own errors were already collected.
                None if self.failed_type_names.contains(extension.name.as_str()) =>
                    log::debug!(
                        "Skipping extension of `{}` at {}; its definition failed to build.",
                        extension.name,
                        extension.def_location,
                    ),

                None => errors.push(SchemaBuildError::ExtensionOfUndefinedType {
                    extension_location: extension.def_location,
                    type_name: extension.name,
                }),
            }
        }

        // Resolution is only meaningful once every extension has been
        // applied.
        if !errors.is_empty() {
            return Err(SchemaBuildError::BuildErrors { errors });
        }

        let bindings = match self.registry.resolve_all(&self.types) {
            Ok(bindings) => bindings,
            Err(resolution_errors) => {
                errors.extend(resolution_errors);
                return Err(SchemaBuildError::BuildErrors { errors });
            },
        };

        errors.extend(
            DirectiveAnnotationValidator::new(&self.directive_defs, &self.options)
                .validate(&self.types)
        );
        errors.extend(
            TypeRefKindValidator::new(&self.types, &bindings)
                .validate(&self.directive_defs)
        );

        let query_type = self.choose_operation_type(
            OperationType::Query,
            self.query_type.as_ref(),
            &mut errors,
        );
        let mutation_type = self.choose_operation_type(
            OperationType::Mutation,
            self.mutation_type.as_ref(),
            &mut errors,
        );
        let subscription_type = self.choose_operation_type(
            OperationType::Subscription,
            self.subscription_type.as_ref(),
            &mut errors,
        );

        // From the GraphQL schema rules:
        //
        // > The query, mutation, and subscription root types must all be
        // > different types if provided.
        //
        // https://spec.graphql.org/October2021/#sel-FAHTRLCAACG0B57a
        let root_ops = [
            (OperationType::Query, query_type),
            (OperationType::Mutation, mutation_type),
            (OperationType::Subscription, subscription_type),
        ];
        for (idx, (operation1, type_id1)) in root_ops.iter().enumerate() {
            for (operation2, type_id2) in root_ops.iter().skip(idx + 1) {
                if let (Some(type_id1), Some(type_id2)) = (type_id1, type_id2) {
                    if type_id1 == type_id2 {
                        errors.push(SchemaBuildError::NonUniqueOperationTypes {
                            operation1: *operation1,
                            operation2: *operation2,
                            reused_type_name: self.types[type_id1.index()].name.to_string(),
                        });
                    }
                }
            }
        }

        let query_type = match query_type {
            Some(query_type) => query_type,
            None => {
                // An explicitly declared (but invalid) query type was
                // already reported.
                if self.query_type.is_none() {
                    errors.push(SchemaBuildError::NoQueryOperationTypeDefined);
                }
                return Err(SchemaBuildError::BuildErrors { errors });
            },
        };

        if !errors.is_empty() {
            return Err(SchemaBuildError::BuildErrors { errors });
        }

        log::debug!(
            "Built a schema with {} types and {} directives.",
            self.types.len(),
            self.directive_defs.len(),
        );

        Ok(Schema {
            bindings,
            directive_defs: self.directive_defs,
            mutation_type,
            query_type,
            subscription_type,
            types: self.types,
        })
    }

    /// Construct a [`Schema`] from a list of files in one step.
    pub fn from_files(file_paths: Vec<impl AsRef<Path>>) -> Result<Schema> {
        Self::new().load_files(file_paths)?.build()
    }

    /// Construct a [`Schema`] from a single string of SDL in one step.
    pub fn from_sdl(content: impl AsRef<str>) -> Result<Schema> {
        Self::new().load_str(None, content.as_ref())?.build()
    }

    pub fn load_file(
        self,
        file_path: impl AsRef<Path>,
    ) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files(
        mut self,
        file_paths: Vec<impl AsRef<Path>>,
    ) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError {
                    err: err.to_string(),
                    file: file_path.to_path_buf(),
                })?;
            self = self.load_str(
                Some(file_path.to_path_buf()),
                file_content.as_str(),
            )?;
        }
        Ok(self)
    }

    /// Load a schema document. A syntax error fails immediately; every other
    /// problem is collected and reported by [`SchemaBuilder::build()`].
    pub fn load_str(
        mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::ParseError {
                err: err.to_string(),
                file: file_path.to_owned(),
            })?;

        log::debug!(
            "Loading {} definitions from {}.",
            ast_doc.definitions.len(),
            file_path.display(),
        );
        for def in &ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def);
        }

        Ok(self)
    }

    pub fn new() -> Self {
        Self::with_options(SchemaBuildOptions::default())
    }

    pub fn with_options(options: SchemaBuildOptions) -> Self {
        let mut registry = TypeReferenceRegistry::new();
        let directive_defs = DirectiveDefinition::builtins(&mut registry)
            .into_iter()
            .map(|directive_def| (directive_def.name.to_string(), directive_def))
            .collect();
        let types = BUILTIN_SCALARS.iter()
            .map(|(name, description)| (
                name.to_string(),
                TypeDefinition::builtin_scalar(name, description),
            ))
            .collect();

        Self {
            directive_defs,
            errors: vec![],
            extensions: vec![],
            failed_type_names: HashSet::new(),
            mutation_type: None,
            options,
            query_type: None,
            registry,
            str_load_counter: 0,
            subscription_type: None,
            types,
        }
    }

    fn choose_operation_type(
        &self,
        operation: OperationType,
        declared: Option<&NamedTypeDefLocation>,
        errors: &mut Vec<SchemaBuildError>,
    ) -> Option<TypeId> {
        let type_name = declared
            .map(|typedef_loc| typedef_loc.type_name.as_str())
            .unwrap_or(operation.default_type_name());

        match (self.types.get_full(type_name), declared) {
            (Some((type_idx, _, typedef)), _) if typedef.kind == TypeKind::Object =>
                Some(TypeId(type_idx)),

            (_, Some(typedef_loc)) => {
                errors.push(SchemaBuildError::InvalidOperationType {
                    location: typedef_loc.def_location.to_owned(),
                    operation,
                    type_name: type_name.to_string(),
                });
                None
            },

            (_, None) => None,
        }
    }

    fn visit_ast_def(
        &mut self,
        file_path: &Path,
        def: &ast::schema::Definition,
    ) {
        use graphql_parser::schema::Definition;
        match def {
            Definition::SchemaDefinition(schema_def) =>
                self.visit_ast_schemablock_def(file_path, schema_def),
            Definition::TypeDefinition(type_def) =>
                self.visit_ast_type_def(file_path, type_def),
            Definition::TypeExtension(type_ext) =>
                self.visit_ast_type_extension(file_path, type_ext),
            Definition::DirectiveDefinition(directive_def) =>
                self.visit_ast_directive_def(file_path, directive_def),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        file_path: &Path,
        def: &ast::schema::DirectiveDefinition,
    ) {
        let def_location =
            loc::SourceLocation::from_schema_ast_position(Some(file_path), &def.position);

        if let Some(existing_def) = self.directive_defs.get(def.name.as_str()) {
            self.errors.push(
                if existing_def.is_builtin() {
                    SchemaBuildError::RedefinitionOfBuiltinDirective {
                        directive_name: def.name.to_string(),
                        location: def_location,
                    }
                } else {
                    SchemaBuildError::DuplicateDirectiveDefinition {
                        directive_name: def.name.to_string(),
                        location1: existing_def.def_location.clone(),
                        location2: def_location,
                    }
                }
            );
            return;
        }

        let mut builder = TypeDefinitionBuilder::new(&mut self.registry, Some(file_path));
        match builder.build_directive_definition(def) {
            Ok(directive_def) => {
                self.directive_defs.insert(def.name.to_string(), directive_def);
            },
            Err(errors) => self.errors.extend(errors),
        }
    }

    fn visit_ast_schemablock_def(
        &mut self,
        file_path: &Path,
        schema_def: &ast::schema::SchemaDefinition,
    ) {
        let declared_ops = [
            (OperationType::Query, &schema_def.query),
            (OperationType::Mutation, &schema_def.mutation),
            (OperationType::Subscription, &schema_def.subscription),
        ];
        for (operation, type_name) in declared_ops {
            let Some(type_name) = type_name else {
                continue;
            };
            let typedef_loc = NamedTypeDefLocation::from_pos(
                type_name.to_string(),
                file_path,
                &schema_def.position,
            );
            let slot = match operation {
                OperationType::Query => &mut self.query_type,
                OperationType::Mutation => &mut self.mutation_type,
                OperationType::Subscription => &mut self.subscription_type,
            };
            if let Some(existing_typedef_loc) = slot.as_ref() {
                self.errors.push(SchemaBuildError::DuplicateOperationDefinition {
                    location1: existing_typedef_loc.clone(),
                    location2: typedef_loc,
                    operation,
                });
                continue;
            }
            *slot = Some(typedef_loc);
        }
    }

    fn visit_ast_type_def(
        &mut self,
        file_path: &Path,
        type_def: &ast::schema::TypeDefinition,
    ) {
        let mut builder = TypeDefinitionBuilder::new(&mut self.registry, Some(file_path));
        let typedef = match builder.build(type_def) {
            Ok(typedef) => typedef,
            Err(errors) => {
                self.errors.extend(errors);
                self.failed_type_names.insert(ast_type_def_name(type_def).to_string());
                return;
            },
        };

        if let Some(existing_typedef) = self.types.get(typedef.name.as_str()) {
            self.errors.push(SchemaBuildError::DuplicateTypeDefinition {
                def1: existing_typedef.def_location.clone(),
                def2: typedef.def_location,
                type_name: typedef.name,
            });
            return;
        }

        self.types.insert(typedef.name.to_string(), typedef);
    }

    fn visit_ast_type_extension(
        &mut self,
        file_path: &Path,
        ext: &ast::schema::TypeExtension,
    ) {
        let mut builder = TypeDefinitionBuilder::new(&mut self.registry, Some(file_path));
        match builder.build_extension(ext) {
            Ok(extension) => self.extensions.push(extension),
            Err(errors) => self.errors.extend(errors),
        }
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn fmt_errors(errors: &[SchemaBuildError]) -> String {
    errors.iter()
        .map(|err| format!("  * {err}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fmt_locations(locations: &[DirectiveLocation]) -> String {
    locations.iter()
        .map(DirectiveLocation::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn ast_type_def_name(type_def: &ast::schema::TypeDefinition) -> &str {
    use graphql_parser::schema::TypeDefinition as Def;
    match type_def {
        Def::Enum(def) => def.name.as_str(),
        Def::InputObject(def) => def.name.as_str(),
        Def::Interface(def) => def.name.as_str(),
        Def::Object(def) => def.name.as_str(),
        Def::Scalar(def) => def.name.as_str(),
        Def::Union(def) => def.name.as_str(),
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error(
        "Encountered the following errors while building the schema:\n\n{}",
        fmt_errors(.errors),
    )]
    BuildErrors {
        errors: Vec<SchemaBuildError>,
    },

    #[error("`{argument_name}` is defined more than once on `{owner}` ({def1} and {def2})")]
    DuplicateArgumentName {
        argument_name: String,
        def1: loc::SourceLocation,
        def2: loc::SourceLocation,
        owner: String,
    },

    #[error("Multiple directives were defined with the name `@{directive_name}` ({location1} and {location2})")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SourceLocation,
        location2: loc::SourceLocation,
    },

    #[error("The `{value_name}` value is defined more than once on the `{type_name}` enum ({value_def1} and {value_def2})")]
    DuplicateEnumValueDefinition {
        type_name: String,
        value_def1: loc::SourceLocation,
        value_def2: loc::SourceLocation,
        value_name: String,
    },

    #[error("Multiple fields named `{field_name}` were defined on the `{type_name}` type ({field_def1} and {field_def2})")]
    DuplicateFieldNameDefinition {
        field_def1: loc::SourceLocation,
        field_def2: loc::SourceLocation,
        field_name: String,
        type_name: String,
    },

    #[error(
        "The `{type_name}` type declares that it implements the \
        `{duplicated_interface_name}` interface more than once"
    )]
    DuplicateInterfaceImplementsDeclaration {
        def_location: loc::SourceLocation,
        duplicated_interface_name: String,
        type_name: String,
    },

    #[error("The non-repeatable `@{directive_name}` directive is applied more than once at {location}")]
    DuplicateNonRepeatableDirective {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error("Multiple definitions of the {operation:?} root operation type were given")]
    DuplicateOperationDefinition {
        location1: NamedTypeDefLocation,
        location2: NamedTypeDefLocation,
        operation: OperationType,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined ({def1} and {def2})")]
    DuplicateTypeDefinition {
        def1: loc::SourceLocation,
        def2: loc::SourceLocation,
        type_name: String,
    },

    #[error("The `{type_name}` union lists `{member_name}` as a member more than once")]
    DuplicateUnionMember {
        def_location: loc::SourceLocation,
        member_name: String,
        type_name: String,
    },

    #[error(
        "The non-repeatable `@{directive_name}` directive is applied to both \
        `{type_name}` ({base_location}) and an extension of it \
        ({extension_location})"
    )]
    ExtensionDirectiveConflict {
        base_location: loc::SourceLocation,
        directive_name: String,
        extension_location: loc::SourceLocation,
        type_name: String,
    },

    #[error(
        "An extension of `{type_name}` ({extension_def}) redefines the \
        `{value_name}` enum value ({base_def})"
    )]
    ExtensionEnumValueConflict {
        base_def: loc::SourceLocation,
        extension_def: loc::SourceLocation,
        type_name: String,
        value_name: String,
    },

    #[error(
        "An extension of `{type_name}` ({extension_def}) redefines the \
        `{field_name}` field ({base_def})"
    )]
    ExtensionFieldConflict {
        base_def: loc::SourceLocation,
        extension_def: loc::SourceLocation,
        field_name: String,
        type_name: String,
    },

    #[error("Attempted to merge an extension of `{extension_name}` into `{base_name}`")]
    ExtensionNameMismatch {
        base_name: String,
        extension_location: loc::SourceLocation,
        extension_name: String,
    },

    #[error("Attempted to extend `{type_name}` at {extension_location}, but it is not defined elsewhere")]
    ExtensionOfUndefinedType {
        extension_location: loc::SourceLocation,
        type_name: String,
    },

    #[error("`{type_name}` implements `{non_interface_type_name}` at {location}, but that is not an interface type")]
    ImplementsNonInterfaceType {
        location: loc::SourceLocation,
        non_interface_type_name: String,
        type_name: String,
    },

    #[error(
        "`@{directive_name}` is not allowed at {location} (on `{}`, {srcloc}); \
        it may only be used at {}",
        DisplayAncestry(.ancestry),
        fmt_locations(.allowed),
    )]
    InvalidDirectiveLocation {
        allowed: Vec<DirectiveLocation>,
        ancestry: Vec<PathSegment>,
        directive_name: String,
        location: DirectiveLocation,
        srcloc: loc::SourceLocation,
    },

    #[error("`@bind` at {location} must be given exactly one string `to:` argument")]
    InvalidBindDirective {
        location: loc::SourceLocation,
    },

    #[error("Names starting with `__` are reserved for introspection: `{name}` ({location})")]
    InvalidDunderPrefixedName {
        location: loc::SourceLocation,
        name: String,
    },

    #[error("Attempted to extend the {type_kind} `{type_name}` with a {extension_kind} extension at {extension_location}")]
    InvalidExtensionType {
        extension_kind: TypeKind,
        extension_location: loc::SourceLocation,
        type_kind: TypeKind,
        type_name: String,
    },

    #[error("`{path}` is declared with type `{type_name}` ({location}), which is not an input type")]
    InvalidInputValueType {
        location: loc::SourceLocation,
        path: String,
        type_name: String,
    },

    #[error("The {operation:?} root operation type `{type_name}` ({location}) is not a defined object type")]
    InvalidOperationType {
        location: loc::SourceLocation,
        operation: OperationType,
        type_name: String,
    },

    #[error("`{path}` is declared with type `{type_name}` ({location}), which is not an output type")]
    InvalidOutputFieldType {
        location: loc::SourceLocation,
        path: String,
        type_name: String,
    },

    #[error("The `{type_name}` union lists `{member_name}` ({location}), which is not an object type")]
    InvalidUnionMemberType {
        location: loc::SourceLocation,
        member_name: String,
        type_name: String,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The {operation1:?} and {operation2:?} root operations are both \
        defined with the `{reused_type_name}` type, but all root operations \
        must be defined with different types."
    )]
    NonUniqueOperationTypes {
        operation1: OperationType,
        operation2: OperationType,
        reused_type_name: String,
    },

    #[error("Error parsing schema {}: {err}", .file.display())]
    ParseError {
        err: String,
        file: PathBuf,
    },

    #[error("Attempted to redefine the builtin `@{directive_name}` directive at {location}")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error("Failure while trying to read schema file `{}`: {err}", .file.display())]
    SchemaFileReadError {
        err: String,
        file: PathBuf,
    },

    #[error("Directive `@{directive_name}` is applied at {location} but never defined")]
    UndefinedDirective {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error("`{type_name}` is referenced at {ref_location} but never defined")]
    UnresolvedTypeReference {
        ref_location: loc::SourceLocation,
        type_name: String,
    },
}

/// Represents the file location of a given type's definition in the schema.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeDefLocation {
    pub def_location: loc::SourceLocation,
    pub type_name: String,
}
impl NamedTypeDefLocation {
    pub(crate) fn from_pos(
        type_name: String,
        file: &Path,
        pos: &graphql_parser::Pos,
    ) -> Self {
        Self {
            def_location: loc::SourceLocation::from_schema_ast_position(Some(file), pos),
            type_name,
        }
    }
}
