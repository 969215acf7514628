mod argument_definition;
mod definition_trait;
mod directive_annotation_validator;
mod directive_definition;
mod enum_value_definition;
mod extension_merger;
mod field_definition;
mod named_type_ref;
mod type_definition;
mod type_definition_builder;
mod type_kind;
mod type_ref;
mod type_ref_kind_validator;
mod type_reference_registry;

pub use argument_definition::ArgumentDefinition;
pub use definition_trait::DefinitionTrait;
pub(crate) use directive_annotation_validator::DirectiveAnnotationValidator;
pub use directive_definition::BIND_DIRECTIVE_NAME;
pub use directive_definition::DEFAULT_DEPRECATION_REASON;
pub use directive_definition::DEPRECATED_DIRECTIVE_NAME;
pub use directive_definition::DirectiveDefinition;
pub use enum_value_definition::EnumValueDefinition;
pub use extension_merger::ExtensionMerger;
pub use field_definition::FieldDefinition;
pub use named_type_ref::DerefError;
pub use named_type_ref::NamedTypeRef;
pub use named_type_ref::SymbolId;
pub use named_type_ref::TypeId;
pub use type_definition::TypeDefinition;
pub use type_definition_builder::TypeDefinitionBuilder;
pub use type_kind::TypeKind;
pub use type_ref::TypeRef;
pub(crate) use type_ref_kind_validator::TypeRefKindValidator;
pub use type_reference_registry::TypeBindings;
pub use type_reference_registry::TypeReferenceRegistry;

#[cfg(test)]
mod tests;
