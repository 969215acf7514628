pub mod ast;
pub mod cache;
mod definition_path;
mod directive_annotation;
mod directive_annotation_builder;
pub(crate) mod file_reader;
pub mod loc;
pub mod schema;
pub mod types;
mod value;

pub use definition_path::DefinitionPath;
pub use definition_path::DisplayAncestry;
pub use definition_path::PathSegment;
pub use directive_annotation::DirectiveAnnotation;
pub use directive_annotation::DirectiveLocation;
pub use directive_annotation_builder::DirectiveAnnotationBuilder;
pub use value::Value;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod tests;
