#[allow(clippy::module_inception)]
mod schema;
mod schema_build_options;
pub(crate) mod schema_builder;

pub use schema::Schema;
pub use schema_build_options::DiagnosticLevel;
pub use schema_build_options::SchemaBuildOptions;
pub use schema_builder::NamedTypeDefLocation;
pub use schema_builder::OperationType;
pub use schema_builder::SchemaBuilder;
pub use schema_builder::SchemaBuildError;
