//! Build linked GraphQL type registries from SDL and cache parsed
//! executable documents.
//!
//! ```
//! use typegraph::schema::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .load_str(None, "type Query { me: User }")?
//!     .load_str(None, "type User { name: String best_friend: User }")?
//!     .build()?;
//!
//! let me = &schema.query_type().fields()["me"];
//! assert_eq!(me.type_ref().innermost_type(&schema)?.name(), "User");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub use typegraph_core::*;
