/// How seriously a particular class of schema problem should be taken.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// The problem fails the build.
    #[default]
    Error,

    /// The problem is logged and otherwise ignored.
    Warn,
}

/// Knobs for [`SchemaBuilder`](crate::schema::SchemaBuilder).
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SchemaBuildOptions {
    /// What to do when a directive annotation is placed at a location its
    /// definition does not list.
    pub invalid_directive_location: DiagnosticLevel,
}
