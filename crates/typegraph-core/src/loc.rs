use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes the path to the file the position refers to (if any).
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos(
        file: Option<&Path>,
        pos: &graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.to_path_buf()),
            line: pos.line,
        }
    }

    pub fn into_schema_source_location(self) -> SourceLocation {
        SourceLocation::Schema(self)
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// Where some definition (or reference to a definition) came from.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SourceLocation {
    /// Defined implicitly by GraphQL itself (built-in scalars, directives).
    GraphQLBuiltIn,
    Schema(FilePosition),
}
impl SourceLocation {
    pub(crate) fn from_schema_ast_position(
        file: Option<&Path>,
        pos: &graphql_parser::Pos,
    ) -> Self {
        Self::Schema(FilePosition::from_pos(file, pos))
    }

    /// Produce a location in the same file as `self` but at `pos`.
    pub(crate) fn with_ast_position(&self, pos: &graphql_parser::Pos) -> Self {
        Self::from_schema_ast_position(self.file(), pos)
    }

    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::GraphQLBuiltIn => None,
            Self::Schema(file_pos) => file_pos.file.as_deref(),
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphQLBuiltIn => write!(f, "<graphql built-in>"),
            Self::Schema(file_pos) => write!(f, "{file_pos}"),
        }
    }
}
