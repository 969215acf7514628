use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use typegraph::ast;
use typegraph::cache::DocumentCache;
use typegraph::cache::DocumentCacheConfig;
use typegraph::schema::DiagnosticLevel;
use typegraph::schema::SchemaBuildOptions;
use typegraph::schema::SchemaBuilder;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        default_value_t=DocumentCacheConfig::default().capacity,
        help="The maximum number of parsed documents to keep cached at once.",
        long,
    )]
    cache_capacity: usize,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for \
             executable document files within a directory.",
        long,
        value_delimiter = ',',
    )]
    document_file_exts: Vec<String>,

    #[arg(
        help="Paths to GraphQL files (or directories containing GraphQL \
             files) with executable documents (operations and fragments) to \
             parse.",
        long,
        value_delimiter = ',',
    )]
    documents: Vec<PathBuf>,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Log directive annotations placed at a location their \
             definition does not allow instead of failing validation.",
        long,
    )]
    warn_invalid_directive_locations: bool,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files which need to be validated.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

/// Everything found while scanning input paths for GraphQL files.
struct FoundFiles {
    file_paths: Vec<PathBuf>,
    num_non_graphql_files: usize,
}

#[derive(Default)]
struct DocumentsSummary {
    num_distinct: usize,
    num_documents: usize,
    num_operations: usize,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let mut errors: Vec<Box<dyn Error>> = vec![];

        let schema_files = find_graphql_files(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
            &mut errors,
        );
        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} GraphQL validation errors: {errors:#?}",
                output_utils::RED_X,
            ));
        }

        log::debug!(
            "Found {} GraphQL schema files to be validated.",
            schema_files.file_paths.len(),
        );

        let options = SchemaBuildOptions {
            invalid_directive_location:
                if self.warn_invalid_directive_locations {
                    DiagnosticLevel::Warn
                } else {
                    DiagnosticLevel::Error
                },
        };
        let schema_result = SchemaBuilder::with_options(options)
            .load_files(schema_files.file_paths.iter().collect::<Vec<_>>())
            .and_then(SchemaBuilder::build);
        let schema = match schema_result {
            Ok(schema) => schema,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Errors validating schema:\n{e}",
                output_utils::RED_X,
            )),
        };

        let documents_summary =
            if self.documents.is_empty() {
                DocumentsSummary::default()
            } else {
                let document_files = find_graphql_files(
                    &self.documents,
                    &self.document_file_exts,
                    &mut errors,
                );
                self.parse_documents(document_files.file_paths, &mut errors).await
            };

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} GraphQL validation errors: {errors:#?}",
                output_utils::RED_X,
            ));
        }

        CommandResult::stdout(format_args!(
            concat!(
                "{} All GraphQL validated successfully:\n",
                "  * Analyzed {} schema files.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Validated {} type definitions.\n",
                "  * Validated {} directive definitions.\n",
                "  * Parsed {} documents ({} distinct).\n",
                "  * Found {} operations.",
            ),
            output_utils::GREEN_CHECK,
            schema_files.file_paths.len(),
            schema_files.num_non_graphql_files,
            schema.defined_types().count(),
            schema.all_directives().values().filter(|def| !def.is_builtin()).count(),
            documents_summary.num_documents,
            documents_summary.num_distinct,
            documents_summary.num_operations,
        ))
    }
}
impl ValidateCmd {
    /// Parse every document file through a shared [`DocumentCache`], one
    /// blocking task per file. Files with identical contents are parsed
    /// once.
    async fn parse_documents(
        &self,
        file_paths: Vec<PathBuf>,
        errors: &mut Vec<Box<dyn Error>>,
    ) -> DocumentsSummary {
        let cache_config = DocumentCacheConfig {
            capacity: self.cache_capacity,
        };
        let cache = match DocumentCache::from_config(&cache_config) {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                errors.push(Box::new(e));
                return DocumentsSummary::default();
            },
        };

        let mut tasks = tokio::task::JoinSet::new();
        for file_path in file_paths {
            let cache = cache.clone();
            tasks.spawn_blocking(move || -> Result<usize, String> {
                let source = std::fs::read_to_string(&file_path)
                    .map_err(|err| format!("Failed to read {}: {err}", file_path.display()))?;
                let (fingerprint, document) = cache.get_or_parse(source.as_str())
                    .map_err(|err| format!("{}: {err}", file_path.display()))?;
                log::trace!("Parsed {} as document {fingerprint}.", file_path.display());
                Ok(document.definitions.iter()
                    .filter(|def| matches!(def, ast::query::Definition::Operation(_)))
                    .count())
            });
        }

        let mut summary = DocumentsSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(num_operations)) => {
                    summary.num_documents += 1;
                    summary.num_operations += num_operations;
                },
                Ok(Err(msg)) => errors.push(msg.into()),
                Err(join_err) => errors.push(Box::new(join_err)),
            }
        }
        summary.num_distinct = cache.count();

        log::debug!(
            "Parsed {} documents ({} distinct).",
            summary.num_documents,
            summary.num_distinct,
        );
        summary
    }
}

/// Find all GraphQL files recursively located at or under each of `paths`.
fn find_graphql_files(
    paths: &[PathBuf],
    file_exts: &[String],
    errors: &mut Vec<Box<dyn Error>>,
) -> FoundFiles {
    // Normalize the set of file extensions to filter with
    let file_exts: HashSet<String> =
        file_exts.iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();

    log::debug!("Scanning {} input paths...", paths.len());
    let mut found = FoundFiles {
        file_paths: vec![],
        num_non_graphql_files: 0,
    };
    for path in paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    errors.push(Box::new(e));
                    continue
                },
            };

            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {entry_path:#?}.");
                continue;
            }

            let has_graphql_ext = entry_path.extension()
                .map(|ext| ext.to_string_lossy())
                .is_some_and(|ext| file_exts.contains(&*ext));
            if !has_graphql_ext {
                log::trace!("Skipping non-graphql file: {entry_path:#?}.");
                found.num_non_graphql_files += 1;
                continue;
            }

            match std::fs::canonicalize(entry_path) {
                Ok(canonical_path) => found.file_paths.push(canonical_path),
                Err(e) => errors.push(Box::new(e)),
            }
        }
    }

    // If the user specifies a single file path as an argument, presume the
    // user explicitly wants that file loaded as a GraphQL file -- even if its
    // file extension doesn't match one of the expected file extensions.
    if found.file_paths.is_empty() && paths.len() == 1 && paths[0].is_file() {
        match std::fs::canonicalize(&paths[0]) {
            Ok(canonical_path) => {
                log::warn!(
                    "Proceeding with {canonical_path:#?} even though it \
                    doesn't match any of the expected file extensions ({}).",
                    file_exts.iter()
                        .map(|ext| format!("`.{ext}`"))
                        .collect::<Vec<_>>()
                        .join(", "),
                );
                found.num_non_graphql_files = found.num_non_graphql_files.saturating_sub(1);
                found.file_paths.push(canonical_path);
            },
            Err(e) => errors.push(Box::new(e)),
        }
    }

    found
}
