use clap::CommandFactory;
use crate::commands;

/// Validate GraphQL schemas (SDL) and the executable documents written
/// against them.
#[derive(clap::Parser, Debug)]
#[command(
    name = "typegraph",
    version,
    after_help = "Run `typegraph validate <FILE_OR_DIR_PATHS>...` to build a \
                  schema from SDL files and report every problem found.",
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Log schema building and document parsing at debug level \
             (overrides `LOG_LEVEL`).",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    /// Without a subcommand there is nothing to validate, so describe the
    /// available subcommands instead.
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        log::debug!("No subcommand given; printing help.");
        Self::command().print_help()?;
        Ok(())
    }
}
