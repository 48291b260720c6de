use clap::CommandFactory;
use crate::commands;

/// Compiles the GraphQL documents of a client project against a server
/// schema and writes one generated artifact per operation and fragment.
#[derive(clap::Parser, Debug)]
#[command(
    name = "graphql-compiler",
    version,
    about = "Compile GraphQL client documents into generated artifacts.",
    long_about = "Compile GraphQL client documents into generated artifacts.\n\n\
        `compile` builds every document once. `watch` builds once and then \
        rebuilds the documents that change until interrupted.",
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Log at debug level. Overrides the LOG_LEVEL environment variable.",
        global=true,
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    /// With no subcommand there is nothing to build, so show the usage.
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
