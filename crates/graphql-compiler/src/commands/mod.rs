mod build_args;
mod compile;
mod watch;

use crate::Cli;
use crate::CommandResult;
use compile::CompileCmd;
use watch::WatchCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-compiler")]
pub(crate) enum CommandEnum {
    /// Compile every document once.
    Compile(Box<CompileCmd>),

    /// Compile every document, then recompile as files change.
    Watch(Box<WatchCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Compile(cmd) => cmd.run(cli).await,
            Self::Watch(cmd) => cmd.run(cli).await,
        }
    }
}
