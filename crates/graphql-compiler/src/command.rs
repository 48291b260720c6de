use crate::Cli;
use crate::CommandResult;

/// A subcommand that loads the schema, drives a build and reports how it
/// went. Build failures are reported through the [`CommandResult`] rather
/// than returned as errors.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
