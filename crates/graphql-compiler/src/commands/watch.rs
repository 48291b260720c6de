use crate::commands::build_args::BuildArgs;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct WatchCmd {
    #[command(flatten)]
    build_args: BuildArgs,
}

#[inherent::inherent]
impl RunnableCommand for WatchCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match self.build_args.load_schema() {
            Ok(schema) => schema,
            Err(err) => return CommandResult::failed(format_args!("{err:#}")),
        };

        let runner = Arc::new(self.build_args.runner(schema));
        match runner.watch_all().await {
            Ok(summary) => {
                if !summary.failed_writers.is_empty() {
                    log::warn!(
                        "The initial build failed for: {}",
                        summary.failed_writers.join(", "),
                    );
                }
                CommandResult::succeeded(format_args!("Stopped watching."))
            },
            Err(err) => CommandResult::failed(format_args!("Watch failed: {err}")),
        }
    }
}
