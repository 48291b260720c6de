use crate::commands::build_args::BuildArgs;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;

#[derive(Debug, clap::Args)]
pub(crate) struct CompileCmd {
    #[command(flatten)]
    build_args: BuildArgs,
}

#[inherent::inherent]
impl RunnableCommand for CompileCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match self.build_args.load_schema() {
            Ok(schema) => schema,
            Err(err) => return CommandResult::failed(format_args!("{err:#}")),
        };

        let runner = self.build_args.runner(schema);
        let summary = match runner.compile_all().await {
            Ok(summary) => summary,
            Err(err) => return CommandResult::failed(format_args!("Build failed: {err}")),
        };

        if !summary.failed_writers.is_empty() {
            return CommandResult::failed(format_args!(
                "Failed to write: {}",
                summary.failed_writers.join(", "),
            ));
        }

        // Validation succeeds only when every artifact is already up to date.
        if self.build_args.validate && summary.has_changes {
            return CommandResult::failed(format_args!("Generated artifacts are out of date."));
        }

        CommandResult::succeeded(format_args!(
            "{}",
            match (self.build_args.validate, summary.has_changes) {
                (true, _) => "All generated artifacts are up to date.",
                (false, true) => "Compiled successfully.",
                (false, false) => "Compiled successfully, nothing changed.",
            },
        ))
    }
}
