use std::process::ExitCode;

const GREEN_CHECK: &str = "\u{2705}";
const RED_X: &str = "\u{274c}";

/// What a command prints and the exit code the process ends with.
#[derive(Debug)]
pub(crate) struct CommandResult {
    pub exit_code: ExitCode,
    pub stderr: Option<String>,
    pub stdout: Option<String>,
}

impl CommandResult {
    /// A failed build, reported on stderr behind a red cross.
    pub fn failed(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::FAILURE,
            stderr: Some(format!("{RED_X} {fmt_args}")),
            stdout: None,
        }
    }

    /// A successful build, reported on stdout behind a green check.
    pub fn succeeded(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            exit_code: ExitCode::SUCCESS,
            stderr: None,
            stdout: Some(format!("{GREEN_CHECK} {fmt_args}")),
        }
    }
}
