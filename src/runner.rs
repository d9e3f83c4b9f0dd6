use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::RunnerError;
use crate::mode::Mode;
use crate::process::{self, Arguments, ProcessResult};

/// Where DynamoWPFCLI is expected, relative to the working directory
pub const DYNAMO_CLI_PATH: &str = "DynamoForRevit/DynamoWPFCLI.exe";

/// How a run ended when it did not fail
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No path was given, only the usage text was printed
    Usage,
    /// The tool was not at its expected path, nothing was spawned
    ToolNotFound,
    Completed(ProcessResult),
}

pub struct CommandRunner {
    mode: Mode,
    tool: PathBuf,
}

impl CommandRunner {
    pub fn new(mode: Mode) -> CommandRunner {
        CommandRunner {
            mode,
            tool: PathBuf::from(DYNAMO_CLI_PATH),
        }
    }

    pub fn with_tool_path(mut self, tool: impl Into<PathBuf>) -> CommandRunner {
        self.tool = tool.into();
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool
    }

    /// Runs the tool against `path`, writing the console report to `out`.
    ///
    /// A missing path or a missing tool is reported on `out` and is not an error;
    /// only spawn and I/O failures are.
    pub fn run(&self, path: Option<&OsStr>, out: &mut impl Write) -> Result<Outcome, RunnerError> {
        writeln!(out, "{}", self.mode.banner())?;

        let path = match path {
            Some(p) if !p.is_empty() => p,
            _ => {
                writeln!(out, "{}", self.mode.usage())?;
                return Ok(Outcome::Usage);
            }
        };
        writeln!(out, "{}", self.mode.attempt(path))?;

        if !self.tool.is_file() {
            log::debug!("{} is not a file", self.tool.display());
            writeln!(out, "Error: DynamoWPFCLI.exe not found.")?;
            return Ok(Outcome::ToolNotFound);
        }

        log::debug!(
            "running {} {}",
            self.tool.display(),
            self.mode.command_line(path).to_string_lossy()
        );
        let result = self.spawn(path)?;

        writeln!(out, "--- Dynamo Output ---")?;
        writeln!(out, "{}", result.stdout)?;

        if !result.stderr.is_empty() {
            writeln!(out, "--- Dynamo Errors ---")?;
            writeln!(out, "{}", result.stderr)?;
        }

        writeln!(out, "{}", self.mode.completion())?;
        out.flush()?;

        Ok(Outcome::Completed(result))
    }

    #[cfg(windows)]
    fn spawn(&self, path: &OsStr) -> Result<ProcessResult, RunnerError> {
        let line = self.mode.command_line(path);
        process::run_captured(&self.tool, Arguments::Raw(&line))
    }

    #[cfg(not(windows))]
    fn spawn(&self, path: &OsStr) -> Result<ProcessResult, RunnerError> {
        let argv = self.mode.args(path);
        process::run_captured(&self.tool, Arguments::Argv(&argv))
    }
}
