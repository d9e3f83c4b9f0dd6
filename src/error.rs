use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to start {}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The child was spawned with piped stdio but the handle was missing
    #[error("child process has no {0} pipe")]
    Pipe(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("reader for child {0} panicked")]
    ReaderPanicked(&'static str),
}
