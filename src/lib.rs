pub mod cli;
pub mod error;
pub mod mode;
pub mod process;
pub mod runner;

pub use error::RunnerError;
pub use mode::Mode;
pub use process::ProcessResult;
pub use runner::{CommandRunner, DYNAMO_CLI_PATH, Outcome};

/// Serializes tests that write a script and then exec it, so a concurrent fork
/// cannot hold the script open for writing (ETXTBSY)
#[cfg(test)]
pub(crate) static SPAWN_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
