use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::RunnerError;

/// Captured result of a single child process run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    /// Whether the child was waited on after both pipes hit EOF
    pub exit_observed: bool,
    /// `None` when the child was killed by a signal
    pub code: Option<i32>,
}

/// How the arguments reach the child.
pub enum Arguments<'a> {
    /// Discrete argv entries
    Argv(&'a [OsString]),
    /// A pre-composed command line, appended as-is on Windows
    #[cfg(windows)]
    Raw(&'a std::ffi::OsStr),
}

/// Spawns `tool` with piped stdout/stderr, drains both to EOF and waits for it.
///
/// Stdin stays inherited from this process.
pub fn run_captured(tool: &Path, args: Arguments<'_>) -> Result<ProcessResult, RunnerError> {
    let mut cmd = Command::new(tool);
    match args {
        Arguments::Argv(argv) => {
            cmd.args(argv);
        }
        #[cfg(windows)]
        Arguments::Raw(line) => {
            use std::os::windows::process::CommandExt;
            cmd.raw_arg(line);
        }
    }
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
        tool: tool.to_path_buf(),
        source,
    })?;

    let stdout = child.stdout.take().ok_or(RunnerError::Pipe("stdout"))?;
    let stderr = child.stderr.take().ok_or(RunnerError::Pipe("stderr"))?;

    // both pipes are read at once, a chatty child would otherwise block on a full buffer
    let (out, err) = thread::scope(|s| {
        let out = s.spawn(move || read_all(stdout));
        let err = s.spawn(move || read_all(stderr));
        (out.join(), err.join())
    });
    let out = out.map_err(|_| RunnerError::ReaderPanicked("stdout"))?;
    let err = err.map_err(|_| RunnerError::ReaderPanicked("stderr"));

    // reap the child before reporting a read failure
    let status = child.wait()?;
    log::debug!("{} exited with {}", tool.display(), status);

    Ok(ProcessResult {
        stdout: out?,
        stderr: err??,
        exit_observed: true,
        code: status.code(),
    })
}

fn read_all(mut pipe: impl Read) -> io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;
    use std::sync::MutexGuard;

    use crate::error::RunnerError;
    use crate::process::{Arguments, run_captured};

    fn spawn_guard() -> MutexGuard<'static, ()> {
        crate::SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sh(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[test]
    fn test_captures_both_streams() {
        let _guard = spawn_guard();
        let args = sh("printf out; printf err >&2");
        let result = run_captured(Path::new("/bin/sh"), Arguments::Argv(&args)).unwrap();

        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
        assert!(result.exit_observed);
        assert_eq!(result.code, Some(0));
    }

    #[test]
    fn test_exit_code_is_recorded_not_raised() {
        let _guard = spawn_guard();
        let args = sh("exit 3");
        let result = run_captured(Path::new("/bin/sh"), Arguments::Argv(&args)).unwrap();

        assert_eq!(result.code, Some(3));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn test_large_output_on_both_pipes_does_not_deadlock() {
        let _guard = spawn_guard();
        // well past the 64 KiB pipe buffer on each stream, stderr first
        let args = sh(
            "head -c 1048576 /dev/zero | tr '\\0' e >&2; head -c 1048576 /dev/zero | tr '\\0' o",
        );
        let result = run_captured(Path::new("/bin/sh"), Arguments::Argv(&args)).unwrap();

        assert_eq!(result.stdout.len(), 1 << 20);
        assert_eq!(result.stderr.len(), 1 << 20);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let _guard = spawn_guard();
        let args: Vec<OsString> = Vec::new();
        let err = run_captured(Path::new("/nonexistent/tool"), Arguments::Argv(&args)).unwrap_err();

        assert!(matches!(err, RunnerError::Spawn { .. }));
    }
}
