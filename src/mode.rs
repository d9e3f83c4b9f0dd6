use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// Which DynamoWPFCLI flag pattern a tool drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Open a graph and save it back (`-o <path> -x`)
    Convert,
    /// Open and run a graph (`-o <path>`)
    Run,
    /// Run a command file (`-c <path>`)
    ExecuteCommands,
}

impl Mode {
    pub fn bin_name(self) -> &'static str {
        match self {
            Mode::Convert => "convert-dynamo-file",
            Mode::Run => "run-dynamo-graph",
            Mode::ExecuteCommands => "execute-dynamo-commands",
        }
    }

    pub fn about(self) -> &'static str {
        match self {
            Mode::Convert => "Convert a Dynamo graph with DynamoWPFCLI",
            Mode::Run => "Run a Dynamo graph with DynamoWPFCLI",
            Mode::ExecuteCommands => "Execute a Dynamo command file with DynamoWPFCLI",
        }
    }

    /// First line printed by every invocation
    pub fn banner(self) -> &'static str {
        match self {
            Mode::Convert => "MCP ConvertDynamoFile Tool",
            Mode::Run => "MCP RunDynamoGraph Tool",
            Mode::ExecuteCommands => "MCP ExecuteDynamoCommands Tool",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Mode::Convert => "Please provide the path to the .dyn file to convert.",
            Mode::Run => "Please provide the path to a .dyn file.",
            Mode::ExecuteCommands => "Please provide the path to a command file.",
        }
    }

    pub fn attempt(self, path: &OsStr) -> String {
        let path = Path::new(path).display();
        match self {
            Mode::Convert => format!("Attempting to convert file: {path}"),
            Mode::Run => format!("Attempting to run: {path}"),
            Mode::ExecuteCommands => format!("Attempting to execute commands from: {path}"),
        }
    }

    pub fn completion(self) -> &'static str {
        match self {
            Mode::Convert => "--- Conversion Complete ---",
            Mode::Run | Mode::ExecuteCommands => "--- Execution Complete ---",
        }
    }

    /// The argument string as the tool sees it on its command line.
    ///
    /// The path is wrapped in double quotes and is otherwise not escaped.
    pub fn command_line(self, path: &OsStr) -> OsString {
        let (flag, suffix) = match self {
            Mode::Convert => ("-o", " -x"),
            Mode::Run => ("-o", ""),
            Mode::ExecuteCommands => ("-c", ""),
        };
        let mut line = OsString::from(flag);
        line.push(" \"");
        line.push(path);
        line.push("\"");
        line.push(suffix);
        line
    }

    /// Same arguments as [`Mode::command_line`], split into an argv
    pub fn args(self, path: &OsStr) -> Vec<OsString> {
        let path = path.to_os_string();
        match self {
            Mode::Convert => vec!["-o".into(), path, "-x".into()],
            Mode::Run => vec!["-o".into(), path],
            Mode::ExecuteCommands => vec!["-c".into(), path],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Convert => "convert",
            Mode::Run => "run",
            Mode::ExecuteCommands => "execute-commands",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::{OsStr, OsString};

    use crate::mode::Mode;

    #[test]
    fn test_command_line_per_mode() {
        assert_eq!(
            Mode::Convert.command_line(OsStr::new("graphs/test.dyn")),
            r#"-o "graphs/test.dyn" -x"#
        );
        assert_eq!(
            Mode::ExecuteCommands.command_line(OsStr::new("cmds/batch.txt")),
            r#"-c "cmds/batch.txt""#
        );
        assert_eq!(
            Mode::Run.command_line(OsStr::new("graphs/test.dyn")),
            r#"-o "graphs/test.dyn""#
        );
    }

    #[test]
    fn test_args_keep_path_as_single_argument() {
        let args = Mode::Convert.args(OsStr::new("my graphs/test file.dyn"));

        assert_eq!(
            args,
            vec![
                OsString::from("-o"),
                OsString::from("my graphs/test file.dyn"),
                OsString::from("-x"),
            ]
        );
        assert_eq!(Mode::Run.args(OsStr::new("a.dyn")).len(), 2);
        assert_eq!(Mode::ExecuteCommands.args(OsStr::new("a.txt"))[0], "-c");
    }

    #[test]
    fn test_run_and_execute_share_completion_message() {
        assert_eq!(Mode::Run.completion(), Mode::ExecuteCommands.completion());
        assert_ne!(Mode::Convert.completion(), Mode::Run.completion());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_passed_through() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let path = OsStr::from_bytes(b"gr\xffph.dyn");

        assert_eq!(Mode::Run.args(path)[1], path);
        assert_eq!(
            Mode::Convert.command_line(path).into_vec(),
            b"-o \"gr\xffph.dyn\" -x".to_vec()
        );
        assert_eq!(Mode::Run.attempt(path), "Attempting to run: gr\u{FFFD}ph.dyn");
    }
}
