use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::mode::Mode;
use crate::runner::CommandRunner;

/// The tools take a single path and no flags of their own, so `-h` is a path too.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true)]
pub struct Args {
    /// File handed to DynamoWPFCLI
    #[arg(value_name = "PATH", allow_hyphen_values = true)]
    pub path: Option<OsString>,

    /// Ignored, only the first path is used
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

impl Args {
    pub fn try_parse_for<I, T>(mode: Mode, argv: I) -> Result<Args, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Args::command()
            .name(mode.bin_name())
            .about(mode.about())
            .try_get_matches_from(argv)?;
        Args::from_arg_matches(&matches)
    }
}

/// Entry point shared by the three binaries. Never fails the process.
pub fn run(mode: Mode) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse_for(mode, std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };
    if !args.rest.is_empty() {
        log::warn!("ignoring extra arguments: {:?}", args.rest);
    }

    if let Err(e) = execute(mode, args.path.as_deref()) {
        log::error!("{mode} failed: {e:?}");
        // stdout may be gone already, the exit code stays 0 either way
        let _ = writeln!(io::stdout(), "An error occurred: {e:#}");
    }
}

fn execute(mode: Mode, path: Option<&OsStr>) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    CommandRunner::new(mode).run(path, &mut out)?;
    Ok(())
}
