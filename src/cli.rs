use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "compos-harness", about = "CompOS compilation and redefinition fixture helpers", version)]
pub struct Cli {
    /// Device serial (overrides ANDROID_SERIAL).
    #[arg(short = 's', long, global = true)]
    pub serial: Option<String>,

    /// Path to the adb binary (overrides ADB_PATH).
    #[arg(long, global = true)]
    pub adb: Option<String>,

    /// Job scheduler ID of the pending compilation.
    #[arg(long = "job-id", global = true)]
    pub job_id: Option<String>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the CompOS compilation job now and wait for it to finish.
    Compile {
        /// Run even when the device looks unsuitable.
        #[arg(long)]
        skip_checks: bool,
    },
    /// sha256 listing of a device directory, minus volatile files.
    Checksum {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Report whether CompOS is usable on the device.
    Check,
    /// Inspect or export the embedded redefinition payloads.
    Fixture {
        /// Write Transform.class and classes.dex into this directory.
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["compos-harness", "checksum", "/data/x", "-s", "emu", "-vv"])
            .unwrap();
        assert_eq!(cli.serial.as_deref(), Some("emu"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Checksum { path } => assert_eq!(path, "/data/x"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn compile_flags() {
        let cli = Cli::try_parse_from(["compos-harness", "--job-id", "42", "compile", "--skip-checks"])
            .unwrap();
        assert_eq!(cli.job_id.as_deref(), Some("42"));
        assert!(matches!(cli.command, Command::Compile { skip_checks: true }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["compos-harness"]).is_err());
    }
}
