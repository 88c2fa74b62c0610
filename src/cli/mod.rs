//! CLI command definitions and handlers

mod check;
mod init;
mod rules;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for usage, configuration and I/O errors; 1 and 2 report
/// analysis outcomes
pub const EXIT_ERROR: u8 = 3;

/// Parse and validate workers count (0 = auto, at most 64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// a11ylint - accessibility checks for declarative UI code
#[derive(Parser, Debug)]
#[command(name = "a11ylint")]
#[command(
    version,
    args_conflicts_with_subcommands = true,
    about = "Accessibility linter for declarative UI syntax trees",
    long_about = "a11ylint reads the JSON syntax dumps (*.ast.json) emitted by a compiler \
front-end and reports UI elements that assistive technologies cannot describe: \
unlabeled clickables, text fields and checkboxes, icon-only buttons and images \
without a content description.\n\n\
Run without a subcommand to check the current directory:\n  \
a11ylint .",
    after_help = "\
Examples:
  a11ylint .                                   Check every dump under the current directory
  a11ylint build/a11y --format json            JSON output for scripting
  a11ylint . --format sarif -o a11y.sarif.json SARIF for GitHub Code Scanning
  a11ylint . --fail-on warning                 Exit code 1 on any warning (CI mode)
  a11ylint init                                Write a starter a11ylint.toml
  a11ylint rules                               List the available rules

Exit codes: 0 clean, 1 --fail-on threshold met, 2 unreadable dumps, 3 error"
)]
pub struct Cli {
    /// Dumps or directories to check (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format: text, json, sarif (default: text, or `defaults.format` from config)
    #[arg(long, short = 'f', value_parser = ["text", "json", "sarif"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Configuration file (default: a11ylint.toml or .a11ylintrc.json in the first path)
    #[arg(long, short = 'c', env = "A11YLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Exit with code 1 if findings at this severity or higher exist
    #[arg(long, value_parser = ["warning", "info"])]
    pub fail_on: Option<String>,

    /// Number of parallel workers (0 = auto)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an a11ylint.toml with the default settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List the available rules
    Rules,
}

/// Run the parsed command line
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Init { ref path }) => {
            init::run(path)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Rules) => {
            rules::run();
            Ok(ExitCode::SUCCESS)
        }
        None => check::run(&cli),
    }
}
