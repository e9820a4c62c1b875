use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gti binary.
#[derive(Parser, Debug)]
#[command(
    name = "gti",
    version,
    about = "Build the declared-type environment of an annotated JavaScript program"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run global type info over a serialized source file and report
    /// diagnostics.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Source file as JSON (`{"file_name": ..., "statements": [...]}`).
    pub file: PathBuf,

    /// Declarations-only source file whose statements are treated as externs.
    #[arg(long)]
    pub externs: Option<PathBuf>,

    /// JSON file with builder options.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Also print every scope with the declared types of its names.
    #[arg(long = "dump-scopes")]
    pub dump_scopes: bool,

    /// Override the inheritance worklist ceiling from the config file.
    #[arg(long = "max-worklist-iterations")]
    pub max_worklist_iterations: Option<usize>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
