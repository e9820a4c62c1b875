use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use gti::cli::args::{CheckArgs, CliArgs, Command, OutputFormat};
use gti::cli::driver;
use gti::cli::reporter::{Reporter, render_json};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_REPORTED: i32 = 1;

fn main() -> Result<()> {
    // Only installs a subscriber when GTI_LOG or RUST_LOG is set.
    gti::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let code = match &args.command {
        Command::Check(check) => run_check(check)?,
    };
    std::process::exit(code);
}

fn run_check(args: &CheckArgs) -> Result<i32> {
    let result = driver::check(args)?;
    let mut stdout = std::io::stdout().lock();

    match args.format {
        OutputFormat::Json => {
            let json = render_json(&result).context("failed to serialize result")?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let reporter = Reporter::new(color);
            if let Some(scopes) = &result.scopes {
                write!(stdout, "{}", reporter.render_scopes(scopes))?;
            }
            if !result.diagnostics.is_empty() {
                writeln!(stdout, "{}", reporter.render(&result.diagnostics))?;
            }
            writeln!(stdout, "{}", reporter.render_summary(&result))?;
        }
    }

    if result.error_count() > 0 {
        Ok(EXIT_DIAGNOSTICS_REPORTED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
