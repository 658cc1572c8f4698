//! linepatch -- unified diff of two text files.
//!
//! Usage: linepatch [OPTIONS] LEFT_FILE RIGHT_FILE

use std::process::ExitCode;

use linepatch::cli::{self, CliArgs, EXIT_FAILURE};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse_checked();

    // Logs go to stderr so they never mix with the diff on stdout.
    let filter = if args.quiet {
        EnvFilter::new("error")
    } else if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    match cli::run(&args, &mut stdout.lock()) {
        Ok(differs) => ExitCode::from(args.exit_code(differs)),
        Err(e) => {
            error!("linepatch failed: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
