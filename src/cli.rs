//! Command-line surface of the `linepatch` binary.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::debug;

use crate::config::{DEFAULT_CONTEXT, DiffOptions, HeaderColor};
use crate::error::{PatchError, PatchResult};
use crate::patch::{DiffOutcome, Differ};

/// Inputs are the same.
pub const EXIT_SAME: u8 = 0;
/// Inputs differ.
pub const EXIT_DIFF_FOUND: u8 = 1;
/// Anything went wrong.
pub const EXIT_FAILURE: u8 = 2;

/// File argument that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Output format of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Unified-diff text
    #[default]
    Text,
    /// Patches as a JSON document
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "linepatch")]
#[command(about = "Unified diff of two text files")]
#[command(after_help = "Exit status: 0 if inputs are the same, 1 if they differ, 2 on failure.
Either file may be `-` to read standard input.
RUST_LOG overrides the log filter unless --debug or --quiet is given.")]
#[command(version)]
pub struct CliArgs {
    /// Left (old) file
    pub left: PathBuf,

    /// Right (new) file
    pub right: PathBuf,

    /// Lines of context around each change
    #[arg(short = 'C', long, value_name = "N", default_value_t = DEFAULT_CONTEXT)]
    pub context: usize,

    /// Color the output with ANSI escapes
    #[arg(short, long)]
    pub color: bool,

    /// Color of @@ range lines
    #[arg(long, value_enum, default_value = "cyan")]
    pub header_color: HeaderColor,

    /// Label for the left, then the right file (defaults to the paths)
    #[arg(long = "label", value_name = "TEXT")]
    pub labels: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub out: OutputFormat,

    /// Exit with 0 even if the inputs differ
    #[arg(long)]
    pub success: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse the process arguments, exiting with usage on error.
    pub fn parse_checked() -> Self {
        Self::try_parse_checked(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args` (program name first) and check what clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns a clap error for malformed arguments, more than two labels, or
    /// both files read from standard input.
    pub fn try_parse_checked<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Self::try_parse_from(args)?;
        if args.labels.len() > 2 {
            return Err(Self::command().error(
                ErrorKind::TooManyValues,
                format!("at most 2 labels are allowed, got {}", args.labels.len()),
            ));
        }
        if is_stdin(&args.left) && is_stdin(&args.right) {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "only one file can be read from standard input",
            ));
        }
        Ok(args)
    }

    /// Diff options with labels defaulting to the file paths.
    pub fn options(&self) -> DiffOptions {
        let mut labels = self.labels.iter().cloned();
        let left = labels
            .next()
            .unwrap_or_else(|| self.left.display().to_string());
        let right = labels
            .next()
            .unwrap_or_else(|| self.right.display().to_string());
        DiffOptions::default()
            .with_labels(left, right)
            .with_context(self.context)
            .with_color(self.color)
            .with_header_color(self.header_color)
    }

    /// Exit status for a finished run.
    pub const fn exit_code(&self, differs: bool) -> u8 {
        if differs && !self.success {
            EXIT_DIFF_FOUND
        } else {
            EXIT_SAME
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Diff the two files and write the result to `out`.
///
/// Returns whether the inputs differ.
///
/// # Errors
///
/// Returns an error if a file cannot be read, the diff breaks an invariant,
/// or writing fails.
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<bool> {
    run_with_input(args, &mut std::io::stdin().lock(), out)
}

/// Like [`run`], reading a `-` file argument from `input`.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_input(args: &CliArgs, input: &mut impl Read, out: &mut impl Write) -> Result<bool> {
    let left = read_input(&args.left, input)?;
    let right = read_input(&args.right, input)?;
    let options = args.options();
    debug!(
        left = %args.left.display(),
        right = %args.right.display(),
        context = options.context,
        "diffing files"
    );

    let differ = Differ::new(options);
    let outcome = differ
        .diff(&left, &right)
        .with_context(|| format!("failed to get diff: {}", args.left.display()))?;

    let DiffOutcome::Changed(diff) = outcome else {
        debug!("inputs are the same");
        return Ok(false);
    };

    match args.out {
        OutputFormat::Text => write!(out, "{diff}").context("failed to write diff")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &diff).map_err(PatchError::from)?;
            writeln!(out).context("failed to write diff")?;
        }
    }
    out.flush().context("failed to flush output")?;
    Ok(true)
}

fn read_input(path: &Path, stdin: &mut impl Read) -> PatchResult<String> {
    let io_error = |source: std::io::Error| PatchError::Io {
        path: path.to_path_buf(),
        source,
    };
    if is_stdin(path) {
        let mut text = String::new();
        stdin.read_to_string(&mut text).map_err(io_error)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_checked(std::iter::once("linepatch").chain(args.iter().copied()))
    }

    fn diff_args(args: &[&str]) -> CliArgs {
        parse(args).expect("should parse")
    }

    #[test]
    fn test_command_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = diff_args(&["a.txt", "b.txt"]);
        assert_eq!(args.left, PathBuf::from("a.txt"));
        assert_eq!(args.out, OutputFormat::Text);
        let options = args.options();
        assert_eq!(options.left_label, "a.txt");
        assert_eq!(options.right_label, "b.txt");
        assert_eq!(options.context, 3);
        assert_eq!(options.header_color, HeaderColor::Cyan);
        assert!(!options.color);
    }

    #[test]
    fn test_all_options() {
        let args = diff_args(&[
            "-C",
            "5",
            "--color",
            "--header-color=yellow",
            "--label",
            "L",
            "--label=R",
            "-o",
            "json",
            "--success",
            "--debug",
            "a",
            "b",
        ]);
        assert_eq!(args.out, OutputFormat::Json);
        assert!(args.success && args.debug && !args.quiet);
        let options = args.options();
        assert_eq!(options.context, 5);
        assert!(options.color);
        assert_eq!(options.header_color, HeaderColor::Yellow);
        assert_eq!(options.left_label, "L");
        assert_eq!(options.right_label, "R");
    }

    #[test]
    fn test_short_forms() {
        let args = diff_args(&["-C5", "-cq", "-ojson", "a", "b"]);
        assert_eq!(args.context, 5);
        assert!(args.color && args.quiet);
        assert_eq!(args.out, OutputFormat::Json);
    }

    #[test]
    fn test_single_label_keeps_right_path() {
        let options = diff_args(&["--label", "old", "a", "b"]).options();
        assert_eq!(options.left_label, "old");
        assert_eq!(options.right_label, "b");
    }

    #[test]
    fn test_help_and_version() {
        let err = parse(&["--help"]).expect_err("help exits early");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--header-color"));
        let err = parse(&["a", "--version"]).expect_err("version exits early");
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_files_after_double_dash() {
        let args = diff_args(&["--", "-left", "-right"]);
        assert_eq!(args.left, PathBuf::from("-left"));
        assert_eq!(args.right, PathBuf::from("-right"));
    }

    #[test]
    fn test_invalid_arguments() {
        for args in [
            vec!["a"],
            vec!["a", "b", "c"],
            vec!["--context", "-1", "a", "b"],
            vec!["--context"],
            vec!["--bogus", "a", "b"],
            vec!["--out", "yaml", "a", "b"],
            vec!["--header-color", "magenta", "a", "b"],
            vec!["--color=yes", "a", "b"],
            vec!["--label", "1", "--label", "2", "--label", "3", "a", "b"],
            vec!["-", "-"],
        ] {
            let err = parse(&args).expect_err("should reject");
            assert!(
                !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion),
                "{args:?}: {err}"
            );
            assert_eq!(err.exit_code(), i32::from(EXIT_FAILURE), "{args:?}");
        }
    }

    #[test]
    fn test_exit_code() {
        let mut args = diff_args(&["a", "b"]);
        assert_eq!(args.exit_code(false), EXIT_SAME);
        assert_eq!(args.exit_code(true), EXIT_DIFF_FOUND);
        args.success = true;
        assert_eq!(args.exit_code(true), EXIT_SAME);
    }

    #[test]
    fn test_run_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let left = dir.path().join("left.txt");
        let right = dir.path().join("right.txt");
        std::fs::write(&left, "l1\nl2\nl3\nl4\n").expect("write left");
        std::fs::write(&right, "l1\nl2\nl3\n").expect("write right");

        let mut args = diff_args(&["--label", "LEFT", "--label", "RIGHT", "x", "y"]);
        args.left = left;
        args.right = right;

        let mut out = Vec::new();
        let differs = run(&args, &mut out).expect("run");
        assert!(differs);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "--- LEFT\n+++ RIGHT\n@@ -1,4 +1,3 @@\n l1\n l2\n l3\n-l4\n"
        );
    }

    #[test]
    fn test_run_reads_stdin_for_dash() {
        let dir = tempfile::tempdir().expect("tempdir");
        let right = dir.path().join("right.txt");
        std::fs::write(&right, "a\nc\n").expect("write right");

        let mut args = diff_args(&["--label", "stdin", "--label", "file", "-", "y"]);
        args.right = right;

        let mut out = Vec::new();
        let differs = run_with_input(&args, &mut "a\nb\n".as_bytes(), &mut out).expect("run");
        assert!(differs);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "--- stdin\n+++ file\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n"
        );
    }

    #[test]
    fn test_run_same_and_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let left = dir.path().join("left.txt");
        let right = dir.path().join("right.txt");
        std::fs::write(&left, "a\n").expect("write left");
        std::fs::write(&right, "a\n").expect("write right");

        let mut args = diff_args(&["x", "y", "--out", "json"]);
        args.left = left;
        args.right = right.clone();

        let mut out = Vec::new();
        assert!(!run(&args, &mut out).expect("run"));
        assert!(out.is_empty());

        std::fs::write(&right, "b\n").expect("rewrite right");
        let differs = run(&args, &mut out).expect("run");
        assert!(differs);
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["patches"][0]["leftStart"], 1);
        assert_eq!(value["patches"][0]["hunks"][0]["kind"], "delete");
    }

    #[test]
    fn test_run_missing_file() {
        let args = diff_args(&["/nonexistent/linepatch/left", "/nonexistent/linepatch/right"]);
        let err = run(&args, &mut Vec::new()).expect_err("missing file");
        assert!(format!("{err:#}").contains("/nonexistent/linepatch/left"));
    }
}
