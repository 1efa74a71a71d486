//! Command-line interface for the extractor.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::batch::{BatchConfig, BatchProcessor, BatchReport};
use crate::core::{ExtractionError, ExtractorError};
use crate::extractor::{ExtractionOutcome, Extracted, Extractor};
use crate::input::resolve_pattern;

const EXAMPLES: &str = "\
Examples:
  zugferd-extractor rechnung.pdf
  zugferd-extractor -v rechnung.pdf
  zugferd-extractor -o ausgabe.xml rechnung.pdf
  zugferd-extractor -o out/ 'invoices/*.pdf'

Supported formats:
  ZUGFeRD 1.0, 2.0, 2.1, 2.3 / Factur-X / XRechnung";

/// ZUGFeRD XML Extractor - pull the embedded invoice XML out of PDF files.
#[derive(Debug, Parser)]
#[command(name = "zugferd-extractor")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// PDF file or glob pattern (quote it to keep the shell from expanding)
    pub input: String,

    /// Verbose diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Output file (single input) or output directory (multiple inputs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads for batch runs (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Errors that terminate the process with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Setup(#[from] ExtractorError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run the CLI.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(&cli)
}

/// Install the fmt subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_tracing(verbose: bool) {
    let default = default_filter(verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(std::io::stdout)
        .try_init();
}

/// Filter directive used when `RUST_LOG` is unset. Advisories such as
/// overwrites are logged at debug level and only show up with `-v`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,zugferd_extractor=debug"
    } else {
        "warn"
    }
}

/// Dispatch an already parsed command line, printing to stdout.
pub fn execute(cli: &Cli) -> Result<(), CliError> {
    execute_with(cli, &mut io::stdout().lock())
}

fn execute_with(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let files = resolve_pattern(&cli.input)?;
    let extractor = Extractor::new();

    if files.len() > 1 {
        let output_dir = cli.output.as_deref().map(prepare_output_dir).transpose()?;
        let mut config = BatchConfig {
            output_dir,
            ..BatchConfig::default()
        };
        if let Some(workers) = cli.workers {
            config.workers = workers;
        }
        let report = BatchProcessor::new(&extractor, config).run(&files, &cli.input)?;
        return print_report(out, &report, cli.json);
    }

    let extracted = extractor.extract(&files[0], cli.output.as_deref())?;
    if cli.json {
        let outcome = ExtractionOutcome::Success(extracted);
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    } else {
        print_extracted(out, &extracted)?;
    }
    Ok(())
}

/// Ensure a batch output path is a directory, creating it when absent.
fn prepare_output_dir(path: &Path) -> Result<PathBuf, ExtractorError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(ExtractorError::OutputNotDirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|source| ExtractorError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}

fn print_extracted(out: &mut impl Write, extracted: &Extracted) -> io::Result<()> {
    writeln!(
        out,
        "XML extracted: {} -> {} ({} bytes, {})",
        extracted.input.display(),
        extracted.output_path.display(),
        extracted.byte_len,
        extracted.flavor
    )
}

fn print_report(out: &mut impl Write, report: &BatchReport, json: bool) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        return Ok(());
    }

    writeln!(out, "Found {} PDF files to process", report.processed())?;
    for outcome in &report.outcomes {
        match outcome {
            ExtractionOutcome::Success(extracted) => writeln!(
                out,
                "✅ {} -> {}",
                extracted.input.display(),
                extracted.output_path.display()
            )?,
            ExtractionOutcome::Failure {
                input,
                stage,
                detail,
                ..
            } => writeln!(out, "❌ {} ({stage}): {detail}", input.display())?,
        }
    }
    writeln!(
        out,
        "\nBatch finished: {} succeeded, {} failed",
        report.succeeded, report.failed
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::sync::{Arc, Mutex};

    /// Shared buffer the fmt subscriber writes log lines into.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::parse_from(["zugferd-extractor", "-v", "-o", "out.xml", "-j", "3", "a.pdf"]);
        assert!(cli.verbose);
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.xml")));
        assert_eq!(cli.workers, Some(3));
        assert_eq!(cli.input, "a.pdf");
        assert!(!cli.json);
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["zugferd-extractor", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["zugferd-extractor", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/nested");
        assert_eq!(prepare_output_dir(&target).unwrap(), target);
        assert!(target.is_dir());
    }

    #[test]
    fn output_file_is_rejected_for_batches() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.xml");
        fs::write(&file, b"").unwrap();
        let err = prepare_output_dir(&file).unwrap_err();
        assert!(matches!(err, ExtractorError::OutputNotDirectory(_)));
    }

    #[test]
    fn batch_with_output_file_fails_before_work() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.pdf"] {
            fs::write(dir.path().join(name), b"%PDF-1.4").unwrap();
        }
        let file = dir.path().join("taken");
        fs::write(&file, b"").unwrap();

        let cli = Cli::parse_from([
            "zugferd-extractor".to_string(),
            "-o".to_string(),
            file.display().to_string(),
            format!("{}/*.pdf", dir.path().display()),
        ]);
        let err = execute(&cli).unwrap_err();
        assert!(matches!(
            err,
            CliError::Setup(ExtractorError::OutputNotDirectory(_))
        ));
    }

    #[test]
    fn quiet_rerun_prints_only_the_success_line() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.pdf");
        fs::write(
            &raw,
            b"<?xml version=\"1.0\"?><rsm:CrossIndustryInvoice>factur-x</rsm:CrossIndustryInvoice>\n%%EOF",
        )
        .unwrap();
        let target = dir.path().join("out.xml");
        let cli = Cli::parse_from([
            "zugferd-extractor".to_string(),
            "-o".to_string(),
            target.display().to_string(),
            raw.display().to_string(),
        ]);

        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(default_filter(false)))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut first = Vec::new();
        let mut second = Vec::new();
        tracing::subscriber::with_default(subscriber, || {
            execute_with(&cli, &mut first).unwrap();
            execute_with(&cli, &mut second).unwrap();
        });

        assert!(target.is_file());
        assert_eq!(logs.text(), "");
        let stdout = String::from_utf8(second).unwrap();
        let lines: Vec<_> = stdout.lines().collect();
        assert_eq!(lines.len(), 1, "{stdout}");
        assert!(lines[0].starts_with("XML extracted:"), "{stdout}");
        assert_eq!(String::from_utf8(first).unwrap().lines().count(), 1);
    }

    #[test]
    fn verbose_filter_enables_crate_debug() {
        assert_eq!(default_filter(true), "warn,zugferd_extractor=debug");
        assert_eq!(default_filter(false), "warn");
    }
}
