//! decafc - scanner, parser and semantic checker for Decaf
//!
//! Usage: decafc [OPTIONS] [INPUT]

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use decaf_compiler::common::{CompileResult, DiagnosticReporter, DiagnosticStyle};
use decaf_compiler::driver::{Pipeline, StageOutput, Target};
use decaf_compiler::frontend::{CompileContext, FrontendConfig};
use tracing_subscriber::EnvFilter;

/// Stage to stop after
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum TargetArg {
    /// Print the token listing
    Scan,
    /// Print the syntax tree
    Parse,
    /// Run semantic analysis
    #[default]
    Inter,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Scan => Target::Scan,
            TargetArg::Parse => Target::Parse,
            TargetArg::Inter => Target::Inter,
        }
    }
}

/// Diagnostic output format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Format {
    /// `Error line: <n>. <message>`
    #[default]
    Plain,
    /// Annotated source snippets
    Pretty,
}

#[derive(ClapParser, Debug)]
#[command(name = "decafc")]
#[command(author = "Decaf Tools Team")]
#[command(version)]
#[command(about = "Scanner, parser and semantic checker for the Decaf language", long_about = None)]
struct Args {
    /// Input source file; standard input is read when omitted
    input: Option<PathBuf>,

    /// Compiler stage to run
    #[arg(short, long, value_enum, default_value = "inter")]
    target: TargetArg,

    /// Diagnostic format
    #[arg(long, value_enum, default_value = "plain")]
    format: Format,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump AST to stderr (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens to stderr (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Log to stderr when DECAF_LOG is set, or at info level with --verbose
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_env("DECAF_LOG") {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("info"),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether the input passed the selected stage without errors
fn run(args: &Args) -> anyhow::Result<bool> {
    let (filename, source) = match &args.input {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            (path.display().to_string(), source)
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("cannot read standard input")?;
            ("<stdin>".to_string(), source)
        }
    };

    let style = match args.format {
        Format::Plain => DiagnosticStyle::Plain,
        Format::Pretty => DiagnosticStyle::Pretty,
    };
    let mut reporter = DiagnosticReporter::with_style(style);
    let file_id = reporter.add_file(&filename, &source);

    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };
    let ctx = CompileContext::new(filename, file_id, &reporter);

    let output = Pipeline::new().run(args.target.into(), &source, &ctx, &config);
    let passed = emit(output, &reporter, file_id, &mut io::stdout().lock())
        .context("cannot write output")?;
    Ok(passed)
}

/// Print a stage's output and return whether it was free of errors.
///
/// Fatal compile errors have already been rendered by the pipeline, so they
/// only turn into a failing status here.
fn emit(
    output: CompileResult<StageOutput>,
    reporter: &DiagnosticReporter,
    file_id: usize,
    out: &mut dyn Write,
) -> io::Result<bool> {
    let output = match output {
        Ok(output) => output,
        Err(_) => return Ok(false),
    };
    match &output {
        StageOutput::Listing(text) => write!(out, "{}", text)?,
        StageOutput::Diagnostics(diagnostics) => {
            for diagnostic in diagnostics {
                reporter.report_diagnostic(file_id, diagnostic);
            }
        }
    }
    Ok(!output.has_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaf_compiler::common::{CompileError, Span};
    use decaf_compiler::frontend::sema::{Diagnostic, ErrorKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fatal_error_is_not_printed_again() {
        let reporter = DiagnosticReporter::new();
        let mut out = Vec::new();
        let err = CompileError::parser("expected ';', found '}'", Span::new(5, 6, 1));

        let passed = emit(Err(err), &reporter, 0, &mut out).unwrap();
        assert!(!passed);
        assert!(out.is_empty());
    }

    #[test]
    fn test_listing_goes_to_output() {
        let reporter = DiagnosticReporter::new();
        let mut out = Vec::new();
        let listing = StageOutput::Listing("1 class\n".to_string());

        let passed = emit(Ok(listing), &reporter, 0, &mut out).unwrap();
        assert!(passed);
        assert_eq!(String::from_utf8(out).unwrap(), "1 class\n");
    }

    #[test]
    fn test_diagnostics_fail_the_run() {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("p.dcf", "class P { }");
        let diagnostics = vec![Diagnostic::new(
            ErrorKind::MissingMain,
            "No method named 'main' declared",
            Span::new(10, 11, 1),
        )];
        let mut out = Vec::new();

        let passed = emit(Ok(StageOutput::Diagnostics(diagnostics)), &reporter, file_id, &mut out).unwrap();
        assert!(!passed);
        assert!(out.is_empty());

        let clean = emit(Ok(StageOutput::Diagnostics(Vec::new())), &reporter, file_id, &mut out).unwrap();
        assert!(clean);
    }
}
