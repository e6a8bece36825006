//! Error types and diagnostic reporting


use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream, WriteColor};
use thiserror::Error;

use super::Span;
use crate::frontend::sema::Diagnostic;

/// Fatal error that stops the pipeline before semantic analysis
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at line {}: {message}", span.line)]
    Lexer { message: String, span: Span },

    #[error("Parser error at line {}: {message}", span.line)]
    Parser { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. } | Self::Parser { span, .. } => Some(*span),
            Self::Io(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// How semantic diagnostics are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticStyle {
    /// One `Error line: <n>. <message>` line per diagnostic
    #[default]
    Plain,
    /// Source snippet with labels
    Pretty,
}

/// Diagnostic reporter for error output on stderr
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
    style: DiagnosticStyle,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_style(DiagnosticStyle::default())
    }

    pub fn with_style(style: DiagnosticStyle) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
            style,
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let report = match error {
            CompileError::Lexer { message, span } => Report::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Parser { message, span } => Report::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Io(err) => {
                Report::error().with_message(format!("IO error: {}", err))
            }
        };

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }

    /// Print one semantic diagnostic in the configured style
    pub fn report_diagnostic(&self, file_id: usize, diagnostic: &Diagnostic) {
        let mut out = self.writer.lock();
        self.write_diagnostic(&mut out, file_id, diagnostic);
    }

    /// Render a semantic diagnostic without colors, for logs and tests
    pub fn render(&self, file_id: usize, diagnostic: &Diagnostic) -> String {
        let mut buffer = Buffer::no_color();
        self.write_diagnostic(&mut buffer, file_id, diagnostic);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    fn write_diagnostic(&self, out: &mut dyn WriteColor, file_id: usize, diagnostic: &Diagnostic) {
        match self.style {
            DiagnosticStyle::Plain => {
                let _ = writeln!(out, "{}", diagnostic);
            }
            DiagnosticStyle::Pretty => {
                let span = diagnostic.span;
                let report = Report::error()
                    .with_message(diagnostic.message.clone())
                    .with_code(diagnostic.kind.code())
                    .with_labels(vec![
                        Label::primary(file_id, span.start..span.end)
                            .with_message(diagnostic.kind.to_string())
                    ]);
                let _ = term::emit(out, &self.config, &self.files, &report);
            }
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
