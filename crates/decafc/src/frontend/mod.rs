//! Decaf frontend
//!
//! The frontend is responsible for:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into an AST
//! 3. Semantic analysis (scopes, name resolution, type checking)

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

use std::fmt::Write as _;

use tracing::info;

use crate::common::{CompileResult, DiagnosticReporter};

pub use ast::Program;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use sema::{Diagnostic, SemanticAnalyzer};

/// Configuration options passed to the frontend
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    /// Print the token listing to stderr before parsing
    pub dump_tokens: bool,
    /// Print the AST to stderr before analysis
    pub dump_ast: bool,
    /// Print a one-line summary after analysis
    pub verbose: bool,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self {
            filename,
            file_id,
            reporter,
        }
    }
}

/// Decaf language frontend
pub struct DecafFrontend;

impl DecafFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Run lexing, parsing and semantic analysis.
    ///
    /// Lexer and parser errors are fatal: they are reported through the
    /// context and returned. Semantic problems come back as diagnostics.
    pub fn check(
        &self,
        source: &str,
        ctx: &CompileContext,
        config: &FrontendConfig,
    ) -> CompileResult<Vec<Diagnostic>> {
        // Phase 1: Lexing (optional token dump)
        if config.dump_tokens {
            match self.scan(source) {
                Ok(listing) => {
                    eprintln!("=== Tokens ===");
                    eprint!("{}", listing);
                    eprintln!("=== End Tokens ===\n");
                }
                Err(e) => {
                    ctx.reporter.report_error(ctx.file_id, &e);
                    return Err(e);
                }
            }
        }

        // Phase 2: Parsing
        let program = match self.parse(source) {
            Ok(program) => program,
            Err(e) => {
                ctx.reporter.report_error(ctx.file_id, &e);
                return Err(e);
            }
        };

        if config.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{:#?}", program);
            eprintln!("=== End AST ===\n");
        }

        // Phase 3: Semantic analysis
        let diagnostics = self.analyze(&program);
        if config.verbose {
            eprintln!(
                "{}: {} semantic error(s) in class {}",
                ctx.filename,
                diagnostics.len(),
                program.name
            );
        }
        Ok(diagnostics)
    }

    /// Token listing, one `<line>[ <CLASS>] <text>` line per token
    pub fn scan(&self, source: &str) -> CompileResult<String> {
        info!("scanning");
        let tokens = Lexer::new(source).tokenize_all()?;

        let mut output = String::new();
        for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
            let text = &source[token.span.start..token.span.end];
            let _ = match token.kind.scan_class() {
                Some(class) => writeln!(output, "{} {} {}", token.span.line, class, text),
                None => writeln!(output, "{} {}", token.span.line, text),
            };
        }
        Ok(output)
    }

    pub fn parse(&self, source: &str) -> CompileResult<Program> {
        info!("parsing");
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    pub fn analyze(&self, program: &Program) -> Vec<Diagnostic> {
        info!("analyzing");
        SemanticAnalyzer::new().analyze(program)
    }

    pub fn dump_ast(&self, source: &str) -> CompileResult<String> {
        let program = self.parse(source)?;
        Ok(format!("{:#?}", program))
    }
}

impl Default for DecafFrontend {
    fn default() -> Self {
        Self::new()
    }
}
