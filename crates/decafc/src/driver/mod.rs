//! Compilation driver and stage selection

use tracing::info;

use crate::common::CompileResult;
use crate::frontend::{CompileContext, DecafFrontend, Diagnostic, FrontendConfig};

/// Last stage to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Token listing
    Scan,
    /// Syntax tree dump
    Parse,
    /// Semantic analysis
    #[default]
    Inter,
}

/// What a stage produced
#[derive(Debug)]
pub enum StageOutput {
    /// Text for stdout
    Listing(String),
    /// Semantic diagnostics, in discovery order
    Diagnostics(Vec<Diagnostic>),
}

impl StageOutput {
    /// True when the run should exit with a failure status
    pub fn has_errors(&self) -> bool {
        matches!(self, StageOutput::Diagnostics(diags) if !diags.is_empty())
    }
}

/// Compilation pipeline running the frontend up to a target stage
pub struct Pipeline {
    frontend: DecafFrontend,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            frontend: DecafFrontend::new(),
        }
    }

    pub fn frontend(&self) -> &DecafFrontend {
        &self.frontend
    }

    /// Run `source` through the stages up to `target`.
    ///
    /// Fatal errors are reported through the context before being returned.
    pub fn run(
        &self,
        target: Target,
        source: &str,
        ctx: &CompileContext,
        config: &FrontendConfig,
    ) -> CompileResult<StageOutput> {
        info!(file = %ctx.filename, ?target, "running pipeline");

        let output = match target {
            Target::Scan => self.frontend.scan(source).map(StageOutput::Listing),
            Target::Parse => self.frontend.dump_ast(source).map(StageOutput::Listing),
            Target::Inter => {
                return self
                    .frontend
                    .check(source, ctx, config)
                    .map(StageOutput::Diagnostics);
            }
        };

        if let Err(e) = &output {
            ctx.reporter.report_error(ctx.file_id, e);
        }
        output
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CompileError, DiagnosticReporter};
    use crate::frontend::sema::ErrorKind;
    use pretty_assertions::assert_eq;

    fn run(target: Target, source: &str) -> CompileResult<StageOutput> {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file("test.dcf", source);
        let ctx = CompileContext::new("test.dcf".to_string(), file_id, &reporter);
        Pipeline::new().run(target, source, &ctx, &FrontendConfig::default())
    }

    #[test]
    fn test_scan_target() {
        match run(Target::Scan, "class P {}").unwrap() {
            StageOutput::Listing(text) => assert_eq!(text, "1 class\n1 IDENTIFIER P\n1 {\n1 }\n"),
            other => panic!("expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_does_not_need_valid_syntax() {
        let output = run(Target::Scan, "} x class").unwrap();
        assert!(!output.has_errors());
    }

    #[test]
    fn test_parse_target_dumps_ast() {
        match run(Target::Parse, "class Prog { void main() {} }").unwrap() {
            StageOutput::Listing(text) => {
                assert!(text.starts_with("Program {"));
                assert!(text.contains("\"Prog\""));
                assert!(text.contains("\"main\""));
            }
            other => panic!("expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_inter_target() {
        let output = run(Target::Inter, "class P { int a[0]; void main() {} }").unwrap();
        assert!(output.has_errors());
        match output {
            StageOutput::Diagnostics(diags) => {
                let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
                assert_eq!(kinds, vec![ErrorKind::InvalidArraySize]);
            }
            other => panic!("expected diagnostics, got {:?}", other),
        }

        let clean = run(Target::Inter, "class P { void main() {} }").unwrap();
        assert!(!clean.has_errors());
    }

    #[test]
    fn test_lexer_error_is_fatal_for_every_target() {
        for target in [Target::Scan, Target::Parse, Target::Inter] {
            let err = run(target, "class P { # }").unwrap_err();
            assert!(matches!(err, CompileError::Lexer { .. }), "{:?}", target);
        }
    }
}
