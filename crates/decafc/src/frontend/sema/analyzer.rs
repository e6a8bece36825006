//! Semantic analyzer - name resolution and type checking
//!
//! One depth-first walk over the program. Every problem found becomes a
//! [`Diagnostic`] and the walk carries on with a best-effort type, so a single
//! run reports as much as possible.

use tracing::debug;

use super::diagnostic::{Diagnostic, ErrorKind};
use super::scope::{ScopeId, Scopes};
use super::symbol::{Symbol, array_length};
use super::types::Type;
use crate::common::Span;
use crate::frontend::ast::*;

/// State for the method whose body is being walked
#[derive(Debug)]
struct MethodContext {
    name: String,
    return_type: Type,
    /// Set by any `return` in the body, reachable or not
    has_return: bool,
}

/// Semantic analyzer for a single program
pub struct SemanticAnalyzer {
    scopes: Scopes,
    diagnostics: Vec<Diagnostic>,
    found_main: bool,
    method: Option<MethodContext>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scopes: Scopes::new(),
            diagnostics: Vec::new(),
            found_main: false,
            method: None,
        }
    }

    /// Analyze a program and return its diagnostics in discovery order
    #[tracing::instrument(skip_all, fields(program = %program.name))]
    pub fn analyze(mut self, program: &Program) -> Vec<Diagnostic> {
        for field in &program.fields {
            self.analyze_field_decl(field);
        }
        for method in &program.methods {
            self.analyze_method_decl(method);
        }

        if !self.found_main {
            self.report(
                ErrorKind::MissingMain,
                "No method named 'main' declared",
                program.close_span,
            );
        }

        debug!(diagnostics = self.diagnostics.len(), "analysis finished");
        self.diagnostics
    }

    fn analyze_field_decl(&mut self, field: &FieldDecl) {
        for decl in &field.names {
            let symbol = match &decl.array_len {
                Some(len) => {
                    if array_length(len).is_none() {
                        self.report(
                            ErrorKind::InvalidArraySize,
                            format!("Invalid size {} for array '{}'", len, decl.name),
                            decl.span,
                        );
                    }
                    // Registered even when the size is bad
                    Symbol::array(&decl.name.name, decl.name.span)
                }
                None => Symbol::new(&decl.name.name, Type::from(field.ty), decl.name.span),
            };
            self.declare(symbol);
        }
    }

    fn analyze_method_decl(&mut self, method: &MethodDecl) {
        let name = &method.name.name;
        if name == "main" {
            self.found_main = true;
        }

        let return_type = method.return_type.map_or(Type::Void, Type::from);
        let params = method.params.iter().map(|p| Type::from(p.ty)).collect();
        self.declare(Symbol::method(name, return_type.clone(), params, method.name.span));

        debug!(method = %name, "enter method");
        self.scopes.push();
        for param in &method.params {
            self.declare(Symbol::new(&param.name.name, Type::from(param.ty), param.name.span));
        }

        self.method = Some(MethodContext {
            name: name.clone(),
            return_type,
            has_return: false,
        });
        self.analyze_block(&method.body);
        self.scopes.pop();

        if let Some(ctx) = self.method.take() {
            if !ctx.return_type.is_void() && !ctx.has_return {
                self.report(
                    ErrorKind::MissingReturn,
                    format!("Method '{}' must have a return statement", ctx.name),
                    method.body.close_span,
                );
            }
        }
        debug!(method = %name, "exit method");
    }

    fn analyze_block(&mut self, block: &Block) {
        self.scopes.push();

        for decl in &block.var_decls {
            for name in &decl.names {
                self.declare(Symbol::new(&name.name, Type::from(decl.ty), name.span));
            }
        }
        for stmt in &block.statements {
            self.analyze_stmt(stmt);
        }

        self.scopes.pop();
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign { location, op, value } => {
                self.analyze_assign(location, *op, value, stmt.span);
            }
            StmtKind::Call(call) => {
                self.check_call(call);
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                let ty = self.infer_expr(condition);
                if !ty.matches(&Type::Boolean) {
                    self.report(
                        ErrorKind::ConditionNotBoolean,
                        format!("If condition '{}' must be boolean, found {}", condition, ty),
                        stmt.span,
                    );
                }
                self.analyze_block(then_block);
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block);
                }
            }
            StmtKind::For {
                var,
                start,
                end,
                body,
            } => self.analyze_for(var, start, end, body),
            StmtKind::Return(value) => self.analyze_return(value.as_ref(), stmt.span),
            // Not checked against an enclosing loop
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::Block(block) => self.analyze_block(block),
        }
    }

    fn analyze_assign(&mut self, location: &Location, op: AssignOp, value: &Expr, span: Span) {
        let target = self.resolve_location(location);
        let value_ty = self.infer_expr(value);

        // Type checks only apply once the target resolved
        if let Some(target_ty) = target {
            self.check_assign_types(location, op, &target_ty, &value_ty, span);
        }

        if location.is_indexed() && value_ty == Type::IntArray {
            self.report(
                ErrorKind::NestedArrayAssignment,
                format!(
                    "Cannot store array '{}' in an element of '{}', arrays do not nest",
                    value, location.name
                ),
                span,
            );
        }
    }

    fn check_assign_types(
        &mut self,
        location: &Location,
        op: AssignOp,
        target_ty: &Type,
        value_ty: &Type,
        span: Span,
    ) {
        if !target_ty.matches(value_ty) {
            self.report(
                ErrorKind::AssignmentTypeMismatch,
                format!(
                    "Type mismatch, cannot assign {} to '{}' of type {}",
                    value_ty, location, target_ty
                ),
                span,
            );
        }

        if op.is_compound() && !(target_ty.matches(&Type::Int) && value_ty.matches(&Type::Int)) {
            self.report(
                ErrorKind::CompoundAssignmentTypeMismatch,
                format!(
                    "Both operands of '{}' must be int, found {} and {}",
                    op, target_ty, value_ty
                ),
                span,
            );
        }
    }

    fn analyze_for(&mut self, var: &Ident, start: &Expr, end: &Expr, body: &Block) {
        for bound in [start, end] {
            let ty = self.infer_expr(bound);
            if !ty.matches(&Type::Int) {
                self.report(
                    ErrorKind::LoopBoundTypeMismatch,
                    format!("For loop bound '{}' must be int, found {}", bound, ty),
                    bound.span,
                );
            }
        }

        // The induction variable lives in a scope wrapping the body
        self.scopes.push();
        if self.scopes.resolve(&var.name).is_none() {
            self.declare(Symbol::new(&var.name, Type::Int, var.span));
        }
        self.analyze_block(body);
        self.scopes.pop();
    }

    fn analyze_return(&mut self, value: Option<&Expr>, span: Span) {
        let found = value.map(|expr| self.infer_expr(expr));

        let Some(method) = self.method.as_mut() else {
            unreachable!("return statement outside of a method body");
        };
        method.has_return = true;
        let name = method.name.clone();
        let expected = method.return_type.clone();

        if expected.is_void() {
            if found.is_some() {
                self.report(
                    ErrorKind::ReturnFromVoid,
                    format!("Method '{}' is void and cannot return a value", name),
                    span,
                );
            }
            return;
        }

        let found = found.unwrap_or(Type::Void);
        if !found.matches(&expected) {
            self.report(
                ErrorKind::ReturnTypeMismatch,
                format!("Method '{}' must return {}, found {}", name, expected, found),
                span,
            );
        }
    }

    /// Type of a location, or `None` if its name is undeclared.
    ///
    /// An index expression is checked to be int whether or not the base resolves.
    fn resolve_location(&mut self, location: &Location) -> Option<Type> {
        let base = self.scopes.resolve(&location.name.name).map(|sym| sym.ty.clone());
        if base.is_none() {
            self.report(
                ErrorKind::UndeclaredVariable,
                format!("Variable '{}' used and not declared", location.name),
                location.name.span,
            );
        }

        let Some(index) = &location.index else {
            return base;
        };
        let index_ty = self.infer_expr(index);
        if !index_ty.matches(&Type::Int) {
            self.report(
                ErrorKind::ArrayIndexTypeMismatch,
                format!(
                    "Index '{}' of array '{}' must be int, found {}",
                    index, location.name, index_ty
                ),
                index.span,
            );
        }
        base.map(|ty| ty.element())
    }

    fn infer_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Location(location) => self.resolve_location(location).unwrap_or(Type::Unknown),
            ExprKind::Call(call) => self.check_call(call),
            ExprKind::Literal(Literal::Int(_)) => Type::Int,
            // Char literals have no type of their own
            ExprKind::Literal(Literal::Bool(_) | Literal::Char(_)) => Type::Boolean,
            ExprKind::Unary { op, operand } => {
                // Operands are walked for their own diagnostics only
                self.infer_expr(operand);
                match op {
                    UnaryOp::Neg => Type::Int,
                    UnaryOp::Not => Type::Boolean,
                }
            }
            ExprKind::Binary { op, left, right } => self.infer_binary(*op, left, right, expr.span),
            ExprKind::Paren(inner) => self.infer_expr(inner),
        }
    }

    fn infer_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, span: Span) -> Type {
        let lhs = self.infer_expr(left);
        let rhs = self.infer_expr(right);
        let both = |ty: &Type| lhs.matches(ty) && rhs.matches(ty);

        let (ok, kind, requirement, result) = match op.class() {
            OpClass::StrongArith | OpClass::WeakArith => (
                both(&Type::Int),
                ErrorKind::ArithmeticTypeMismatch,
                "operands must both be int",
                Type::Int,
            ),
            OpClass::Relational => (
                both(&Type::Int),
                ErrorKind::RelationalTypeMismatch,
                "operands must both be int",
                Type::Boolean,
            ),
            OpClass::Conditional => (
                both(&Type::Boolean),
                ErrorKind::ConditionalTypeMismatch,
                "operands must both be boolean",
                Type::Boolean,
            ),
            OpClass::Equality => (
                lhs.matches(&rhs),
                ErrorKind::EqualityTypeMismatch,
                "operands must have the same type",
                Type::Boolean,
            ),
        };

        if !ok {
            self.report(
                kind,
                format!(
                    "Type mismatch, cannot apply '{}' to {}({}) and {}({}); {}",
                    op.symbol(),
                    left,
                    lhs,
                    right,
                    rhs,
                    requirement
                ),
                span,
            );
        }
        result
    }

    /// Check a call site and return the type it evaluates to
    fn check_call(&mut self, call: &MethodCall) -> Type {
        let (name, args) = match &call.kind {
            CallKind::Callout { args, .. } => {
                // Foreign calls are untyped: no arity or argument checks
                for arg in args {
                    if let CalloutArg::Expr(expr) = arg {
                        self.infer_expr(expr);
                    }
                }
                return Type::Int;
            }
            CallKind::User { name, args } => (name, args),
        };

        let arg_types: Vec<Type> = args.iter().map(|arg| self.infer_expr(arg)).collect();

        // Methods only live in the program scope
        let signature = match self.scopes.lookup(ScopeId::ROOT, &name.name) {
            Some(Symbol {
                ty: Type::Method {
                    return_type,
                    params,
                },
                ..
            }) => Some((return_type.as_ref().clone(), params.clone())),
            _ => None,
        };
        let Some((return_type, params)) = signature else {
            self.report(
                ErrorKind::UndeclaredMethod,
                format!("Method '{}' used and not declared", name),
                name.span,
            );
            return Type::Unknown;
        };

        if arg_types.len() != params.len() {
            self.report(
                ErrorKind::ArityMismatch,
                format!(
                    "Method '{}' expects {} argument(s), found {}",
                    name,
                    params.len(),
                    arg_types.len()
                ),
                call.span,
            );
            return return_type;
        }

        for (position, ((arg, found), expected)) in args.iter().zip(&arg_types).zip(&params).enumerate() {
            if !found.matches(expected) {
                self.report(
                    ErrorKind::ArgumentTypeMismatch,
                    format!(
                        "Argument {} of '{}' must be {}, found {}",
                        position + 1,
                        name,
                        expected,
                        found
                    ),
                    arg.span,
                );
            }
        }
        return_type
    }

    fn declare(&mut self, symbol: Symbol) {
        let span = symbol.span;
        if let Err(err) = self.scopes.declare_current(symbol) {
            self.report(ErrorKind::DuplicateDeclaration, err.to_string(), span);
        }
    }

    fn report(&mut self, kind: ErrorKind, message: impl Into<String>, span: Span) {
        let diagnostic = Diagnostic::new(kind, message, span);
        debug!(line = diagnostic.line, %kind, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> Vec<Diagnostic> {
        let program = Parser::new(source).unwrap().parse().unwrap();
        SemanticAnalyzer::new().analyze(&program)
    }

    fn kinds(source: &str) -> Vec<ErrorKind> {
        check(source).into_iter().map(|d| d.kind).collect()
    }

    fn messages(source: &str) -> Vec<String> {
        check(source).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_scenario_a_clean_program() {
        assert_eq!(kinds("class P { int x; void main(){ x = 3; } }"), vec![]);
    }

    #[test]
    fn test_scenario_b_duplicate_field() {
        assert_eq!(
            kinds("class P { int x, x; void main(){} }"),
            vec![ErrorKind::DuplicateDeclaration]
        );
    }

    #[test]
    fn test_scenario_c_boolean_condition() {
        assert_eq!(kinds("class P { boolean b; void main(){ if (b) {} } }"), vec![]);
    }

    #[test]
    fn test_scenario_d_zero_array_size() {
        assert_eq!(
            kinds("class P { int a[0]; void main(){} }"),
            vec![ErrorKind::InvalidArraySize]
        );
    }

    #[test]
    fn test_scenario_e_missing_return() {
        assert_eq!(
            messages("class P { int f(){ } void main(){} }"),
            vec!["Error line: 1. Method 'f' must have a return statement".to_string()]
        );
    }

    #[test]
    fn test_scenario_f_assignment_mismatch() {
        assert_eq!(
            messages("class P { void main(){ int y; y = true; } }"),
            vec!["Error line: 1. Type mismatch, cannot assign boolean to 'y' of type int".to_string()]
        );
    }

    #[test]
    fn test_duplicate_keeps_first_binding() {
        // `x` stays int, so the assignment is fine
        let source = "class P { int x; boolean x; void main(){ x = 3; } }";
        assert_eq!(kinds(source), vec![ErrorKind::DuplicateDeclaration]);
    }

    #[test]
    fn test_local_cannot_shadow_field() {
        let source = "class P { int x; void main(){ boolean x; x = 1; } }";
        assert_eq!(kinds(source), vec![ErrorKind::DuplicateDeclaration]);
    }

    #[test]
    fn test_param_cannot_shadow_field() {
        let source = "class P { int x; void f(int x){} void main(){} }";
        assert_eq!(kinds(source), vec![ErrorKind::DuplicateDeclaration]);
    }

    #[test]
    fn test_duplicate_method() {
        let source = "class P { void f(){} int f(){ return 1; } void main(){} }";
        assert_eq!(kinds(source), vec![ErrorKind::DuplicateDeclaration]);
    }

    #[test]
    fn test_block_locals_do_not_escape() {
        let source = "class P { void main(){ { int t; t = 1; } t = 2; } }";
        assert_eq!(
            messages(source),
            vec!["Error line: 1. Variable 't' used and not declared".to_string()]
        );
    }

    #[test]
    fn test_sibling_blocks_reuse_names() {
        let source = "class P { void main(){ { int t; t = 1; } { boolean t; t = true; } } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_params_resolve_in_body() {
        let source = "class P { int add(int a, int b){ return a + b; } void main(){} }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_undeclared_in_expression_reported_once() {
        let source = "class P { void main(){ int a; a = a + y; } }";
        assert_eq!(kinds(source), vec![ErrorKind::UndeclaredVariable]);
    }

    #[test]
    fn test_undeclared_target_skips_type_checks() {
        let source = "class P { void main(){ z = true; } }";
        assert_eq!(kinds(source), vec![ErrorKind::UndeclaredVariable]);
    }

    #[test]
    fn test_undeclared_compound_target_reported_once() {
        let source = "class P { void main(){ z += true; } }";
        assert_eq!(kinds(source), vec![ErrorKind::UndeclaredVariable]);
    }

    #[test]
    fn test_undeclared_array_target_still_checks_index_and_nesting() {
        let source = "class P { int b[5]; void main(){ z[true] = b; } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::UndeclaredVariable,
                ErrorKind::ArrayIndexTypeMismatch,
                ErrorKind::NestedArrayAssignment,
            ]
        );
    }

    #[test]
    fn test_int_operands_never_report() {
        let source = "class P { void main(){ int a, b; boolean c;
            a = a * b; a = a / b; a = a % b; a = a + b; a = a - b;
            c = a < b; c = a > b; c = a <= b; c = a >= b; } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_arithmetic_mismatch() {
        let source = "class P { void main(){ int a; boolean b; a = a + b; } }";
        assert_eq!(
            messages(source),
            vec![
                "Error line: 1. Type mismatch, cannot apply '+' to a(int) and b(boolean); operands must both be int"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_relational_conditional_and_equality_mismatch() {
        let source = "class P { void main(){ int a; boolean c;
            c = a < c;
            c = a && c;
            c = a == c;
            c = a == a; c = c != c; c = c || c; } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::RelationalTypeMismatch,
                ErrorKind::ConditionalTypeMismatch,
                ErrorKind::EqualityTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_nested_mismatch_reports_each_site_once() {
        // Inner `+` is int either way, the outer `<` sees int and int
        let source = "class P { void main(){ boolean b, c; c = (b + 1) < 2; } }";
        assert_eq!(kinds(source), vec![ErrorKind::ArithmeticTypeMismatch]);
    }

    #[test]
    fn test_literal_and_unary_types() {
        let source = "class P { void main(){ int a; boolean b;
            b = 'c';
            b = !a;
            a = -b;
            a = (3); } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_compound_assignment_requires_int() {
        let source = "class P { void main(){ int a; boolean b; a += 1; a -= 0x2; b += true; } }";
        assert_eq!(kinds(source), vec![ErrorKind::CompoundAssignmentTypeMismatch]);
    }

    #[test]
    fn test_compound_with_wrong_value_reports_both() {
        let source = "class P { void main(){ int a; a += true; } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::AssignmentTypeMismatch,
                ErrorKind::CompoundAssignmentTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_array_element_access() {
        let source = "class P { int a[10]; void main(){ int i; a[i] = 1; i = a[2] + a[i]; } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_array_index_must_be_int() {
        let source = "class P { int a[10]; void main(){ int i; a[true] = 1; i = a[false]; } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::ArrayIndexTypeMismatch,
                ErrorKind::ArrayIndexTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_arrays_do_not_nest() {
        let source = "class P { int a[10], b[5]; void main(){ a[1] = b; } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::AssignmentTypeMismatch,
                ErrorKind::NestedArrayAssignment,
            ]
        );
    }

    #[test]
    fn test_whole_array_assignment_mismatch() {
        let source = "class P { int a[10]; void main(){ a = 1; } }";
        assert_eq!(kinds(source), vec![ErrorKind::AssignmentTypeMismatch]);
    }

    #[test]
    fn test_array_sizes() {
        let source = "class P { int a[0x10], b[1], c[0x0], d[99999999999]; void main(){} }";
        assert_eq!(
            kinds(source),
            vec![ErrorKind::InvalidArraySize, ErrorKind::InvalidArraySize]
        );
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        let source = "class P { void main(){ int a; if (a) { } else { a = 1; } } }";
        assert_eq!(
            messages(source),
            vec!["Error line: 1. If condition 'a' must be boolean, found int".to_string()]
        );
    }

    #[test]
    fn test_for_bounds_checked_independently() {
        let ok = "class P { void main(){ int n; for i = 0, n { n = i; } } }";
        assert_eq!(kinds(ok), vec![]);

        let first = "class P { void main(){ for i = true, 10 { } } }";
        assert_eq!(kinds(first), vec![ErrorKind::LoopBoundTypeMismatch]);

        let second = "class P { void main(){ for i = 0, false { } } }";
        assert_eq!(kinds(second), vec![ErrorKind::LoopBoundTypeMismatch]);

        let both = "class P { void main(){ for i = true, false { } } }";
        assert_eq!(
            kinds(both),
            vec![
                ErrorKind::LoopBoundTypeMismatch,
                ErrorKind::LoopBoundTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_loop_variable_scoped_to_loop() {
        let source = "class P { void main(){ for i = 0, 10 { break; } i = 1; } }";
        assert_eq!(kinds(source), vec![ErrorKind::UndeclaredVariable]);
    }

    #[test]
    fn test_loop_reuses_visible_variable() {
        let source = "class P { void main(){ int i; for i = 0, 10 { continue; } i = 1; } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_break_and_continue_outside_loop_accepted() {
        let source = "class P { void main(){ break; continue; } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_return_anywhere_satisfies_method() {
        let source = "class P { int f(){ if (true) { return 1; } } void main(){} }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_return_checks() {
        let source = "class P {
            void v(){ return 1; }
            int f(){ return true; }
            boolean g(){ return; }
            void main(){ return; }
        }";
        assert_eq!(
            messages(source),
            vec![
                "Error line: 2. Method 'v' is void and cannot return a value".to_string(),
                "Error line: 3. Method 'f' must return int, found boolean".to_string(),
                "Error line: 4. Method 'g' must return boolean, found void".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_return_reported_at_closing_brace() {
        let source = "class P {\n  int f() {\n    int x;\n  }\n  void main() {}\n}";
        let diags = check(source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, ErrorKind::MissingReturn);
        assert_eq!(diags[0].line, 4);
    }

    #[test]
    fn test_missing_main_reported_once_at_end() {
        let source = "class P {\n  void f() {}\n  int g() { return 0; }\n}\n";
        assert_eq!(
            messages(source),
            vec!["Error line: 4. No method named 'main' declared".to_string()]
        );
    }

    #[test]
    fn test_main_is_case_sensitive() {
        assert_eq!(
            kinds("class P { void Main(){} }"),
            vec![ErrorKind::MissingMain]
        );
    }

    #[test]
    fn test_duplicate_main_still_counts() {
        let source = "class P { int main; void main(){} }";
        assert_eq!(kinds(source), vec![ErrorKind::DuplicateDeclaration]);
    }

    #[test]
    fn test_method_calls() {
        let source = "class P {
            int add(int a, int b){ return a + b; }
            void main(){
                int x;
                x = add(1, 2);
                add(1);
                x = add(1, true);
                x = nope(1);
                x = callout(\"printf\", \"%d\", x, true);
                callout(\"exit\");
            }
        }";
        assert_eq!(
            messages(source),
            vec![
                "Error line: 6. Method 'add' expects 2 argument(s), found 1".to_string(),
                "Error line: 7. Argument 2 of 'add' must be int, found boolean".to_string(),
                "Error line: 8. Method 'nope' used and not declared".to_string(),
            ]
        );
    }

    #[test]
    fn test_call_result_type() {
        let source = "class P {
            boolean ok(){ return true; }
            void v(){}
            void main(){ int x; x = ok(); x = v(); } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::AssignmentTypeMismatch,
                ErrorKind::AssignmentTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_each_argument_mismatch_reported() {
        let source = "class P { void f(int a, boolean b){} void main(){ f(true, 1); } }";
        assert_eq!(
            kinds(source),
            vec![
                ErrorKind::ArgumentTypeMismatch,
                ErrorKind::ArgumentTypeMismatch,
            ]
        );
    }

    #[test]
    fn test_recursive_call_resolves() {
        let source = "class P { int f(int n){ return f(n - 1); } void main(){ f(3); } }";
        assert_eq!(kinds(source), vec![]);
    }

    #[test]
    fn test_field_called_as_method() {
        let source = "class P { int x; void main(){ x(); } }";
        assert_eq!(kinds(source), vec![ErrorKind::UndeclaredMethod]);
    }

    #[test]
    fn test_walk_continues_after_errors() {
        let source = "class P {
            int a[0];
            void main(){
                y = 1;
                if (1) { z = 2; }
            }
        }";
        let lines: Vec<(u32, ErrorKind)> = check(source).iter().map(|d| (d.line, d.kind)).collect();
        assert_eq!(
            lines,
            vec![
                (2, ErrorKind::InvalidArraySize),
                (4, ErrorKind::UndeclaredVariable),
                (5, ErrorKind::ConditionNotBoolean),
                (5, ErrorKind::UndeclaredVariable),
            ]
        );
    }
}
