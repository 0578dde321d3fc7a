//! Per-file transformation state and the dispatch into plugins.

use crate::checker::Checker;
use crate::lower;
use crate::lualib::LuaLibFeature;
use crate::plugin::Plugin;
use crate::program::{Program, SourceFile};
use std::collections::BTreeSet;
use swc_ecma_ast as ast;
use tslx_diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use tslx_lua as lua;

/// State for transforming one source file.
pub struct TransformationContext<'a> {
    pub program: &'a Program,
    pub checker: &'a Checker,
    pub file: &'a SourceFile,
    pub diagnostics: Diagnostics,
    /// Runtime routines the output of this file needs
    pub used_lualib_features: BTreeSet<LuaLibFeature>,
    plugins: &'a [Box<dyn Plugin>],
    /// One buffer per statement being transformed, innermost last
    preceding: Vec<Vec<lua::Statement>>,
    temp_counter: usize,
    /// Nesting of blocks and functions; 0 at the top of the file
    pub(crate) depth: usize,
}

impl<'a> TransformationContext<'a> {
    pub fn new(
        program: &'a Program,
        checker: &'a Checker,
        file: &'a SourceFile,
        plugins: &'a [Box<dyn Plugin>],
    ) -> Self {
        Self {
            program,
            checker,
            file,
            diagnostics: Diagnostics::new(),
            used_lualib_features: BTreeSet::new(),
            plugins,
            preceding: Vec::new(),
            temp_counter: 0,
            depth: 0,
        }
    }

    // Expressions

    pub fn transform_expression(&mut self, expr: &ast::Expr) -> lua::Expression {
        let plugins = self.plugins;
        let visited = match expr {
            ast::Expr::Call(call) => plugins.iter().find_map(|p| p.visit_call(call, self)),
            ast::Expr::Ident(ident) => plugins.iter().find_map(|p| p.visit_identifier(ident, self)),
            ast::Expr::Bin(bin) => plugins.iter().find_map(|p| p.visit_binary(bin, self)),
            ast::Expr::Unary(unary) if unary.op == ast::UnaryOp::Delete => {
                plugins.iter().find_map(|p| p.visit_delete(unary, self))
            }
            _ => None,
        };
        match visited {
            Some(result) => result,
            None => self.super_transform_expression(expr),
        }
    }

    /// Default transformation of `expr`, skipping the visitors for this node
    /// but not for its children.
    pub fn super_transform_expression(&mut self, expr: &ast::Expr) -> lua::Expression {
        lower::expression::lower_expression(self, expr)
    }

    pub fn transform_identifier(&mut self, ident: &ast::Ident) -> lua::Expression {
        let plugins = self.plugins;
        match plugins.iter().find_map(|p| p.visit_identifier(ident, self)) {
            Some(result) => result,
            None => self.super_transform_identifier(ident),
        }
    }

    pub fn super_transform_identifier(&mut self, ident: &ast::Ident) -> lua::Expression {
        lower::expression::lower_identifier(self, ident)
    }

    pub fn super_transform_call(&mut self, call: &ast::CallExpr) -> lua::Expression {
        lower::expression::lower_call(self, call)
    }

    pub fn super_transform_binary(&mut self, bin: &ast::BinExpr) -> lua::Expression {
        lower::expression::lower_binary(self, bin)
    }

    pub fn super_transform_unary(&mut self, unary: &ast::UnaryExpr) -> lua::Expression {
        lower::expression::lower_unary(self, unary)
    }

    /// Transform one argument or array element; spreads unpack their table.
    pub fn transform_argument(&mut self, arg: &ast::ExprOrSpread) -> lua::Expression {
        let value = self.transform_expression(&arg.expr);
        if arg.spread.is_some() {
            lua::Expression::call(
                lua::Expression::index(lua::Expression::identifier("table"), lua::Expression::string("unpack")),
                vec![value],
            )
        } else {
            value
        }
    }

    /// Transform a list of arguments so each is evaluated once, left to right.
    ///
    /// When a later argument needs preceding statements, every earlier
    /// argument that could observe them is first stored in a temporary.
    pub fn transform_expression_list<'e>(
        &mut self,
        args: impl IntoIterator<Item = &'e ast::ExprOrSpread>,
    ) -> Vec<lua::Expression> {
        let transformed: Vec<_> = args
            .into_iter()
            .map(|arg| self.isolate(|ctx| ctx.transform_argument(arg)))
            .collect();
        self.settle_order(transformed)
    }

    /// Same as [`transform_expression_list`](Self::transform_expression_list)
    /// for plain expressions.
    pub fn transform_ordered(&mut self, exprs: &[&ast::Expr]) -> Vec<lua::Expression> {
        let transformed: Vec<_> = exprs
            .iter()
            .map(|expr| self.isolate(|ctx| ctx.transform_expression(expr)))
            .collect();
        self.settle_order(transformed)
    }

    fn settle_order(&mut self, transformed: Vec<(Vec<lua::Statement>, lua::Expression)>) -> Vec<lua::Expression> {
        let last_with_statements = transformed.iter().rposition(|(pre, _)| !pre.is_empty());
        let mut results = Vec::with_capacity(transformed.len());
        for (i, (pre, expr)) in transformed.into_iter().enumerate() {
            self.add_preceding_statements(pre);
            match last_with_statements {
                Some(last) if i < last && !lower::is_literal(&expr) => {
                    results.push(self.cache_in_temp(expr));
                }
                _ => results.push(expr),
            }
        }
        results
    }

    /// Run `f` with a fresh preceding-statement buffer and return what it collected.
    pub fn isolate<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> (Vec<lua::Statement>, T) {
        self.preceding.push(Vec::new());
        let result = f(self);
        let statements = self.preceding.pop().unwrap_or_default();
        (statements, result)
    }

    /// Queue statements to run before the statement currently being transformed.
    pub fn add_preceding_statements(&mut self, statements: impl IntoIterator<Item = lua::Statement>) {
        match self.preceding.last_mut() {
            Some(buffer) => buffer.extend(statements),
            None => self.preceding.push(statements.into_iter().collect()),
        }
    }

    /// Fresh local name, unique within the file.
    pub fn create_temp(&mut self, hint: &str) -> String {
        let name = format!("____{}_{}", hint, self.temp_counter);
        self.temp_counter += 1;
        name
    }

    /// Store `value` in a new local and return a reference to it.
    pub fn cache_in_temp(&mut self, value: lua::Expression) -> lua::Expression {
        let temp = self.create_temp("temp");
        self.add_preceding_statements([lua::Statement::local(temp.clone(), value)]);
        lua::Expression::identifier(temp)
    }

    // Statements

    /// Transform one statement; preceding statements it produces come first.
    pub fn transform_statement(&mut self, stmt: &ast::Stmt) -> Vec<lua::Statement> {
        let (mut statements, result) = self.isolate(|ctx| lower::statement::lower_statement(ctx, stmt));
        statements.extend(result);
        statements
    }

    /// Transform a nested statement list.
    pub fn transform_block(&mut self, stmts: &[ast::Stmt]) -> lua::Block {
        self.depth += 1;
        let block = stmts.iter().flat_map(|stmt| self.transform_statement(stmt)).collect();
        self.depth -= 1;
        block
    }

    // Source files

    pub fn transform_source_file(&mut self) -> lua::File {
        let plugins = self.plugins;
        let file = self.file;
        match plugins.iter().find_map(|p| p.visit_source_file(file, self)) {
            Some(result) => result,
            None => self.super_transform_source_file(),
        }
    }

    pub fn super_transform_source_file(&mut self) -> lua::File {
        lower::module::lower_source_file(self)
    }

    // Diagnostics

    pub(crate) fn unsupported(&mut self, code: DiagnosticCode, span: swc_common::Span, what: &str) {
        log::debug!("{}: unsupported {} in {}", code, what, self.file.file_name);
        self.diagnostics.push(
            Diagnostic::error(code, format!("Unsupported {}.", what))
                .with_span(self.program.span_of(span))
                .build(),
        );
    }
}
