//! The extensions plugin: routes intrinsic references to their rules.

use crate::diagnostics;
use crate::normalize::normalize_output_paths;
use crate::options::ExtensionOptions;
use crate::registry::{Intrinsic, SymbolRegistry};
use crate::rules;
use crate::BUNDLED_DECLARATIONS_PATH;
use std::cell::Cell;
use swc_ecma_ast as ast;
use tslx_lua::{Expression, File};
use tslx_transpiler::{
    Checker, LuaLibFeature, OutputFile, Plugin, Program, SourceFile, TransformationContext, Visitors,
};

pub struct ExtensionsPlugin {
    options: ExtensionOptions,
    declarations_path: String,
    registry: SymbolRegistry,
    /// `delete` expressions in the current file left to the lualib routine
    unsimplified_deletes: Cell<usize>,
}

impl ExtensionsPlugin {
    /// Plugin for intrinsics declared in the bundled declarations file.
    pub fn new(options: ExtensionOptions) -> Self {
        Self::with_declarations(options, BUNDLED_DECLARATIONS_PATH)
    }

    /// Plugin for intrinsics declared in the file at `declarations_path`.
    pub fn with_declarations(options: ExtensionOptions, declarations_path: impl AsRef<std::path::Path>) -> Self {
        Self {
            options,
            declarations_path: tslx_transpiler::paths::normalize_path(declarations_path),
            registry: SymbolRegistry::default(),
            unsimplified_deletes: Cell::new(0),
        }
    }

    pub fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    fn intrinsic_of_callee(&self, call: &ast::CallExpr, ctx: &TransformationContext) -> Option<Intrinsic> {
        let ast::Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let symbol = ctx.checker.symbol_of_callee(callee)?;
        self.registry.intrinsic(symbol)
    }
}

impl Visitors for ExtensionsPlugin {
    fn visit_call(&self, node: &ast::CallExpr, ctx: &mut TransformationContext) -> Option<Expression> {
        let intrinsic = self.intrinsic_of_callee(node, ctx)?;
        log::trace!("Rewriting {} call in {}", intrinsic.name(), ctx.file.file_name);
        match intrinsic {
            Intrinsic::NewLuaSet => Some(rules::transform_lua_set_new_call(ctx, node)),
            Intrinsic::Assume => Some(Expression::Nil),
            Intrinsic::Keys => Some(rules::transform_keys_call(ctx, node)),
            Intrinsic::KeySet => Some(rules::transform_key_set_call(ctx, node)),
            Intrinsic::GetProjectFilesMatchingRegex => {
                rules::transform_files_matching_pattern_call(ctx, node, &self.options)
            }
            Intrinsic::Nil => None,
        }
    }

    fn visit_identifier(&self, node: &ast::Ident, ctx: &mut TransformationContext) -> Option<Expression> {
        let symbol = ctx.checker.symbol_at_location(node);
        if symbol.and_then(|s| self.registry.intrinsic(s)) == Some(Intrinsic::Nil) {
            return Some(Expression::Nil);
        }
        if self.options.warn_use_nil && symbol.is_none() && node.sym.as_ref() == "undefined" {
            let span = ctx.program.span_of(node.span);
            ctx.diagnostics.push(diagnostics::use_nil_instead(span));
        }
        None
    }

    fn visit_binary(&self, node: &ast::BinExpr, ctx: &mut TransformationContext) -> Option<Expression> {
        if self.options.warn_use_double_equals {
            let span = ctx.program.span_of(node.span);
            match node.op {
                ast::BinaryOp::EqEqEq => ctx.diagnostics.push(diagnostics::use_equals_equals(span)),
                ast::BinaryOp::NotEqEq => ctx.diagnostics.push(diagnostics::use_not_equals(span)),
                _ => {}
            }
        }
        None
    }

    fn visit_delete(&self, node: &ast::UnaryExpr, ctx: &mut TransformationContext) -> Option<Expression> {
        if !self.options.simplify_delete {
            return None;
        }
        if is_optional_chain(&node.arg) {
            self.unsimplified_deletes.set(self.unsimplified_deletes.get() + 1);
            return None;
        }
        Some(rules::simplify_delete(ctx, node))
    }

    fn visit_source_file(&self, _file: &SourceFile, ctx: &mut TransformationContext) -> Option<File> {
        if !self.options.simplify_delete {
            return None;
        }
        self.unsimplified_deletes.set(0);
        let result = ctx.super_transform_source_file();
        if self.unsimplified_deletes.get() == 0 {
            ctx.used_lualib_features.remove(&LuaLibFeature::Delete);
        }
        Some(result)
    }
}

fn is_optional_chain(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::OptChain(_) => true,
        ast::Expr::Paren(paren) => is_optional_chain(&paren.expr),
        _ => false,
    }
}

impl Plugin for ExtensionsPlugin {
    fn name(&self) -> &str {
        "language-extensions"
    }

    fn before_transform(&mut self, program: &Program, checker: &Checker) {
        self.registry = SymbolRegistry::build(program, checker, &self.declarations_path);
    }

    fn before_emit(&self, _program: &Program, files: &mut [OutputFile]) {
        if self.options.replace_dot_with_dash {
            normalize_output_paths(files);
        }
    }
}
