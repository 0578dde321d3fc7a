//! Hooks that let code outside the transpiler take part in a compilation.

use crate::checker::Checker;
use crate::context::TransformationContext;
use crate::emit::OutputFile;
use crate::program::{Program, SourceFile};
use swc_ecma_ast as ast;
use tslx_lua as lua;

/// Per-node transformation overrides.
///
/// Every hook returns `None` to leave the node to the default
/// transformation. A hook that wants the default result for the node it was
/// given, plus something of its own, calls the matching `super_transform_*`
/// method on the context; calling `transform_*` on the same node again would
/// come straight back to the hook.
pub trait Visitors {
    fn visit_call(&self, _node: &ast::CallExpr, _context: &mut TransformationContext) -> Option<lua::Expression> {
        None
    }

    fn visit_identifier(&self, _node: &ast::Ident, _context: &mut TransformationContext) -> Option<lua::Expression> {
        None
    }

    fn visit_binary(&self, _node: &ast::BinExpr, _context: &mut TransformationContext) -> Option<lua::Expression> {
        None
    }

    /// `delete` expressions, `node.op` is always [`ast::UnaryOp::Delete`].
    fn visit_delete(&self, _node: &ast::UnaryExpr, _context: &mut TransformationContext) -> Option<lua::Expression> {
        None
    }

    fn visit_source_file(&self, _file: &SourceFile, _context: &mut TransformationContext) -> Option<lua::File> {
        None
    }
}

/// A compilation participant. With several plugins, visitors are asked in
/// order and the first one returning `Some` wins.
pub trait Plugin: Visitors {
    fn name(&self) -> &str;

    /// Runs once after binding, before any file is transformed.
    fn before_transform(&mut self, _program: &Program, _checker: &Checker) {}

    /// Runs once on the complete list of outputs, before anything is written.
    fn before_emit(&self, _program: &Program, _files: &mut [OutputFile]) {}
}
