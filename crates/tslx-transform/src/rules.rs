//! The rewrite rules behind each intrinsic.

use crate::diagnostics;
use crate::options::ExtensionOptions;
use regex::Regex;
use swc_ecma_ast as ast;
use tslx_lua::{Expression, Statement, TableField};
use tslx_transpiler::paths::{relative_path, strip_extension};
use tslx_transpiler::TransformationContext;

/// `newLuaSet(a, b)` becomes `{[a] = true, [b] = true}`.
pub fn transform_lua_set_new_call(ctx: &mut TransformationContext, call: &ast::CallExpr) -> Expression {
    let mut args: Vec<&ast::ExprOrSpread> = call.args.iter().collect();
    if let [only] = args.as_slice() {
        if let (Some(_), ast::Expr::Array(array)) = (only.spread, only.expr.as_ref()) {
            args = array.elems.iter().flatten().collect();
        }
    }
    if args.iter().any(|arg| arg.spread.is_some()) {
        let span = ctx.program.span_of(call.span);
        ctx.diagnostics.push(diagnostics::spread_not_supported(span));
    }

    let fields = ctx
        .transform_expression_list(args)
        .into_iter()
        .map(|key| TableField::keyed(key, Expression::Boolean(true)))
        .collect();
    Expression::table(fields)
}

/// Property names of the single type argument, or `None` when there is not
/// exactly one. A type the checker cannot fully resolve is reported.
fn type_argument_keys(ctx: &mut TransformationContext, call: &ast::CallExpr) -> Option<Vec<String>> {
    let type_args = call.type_args.as_ref()?;
    let [type_arg] = type_args.params.as_slice() else {
        return None;
    };
    let ty = ctx.checker.type_from_type_node(type_arg);
    if !ty.is_resolved() {
        let span = ctx.program.span_of(call.span);
        ctx.diagnostics.push(diagnostics::unenumerable_type(span));
    }
    Some(
        ctx.checker
            .properties_of_type(&ty)
            .iter()
            .map(|p| p.name.clone())
            .collect(),
    )
}

/// `keys<T>()` becomes `{"a", "b"}`.
pub fn transform_keys_call(ctx: &mut TransformationContext, call: &ast::CallExpr) -> Expression {
    let fields = type_argument_keys(ctx, call)
        .unwrap_or_default()
        .into_iter()
        .map(|name| TableField::positional(Expression::string(name)))
        .collect();
    Expression::table(fields)
}

/// `keySet<T>()` becomes `{a = true, b = true}`.
pub fn transform_key_set_call(ctx: &mut TransformationContext, call: &ast::CallExpr) -> Expression {
    let fields = type_argument_keys(ctx, call)
        .unwrap_or_default()
        .into_iter()
        .map(|name| TableField::keyed(Expression::string(name), Expression::Boolean(true)))
        .collect();
    Expression::table(fields)
}

/// Project file path as listed by `getProjectFilesMatchingRegex`: relative
/// to the source directory, without its last extension.
pub fn listed_file_name(source_dir: &str, file_name: &str, replace_dot_with_dash: bool) -> String {
    let relative = relative_path(source_dir, file_name).replace('\\', "/");
    let stem = strip_extension(&relative);
    if replace_dot_with_dash {
        stem.replace('.', "-")
    } else {
        stem.to_string()
    }
}

/// `getProjectFilesMatchingRegex("...")` becomes the list of matching project
/// files. `None` after reporting a bad argument, leaving the call as written.
pub fn transform_files_matching_pattern_call(
    ctx: &mut TransformationContext,
    call: &ast::CallExpr,
    options: &ExtensionOptions,
) -> Option<Expression> {
    let span = ctx.program.span_of(call.span);
    let pattern = match call.args.first() {
        Some(ast::ExprOrSpread { spread: None, expr }) => match expr.as_ref() {
            ast::Expr::Lit(ast::Lit::Str(s)) => s.value.as_str().map(str::to_string),
            _ => None,
        },
        _ => None,
    };
    let Some(pattern) = pattern else {
        ctx.diagnostics.push(diagnostics::first_param_should_be_regex(span));
        return None;
    };
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(error) => {
            ctx.diagnostics.push(diagnostics::invalid_pattern(span, &error));
            return None;
        }
    };

    let source_dir = ctx.program.source_dir();
    let fields: Vec<_> = ctx
        .program
        .source_files()
        .filter(|f| regex.is_match(&f.file_name))
        .map(|f| {
            let name = listed_file_name(&source_dir, &f.file_name, options.replace_dot_with_dash);
            TableField::positional(Expression::string(name))
        })
        .collect();
    log::trace!("{} files match /{}/", fields.len(), pattern);
    Some(Expression::table(fields))
}

/// `delete t.k` becomes the statement `t.k = nil` followed by `true`.
///
/// When the default lowering is not a `__TS__Delete(t, k)` call it is
/// returned unchanged.
pub fn simplify_delete(ctx: &mut TransformationContext, delete: &ast::UnaryExpr) -> Expression {
    let lowered = ctx.super_transform_unary(delete);
    let parts = match lowered.call_args() {
        Some([table, key]) => Some((table.clone(), key.clone())),
        _ => None,
    };
    let Some((table, key)) = parts else {
        return lowered;
    };
    ctx.add_preceding_statements([Statement::assign(Expression::index(table, key), Expression::Nil)]);
    Expression::Boolean(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_file_name() {
        assert_eq!(listed_file_name("/project", "/project/foo.test.ts", true), "foo-test");
        assert_eq!(
            listed_file_name("/project", "/project/folder/bar.test.tsx", true),
            "folder/bar-test"
        );
        assert_eq!(
            listed_file_name("/project", "/project/folder/bar.test.tsx", false),
            "folder/bar.test"
        );
        assert_eq!(listed_file_name("/project", "/project/Makefile", false), "Makefile");
    }
}
