//! Source file lowering: module wrapper, imports and exports

use super::expression::lower_function;
use super::lua_name;
use super::statement::{declared_names, lower_declaration};
use crate::context::TransformationContext;
use crate::paths::{normalize_path, parent_dir, relative_path};
use swc_common::Spanned;
use swc_ecma_ast as ast;
use tslx_diagnostics::DiagnosticCode;
use tslx_lua::{Expression, File, Statement};

const EXPORTS: &str = "____exports";

pub(crate) fn lower_source_file(ctx: &mut TransformationContext) -> File {
    let file = ctx.file;
    if file.is_declaration_file() {
        return File::default();
    }

    let is_module = file.is_external_module();
    let mut statements = Vec::new();
    if is_module {
        statements.push(Statement::local(EXPORTS, Expression::table(Vec::new())));
    }

    for item in &file.module.body {
        match item {
            ast::ModuleItem::Stmt(stmt) => statements.extend(ctx.transform_statement(stmt)),
            ast::ModuleItem::ModuleDecl(decl) => {
                let (preceding, result) = ctx.isolate(|c| lower_module_decl(c, decl));
                statements.extend(preceding);
                statements.extend(result);
            }
        }
    }

    if is_module {
        statements.push(Statement::Return(vec![Expression::identifier(EXPORTS)]));
    }
    File { statements }
}

fn export(name: &str, value: Expression) -> Statement {
    Statement::assign(
        Expression::index(Expression::identifier(EXPORTS), Expression::string(name)),
        value,
    )
}

fn export_name(name: &ast::ModuleExportName) -> String {
    match name {
        ast::ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ast::ModuleExportName::Str(s) => s.value.as_str().unwrap_or("").to_string(),
    }
}

fn lower_module_decl(ctx: &mut TransformationContext, decl: &ast::ModuleDecl) -> Vec<Statement> {
    match decl {
        ast::ModuleDecl::Import(import) => lower_import(ctx, import),
        ast::ModuleDecl::ExportDecl(export_decl) => {
            let mut statements = lower_declaration(ctx, &export_decl.decl);
            for name in declared_names(&export_decl.decl) {
                statements.push(export(&name, Expression::identifier(name.clone())));
            }
            statements
        }
        ast::ModuleDecl::ExportNamed(named) if named.type_only => Vec::new(),
        ast::ModuleDecl::ExportNamed(named) => lower_export_named(ctx, named),
        ast::ModuleDecl::ExportDefaultExpr(default) => {
            let value = ctx.transform_expression(&default.expr);
            vec![export("default", value)]
        }
        ast::ModuleDecl::ExportDefaultDecl(default) => match &default.decl {
            ast::DefaultDecl::Fn(f) => {
                let function = lower_function(
                    ctx,
                    f.function.params.iter().map(|p| &p.pat),
                    f.function.body.as_ref(),
                );
                match (&f.ident, function) {
                    (Some(ident), Expression::Function { params, body }) => {
                        let name = lua_name(ident.sym.as_ref());
                        vec![
                            Statement::LocalFunction {
                                name: name.clone(),
                                params,
                                body,
                            },
                            export("default", Expression::identifier(name)),
                        ]
                    }
                    (_, function) => vec![export("default", function)],
                }
            }
            ast::DefaultDecl::TsInterfaceDecl(_) => Vec::new(),
            ast::DefaultDecl::Class(class) => unsupported(ctx, class.class.span, "default class export"),
        },
        ast::ModuleDecl::TsNamespaceExport(_) => Vec::new(),
        ast::ModuleDecl::ExportAll(all) => unsupported(ctx, all.span, "export *"),
        other => unsupported(ctx, other.span(), "module declaration"),
    }
}

fn unsupported(ctx: &mut TransformationContext, span: swc_common::Span, what: &str) -> Vec<Statement> {
    ctx.unsupported(DiagnosticCode::UnsupportedStatement, span, what);
    Vec::new()
}

/// `require("dir.file")` for a module specifier. Relative specifiers are
/// resolved against the importing file and made relative to the source
/// directory; anything else is used as written.
fn require(ctx: &TransformationContext, specifier: &str) -> Expression {
    let module = if specifier.starts_with("./") || specifier.starts_with("../") {
        let target = normalize_path(format!("{}/{}", parent_dir(&ctx.file.file_name), specifier));
        let relative = relative_path(&ctx.program.source_dir(), &target);
        strip_script_extension(&relative).replace('/', ".")
    } else {
        specifier.to_string()
    };
    Expression::call(Expression::identifier("require"), vec![Expression::string(module)])
}

fn strip_script_extension(path: &str) -> &str {
    [".d.ts", ".tsx", ".ts", ".js", ".lua"]
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

/// Local name holding a required module, e.g. `____foo_bar` for `./foo-bar`.
fn module_local(specifier: &str) -> String {
    let base = strip_script_extension(specifier.rsplit('/').next().unwrap_or(specifier));
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("____{}", cleaned)
}

fn lower_import(ctx: &mut TransformationContext, import: &ast::ImportDecl) -> Vec<Statement> {
    if import.type_only {
        return Vec::new();
    }
    let specifier = import.src.value.as_str().unwrap_or("");
    let required = require(ctx, specifier);
    let specifiers: Vec<_> = import
        .specifiers
        .iter()
        .filter(|s| !matches!(s, ast::ImportSpecifier::Named(named) if named.is_type_only))
        .collect();

    if import.specifiers.is_empty() {
        return vec![Statement::Call(required)];
    }
    if specifiers.is_empty() {
        return Vec::new();
    }
    if let [ast::ImportSpecifier::Namespace(namespace)] = specifiers.as_slice() {
        return vec![Statement::local(lua_name(namespace.local.sym.as_ref()), required)];
    }

    let module = module_local(specifier);
    let mut statements = vec![Statement::local(module.clone(), required)];
    for spec in specifiers {
        let (local, value) = match spec {
            ast::ImportSpecifier::Named(named) => {
                let imported = named
                    .imported
                    .as_ref()
                    .map(export_name)
                    .unwrap_or_else(|| named.local.sym.to_string());
                (
                    &named.local,
                    Expression::index(Expression::identifier(module.clone()), Expression::string(imported)),
                )
            }
            ast::ImportSpecifier::Default(default) => (
                &default.local,
                Expression::index(Expression::identifier(module.clone()), Expression::string("default")),
            ),
            ast::ImportSpecifier::Namespace(namespace) => {
                (&namespace.local, Expression::identifier(module.clone()))
            }
        };
        statements.push(Statement::local(lua_name(local.sym.as_ref()), value));
    }
    statements
}

fn lower_export_named(ctx: &mut TransformationContext, named: &ast::NamedExport) -> Vec<Statement> {
    let mut statements = Vec::new();
    let source = match &named.src {
        Some(src) => {
            let specifier = src.value.as_str().unwrap_or("");
            let module = module_local(specifier);
            statements.push(Statement::local(module.clone(), require(ctx, specifier)));
            Some(module)
        }
        None => None,
    };

    for spec in &named.specifiers {
        match spec {
            ast::ExportSpecifier::Named(s) if s.is_type_only => {}
            ast::ExportSpecifier::Named(s) => {
                let original = export_name(&s.orig);
                let exported = s.exported.as_ref().map(export_name).unwrap_or_else(|| original.clone());
                let value = match &source {
                    Some(module) => Expression::index(Expression::identifier(module.clone()), Expression::string(original)),
                    None => Expression::identifier(lua_name(&original)),
                };
                statements.push(export(&exported, value));
            }
            ast::ExportSpecifier::Namespace(s) => match &source {
                Some(module) => statements.push(export(&export_name(&s.name), Expression::identifier(module.clone()))),
                None => {
                    unsupported(ctx, s.span, "namespace export");
                }
            },
            ast::ExportSpecifier::Default(s) => {
                let value = match &source {
                    Some(module) => Expression::index(Expression::identifier(module.clone()), Expression::string("default")),
                    None => Expression::identifier(lua_name(s.exported.sym.as_ref())),
                };
                statements.push(export(s.exported.sym.as_ref(), value));
            }
        }
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_script_extension() {
        assert_eq!(strip_script_extension("a/b.ts"), "a/b");
        assert_eq!(strip_script_extension("types.d.ts"), "types");
        assert_eq!(strip_script_extension("data.json"), "data.json");
    }

    #[test]
    fn test_module_local() {
        assert_eq!(module_local("./foo-bar"), "____foo_bar");
        assert_eq!(module_local("../lib/util.ts"), "____util");
        assert_eq!(module_local("lodash"), "____lodash");
    }

    #[test]
    fn test_export_statement() {
        let printed = tslx_lua::print_statement(&export("x", Expression::identifier("x")));
        assert_eq!(printed, "____exports.x = x");
    }
}
