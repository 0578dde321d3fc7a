//! Statement and declaration lowering

use super::expression::{lower_assignment_parts, lower_function, lower_update_parts};
use super::{is_side_effect_free, lua_name};
use crate::context::TransformationContext;
use swc_common::Spanned;
use swc_ecma_ast as ast;
use tslx_diagnostics::DiagnosticCode;
use tslx_lua::{Block, Expression, Statement, UnaryOp};

pub(crate) fn lower_statement(ctx: &mut TransformationContext, stmt: &ast::Stmt) -> Vec<Statement> {
    match stmt {
        ast::Stmt::Expr(expr) => lower_expression_statement(ctx, &expr.expr),
        ast::Stmt::Decl(decl) => lower_declaration(ctx, decl),
        ast::Stmt::Return(ret) => {
            let values = match &ret.arg {
                Some(arg) => vec![ctx.transform_expression(arg)],
                None => Vec::new(),
            };
            vec![Statement::Return(values)]
        }
        ast::Stmt::Block(block) => vec![Statement::Do(ctx.transform_block(&block.stmts))],
        ast::Stmt::If(if_stmt) => {
            let condition = ctx.transform_expression(&if_stmt.test);
            let then_block = lower_body(ctx, &if_stmt.cons);
            let else_block = if_stmt.alt.as_ref().map(|alt| lower_body(ctx, alt));
            vec![Statement::If {
                condition,
                then_block,
                else_block,
            }]
        }
        ast::Stmt::While(while_stmt) => lower_while(ctx, while_stmt),
        ast::Stmt::Break(brk) if brk.label.is_none() => vec![Statement::Break],
        ast::Stmt::Throw(throw) => {
            let error = ctx.transform_expression(&throw.arg);
            vec![Statement::Call(Expression::call(
                Expression::identifier("error"),
                vec![error, Expression::Number(0.0)],
            ))]
        }
        ast::Stmt::Empty(_) => Vec::new(),
        other => unsupported(ctx, other.span(), statement_kind(other)),
    }
}

fn unsupported(ctx: &mut TransformationContext, span: swc_common::Span, what: &str) -> Vec<Statement> {
    ctx.unsupported(DiagnosticCode::UnsupportedStatement, span, what);
    Vec::new()
}

fn statement_kind(stmt: &ast::Stmt) -> &'static str {
    match stmt {
        ast::Stmt::Break(_) => "labeled break",
        ast::Stmt::Continue(_) => "continue statement",
        ast::Stmt::Labeled(_) => "labeled statement",
        ast::Stmt::Switch(_) => "switch statement",
        ast::Stmt::Try(_) => "try statement",
        ast::Stmt::DoWhile(_) => "do-while loop",
        ast::Stmt::For(_) | ast::Stmt::ForIn(_) | ast::Stmt::ForOf(_) => "for loop",
        ast::Stmt::With(_) => "with statement",
        _ => "statement",
    }
}

/// Body of an `if` or loop; a single statement becomes a one-statement block.
fn lower_body(ctx: &mut TransformationContext, stmt: &ast::Stmt) -> Block {
    match stmt {
        ast::Stmt::Block(block) => ctx.transform_block(&block.stmts),
        other => ctx.transform_block(std::slice::from_ref(other)),
    }
}

fn lower_while(ctx: &mut TransformationContext, while_stmt: &ast::WhileStmt) -> Vec<Statement> {
    let (preceding, condition) = ctx.isolate(|c| c.transform_expression(&while_stmt.test));
    let body = lower_body(ctx, &while_stmt.body);
    if preceding.is_empty() {
        return vec![Statement::While { condition, body }];
    }

    // The condition needs statements, so it is evaluated inside the loop
    let mut loop_body = preceding;
    loop_body.push(Statement::If {
        condition: Expression::unary(UnaryOp::Not, condition),
        then_block: vec![Statement::Break],
        else_block: None,
    });
    loop_body.extend(body);
    vec![Statement::While {
        condition: Expression::Boolean(true),
        body: loop_body,
    }]
}

/// An expression evaluated for its effects only.
pub(crate) fn lower_expression_statement(ctx: &mut TransformationContext, expr: &ast::Expr) -> Vec<Statement> {
    match expr {
        ast::Expr::Paren(paren) => lower_expression_statement(ctx, &paren.expr),
        ast::Expr::Assign(assign) => match lower_assignment_parts(ctx, assign) {
            Some((target, value)) => vec![Statement::assign(target, value)],
            None => Vec::new(),
        },
        ast::Expr::Update(update) => match lower_update_parts(ctx, update) {
            Some((target, value)) => vec![Statement::assign(target, value)],
            None => Vec::new(),
        },
        _ => match ctx.transform_expression(expr) {
            call @ Expression::Call { .. } => vec![Statement::Call(call)],
            value if is_side_effect_free(&value) => Vec::new(),
            value => vec![Statement::local("____", value)],
        },
    }
}

/// Top-level declarations of script files are globals.
fn is_global(ctx: &TransformationContext) -> bool {
    ctx.depth == 0 && !ctx.file.is_external_module()
}

/// `local names = values`, or a plain assignment for globals.
fn declare(ctx: &TransformationContext, names: Vec<String>, values: Vec<Expression>) -> Statement {
    if is_global(ctx) {
        let values = if values.is_empty() { vec![Expression::Nil] } else { values };
        Statement::Assignment {
            targets: names.into_iter().map(Expression::identifier).collect(),
            values,
        }
    } else {
        Statement::Local { names, values }
    }
}

pub(crate) fn lower_declaration(ctx: &mut TransformationContext, decl: &ast::Decl) -> Vec<Statement> {
    match decl {
        ast::Decl::Var(var) if var.declare => Vec::new(),
        ast::Decl::Var(var) => {
            let mut statements = Vec::new();
            for declarator in &var.decls {
                let (preceding, result) = ctx.isolate(|c| lower_declarator(c, declarator));
                statements.extend(preceding);
                statements.extend(result);
            }
            statements
        }
        ast::Decl::Fn(f) if f.declare => Vec::new(),
        ast::Decl::Fn(f) => {
            let name = lua_name(f.ident.sym.as_ref());
            let function = lower_function(
                ctx,
                f.function.params.iter().map(|p| &p.pat),
                f.function.body.as_ref(),
            );
            match function {
                Expression::Function { params, body } if !is_global(ctx) => {
                    vec![Statement::LocalFunction { name, params, body }]
                }
                function => vec![Statement::assign(Expression::identifier(name), function)],
            }
        }
        ast::Decl::TsInterface(_) | ast::Decl::TsTypeAlias(_) => Vec::new(),
        ast::Decl::TsEnum(e) if e.declare => Vec::new(),
        ast::Decl::TsModule(m) if m.declare => Vec::new(),
        ast::Decl::Class(c) => unsupported(ctx, c.class.span, "class declaration"),
        ast::Decl::TsEnum(e) => unsupported(ctx, e.span, "enum declaration"),
        ast::Decl::TsModule(m) => unsupported(ctx, m.span, "namespace declaration"),
        ast::Decl::Using(u) => unsupported(ctx, u.span, "using declaration"),
    }
}

fn lower_declarator(ctx: &mut TransformationContext, declarator: &ast::VarDeclarator) -> Vec<Statement> {
    let init = declarator.init.as_ref().map(|init| ctx.transform_expression(init));

    match &declarator.name {
        ast::Pat::Ident(binding) => {
            let name = lua_name(binding.id.sym.as_ref());
            vec![declare(ctx, vec![name], init.into_iter().collect())]
        }
        ast::Pat::Array(array) => {
            let Some(names) = array_pattern_names(array) else {
                return unsupported_pattern(ctx, array.span);
            };
            let Some(init) = init else {
                return vec![declare(ctx, names, Vec::new())];
            };
            let unpack = Expression::call(
                Expression::index(Expression::identifier("table"), Expression::string("unpack")),
                vec![init],
            );
            vec![declare(ctx, names, vec![unpack])]
        }
        ast::Pat::Object(object) => {
            let Some(fields) = object_pattern_fields(object) else {
                return unsupported_pattern(ctx, object.span);
            };
            let names = fields.iter().map(|(_, name)| name.clone()).collect();
            let Some(init) = init else {
                return vec![declare(ctx, names, Vec::new())];
            };
            let table = if is_side_effect_free(&init) {
                init
            } else {
                ctx.cache_in_temp(init)
            };
            let values = fields
                .into_iter()
                .map(|(key, _)| Expression::index(table.clone(), Expression::string(key)))
                .collect();
            vec![declare(ctx, names, values)]
        }
        other => unsupported_pattern(ctx, other.span()),
    }
}

fn unsupported_pattern(ctx: &mut TransformationContext, span: swc_common::Span) -> Vec<Statement> {
    ctx.unsupported(DiagnosticCode::UnsupportedPattern, span, "binding pattern");
    Vec::new()
}

/// Names bound by `[a, b]`; `None` when any element is not a plain name.
fn array_pattern_names(array: &ast::ArrayPat) -> Option<Vec<String>> {
    array
        .elems
        .iter()
        .map(|elem| match elem {
            Some(ast::Pat::Ident(binding)) => Some(lua_name(binding.id.sym.as_ref())),
            _ => None,
        })
        .collect()
}

/// `(property, local name)` pairs bound by `{ a, b: c }`.
fn object_pattern_fields(object: &ast::ObjectPat) -> Option<Vec<(String, String)>> {
    object
        .props
        .iter()
        .map(|prop| match prop {
            ast::ObjectPatProp::Assign(assign) if assign.value.is_none() => {
                let name = assign.key.id.sym.to_string();
                Some((name.clone(), lua_name(&name)))
            }
            ast::ObjectPatProp::KeyValue(kv) => match kv.value.as_ref() {
                ast::Pat::Ident(binding) => {
                    let key = crate::checker::prop_name(&kv.key)?;
                    Some((key, lua_name(binding.id.sym.as_ref())))
                }
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Lua names a declaration introduces, for exporting it.
pub(crate) fn declared_names(decl: &ast::Decl) -> Vec<String> {
    match decl {
        ast::Decl::Fn(f) if !f.declare => vec![lua_name(f.ident.sym.as_ref())],
        ast::Decl::Var(var) if !var.declare => var
            .decls
            .iter()
            .flat_map(|declarator| match &declarator.name {
                ast::Pat::Ident(binding) => vec![lua_name(binding.id.sym.as_ref())],
                ast::Pat::Array(array) => array_pattern_names(array).unwrap_or_default(),
                ast::Pat::Object(object) => object_pattern_fields(object)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(_, name)| name)
                    .collect(),
                _ => Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
