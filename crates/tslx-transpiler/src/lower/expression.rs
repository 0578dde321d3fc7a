//! Expression lowering

use super::{is_literal, is_side_effect_free, lua_name, statement};
use crate::context::TransformationContext;
use crate::lualib::LuaLibFeature;
use swc_common::Spanned;
use swc_ecma_ast as ast;
use tslx_diagnostics::DiagnosticCode;
use tslx_lua::{BinaryOp, Expression, Statement, TableField, UnaryOp};

pub(crate) fn lower_expression(ctx: &mut TransformationContext, expr: &ast::Expr) -> Expression {
    match expr {
        ast::Expr::Lit(lit) => lower_literal(ctx, lit),
        ast::Expr::Ident(ident) => lower_identifier(ctx, ident),
        ast::Expr::This(_) => Expression::identifier("self"),
        ast::Expr::Array(array) => lower_array(ctx, array),
        ast::Expr::Object(object) => lower_object(ctx, object),
        ast::Expr::Fn(f) => lower_function(ctx, f.function.params.iter().map(|p| &p.pat), f.function.body.as_ref()),
        ast::Expr::Arrow(arrow) => lower_arrow(ctx, arrow),
        ast::Expr::Unary(unary) => lower_unary(ctx, unary),
        ast::Expr::Update(update) => lower_update(ctx, update),
        ast::Expr::Bin(bin) => lower_binary(ctx, bin),
        ast::Expr::Assign(assign) => lower_assignment(ctx, assign),
        ast::Expr::Member(member) => lower_member(ctx, member),
        ast::Expr::Cond(cond) => lower_conditional(ctx, cond),
        ast::Expr::Call(call) => lower_call(ctx, call),
        ast::Expr::Seq(seq) => {
            let Some((last, rest)) = seq.exprs.split_last() else {
                return Expression::Nil;
            };
            for expr in rest {
                let statements = statement::lower_expression_statement(ctx, expr);
                ctx.add_preceding_statements(statements);
            }
            ctx.transform_expression(last)
        }
        ast::Expr::Tpl(tpl) => lower_template(ctx, tpl),
        ast::Expr::Paren(paren) => ctx.transform_expression(&paren.expr),
        ast::Expr::TsAs(as_expr) => ctx.transform_expression(&as_expr.expr),
        ast::Expr::TsTypeAssertion(assertion) => ctx.transform_expression(&assertion.expr),
        ast::Expr::TsNonNull(non_null) => ctx.transform_expression(&non_null.expr),
        ast::Expr::TsConstAssertion(assertion) => ctx.transform_expression(&assertion.expr),
        ast::Expr::TsSatisfies(satisfies) => ctx.transform_expression(&satisfies.expr),
        ast::Expr::TsInstantiation(instantiation) => ctx.transform_expression(&instantiation.expr),
        ast::Expr::OptChain(chain) => lower_optional_chain(ctx, chain),
        other => unsupported(ctx, other.span(), "expression"),
    }
}

fn unsupported(ctx: &mut TransformationContext, span: swc_common::Span, what: &str) -> Expression {
    ctx.unsupported(DiagnosticCode::UnsupportedExpression, span, what);
    Expression::Nil
}

fn lower_literal(ctx: &mut TransformationContext, lit: &ast::Lit) -> Expression {
    match lit {
        ast::Lit::Str(s) => Expression::string(s.value.as_str().unwrap_or("")),
        ast::Lit::Num(n) => Expression::Number(n.value),
        ast::Lit::Bool(b) => Expression::Boolean(b.value),
        ast::Lit::Null(_) => Expression::Nil,
        other => unsupported(ctx, other.span(), "literal"),
    }
}

/// Default identifier lowering: undeclared `undefined`, `NaN` and `Infinity`
/// become Lua values, everything else a (possibly mangled) name.
pub(crate) fn lower_identifier(ctx: &mut TransformationContext, ident: &ast::Ident) -> Expression {
    let name = ident.sym.as_ref();
    if ctx.checker.symbol_at_location(ident).is_none() {
        match name {
            "undefined" => return Expression::Nil,
            "NaN" => return Expression::Number(f64::NAN),
            "Infinity" => return Expression::Number(f64::INFINITY),
            _ => {}
        }
    }
    Expression::identifier(lua_name(name))
}

fn lower_array(ctx: &mut TransformationContext, array: &ast::ArrayLit) -> Expression {
    let mut values = ctx.transform_expression_list(array.elems.iter().flatten()).into_iter();
    let fields = array
        .elems
        .iter()
        .map(|element| match element {
            Some(_) => TableField::positional(values.next().unwrap_or(Expression::Nil)),
            None => TableField::positional(Expression::Nil),
        })
        .collect();
    Expression::table(fields)
}

fn lower_object(ctx: &mut TransformationContext, object: &ast::ObjectLit) -> Expression {
    let mut fields = Vec::new();
    for prop in &object.props {
        let prop = match prop {
            ast::PropOrSpread::Prop(prop) => prop,
            ast::PropOrSpread::Spread(spread) => {
                unsupported(ctx, spread.dot3_token, "object spread");
                continue;
            }
        };
        match prop.as_ref() {
            ast::Prop::Shorthand(ident) => {
                let value = ctx.transform_identifier(ident);
                fields.push(TableField::keyed(Expression::string(ident.sym.as_ref()), value));
            }
            ast::Prop::KeyValue(kv) => {
                let key = lower_prop_name(ctx, &kv.key);
                let value = ctx.transform_expression(&kv.value);
                fields.push(TableField::keyed(key, value));
            }
            ast::Prop::Method(method) => {
                let key = lower_prop_name(ctx, &method.key);
                let value = lower_function(
                    ctx,
                    method.function.params.iter().map(|p| &p.pat),
                    method.function.body.as_ref(),
                );
                fields.push(TableField::keyed(key, value));
            }
            other => {
                unsupported(ctx, other.span(), "object member");
            }
        }
    }
    Expression::table(fields)
}

fn lower_prop_name(ctx: &mut TransformationContext, key: &ast::PropName) -> Expression {
    match key {
        ast::PropName::Ident(ident) => Expression::string(ident.sym.as_ref()),
        ast::PropName::Str(s) => Expression::string(s.value.as_str().unwrap_or("")),
        ast::PropName::Num(n) => Expression::Number(n.value),
        ast::PropName::Computed(computed) => ctx.transform_expression(&computed.expr),
        ast::PropName::BigInt(big) => unsupported(ctx, big.span, "property name"),
    }
}

/// Parameter names plus the statements that set defaults and collect rest
/// parameters.
fn lower_parameters<'p>(
    ctx: &mut TransformationContext,
    params: impl IntoIterator<Item = &'p ast::Pat>,
) -> (Vec<String>, Vec<Statement>) {
    let mut names = Vec::new();
    let mut prologue = Vec::new();

    for param in params {
        match param {
            ast::Pat::Ident(binding) if binding.id.sym.as_ref() == "this" => {}
            ast::Pat::Ident(binding) => names.push(lua_name(binding.id.sym.as_ref())),
            ast::Pat::Assign(assign) if assign.left.is_ident() => {
                let name = assign
                    .left
                    .as_ident()
                    .map(|b| lua_name(b.id.sym.as_ref()))
                    .unwrap_or_default();
                let (mut then_block, default) = ctx.isolate(|c| c.transform_expression(&assign.right));
                then_block.push(Statement::assign(Expression::identifier(name.clone()), default));
                prologue.push(Statement::If {
                    condition: Expression::binary(BinaryOp::Eq, Expression::identifier(name.clone()), Expression::Nil),
                    then_block,
                    else_block: None,
                });
                names.push(name);
            }
            ast::Pat::Rest(rest) if rest.arg.is_ident() => {
                let name = rest.arg.as_ident().map(|b| lua_name(b.id.sym.as_ref())).unwrap_or_default();
                prologue.push(Statement::local(
                    name,
                    Expression::table(vec![TableField::positional(Expression::Dots)]),
                ));
                names.push("...".to_string());
            }
            other => {
                ctx.unsupported(DiagnosticCode::UnsupportedPattern, other.span(), "parameter pattern");
                names.push(ctx.create_temp("param"));
            }
        }
    }
    (names, prologue)
}

pub(crate) fn lower_function<'p>(
    ctx: &mut TransformationContext,
    params: impl IntoIterator<Item = &'p ast::Pat>,
    body: Option<&ast::BlockStmt>,
) -> Expression {
    ctx.depth += 1;
    let (params, mut statements) = lower_parameters(ctx, params);
    ctx.depth -= 1;
    if let Some(body) = body {
        statements.extend(ctx.transform_block(&body.stmts));
    }
    Expression::Function { params, body: statements }
}

fn lower_arrow(ctx: &mut TransformationContext, arrow: &ast::ArrowExpr) -> Expression {
    match arrow.body.as_ref() {
        ast::BlockStmtOrExpr::BlockStmt(block) => lower_function(ctx, &arrow.params, Some(block)),
        ast::BlockStmtOrExpr::Expr(expr) => {
            ctx.depth += 1;
            let (params, mut body) = lower_parameters(ctx, &arrow.params);
            let (preceding, value) = ctx.isolate(|c| c.transform_expression(expr));
            ctx.depth -= 1;
            body.extend(preceding);
            body.push(Statement::Return(vec![value]));
            Expression::Function { params, body }
        }
    }
}

/// Default unary lowering, including `delete` and `typeof`.
pub(crate) fn lower_unary(ctx: &mut TransformationContext, unary: &ast::UnaryExpr) -> Expression {
    match unary.op {
        ast::UnaryOp::Delete => lower_delete(ctx, unary),
        ast::UnaryOp::Bang => {
            let operand = ctx.transform_expression(&unary.arg);
            Expression::unary(UnaryOp::Not, operand)
        }
        ast::UnaryOp::Minus => match ctx.transform_expression(&unary.arg) {
            Expression::Number(n) => Expression::Number(-n),
            operand => Expression::unary(UnaryOp::Negate, operand),
        },
        ast::UnaryOp::Plus => {
            let operand = ctx.transform_expression(&unary.arg);
            Expression::call(Expression::identifier("tonumber"), vec![operand])
        }
        ast::UnaryOp::TypeOf => {
            let operand = ctx.transform_expression(&unary.arg);
            ctx.used_lualib_features.insert(LuaLibFeature::TypeOf);
            Expression::call(
                Expression::identifier(LuaLibFeature::TypeOf.function_name()),
                vec![operand],
            )
        }
        _ => unsupported(ctx, unary.span, "unary operator"),
    }
}

fn delete(ctx: &mut TransformationContext, table: Expression, key: Expression) -> Expression {
    ctx.used_lualib_features.insert(LuaLibFeature::Delete);
    Expression::call(Expression::identifier(LuaLibFeature::Delete.function_name()), vec![table, key])
}

fn lower_delete(ctx: &mut TransformationContext, unary: &ast::UnaryExpr) -> Expression {
    match unwrap_parens(&unary.arg) {
        ast::Expr::Member(member) => {
            let (table, key) = lower_member_parts(ctx, member);
            delete(ctx, table, key)
        }
        ast::Expr::OptChain(chain) => match chain.base.as_ref() {
            ast::OptChainBase::Member(member) => {
                let (table, key) = lower_member_parts(ctx, member);
                let table = if is_side_effect_free(&table) {
                    table
                } else {
                    ctx.cache_in_temp(table)
                };
                let call = delete(ctx, table.clone(), key);
                let is_nil = Expression::binary(BinaryOp::Eq, table, Expression::Nil);
                Expression::binary(
                    BinaryOp::Or,
                    Expression::binary(BinaryOp::And, is_nil, Expression::Boolean(true)),
                    call,
                )
            }
            ast::OptChainBase::Call(_) => unsupported(ctx, unary.span, "delete operand"),
        },
        _ => unsupported(ctx, unary.span, "delete operand"),
    }
}

fn unwrap_parens(expr: &ast::Expr) -> &ast::Expr {
    match expr {
        ast::Expr::Paren(paren) => unwrap_parens(&paren.expr),
        other => other,
    }
}

fn lower_member_parts(ctx: &mut TransformationContext, member: &ast::MemberExpr) -> (Expression, Expression) {
    match &member.prop {
        ast::MemberProp::Ident(name) => {
            let table = ctx.transform_expression(&member.obj);
            (table, Expression::string(name.sym.as_ref()))
        }
        ast::MemberProp::Computed(computed) => {
            let mut parts = ctx.transform_ordered(&[&*member.obj, &*computed.expr]).into_iter();
            let table = parts.next().unwrap_or(Expression::Nil);
            let key = parts.next().unwrap_or(Expression::Nil);
            (table, key)
        }
        ast::MemberProp::PrivateName(private) => {
            let table = ctx.transform_expression(&member.obj);
            (table, unsupported(ctx, private.span, "private name"))
        }
    }
}

fn is_length_access(member: &ast::MemberExpr) -> bool {
    matches!(&member.prop, ast::MemberProp::Ident(name) if name.sym.as_ref() == "length")
}

fn lower_member(ctx: &mut TransformationContext, member: &ast::MemberExpr) -> Expression {
    if is_length_access(member) {
        let table = ctx.transform_expression(&member.obj);
        return Expression::unary(UnaryOp::Length, table);
    }
    let (table, key) = lower_member_parts(ctx, member);
    Expression::index(table, key)
}

fn lower_optional_chain(ctx: &mut TransformationContext, chain: &ast::OptChainExpr) -> Expression {
    match chain.base.as_ref() {
        ast::OptChainBase::Member(member) => {
            let (table, key) = lower_member_parts(ctx, member);
            let table = if is_side_effect_free(&table) {
                table
            } else {
                ctx.cache_in_temp(table)
            };
            let access = if is_length_access(member) {
                Expression::unary(UnaryOp::Length, table.clone())
            } else {
                Expression::index(table.clone(), key)
            };
            if chain.optional {
                Expression::binary(BinaryOp::And, table, access)
            } else {
                access
            }
        }
        ast::OptChainBase::Call(call) => {
            let callee = ctx.transform_expression(&call.callee);
            let callee = if is_side_effect_free(&callee) {
                callee
            } else {
                ctx.cache_in_temp(callee)
            };
            let args = ctx.transform_expression_list(&call.args);
            let result = Expression::call(callee.clone(), args);
            if chain.optional {
                Expression::binary(BinaryOp::And, callee, result)
            } else {
                result
            }
        }
    }
}

/// Default call lowering: plain function call, no implicit self.
pub(crate) fn lower_call(ctx: &mut TransformationContext, call: &ast::CallExpr) -> Expression {
    match &call.callee {
        ast::Callee::Expr(callee) => {
            let callee = ctx.transform_expression(callee);
            let args = ctx.transform_expression_list(&call.args);
            Expression::call(callee, args)
        }
        _ => unsupported(ctx, call.span, "call target"),
    }
}

fn is_string_like(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::Lit(ast::Lit::Str(_)) | ast::Expr::Tpl(_) => true,
        ast::Expr::Paren(paren) => is_string_like(&paren.expr),
        _ => false,
    }
}

fn is_concatenation(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::String(_) | Expression::Binary { op: BinaryOp::Concat, .. }
    )
}

fn arithmetic_op(op: ast::BinaryOp) -> Option<BinaryOp> {
    Some(match op {
        ast::BinaryOp::Add => BinaryOp::Add,
        ast::BinaryOp::Sub => BinaryOp::Sub,
        ast::BinaryOp::Mul => BinaryOp::Mul,
        ast::BinaryOp::Div => BinaryOp::Div,
        ast::BinaryOp::Mod => BinaryOp::Mod,
        ast::BinaryOp::Exp => BinaryOp::Pow,
        ast::BinaryOp::EqEq | ast::BinaryOp::EqEqEq => BinaryOp::Eq,
        ast::BinaryOp::NotEq | ast::BinaryOp::NotEqEq => BinaryOp::NotEq,
        ast::BinaryOp::Lt => BinaryOp::Lt,
        ast::BinaryOp::LtEq => BinaryOp::LtEq,
        ast::BinaryOp::Gt => BinaryOp::Gt,
        ast::BinaryOp::GtEq => BinaryOp::GtEq,
        _ => return None,
    })
}

/// `+` concatenates when either side is known to be a string.
fn combine(op: BinaryOp, left_is_string: bool, left: Expression, right_is_string: bool, right: Expression) -> Expression {
    let op = if op == BinaryOp::Add
        && (left_is_string || right_is_string || is_concatenation(&left) || is_concatenation(&right))
    {
        BinaryOp::Concat
    } else {
        op
    };
    Expression::binary(op, left, right)
}

/// Default binary lowering.
pub(crate) fn lower_binary(ctx: &mut TransformationContext, bin: &ast::BinExpr) -> Expression {
    match bin.op {
        ast::BinaryOp::LogicalAnd => return lower_logical(ctx, bin, BinaryOp::And),
        ast::BinaryOp::LogicalOr => return lower_logical(ctx, bin, BinaryOp::Or),
        ast::BinaryOp::NullishCoalescing => return lower_nullish(ctx, bin),
        _ => {}
    }
    let Some(op) = arithmetic_op(bin.op) else {
        return unsupported(ctx, bin.span, "binary operator");
    };
    let mut operands = ctx.transform_ordered(&[&*bin.left, &*bin.right]).into_iter();
    let left = operands.next().unwrap_or(Expression::Nil);
    let right = operands.next().unwrap_or(Expression::Nil);
    combine(op, is_string_like(&bin.left), left, is_string_like(&bin.right), right)
}

fn lower_logical(ctx: &mut TransformationContext, bin: &ast::BinExpr, op: BinaryOp) -> Expression {
    let left = ctx.transform_expression(&bin.left);
    let (mut then_block, right) = ctx.isolate(|c| c.transform_expression(&bin.right));
    if then_block.is_empty() {
        return Expression::binary(op, left, right);
    }

    // The right side needs statements, so it must only run when it is reached
    let temp = ctx.create_temp("temp");
    let condition = match op {
        BinaryOp::And => Expression::identifier(temp.clone()),
        _ => Expression::unary(UnaryOp::Not, Expression::identifier(temp.clone())),
    };
    then_block.push(Statement::assign(Expression::identifier(temp.clone()), right));
    ctx.add_preceding_statements([
        Statement::local(temp.clone(), left),
        Statement::If {
            condition,
            then_block,
            else_block: None,
        },
    ]);
    Expression::identifier(temp)
}

fn lower_nullish(ctx: &mut TransformationContext, bin: &ast::BinExpr) -> Expression {
    let left = ctx.transform_expression(&bin.left);
    let (mut then_block, right) = ctx.isolate(|c| c.transform_expression(&bin.right));
    let temp = ctx.create_temp("temp");
    then_block.push(Statement::assign(Expression::identifier(temp.clone()), right));
    ctx.add_preceding_statements([
        Statement::local(temp.clone(), left),
        Statement::If {
            condition: Expression::binary(BinaryOp::Eq, Expression::identifier(temp.clone()), Expression::Nil),
            then_block,
            else_block: None,
        },
    ]);
    Expression::identifier(temp)
}

fn lower_conditional(ctx: &mut TransformationContext, cond: &ast::CondExpr) -> Expression {
    let condition = ctx.transform_expression(&cond.test);
    let (mut then_block, when_true) = ctx.isolate(|c| c.transform_expression(&cond.cons));
    let (mut else_block, when_false) = ctx.isolate(|c| c.transform_expression(&cond.alt));
    let temp = ctx.create_temp("temp");
    then_block.push(Statement::assign(Expression::identifier(temp.clone()), when_true));
    else_block.push(Statement::assign(Expression::identifier(temp.clone()), when_false));
    ctx.add_preceding_statements([
        Statement::Local {
            names: vec![temp.clone()],
            values: Vec::new(),
        },
        Statement::If {
            condition,
            then_block,
            else_block: Some(else_block),
        },
    ]);
    Expression::identifier(temp)
}

fn lower_template(ctx: &mut TransformationContext, tpl: &ast::Tpl) -> Expression {
    let mut parts = Vec::new();
    for (i, quasi) in tpl.quasis.iter().enumerate() {
        let text = unescape_template(quasi.raw.as_ref());
        if !text.is_empty() {
            parts.push(Expression::String(text));
        }
        if let Some(expr) = tpl.exprs.get(i) {
            match ctx.transform_expression(expr) {
                value @ Expression::String(_) => parts.push(value),
                value => parts.push(Expression::call(Expression::identifier("tostring"), vec![value])),
            }
        }
    }
    parts
        .into_iter()
        .rev()
        .reduce(|rest, part| Expression::binary(BinaryOp::Concat, part, rest))
        .unwrap_or_else(|| Expression::string(""))
}

fn unescape_template(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Target of an assignment as a Lua expression, `None` for destructuring.
fn lower_assign_target(ctx: &mut TransformationContext, target: &ast::AssignTarget) -> Option<Expression> {
    match target {
        ast::AssignTarget::Simple(ast::SimpleAssignTarget::Ident(binding)) => {
            Some(Expression::identifier(lua_name(binding.id.sym.as_ref())))
        }
        ast::AssignTarget::Simple(ast::SimpleAssignTarget::Member(member)) => {
            let (table, key) = lower_member_parts(ctx, member);
            Some(Expression::index(table, key))
        }
        other => {
            ctx.unsupported(DiagnosticCode::UnsupportedPattern, other.span(), "assignment target");
            None
        }
    }
}

/// `target = value` for plain and compound assignments.
pub(crate) fn lower_assignment_parts(
    ctx: &mut TransformationContext,
    assign: &ast::AssignExpr,
) -> Option<(Expression, Expression)> {
    let target = lower_assign_target(ctx, &assign.left)?;
    let right = ctx.transform_expression(&assign.right);
    let right_is_string = is_string_like(&assign.right);

    let compound = match assign.op {
        ast::AssignOp::Assign => return Some((target, right)),
        ast::AssignOp::AddAssign => BinaryOp::Add,
        ast::AssignOp::SubAssign => BinaryOp::Sub,
        ast::AssignOp::MulAssign => BinaryOp::Mul,
        ast::AssignOp::DivAssign => BinaryOp::Div,
        ast::AssignOp::ModAssign => BinaryOp::Mod,
        ast::AssignOp::ExpAssign => BinaryOp::Pow,
        ast::AssignOp::AndAssign => BinaryOp::And,
        ast::AssignOp::OrAssign => BinaryOp::Or,
        _ => {
            unsupported(ctx, assign.span, "assignment operator");
            return None;
        }
    };
    let value = combine(compound, false, target.clone(), right_is_string, right);
    Some((target, value))
}

fn lower_assignment(ctx: &mut TransformationContext, assign: &ast::AssignExpr) -> Expression {
    let Some((target, value)) = lower_assignment_parts(ctx, assign) else {
        return Expression::Nil;
    };
    let value = if is_literal(&value) { value } else { ctx.cache_in_temp(value) };
    ctx.add_preceding_statements([Statement::assign(target, value.clone())]);
    value
}

/// `x = x + 1` for `x++` / `x--`, `None` for targets that cannot be assigned.
pub(crate) fn lower_update_parts(
    ctx: &mut TransformationContext,
    update: &ast::UpdateExpr,
) -> Option<(Expression, Expression)> {
    let target = match unwrap_parens(&update.arg) {
        ast::Expr::Ident(ident) => Expression::identifier(lua_name(ident.sym.as_ref())),
        ast::Expr::Member(member) => {
            let (table, key) = lower_member_parts(ctx, member);
            Expression::index(table, key)
        }
        _ => {
            unsupported(ctx, update.span, "update target");
            return None;
        }
    };
    let value = Expression::binary(update_op(update.op), target.clone(), Expression::Number(1.0));
    Some((target, value))
}

fn update_op(op: ast::UpdateOp) -> BinaryOp {
    match op {
        ast::UpdateOp::PlusPlus => BinaryOp::Add,
        ast::UpdateOp::MinusMinus => BinaryOp::Sub,
    }
}

fn lower_update(ctx: &mut TransformationContext, update: &ast::UpdateExpr) -> Expression {
    let Some((target, value)) = lower_update_parts(ctx, update) else {
        return Expression::Nil;
    };
    if update.prefix {
        ctx.add_preceding_statements([Statement::assign(target.clone(), value)]);
        return target;
    }
    let old = ctx.cache_in_temp(target.clone());
    ctx.add_preceding_statements([Statement::assign(
        target,
        Expression::binary(update_op(update.op), old.clone(), Expression::Number(1.0)),
    )]);
    old
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_template() {
        assert_eq!(unescape_template("a\\nb"), "a\nb");
        assert_eq!(unescape_template("\\`x\\${y}"), "`x${y}");
        assert_eq!(unescape_template("plain"), "plain");
    }

    #[test]
    fn test_combine_picks_concatenation() {
        let a = Expression::identifier("a");
        let s = Expression::string("s");
        assert_eq!(
            tslx_lua::print_expression(&combine(BinaryOp::Add, false, a.clone(), false, s.clone())),
            "a .. \"s\""
        );
        assert_eq!(
            tslx_lua::print_expression(&combine(BinaryOp::Add, false, a.clone(), false, a.clone())),
            "a + a"
        );
        assert_eq!(
            tslx_lua::print_expression(&combine(BinaryOp::Sub, false, a.clone(), true, s)),
            "a - \"s\""
        );
    }
}
