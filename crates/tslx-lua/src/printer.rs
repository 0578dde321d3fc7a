//! Lua source printer
//!
//! Parenthesizes only where Lua precedence or the prefix-expression grammar
//! requires it.

use crate::ast::*;

const INDENT: &str = "    ";

/// Print a whole chunk, one statement per line.
pub fn print_file(file: &File) -> String {
    let mut printer = Printer::default();
    printer.block(&file.statements);
    printer.out
}

pub fn print_statement(statement: &Statement) -> String {
    let mut printer = Printer::default();
    printer.statement(statement);
    printer.out.trim_end().to_string()
}

pub fn print_expression(expression: &Expression) -> String {
    let mut printer = Printer::default();
    printer.expression(expression);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn block(&mut self, block: &Block) {
        for statement in block {
            self.statement(statement);
        }
    }

    fn nested_block(&mut self, block: &Block) {
        self.indent += 1;
        self.block(block);
        self.indent -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        self.line_start();
        match statement {
            Statement::Local { names, values } => {
                self.out.push_str("local ");
                self.out.push_str(&names.join(", "));
                if !values.is_empty() {
                    self.out.push_str(" = ");
                    self.expression_list(values);
                }
                self.out.push('\n');
            }
            Statement::LocalFunction { name, params, body } => {
                self.out.push_str("local function ");
                self.out.push_str(name);
                self.function_tail(params, body);
                self.out.push('\n');
            }
            Statement::Assignment { targets, values } => {
                let start = self.out.len();
                self.expression_list(targets);
                self.guard_leading_paren(start);
                self.out.push_str(" = ");
                self.expression_list(values);
                self.out.push('\n');
            }
            Statement::Call(call) => {
                let start = self.out.len();
                self.expression(call);
                self.guard_leading_paren(start);
                self.out.push('\n');
            }
            Statement::Return(values) => {
                self.out.push_str("return");
                if !values.is_empty() {
                    self.out.push(' ');
                    self.expression_list(values);
                }
                self.out.push('\n');
            }
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                self.out.push_str("if ");
                self.expression(condition);
                self.out.push_str(" then\n");
                self.nested_block(then_block);
                if let Some(else_block) = else_block {
                    self.line_start();
                    self.out.push_str("else\n");
                    self.nested_block(else_block);
                }
                self.line_start();
                self.out.push_str("end\n");
            }
            Statement::While { condition, body } => {
                self.out.push_str("while ");
                self.expression(condition);
                self.out.push_str(" do\n");
                self.nested_block(body);
                self.line_start();
                self.out.push_str("end\n");
            }
            Statement::Do(body) => {
                self.out.push_str("do\n");
                self.nested_block(body);
                self.line_start();
                self.out.push_str("end\n");
            }
            Statement::Break => self.out.push_str("break\n"),
        }
    }

    /// A statement starting with `(` would continue the previous line as a call.
    fn guard_leading_paren(&mut self, start: usize) {
        if self.out[start..].starts_with('(') {
            self.out.insert(start, ';');
        }
    }

    fn function_tail(&mut self, params: &[String], body: &Block) {
        self.out.push('(');
        self.out.push_str(&params.join(", "));
        self.out.push(')');
        if body.is_empty() {
            self.out.push_str(" end");
            return;
        }
        self.out.push('\n');
        self.nested_block(body);
        self.line_start();
        self.out.push_str("end");
    }

    fn expression_list(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expression(expression);
        }
    }

    fn expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Nil => self.out.push_str("nil"),
            Expression::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Expression::Number(n) => self.number(*n),
            Expression::String(s) => self.string(s),
            Expression::Dots => self.out.push_str("..."),
            Expression::Identifier(name) => self.out.push_str(name),
            Expression::Table(fields) => self.table(fields),
            Expression::Index { table, key } => {
                self.prefix(table);
                match key.as_ref() {
                    Expression::String(name) if is_valid_identifier(name) => {
                        self.out.push('.');
                        self.out.push_str(name);
                    }
                    key => {
                        self.out.push('[');
                        self.expression(key);
                        self.out.push(']');
                    }
                }
            }
            Expression::Call { callee, args } => {
                self.prefix(callee);
                self.out.push('(');
                self.expression_list(args);
                self.out.push(')');
            }
            Expression::Function { params, body } => {
                self.out.push_str("function");
                self.function_tail(params, body);
            }
            Expression::Binary { op, left, right } => {
                let precedence = op.precedence();
                let (left_min, right_min) = if op.is_right_associative() {
                    (precedence + 1, precedence)
                } else {
                    (precedence, precedence + 1)
                };
                self.operand(left, left_min);
                self.out.push(' ');
                self.out.push_str(op.as_str());
                self.out.push(' ');
                self.operand(right, right_min);
            }
            Expression::Unary { op, operand } => {
                self.out.push_str(op.as_str());
                // `--` would start a comment
                let negative_operand = match operand.as_ref() {
                    Expression::Unary { op: UnaryOp::Negate, .. } => true,
                    Expression::Number(n) => *n < 0.0,
                    _ => false,
                };
                if *op == UnaryOp::Negate && negative_operand {
                    self.out.push(' ');
                }
                self.operand(operand, UNARY_PRECEDENCE);
            }
        }
    }

    /// Print `expression`, parenthesized if it binds looser than `min_precedence`.
    fn operand(&mut self, expression: &Expression, min_precedence: u8) {
        let precedence = match expression {
            Expression::Binary { op, .. } => op.precedence(),
            Expression::Unary { .. } => UNARY_PRECEDENCE,
            _ => u8::MAX,
        };
        if precedence < min_precedence {
            self.out.push('(');
            self.expression(expression);
            self.out.push(')');
        } else {
            self.expression(expression);
        }
    }

    fn prefix(&mut self, expression: &Expression) {
        if expression.is_prefix_expression() {
            self.expression(expression);
        } else {
            self.out.push('(');
            self.expression(expression);
            self.out.push(')');
        }
    }

    fn table(&mut self, fields: &[TableField]) {
        if fields.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            match &field.key {
                None => {}
                Some(Expression::String(name)) if is_valid_identifier(name) => {
                    self.out.push_str(name);
                    self.out.push_str(" = ");
                }
                Some(key) => {
                    self.out.push('[');
                    self.expression(key);
                    self.out.push_str("] = ");
                }
            }
            self.expression(&field.value);
        }
        self.out.push('}');
    }

    fn number(&mut self, n: f64) {
        if n.is_nan() {
            self.out.push_str("(0 / 0)");
        } else if n.is_infinite() {
            self.out.push_str(if n > 0.0 { "math.huge" } else { "-math.huge" });
        } else if n.fract() == 0.0 && n.abs() < 1e15 {
            self.out.push_str(&format!("{}", n as i64));
        } else {
            self.out.push_str(&format!("{}", n));
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                    self.out.push_str(&format!("\\{:03}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Expression {
        Expression::identifier(name)
    }

    #[test]
    fn test_set_table() {
        let table = Expression::table(vec![
            TableField::keyed(Expression::string("foo"), Expression::Boolean(true)),
            TableField::keyed(Expression::string("not valid"), Expression::Boolean(true)),
            TableField::keyed(id("x"), Expression::Boolean(true)),
        ]);
        assert_eq!(
            print_expression(&table),
            r#"{foo = true, ["not valid"] = true, [x] = true}"#
        );
    }

    #[test]
    fn test_list_table() {
        let table = Expression::table(vec![
            TableField::positional(Expression::string("foo-test")),
            TableField::positional(Expression::string("folder/bar-test")),
        ]);
        assert_eq!(print_expression(&table), r#"{"foo-test", "folder/bar-test"}"#);
        assert_eq!(print_expression(&Expression::table(vec![])), "{}");
    }

    #[test]
    fn test_precedence() {
        // (a + b) * c
        let sum = Expression::binary(BinaryOp::Add, id("a"), id("b"));
        let product = Expression::binary(BinaryOp::Mul, sum, id("c"));
        assert_eq!(print_expression(&product), "(a + b) * c");

        // a - (b - c)
        let inner = Expression::binary(BinaryOp::Sub, id("b"), id("c"));
        let outer = Expression::binary(BinaryOp::Sub, id("a"), inner);
        assert_eq!(print_expression(&outer), "a - (b - c)");

        // a .. b .. c stays flat on the right
        let inner = Expression::binary(BinaryOp::Concat, id("b"), id("c"));
        let outer = Expression::binary(BinaryOp::Concat, id("a"), inner);
        assert_eq!(print_expression(&outer), "a .. b .. c");

        let not = Expression::unary(UnaryOp::Not, Expression::binary(BinaryOp::Eq, id("a"), id("b")));
        assert_eq!(print_expression(&not), "not (a == b)");
    }

    #[test]
    fn test_index_and_call() {
        let field = Expression::index(id("obj"), Expression::string("bar"));
        assert_eq!(print_expression(&field), "obj.bar");

        let computed = Expression::index(id("obj"), Expression::Number(1.0));
        assert_eq!(print_expression(&computed), "obj[1]");

        let on_table = Expression::index(Expression::table(vec![]), Expression::string("x"));
        assert_eq!(print_expression(&on_table), "({}).x");

        let call = Expression::call(id("print"), vec![Expression::string("a\"b\n")]);
        assert_eq!(print_expression(&call), r#"print("a\"b\n")"#);
    }

    #[test]
    fn test_statements() {
        let file = File {
            statements: vec![
                Statement::local("foo", Expression::table(vec![])),
                Statement::assign(Expression::index(id("foo"), Expression::string("bar")), Expression::Nil),
                Statement::If {
                    condition: id("ok"),
                    then_block: vec![Statement::Return(vec![Expression::Boolean(true)])],
                    else_block: Some(vec![Statement::Return(vec![])]),
                },
                Statement::LocalFunction {
                    name: "f".to_string(),
                    params: vec!["a".to_string()],
                    body: vec![Statement::Return(vec![id("a")])],
                },
            ],
        };
        assert_eq!(
            print_file(&file),
            "local foo = {}\n\
             foo.bar = nil\n\
             if ok then\n    return true\nelse\n    return\nend\n\
             local function f(a)\n    return a\nend\n"
        );
    }

    #[test]
    fn test_parenthesized_statement_start() {
        let either = Expression::binary(BinaryOp::Or, id("a"), id("b"));
        let file = File {
            statements: vec![
                Statement::local("r", id("b")),
                Statement::assign(Expression::index(either.clone(), Expression::string("c")), Expression::Nil),
                Statement::Call(Expression::call(Expression::index(either, Expression::string("f")), vec![])),
            ],
        };
        assert_eq!(
            print_file(&file),
            "local r = b\n;(a or b).c = nil\n;(a or b).f()\n"
        );
    }

    #[test]
    fn test_loop() {
        let loop_statement = Statement::While {
            condition: Expression::Boolean(true),
            body: vec![
                Statement::If {
                    condition: Expression::unary(UnaryOp::Not, id("ok")),
                    then_block: vec![Statement::Break],
                    else_block: None,
                },
                Statement::Do(vec![]),
            ],
        };
        assert_eq!(
            print_statement(&loop_statement),
            "while true do\n    if not ok then\n        break\n    end\n    do\n    end\nend"
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(print_expression(&Expression::Number(3.0)), "3");
        assert_eq!(print_expression(&Expression::Number(0.5)), "0.5");
        assert_eq!(print_expression(&Expression::Number(f64::INFINITY)), "math.huge");
    }
}
