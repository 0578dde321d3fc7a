//! Lua syntax tree definitions

/// Reserved words that cannot be used as Lua names.
pub const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Check if a string can be written as a bare Lua name (`t.name`, `{name = v}`).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !LUA_KEYWORDS.contains(&name)
}

/// Binary operators, see [`BinaryOp::precedence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "~=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Concat => "..",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }

    /// Binding strength as in the Lua reference manual, unary operators sit at 7.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => 3,
            BinaryOp::Concat => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
            BinaryOp::Pow => 8,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOp::Concat | BinaryOp::Pow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Length,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not ",
            UnaryOp::Negate => "-",
            UnaryOp::Length => "#",
        }
    }
}

pub const UNARY_PRECEDENCE: u8 = 7;

/// One entry of a table constructor.
///
/// A field without a key is positional (`{value}`), otherwise it is
/// written `[key] = value`, or `key = value` for identifier-shaped string keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub key: Option<Expression>,
    pub value: Expression,
}

impl TableField {
    pub fn positional(value: Expression) -> Self {
        Self { key: None, value }
    }

    pub fn keyed(key: Expression, value: Expression) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }
}

/// Lua expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Vararg `...`
    Dots,
    Identifier(String),
    Table(Vec<TableField>),
    /// `table[key]`
    Index {
        table: Box<Expression>,
        key: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
    Function {
        params: Vec<String>,
        body: Block,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(value.into())
    }

    pub fn table(fields: Vec<TableField>) -> Self {
        Expression::Table(fields)
    }

    pub fn index(table: Expression, key: Expression) -> Self {
        Expression::Index {
            table: Box::new(table),
            key: Box::new(key),
        }
    }

    pub fn call(callee: Expression, args: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Arguments of a call expression, `None` for anything else.
    pub fn call_args(&self) -> Option<&[Expression]> {
        match self {
            Expression::Call { args, .. } => Some(args),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expression::Call { .. })
    }

    /// Expressions that can be called or indexed without parentheses.
    pub fn is_prefix_expression(&self) -> bool {
        matches!(
            self,
            Expression::Identifier(_) | Expression::Index { .. } | Expression::Call { .. }
        )
    }
}

pub type Block = Vec<Statement>;

/// Lua statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `local a, b = x, y`, values may be empty
    Local {
        names: Vec<String>,
        values: Vec<Expression>,
    },
    LocalFunction {
        name: String,
        params: Vec<String>,
        body: Block,
    },
    Assignment {
        targets: Vec<Expression>,
        values: Vec<Expression>,
    },
    /// A call evaluated for its effects
    Call(Expression),
    Return(Vec<Expression>),
    If {
        condition: Expression,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        condition: Expression,
        body: Block,
    },
    Do(Block),
    Break,
}

impl Statement {
    pub fn local(name: impl Into<String>, value: Expression) -> Self {
        Statement::Local {
            names: vec![name.into()],
            values: vec![value],
        }
    }

    pub fn assign(target: Expression, value: Expression) -> Self {
        Statement::Assignment {
            targets: vec![target],
            values: vec![value],
        }
    }
}

/// A complete output chunk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    pub statements: Block,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validity() {
        assert!(is_valid_identifier("foo_1"));
        assert!(is_valid_identifier("_G"));
        assert!(!is_valid_identifier("1foo"));
        assert!(!is_valid_identifier("nil"));
        assert!(!is_valid_identifier("foo-bar"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_call_args() {
        let call = Expression::call(
            Expression::identifier("__TS__Delete"),
            vec![Expression::identifier("obj"), Expression::string("k")],
        );
        assert_eq!(call.call_args().map(|a| a.len()), Some(2));
        assert!(Expression::Nil.call_args().is_none());
    }
}
