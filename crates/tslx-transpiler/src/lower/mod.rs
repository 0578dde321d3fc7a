//! Default TypeScript to Lua lowering.
//!
//! Covers the subset of the language the extensions and their tests need;
//! anything else is reported as unsupported and lowered to `nil` (or
//! dropped, for statements).

pub(crate) mod expression;
pub(crate) mod module;
pub(crate) mod statement;

use tslx_lua as lua;

/// Lua name for a TypeScript identifier. Names Lua cannot use as-is get a
/// `____` prefix, with characters outside `[A-Za-z0-9_]` hex-escaped.
pub fn lua_name(name: &str) -> String {
    if lua::is_valid_identifier(name) {
        return name.to_string();
    }
    let mut out = String::from("____");
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push_str(&format!("_{:X}", c as u32));
        }
    }
    out
}

/// Values nothing can change between evaluation and use.
pub(crate) fn is_literal(expr: &lua::Expression) -> bool {
    matches!(
        expr,
        lua::Expression::Nil
            | lua::Expression::Boolean(_)
            | lua::Expression::Number(_)
            | lua::Expression::String(_)
            | lua::Expression::Function { .. }
    )
}

/// Expressions whose evaluation has no effect and can be repeated or dropped.
pub(crate) fn is_side_effect_free(expr: &lua::Expression) -> bool {
    is_literal(expr) || matches!(expr, lua::Expression::Identifier(_) | lua::Expression::Dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lua_name() {
        assert_eq!(lua_name("foo"), "foo");
        assert_eq!(lua_name("nil"), "____nil");
        assert_eq!(lua_name("end"), "____end");
        assert_eq!(lua_name("$x"), "_____24x");
    }

    #[test]
    fn test_side_effect_classes() {
        assert!(is_literal(&lua::Expression::Nil));
        assert!(!is_literal(&lua::Expression::identifier("x")));
        assert!(is_side_effect_free(&lua::Expression::identifier("x")));
        let call = lua::Expression::call(lua::Expression::identifier("f"), vec![]);
        assert!(!is_side_effect_free(&call));
    }
}
