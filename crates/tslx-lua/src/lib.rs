//! Lua syntax tree for tslx
//!
//! The transpiler lowers TypeScript into these nodes and the printer turns
//! them into Lua 5.2+ source text.

pub mod ast;
pub mod printer;

pub use ast::*;
pub use printer::{print_expression, print_file, print_statement};
