//! TypeScript to Lua transpiler core for tslx
//!
//! A [`Program`] holds every parsed file, the [`Checker`] binds names to
//! symbols and resolves declared types, and [`transpile`] lowers each file
//! to Lua through a [`TransformationContext`] that [`Plugin`]s can hook into.

pub mod checker;
pub mod context;
pub mod emit;
pub mod lower;
pub mod lualib;
pub mod paths;
pub mod plugin;
pub mod program;

pub use checker::{Checker, Property, Symbol, SymbolId, SymbolKind, Type};
pub use context::TransformationContext;
pub use emit::{output_path_for, transpile, write_files, OutputFile, TranspileResult};
pub use lower::lua_name;
pub use lualib::LuaLibFeature;
pub use plugin::{Plugin, Visitors};
pub use program::{CompilerOptions, Program, ProgramBuilder, ProgramError, SourceFile};
