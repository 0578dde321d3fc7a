//! Language extensions for tslx
//!
//! Gives meaning to a handful of declarations that have no implementation of
//! their own (`newLuaSet`, `assume`, `keys`, `keySet`,
//! `getProjectFilesMatchingRegex` and `nil`) by rewriting every reference to
//! them into plain Lua while the program is transpiled. References are
//! matched by the symbol they resolve to, so a local named `nil` is left
//! alone.
//!
//! Optionally it also lowers `delete` to a plain assignment, warns about
//! `undefined` and strict equality, and replaces dots in output file names.

pub mod diagnostics;
pub mod normalize;
pub mod options;
pub mod plugin;
pub mod registry;
pub mod rules;

pub use options::ExtensionOptions;
pub use plugin::ExtensionsPlugin;
pub use registry::{Intrinsic, SymbolRegistry};

use tslx_transpiler::ProgramBuilder;

/// Declarations of the intrinsics.
pub const EXTENSIONS_DECLARATIONS: &str = include_str!("extensions.d.ts");

/// Path the bundled declarations are added to a program under.
pub const BUNDLED_DECLARATIONS_PATH: &str = "/__tslx__/extensions.d.ts";

/// Add the bundled declarations to `builder`.
pub fn with_bundled_declarations(builder: ProgramBuilder) -> ProgramBuilder {
    builder.add_file(BUNDLED_DECLARATIONS_PATH, EXTENSIONS_DECLARATIONS)
}
