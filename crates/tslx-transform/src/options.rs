//! Extension options

use serde::Deserialize;

/// Toggles for the optional rewrites and warnings. Intrinsic rewrites are
/// always on while the declarations file is part of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionOptions {
    /// Replace `.` with `-` in listed file names and in output file names
    pub replace_dot_with_dash: bool,
    /// Lower `delete t.k` to `t.k = nil` instead of a lualib call
    pub simplify_delete: bool,
    /// Warn on every `undefined`
    pub warn_use_nil: bool,
    /// Warn on `===` and `!==`
    pub warn_use_double_equals: bool,
}
