//! Runtime support routines ("lualib features") emitted code can depend on.

use std::collections::BTreeSet;
use tslx_lua as lua;

/// Module name the bundle is required by.
pub const LUALIB_BUNDLE_MODULE: &str = "lualib_bundle";
pub const LUALIB_BUNDLE_FILE: &str = "lualib_bundle.lua";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LuaLibFeature {
    Delete,
    TypeOf,
}

impl LuaLibFeature {
    /// Global name of the routine, e.g. `__TS__Delete`.
    pub fn function_name(&self) -> &'static str {
        match self {
            LuaLibFeature::Delete => "__TS__Delete",
            LuaLibFeature::TypeOf => "__TS__TypeOf",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            LuaLibFeature::Delete => {
                "local function __TS__Delete(target, key)\n    target[key] = nil\n    return true\nend\n"
            }
            LuaLibFeature::TypeOf => concat!(
                "local function __TS__TypeOf(value)\n",
                "    local luaType = type(value)\n",
                "    if luaType == \"table\" then\n",
                "        return \"object\"\n",
                "    elseif luaType == \"nil\" then\n",
                "        return \"undefined\"\n",
                "    else\n",
                "        return luaType\n",
                "    end\n",
                "end\n",
            ),
        }
    }
}

/// `local ____lualib = require("lualib_bundle")` plus one local per feature.
pub fn import_statements(features: &BTreeSet<LuaLibFeature>) -> Vec<lua::Statement> {
    if features.is_empty() {
        return Vec::new();
    }
    let mut statements = vec![lua::Statement::local(
        "____lualib",
        lua::Expression::call(
            lua::Expression::identifier("require"),
            vec![lua::Expression::string(LUALIB_BUNDLE_MODULE)],
        ),
    )];
    for feature in features {
        statements.push(lua::Statement::local(
            feature.function_name(),
            lua::Expression::index(
                lua::Expression::identifier("____lualib"),
                lua::Expression::string(feature.function_name()),
            ),
        ));
    }
    statements
}

/// Source of `lualib_bundle.lua` holding the given features.
pub fn bundle_source(features: &BTreeSet<LuaLibFeature>) -> String {
    let mut out = String::new();
    for feature in features {
        out.push_str(feature.source());
        out.push('\n');
    }
    out.push_str("return {\n");
    for feature in features {
        out.push_str(&format!("    {} = {},\n", feature.function_name(), feature.function_name()));
    }
    out.push_str("}\n");
    out
}
