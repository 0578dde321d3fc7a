//! Resolution of the intrinsic declarations to checker symbols.

use std::collections::HashMap;
use swc_ecma_ast as ast;
use tslx_transpiler::{Checker, Program, SymbolId};

/// The declarations the extensions give meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    NewLuaSet,
    Assume,
    Keys,
    KeySet,
    GetProjectFilesMatchingRegex,
    Nil,
}

impl Intrinsic {
    pub const ALL: [Intrinsic; 6] = [
        Intrinsic::NewLuaSet,
        Intrinsic::Assume,
        Intrinsic::Keys,
        Intrinsic::KeySet,
        Intrinsic::GetProjectFilesMatchingRegex,
        Intrinsic::Nil,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::NewLuaSet => "newLuaSet",
            Intrinsic::Assume => "assume",
            Intrinsic::Keys => "keys",
            Intrinsic::KeySet => "keySet",
            Intrinsic::GetProjectFilesMatchingRegex => "getProjectFilesMatchingRegex",
            Intrinsic::Nil => "nil",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }
}

/// Intrinsic name to symbol for one declarations file.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    by_symbol: HashMap<SymbolId, Intrinsic>,
}

impl SymbolRegistry {
    /// Record the top-level functions and variables of `declarations_path`.
    /// A missing file gives an empty registry.
    pub fn build(program: &Program, checker: &Checker, declarations_path: &str) -> Self {
        let mut registry = Self::default();
        let Some(file) = program.get_source_file(declarations_path) else {
            log::debug!("Extensions declarations {} not in program, intrinsics disabled", declarations_path);
            return registry;
        };

        for item in &file.module.body {
            let ast::ModuleItem::Stmt(ast::Stmt::Decl(decl)) = item else {
                continue;
            };
            match decl {
                ast::Decl::Fn(f) => registry.record(checker, &f.ident),
                ast::Decl::Var(var) => {
                    for declarator in &var.decls {
                        if let ast::Pat::Ident(binding) = &declarator.name {
                            registry.record(checker, &binding.id);
                        }
                    }
                }
                _ => {}
            }
        }
        log::debug!(
            "Resolved {} of {} intrinsics from {}",
            registry.by_symbol.len(),
            Intrinsic::ALL.len(),
            declarations_path
        );
        registry
    }

    fn record(&mut self, checker: &Checker, name: &ast::Ident) {
        let (Some(intrinsic), Some(symbol)) = (Intrinsic::from_name(name.sym.as_ref()), checker.symbol_at_location(name))
        else {
            return;
        };
        self.by_symbol.insert(symbol, intrinsic);
    }

    /// Which intrinsic `symbol` is, if any.
    pub fn intrinsic(&self, symbol: SymbolId) -> Option<Intrinsic> {
        self.by_symbol.get(&symbol).copied()
    }

    pub fn identity_of(&self, intrinsic: Intrinsic) -> Option<SymbolId> {
        self.by_symbol
            .iter()
            .find_map(|(symbol, i)| (*i == intrinsic).then_some(*symbol))
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BUNDLED_DECLARATIONS_PATH, EXTENSIONS_DECLARATIONS};

    #[test]
    fn test_resolves_all_intrinsics() {
        let program = Program::builder()
            .add_file(BUNDLED_DECLARATIONS_PATH, EXTENSIONS_DECLARATIONS)
            .add_file("/project/main.ts", "")
            .build();
        let checker = Checker::new(&program);
        let registry = SymbolRegistry::build(&program, &checker, BUNDLED_DECLARATIONS_PATH);
        assert_eq!(registry.len(), Intrinsic::ALL.len());
        for intrinsic in Intrinsic::ALL {
            assert!(registry.identity_of(intrinsic).is_some(), "{}", intrinsic.name());
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let program = Program::builder().add_file("/project/main.ts", "").build();
        let checker = Checker::new(&program);
        let registry = SymbolRegistry::build(&program, &checker, BUNDLED_DECLARATIONS_PATH);
        assert!(registry.is_empty());
        assert_eq!(registry.identity_of(Intrinsic::Nil), None);
    }

    #[test]
    fn test_same_names_elsewhere_are_ignored() {
        let program = Program::builder()
            .add_file("/project/fake.d.ts", "declare function keys<T>(): string[];")
            .add_file("/project/main.ts", "")
            .build();
        let checker = Checker::new(&program);
        let registry = SymbolRegistry::build(&program, &checker, BUNDLED_DECLARATIONS_PATH);
        assert!(registry.is_empty());
    }
}
