//! Name binding and property lookup
//!
//! The checker resolves every identifier of the program to the declaration it
//! refers to, so callers can compare references by identity instead of by
//! spelling. Types are only understood as far as needed to list the property
//! names of object-like types.
//!
//! Script files (no import or export) share one global scope, module files
//! get their own scope on top of it. Declarations are hoisted to the start
//! of the block, function or file that contains them, and a name declared
//! twice in the same scope (overloads, merged interfaces) is one symbol.

use crate::program::Program;
use std::collections::{HashMap, HashSet};
use swc_ecma_ast as ast;
use tslx_diagnostics::FileId;

/// Opaque handle to a declared symbol, unique within one [`Checker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
    Class,
    Enum,
    Import,
    Interface,
    TypeAlias,
    TypeParameter,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub file: FileId,
    /// Span of the first declaration name
    pub span: swc_common::Span,
}

/// A property of an object-like type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
}

/// Resolved shape of a type node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Type {
    properties: Vec<Property>,
    resolved: bool,
}

impl Type {
    /// False when some part of the type node named nothing the checker knows.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }


    fn push(&mut self, name: String) {
        if !self.properties.iter().any(|p| p.name == name) {
            self.properties.push(Property { name });
        }
    }
}

#[derive(Debug, Clone)]
enum TypeDeclaration {
    Interface {
        members: Vec<String>,
        /// Positions of the `extends` names, resolved through the type map
        extends: Vec<u32>,
    },
    Alias(Box<ast::TsType>),
    Class(Vec<String>),
}

/// What `typeof name` sees of a variable.
#[derive(Debug, Clone)]
enum ValueShape {
    Annotated(Box<ast::TsType>),
    /// Keys of an object literal initializer
    Object(Vec<String>),
}

#[derive(Debug, Default)]
pub struct Checker {
    symbols: Vec<Symbol>,
    /// Identifier position -> symbol in the value namespace
    values: HashMap<u32, SymbolId>,
    /// Identifier position -> symbol in the type namespace
    types: HashMap<u32, SymbolId>,
    declarations: HashMap<SymbolId, Vec<TypeDeclaration>>,
    value_shapes: HashMap<SymbolId, ValueShape>,
}

impl Checker {
    /// Bind every file of the program.
    pub fn new(program: &Program) -> Self {
        let mut binder = Binder::default();

        for file in program.source_files().filter(|f| !f.is_external_module()) {
            binder.file = file.id;
            binder.hoist_module_items(&file.module.body);
        }

        for file in program.source_files() {
            binder.file = file.id;
            if file.is_external_module() {
                binder.scoped(|b| {
                    b.hoist_module_items(&file.module.body);
                    b.bind_module_items(&file.module.body);
                });
            } else {
                binder.bind_module_items(&file.module.body);
            }
        }

        log::debug!(
            "bound {} symbols, {} value references, {} type references",
            binder.checker.symbols.len(),
            binder.checker.values.len(),
            binder.checker.types.len()
        );
        binder.checker
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Symbol a value identifier declares or refers to.
    pub fn symbol_at_location(&self, ident: &ast::Ident) -> Option<SymbolId> {
        self.values.get(&ident.span.lo.0).copied()
    }

    /// Symbol a type name declares or refers to.
    pub fn type_symbol_at_location(&self, ident: &ast::Ident) -> Option<SymbolId> {
        self.types.get(&ident.span.lo.0).copied()
    }

    /// Symbol of a callee expression, looking through parentheses.
    pub fn symbol_of_callee(&self, expr: &ast::Expr) -> Option<SymbolId> {
        match expr {
            ast::Expr::Ident(ident) => self.symbol_at_location(ident),
            ast::Expr::Paren(paren) => self.symbol_of_callee(&paren.expr),
            _ => None,
        }
    }

    pub fn type_from_type_node(&self, node: &ast::TsType) -> Type {
        let mut ty = Type::default();
        let mut visited = HashSet::new();
        let resolved = self.collect_type(node, &mut ty, &mut visited);
        ty.resolved = resolved;
        ty
    }

    /// Properties in declaration order: own members first, then inherited ones.
    pub fn properties_of_type<'t>(&self, ty: &'t Type) -> &'t [Property] {
        &ty.properties
    }

    fn collect_type(&self, node: &ast::TsType, ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        match node {
            ast::TsType::TsTypeLit(lit) => {
                for name in lit.members.iter().filter_map(type_element_name) {
                    ty.push(name);
                }
                true
            }
            ast::TsType::TsParenthesizedType(paren) => self.collect_type(&paren.type_ann, ty, visited),
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => intersection
                .types
                .iter()
                .fold(true, |resolved, member| self.collect_type(member, ty, visited) && resolved),
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsUnionType(union)) => {
                self.collect_union(&union.types, ty, visited)
            }
            ast::TsType::TsTypeRef(reference) => self.collect_reference(reference, ty, visited),
            ast::TsType::TsTypeQuery(query) => match &query.expr_name {
                ast::TsTypeQueryExpr::TsEntityName(ast::TsEntityName::Ident(ident)) => {
                    match self.symbol_at_location(ident) {
                        Some(id) => self.collect_value(id, ty, visited),
                        None => false,
                    }
                }
                _ => false,
            },
            ast::TsType::TsMappedType(mapped) => match &mapped.type_param.constraint {
                Some(constraint) => self.collect_keys(constraint, ty, visited),
                None => false,
            },
            _ => false,
        }
    }

    /// Properties shared by every member, in the order of the first.
    fn collect_union(&self, members: &[Box<ast::TsType>], ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        let mut resolved = true;
        let mut common: Option<Vec<Property>> = None;
        for member in members {
            let mut member_type = Type::default();
            resolved &= self.collect_type(member, &mut member_type, &mut visited.clone());
            common = Some(match common {
                None => member_type.properties,
                Some(previous) => previous
                    .into_iter()
                    .filter(|p| member_type.properties.contains(p))
                    .collect(),
            });
        }
        for property in common.unwrap_or_default() {
            ty.push(property.name);
        }
        resolved
    }

    fn collect_reference(&self, reference: &ast::TsTypeRef, ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        let ast::TsEntityName::Ident(ident) = &reference.type_name else {
            return false;
        };
        if let Some(id) = self.type_symbol_at_location(ident) {
            return self.collect_symbol(id, ty, visited);
        }

        // Library utility types, when not shadowed by a declaration
        let args = reference
            .type_params
            .as_ref()
            .map(|params| params.params.as_slice())
            .unwrap_or_default();
        let name: &str = ident.sym.as_ref();
        match (name, args) {
            ("Partial" | "Required" | "Readonly", [inner]) => self.collect_type(inner, ty, visited),
            ("Pick", [_, keys]) | ("Record", [keys, _]) => self.collect_keys(keys, ty, visited),
            ("Omit", [inner, omitted]) => {
                let mut all = Type::default();
                let mut removed = Type::default();
                let resolved =
                    self.collect_type(inner, &mut all, visited) && self.collect_keys(omitted, &mut removed, visited);
                for property in all.properties {
                    if !removed.properties.contains(&property) {
                        ty.push(property.name);
                    }
                }
                resolved
            }
            _ => false,
        }
    }

    /// Property names denoted by a key type: string or number literals,
    /// unions of them, or `keyof T`.
    fn collect_keys(&self, node: &ast::TsType, ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        match node {
            ast::TsType::TsLitType(lit) => match &lit.lit {
                ast::TsLit::Str(s) => {
                    ty.push(s.value.as_str().unwrap_or("").to_string());
                    true
                }
                ast::TsLit::Number(n) => {
                    ty.push(n.value.to_string());
                    true
                }
                _ => false,
            },
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsUnionType(union)) => union
                .types
                .iter()
                .fold(true, |resolved, member| self.collect_keys(member, ty, visited) && resolved),
            ast::TsType::TsParenthesizedType(paren) => self.collect_keys(&paren.type_ann, ty, visited),
            ast::TsType::TsTypeOperator(operator) if matches!(operator.op, ast::TsTypeOperatorOp::KeyOf) => {
                self.collect_type(&operator.type_ann, ty, visited)
            }
            _ => false,
        }
    }

    fn collect_value(&self, id: SymbolId, ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        if !visited.insert(id) {
            return false;
        }
        match self.value_shapes.get(&id) {
            Some(ValueShape::Annotated(annotation)) => self.collect_type(annotation, ty, visited),
            Some(ValueShape::Object(names)) => {
                for name in names {
                    ty.push(name.clone());
                }
                true
            }
            None => false,
        }
    }

    fn collect_symbol(&self, id: SymbolId, ty: &mut Type, visited: &mut HashSet<SymbolId>) -> bool {
        if !visited.insert(id) {
            return true;
        }
        let Some(declarations) = self.declarations.get(&id) else {
            return false;
        };

        let mut resolved = true;
        for declaration in declarations {
            match declaration {
                TypeDeclaration::Interface { members, .. } | TypeDeclaration::Class(members) => {
                    for name in members {
                        ty.push(name.clone());
                    }
                }
                TypeDeclaration::Alias(aliased) => resolved &= self.collect_type(aliased, ty, visited),
            }
        }

        for declaration in declarations {
            if let TypeDeclaration::Interface { extends, .. } = declaration {
                for position in extends {
                    match self.types.get(position) {
                        Some(base) => resolved &= self.collect_symbol(*base, ty, visited),
                        None => resolved = false,
                    }
                }
            }
        }
        resolved
    }
}

/// Name of a property-like member, `None` for signatures without one.
fn type_element_name(element: &ast::TsTypeElement) -> Option<String> {
    let (key, computed) = match element {
        ast::TsTypeElement::TsPropertySignature(p) => (&p.key, p.computed),
        ast::TsTypeElement::TsMethodSignature(m) => (&m.key, m.computed),
        ast::TsTypeElement::TsGetterSignature(g) => (&g.key, g.computed),
        ast::TsTypeElement::TsSetterSignature(s) => (&s.key, s.computed),
        _ => return None,
    };
    match key.as_ref() {
        ast::Expr::Ident(ident) if !computed => Some(ident.sym.to_string()),
        ast::Expr::Lit(ast::Lit::Str(s)) => Some(s.value.as_str().unwrap_or("").to_string()),
        ast::Expr::Lit(ast::Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

pub(crate) fn prop_name(key: &ast::PropName) -> Option<String> {
    match key {
        ast::PropName::Ident(ident) => Some(ident.sym.to_string()),
        ast::PropName::Str(s) => Some(s.value.as_str().unwrap_or("").to_string()),
        ast::PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn value_shape(binding: &ast::BindingIdent, init: Option<&ast::Expr>) -> Option<ValueShape> {
    if let Some(ann) = &binding.type_ann {
        return Some(ValueShape::Annotated(ann.type_ann.clone()));
    }
    let ast::Expr::Object(object) = without_assertions(init?) else {
        return None;
    };
    let mut names: Vec<String> = Vec::new();
    for prop in &object.props {
        let ast::PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        let name = match prop.as_ref() {
            ast::Prop::Shorthand(ident) => Some(ident.sym.to_string()),
            ast::Prop::KeyValue(kv) => prop_name(&kv.key),
            ast::Prop::Method(method) => prop_name(&method.key),
            ast::Prop::Getter(getter) => prop_name(&getter.key),
            ast::Prop::Setter(setter) => prop_name(&setter.key),
            _ => None,
        };
        if let Some(name) = name {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    Some(ValueShape::Object(names))
}

fn without_assertions(expr: &ast::Expr) -> &ast::Expr {
    match expr {
        ast::Expr::Paren(paren) => without_assertions(&paren.expr),
        ast::Expr::TsAs(as_expr) => without_assertions(&as_expr.expr),
        ast::Expr::TsConstAssertion(assertion) => without_assertions(&assertion.expr),
        ast::Expr::TsSatisfies(satisfies) => without_assertions(&satisfies.expr),
        other => other,
    }
}

fn class_member_names(class: &ast::Class) -> Vec<String> {
    let mut names = Vec::new();
    for member in &class.body {
        let name = match member {
            ast::ClassMember::ClassProp(prop) if !prop.is_static => prop_name(&prop.key),
            ast::ClassMember::Method(method) if !method.is_static => prop_name(&method.key),
            ast::ClassMember::Constructor(ctor) => {
                for param in &ctor.params {
                    if let ast::ParamOrTsParamProp::TsParamProp(prop) = param {
                        if let ast::TsParamPropParam::Ident(binding) = &prop.param {
                            names.push(binding.id.sym.to_string());
                        }
                    }
                }
                None
            }
            _ => None,
        };
        if let Some(name) = name {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Value,
    Type,
    Both,
}

/// Walks the AST with a stack of visible names, recording what each
/// identifier resolves to.
struct Binder {
    checker: Checker,
    file: FileId,
    values: Vec<(String, SymbolId)>,
    types: Vec<(String, SymbolId)>,
    /// Start of each open scope in `values` and `types`
    scopes: Vec<(usize, usize)>,
}

impl Default for Binder {
    fn default() -> Self {
        Self {
            checker: Checker::default(),
            file: FileId::DUMMY,
            values: Vec::new(),
            types: Vec::new(),
            scopes: Vec::new(),
        }
    }
}

impl Binder {
    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.push((self.values.len(), self.types.len()));
        f(self);
        if let Some((values, types)) = self.scopes.pop() {
            self.values.truncate(values);
            self.types.truncate(types);
        }
    }

    fn current_scope(&self) -> (usize, usize) {
        self.scopes.last().copied().unwrap_or((0, 0))
    }

    fn declare(&mut self, ident: &ast::Ident, kind: SymbolKind, namespace: Namespace) -> SymbolId {
        let name = ident.sym.as_ref();
        let (value_start, type_start) = self.current_scope();

        let existing = match namespace {
            Namespace::Type => self.types[type_start..].iter().rev().find(|(n, _)| n == name),
            _ => self.values[value_start..].iter().rev().find(|(n, _)| n == name),
        };

        let id = match existing {
            Some((_, id)) => *id,
            None => {
                let id = SymbolId(self.checker.symbols.len() as u32);
                self.checker.symbols.push(Symbol {
                    name: name.to_string(),
                    kind,
                    file: self.file,
                    span: ident.span,
                });
                if namespace != Namespace::Type {
                    self.values.push((name.to_string(), id));
                }
                if namespace != Namespace::Value {
                    self.types.push((name.to_string(), id));
                }
                id
            }
        };

        if namespace != Namespace::Type {
            self.checker.values.insert(ident.span.lo.0, id);
        }
        if namespace != Namespace::Value {
            self.checker.types.insert(ident.span.lo.0, id);
        }
        id
    }

    fn add_type_declaration(&mut self, id: SymbolId, declaration: TypeDeclaration) {
        self.checker.declarations.entry(id).or_default().push(declaration);
    }

    fn resolve_value(&mut self, ident: &ast::Ident) {
        let name = ident.sym.as_ref();
        if let Some((_, id)) = self.values.iter().rev().find(|(n, _)| n == name) {
            self.checker.values.insert(ident.span.lo.0, *id);
        }
    }

    fn resolve_type(&mut self, ident: &ast::Ident) {
        let name = ident.sym.as_ref();
        if let Some((_, id)) = self.types.iter().rev().find(|(n, _)| n == name) {
            self.checker.types.insert(ident.span.lo.0, *id);
        }
    }

    // Hoisting

    fn hoist_module_items(&mut self, items: &[ast::ModuleItem]) {
        for item in items {
            match item {
                ast::ModuleItem::Stmt(stmt) => self.hoist_stmt(stmt),
                ast::ModuleItem::ModuleDecl(decl) => self.hoist_module_decl(decl),
            }
        }
    }

    fn hoist_module_decl(&mut self, decl: &ast::ModuleDecl) {
        match decl {
            ast::ModuleDecl::Import(import) => {
                for specifier in &import.specifiers {
                    let local = match specifier {
                        ast::ImportSpecifier::Named(named) => &named.local,
                        ast::ImportSpecifier::Default(default) => &default.local,
                        ast::ImportSpecifier::Namespace(namespace) => &namespace.local,
                    };
                    self.declare(local, SymbolKind::Import, Namespace::Both);
                }
            }
            ast::ModuleDecl::ExportDecl(export) => self.hoist_decl(&export.decl),
            ast::ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
                ast::DefaultDecl::Fn(f) => {
                    if let Some(ident) = &f.ident {
                        self.declare(ident, SymbolKind::Function, Namespace::Value);
                    }
                }
                ast::DefaultDecl::Class(c) => {
                    if let Some(ident) = &c.ident {
                        let id = self.declare(ident, SymbolKind::Class, Namespace::Both);
                        self.add_type_declaration(id, TypeDeclaration::Class(class_member_names(&c.class)));
                    }
                }
                ast::DefaultDecl::TsInterfaceDecl(interface) => self.hoist_interface(interface),
            },
            _ => {}
        }
    }

    fn hoist_stmts(&mut self, stmts: &[ast::Stmt]) {
        for stmt in stmts {
            self.hoist_stmt(stmt);
        }
    }

    fn hoist_stmt(&mut self, stmt: &ast::Stmt) {
        if let ast::Stmt::Decl(decl) = stmt {
            self.hoist_decl(decl);
        }
    }

    fn hoist_decl(&mut self, decl: &ast::Decl) {
        match decl {
            ast::Decl::Var(var) => self.hoist_var_decl(var, SymbolKind::Variable),
            ast::Decl::Fn(f) => {
                self.declare(&f.ident, SymbolKind::Function, Namespace::Value);
            }
            ast::Decl::Class(c) => {
                let id = self.declare(&c.ident, SymbolKind::Class, Namespace::Both);
                self.add_type_declaration(id, TypeDeclaration::Class(class_member_names(&c.class)));
            }
            ast::Decl::TsEnum(e) => {
                self.declare(&e.id, SymbolKind::Enum, Namespace::Both);
            }
            ast::Decl::TsInterface(interface) => self.hoist_interface(interface),
            ast::Decl::TsTypeAlias(alias) => {
                let id = self.declare(&alias.id, SymbolKind::TypeAlias, Namespace::Type);
                self.add_type_declaration(id, TypeDeclaration::Alias(alias.type_ann.clone()));
            }
            _ => {}
        }
    }

    fn hoist_interface(&mut self, interface: &ast::TsInterfaceDecl) {
        let id = self.declare(&interface.id, SymbolKind::Interface, Namespace::Type);
        let members = interface.body.body.iter().filter_map(type_element_name).collect();
        let extends = interface
            .extends
            .iter()
            .filter_map(|base| match base.expr.as_ref() {
                ast::Expr::Ident(ident) => Some(ident.span.lo.0),
                _ => None,
            })
            .collect();
        self.add_type_declaration(id, TypeDeclaration::Interface { members, extends });
    }

    fn hoist_var_decl(&mut self, var: &ast::VarDecl, kind: SymbolKind) {
        for declarator in &var.decls {
            let ast::Pat::Ident(binding) = &declarator.name else {
                self.declare_pat(&declarator.name, kind);
                continue;
            };
            let id = self.declare(&binding.id, kind, Namespace::Value);
            if let Some(shape) = value_shape(binding, declarator.init.as_deref()) {
                self.checker.value_shapes.insert(id, shape);
            }
        }
    }

    fn declare_pat(&mut self, pat: &ast::Pat, kind: SymbolKind) {
        match pat {
            ast::Pat::Ident(binding) => {
                self.declare(&binding.id, kind, Namespace::Value);
            }
            ast::Pat::Array(array) => {
                for element in array.elems.iter().flatten() {
                    self.declare_pat(element, kind);
                }
            }
            ast::Pat::Rest(rest) => self.declare_pat(&rest.arg, kind),
            ast::Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ast::ObjectPatProp::KeyValue(kv) => self.declare_pat(&kv.value, kind),
                        ast::ObjectPatProp::Assign(assign) => {
                            self.declare(&assign.key.id, kind, Namespace::Value);
                        }
                        ast::ObjectPatProp::Rest(rest) => self.declare_pat(&rest.arg, kind),
                    }
                }
            }
            ast::Pat::Assign(assign) => self.declare_pat(&assign.left, kind),
            _ => {}
        }
    }

    // Binding

    fn bind_module_items(&mut self, items: &[ast::ModuleItem]) {
        for item in items {
            match item {
                ast::ModuleItem::Stmt(stmt) => self.bind_stmt(stmt),
                ast::ModuleItem::ModuleDecl(decl) => self.bind_module_decl(decl),
            }
        }
    }

    fn bind_module_decl(&mut self, decl: &ast::ModuleDecl) {
        match decl {
            ast::ModuleDecl::ExportDecl(export) => self.bind_decl(&export.decl),
            ast::ModuleDecl::ExportNamed(export) if export.src.is_none() => {
                for specifier in &export.specifiers {
                    if let ast::ExportSpecifier::Named(named) = specifier {
                        if let ast::ModuleExportName::Ident(ident) = &named.orig {
                            self.resolve_value(ident);
                            self.resolve_type(ident);
                        }
                    }
                }
            }
            ast::ModuleDecl::ExportDefaultExpr(export) => self.bind_expr(&export.expr),
            ast::ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
                ast::DefaultDecl::Fn(f) => self.bind_function(&f.function),
                ast::DefaultDecl::Class(c) => self.bind_class(&c.class),
                ast::DefaultDecl::TsInterfaceDecl(interface) => self.bind_interface(interface),
            },
            _ => {}
        }
    }

    fn bind_block(&mut self, stmts: &[ast::Stmt]) {
        self.scoped(|b| {
            b.hoist_stmts(stmts);
            b.bind_stmts(stmts);
        });
    }

    fn bind_stmts(&mut self, stmts: &[ast::Stmt]) {
        for stmt in stmts {
            self.bind_stmt(stmt);
        }
    }

    fn bind_stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::Block(block) => self.bind_block(&block.stmts),
            ast::Stmt::Expr(expr) => self.bind_expr(&expr.expr),
            ast::Stmt::Decl(decl) => self.bind_decl(decl),
            ast::Stmt::Return(ret) => {
                if let Some(arg) = &ret.arg {
                    self.bind_expr(arg);
                }
            }
            ast::Stmt::Throw(throw) => self.bind_expr(&throw.arg),
            ast::Stmt::If(if_stmt) => {
                self.bind_expr(&if_stmt.test);
                self.bind_stmt(&if_stmt.cons);
                if let Some(alt) = &if_stmt.alt {
                    self.bind_stmt(alt);
                }
            }
            ast::Stmt::While(while_stmt) => {
                self.bind_expr(&while_stmt.test);
                self.bind_stmt(&while_stmt.body);
            }
            ast::Stmt::DoWhile(do_while) => {
                self.bind_stmt(&do_while.body);
                self.bind_expr(&do_while.test);
            }
            ast::Stmt::For(for_stmt) => self.scoped(|b| {
                match &for_stmt.init {
                    Some(ast::VarDeclOrExpr::VarDecl(var)) => {
                        b.hoist_var_decl(var, SymbolKind::Variable);
                        b.bind_var_decl(var);
                    }
                    Some(ast::VarDeclOrExpr::Expr(expr)) => b.bind_expr(expr),
                    None => {}
                }
                if let Some(test) = &for_stmt.test {
                    b.bind_expr(test);
                }
                if let Some(update) = &for_stmt.update {
                    b.bind_expr(update);
                }
                b.bind_stmt(&for_stmt.body);
            }),
            ast::Stmt::ForOf(for_of) => {
                self.bind_expr(&for_of.right);
                self.scoped(|b| {
                    b.bind_for_head(&for_of.left);
                    b.bind_stmt(&for_of.body);
                });
            }
            ast::Stmt::ForIn(for_in) => {
                self.bind_expr(&for_in.right);
                self.scoped(|b| {
                    b.bind_for_head(&for_in.left);
                    b.bind_stmt(&for_in.body);
                });
            }
            ast::Stmt::Labeled(labeled) => self.bind_stmt(&labeled.body),
            ast::Stmt::Switch(switch) => {
                self.bind_expr(&switch.discriminant);
                self.scoped(|b| {
                    for case in &switch.cases {
                        b.hoist_stmts(&case.cons);
                    }
                    for case in &switch.cases {
                        if let Some(test) = &case.test {
                            b.bind_expr(test);
                        }
                        b.bind_stmts(&case.cons);
                    }
                });
            }
            ast::Stmt::Try(try_stmt) => {
                self.bind_block(&try_stmt.block.stmts);
                if let Some(handler) = &try_stmt.handler {
                    self.scoped(|b| {
                        if let Some(param) = &handler.param {
                            b.declare_pat(param, SymbolKind::Variable);
                            b.bind_pat(param);
                        }
                        b.bind_block(&handler.body.stmts);
                    });
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.bind_block(&finalizer.stmts);
                }
            }
            _ => {}
        }
    }

    fn bind_for_head(&mut self, head: &ast::ForHead) {
        match head {
            ast::ForHead::VarDecl(var) => {
                self.hoist_var_decl(var, SymbolKind::Variable);
                self.bind_var_decl(var);
            }
            ast::ForHead::Pat(pat) => self.bind_assign_pat(pat),
            _ => {}
        }
    }

    fn bind_decl(&mut self, decl: &ast::Decl) {
        match decl {
            ast::Decl::Var(var) => self.bind_var_decl(var),
            ast::Decl::Fn(f) => self.bind_function(&f.function),
            ast::Decl::Class(c) => self.bind_class(&c.class),
            ast::Decl::TsEnum(e) => {
                for member in &e.members {
                    if let Some(init) = &member.init {
                        self.bind_expr(init);
                    }
                }
            }
            ast::Decl::TsInterface(interface) => self.bind_interface(interface),
            ast::Decl::TsTypeAlias(alias) => self.scoped(|b| {
                b.declare_type_params(alias.type_params.as_deref());
                b.bind_type(&alias.type_ann);
            }),
            _ => {}
        }
    }

    fn bind_interface(&mut self, interface: &ast::TsInterfaceDecl) {
        for base in &interface.extends {
            if let ast::Expr::Ident(ident) = base.expr.as_ref() {
                self.resolve_type(ident);
            }
        }
        self.scoped(|b| {
            b.declare_type_params(interface.type_params.as_deref());
            for member in &interface.body.body {
                b.bind_type_element(member);
            }
        });
    }

    fn bind_var_decl(&mut self, var: &ast::VarDecl) {
        for declarator in &var.decls {
            self.bind_pat(&declarator.name);
            if let Some(init) = &declarator.init {
                self.bind_expr(init);
            }
        }
    }

    fn declare_type_params(&mut self, params: Option<&ast::TsTypeParamDecl>) {
        if let Some(params) = params {
            for param in &params.params {
                self.declare(&param.name, SymbolKind::TypeParameter, Namespace::Type);
            }
        }
    }

    fn bind_function(&mut self, function: &ast::Function) {
        self.scoped(|b| {
            b.declare_type_params(function.type_params.as_deref());
            for param in &function.params {
                b.declare_pat(&param.pat, SymbolKind::Parameter);
            }
            for param in &function.params {
                b.bind_pat(&param.pat);
            }
            if let Some(body) = &function.body {
                b.hoist_stmts(&body.stmts);
                b.bind_stmts(&body.stmts);
            }
        });
    }

    fn bind_arrow(&mut self, arrow: &ast::ArrowExpr) {
        self.scoped(|b| {
            b.declare_type_params(arrow.type_params.as_deref());
            for param in &arrow.params {
                b.declare_pat(param, SymbolKind::Parameter);
            }
            for param in &arrow.params {
                b.bind_pat(param);
            }
            match arrow.body.as_ref() {
                ast::BlockStmtOrExpr::BlockStmt(body) => {
                    b.hoist_stmts(&body.stmts);
                    b.bind_stmts(&body.stmts);
                }
                ast::BlockStmtOrExpr::Expr(expr) => b.bind_expr(expr),
            }
        });
    }

    fn bind_class(&mut self, class: &ast::Class) {
        if let Some(super_class) = &class.super_class {
            self.bind_expr(super_class);
        }
        self.scoped(|b| {
            b.declare_type_params(class.type_params.as_deref());
            for member in &class.body {
                match member {
                    ast::ClassMember::Method(method) => b.bind_function(&method.function),
                    ast::ClassMember::ClassProp(prop) => {
                        if let Some(value) = &prop.value {
                            b.bind_expr(value);
                        }
                    }
                    ast::ClassMember::Constructor(ctor) => b.scoped(|b| {
                        for param in &ctor.params {
                            match param {
                                ast::ParamOrTsParamProp::Param(param) => {
                                    b.declare_pat(&param.pat, SymbolKind::Parameter)
                                }
                                ast::ParamOrTsParamProp::TsParamProp(prop) => {
                                    if let ast::TsParamPropParam::Ident(binding) = &prop.param {
                                        b.declare(&binding.id, SymbolKind::Parameter, Namespace::Value);
                                    }
                                }
                            }
                        }
                        if let Some(body) = &ctor.body {
                            b.hoist_stmts(&body.stmts);
                            b.bind_stmts(&body.stmts);
                        }
                    }),
                    _ => {}
                }
            }
        });
    }

    /// Walk the parts of a declared pattern that are not declarations:
    /// defaults, computed keys and type annotations.
    fn bind_pat(&mut self, pat: &ast::Pat) {
        match pat {
            ast::Pat::Ident(binding) => {
                if let Some(ann) = &binding.type_ann {
                    self.bind_type(&ann.type_ann);
                }
            }
            ast::Pat::Array(array) => {
                for element in array.elems.iter().flatten() {
                    self.bind_pat(element);
                }
            }
            ast::Pat::Rest(rest) => self.bind_pat(&rest.arg),
            ast::Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ast::ObjectPatProp::KeyValue(kv) => {
                            if let ast::PropName::Computed(computed) = &kv.key {
                                self.bind_expr(&computed.expr);
                            }
                            self.bind_pat(&kv.value);
                        }
                        ast::ObjectPatProp::Assign(assign) => {
                            if let Some(value) = &assign.value {
                                self.bind_expr(value);
                            }
                        }
                        ast::ObjectPatProp::Rest(rest) => self.bind_pat(&rest.arg),
                    }
                }
            }
            ast::Pat::Assign(assign) => {
                self.bind_pat(&assign.left);
                self.bind_expr(&assign.right);
            }
            ast::Pat::Expr(expr) => self.bind_expr(expr),
            ast::Pat::Invalid(_) => {}
        }
    }

    /// Patterns on the left of an assignment refer to existing bindings.
    fn bind_assign_pat(&mut self, pat: &ast::Pat) {
        match pat {
            ast::Pat::Ident(binding) => self.resolve_value(&binding.id),
            ast::Pat::Array(array) => {
                for element in array.elems.iter().flatten() {
                    self.bind_assign_pat(element);
                }
            }
            ast::Pat::Rest(rest) => self.bind_assign_pat(&rest.arg),
            ast::Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ast::ObjectPatProp::KeyValue(kv) => self.bind_assign_pat(&kv.value),
                        ast::ObjectPatProp::Assign(assign) => {
                            self.resolve_value(&assign.key.id);
                            if let Some(value) = &assign.value {
                                self.bind_expr(value);
                            }
                        }
                        ast::ObjectPatProp::Rest(rest) => self.bind_assign_pat(&rest.arg),
                    }
                }
            }
            ast::Pat::Assign(assign) => {
                self.bind_assign_pat(&assign.left);
                self.bind_expr(&assign.right);
            }
            ast::Pat::Expr(expr) => self.bind_expr(expr),
            ast::Pat::Invalid(_) => {}
        }
    }

    fn bind_args(&mut self, args: &[ast::ExprOrSpread]) {
        for arg in args {
            self.bind_expr(&arg.expr);
        }
    }

    fn bind_type_args(&mut self, args: Option<&ast::TsTypeParamInstantiation>) {
        if let Some(args) = args {
            for param in &args.params {
                self.bind_type(param);
            }
        }
    }

    fn bind_member(&mut self, member: &ast::MemberExpr) {
        self.bind_expr(&member.obj);
        if let ast::MemberProp::Computed(computed) = &member.prop {
            self.bind_expr(&computed.expr);
        }
    }

    fn bind_expr(&mut self, expr: &ast::Expr) {
        match expr {
            ast::Expr::Ident(ident) => self.resolve_value(ident),
            ast::Expr::Array(array) => {
                for element in array.elems.iter().flatten() {
                    self.bind_expr(&element.expr);
                }
            }
            ast::Expr::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ast::PropOrSpread::Spread(spread) => self.bind_expr(&spread.expr),
                        ast::PropOrSpread::Prop(prop) => self.bind_prop(prop),
                    }
                }
            }
            ast::Expr::Fn(f) => self.scoped(|b| {
                if let Some(ident) = &f.ident {
                    b.declare(ident, SymbolKind::Function, Namespace::Value);
                }
                b.bind_function(&f.function);
            }),
            ast::Expr::Arrow(arrow) => self.bind_arrow(arrow),
            ast::Expr::Class(c) => self.scoped(|b| {
                if let Some(ident) = &c.ident {
                    b.declare(ident, SymbolKind::Class, Namespace::Both);
                }
                b.bind_class(&c.class);
            }),
            ast::Expr::Unary(unary) => self.bind_expr(&unary.arg),
            ast::Expr::Update(update) => self.bind_expr(&update.arg),
            ast::Expr::Bin(bin) => {
                self.bind_expr(&bin.left);
                self.bind_expr(&bin.right);
            }
            ast::Expr::Assign(assign) => {
                match &assign.left {
                    ast::AssignTarget::Simple(target) => self.bind_simple_target(target),
                    ast::AssignTarget::Pat(ast::AssignTargetPat::Array(array)) => {
                        for element in array.elems.iter().flatten() {
                            self.bind_assign_pat(element);
                        }
                    }
                    ast::AssignTarget::Pat(ast::AssignTargetPat::Object(object)) => {
                        for prop in &object.props {
                            if let ast::ObjectPatProp::Assign(assign) = prop {
                                self.resolve_value(&assign.key.id);
                            } else if let ast::ObjectPatProp::KeyValue(kv) = prop {
                                self.bind_assign_pat(&kv.value);
                            }
                        }
                    }
                    ast::AssignTarget::Pat(ast::AssignTargetPat::Invalid(_)) => {}
                }
                self.bind_expr(&assign.right);
            }
            ast::Expr::Member(member) => self.bind_member(member),
            ast::Expr::Cond(cond) => {
                self.bind_expr(&cond.test);
                self.bind_expr(&cond.cons);
                self.bind_expr(&cond.alt);
            }
            ast::Expr::Call(call) => {
                if let ast::Callee::Expr(callee) = &call.callee {
                    self.bind_expr(callee);
                }
                self.bind_type_args(call.type_args.as_deref());
                self.bind_args(&call.args);
            }
            ast::Expr::New(new) => {
                self.bind_expr(&new.callee);
                self.bind_type_args(new.type_args.as_deref());
                if let Some(args) = &new.args {
                    self.bind_args(args);
                }
            }
            ast::Expr::Seq(seq) => {
                for expr in &seq.exprs {
                    self.bind_expr(expr);
                }
            }
            ast::Expr::Tpl(tpl) => {
                for expr in &tpl.exprs {
                    self.bind_expr(expr);
                }
            }
            ast::Expr::TaggedTpl(tagged) => {
                self.bind_expr(&tagged.tag);
                for expr in &tagged.tpl.exprs {
                    self.bind_expr(expr);
                }
            }
            ast::Expr::Paren(paren) => self.bind_expr(&paren.expr),
            ast::Expr::Await(await_expr) => self.bind_expr(&await_expr.arg),
            ast::Expr::Yield(yield_expr) => {
                if let Some(arg) = &yield_expr.arg {
                    self.bind_expr(arg);
                }
            }
            ast::Expr::TsAs(as_expr) => {
                self.bind_expr(&as_expr.expr);
                self.bind_type(&as_expr.type_ann);
            }
            ast::Expr::TsTypeAssertion(assertion) => {
                self.bind_expr(&assertion.expr);
                self.bind_type(&assertion.type_ann);
            }
            ast::Expr::TsSatisfies(satisfies) => {
                self.bind_expr(&satisfies.expr);
                self.bind_type(&satisfies.type_ann);
            }
            ast::Expr::TsNonNull(non_null) => self.bind_expr(&non_null.expr),
            ast::Expr::TsConstAssertion(assertion) => self.bind_expr(&assertion.expr),
            ast::Expr::TsInstantiation(instantiation) => {
                self.bind_expr(&instantiation.expr);
                self.bind_type_args(Some(&*instantiation.type_args));
            }
            ast::Expr::OptChain(chain) => match chain.base.as_ref() {
                ast::OptChainBase::Member(member) => self.bind_member(member),
                ast::OptChainBase::Call(call) => {
                    self.bind_expr(&call.callee);
                    self.bind_type_args(call.type_args.as_deref());
                    self.bind_args(&call.args);
                }
            },
            _ => {}
        }
    }

    fn bind_simple_target(&mut self, target: &ast::SimpleAssignTarget) {
        match target {
            ast::SimpleAssignTarget::Ident(binding) => self.resolve_value(&binding.id),
            ast::SimpleAssignTarget::Member(member) => self.bind_member(member),
            ast::SimpleAssignTarget::Paren(paren) => self.bind_expr(&paren.expr),
            ast::SimpleAssignTarget::OptChain(chain) => {
                if let ast::OptChainBase::Member(member) = chain.base.as_ref() {
                    self.bind_member(member);
                }
            }
            ast::SimpleAssignTarget::TsAs(as_expr) => self.bind_expr(&as_expr.expr),
            ast::SimpleAssignTarget::TsNonNull(non_null) => self.bind_expr(&non_null.expr),
            ast::SimpleAssignTarget::TsTypeAssertion(assertion) => self.bind_expr(&assertion.expr),
            ast::SimpleAssignTarget::TsSatisfies(satisfies) => self.bind_expr(&satisfies.expr),
            _ => {}
        }
    }

    fn bind_prop(&mut self, prop: &ast::Prop) {
        match prop {
            ast::Prop::Shorthand(ident) => self.resolve_value(ident),
            ast::Prop::KeyValue(kv) => {
                if let ast::PropName::Computed(computed) = &kv.key {
                    self.bind_expr(&computed.expr);
                }
                self.bind_expr(&kv.value);
            }
            ast::Prop::Method(method) => self.bind_function(&method.function),
            ast::Prop::Getter(getter) => {
                if let Some(body) = &getter.body {
                    self.bind_block(&body.stmts);
                }
            }
            ast::Prop::Setter(setter) => self.scoped(|b| {
                b.declare_pat(&setter.param, SymbolKind::Parameter);
                if let Some(body) = &setter.body {
                    b.hoist_stmts(&body.stmts);
                    b.bind_stmts(&body.stmts);
                }
            }),
            ast::Prop::Assign(assign) => {
                self.resolve_value(&assign.key);
                self.bind_expr(&assign.value);
            }
        }
    }

    fn bind_type(&mut self, ty: &ast::TsType) {
        match ty {
            ast::TsType::TsTypeRef(reference) => {
                if let ast::TsEntityName::Ident(ident) = &reference.type_name {
                    self.resolve_type(ident);
                }
                self.bind_type_args(reference.type_params.as_deref());
            }
            ast::TsType::TsTypeLit(lit) => {
                for member in &lit.members {
                    self.bind_type_element(member);
                }
            }
            ast::TsType::TsArrayType(array) => self.bind_type(&array.elem_type),
            ast::TsType::TsTupleType(tuple) => {
                for element in &tuple.elem_types {
                    self.bind_type(&element.ty);
                }
            }
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsUnionType(union)) => {
                for member in &union.types {
                    self.bind_type(member);
                }
            }
            ast::TsType::TsUnionOrIntersectionType(ast::TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => {
                for member in &intersection.types {
                    self.bind_type(member);
                }
            }
            ast::TsType::TsParenthesizedType(paren) => self.bind_type(&paren.type_ann),
            ast::TsType::TsTypeOperator(operator) => self.bind_type(&operator.type_ann),
            ast::TsType::TsIndexedAccessType(access) => {
                self.bind_type(&access.obj_type);
                self.bind_type(&access.index_type);
            }
            ast::TsType::TsOptionalType(optional) => self.bind_type(&optional.type_ann),
            ast::TsType::TsTypeQuery(query) => {
                if let ast::TsTypeQueryExpr::TsEntityName(ast::TsEntityName::Ident(ident)) = &query.expr_name {
                    self.resolve_value(ident);
                }
            }
            ast::TsType::TsMappedType(mapped) => {
                if let Some(constraint) = &mapped.type_param.constraint {
                    self.bind_type(constraint);
                }
                self.scoped(|b| {
                    b.declare(&mapped.type_param.name, SymbolKind::TypeParameter, Namespace::Type);
                    if let Some(value) = &mapped.type_ann {
                        b.bind_type(value);
                    }
                });
            }
            ast::TsType::TsRestType(rest) => self.bind_type(&rest.type_ann),
            _ => {}
        }
    }

    fn bind_type_element(&mut self, element: &ast::TsTypeElement) {
        if let ast::TsTypeElement::TsPropertySignature(prop) = element {
            if let Some(ann) = &prop.type_ann {
                self.bind_type(&ann.type_ann);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::Spanned;

    fn program(files: &[(&str, &str)]) -> Program {
        files
            .iter()
            .fold(Program::builder(), |builder, (path, text)| builder.add_file(path, *text))
            .build()
    }

    /// Every identifier named `name` in expression statements and returns of `file`.
    fn references<'p>(program: &'p Program, file: &str, name: &str) -> Vec<&'p ast::Ident> {
        fn walk<'a>(stmts: impl Iterator<Item = &'a ast::Stmt>, name: &str, out: &mut Vec<&'a ast::Ident>) {
            for stmt in stmts {
                match stmt {
                    ast::Stmt::Expr(ast::ExprStmt { expr, .. })
                    | ast::Stmt::Return(ast::ReturnStmt { arg: Some(expr), .. }) => match expr.as_ref() {
                        ast::Expr::Ident(ident) if ident.sym.as_ref() == name => out.push(ident),
                        ast::Expr::Call(call) => {
                            if let ast::Callee::Expr(callee) = &call.callee {
                                if let ast::Expr::Ident(ident) = callee.as_ref() {
                                    if ident.sym.as_ref() == name {
                                        out.push(ident);
                                    }
                                }
                            }
                        }
                        _ => {}
                    },
                    ast::Stmt::Decl(ast::Decl::Fn(f)) => {
                        if let Some(body) = &f.function.body {
                            walk(body.stmts.iter(), name, out);
                        }
                    }
                    ast::Stmt::Block(block) => walk(block.stmts.iter(), name, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        let file = program.get_source_file(file).unwrap();
        walk(file.module.body.iter().filter_map(|item| item.as_stmt()), name, &mut out);
        out
    }

    fn declared_var<'p>(program: &'p Program, file: &str, index: usize) -> &'p ast::Ident {
        let file = program.get_source_file(file).unwrap();
        match &file.module.body[index] {
            ast::ModuleItem::Stmt(ast::Stmt::Decl(ast::Decl::Var(var))) => {
                var.decls[0].name.as_ident().map(|b| &b.id).unwrap()
            }
            ast::ModuleItem::Stmt(ast::Stmt::Decl(ast::Decl::Fn(f))) => &f.ident,
            other => panic!("unexpected item {:?}", other.span()),
        }
    }

    #[test]
    fn test_global_declarations_resolve_across_files() {
        let program = program(&[
            ("/decl/index.d.ts", "declare const nil: undefined\ndeclare function keys<T>(): Array<keyof T>\n"),
            ("/project/main.ts", "export {}\nnil;\nkeys();\n"),
        ]);
        let checker = Checker::new(&program);

        let nil_decl = checker.symbol_at_location(declared_var(&program, "/decl/index.d.ts", 0));
        let keys_decl = checker.symbol_at_location(declared_var(&program, "/decl/index.d.ts", 1));
        assert!(nil_decl.is_some() && keys_decl.is_some());

        let nil_ref = references(&program, "/project/main.ts", "nil")[0];
        let keys_ref = references(&program, "/project/main.ts", "keys")[0];
        assert_eq!(checker.symbol_at_location(nil_ref), nil_decl);
        assert_eq!(checker.symbol_at_location(keys_ref), keys_decl);
        assert_eq!(checker.symbol(nil_decl.unwrap()).unwrap().kind, SymbolKind::Variable);
    }

    #[test]
    fn test_shadowing_gives_a_different_symbol() {
        let program = program(&[
            ("/decl/index.d.ts", "declare const nil: undefined\n"),
            ("/project/main.ts", "function f() {\n  const nil = 3;\n  return nil;\n}\nnil;\n"),
        ]);
        let checker = Checker::new(&program);
        let global = checker.symbol_at_location(declared_var(&program, "/decl/index.d.ts", 0));

        let refs = references(&program, "/project/main.ts", "nil");
        assert_eq!(refs.len(), 2);
        let inner = checker.symbol_at_location(refs[0]);
        assert!(inner.is_some());
        assert_ne!(inner, global);
        assert_eq!(checker.symbol_at_location(refs[1]), global);
    }

    #[test]
    fn test_module_scope_is_private() {
        let program = program(&[
            ("/project/a.ts", "export const hidden = 1;\n"),
            ("/project/b.ts", "hidden;\n"),
        ]);
        let checker = Checker::new(&program);
        let reference = references(&program, "/project/b.ts", "hidden")[0];
        assert_eq!(checker.symbol_at_location(reference), None);
    }

    #[test]
    fn test_hoisted_function_reference() {
        let program = program(&[("/project/main.ts", "later();\nfunction later() {}\n")]);
        let checker = Checker::new(&program);
        let reference = references(&program, "/project/main.ts", "later")[0];
        assert_eq!(
            checker.symbol_at_location(reference),
            checker.symbol_at_location(declared_var(&program, "/project/main.ts", 1))
        );
    }

    fn first_type_arg(program: &Program, file: &str) -> ast::TsType {
        let file = program.get_source_file(file).unwrap();
        for item in &file.module.body {
            if let ast::ModuleItem::Stmt(ast::Stmt::Expr(stmt)) = item {
                if let ast::Expr::Call(call) = stmt.expr.as_ref() {
                    if let Some(args) = &call.type_args {
                        return (*args.params[0]).clone();
                    }
                }
            }
        }
        panic!("no call with type arguments");
    }

    fn resolve(source: &str) -> Type {
        let program = program(&[("/project/main.ts", source)]);
        let checker = Checker::new(&program);
        checker.type_from_type_node(&first_type_arg(&program, "/project/main.ts"))
    }

    fn property_names(source: &str) -> Vec<String> {
        let ty = resolve(source);
        assert!(ty.is_resolved(), "unresolved type in {:?}", source);
        ty.properties.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_interface_properties_in_order() {
        let names = property_names("interface Foo {\n  a: string;\n  b: number;\n}\nf<Foo>();\n");
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_type_literal_and_alias() {
        assert_eq!(property_names("f<{ x: 1; \"y z\": 2; m(): void }>();"), vec!["x", "y z", "m"]);
        assert_eq!(
            property_names("type A = { a: 1 } & B;\ninterface B { b: 2 }\nf<A>();"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_extends_and_merging() {
        let names = property_names(
            "interface Base { base: 1; shared: 2 }\n\
             interface Foo extends Base { own: 1; shared: 3 }\n\
             interface Foo { merged: 1 }\n\
             f<Foo>();",
        );
        assert_eq!(names, vec!["own", "shared", "merged", "base"]);
    }

    #[test]
    fn test_recursive_types_terminate() {
        let names = property_names("interface A extends B { a: 1 }\ninterface B extends A { b: 1 }\nf<A>();");
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_class_instance_members() {
        let names = property_names(
            "class Foo {\n  static s = 1;\n  x = 1;\n  constructor(public y: number) {}\n  m() {}\n}\nf<Foo>();",
        );
        assert_eq!(names, vec!["x", "y", "m"]);
    }

    #[test]
    fn test_union_keeps_common_properties() {
        let names = property_names(
            "interface A { a: 1; b: 2 }\n\
             interface B { c: 3; b: 4; a: 5 }\n\
             f<A | (B & { d: 1 })>();",
        );
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_type_query() {
        assert_eq!(
            property_names("const cfg = { x: 1, \"y z\": 2, m() {} } as const;\nf<typeof cfg>();"),
            vec!["x", "y z", "m"]
        );
        assert_eq!(
            property_names("interface P { p: 1 }\ndeclare const v: P & { q: 2 };\nf<typeof v>();"),
            vec!["p", "q"]
        );
    }

    #[test]
    fn test_utility_and_mapped_types() {
        let decl = "interface A { a: 1; b: 2; c: 3 }\n";
        let names = |call: &str| property_names(&format!("{}{}", decl, call));
        assert_eq!(names("f<Partial<A>>();"), vec!["a", "b", "c"]);
        assert_eq!(names("f<Readonly<Required<A>>>();"), vec!["a", "b", "c"]);
        assert_eq!(names("f<Pick<A, \"a\" | \"c\">>();"), vec!["a", "c"]);
        assert_eq!(names("f<Omit<A, \"b\">>();"), vec!["a", "c"]);
        assert_eq!(names("f<Record<\"k\" | \"l\", number>>();"), vec!["k", "l"]);
        assert_eq!(names("f<{ [K in keyof A]?: boolean }>();"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_declared_name_shadows_utility_type() {
        let names = property_names("interface Partial<T> { own: T }\nf<Partial<{ a: 1 }>>();");
        assert_eq!(names, vec!["own"]);
    }

    #[test]
    fn test_unknown_types_are_unresolved() {
        for source in [
            "f<Missing>();",
            "f<string>();",
            "interface A { a: 1 }\nf<A | string>();",
            "let n = 1;\nf<typeof n>();",
            "f<Partial<Missing>>();",
        ] {
            let ty = resolve(source);
            assert!(!ty.is_resolved(), "{}", source);
            assert!(ty.properties.is_empty(), "{}", source);
        }
        assert!(resolve("f<{}>();").is_resolved());
    }
}
