use std::path::PathBuf;
use tslx_diagnostics::DiagnosticCode;
use tslx_transform::{with_bundled_declarations, ExtensionOptions, ExtensionsPlugin};
use tslx_transpiler::{transpile, Plugin, Program, ProgramBuilder, TranspileResult};

const MAIN: &str = "/project/main.ts";

fn compile_with(builder: ProgramBuilder, files: &[(&str, &str)], options: ExtensionOptions) -> TranspileResult {
    let mut builder = builder;
    for (path, text) in files {
        builder = builder.add_file(path, *text);
    }
    let program = builder.build();
    let mut plugins: Vec<Box<dyn Plugin>> = vec![Box::new(ExtensionsPlugin::new(options))];
    transpile(&program, &mut plugins)
}

fn compile(files: &[(&str, &str)], options: ExtensionOptions) -> TranspileResult {
    compile_with(with_bundled_declarations(Program::builder()), files, options)
}

fn main_lua(source: &str) -> String {
    let result = compile(&[(MAIN, source)], ExtensionOptions::default());
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics.codes()
    );
    result.output_for(MAIN).unwrap().code.clone()
}

#[test]
fn test_new_lua_set() {
    assert_eq!(
        main_lua(r#"const s = newLuaSet("foo", "bar");"#),
        "s = {foo = true, bar = true}\n"
    );
}

#[test]
fn test_new_lua_set_spread_array_literal() {
    assert_eq!(
        main_lua(r#"const s = newLuaSet(...["a", "b", "c"]);"#),
        "s = {a = true, b = true, c = true}\n"
    );
}

#[test]
fn test_new_lua_set_other_spread_is_an_error() {
    let source = r#"
        declare const values: string[];
        const s = newLuaSet(...values);
    "#;
    let result = compile(&[(MAIN, source)], ExtensionOptions::default());
    assert_eq!(result.diagnostics.codes(), vec![DiagnosticCode::SpreadNotSupported]);
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "s = {[table.unpack(values)] = true}\n"
    );
}

#[test]
fn test_new_lua_set_evaluates_each_argument_once_in_order() {
    let source = r#"
        declare function f(): string;
        let i = 0;
        const s = newLuaSet(f(), i++);
    "#;
    assert_eq!(
        main_lua(source),
        "i = 0\n\
         local ____temp_1 = f()\n\
         local ____temp_0 = i\n\
         i = ____temp_0 + 1\n\
         s = {[____temp_1] = true, [____temp_0] = true}\n"
    );
}

#[test]
fn test_assume_disappears() {
    let source = r#"
        declare function sideEffect(): number;
        declare const v: unknown;
        assume<string>(sideEffect());
        const x = assume<number>(v);
    "#;
    let code = main_lua(source);
    assert_eq!(code, "x = nil\n");
    assert!(!code.contains("sideEffect"));
}

#[test]
fn test_keys_and_key_set() {
    let source = r#"
        interface Foo {
            a: number;
            b: string;
        }
        const k = keys<Foo>();
        const ks = keySet<Foo>();
        const inline = keys<{ x: 1; y: 2 }>();
    "#;
    assert_eq!(
        main_lua(source),
        "k = {\"a\", \"b\"}\nks = {a = true, b = true}\ninline = {\"x\", \"y\"}\n"
    );
}

#[test]
fn test_keys_of_union_type_query_and_utility_types() {
    let source = r#"
        interface A { a: number; b: string }
        interface B { c: string; a: number }
        const cfg = { x: 1, y: 2 };
        const k = keys<A | B>();
        const t = keySet<typeof cfg>();
        const p = keys<Partial<A>>();
    "#;
    assert_eq!(
        main_lua(source),
        "cfg = {x = 1, y = 2}\nk = {\"a\"}\nt = {x = true, y = true}\np = {\"a\", \"b\"}\n"
    );
}

#[test]
fn test_keys_of_unresolvable_type_is_reported() {
    let source = r#"
        let n = 1;
        const k = keys<typeof n>();
        const s = keySet<string>();
    "#;
    let result = compile(&[(MAIN, source)], ExtensionOptions::default());
    assert_eq!(
        result.diagnostics.codes(),
        vec![DiagnosticCode::UnenumerableType, DiagnosticCode::UnenumerableType]
    );
    assert_eq!(result.output_for(MAIN).unwrap().code, "n = 1\nk = {}\ns = {}\n");
}

#[test]
fn test_keys_without_single_type_argument_is_empty() {
    let source = r#"
        const none = keys();
        const two = keySet<{ a: 1 }, { b: 1 }>();
    "#;
    assert_eq!(main_lua(source), "none = {}\ntwo = {}\n");
}

#[test]
fn test_project_files_matching_regex() {
    let options = ExtensionOptions {
        replace_dot_with_dash: true,
        ..Default::default()
    };
    let result = compile(
        &[
            (MAIN, r#"const files = getProjectFilesMatchingRegex(".*\\.test\\.ts");"#),
            ("/project/foo.test.ts", ""),
            ("/project/folder/bar.test.tsx", ""),
        ],
        options,
    );
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "files = {\"foo-test\", \"folder/bar-test\"}\n"
    );

    // Output names get the same treatment
    assert_eq!(
        result.output_for("/project/foo.test.ts").unwrap().output_path,
        PathBuf::from("/project/foo-test.lua")
    );
    assert_eq!(
        result.output_for("/project/folder/bar.test.tsx").unwrap().output_path,
        PathBuf::from("/project/folder/bar-test.lua")
    );
    assert_eq!(result.output_for(MAIN).unwrap().output_path, PathBuf::from("/project/main.lua"));
}

#[test]
fn test_project_files_keep_dots_by_default() {
    let result = compile(
        &[
            (MAIN, r#"const files = getProjectFilesMatchingRegex("\\.spec\\.");"#),
            ("/project/a.spec.ts", ""),
        ],
        ExtensionOptions::default(),
    );
    assert_eq!(result.output_for(MAIN).unwrap().code, "files = {\"a.spec\"}\n");
    assert_eq!(
        result.output_for("/project/a.spec.ts").unwrap().output_path,
        PathBuf::from("/project/a.spec.lua")
    );
}

#[test]
fn test_project_files_pattern_must_be_a_string_literal() {
    let source = r#"
        declare const pattern: string;
        const a = getProjectFilesMatchingRegex(pattern);
        const b = getProjectFilesMatchingRegex();
    "#;
    let result = compile(&[(MAIN, source)], ExtensionOptions::default());
    assert_eq!(
        result.diagnostics.codes(),
        vec![DiagnosticCode::PatternNotStringLiteral, DiagnosticCode::PatternNotStringLiteral]
    );
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "a = getProjectFilesMatchingRegex(pattern)\nb = getProjectFilesMatchingRegex()\n"
    );
}

#[test]
fn test_project_files_invalid_pattern() {
    let result = compile(
        &[(MAIN, r#"const a = getProjectFilesMatchingRegex("(");"#)],
        ExtensionOptions::default(),
    );
    assert_eq!(result.diagnostics.codes(), vec![DiagnosticCode::InvalidPattern]);
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "a = getProjectFilesMatchingRegex(\"(\")\n"
    );
}

#[test]
fn test_nil() {
    assert_eq!(main_lua("const x = nil;"), "x = nil\n");
}

#[test]
fn test_local_named_nil_is_not_the_intrinsic() {
    let source = r#"
        export {};
        const nil = 3;
        const y = nil;
    "#;
    assert_eq!(
        main_lua(source),
        "local ____exports = {}\nlocal ____nil = 3\nlocal y = ____nil\nreturn ____exports\n"
    );
}

#[test]
fn test_simplify_delete() {
    let options = ExtensionOptions {
        simplify_delete: true,
        ..Default::default()
    };
    let source = r#"
        declare const foo: { bar?: number };
        delete foo.bar;
        const retValue = delete foo["bar"];
    "#;
    let result = compile(&[(MAIN, source)], options);
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "foo.bar = nil\nfoo.bar = nil\nretValue = true\n"
    );
    assert!(result.lualib_bundle().is_none());
}

#[test]
fn test_simplified_delete_on_parenthesized_table() {
    let options = ExtensionOptions {
        simplify_delete: true,
        ..Default::default()
    };
    let source = r#"
        declare const a: { c?: number } | undefined;
        declare const b: { c?: number };
        const r = b;
        delete (a || b).c;
    "#;
    let result = compile(&[(MAIN, source)], options);
    assert!(result.diagnostics.is_empty());
    // Without the `;` Lua reads `b(a or b).c = nil`
    assert_eq!(result.output_for(MAIN).unwrap().code, "r = b\n;(a or b).c = nil\n");
}

#[test]
fn test_simplified_delete_stays_inside_short_circuit() {
    let options = ExtensionOptions {
        simplify_delete: true,
        ..Default::default()
    };
    let source = r#"
        declare const a: { b?: number };
        declare const c: boolean;
        c && delete a.b;
    "#;
    let result = compile(&[(MAIN, source)], options);
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "local ____temp_0 = c\n\
         if ____temp_0 then\n    a.b = nil\n    ____temp_0 = true\nend\n"
    );
    assert!(result.lualib_bundle().is_none());
}

#[test]
fn test_lualib_bookkeeping_is_per_file() {
    let options = ExtensionOptions {
        simplify_delete: true,
        ..Default::default()
    };
    let result = compile(
        &[
            (
                "/project/a.ts",
                "declare const foo: { bar?: number } | undefined;\ndelete foo?.bar;\n",
            ),
            ("/project/b.ts", "declare const baz: { qux?: number };\ndelete baz.qux;\n"),
        ],
        options,
    );
    assert!(result.diagnostics.is_empty());
    let a = &result.output_for("/project/a.ts").unwrap().code;
    assert!(a.starts_with("local ____lualib = require(\"lualib_bundle\")\n"), "{}", a);
    assert_eq!(result.output_for("/project/b.ts").unwrap().code, "baz.qux = nil\n");
    assert!(result.lualib_bundle().is_some());
}

#[test]
fn test_delete_without_simplification_uses_lualib() {
    let result = compile(
        &[(MAIN, "declare const foo: { bar?: number };\ndelete foo.bar;\n")],
        ExtensionOptions::default(),
    );
    let code = &result.output_for(MAIN).unwrap().code;
    assert!(code.contains("__TS__Delete(foo, \"bar\")"), "{}", code);
    assert!(result.lualib_bundle().is_some());
}

#[test]
fn test_optional_chain_delete_is_not_simplified() {
    let options = ExtensionOptions {
        simplify_delete: true,
        ..Default::default()
    };
    let source = r#"
        declare const foo: { bar?: number } | undefined;
        declare const baz: { qux?: number };
        delete foo?.bar;
        delete baz.qux;
    "#;
    let result = compile(&[(MAIN, source)], options);
    let code = &result.output_for(MAIN).unwrap().code;
    assert!(code.starts_with("local ____lualib = require(\"lualib_bundle\")\n"), "{}", code);
    assert!(code.contains("__TS__Delete(foo, \"bar\")"), "{}", code);
    assert!(code.contains("baz.qux = nil\n"), "{}", code);
    assert!(result.lualib_bundle().is_some());
}

#[test]
fn test_use_nil_warning() {
    let options = ExtensionOptions {
        warn_use_nil: true,
        ..Default::default()
    };
    let result = compile(&[(MAIN, "const a = undefined;")], options);
    assert_eq!(result.diagnostics.codes(), vec![DiagnosticCode::UseNil]);
    assert!(!result.diagnostics.has_errors());
    assert_eq!(result.output_for(MAIN).unwrap().code, "a = nil\n");
}

#[test]
fn test_double_equals_warnings() {
    let options = ExtensionOptions {
        warn_use_double_equals: true,
        ..Default::default()
    };
    let source = r#"
        declare const a: number;
        const b = a === 1;
        const c = a !== 1;
        const d = a == 1;
    "#;
    let result = compile(&[(MAIN, source)], options);
    assert_eq!(
        result.diagnostics.codes(),
        vec![DiagnosticCode::UseEqualsEquals, DiagnosticCode::UseNotEquals]
    );
    assert_eq!(
        result.output_for(MAIN).unwrap().code,
        "b = a == 1\nc = a ~= 1\nd = a == 1\n"
    );
}

#[test]
fn test_warnings_off_by_default() {
    let source = "declare const a: number;\nconst b = a === undefined;\n";
    assert_eq!(main_lua(source), "b = a == nil\n");
}

#[test]
fn test_missing_declarations_disable_rewrites() {
    let source = r#"
        declare function newLuaSet(...values: string[]): unknown;
        const s = newLuaSet("a");
    "#;
    let result = compile_with(Program::builder(), &[(MAIN, source)], ExtensionOptions::default());
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.output_for(MAIN).unwrap().code, "s = newLuaSet(\"a\")\n");
}

#[test]
fn test_output_without_intrinsics_is_unchanged() {
    let source = r#"
        const x = { a: 1 };
        print(x.a);
    "#;
    let with_plugin = main_lua(source);
    let program = with_bundled_declarations(Program::builder()).add_file(MAIN, source).build();
    let plain = transpile(&program, &mut []);
    assert_eq!(with_plugin, plain.output_for(MAIN).unwrap().code);
}
