use tslx_diagnostics::DiagnosticCode;
use tslx_transpiler::{transpile, Program, TranspileResult};

fn transpile_files(files: &[(&str, &str)]) -> TranspileResult {
    let mut builder = Program::builder();
    for (path, text) in files {
        builder = builder.add_file(path, *text);
    }
    let program = builder.build();
    transpile(&program, &mut [])
}

fn lua(source: &str) -> String {
    let result = transpile_files(&[("/project/main.ts", source)]);
    assert!(
        !result.diagnostics.has_errors(),
        "unexpected diagnostics: {:?}",
        result.diagnostics.codes()
    );
    result.output_for("/project/main.ts").unwrap().code.clone()
}

#[test]
fn test_script_declarations_are_global() {
    let source = r#"
        let x = 1;
        x = x + 2;
        const nil = 3;
        print(nil);
    "#;
    assert_eq!(lua(source), "x = 1\nx = x + 2\n____nil = 3\nprint(____nil)\n");
}

#[test]
fn test_module_exports() {
    let source = r#"
        export const a = 1;
        export function add(a: number, b: number) {
            return a + b;
        }
    "#;
    assert_eq!(
        lua(source),
        "local ____exports = {}\n\
         local a = 1\n\
         ____exports.a = a\n\
         local function add(a, b)\n    return a + b\nend\n\
         ____exports.add = add\n\
         return ____exports\n"
    );
}

#[test]
fn test_string_concatenation() {
    let source = r#"
        declare const x: number;
        export const s = "a" + 1;
        export const t = `a${x}b`;
    "#;
    let code = lua(source);
    assert!(code.contains("local s = \"a\" .. 1\n"), "{}", code);
    assert!(code.contains("local t = \"a\" .. tostring(x) .. \"b\"\n"), "{}", code);
}

#[test]
fn test_delete_uses_lualib() {
    let result = transpile_files(&[(
        "/project/main.ts",
        "export const obj = { k: 1 };\ndelete obj.k;\n",
    )]);
    let code = &result.output_for("/project/main.ts").unwrap().code;
    assert_eq!(
        code,
        "local ____lualib = require(\"lualib_bundle\")\n\
         local __TS__Delete = ____lualib.__TS__Delete\n\
         local ____exports = {}\n\
         local obj = {k = 1}\n\
         __TS__Delete(obj, \"k\")\n\
         return ____exports\n"
    );
    let bundle = result.lualib_bundle().unwrap();
    assert_eq!(bundle.output_path, std::path::PathBuf::from("/project/lualib_bundle.lua"));
    assert!(bundle.code.contains("local function __TS__Delete"));
}

#[test]
fn test_argument_evaluation_order() {
    let source = r#"
        declare function f(): number;
        declare function g(a: number, b: number): void;
        let i = 0;
        g(f(), i++);
    "#;
    assert_eq!(
        lua(source),
        "i = 0\n\
         local ____temp_1 = f()\n\
         local ____temp_0 = i\n\
         i = ____temp_0 + 1\n\
         g(____temp_1, ____temp_0)\n"
    );
}

#[test]
fn test_conditional_expression() {
    let source = r#"
        declare const c: boolean;
        export const v = c ? 1 : 2;
    "#;
    assert_eq!(
        lua(source),
        "local ____exports = {}\n\
         local ____temp_0\n\
         if c then\n    ____temp_0 = 1\nelse\n    ____temp_0 = 2\nend\n\
         local v = ____temp_0\n\
         ____exports.v = v\n\
         return ____exports\n"
    );
}

#[test]
fn test_imports_resolve_relative_to_source_dir() {
    let result = transpile_files(&[
        ("/project/main.ts", "import { helper } from \"./lib/util\";\nhelper();\n"),
        ("/project/lib/util.ts", "export function helper() {}\n"),
    ]);
    assert!(!result.diagnostics.has_errors());
    assert_eq!(
        result.output_for("/project/main.ts").unwrap().code,
        "local ____exports = {}\n\
         local ____util = require(\"lib.util\")\n\
         local helper = ____util.helper\n\
         helper()\n\
         return ____exports\n"
    );
    assert_eq!(
        result.output_for("/project/lib/util.ts").unwrap().code,
        "local ____exports = {}\n\
         local function helper() end\n\
         ____exports.helper = helper\n\
         return ____exports\n"
    );
}

#[test]
fn test_unsupported_constructs_are_reported() {
    let result = transpile_files(&[("/project/main.ts", "class A {}\nfor (;;) {}\n")]);
    assert_eq!(
        result.diagnostics.codes(),
        vec![DiagnosticCode::UnsupportedStatement, DiagnosticCode::UnsupportedStatement]
    );
}

#[test]
fn test_parse_error_still_produces_output() {
    let result = transpile_files(&[("/project/main.ts", "let = ;")]);
    assert!(result.diagnostics.codes().contains(&DiagnosticCode::ParseError));
    assert_eq!(result.output_for("/project/main.ts").unwrap().code, "");
}
