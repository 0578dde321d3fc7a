//! TypeScript parser wrapper using SWC
//!
//! Parses `.ts`, `.tsx` and `.d.ts` sources into SWC modules. All files of a
//! program share one [`SourceMap`], so every node position is unique across
//! the program; [`to_span`] maps them back to file-relative diagnostic spans.

use anyhow::Result;
use swc_common::{input::StringInput, sync::Lrc, BytePos, FileName, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{lexer::Lexer, Parser, Syntax, TsSyntax};
use tslx_diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, FileId, Span};

// Re-export AST types for consumers that need to inspect the AST
pub use swc_ecma_ast;

pub use swc_common;
pub use swc_common::Spanned;

/// Which grammar a file is parsed with, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
    Declaration,
}

impl Dialect {
    pub fn for_path(path: &str) -> Self {
        if path.ends_with(".d.ts") || path.ends_with(".d.mts") || path.ends_with(".d.cts") {
            Dialect::Declaration
        } else if path.ends_with(".tsx") {
            Dialect::Tsx
        } else {
            Dialect::TypeScript
        }
    }

    fn syntax(self) -> Syntax {
        Syntax::Typescript(TsSyntax {
            tsx: self == Dialect::Tsx,
            decorators: true,
            dts: self == Dialect::Declaration,
            no_early_errors: false,
            disallow_ambiguous_jsx_like: false,
        })
    }
}

/// Result of parsing one file.
#[derive(Debug)]
pub struct ParseResult {
    /// `None` when the parser hit an unrecoverable error
    pub module: Option<Module>,
    pub dialect: Dialect,
    /// First position of the file inside the shared source map
    pub start_pos: BytePos,
    /// One past the last position of the file
    pub end_pos: BytePos,
    pub diagnostics: Diagnostics,
}

/// Parse one file into the shared source map.
///
/// Parse failures are reported as `P001` diagnostics; an unrecoverable error
/// leaves `module` empty instead of failing the whole program.
pub fn parse_file(
    source_map: &Lrc<SourceMap>,
    file_id: FileId,
    filename: &str,
    source: &str,
) -> ParseResult {
    let dialect = Dialect::for_path(filename);
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );
    let start_pos = source_file.start_pos;

    let lexer = Lexer::new(
        dialect.syntax(),
        swc_ecma_ast::EsVersion::Es2022,
        StringInput::from(&*source_file),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let mut diagnostics = Diagnostics::new();

    let module = match parser.parse_module() {
        Ok(module) => Some(module),
        Err(e) => {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::ParseError, e.kind().msg().to_string())
                    .with_span(to_span(e.span(), start_pos, file_id))
                    .build(),
            );
            None
        }
    };

    for error in parser.take_errors() {
        diagnostics.push(
            Diagnostic::new(DiagnosticCode::ParseError, error.kind().msg().to_string())
                .with_span(to_span(error.span(), start_pos, file_id))
                .build(),
        );
    }

    ParseResult {
        module,
        dialect,
        start_pos,
        end_pos: source_file.end_pos,
        diagnostics,
    }
}

/// Parse standalone TypeScript source into a module.
pub fn parse_typescript(source: &str, filename: &str) -> Result<Module> {
    let source_map: Lrc<SourceMap> = Default::default();
    let result = parse_file(&source_map, FileId(0), filename, source);
    match result.module {
        Some(module) if !result.diagnostics.has_errors() => Ok(module),
        _ => {
            let message = result
                .diagnostics
                .iter()
                .map(|d| d.message.clone())
                .collect::<Vec<_>>()
                .join("; ");
            Err(anyhow::anyhow!("Parse error in {}: {}", filename, message))
        }
    }
}

/// Convert an SWC span to a file-relative diagnostic span.
pub fn to_span(swc_span: swc_common::Span, start_pos: BytePos, file_id: FileId) -> Span {
    Span::new(
        file_id,
        swc_span.lo.0.saturating_sub(start_pos.0),
        swc_span.hi.0.saturating_sub(start_pos.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::for_path("/p/index.d.ts"), Dialect::Declaration);
        assert_eq!(Dialect::for_path("/p/view.tsx"), Dialect::Tsx);
        assert_eq!(Dialect::for_path("/p/foo.test.ts"), Dialect::TypeScript);
    }

    #[test]
    fn test_parse_simple_function() {
        let source = r#"
            function factorial(n: number): number {
                if (n <= 1) return 1;
                return n * factorial(n - 1);
            }
        "#;

        let module = parse_typescript(source, "main.ts").unwrap();
        assert_eq!(module.body.len(), 1);
    }

    #[test]
    fn test_parse_declarations() {
        let source = "declare function keys<T>(): Array<keyof T>\ndeclare const nil: undefined\n";
        let module = parse_typescript(source, "index.d.ts").unwrap();
        assert_eq!(module.body.len(), 2);
    }

    #[test]
    fn test_spans_are_file_relative() {
        let source_map: Lrc<SourceMap> = Default::default();
        let _first = parse_file(&source_map, FileId(0), "a.ts", "let a = 1;");
        let second = parse_file(&source_map, FileId(1), "b.ts", "let b = ;");

        assert!(second.module.is_none());
        let diag = second.diagnostics.iter().next().unwrap();
        assert_eq!(diag.code, DiagnosticCode::ParseError);
        assert_eq!(diag.span.file_id, FileId(1));
        assert!(diag.span.start < 10);
    }
}
