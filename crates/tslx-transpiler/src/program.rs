//! Whole-program view: every parsed source file plus compiler options.

use crate::paths::{common_dir, normalize_path};
use std::path::{Path, PathBuf};
use swc_common::{sync::Lrc, BytePos, SourceMap};
use swc_ecma_ast as ast;
use thiserror::Error;
use tslx_diagnostics::{Diagnostics, FileId, SourceCache, Span};
use tslx_parser::Dialect;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Directory output paths are made relative to; defaults to the common
    /// directory of all non-declaration files
    pub root_dir: Option<PathBuf>,
    /// Where `.lua` files go; defaults to next to their sources
    pub out_dir: Option<PathBuf>,
}

/// One parsed file of the program.
#[derive(Debug)]
pub struct SourceFile {
    pub id: FileId,
    /// Absolute, `/`-separated path
    pub file_name: String,
    pub module: ast::Module,
    pub dialect: Dialect,
    start_pos: BytePos,
    end_pos: BytePos,
}

impl SourceFile {
    pub fn is_declaration_file(&self) -> bool {
        self.dialect == Dialect::Declaration
    }

    /// Files with an import or export get their own scope and an exports table.
    pub fn is_external_module(&self) -> bool {
        self.module
            .body
            .iter()
            .any(|item| matches!(item, ast::ModuleItem::ModuleDecl(_)))
    }

    fn contains(&self, pos: BytePos) -> bool {
        self.start_pos <= pos && pos <= self.end_pos
    }
}

pub struct Program {
    options: CompilerOptions,
    files: Vec<SourceFile>,
    cache: SourceCache,
    diagnostics: Diagnostics,
    // Kept alive because node positions point into it
    _source_map: Lrc<SourceMap>,
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Files in the order they were added to the program.
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn source_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    /// Look a file up by path; relative paths resolve against the current directory.
    pub fn get_source_file(&self, path: impl AsRef<Path>) -> Option<&SourceFile> {
        let name = normalize_path(path);
        self.files.iter().find(|f| f.file_name == name)
    }

    /// Directory that output and file listing paths are relative to.
    pub fn source_dir(&self) -> String {
        if let Some(root) = &self.options.root_dir {
            return normalize_path(root);
        }
        common_dir(
            self.files
                .iter()
                .filter(|f| !f.is_declaration_file())
                .map(|f| f.file_name.as_str()),
        )
        .unwrap_or_else(|| normalize_path("."))
    }

    /// Source text of every file, for rendering diagnostics.
    pub fn source_cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Diagnostics produced while parsing.
    pub fn parse_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Map a node position to a file-relative diagnostic span.
    pub fn span_of(&self, span: swc_common::Span) -> Span {
        match self.files.iter().find(|f| f.contains(span.lo)) {
            Some(file) => tslx_parser::to_span(span, file.start_pos, file.id),
            None => Span::DUMMY,
        }
    }
}

#[derive(Default)]
pub struct ProgramBuilder {
    options: CompilerOptions,
    files: Vec<(String, String)>,
}

impl ProgramBuilder {
    pub fn root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.root_dir = Some(dir.into());
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.out_dir = Some(dir.into());
        self
    }

    pub fn options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a file from memory. A path added twice keeps its first text.
    pub fn add_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        let name = normalize_path(path);
        if !self.files.iter().any(|(existing, _)| *existing == name) {
            self.files.push((name, text.into()));
        }
        self
    }

    /// Add a file from disk.
    pub fn read_file(self, path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProgramError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.add_file(path, text))
    }

    /// Parse every file. Files that fail to parse stay in the program with an
    /// empty module and a `P001` diagnostic.
    pub fn build(self) -> Program {
        let source_map: Lrc<SourceMap> = Default::default();
        let mut cache = SourceCache::new();
        let mut diagnostics = Diagnostics::new();
        let mut files = Vec::with_capacity(self.files.len());

        for (file_name, text) in self.files {
            let id = cache.add_file(&file_name, text.clone());
            let parsed = tslx_parser::parse_file(&source_map, id, &file_name, &text);
            log::debug!(
                "parsed {} ({:?}, {} diagnostics)",
                file_name,
                parsed.dialect,
                parsed.diagnostics.len()
            );
            diagnostics.extend(parsed.diagnostics);

            let module = parsed.module.unwrap_or_else(|| ast::Module {
                span: swc_common::DUMMY_SP,
                body: Vec::new(),
                shebang: None,
            });

            files.push(SourceFile {
                id,
                file_name,
                module,
                dialect: parsed.dialect,
                start_pos: parsed.start_pos,
                end_pos: parsed.end_pos,
            });
        }

        Program {
            options: self.options,
            files,
            cache,
            diagnostics,
            _source_map: source_map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_keep_insertion_order() {
        let program = Program::builder()
            .add_file("/project/b.ts", "")
            .add_file("/project/a.ts", "")
            .add_file("/project/b.ts", "ignored")
            .build();

        let names: Vec<_> = program.source_files().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["/project/b.ts", "/project/a.ts"]);
    }

    #[test]
    fn test_source_dir_ignores_declaration_files() {
        let program = Program::builder()
            .add_file("/project/src/main.ts", "")
            .add_file("/project/src/lib/util.ts", "")
            .add_file("/types/index.d.ts", "")
            .build();
        assert_eq!(program.source_dir(), "/project/src");

        let rooted = Program::builder()
            .root_dir("/project")
            .add_file("/project/src/main.ts", "")
            .build();
        assert_eq!(rooted.source_dir(), "/project");
    }

    #[test]
    fn test_lookup_and_module_detection() {
        let program = Program::builder()
            .add_file("/project/main.ts", "export const x = 1;")
            .add_file("/project/script.ts", "const y = 2;")
            .build();

        assert!(program.get_source_file("/project/./main.ts").unwrap().is_external_module());
        assert!(!program.get_source_file("/project/script.ts").unwrap().is_external_module());
        assert!(program.get_source_file("/project/missing.ts").is_none());
    }

    #[test]
    fn test_parse_errors_are_diagnostics() {
        let program = Program::builder().add_file("/project/bad.ts", "let = ;").build();
        assert!(program.parse_diagnostics().has_errors());
        assert!(program.source_files().next().unwrap().module.body.is_empty());
    }

    #[test]
    fn test_span_of_maps_to_file_offsets() {
        let program = Program::builder()
            .add_file("/project/a.ts", "let a = 1;")
            .add_file("/project/b.ts", "let b = 2;")
            .build();

        let file = program.get_source_file("/project/b.ts").unwrap();
        let ast::ModuleItem::Stmt(stmt) = &file.module.body[0] else {
            panic!("expected statement");
        };
        let span = program.span_of(swc_common::Spanned::span(stmt));
        assert_eq!(span.file_id, file.id);
        assert_eq!((span.start, span.end), (0, 10));
    }
}
