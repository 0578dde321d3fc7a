//! Whole-program transpilation and output writing

use crate::checker::Checker;
use crate::context::TransformationContext;
use crate::lualib::{self, LuaLibFeature, LUALIB_BUNDLE_FILE};
use crate::paths::{normalize_path, relative_path, strip_extension};
use crate::plugin::Plugin;
use crate::program::{Program, ProgramError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tslx_diagnostics::Diagnostics;
use tslx_lua as lua;

/// One file to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Source the file was generated from; `None` for the lualib bundle
    pub source_file: Option<String>,
    pub output_path: PathBuf,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct TranspileResult {
    pub files: Vec<OutputFile>,
    pub diagnostics: Diagnostics,
}

impl TranspileResult {
    /// Output generated from `source`, matched by normalized path.
    pub fn output_for(&self, source: impl AsRef<Path>) -> Option<&OutputFile> {
        let name = normalize_path(source);
        self.files
            .iter()
            .find(|f| f.source_file.as_deref() == Some(name.as_str()))
    }

    pub fn lualib_bundle(&self) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.source_file.is_none())
    }
}

/// Where the Lua for `file_name` goes: the path relative to the source
/// directory, under the output directory, with a `.lua` extension.
pub fn output_path_for(program: &Program, file_name: &str) -> PathBuf {
    let source_dir = program.source_dir();
    let relative = relative_path(&source_dir, file_name);
    let out_dir = match &program.options().out_dir {
        Some(dir) => normalize_path(dir),
        None => source_dir,
    };
    Path::new(&out_dir).join(format!("{}.lua", strip_extension(&relative)))
}

/// Transform every non-declaration file of `program` with `plugins` taking
/// part, in file order.
pub fn transpile(program: &Program, plugins: &mut [Box<dyn Plugin>]) -> TranspileResult {
    let checker = Checker::new(program);
    for plugin in plugins.iter_mut() {
        log::debug!("Running before_transform for plugin {}", plugin.name());
        plugin.before_transform(program, &checker);
    }
    let plugins: &[Box<dyn Plugin>] = plugins;

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(program.parse_diagnostics().iter().cloned());

    let mut files = Vec::new();
    let mut bundle_features: BTreeSet<LuaLibFeature> = BTreeSet::new();
    for source in program.source_files().filter(|f| !f.is_declaration_file()) {
        let mut ctx = TransformationContext::new(program, &checker, source, plugins);
        let mut lua_file = ctx.transform_source_file();

        let mut statements = lualib::import_statements(&ctx.used_lualib_features);
        statements.append(&mut lua_file.statements);
        lua_file.statements = statements;

        log::debug!(
            "Transformed {} ({} statements, {} diagnostics)",
            source.file_name,
            lua_file.statements.len(),
            ctx.diagnostics.len()
        );
        bundle_features.extend(ctx.used_lualib_features.iter().copied());
        diagnostics.extend(ctx.diagnostics);
        files.push(OutputFile {
            source_file: Some(source.file_name.clone()),
            output_path: output_path_for(program, &source.file_name),
            code: lua::print_file(&lua_file),
        });
    }

    if !bundle_features.is_empty() {
        let out_dir = match &program.options().out_dir {
            Some(dir) => normalize_path(dir),
            None => program.source_dir(),
        };
        files.push(OutputFile {
            source_file: None,
            output_path: Path::new(&out_dir).join(LUALIB_BUNDLE_FILE),
            code: lualib::bundle_source(&bundle_features),
        });
    }

    for plugin in plugins {
        log::debug!("Running before_emit for plugin {}", plugin.name());
        plugin.before_emit(program, &mut files);
    }

    TranspileResult { files, diagnostics }
}

/// Write outputs to disk, creating directories as needed.
pub fn write_files(files: &[OutputFile]) -> Result<(), ProgramError> {
    for file in files {
        if let Some(dir) = file.output_path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ProgramError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&file.output_path, &file.code).map_err(|source| ProgramError::Write {
            path: file.output_path.clone(),
            source,
        })?;
        log::debug!("Wrote {}", file.output_path.display());
    }
    Ok(())
}
