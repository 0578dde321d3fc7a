//! CLI command implementations

pub mod build;
pub mod check;
pub mod explain;

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tslx_diagnostics::{DiagnosticEmitter, Diagnostics, JsonEmitter, TerminalEmitter};
use tslx_transform::{with_bundled_declarations, ExtensionsPlugin};
use tslx_transpiler::{transpile, CompilerOptions, Plugin, Program, TranspileResult};
use walkdir::WalkDir;

use crate::config::{ProjectConfig, DEFAULT_CONFIG_FILE};
use crate::OutputFormat;

/// Options shared by every command that compiles a project.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub project: PathBuf,

    /// Output directory, overrides the config
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Compile without the language extensions
    #[arg(long)]
    pub no_extensions: bool,
}

fn is_typescript_file(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with(".ts") || name.ends_with(".tsx")
}

/// Collect all TypeScript files (including declarations) under `paths`.
fn collect_ts_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_typescript_file(path) {
                files.push(path.clone());
            }
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.components().any(|c| c.as_os_str() == "node_modules") {
                continue;
            }
            if path.is_file() && is_typescript_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    files
}

/// A transpiled project.
pub struct Compilation {
    pub program: Program,
    pub result: TranspileResult,
}

/// Load the project config, read its files and transpile them.
pub fn compile_project(args: &ProjectArgs) -> Result<Compilation> {
    let config = ProjectConfig::load_or_default(&args.project)?;
    let options = CompilerOptions {
        root_dir: config.compiler.root_dir.clone(),
        out_dir: args.out_dir.clone().or(config.compiler.out_dir.clone()),
    };

    let files = collect_ts_files(&config.compiler.include);
    log::debug!("Found {} TypeScript file(s)", files.len());

    let mut builder = Program::builder().options(options);
    for file in &files {
        builder = builder.read_file(file)?;
    }

    let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
    if !args.no_extensions {
        let plugin = match &config.compiler.declarations {
            Some(declarations) => {
                builder = builder.read_file(declarations)?;
                ExtensionsPlugin::with_declarations(config.extensions, declarations)
            }
            None => {
                builder = with_bundled_declarations(builder);
                ExtensionsPlugin::new(config.extensions)
            }
        };
        plugins.push(Box::new(plugin));
    }

    let program = builder.build();
    let result = transpile(&program, &mut plugins);
    Ok(Compilation { program, result })
}

/// Print diagnostics to stderr in the requested format.
pub fn report(compilation: &Compilation, format: OutputFormat, use_color: bool) -> Result<()> {
    let diagnostics: &Diagnostics = &compilation.result.diagnostics;
    let cache = compilation.program.source_cache();
    let stderr = std::io::stderr();
    match format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::new(stderr.lock(), use_color);
            emitter.emit_all(diagnostics, cache)?;
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(stderr.lock());
            emitter.emit_all(diagnostics, cache)?;
            emitter.emit_summary(diagnostics)?;
        }
    }
    Ok(())
}

/// One-line outcome for text output.
pub fn print_summary(label: &str, diagnostics: &Diagnostics, file_count: usize, use_color: bool) {
    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();
    if errors > 0 {
        let text = format!("{} failed", label);
        let head = if use_color {
            console::style(text).red().bold().to_string()
        } else {
            text
        };
        println!("{}: {} error(s), {} warning(s)", head, errors, warnings);
    } else if warnings > 0 {
        let text = format!("{} passed", label);
        let head = if use_color {
            console::style(text).yellow().to_string()
        } else {
            text
        };
        println!("{}: {} warning(s)", head, warnings);
    } else if use_color {
        println!(
            "{} - {} file(s)",
            console::style(format!("{} succeeded", label)).green().bold(),
            file_count
        );
    } else {
        println!("{} succeeded - {} file(s)", label, file_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typescript_file_names() {
        assert!(is_typescript_file(Path::new("a/b.ts")));
        assert!(is_typescript_file(Path::new("a/b.tsx")));
        assert!(is_typescript_file(Path::new("a/b.d.ts")));
        assert!(!is_typescript_file(Path::new("a/b.lua")));
    }
}
