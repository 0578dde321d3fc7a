//! Build command - transpile a project and write the Lua output

use anyhow::{bail, Result};
use clap::Args;
use tslx_transpiler::write_files;

use super::{compile_project, print_summary, report, ProjectArgs};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: BuildArgs, format: OutputFormat, use_color: bool, quiet: bool) -> Result<()> {
    let compilation = compile_project(&args.project)?;
    report(&compilation, format, use_color)?;

    let files = &compilation.result.files;
    write_files(files)?;
    if matches!(format, OutputFormat::Text) && !quiet {
        print_summary("Build", &compilation.result.diagnostics, files.len(), use_color);
    }

    let errors = compilation.result.diagnostics.error_count();
    if errors > 0 {
        bail!("build finished with {} error(s)", errors);
    }
    Ok(())
}
