//! Check command - transpile a project and report diagnostics without writing

use anyhow::{bail, Result};
use clap::Args;

use super::{compile_project, print_summary, report, ProjectArgs};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, format: OutputFormat, use_color: bool, quiet: bool) -> Result<()> {
    let compilation = compile_project(&args.project)?;
    report(&compilation, format, use_color)?;

    let diagnostics = &compilation.result.diagnostics;
    if matches!(format, OutputFormat::Text) && !quiet {
        let checked = compilation
            .program
            .source_files()
            .filter(|f| !f.is_declaration_file())
            .count();
        print_summary("Check", diagnostics, checked, use_color);
    }

    if diagnostics.has_errors() {
        bail!("check found {} error(s)", diagnostics.error_count());
    }
    if args.strict && diagnostics.warning_count() > 0 {
        bail!("check found {} warning(s) (strict mode)", diagnostics.warning_count());
    }
    Ok(())
}
