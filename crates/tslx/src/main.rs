//! tslx - TypeScript to Lua with language extensions
//!
//! CLI driver for transpiling TypeScript projects to Lua.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

/// TypeScript to Lua transpiler
#[derive(Parser, Debug)]
#[command(name = "tslx")]
#[command(author, version, about = "Transpile TypeScript to Lua with language extensions")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transpile the project and write Lua files
    Build(commands::build::BuildArgs),

    /// Transpile the project and report diagnostics without writing
    Check(commands::check::CheckArgs),

    /// Explain a diagnostic code
    Explain(commands::explain::ExplainArgs),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine if colors should be used
    let use_color = !cli.no_color && !cli.quiet && atty::is(atty::Stream::Stdout);

    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Build(args) => commands::build::run(args, cli.format, use_color, cli.quiet),
        Commands::Check(args) => commands::check::run(args, cli.format, use_color, cli.quiet),
        Commands::Explain(args) => commands::explain::run(args, cli.format, use_color),
    }
}
