use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod ast;
mod commands;
mod core;
mod engine;
mod migration;
mod rules;

#[derive(Parser)]
#[command(name = "nsmigrate")]
#[command(author, version)]
#[command(
    about = "Migrates NativeScript sources off deprecated import paths",
    long_about = "Statically rewrites imports from the deprecated tns-core-modules and \
                  nativescript-angular packages to their @nativescript replacements, \
                  updating every use site to the new API shape."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite deprecated imports under a directory
    Migrate {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,

        /// Report what would change without writing files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// File extensions to process (e.g. ts, tsx)
        #[arg(short = 'e', long)]
        extensions: Vec<String>,
    },

    /// List deprecated imports without modifying files
    Check {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,

        /// File extensions to process (e.g. ts, tsx)
        #[arg(short = 'e', long)]
        extensions: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("nsmigrate=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("nsmigrate=info")
            .init();
    }

    match cli.command {
        Commands::Migrate {
            path,
            dry_run,
            extensions,
        } => commands::migrate::run(path, dry_run, extensions, &cli.format)?,
        Commands::Check { path, extensions } => {
            commands::check::run(path, extensions, &cli.format)?
        }
    }

    Ok(())
}
