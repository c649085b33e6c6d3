use anyhow::Result;
use std::path::PathBuf;

use crate::migration::{fix_files_in_directory, MigrationOptions};

pub fn run(
    path: Option<PathBuf>,
    dry_run: bool,
    extensions: Vec<String>,
    format: &crate::OutputFormat,
) -> Result<()> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    let options = MigrationOptions {
        extensions: super::resolve_extensions(extensions)?,
        dry_run,
    };

    let report = fix_files_in_directory(&root, &options)?;

    match format {
        crate::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        crate::OutputFormat::Text => {
            if report.dry_run {
                println!("Dry run - no files were written.");
            }
            println!("Files scanned: {}", report.files_scanned);
            println!("Files {}: {}", if report.dry_run { "to migrate" } else { "migrated" }, report.files_modified.len());
            if report.files_skipped > 0 {
                println!("Files skipped (syntax errors): {}", report.files_skipped);
            }

            if !report.files_modified.is_empty() {
                println!();
                for file in &report.files_modified {
                    println!("  {}", file.display());
                }
            }

            if !report.errors.is_empty() {
                println!("\nErrors:");
                for error in &report.errors {
                    println!("  {}", error);
                }
            }
        }
    }

    Ok(())
}
