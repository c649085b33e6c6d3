use anyhow::Result;
use std::path::PathBuf;

use crate::migration::check_files_in_directory;

pub fn run(
    path: Option<PathBuf>,
    extensions: Vec<String>,
    format: &crate::OutputFormat,
) -> Result<()> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    let extensions = super::resolve_extensions(extensions)?;

    let report = check_files_in_directory(&root, &extensions)?;

    match format {
        crate::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        crate::OutputFormat::Text => {
            if report.files.is_empty() && report.errors.is_empty() {
                println!("No deprecated imports found.");
                return Ok(());
            }
            let mut total = 0;
            for file_report in &report.files {
                for diagnostic in &file_report.diagnostics {
                    total += 1;
                    println!(
                        "{}:{}:{} {} [{}]",
                        file_report.file.display(),
                        diagnostic.line,
                        diagnostic.column,
                        diagnostic.message,
                        diagnostic.rule
                    );
                }
            }
            println!(
                "\n{} finding{} in {} file{}",
                total,
                if total == 1 { "" } else { "s" },
                report.files.len(),
                if report.files.len() == 1 { "" } else { "s" }
            );

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
