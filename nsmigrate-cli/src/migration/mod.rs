//! Batch driver: walks a project directory, runs the fix loop on every
//! matching source file, and writes back only the files whose content
//! changed. Files are independent; a failure on one is recorded and the
//! batch carries on.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{Diagnostic, Language, MigrateError};
use crate::engine;
use crate::rules;

pub const DEFAULT_EXTENSIONS: &[&str] = &["ts"];

#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// File extensions to process, without the dot.
    pub extensions: Vec<String>,
    /// Report what would change without writing files.
    pub dry_run: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub files_scanned: usize,
    pub files_modified: Vec<PathBuf>,
    /// Files with syntax errors, left untouched.
    pub files_skipped: usize,
    pub dry_run: bool,
    pub errors: Vec<String>,
}

/// Diagnostics for one file, as produced by a verify-only run.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a verify-only batch. Like the fix path, per-file failures are
/// collected here rather than aborting the walk.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    pub errors: Vec<String>,
}

/// Fix every matching file under `root` in place.
pub fn fix_files_in_directory(root: &Path, options: &MigrationOptions) -> Result<MigrationReport> {
    if !root.exists() {
        return Err(MigrateError::FileNotFound(root.to_path_buf()).into());
    }

    let rules = rules::default_rules();
    let mut report = MigrationReport {
        files_scanned: 0,
        files_modified: Vec::new(),
        files_skipped: 0,
        dry_run: options.dry_run,
        errors: Vec::new(),
    };

    for file in list_source_files(root, &options.extensions)? {
        report.files_scanned += 1;
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                report.errors.push(format!("{}: {}", file.display(), e));
                continue;
            }
        };
        let Some(language) = language_for(&file) else {
            continue;
        };

        match engine::verify_and_fix(&content, language, &rules) {
            Ok(outcome) => {
                if outcome.fixed && outcome.output != content {
                    if !options.dry_run {
                        if let Err(e) = fs::write(&file, &outcome.output) {
                            report
                                .errors
                                .push(format!("{}: failed to write: {}", file.display(), e));
                            continue;
                        }
                    }
                    tracing::info!(file = %file.display(), "migrated");
                    report.files_modified.push(file);
                }
            }
            Err(MigrateError::SyntaxError) => {
                tracing::debug!(file = %file.display(), "skipping file with syntax errors");
                report.files_skipped += 1;
            }
            Err(e) => report.errors.push(format!("{}: {}", file.display(), e)),
        }
    }

    Ok(report)
}

/// Verify every matching file under `root` without touching anything.
pub fn check_files_in_directory(root: &Path, extensions: &[String]) -> Result<CheckReport> {
    if !root.exists() {
        return Err(MigrateError::FileNotFound(root.to_path_buf()).into());
    }

    let rules = rules::default_rules();
    let mut report = CheckReport {
        files: Vec::new(),
        errors: Vec::new(),
    };
    for file in list_source_files(root, extensions)? {
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                report.errors.push(format!("{}: {}", file.display(), e));
                continue;
            }
        };
        let Some(language) = language_for(&file) else {
            continue;
        };
        match engine::verify(&content, language, &rules) {
            Ok(diagnostics) if !diagnostics.is_empty() => {
                report.files.push(FileReport { file, diagnostics });
            }
            Ok(_) => {}
            Err(MigrateError::SyntaxError) => {
                tracing::debug!(file = %file.display(), "skipping file with syntax errors");
            }
            Err(e) => report.errors.push(format!("{}: {}", file.display(), e)),
        }
    }
    Ok(report)
}

/// Recursively list files under `root` matching one of the extensions, in a
/// stable order.
pub fn list_source_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !should_ignore(e.path()))
    {
        let entry = entry?;
        if entry.file_type().is_file() && matches_extension(entry.path(), extensions) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

fn should_ignore(path: &Path) -> bool {
    // Build output and dependency directories, including the ones a
    // NativeScript project grows.
    matches!(
        path.file_name().and_then(|name| name.to_str()),
        Some(".git" | "node_modules" | "platforms" | "hooks" | "dist" | "build")
    )
}

fn language_for(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_fixes_and_writes_changed_files() -> Result<()> {
        let temp = TempDir::new()?;
        let app = temp.path().join("app.ts");
        fs::write(&app, "import { write } from 'tns-core-modules/trace';\nwrite();\n")?;
        let clean = temp.path().join("clean.ts");
        fs::write(&clean, "import { Trace } from '@nativescript/core';\nTrace.write();\n")?;

        let report = fix_files_in_directory(temp.path(), &MigrationOptions::default())?;
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_modified, vec![app.clone()]);

        let fixed = fs::read_to_string(&app)?;
        assert_eq!(fixed, "import { Trace } from '@nativescript/core';\nTrace.write();\n");
        Ok(())
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() -> Result<()> {
        let temp = TempDir::new()?;
        let app = temp.path().join("app.ts");
        let original = "import { write } from 'tns-core-modules/trace';\nwrite();\n";
        fs::write(&app, original)?;

        let options = MigrationOptions {
            dry_run: true,
            ..MigrationOptions::default()
        };
        let report = fix_files_in_directory(temp.path(), &options)?;
        assert_eq!(report.files_modified, vec![app.clone()]);
        assert_eq!(fs::read_to_string(&app)?, original);
        Ok(())
    }

    #[test]
    fn test_syntax_errors_are_skipped() -> Result<()> {
        let temp = TempDir::new()?;
        let broken = temp.path().join("broken.ts");
        let original = "import { from 'tns-core-modules/trace';;;\n";
        fs::write(&broken, original)?;

        let report = fix_files_in_directory(temp.path(), &MigrationOptions::default())?;
        assert_eq!(report.files_skipped, 1);
        assert!(report.files_modified.is_empty());
        assert_eq!(fs::read_to_string(&broken)?, original);
        Ok(())
    }

    #[test]
    fn test_extension_filter_and_ignored_directories() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir(temp.path().join("node_modules"))?;
        fs::write(temp.path().join("node_modules").join("dep.ts"), "x;\n")?;
        fs::write(temp.path().join("app.ts"), "x;\n")?;
        fs::write(temp.path().join("readme.md"), "docs\n")?;

        let files = list_source_files(temp.path(), &["ts".to_string()])?;
        assert_eq!(files, vec![temp.path().join("app.ts")]);
        Ok(())
    }

    #[test]
    fn test_check_reports_without_writing() -> Result<()> {
        let temp = TempDir::new()?;
        let app = temp.path().join("app.ts");
        let original = "import { write } from 'tns-core-modules/trace';\nwrite();\n";
        fs::write(&app, original)?;

        let report = check_files_in_directory(temp.path(), &["ts".to_string()])?;
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].diagnostics.len(), 1);
        assert!(report.errors.is_empty());
        assert_eq!(fs::read_to_string(&app)?, original);
        Ok(())
    }

    #[test]
    fn test_check_batch_survives_an_unreadable_file() -> Result<()> {
        let temp = TempDir::new()?;
        // Invalid UTF-8: reading this file fails, the rest of the batch
        // must still be checked.
        fs::write(temp.path().join("a.ts"), [0xff, 0xfe, 0xfd])?;
        let good = temp.path().join("b.ts");
        fs::write(&good, "import { write } from 'tns-core-modules/trace';\nwrite();\n")?;

        let report = check_files_in_directory(temp.path(), &["ts".to_string()])?;
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("a.ts"));
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file, good);
        assert_eq!(report.files[0].diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn test_fix_batch_survives_an_unreadable_file() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("a.ts"), [0xff, 0xfe, 0xfd])?;
        let good = temp.path().join("b.ts");
        fs::write(&good, "import { write } from 'tns-core-modules/trace';\nwrite();\n")?;

        let report = fix_files_in_directory(temp.path(), &MigrationOptions::default())?;
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("a.ts"));
        assert_eq!(report.files_modified, vec![good.clone()]);
        assert_eq!(
            fs::read_to_string(&good)?,
            "import { Trace } from '@nativescript/core';\nTrace.write();\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = fix_files_in_directory(
            Path::new("/nonexistent/project"),
            &MigrationOptions::default(),
        );
        assert!(result.is_err());
    }
}
