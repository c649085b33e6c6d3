pub mod check;
pub mod migrate;

use crate::migration::DEFAULT_EXTENSIONS;
use anyhow::Result;

use crate::core::{Language, MigrateError};

/// Normalize the `--extensions` flag: strip leading dots, default when
/// empty, and reject extensions no grammar is available for.
pub(crate) fn resolve_extensions(extensions: Vec<String>) -> Result<Vec<String>> {
    if extensions.is_empty() {
        return Ok(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());
    }
    extensions
        .into_iter()
        .map(|ext| {
            let ext = ext.trim_start_matches('.').to_string();
            if Language::from_extension(&ext).is_none() {
                return Err(MigrateError::LanguageNotSupported(ext).into());
            }
            Ok(ext)
        })
        .collect()
}
