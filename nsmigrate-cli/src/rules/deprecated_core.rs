//! Detects imports from deprecated `tns-core-modules/*` paths and rewrites
//! both the import declarations and every use site of the imported names.
//!
//! Per file, each deprecated declaration gets a fix record that accumulates
//! pending edits while use sites are resolved against it; at the end of the
//! file every record is flushed into one diagnostic with a coordinated,
//! non-overlapping set of edits.

use super::paths::{
    fix_nested_module_path, is_deprecated_path, is_re_exported_specifier, renamed_specifier,
    DEPRECATED_PATH_MAP, NEW_MODULE_PATH, UPDATED_SPECIFIERS,
};
use super::{statement_removal_range, Rule};
use crate::ast::{
    collect_imports, collect_usages, ImportDeclaration, ParsedFile, SpecifierKind, UsageSite,
};
use crate::core::{Diagnostic, TextEdit};
use std::collections::HashMap;
use std::ops::Range;

pub const RULE_NAME: &str = "no-deprecated-core-imports";

pub struct DeprecatedCoreImports;

/// A pending identifier rewrite. At most one fix may target a given range.
#[derive(Debug)]
struct IdentifierFix {
    range: Range<usize>,
    text: String,
}

/// Per-declaration accumulator, keyed by the declaration's index in the
/// file's import list. Lives for one `check` call only.
#[derive(Debug)]
struct FixRecord {
    decl: usize,
    /// Tokens destined to become the named-specifier list, in first-seen order.
    specifier_fixes: Vec<String>,
    identifier_fixes: Vec<IdentifierFix>,
    /// Whole import statements to insert before the declaration.
    additional_imports: Vec<String>,
    /// Set when the declaration resolves to a pure path substitution.
    fixed_import_path: Option<String>,
}

impl FixRecord {
    fn new(decl: usize) -> Self {
        Self {
            decl,
            specifier_fixes: Vec::new(),
            identifier_fixes: Vec::new(),
            additional_imports: Vec::new(),
            fixed_import_path: None,
        }
    }

    fn push_specifier(&mut self, name: String) {
        if !self.specifier_fixes.contains(&name) {
            self.specifier_fixes.push(name);
        }
    }

    fn push_identifier_fix(&mut self, range: Range<usize>, text: String) {
        if self.identifier_fixes.iter().any(|f| f.range.start == range.start) {
            return;
        }
        self.identifier_fixes.push(IdentifierFix { range, text });
    }

    fn push_additional_import(&mut self, statement: String) {
        if !self.additional_imports.contains(&statement) {
            self.additional_imports.push(statement);
        }
    }
}

impl Rule for DeprecatedCoreImports {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn check(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let imports = collect_imports(file);
        let mut records: Vec<FixRecord> = imports
            .iter()
            .enumerate()
            .filter(|(_, decl)| is_deprecated_path(&decl.source_value))
            .map(|(index, _)| FixRecord::new(index))
            .collect();
        if records.is_empty() {
            return Vec::new();
        }

        // Local bound name -> (record, specifier). Names are unique per
        // well-formed file; on a clash the later import wins.
        let mut bound: HashMap<&str, (usize, usize)> = HashMap::new();
        for (ri, record) in records.iter().enumerate() {
            for (si, spec) in imports[record.decl].specifiers.iter().enumerate() {
                bound.insert(spec.local.as_str(), (ri, si));
            }
        }

        for usage in collect_usages(file) {
            let Some(&(ri, si)) = bound.get(usage.name.as_str()) else {
                continue;
            };
            resolve_usage(&usage, si, &imports, &mut records[ri]);
        }

        records
            .iter()
            .map(|record| emit(file, &imports[record.decl], record))
            .collect()
    }
}

/// Decide what a matched use site means for its owning declaration, in
/// priority order: re-exported specifier, whole-module import, then the
/// path-level resolution.
fn resolve_usage(
    usage: &UsageSite,
    si: usize,
    imports: &[ImportDeclaration],
    record: &mut FixRecord,
) {
    let decl = &imports[record.decl];
    let spec = &decl.specifiers[si];

    if is_re_exported_specifier(&usage.name) {
        record.push_specifier(renamed_specifier(&usage.name).to_string());
        return;
    }

    let Some(&replacement) = DEPRECATED_PATH_MAP.get(decl.source_value.as_str()) else {
        return;
    };

    // An entire-module import keeps its shape and moves to the nested path
    // via a fresh statement; the old declaration is dropped at emission.
    if matches!(spec.kind, SpecifierKind::Default | SpecifierKind::Namespace) {
        let clause = match spec.kind {
            SpecifierKind::Namespace => format!("* as {}", spec.local),
            _ => spec.local.clone(),
        };
        let new_path = fix_nested_module_path(&decl.source_value);
        record.push_additional_import(format!("import {clause} from '{new_path}';\n"));
        return;
    }

    use super::paths::PathReplacement::*;
    match replacement {
        ReExported => {
            record.push_specifier(renamed_specifier(&usage.name).to_string());
            if let Some(&migrated) = UPDATED_SPECIFIERS.get(spec.imported.as_str()) {
                record.push_identifier_fix(usage.range.clone(), migrated.to_string());
            }
        }
        Export(namespace) => {
            record.push_specifier(namespace.to_string());
            let member = renamed_specifier(&spec.imported);
            record.push_identifier_fix(usage.range.clone(), format!("{namespace}.{member}"));
        }
        NestedModuleExport => {
            let renamed = renamed_specifier(&spec.imported);
            if renamed != usage.name {
                record.push_identifier_fix(usage.range.clone(), renamed.to_string());
            }
            record.fixed_import_path = Some(fix_nested_module_path(&decl.source_value));
        }
    }
}

fn emit(file: &ParsedFile, decl: &ImportDeclaration, record: &FixRecord) -> Diagnostic {
    Diagnostic {
        rule: RULE_NAME,
        message: format!("Imports from '{}' are deprecated.", decl.source_value),
        line: decl.line,
        column: decl.column,
        fix: build_fix(file, decl, record),
    }
}

fn build_fix(
    file: &ParsedFile,
    decl: &ImportDeclaration,
    record: &FixRecord,
) -> Option<Vec<TextEdit>> {
    use super::paths::PathReplacement;

    // A deprecated path with no catalog entry gets a diagnostic but no fix.
    let replacement = DEPRECATED_PATH_MAP.get(decl.source_value.as_str()).copied()?;

    let mut edits = Vec::new();
    for statement in &record.additional_imports {
        edits.push(TextEdit::insert(decl.range.start, statement.clone()));
    }

    if !record.specifier_fixes.is_empty() {
        let fixed_path = match replacement {
            PathReplacement::NestedModuleExport => fix_nested_module_path(&decl.source_value),
            _ => NEW_MODULE_PATH.to_string(),
        };
        edits.push(TextEdit::replace(
            decl.range.clone(),
            format!(
                "import {{ {} }} from '{}';",
                record.specifier_fixes.join(", "),
                fixed_path
            ),
        ));
    } else if let Some(path) = &record.fixed_import_path {
        edits.push(TextEdit::replace(decl.source_range.clone(), format!("'{path}'")));
    } else {
        // Nothing left to import from here: drop the whole statement.
        edits.push(TextEdit::remove(statement_removal_range(
            &file.content,
            decl.range.clone(),
        )));
    }

    for fix in &record.identifier_fixes {
        edits.push(TextEdit::replace(fix.range.clone(), fix.text.clone()));
    }

    Some(edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    fn check(code: &str) -> Vec<Diagnostic> {
        let parsed = ParsedFile::parse(code, Language::TypeScript).unwrap();
        DeprecatedCoreImports.check(&parsed)
    }

    #[test]
    fn test_clean_file_reports_nothing() {
        let diagnostics = check("import { Trace } from '@nativescript/core';\nTrace.write();\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_diagnostic_anchored_at_declaration() {
        let diagnostics = check("\nimport { write } from 'tns-core-modules/trace';\nwrite();\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert_eq!(diagnostics[0].column, 1);
        assert_eq!(
            diagnostics[0].message,
            "Imports from 'tns-core-modules/trace' are deprecated."
        );
        assert!(diagnostics[0].is_fixable());
    }

    #[test]
    fn test_uncataloged_deprecated_path_gets_no_fix() {
        // 'tns-core-modules' is a prefix of cataloged paths, so it is
        // reported, but the table has no entry to fix it with.
        let diagnostics = check("import { something } from 'tns-core-modules';\nsomething;\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_unused_deprecated_import_is_removed_entirely() {
        let code = "import { ObservableArray } from 'tns-core-modules/data/observable-array';\nlet x = 1;\n";
        let diagnostics = check(code);
        assert_eq!(diagnostics.len(), 1);
        let edits = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].text, "");
        // Trailing newline goes with the statement.
        assert!(code[edits[0].start..edits[0].end].ends_with('\n'));
    }

    #[test]
    fn test_fix_ranges_never_overlap() {
        let code = "\nimport { writeMessage, TraceWriter } from 'tns-core-modules/trace';\n\nwriteMessage();\nconst writer: TraceWriter = null;\n";
        let diagnostics = check(code);
        let mut edits = diagnostics[0].fix.clone().unwrap();
        edits.sort_by_key(|e| (e.start, e.end));
        for pair in edits.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_one_identifier_fix_per_node() {
        let code = "import { write } from 'tns-core-modules/trace';\nwrite();\nwrite();\n";
        let diagnostics = check(code);
        let edits = diagnostics[0].fix.as_ref().unwrap();
        // One declaration replacement plus one fix per distinct use site.
        assert_eq!(edits.len(), 3);
        let starts: Vec<_> = edits.iter().map(|e| e.start).collect();
        let mut deduped = starts.clone();
        deduped.dedup();
        assert_eq!(starts, deduped);
    }
}
