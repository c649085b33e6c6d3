//! Merges repeated import declarations from the same recognized package into
//! one declaration. Grouping is by the raw module-path literal, quotes
//! included, so a stylistic quote difference keeps declarations apart on
//! purpose: only the "obviously restated" case is merged.

use super::{statement_removal_range, Rule};
use crate::ast::{collect_imports, ImportDeclaration, ParsedFile, SpecifierKind};
use crate::core::{Diagnostic, TextEdit};

pub const RULE_NAME: &str = "no-duplicate-imports";

pub struct DuplicateImports {
    /// Module-path prefixes the merger applies to. The narrow configuration
    /// uses the single exact package path; the default recognizes every
    /// `@nativescript/` package.
    recognized_prefixes: Vec<String>,
}

impl DuplicateImports {
    pub fn new(recognized_prefixes: Vec<String>) -> Self {
        Self { recognized_prefixes }
    }

    /// Narrow variant: merge only restated `@nativescript/core` imports.
    pub fn core_only() -> Self {
        Self::new(vec!["@nativescript/core".to_string()])
    }

    fn recognized(&self, value: &str) -> bool {
        self.recognized_prefixes
            .iter()
            .any(|prefix| value.starts_with(prefix))
    }
}

impl Default for DuplicateImports {
    fn default() -> Self {
        Self::new(vec!["@nativescript/".to_string()])
    }
}

impl Rule for DuplicateImports {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn check(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let imports = collect_imports(file);

        // Group by raw literal text, first-seen order.
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for (index, decl) in imports.iter().enumerate() {
            if !self.recognized(&decl.source_value) {
                continue;
            }
            match groups.iter_mut().find(|(raw, _)| *raw == decl.source_raw) {
                Some((_, members)) => members.push(index),
                None => groups.push((decl.source_raw.as_str(), vec![index])),
            }
        }

        let mut diagnostics = Vec::new();
        for (raw, members) in groups {
            if members.len() < 2 {
                continue;
            }
            // A namespace specifier cannot share a clause with named ones;
            // such groups are skipped without a report.
            let Some(clause) = merged_clause(members.iter().map(|&i| &imports[i])) else {
                continue;
            };

            let first = &imports[members[0]];
            let mut edits = vec![TextEdit::replace(
                first.range.clone(),
                format!("import {clause} from {raw};"),
            )];
            for &index in &members[1..] {
                edits.push(TextEdit::remove(statement_removal_range(
                    &file.content,
                    imports[index].range.clone(),
                )));
            }

            diagnostics.push(Diagnostic {
                rule: RULE_NAME,
                message: format!("'{}' import is duplicated.", first.source_value),
                line: first.line,
                column: first.column,
                fix: Some(edits),
            });
        }
        diagnostics
    }
}

/// Synthesize the merged import clause: default export first, then either
/// the namespace specifier or the named list in encounter order. Returns
/// `None` when the union would be ungrammatical or empty.
fn merged_clause<'a>(decls: impl Iterator<Item = &'a ImportDeclaration>) -> Option<String> {
    let mut default_export: Option<String> = None;
    let mut namespace: Option<String> = None;
    let mut named: Vec<String> = Vec::new();

    for decl in decls {
        for spec in &decl.specifiers {
            match spec.kind {
                SpecifierKind::Default => default_export = Some(spec.local.clone()),
                SpecifierKind::Namespace => namespace = Some(format!("* as {}", spec.local)),
                SpecifierKind::Named => {
                    let text = if spec.imported == spec.local {
                        spec.local.clone()
                    } else {
                        format!("{} as {}", spec.imported, spec.local)
                    };
                    if !named.contains(&text) {
                        named.push(text);
                    }
                }
            }
        }
    }

    if !named.is_empty() && namespace.is_some() {
        return None;
    }

    if !named.is_empty() {
        let list = format!("{{ {} }}", named.join(", "));
        Some(match default_export {
            Some(default) => format!("{default}, {list}"),
            None => list,
        })
    } else if let Some(namespace) = namespace {
        Some(match default_export {
            Some(default) => format!("{default}, {namespace}"),
            None => namespace,
        })
    } else {
        default_export
    }
}
