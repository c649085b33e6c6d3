//! Rewrites `nativescript-angular/*` import paths onto the
//! `@nativescript/angular` package. A pure path substitution: specifiers are
//! never touched and the literal keeps its original quote style.

use super::paths::{DEPRECATED_ANGULAR_PREFIX, NEW_ANGULAR_MODULE_PATH};
use super::Rule;
use crate::ast::{collect_imports, ParsedFile};
use crate::core::{Diagnostic, TextEdit};

pub const RULE_NAME: &str = "no-deprecated-angular-imports";

pub struct DeprecatedAngularImports;

impl Rule for DeprecatedAngularImports {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn check(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        collect_imports(file)
            .into_iter()
            .filter(|decl| decl.source_value.starts_with(DEPRECATED_ANGULAR_PREFIX))
            .map(|decl| {
                let fixed =
                    decl.source_raw
                        .replacen(&decl.source_value, NEW_ANGULAR_MODULE_PATH, 1);
                Diagnostic {
                    rule: RULE_NAME,
                    message: format!("Imports from '{}' are deprecated.", decl.source_value),
                    line: decl.source_line,
                    column: decl.source_column,
                    fix: Some(vec![TextEdit::replace(decl.source_range.clone(), fixed)]),
                }
            })
            .collect()
    }
}
