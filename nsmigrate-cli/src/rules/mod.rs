mod deprecated_angular;
mod deprecated_core;
mod duplicate_imports;
pub mod paths;

pub use deprecated_angular::DeprecatedAngularImports;
pub use deprecated_core::DeprecatedCoreImports;
pub use duplicate_imports::DuplicateImports;

use crate::ast::ParsedFile;
use crate::core::Diagnostic;
use std::ops::Range;

/// A single detector. Rules are stateless across files: `check` inspects one
/// parsed file and reports diagnostics with their coordinated fixes.
pub trait Rule {
    fn name(&self) -> &'static str;
    fn check(&self, file: &ParsedFile) -> Vec<Diagnostic>;
}

pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DeprecatedCoreImports),
        Box::new(DeprecatedAngularImports),
        Box::new(DuplicateImports::default()),
    ]
}

/// Extend a statement's range past its trailing line break so a removal
/// leaves no blank line behind. Consumes at most one line-break sequence.
pub(crate) fn statement_removal_range(content: &str, range: Range<usize>) -> Range<usize> {
    let mut end = range.end;
    let rest = &content[end..];
    if rest.starts_with("\r\n") {
        end += 2;
    } else if let Some(c) = rest.chars().next() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            end += c.len_utf8();
        }
    }
    range.start..end
}
