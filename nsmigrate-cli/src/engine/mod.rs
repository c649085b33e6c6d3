//! Detect-and-fix driver for a single file. Each pass parses the text, runs
//! every rule, and splices in the non-overlapping subset of the reported
//! fixes; fixes that collide are retried on the next pass against the
//! re-parsed text. Fully fixed input reaches a fixed point: a further pass
//! produces no edits.

use crate::ast::ParsedFile;
use crate::core::{Diagnostic, Language, MigrateError, TextEdit};
use crate::rules::Rule;

const MAX_FIX_PASSES: usize = 10;

#[derive(Debug)]
pub struct FixOutcome {
    pub output: String,
    pub fixed: bool,
    /// Diagnostics still present once no further fix applies.
    pub diagnostics: Vec<Diagnostic>,
}

/// Report diagnostics without mutating anything.
pub fn verify(
    content: &str,
    language: Language,
    rules: &[Box<dyn Rule>],
) -> Result<Vec<Diagnostic>, MigrateError> {
    let parsed = ParsedFile::parse(content, language)?;
    Ok(run_rules(&parsed, rules))
}

/// Run the detect-and-fix loop to convergence (or the pass cap).
pub fn verify_and_fix(
    content: &str,
    language: Language,
    rules: &[Box<dyn Rule>],
) -> Result<FixOutcome, MigrateError> {
    let mut text = content.to_string();
    let mut fixed = false;
    let mut diagnostics = Vec::new();

    for pass in 0..MAX_FIX_PASSES {
        let parsed = ParsedFile::parse(&text, language)?;
        diagnostics = run_rules(&parsed, rules);
        let (next, applied) = apply_fixes(&text, &diagnostics);
        if applied == 0 {
            break;
        }
        tracing::debug!(pass, applied, "applied fixes");
        text = next;
        fixed = true;
    }

    Ok(FixOutcome {
        output: text,
        fixed,
        diagnostics,
    })
}

fn run_rules(parsed: &ParsedFile, rules: &[Box<dyn Rule>]) -> Vec<Diagnostic> {
    rules.iter().flat_map(|rule| rule.check(parsed)).collect()
}

/// Apply as many diagnostics' fixes as possible in one splice over the text.
/// Each diagnostic's edit list is first composed into a single spanning
/// replacement; composed fixes are then applied left to right, skipping any
/// that overlaps an already-applied one.
fn apply_fixes(content: &str, diagnostics: &[Diagnostic]) -> (String, usize) {
    let mut merged: Vec<TextEdit> = diagnostics
        .iter()
        .filter_map(|d| d.fix.as_deref())
        .filter_map(|edits| compose_fix(content, edits))
        .collect();
    merged.sort_by_key(|edit| (edit.start, edit.end));

    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut applied = 0;
    for edit in merged {
        if edit.start < cursor {
            continue;
        }
        output.push_str(&content[cursor..edit.start]);
        output.push_str(&edit.text);
        cursor = edit.end;
        applied += 1;
    }
    output.push_str(&content[cursor..]);
    (output, applied)
}

/// Collapse one diagnostic's edits into a single replacement spanning from
/// the first edit to the last, keeping the original text between them.
/// Returns `None` for an empty or internally conflicting edit list.
fn compose_fix(content: &str, edits: &[TextEdit]) -> Option<TextEdit> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| (edit.start, edit.end));

    let start = sorted.first()?.start;
    let mut text = String::new();
    let mut cursor = start;
    for edit in sorted {
        if edit.start < cursor {
            return None;
        }
        text.push_str(&content[cursor..edit.start]);
        text.push_str(&edit.text);
        cursor = edit.end;
    }

    Some(TextEdit {
        start,
        end: cursor,
        text,
    })
}
