use serde::Serialize;
use std::ops::Range;

/// Source languages the migration understands.
#[derive(Debug, Clone, Copy, Serialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            "js" | "jsx" | "mjs" => Some(Language::JavaScript),
            _ => None,
        }
    }

    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// A single text splice. `start == end` is a pure insertion; an empty
/// `text` is a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn remove(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            text: String::new(),
        }
    }
}

/// One finding reported by a rule, anchored at a 1-based source position.
/// `fix` carries the coordinated edits for that finding, or `None` when the
/// rule recognizes the construct but has no replacement for it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub fix: Option<Vec<TextEdit>>,
}

impl Diagnostic {
    pub fn is_fixable(&self) -> bool {
        self.fix.as_ref().is_some_and(|edits| !edits.is_empty())
    }
}
