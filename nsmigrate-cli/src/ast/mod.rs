mod identifiers;
mod imports;

pub use identifiers::{collect_usages, UsageRole, UsageSite};
pub use imports::{collect_imports, ImportDeclaration, ImportSpecifier, SpecifierKind};

use crate::core::{Language, MigrateError};
use anyhow::anyhow;
use tree_sitter::{Node, Parser, Tree};

/// A source file together with its syntax tree. Files that do not parse
/// cleanly are rejected here and never reach the rules.
pub struct ParsedFile {
    pub content: String,
    pub language: Language,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn parse(content: &str, language: Language) -> Result<Self, MigrateError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| MigrateError::Other(anyhow!("failed to load grammar: {e}")))?;

        let tree = parser.parse(content, None).ok_or(MigrateError::SyntaxError)?;
        if tree.root_node().has_error() {
            return Err(MigrateError::SyntaxError);
        }

        Ok(Self {
            content: content.to_string(),
            language,
            tree,
        })
    }

    pub fn text(&self, node: Node) -> &str {
        &self.content[node.byte_range()]
    }
}

/// Pre-order traversal over every node in the tree, in source order.
pub fn walk_tree<'a>(root: Node<'a>, visit: &mut dyn FnMut(Node<'a>)) {
    let mut cursor = root.walk();
    'outer: loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'outer;
            }
            if !cursor.goto_parent() {
                break 'outer;
            }
        }
    }
}
