use super::{walk_tree, ParsedFile};
use std::ops::Range;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `import def from 'mod'`
    Default,
    /// `import * as ns from 'mod'`
    Namespace,
    /// `import { name } from 'mod'` or `import { name as alias } from 'mod'`
    Named,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub kind: SpecifierKind,
    /// Name exported by the source module. Equal to `local` for default and
    /// namespace clauses and for un-aliased named imports.
    pub imported: String,
    /// Name the binding is visible under in this file.
    pub local: String,
}

/// An import declaration read off the tree. A declaration holds at most one
/// default and at most one namespace specifier, plus any number of named
/// specifiers.
#[derive(Debug, Clone)]
pub struct ImportDeclaration {
    /// Byte range of the whole statement, terminating `;` included.
    pub range: Range<usize>,
    /// Byte range of the module-path literal, quotes included.
    pub source_range: Range<usize>,
    /// Module-path literal exactly as written, quotes included.
    pub source_raw: String,
    /// Module path with the quotes stripped.
    pub source_value: String,
    pub specifiers: Vec<ImportSpecifier>,
    /// 1-based position of the statement start.
    pub line: usize,
    pub column: usize,
    /// 1-based position of the module-path literal.
    pub source_line: usize,
    pub source_column: usize,
}

/// Collect every import declaration in the file, in source order.
pub fn collect_imports(file: &ParsedFile) -> Vec<ImportDeclaration> {
    let mut imports = Vec::new();
    walk_tree(file.tree.root_node(), &mut |node| {
        if node.kind() == "import_statement" {
            if let Some(import) = extract_import(node, &file.content) {
                imports.push(import);
            }
        }
    });
    imports
}

fn extract_import(node: Node, source: &str) -> Option<ImportDeclaration> {
    let source_node = node.child_by_field_name("source")?;
    let source_raw = source[source_node.byte_range()].to_string();
    let source_value = source_raw
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    let mut specifiers = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "import_clause" {
            extract_clause(child, source, &mut specifiers);
        }
    }

    let start = node.start_position();
    let source_start = source_node.start_position();

    Some(ImportDeclaration {
        range: node.byte_range(),
        source_range: source_node.byte_range(),
        source_raw,
        source_value,
        specifiers,
        line: start.row + 1,
        column: start.column + 1,
        source_line: source_start.row + 1,
        source_column: source_start.column + 1,
    })
}

fn extract_clause(clause: Node, source: &str, out: &mut Vec<ImportSpecifier>) {
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                let name = source[child.byte_range()].to_string();
                out.push(ImportSpecifier {
                    kind: SpecifierKind::Default,
                    imported: name.clone(),
                    local: name,
                });
            }
            "namespace_import" => {
                if let Some(local) = namespace_local(child, source) {
                    out.push(ImportSpecifier {
                        kind: SpecifierKind::Namespace,
                        imported: local.clone(),
                        local,
                    });
                }
            }
            "named_imports" => extract_named(child, source, out),
            _ => {}
        }
    }
}

fn namespace_local(node: Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "identifier" {
            return Some(source[child.byte_range()].to_string());
        }
    }
    None
}

fn extract_named(node: Node, source: &str, out: &mut Vec<ImportSpecifier>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "import_specifier" {
            continue;
        }
        let Some(name_node) = child.child_by_field_name("name") else {
            continue;
        };
        let imported = source[name_node.byte_range()].to_string();
        let local = child
            .child_by_field_name("alias")
            .map(|alias| source[alias.byte_range()].to_string())
            .unwrap_or_else(|| imported.clone());
        out.push(ImportSpecifier {
            kind: SpecifierKind::Named,
            imported,
            local,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    fn imports_of(code: &str) -> Vec<ImportDeclaration> {
        let parsed = ParsedFile::parse(code, Language::TypeScript).unwrap();
        collect_imports(&parsed)
    }

    #[test]
    fn test_named_imports_with_alias() {
        let imports = imports_of("import { android as androidApp, ios } from 'tns-core-modules/application';\n");
        assert_eq!(imports.len(), 1);
        let decl = &imports[0];
        assert_eq!(decl.source_value, "tns-core-modules/application");
        assert_eq!(decl.source_raw, "'tns-core-modules/application'");
        assert_eq!(decl.specifiers.len(), 2);
        assert_eq!(decl.specifiers[0].imported, "android");
        assert_eq!(decl.specifiers[0].local, "androidApp");
        assert_eq!(decl.specifiers[1].imported, "ios");
        assert_eq!(decl.specifiers[1].local, "ios");
    }

    #[test]
    fn test_default_import() {
        let imports = imports_of("import app from '@nativescript/core';\n");
        assert_eq!(imports[0].specifiers.len(), 1);
        assert_eq!(imports[0].specifiers[0].kind, SpecifierKind::Default);
        assert_eq!(imports[0].specifiers[0].local, "app");
    }

    #[test]
    fn test_namespace_import() {
        let imports = imports_of("import * as fs from 'tns-core-modules/file-system';\n");
        assert_eq!(imports[0].specifiers.len(), 1);
        assert_eq!(imports[0].specifiers[0].kind, SpecifierKind::Namespace);
        assert_eq!(imports[0].specifiers[0].local, "fs");
    }

    #[test]
    fn test_default_plus_named() {
        let imports = imports_of("import def, { a, b } from 'mod';\n");
        let kinds: Vec<_> = imports[0].specifiers.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SpecifierKind::Default, SpecifierKind::Named, SpecifierKind::Named]
        );
    }

    #[test]
    fn test_side_effect_import_has_no_specifiers() {
        let imports = imports_of("import 'polyfills';\n");
        assert_eq!(imports.len(), 1);
        assert!(imports[0].specifiers.is_empty());
    }

    #[test]
    fn test_quote_style_is_preserved_in_raw() {
        let imports = imports_of("import { X } from \"nativescript-angular/router\";\n");
        assert_eq!(imports[0].source_raw, "\"nativescript-angular/router\"");
        assert_eq!(imports[0].source_value, "nativescript-angular/router");
    }

    #[test]
    fn test_statement_range_includes_semicolon() {
        let code = "import { a } from 'mod';\n";
        let imports = imports_of(code);
        assert_eq!(&code[imports[0].range.clone()], "import { a } from 'mod';");
        assert_eq!(imports[0].line, 1);
        assert_eq!(imports[0].column, 1);
    }
}
