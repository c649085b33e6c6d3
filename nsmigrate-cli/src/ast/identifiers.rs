use super::{walk_tree, ParsedFile};
use std::ops::Range;
use tree_sitter::Node;

/// Syntactic position an identifier reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageRole {
    Reference,
    CallTarget,
    DeclaratorInit,
    PropertyValue,
    Parameter,
    TypeReference,
}

/// A place where an identifier is read. Matching is purely name-based; a
/// local binding that shadows an imported name is reported all the same.
#[derive(Debug, Clone)]
pub struct UsageSite {
    pub name: String,
    pub range: Range<usize>,
    pub role: UsageRole,
}

/// Collect every identifier reference outside declaration positions, in
/// source order. Declaration positions (the import clause itself, export
/// specifiers, function names, declarator names, object keys) are skipped so
/// an import's own specifier is never treated as a use of itself.
pub fn collect_usages(file: &ParsedFile) -> Vec<UsageSite> {
    let mut usages = Vec::new();
    walk_tree(file.tree.root_node(), &mut |node| {
        let kind = node.kind();
        if kind != "identifier" && kind != "type_identifier" {
            return;
        }
        let Some(parent) = node.parent() else {
            return;
        };

        let role = match parent.kind() {
            "import_specifier" | "namespace_import" | "import_clause" | "export_specifier" => {
                return;
            }
            "function_declaration" | "generator_function_declaration"
                if is_field(parent, "name", node) =>
            {
                return;
            }
            "variable_declarator" => {
                if is_field(parent, "value", node) {
                    UsageRole::DeclaratorInit
                } else {
                    return;
                }
            }
            "pair" => {
                if is_field(parent, "value", node) {
                    UsageRole::PropertyValue
                } else {
                    return;
                }
            }
            "call_expression" if is_field(parent, "function", node) => UsageRole::CallTarget,
            "required_parameter" | "optional_parameter" | "formal_parameters" => {
                UsageRole::Parameter
            }
            _ if kind == "type_identifier" => UsageRole::TypeReference,
            _ => UsageRole::Reference,
        };

        usages.push(UsageSite {
            name: file.text(node).to_string(),
            range: node.byte_range(),
            role,
        });
    });
    usages
}

fn is_field(parent: Node, field: &str, node: Node) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|child| child.id() == node.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    fn usages_of(code: &str) -> Vec<UsageSite> {
        let parsed = ParsedFile::parse(code, Language::TypeScript).unwrap();
        collect_usages(&parsed)
    }

    fn names(usages: &[UsageSite]) -> Vec<&str> {
        usages.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn test_import_specifiers_are_not_usages() {
        let usages = usages_of("import { write } from 'tns-core-modules/trace';\nwrite();\n");
        assert_eq!(names(&usages), vec!["write"]);
        assert_eq!(usages[0].role, UsageRole::CallTarget);
    }

    #[test]
    fn test_declarator_name_excluded_initializer_included() {
        let usages = usages_of("const copy = original;\n");
        assert_eq!(names(&usages), vec!["original"]);
        assert_eq!(usages[0].role, UsageRole::DeclaratorInit);
    }

    #[test]
    fn test_object_key_excluded_value_included() {
        let usages = usages_of("const options = { alert: alert };\n");
        assert_eq!(names(&usages), vec!["alert"]);
        assert_eq!(usages[0].role, UsageRole::PropertyValue);
    }

    #[test]
    fn test_member_expression_object_only() {
        let usages = usages_of("device.model;\n");
        assert_eq!(names(&usages), vec!["device"]);
    }

    #[test]
    fn test_function_parameters_are_collected() {
        let usages = usages_of("function handler(args, extra) {}\n");
        assert_eq!(names(&usages), vec!["args", "extra"]);
        assert!(usages.iter().all(|u| u.role == UsageRole::Parameter));
    }

    #[test]
    fn test_type_annotations_are_collected() {
        let usages = usages_of("const writer: TraceWriter = make();\n");
        assert!(usages
            .iter()
            .any(|u| u.name == "TraceWriter" && u.role == UsageRole::TypeReference));
    }

    #[test]
    fn test_shadowing_is_not_resolved() {
        // No scope analysis: the local `write` reads are indistinguishable
        // from uses of an import with the same name.
        let usages = usages_of("function f() { const write = 1; return write; }\n");
        assert!(usages.iter().any(|u| u.name == "write" && u.role == UsageRole::Reference));
    }
}
