//! Call reference collection.

use std::collections::BTreeSet;

use tree_sitter::Node;

use super::parser::ParsedFile;

/// Collect the distinct names called anywhere under `node`.
///
/// A bare call `foo()` records `foo`. A member call `x.Foo()` records only
/// `Foo`, so `pkg.Foo()` and `other.Foo()` collapse to one entry. With
/// `qualified` set, member calls keep their operand (`pkg.Foo`).
///
/// Calls with explicit type arguments and other callee shapes (parenthesized,
/// indexed, literals) are not recorded. The result is sorted.
pub fn collect_calls(node: Node, parsed: &ParsedFile, qualified: bool) -> Vec<String> {
    let mut calls = BTreeSet::new();
    let mut cursor = node.walk();

    loop {
        let current = cursor.node();
        if current.kind() == "call_expression" {
            if let Some(name) = callee_name(current, parsed, qualified) {
                calls.insert(name);
            }
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            // Stay inside the subtree rooted at `node`.
            if cursor.node() == node {
                return calls.into_iter().collect();
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return calls.into_iter().collect();
            }
        }
    }
}

fn callee_name(call: Node, parsed: &ParsedFile, qualified: bool) -> Option<String> {
    if call.child_by_field_name("type_arguments").is_some() {
        return None;
    }
    let function = call.child_by_field_name("function")?;
    match function.kind() {
        "identifier" => Some(parsed.node_text(function).to_string()),
        "selector_expression" => {
            let field = parsed.node_text(function.child_by_field_name("field")?);
            if qualified {
                let operand = parsed.node_text(function.child_by_field_name("operand")?);
                Some(format!("{}.{}", operand, field))
            } else {
                Some(field.to_string())
            }
        }
        _ => None,
    }
}
