//! Declaration walking.

use tree_sitter::Node;

/// Node kinds that produce a declaration record.
const DECLARATION_KINDS: &[&str] = &["function_declaration", "method_declaration"];

/// Collect every function and method declaration, depth-first, in source
/// order.
///
/// No declaration is filtered out by name.
pub fn declarations(root: Node) -> Vec<Node> {
    let mut found = Vec::new();
    let mut cursor = root.walk();

    // Iterative pre-order walk over the whole tree.
    loop {
        let node = cursor.node();
        if DECLARATION_KINDS.contains(&node.kind()) {
            found.push(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return found;
            }
        }
    }
}
