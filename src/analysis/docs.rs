//! Doc comment extraction.

use tree_sitter::Node;

use super::parser::ParsedFile;

/// Extract the doc comment of a declaration as one normalized line.
///
/// The doc comment is the comment group ending on the line right above the
/// declaration. Comments belong to one group while each starts at most one
/// line after the previous one ends. A comment that starts on the same line
/// as the code before it trails that code and ends the group.
///
/// Each comment loses one leading `//` and surrounding whitespace; empty
/// lines are dropped and the rest are joined with a single space.
pub fn extract_docstring(decl: Node, parsed: &ParsedFile) -> String {
    let mut group = Vec::new();
    let mut next_start = decl.start_position().row;
    let mut prev = decl.prev_named_sibling();

    while let Some(sibling) = prev {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 < next_start {
            break;
        }
        // The first comment must end on the line right above the declaration.
        if group.is_empty() && sibling.end_position().row + 1 != next_start {
            break;
        }
        if trails_code(sibling) {
            break;
        }
        group.push(sibling);
        next_start = sibling.start_position().row;
        prev = sibling.prev_named_sibling();
    }

    group
        .iter()
        .rev()
        .map(|comment| {
            let text = parsed.node_text(*comment);
            text.strip_prefix("//").unwrap_or(text).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a comment shares its line with code, possibly behind other
/// comments on that line (`x = 1 /* a */ // b`).
fn trails_code(comment: Node) -> bool {
    let row = comment.start_position().row;
    let mut prev = comment.prev_named_sibling();
    while let Some(node) = prev {
        if node.end_position().row != row {
            return false;
        }
        if node.kind() != "comment" {
            return true;
        }
        prev = node.prev_named_sibling();
    }
    false
}
