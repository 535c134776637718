//! Type expression resolution for signatures.
//!
//! A tree-sitter type node is first lifted into [`TypeExpr`], a closed sum
//! type over the forms the extractor understands, and then rendered to its
//! canonical descriptor. Anything outside the enumerated forms becomes
//! [`TypeExpr::Unknown`], so resolution never fails.
//!
//! Three renderings exist:
//! - parameters use the full recursive descriptor (`map[string][]*T`)
//! - results only resolve named and package-qualified types
//! - receivers only resolve `T` and `*T`

use std::fmt;

use tree_sitter::Node;

use super::parser::ParsedFile;

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
    /// `chan T`
    Both,
}

/// A type expression, reduced to the forms that have a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain type name (`int`, `error`, `Config`, `T`).
    Named(String),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// Slice or fixed-size array. The length is dropped.
    Sequence(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    /// Any function type. The signature is not expanded.
    Func,
    Interface {
        empty: bool,
    },
    Struct,
    /// `pkg.Name`. `package` is None when the qualifier is not a simple
    /// identifier.
    Qualified {
        package: Option<String>,
        name: String,
    },
    /// `...T` (only produced for variadic parameters).
    Variadic(Box<TypeExpr>),
    Unknown,
}

impl TypeExpr {
    /// Lift a tree-sitter type node.
    pub fn from_node(node: Node, parsed: &ParsedFile) -> Self {
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Named(parsed.node_text(node).to_string()),
            "pointer_type" => {
                let inner = first_named_child(node)
                    .map(|n| TypeExpr::from_node(n, parsed))
                    .unwrap_or(TypeExpr::Unknown);
                TypeExpr::Pointer(Box::new(inner))
            }
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                TypeExpr::Sequence(Box::new(field_type(node, "element", parsed)))
            }
            "map_type" => TypeExpr::Map {
                key: Box::new(field_type(node, "key", parsed)),
                value: Box::new(field_type(node, "value", parsed)),
            },
            "channel_type" => TypeExpr::Chan {
                dir: chan_dir(node),
                elem: Box::new(field_type(node, "value", parsed)),
            },
            "function_type" => TypeExpr::Func,
            "interface_type" => TypeExpr::Interface {
                empty: first_named_child(node).is_none(),
            },
            "struct_type" => TypeExpr::Struct,
            "qualified_type" => {
                let package = node
                    .child_by_field_name("package")
                    .filter(|n| n.kind() == "package_identifier")
                    .map(|n| parsed.node_text(n).to_string());
                let name = node
                    .child_by_field_name("name")
                    .map(|n| parsed.node_text(n).to_string())
                    .unwrap_or_default();
                TypeExpr::Qualified { package, name }
            }
            _ => TypeExpr::Unknown,
        }
    }

    /// Descriptor used for a function result.
    ///
    /// Only named and qualified types resolve; other forms are `unknown`. A
    /// qualified type without a simple qualifier yields nothing.
    pub fn result_descriptor(&self) -> Option<String> {
        match self {
            TypeExpr::Named(name) => Some(name.clone()),
            TypeExpr::Qualified {
                package: Some(pkg),
                name,
            } => Some(format!("{}.{}", pkg, name)),
            TypeExpr::Qualified { package: None, .. } => None,
            _ => Some("unknown".to_string()),
        }
    }

    /// Descriptor used for a method receiver: `T`, `*T`, or empty.
    pub fn receiver_descriptor(&self) -> String {
        match self {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Pointer(inner) => match inner.as_ref() {
                TypeExpr::Named(name) => format!("*{}", name),
                _ => String::new(),
            },
            _ => String::new(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Sequence(elem) => write!(f, "[]{}", elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
                ChanDir::Both => write!(f, "chan {}", elem),
            },
            TypeExpr::Func => write!(f, "func"),
            TypeExpr::Interface { empty: true } => write!(f, "interface{{}}"),
            TypeExpr::Interface { empty: false } => write!(f, "interface{{...}}"),
            TypeExpr::Struct => write!(f, "struct{{...}}"),
            TypeExpr::Qualified {
                package: Some(pkg),
                name,
            } => write!(f, "{}.{}", pkg, name),
            TypeExpr::Qualified { package: None, .. } => write!(f, "unknown.selector"),
            TypeExpr::Variadic(elem) => write!(f, "...{}", elem),
            TypeExpr::Unknown => write!(f, "unknown"),
        }
    }
}

fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    found
}

fn field_type(node: Node, field: &str, parsed: &ParsedFile) -> TypeExpr {
    node.child_by_field_name(field)
        .map(|n| TypeExpr::from_node(n, parsed))
        .unwrap_or(TypeExpr::Unknown)
}

/// `<-chan T` starts with the arrow, `chan<- T` has it second.
fn chan_dir(node: Node) -> ChanDir {
    if node.child(0).is_some_and(|n| n.kind() == "<-") {
        ChanDir::Recv
    } else if node.child(1).is_some_and(|n| n.kind() == "<-") {
        ChanDir::Send
    } else {
        ChanDir::Both
    }
}

/// Parameter declarations in a `parameter_list`, skipping comments.
fn parameter_groups(list: Node) -> Vec<Node> {
    let mut cursor = list.walk();
    let groups = list
        .named_children(&mut cursor)
        .filter(|n| {
            matches!(
                n.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            )
        })
        .collect();
    groups
}

fn group_type(group: Node, parsed: &ParsedFile) -> TypeExpr {
    let ty = field_type(group, "type", parsed);
    if group.kind() == "variadic_parameter_declaration" {
        TypeExpr::Variadic(Box::new(ty))
    } else {
        ty
    }
}

/// Resolve a parameter list into one descriptor per parameter slot.
///
/// `a, b int` yields two entries; an unnamed parameter yields one.
pub fn parameter_types(params: Option<Node>, parsed: &ParsedFile) -> Vec<String> {
    let Some(list) = params else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for group in parameter_groups(list) {
        let descriptor = group_type(group, parsed).to_string();
        let mut cursor = group.walk();
        let names = group.children_by_field_name("name", &mut cursor).count();
        for _ in 0..names.max(1) {
            result.push(descriptor.clone());
        }
    }
    result
}

/// Resolve a function result into a `", "`-joined descriptor list.
///
/// One entry per result group: `(a, b int)` is a single `int`.
pub fn result_types(result: Option<Node>, parsed: &ParsedFile) -> String {
    let Some(node) = result else {
        return String::new();
    };

    let types: Vec<String> = if node.kind() == "parameter_list" {
        parameter_groups(node)
            .into_iter()
            .filter_map(|group| group_type(group, parsed).result_descriptor())
            .collect()
    } else {
        TypeExpr::from_node(node, parsed)
            .result_descriptor()
            .into_iter()
            .collect()
    };
    types.join(", ")
}

/// Resolve a method receiver.
///
/// Returns None when there is no receiver parameter (a plain function).
pub fn receiver_type(receiver: Option<Node>, parsed: &ParsedFile) -> Option<String> {
    let list = receiver?;
    let first = parameter_groups(list).into_iter().next()?;
    Some(field_type(first, "type", parsed).receiver_descriptor())
}
