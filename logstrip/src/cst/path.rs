//! Null-tolerant extraction of nested node fields.
//!
//! Every matching rule needs to read a possibly-absent nested field (e.g.
//! "the property name of the callee's object") without a cascade of explicit
//! presence checks. [`extract`] walks a path of steps and returns `None` the
//! moment any step cannot be taken; absence is data, not an error.

use tree_sitter::Node;

/// One step of a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Follow a grammar field by name (e.g. `left`, `property`, `source`).
    Field(&'static str),
    /// Take the n-th named child, skipping extras such as comments.
    NamedChild(usize),
}

/// Walks `steps` in order starting from `node`.
///
/// Returns `None` immediately if the starting node is absent or any step
/// cannot be resolved. Never panics for a missing path.
#[must_use]
pub fn extract<'t>(node: Option<Node<'t>>, steps: &[PathStep]) -> Option<Node<'t>> {
    let mut current = node?;
    for step in steps {
        current = match *step {
            PathStep::Field(name) => current.child_by_field_name(name)?,
            PathStep::NamedChild(index) => nth_named_child(current, index)?,
        };
    }
    Some(current)
}

/// Returns the n-th named child that is not an extra node.
///
/// Comments are "extra" in the JavaScript grammar and may be interleaved
/// anywhere; counting them would make positional steps depend on comment
/// placement.
fn nth_named_child(node: Node<'_>, index: usize) -> Option<Node<'_>> {
    let mut remaining = index;
    for i in 0..node.named_child_count() {
        let child = node.named_child(i as u32)?;
        if child.is_extra() {
            continue;
        }
        if remaining == 0 {
            return Some(child);
        }
        remaining -= 1;
    }
    None
}

/// Returns the text of an identifier-like node.
///
/// Only plain identifiers and member property identifiers qualify; any other
/// kind (patterns, literals, computed accesses) yields `None` so the caller
/// falls through to "does not match".
#[must_use]
pub fn identifier_name<'s>(node: Option<Node<'_>>, source: &'s str) -> Option<&'s str> {
    let node = node?;
    match node.kind() {
        "identifier" | "property_identifier" => Some(&source[node.start_byte()..node.end_byte()]),
        _ => None,
    }
}

/// Returns the unquoted content of a string literal node.
///
/// Used for import module specifiers. An empty string literal has no
/// fragment child and yields `""`.
#[must_use]
pub fn string_value<'s>(node: Option<Node<'_>>, source: &'s str) -> Option<&'s str> {
    let node = node?;
    if node.kind() != "string" {
        return None;
    }
    match nth_named_child(node, 0) {
        Some(fragment) if fragment.kind() == "string_fragment" => {
            Some(&source[fragment.start_byte()..fragment.end_byte()])
        }
        Some(_) => None,
        None => Some(""),
    }
}
