//! Structural expression equivalence.
//!
//! Used to decide whether the argument of a setter call matches the
//! state cell's declared default. The comparison is shape-based: same
//! node kinds, same scalar payloads, children compared pairwise. Spans
//! are ignored. Semantic equivalence (`1 + 1` vs `2`) is out of scope.

use reflint_parser::{NodeId, NodeKind, SyntaxTree};

/// Compare two optional expressions; both absent counts as equivalent,
/// so `useState()` and `setData()` match.
#[must_use]
pub fn equivalent_opt(tree: &SyntaxTree, a: Option<NodeId>, b: Option<NodeId>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => equivalent(tree, a, b),
        _ => false,
    }
}

/// Whether two subtrees have the same shape.
///
/// Terminates because both walks descend strictly into children of an
/// acyclic arena.
#[must_use]
pub fn equivalent(tree: &SyntaxTree, a: NodeId, b: NodeId) -> bool {
    if !same_head(tree.kind(a), tree.kind(b)) {
        return false;
    }
    let left = tree.kind(a).children();
    let right = tree.kind(b).children();
    left.len() == right.len()
        && left
            .into_iter()
            .zip(right)
            .all(|(l, r)| equivalent(tree, l, r))
}

/// Compare two node kinds ignoring their children.
fn same_head(a: &NodeKind, b: &NodeKind) -> bool {
    match (a, b) {
        (NodeKind::Ident { name: a }, NodeKind::Ident { name: b }) => a == b,
        (NodeKind::StringLit(a), NodeKind::StringLit(b)) => a == b,
        (NodeKind::NumberLit(a), NodeKind::NumberLit(b)) => a == b,
        (NodeKind::BoolLit(a), NodeKind::BoolLit(b)) => a == b,
        (NodeKind::Unary { op: a, .. }, NodeKind::Unary { op: b, .. }) => a == b,
        (NodeKind::Binary { op: a, .. }, NodeKind::Binary { op: b, .. }) => a == b,
        (NodeKind::VarDecl { kind: a, .. }, NodeKind::VarDecl { kind: b, .. }) => a == b,
        (
            NodeKind::Member { computed: a, .. },
            NodeKind::Member { computed: b, .. },
        ) => a == b,
        (
            NodeKind::Property { shorthand: a, .. },
            NodeKind::Property { shorthand: b, .. },
        ) => a == b,
        _ => std::mem::discriminant(a) == std::mem::discriminant(b),
    }
}
