//! Tree and graph queries shared by the classifiers.

use reflint_parser::{NodeId, NodeKind, SyntaxTree};
use rustc_hash::FxHashSet;

use crate::scope::{DefinitionKind, ReferenceId, ScopeGraph, ScopeId};

/// Pre-order walk of the subtree rooted at `root`.
pub fn traverse(tree: &SyntaxTree, root: NodeId, mut visit: impl FnMut(NodeId)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        let mut children = tree.kind(node).children();
        children.reverse();
        stack.extend(children);
    }
}

/// Every identifier node in the subtree rooted at `root`, in source order.
#[must_use]
pub fn identifiers_in(tree: &SyntaxTree, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    traverse(tree, root, |node| {
        if matches!(tree.kind(node), NodeKind::Ident { .. }) {
            out.push(node);
        }
    });
    out
}

/// References recorded for identifiers inside the subtree rooted at
/// `root`, in source order.
///
/// Works off the subtree rather than the scope list so references made
/// in nested scopes (an arrow inside the inspected body) are included.
#[must_use]
pub fn references_in(tree: &SyntaxTree, graph: &ScopeGraph, root: NodeId) -> Vec<ReferenceId> {
    identifiers_in(tree, root)
        .into_iter()
        .filter_map(|id| graph.reference_for(id))
        .collect()
}

/// References occurring directly in `scope` and every descendant scope.
#[must_use]
pub fn scope_references(graph: &ScopeGraph, scope: ScopeId) -> Vec<ReferenceId> {
    let mut out = Vec::new();
    let mut stack = vec![scope];
    while let Some(id) = stack.pop() {
        let scope = graph.scope(id);
        out.extend(scope.references.iter().copied());
        stack.extend(scope.children.iter().rev().copied());
    }
    out
}

/// Follow a reference through alias declarations to the chain of
/// references it originates from.
///
/// Starting from `reference`, repeatedly: resolve to a binding; if the
/// binding's only role is `const alias = source` with a bare identifier
/// initializer, step to the reference recorded for that initializer.
/// Returns every reference visited, starting with `reference` itself.
/// A visited set guards against declaration cycles.
#[must_use]
pub fn upstream_chain(
    tree: &SyntaxTree,
    graph: &ScopeGraph,
    reference: ReferenceId,
) -> Vec<ReferenceId> {
    let mut chain = vec![reference];
    let mut visited = FxHashSet::default();
    visited.insert(reference);

    let mut current = reference;
    loop {
        let Some(binding) = graph.reference(current).resolved else {
            break;
        };
        let binding = graph.binding(binding);
        // Only a single plain-variable definition is transparent.
        let [def] = binding.defs.as_slice() else {
            break;
        };
        if def.kind != DefinitionKind::Variable {
            break;
        }
        let NodeKind::VarDeclarator {
            init: Some(init), ..
        } = tree.kind(def.node)
        else {
            break;
        };
        if !matches!(tree.kind(*init), NodeKind::Ident { .. }) {
            break;
        }
        let Some(next) = graph.reference_for(*init) else {
            break;
        };
        if !visited.insert(next) {
            break;
        }
        chain.push(next);
        current = next;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use reflint_parser::parse;

    fn named(tree: &SyntaxTree, name: &str) -> Vec<NodeId> {
        (0..tree.len())
            .map(|i| NodeId::new(i as u32))
            .filter(|&n| tree.ident_name(n) == Some(name))
            .collect()
    }

    #[test]
    fn test_identifiers_in_source_order() {
        let tree = parse("f(a, b.c, d)").unwrap();
        let names: Vec<&str> = identifiers_in(&tree, tree.root())
            .into_iter()
            .filter_map(|n| tree.ident_name(n))
            .collect();
        assert_eq!(names, vec!["f", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_references_in_skips_member_properties() {
        let tree = parse("f(a, b.c)").unwrap();
        let graph = bind(&tree);
        let names: Vec<&str> = references_in(&tree, &graph, tree.root())
            .into_iter()
            .map(|r| graph.reference(r).identifier)
            .filter_map(|n| tree.ident_name(n))
            .collect();
        assert_eq!(names, vec!["f", "a", "b"]);
    }

    #[test]
    fn test_scope_references_cover_descendants() {
        let tree = parse("function f(a) { const g = () => a; }").unwrap();
        let graph = bind(&tree);
        let f = named(&tree, "f")[0];
        let function = tree.parent(f).unwrap();
        let scope = graph.owned_scope(function).unwrap();
        let names: Vec<&str> = scope_references(&graph, scope)
            .into_iter()
            .map(|r| graph.reference(r).identifier)
            .filter_map(|n| tree.ident_name(n))
            .collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_upstream_chain_follows_alias() {
        let tree =
            parse("function f(onClose) { const wrapped = onClose; wrapped(); }").unwrap();
        let graph = bind(&tree);
        let call_target = *named(&tree, "wrapped").last().unwrap();
        let reference = graph.reference_for(call_target).unwrap();

        let chain = upstream_chain(&tree, &graph, reference);
        assert_eq!(chain.len(), 2);
        let last = graph.reference(*chain.last().unwrap());
        assert_eq!(tree.ident_name(last.identifier), Some("onClose"));
    }

    #[test]
    fn test_upstream_chain_stops_at_parameter() {
        let tree = parse("function f(x) { x(); }").unwrap();
        let graph = bind(&tree);
        let use_site = *named(&tree, "x").last().unwrap();
        let reference = graph.reference_for(use_site).unwrap();
        assert_eq!(upstream_chain(&tree, &graph, reference).len(), 1);
    }

    #[test]
    fn test_upstream_chain_cycle_guard() {
        // `const a = a` resolves the initializer to its own binding.
        let tree = parse("const a = a; a;").unwrap();
        let graph = bind(&tree);
        let use_site = *named(&tree, "a").last().unwrap();
        let reference = graph.reference_for(use_site).unwrap();
        let chain = upstream_chain(&tree, &graph, reference);
        assert!(chain.len() <= 3);
    }
}
