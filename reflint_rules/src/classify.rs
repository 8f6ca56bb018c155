//! Reference classifiers.
//!
//! Each classifier takes a resolved reference and answers a question
//! about what the referenced name ultimately is: a call target, a state
//! cell, a component prop. All of them follow the alias chain first, so
//! `const wrapped = onClose; wrapped()` classifies like a direct call.

use reflint_parser::{NodeId, NodeKind, SyntaxTree};
use reflint_semantic::{upstream_chain, DefinitionKind, ReferenceId, ScopeGraph};

use crate::react::{is_component, is_state_cell_decl};

/// Whether the reference's identifier is the callee of its enclosing
/// call.
///
/// Member chains are walked first: for `events.onClose()` the resolved
/// reference is `events`, and the relevant call site is the one whose
/// callee is the whole member expression. The climb only follows the
/// object side, so a reference in property or argument position never
/// qualifies.
#[must_use]
pub fn is_call_target(tree: &SyntaxTree, graph: &ScopeGraph, reference: ReferenceId) -> bool {
    let mut node = graph.reference(reference).identifier;
    loop {
        let Some(parent) = tree.parent(node) else {
            return false;
        };
        match tree.kind(parent) {
            NodeKind::Member { object, .. } if *object == node => {
                node = parent;
            }
            NodeKind::Call { callee, .. } => return *callee == node,
            _ => return false,
        }
    }
}

/// The state cell declarator a reference ultimately resolves to, walking
/// the alias chain outward. `None` when the chain never reaches one.
#[must_use]
pub fn state_cell_node(
    tree: &SyntaxTree,
    graph: &ScopeGraph,
    reference: ReferenceId,
) -> Option<NodeId> {
    for link in upstream_chain(tree, graph, reference) {
        let Some(binding) = graph.reference(link).resolved else {
            continue;
        };
        for def in &graph.binding(binding).defs {
            if def.kind == DefinitionKind::Variable && is_state_cell_decl(tree, def.node) {
                return Some(def.node);
            }
        }
    }
    None
}

/// Whether a reference ultimately resolves to a state cell's value or
/// setter.
#[must_use]
pub fn is_state_reference(tree: &SyntaxTree, graph: &ScopeGraph, reference: ReferenceId) -> bool {
    state_cell_node(tree, graph, reference).is_some()
}

/// Whether a reference ultimately resolves to a parameter of a component
/// function.
///
/// A parameter definition points at its function node; for arrows the
/// component shape lives on the declarator the arrow is assigned to.
#[must_use]
pub fn is_prop_reference(tree: &SyntaxTree, graph: &ScopeGraph, reference: ReferenceId) -> bool {
    for link in upstream_chain(tree, graph, reference) {
        let Some(binding) = graph.reference(link).resolved else {
            continue;
        };
        for def in &graph.binding(binding).defs {
            if def.kind != DefinitionKind::Parameter {
                continue;
            }
            let component = match tree.kind(def.node) {
                NodeKind::ArrowFunction { .. } => tree.parent(def.node),
                _ => Some(def.node),
            };
            if component.is_some_and(|c| is_component(tree, c)) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflint_parser::parse;
    use reflint_semantic::bind;

    fn reference_to(tree: &SyntaxTree, graph: &ScopeGraph, name: &str, nth: usize) -> ReferenceId {
        let mut seen = 0;
        for i in 0..tree.len() {
            let node = NodeId::new(i as u32);
            if tree.ident_name(node) != Some(name) {
                continue;
            }
            if let Some(reference) = graph.reference_for(node) {
                if seen == nth {
                    return reference;
                }
                seen += 1;
            }
        }
        panic!("no reference #{nth} to {name}");
    }

    #[test]
    fn test_call_target_positions() {
        let source = "function App(onDone, data) {\n\
                      onDone(data);\n\
                      other(onDone);\n\
                      }";
        let tree = parse(source).unwrap();
        let graph = bind(&tree);

        let direct = reference_to(&tree, &graph, "onDone", 0);
        assert!(is_call_target(&tree, &graph, direct));

        let argument = reference_to(&tree, &graph, "onDone", 1);
        assert!(!is_call_target(&tree, &graph, argument));

        let data = reference_to(&tree, &graph, "data", 0);
        assert!(!is_call_target(&tree, &graph, data));
    }

    #[test]
    fn test_member_call_target_maps_to_object() {
        let tree = parse("function App(events) { events.onClose(); }").unwrap();
        let graph = bind(&tree);
        let events = reference_to(&tree, &graph, "events", 0);
        assert!(is_call_target(&tree, &graph, events));
    }

    #[test]
    fn test_member_read_is_not_call_target() {
        let tree = parse("function App(events) { const x = events.onClose; }").unwrap();
        let graph = bind(&tree);
        let events = reference_to(&tree, &graph, "events", 0);
        assert!(!is_call_target(&tree, &graph, events));
    }

    #[test]
    fn test_state_reference_value_and_setter() {
        let source = "function App() {\n\
                      const [data, setData] = useState(0);\n\
                      data; setData;\n\
                      }";
        let tree = parse(source).unwrap();
        let graph = bind(&tree);

        let value = reference_to(&tree, &graph, "data", 0);
        let setter = reference_to(&tree, &graph, "setData", 0);
        assert!(is_state_reference(&tree, &graph, value));
        assert!(is_state_reference(&tree, &graph, setter));
        assert_eq!(
            state_cell_node(&tree, &graph, value),
            state_cell_node(&tree, &graph, setter)
        );
    }

    #[test]
    fn test_state_reference_through_alias() {
        let source = "function App() {\n\
                      const [data, setData] = useState(0);\n\
                      const current = data;\n\
                      current;\n\
                      }";
        let tree = parse(source).unwrap();
        let graph = bind(&tree);
        let current = reference_to(&tree, &graph, "current", 0);
        assert!(is_state_reference(&tree, &graph, current));
    }

    #[test]
    fn test_external_call_result_is_not_state() {
        let tree =
            parse("function App() { const data = useSomeAPI(); data; }").unwrap();
        let graph = bind(&tree);
        let data = reference_to(&tree, &graph, "data", 0);
        assert!(!is_state_reference(&tree, &graph, data));
        assert!(!is_prop_reference(&tree, &graph, data));
    }

    #[test]
    fn test_prop_reference_function_and_arrow() {
        let declared = parse("function App(onDone) { onDone; }").unwrap();
        let graph = bind(&declared);
        let reference = reference_to(&declared, &graph, "onDone", 0);
        assert!(is_prop_reference(&declared, &graph, reference));

        let arrow = parse("const App = (onDone) => { onDone; };").unwrap();
        let graph = bind(&arrow);
        let reference = reference_to(&arrow, &graph, "onDone", 0);
        assert!(is_prop_reference(&arrow, &graph, reference));
    }

    #[test]
    fn test_non_component_parameter_is_not_prop() {
        let tree = parse("function helper(onDone) { onDone; }").unwrap();
        let graph = bind(&tree);
        let reference = reference_to(&tree, &graph, "onDone", 0);
        assert!(!is_prop_reference(&tree, &graph, reference));
    }

    #[test]
    fn test_prop_reference_through_alias() {
        let source = "function App(onFetched) {\n\
                      const wrapped = onFetched;\n\
                      wrapped;\n\
                      }";
        let tree = parse(source).unwrap();
        let graph = bind(&tree);
        let wrapped = reference_to(&tree, &graph, "wrapped", 0);
        assert!(is_prop_reference(&tree, &graph, wrapped));
    }

    #[test]
    fn test_ambient_global_fails_every_classifier() {
        let tree = parse("function App() { console; }").unwrap();
        let graph = bind(&tree);
        let reference = reference_to(&tree, &graph, "console", 0);
        assert!(!is_state_reference(&tree, &graph, reference));
        assert!(!is_prop_reference(&tree, &graph, reference));
    }
}
