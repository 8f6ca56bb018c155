//! Shape classifiers for React constructs.
//!
//! Pure predicates over the syntax tree: component declarations, state
//! cell declarations and effect registrations. All of them answer from
//! node shape alone; reference-level reasoning lives in [`crate::classify`].

use reflint_parser::{NodeId, NodeKind, SyntaxTree};

/// The state constructor hook.
pub const STATE_HOOK: &str = "useState";
/// The effect registration hook.
pub const EFFECT_HOOK: &str = "useEffect";
/// Namespace object the hooks may be accessed through.
pub const HOOK_NAMESPACE: &str = "React";

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Whether `callee` is the hook `name`, either bare (`useEffect`) or
/// namespaced (`React.useEffect`).
fn is_hook_callee(tree: &SyntaxTree, callee: NodeId, name: &str) -> bool {
    match tree.kind(callee) {
        NodeKind::Ident { name: text } => text == name,
        NodeKind::Member {
            object,
            property,
            computed: false,
        } => {
            tree.ident_name(*object) == Some(HOOK_NAMESPACE)
                && tree.ident_name(*property) == Some(name)
        }
        _ => false,
    }
}

/// Whether the node declares a component: a function declaration, or a
/// variable declarator initialized with an arrow function, bound to a
/// capitalized identifier.
#[must_use]
pub fn is_component(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.kind(node) {
        NodeKind::FunctionDecl { name, .. } => {
            tree.ident_name(*name).is_some_and(starts_uppercase)
        }
        NodeKind::VarDeclarator {
            pattern,
            init: Some(init),
        } => {
            matches!(tree.kind(*init), NodeKind::ArrowFunction { .. })
                && tree.ident_name(*pattern).is_some_and(starts_uppercase)
        }
        _ => false,
    }
}

/// Whether the node declares a state cell: a declarator destructuring
/// exactly two plain identifiers out of a state-hook call.
#[must_use]
pub fn is_state_cell_decl(tree: &SyntaxTree, node: NodeId) -> bool {
    let NodeKind::VarDeclarator {
        pattern,
        init: Some(init),
    } = tree.kind(node)
    else {
        return false;
    };
    let NodeKind::ArrayPattern { elements } = tree.kind(*pattern) else {
        return false;
    };
    if elements.len() != 2
        || !elements
            .iter()
            .all(|&e| matches!(tree.kind(e), NodeKind::Ident { .. }))
    {
        return false;
    }
    match tree.kind(*init) {
        NodeKind::Call { callee, .. } => is_hook_callee(tree, *callee, STATE_HOOK),
        _ => false,
    }
}

/// Whether the node is an effect registration call.
#[must_use]
pub fn is_effect_call(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.kind(node) {
        NodeKind::Call { callee, .. } => is_hook_callee(tree, *callee, EFFECT_HOOK),
        _ => false,
    }
}

/// The effect's body function, when the node is an effect call whose
/// first argument is a function-valued expression.
#[must_use]
pub fn effect_body_fn(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    if !is_effect_call(tree, node) {
        return None;
    }
    let NodeKind::Call { arguments, .. } = tree.kind(node) else {
        return None;
    };
    let first = *arguments.first()?;
    match tree.kind(first) {
        NodeKind::ArrowFunction { .. } | NodeKind::FunctionExpr { .. } => Some(first),
        _ => None,
    }
}

/// The effect's dependency array, when the node is an effect call whose
/// second argument is an array literal.
#[must_use]
pub fn effect_dependency_array(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    if !is_effect_call(tree, node) {
        return None;
    }
    let NodeKind::Call { arguments, .. } = tree.kind(node) else {
        return None;
    };
    let second = *arguments.get(1)?;
    match tree.kind(second) {
        NodeKind::ArrayLit { .. } => Some(second),
        _ => None,
    }
}

/// The declared default value of a state cell: the first argument of its
/// constructor call. `None` when declared as `useState()`.
#[must_use]
pub fn state_default_expr(tree: &SyntaxTree, declarator: NodeId) -> Option<NodeId> {
    let NodeKind::VarDeclarator {
        init: Some(init), ..
    } = tree.kind(declarator)
    else {
        return None;
    };
    match tree.kind(*init) {
        NodeKind::Call { arguments, .. } => arguments.first().copied(),
        _ => None,
    }
}

/// The nearest enclosing component of a node, walking parents upward.
#[must_use]
pub fn enclosing_component(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|&a| is_component(tree, a))
}
