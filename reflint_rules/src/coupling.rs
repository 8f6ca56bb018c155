//! The parent-child coupling detector.
//!
//! Inspects every effect call and decides two independent conditions:
//!
//! - `avoidInternalEffect`: every dependency of the effect resolves to
//!   a value the component already controls (state or props), so the
//!   effect is a reaction to the component's own render cycle.
//! - `avoidParentChildCoupling`: the effect makes a parent-supplied
//!   callback observe the child's internals, either by invoking a prop
//!   callback from the body, or by resetting every state cell to its
//!   default while a prop drives the dependency list.
//!
//! Any missing precondition (not an effect call, no function body, no
//! array dependency list) means neither condition applies and the node
//! is skipped without a report.

use reflint_parser::{NodeId, NodeKind, SyntaxTree};
use reflint_semantic::{identifiers_in, scope_references, traverse, ReferenceId};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::classify::{is_call_target, is_prop_reference, is_state_reference, state_cell_node};
use crate::equivalence::equivalent_opt;
use crate::messages::MessageId;
use crate::react::{
    effect_body_fn, effect_dependency_array, enclosing_component, is_effect_call,
    is_state_cell_decl, state_default_expr,
};
use crate::rule::{DiagnosticSink, Rule, RuleContext};

/// Flags effects that couple a child component's internals to its
/// parent.
pub struct ParentChildCoupling;

impl Rule for ParentChildCoupling {
    fn name(&self) -> &'static str {
        "parent-child-coupling"
    }

    fn check(&self, ctx: &RuleContext<'_>, node: NodeId, sink: &mut DiagnosticSink) {
        let Some(verdict) = analyze_effect(ctx, node) else {
            return;
        };
        if verdict.internal_only {
            sink.report(ctx, self.name(), MessageId::AvoidInternalEffect, node);
        }
        if verdict.coupling {
            sink.report(ctx, self.name(), MessageId::AvoidParentChildCoupling, node);
        }
    }
}

/// Outcome for one applicable effect call.
struct Verdict {
    internal_only: bool,
    coupling: bool,
}

/// Run the decision procedure on a candidate node.
///
/// `None` when the node is not an effect call with a function body and
/// an array dependency list.
fn analyze_effect(ctx: &RuleContext<'_>, node: NodeId) -> Option<Verdict> {
    let tree = ctx.tree;
    let graph = ctx.scopes;

    if !is_effect_call(tree, node) {
        return None;
    }
    let body = effect_body_fn(tree, node)?;
    let deps = effect_dependency_array(tree, node)?;

    // Every reference made anywhere inside the body, including nested
    // callbacks.
    let body_scope = graph.owned_scope(body)?;
    let body_refs = scope_references(graph, body_scope);

    // The dependency array owns no scope; gather its identifiers
    // directly and keep the resolved ones.
    let dep_refs: Vec<ReferenceId> = identifiers_in(tree, deps)
        .into_iter()
        .filter_map(|id| graph.reference_for(id))
        .filter(|&r| graph.reference(r).resolved.is_some())
        .collect();

    let internal_only = !dep_refs.is_empty()
        && dep_refs.iter().all(|&r| {
            is_state_reference(tree, graph, r) || is_prop_reference(tree, graph, r)
        });

    let notifies_parent = body_refs.iter().any(|&r| {
        is_call_target(tree, graph, r) && is_prop_reference(tree, graph, r)
    });

    let coupling = notifies_parent || resets_all_state(ctx, node, &body_refs, &dep_refs);

    Some(Verdict {
        internal_only,
        coupling,
    })
}

/// The reset-to-default path: a prop drives the dependency list while
/// the body resets every state cell of the enclosing component back to
/// its declared default. The parent observes the reset through the prop
/// it controls, which is the coupling in disguise.
fn resets_all_state(
    ctx: &RuleContext<'_>,
    node: NodeId,
    body_refs: &[ReferenceId],
    dep_refs: &[ReferenceId],
) -> bool {
    let tree = ctx.tree;
    let graph = ctx.scopes;

    if !dep_refs
        .iter()
        .any(|&r| is_prop_reference(tree, graph, r))
    {
        return false;
    }

    let setters: SmallVec<[ReferenceId; 4]> = body_refs
        .iter()
        .copied()
        .filter(|&r| is_call_target(tree, graph, r) && is_state_reference(tree, graph, r))
        .collect();
    if setters.is_empty() {
        return false;
    }

    // Every setter call must pass the cell's declared default back.
    let mut reset_cells = FxHashSet::default();
    for &setter in &setters {
        let Some(cell) = state_cell_node(tree, graph, setter) else {
            return false;
        };
        let default = state_default_expr(tree, cell);
        let argument = call_argument(tree, graph.reference(setter).identifier);
        if !equivalent_opt(tree, default, argument) {
            return false;
        }
        reset_cells.insert(cell);
    }

    // All of the component's cells, not just some.
    let Some(component) = enclosing_component(tree, node) else {
        return false;
    };
    let mut total_cells = 0usize;
    traverse(tree, component, |n| {
        if is_state_cell_decl(tree, n) {
            total_cells += 1;
        }
    });
    reset_cells.len() == total_cells
}

/// First argument of the call a callee identifier belongs to, walking
/// member chains on the object side like the call-target classifier.
fn call_argument(tree: &SyntaxTree, identifier: NodeId) -> Option<NodeId> {
    let mut node = identifier;
    loop {
        let parent = tree.parent(node)?;
        match tree.kind(parent) {
            NodeKind::Member { object, .. } if *object == node => node = parent,
            NodeKind::Call {
                callee, arguments, ..
            } if *callee == node => return arguments.first().copied(),
            _ => return None,
        }
    }
}
