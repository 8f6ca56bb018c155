//! Scope binding.
//!
//! Two phases: a single tree walk that creates scopes, declares bindings
//! and records every identifier use, then a resolution pass that links
//! each reference to the nearest binding up its scope chain. Splitting
//! the phases makes forward references (a function used above its
//! declaration) resolve without special cases.

use reflint_parser::{NodeId, NodeKind, SyntaxTree};
use smallvec::SmallVec;

use crate::scope::{Definition, DefinitionKind, ScopeGraph, ScopeId, ScopeKind};

/// Names treated as always-present environment bindings.
///
/// They resolve but carry no definition, so definition-based classifiers
/// answer negatively for them rather than treating the name as unknown.
const AMBIENT_GLOBALS: &[&str] = &[
    "undefined",
    "console",
    "window",
    "document",
    "globalThis",
    "JSON",
    "Math",
    "Object",
    "Array",
    "Promise",
];

/// Build the scope graph for a parsed file.
#[must_use]
pub fn bind(tree: &SyntaxTree) -> ScopeGraph {
    let mut binder = Binder::new(tree);
    binder.run();
    binder.finish()
}

struct Binder<'t> {
    tree: &'t SyntaxTree,
    graph: ScopeGraph,
    stack: SmallVec<[ScopeId; 8]>,
}

impl<'t> Binder<'t> {
    fn new(tree: &'t SyntaxTree) -> Self {
        let mut graph = ScopeGraph::default();
        let program = graph.push_scope(ScopeKind::Program, tree.root(), None);
        for name in AMBIENT_GLOBALS {
            graph.declare(program, name, None);
        }
        let mut stack = SmallVec::new();
        stack.push(program);
        Self { tree, graph, stack }
    }

    fn run(&mut self) {
        if let NodeKind::Program { body } = self.tree.kind(self.tree.root()) {
            for &stmt in body {
                self.visit_stmt(stmt);
            }
        }
        self.graph.resolve_all(self.tree);
    }

    fn finish(self) -> ScopeGraph {
        self.graph
    }

    fn current(&self) -> ScopeId {
        // The stack is never empty: the program scope is pushed in `new`
        // and only scopes pushed afterwards are popped.
        self.stack[self.stack.len() - 1]
    }

    fn enter(&mut self, kind: ScopeKind, owner: NodeId) -> ScopeId {
        let scope = self.graph.push_scope(kind, owner, Some(self.current()));
        self.stack.push(scope);
        scope
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn visit_stmt(&mut self, id: NodeId) {
        match self.tree.kind(id) {
            NodeKind::VarDecl { declarators, .. } => {
                for &decl in declarators {
                    self.visit_declarator(decl);
                }
            }
            NodeKind::FunctionDecl { name, params, body } => {
                let (name, params, body) = (*name, params.clone(), *body);
                if let Some(text) = self.tree.ident_name(name) {
                    let text = text.to_string();
                    self.graph.declare(
                        self.current(),
                        &text,
                        Some(Definition {
                            kind: DefinitionKind::Function,
                            node: id,
                        }),
                    );
                }
                self.visit_function(id, &params, body);
            }
            NodeKind::Block { body } => {
                let body = body.clone();
                self.enter(ScopeKind::Block, id);
                for stmt in body {
                    self.visit_stmt(stmt);
                }
                self.leave();
            }
            NodeKind::ExprStmt { expr } => self.visit_expr(*expr),
            NodeKind::Return { argument } => {
                if let Some(argument) = *argument {
                    self.visit_expr(argument);
                }
            }
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => {
                let (test, consequent, alternate) = (*test, *consequent, *alternate);
                self.visit_expr(test);
                self.visit_stmt(consequent);
                if let Some(alternate) = alternate {
                    self.visit_stmt(alternate);
                }
            }
            _ => self.visit_expr(id),
        }
    }

    fn visit_declarator(&mut self, id: NodeId) {
        if let NodeKind::VarDeclarator { pattern, init } = self.tree.kind(id) {
            let (pattern, init) = (*pattern, *init);
            // Initializer first so `const x = x` sees the outer `x`.
            if let Some(init) = init {
                self.visit_expr(init);
            }
            self.declare_pattern(pattern, DefinitionKind::Variable, id);
        }
    }

    /// Declare every identifier bound by a pattern.
    ///
    /// `def_node` is the declaring node recorded in the definition: the
    /// declarator for variables, the function node for parameters.
    fn declare_pattern(&mut self, pattern: NodeId, kind: DefinitionKind, def_node: NodeId) {
        match self.tree.kind(pattern) {
            NodeKind::Ident { name } => {
                let name = name.clone();
                self.graph.declare(
                    self.current(),
                    &name,
                    Some(Definition {
                        kind,
                        node: def_node,
                    }),
                );
            }
            NodeKind::ArrayPattern { elements } => {
                for element in elements.clone() {
                    self.declare_pattern(element, kind, def_node);
                }
            }
            NodeKind::ObjectPattern { properties } => {
                for property in properties.clone() {
                    if let NodeKind::Property { value, .. } = self.tree.kind(property) {
                        self.declare_pattern(*value, kind, def_node);
                    }
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn visit_function(&mut self, function: NodeId, params: &[NodeId], body: NodeId) {
        self.enter(ScopeKind::Function, function);
        for &param in params {
            // Parameters point their definition at the function itself so
            // a parameter's origin (component argument or not) is read off
            // the function node directly.
            self.declare_pattern(param, DefinitionKind::Parameter, function);
        }
        match self.tree.kind(body) {
            NodeKind::Block { body } => {
                // The body block shares the function scope.
                for stmt in body.clone() {
                    self.visit_stmt(stmt);
                }
            }
            _ => self.visit_expr(body),
        }
        self.leave();
    }

    fn visit_expr(&mut self, id: NodeId) {
        match self.tree.kind(id) {
            NodeKind::Ident { .. } => {
                self.graph.record_reference(self.current(), id);
            }
            NodeKind::Call { callee, arguments } => {
                let (callee, arguments) = (*callee, arguments.clone());
                self.visit_expr(callee);
                for argument in arguments {
                    self.visit_expr(argument);
                }
            }
            NodeKind::Member {
                object,
                property,
                computed,
            } => {
                let (object, property, computed) = (*object, *property, *computed);
                self.visit_expr(object);
                // `a.b` reads `a` only; `a[b]` also reads `b`.
                if computed {
                    self.visit_expr(property);
                }
            }
            NodeKind::ArrowFunction { params, body } => {
                let (params, body) = (params.clone(), *body);
                self.visit_function(id, &params, body);
            }
            NodeKind::FunctionExpr { params, body, .. } => {
                let (params, body) = (params.clone(), *body);
                self.visit_function(id, &params, body);
            }
            NodeKind::ArrayLit { elements } => {
                for element in elements.clone() {
                    self.visit_expr(element);
                }
            }
            NodeKind::ObjectLit { properties } => {
                for property in properties.clone() {
                    if let NodeKind::Property { value, .. } = self.tree.kind(property) {
                        // Keys are names, not reads; shorthand values are
                        // distinct identifier nodes and count as reads.
                        self.visit_expr(*value);
                    }
                }
            }
            NodeKind::Assign { target, value } => {
                let (target, value) = (*target, *value);
                self.visit_expr(target);
                self.visit_expr(value);
            }
            NodeKind::Unary { argument, .. } => self.visit_expr(*argument),
            NodeKind::Binary { left, right, .. } => {
                let (left, right) = (*left, *right);
                self.visit_expr(left);
                self.visit_expr(right);
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let (test, consequent, alternate) = (*test, *consequent, *alternate);
                self.visit_expr(test);
                self.visit_expr(consequent);
                self.visit_expr(alternate);
            }
            NodeKind::StringLit(_)
            | NodeKind::NumberLit(_)
            | NodeKind::BoolLit(_)
            | NodeKind::NullLit => {}
            // Statement and pattern kinds never reach expression position.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflint_parser::parse;

    fn bind_source(source: &str) -> (SyntaxTree, ScopeGraph) {
        let tree = parse(source).unwrap();
        let graph = bind(&tree);
        (tree, graph)
    }

    fn resolve_named(
        tree: &SyntaxTree,
        graph: &ScopeGraph,
        name: &str,
    ) -> Vec<Option<DefinitionKind>> {
        let mut out = Vec::new();
        for id in 0..tree.len() {
            let node = NodeId::new(id as u32);
            if tree.ident_name(node) != Some(name) {
                continue;
            }
            let Some(reference) = graph.reference_for(node) else {
                continue;
            };
            let resolved = graph.reference(reference).resolved;
            out.push(resolved.and_then(|b| {
                graph.binding(b).defs.first().map(|d| d.kind)
            }));
        }
        out
    }

    #[test]
    fn test_function_declares_in_enclosing_scope() {
        let (_, graph) = bind_source("function App() { return 1; }");
        let program = graph.program_scope();
        assert!(graph
            .resolve_name(program, "App")
            .is_some_and(|b| graph.binding(b).defs[0].kind == DefinitionKind::Function));
    }

    #[test]
    fn test_parameter_definition_points_at_function() {
        let (tree, graph) = bind_source("function App(props) { props; }");
        let uses = resolve_named(&tree, &graph, "props");
        assert_eq!(uses, vec![Some(DefinitionKind::Parameter)]);

        // The definition node is the function, not the parameter ident.
        let binding = (0..tree.len())
            .map(|i| NodeId::new(i as u32))
            .filter(|&n| tree.ident_name(n) == Some("props"))
            .find_map(|n| graph.reference_for(n))
            .and_then(|r| graph.reference(r).resolved)
            .unwrap();
        let def = graph.binding(binding).defs[0];
        assert!(matches!(
            tree.kind(def.node),
            NodeKind::FunctionDecl { .. }
        ));
    }

    #[test]
    fn test_destructured_variables() {
        let (tree, graph) = bind_source("const [data, setData] = useState(0); setData;");
        let uses = resolve_named(&tree, &graph, "setData");
        assert_eq!(uses, vec![Some(DefinitionKind::Variable)]);

        // Both elements share one declarator definition node.
        let scope = graph.program_scope();
        let a = graph.resolve_name(scope, "data").unwrap();
        let b = graph.resolve_name(scope, "setData").unwrap();
        assert_eq!(
            graph.binding(a).defs[0].node,
            graph.binding(b).defs[0].node
        );
    }

    #[test]
    fn test_nearest_binding_wins() {
        let (tree, graph) = bind_source(
            "const x = 1; function f() { const x = 2; x; } x;",
        );
        let uses = resolve_named(&tree, &graph, "x");
        // init reads none; the inner use and the outer use both resolve,
        // to different bindings.
        let resolved: Vec<_> = (0..tree.len())
            .map(|i| NodeId::new(i as u32))
            .filter(|&n| tree.ident_name(n) == Some("x"))
            .filter_map(|n| graph.reference_for(n))
            .filter_map(|r| graph.reference(r).resolved)
            .collect();
        assert_eq!(uses.len(), 2);
        assert_eq!(resolved.len(), 2);
        assert_ne!(resolved[0], resolved[1]);
    }

    #[test]
    fn test_forward_reference_resolves() {
        let (tree, graph) = bind_source("helper(); function helper() {}");
        let uses = resolve_named(&tree, &graph, "helper");
        assert_eq!(uses, vec![Some(DefinitionKind::Function)]);
    }

    #[test]
    fn test_ambient_global_has_no_defs() {
        let (tree, graph) = bind_source("console;");
        let node = (0..tree.len())
            .map(|i| NodeId::new(i as u32))
            .find(|&n| tree.ident_name(n) == Some("console"))
            .unwrap();
        let reference = graph.reference_for(node).unwrap();
        let binding = graph.reference(reference).resolved.unwrap();
        assert!(graph.binding(binding).defs.is_empty());
    }

    #[test]
    fn test_unknown_name_unresolved() {
        let (tree, graph) = bind_source("useEffect;");
        let node = (0..tree.len())
            .map(|i| NodeId::new(i as u32))
            .find(|&n| tree.ident_name(n) == Some("useEffect"))
            .unwrap();
        let reference = graph.reference_for(node).unwrap();
        assert!(graph.reference(reference).resolved.is_none());
    }

    #[test]
    fn test_member_property_not_a_reference() {
        let (tree, graph) = bind_source("const events = {}; events.onClose();");
        let mut close_refs = 0;
        for i in 0..tree.len() {
            let node = NodeId::new(i as u32);
            if tree.ident_name(node) == Some("onClose")
                && graph.reference_for(node).is_some()
            {
                close_refs += 1;
            }
        }
        assert_eq!(close_refs, 0);
    }

    #[test]
    fn test_object_literal_keys_not_references() {
        let (tree, graph) = bind_source("const v = 1; const o = { key: v, v };");
        // Two reads of `v`: the explicit value and the shorthand value.
        let uses = resolve_named(&tree, &graph, "v");
        assert_eq!(uses.len(), 2);
        // `key` is never a reference.
        for i in 0..tree.len() {
            let node = NodeId::new(i as u32);
            if tree.ident_name(node) == Some("key") {
                assert!(graph.reference_for(node).is_none());
            }
        }
    }

    #[test]
    fn test_arrow_body_shares_function_scope() {
        let (tree, graph) = bind_source("const f = (a) => { a; };");
        let uses = resolve_named(&tree, &graph, "a");
        assert_eq!(uses, vec![Some(DefinitionKind::Parameter)]);
    }
}
