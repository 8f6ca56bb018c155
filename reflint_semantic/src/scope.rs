//! Scope graph: scopes, bindings, definitions and references.
//!
//! The graph is built once per file by the binder and read-only
//! afterwards. Scopes form a tree (children exclusively owned by their
//! parent, in declaration order); resolution walks ancestor scopes only,
//! so lookup chains are finite and acyclic by construction.

use reflint_parser::{NodeId, SyntaxTree};
use rustc_hash::FxHashMap;

/// Index of a scope in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a binding in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

impl BindingId {
    /// The raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a reference in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(u32);

impl ReferenceId {
    /// The raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// File-level scope.
    Program,
    /// Function body scope (declarations, expressions and arrows).
    Function,
    /// Braced block scope.
    Block,
}

/// A lexical scope.
#[derive(Debug)]
pub struct Scope {
    /// Scope kind.
    pub kind: ScopeKind,
    /// The syntax node that owns this scope (program, function, arrow or
    /// block).
    pub owner: NodeId,
    /// Enclosing scope, `None` for the program scope.
    pub parent: Option<ScopeId>,
    /// Child scopes, in declaration order.
    pub children: Vec<ScopeId>,
    /// Name to binding map for names declared directly in this scope.
    pub bindings: FxHashMap<String, BindingId>,
    /// References occurring directly in this scope, in source order.
    pub references: Vec<ReferenceId>,
}

/// How a name was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Function parameter.
    Parameter,
    /// Variable declarator.
    Variable,
    /// Function declaration name.
    Function,
}

/// One declaration site of a binding.
#[derive(Debug, Clone, Copy)]
pub struct Definition {
    /// Introduction kind.
    pub kind: DefinitionKind,
    /// The declaring node: the variable declarator for variables, the
    /// function or arrow node for parameters, the declaration for
    /// function names.
    pub node: NodeId,
}

/// A declared name.
///
/// A binding with an empty `defs` list models an ambient global: it
/// resolves but carries no declaration, so every definition-based
/// classifier treats it as a negative answer.
#[derive(Debug)]
pub struct Binding {
    /// Declared name.
    pub name: String,
    /// Declaration sites. Empty for ambient globals.
    pub defs: Vec<Definition>,
    /// Every reference resolved to this binding, in source order.
    pub references: Vec<ReferenceId>,
}

/// A use of an identifier.
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    /// The identifier node (points into the syntax tree).
    pub identifier: NodeId,
    /// Scope the reference occurs in.
    pub scope: ScopeId,
    /// The binding it resolves to, if any.
    pub resolved: Option<BindingId>,
}

/// The scope graph for one file.
#[derive(Debug, Default)]
pub struct ScopeGraph {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    references: Vec<Reference>,
    /// Owner node to scope lookup.
    owner_scopes: FxHashMap<NodeId, ScopeId>,
    /// Identifier node to reference lookup.
    identifier_refs: FxHashMap<NodeId, ReferenceId>,
}

impl ScopeGraph {
    /// Get a scope.
    #[inline]
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Get a binding.
    #[inline]
    #[must_use]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    /// Get a reference.
    #[inline]
    #[must_use]
    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }

    /// The file-level scope.
    #[inline]
    #[must_use]
    pub fn program_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Number of scopes.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// The scope a node owns, if it owns one.
    #[must_use]
    pub fn owned_scope(&self, node: NodeId) -> Option<ScopeId> {
        self.owner_scopes.get(&node).copied()
    }

    /// Innermost scope enclosing `node`.
    ///
    /// The node's own scope when it owns one, otherwise the scope of the
    /// nearest scope-owning ancestor. Falls back to the program scope.
    #[must_use]
    pub fn scope_of(&self, tree: &SyntaxTree, node: NodeId) -> ScopeId {
        if let Some(scope) = self.owned_scope(node) {
            return scope;
        }
        for ancestor in tree.ancestors(node) {
            if let Some(scope) = self.owned_scope(ancestor) {
                return scope;
            }
        }
        self.program_scope()
    }

    /// Resolve an identifier node from a scope, walking ancestor scopes
    /// outward until a binding is found or the chain is exhausted.
    #[must_use]
    pub fn resolve(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        identifier: NodeId,
    ) -> Option<BindingId> {
        let name = tree.ident_name(identifier)?;
        self.resolve_name(scope, name)
    }

    /// Resolve a name from a scope by ancestor walk.
    ///
    /// Terminates because parent links strictly shorten toward the
    /// program scope.
    #[must_use]
    pub fn resolve_name(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&binding) = scope.bindings.get(name) {
                return Some(binding);
            }
            current = scope.parent;
        }
        None
    }

    /// The reference recorded for an identifier node, if any.
    #[must_use]
    pub fn reference_for(&self, identifier: NodeId) -> Option<ReferenceId> {
        self.identifier_refs.get(&identifier).copied()
    }

    // =========================================================================
    // Construction (used by the binder)
    // =========================================================================

    pub(crate) fn push_scope(
        &mut self,
        kind: ScopeKind,
        owner: NodeId,
        parent: Option<ScopeId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            owner,
            parent,
            children: Vec::new(),
            bindings: FxHashMap::default(),
            references: Vec::new(),
        });
        if let Some(parent) = parent {
            self.scopes[parent.index()].children.push(id);
        }
        self.owner_scopes.insert(owner, id);
        id
    }

    pub(crate) fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        def: Option<Definition>,
    ) -> BindingId {
        if let Some(&existing) = self.scopes[scope.index()].bindings.get(name) {
            if let Some(def) = def {
                self.bindings[existing.index()].defs.push(def);
            }
            return existing;
        }
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(Binding {
            name: name.to_string(),
            defs: def.into_iter().collect(),
            references: Vec::new(),
        });
        self.scopes[scope.index()]
            .bindings
            .insert(name.to_string(), id);
        id
    }

    pub(crate) fn record_reference(&mut self, scope: ScopeId, identifier: NodeId) -> ReferenceId {
        let id = ReferenceId(self.references.len() as u32);
        self.references.push(Reference {
            identifier,
            scope,
            resolved: None,
        });
        self.scopes[scope.index()].references.push(id);
        self.identifier_refs.insert(identifier, id);
        id
    }

    pub(crate) fn resolve_all(&mut self, tree: &SyntaxTree) {
        for i in 0..self.references.len() {
            let reference = self.references[i];
            let Some(name) = tree.ident_name(reference.identifier) else {
                continue;
            };
            if let Some(binding) = self.resolve_name(reference.scope, name) {
                self.references[i].resolved = Some(binding);
                self.bindings[binding.index()].references.push(ReferenceId(i as u32));
            }
        }
    }
}
