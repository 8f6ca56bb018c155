//! Arena-based syntax tree for the analyzed JavaScript subset.
//!
//! Nodes live in a flat arena owned by [`SyntaxTree`] and are addressed by
//! [`NodeId`]. Each node carries a closed [`NodeKind`] tag, a source span,
//! and a parent link. Children are owned through the arena (the id graph
//! is acyclic); parent links are navigation only and are maintained by the
//! arena when a node is allocated. Once parsing finishes the tree is never
//! mutated.

use reflint_core::Span;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declaration keyword of a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `const`
    Const,
    /// `let`
    Let,
    /// `var`
    Var,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!x`
    Not,
    /// `-x`
    Neg,
}

/// Binary and logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Node kinds.
///
/// A closed enumeration of the syntactic shapes the analyzer reasons
/// about; matching is exhaustive so a new shape forces every classifier
/// to take a position on it.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Whole file.
    Program {
        /// Top-level statements.
        body: Vec<NodeId>,
    },

    // === Statements ===
    /// `const`/`let`/`var` statement.
    VarDecl {
        /// Declaration keyword.
        kind: DeclKind,
        /// Declarators, in source order.
        declarators: Vec<NodeId>,
    },
    /// One `pattern = init` unit of a variable statement.
    VarDeclarator {
        /// Bound pattern (identifier, array or object pattern).
        pattern: NodeId,
        /// Initializer expression.
        init: Option<NodeId>,
    },
    /// `function Name(params) { ... }`
    FunctionDecl {
        /// Function name identifier.
        name: NodeId,
        /// Parameter patterns.
        params: Vec<NodeId>,
        /// Body block.
        body: NodeId,
    },
    /// `{ ... }` statement block.
    Block {
        /// Statements.
        body: Vec<NodeId>,
    },
    /// Expression statement.
    ExprStmt {
        /// Inner expression.
        expr: NodeId,
    },
    /// `return expr?;`
    Return {
        /// Returned expression.
        argument: Option<NodeId>,
    },
    /// `if (test) consequent else alternate?`
    If {
        /// Condition.
        test: NodeId,
        /// Then branch.
        consequent: NodeId,
        /// Else branch.
        alternate: Option<NodeId>,
    },

    // === Patterns ===
    /// `[a, b]` destructuring pattern.
    ArrayPattern {
        /// Element patterns.
        elements: Vec<NodeId>,
    },
    /// `{ a, b: c }` destructuring pattern.
    ObjectPattern {
        /// Property patterns.
        properties: Vec<NodeId>,
    },

    // === Expressions ===
    /// Identifier.
    Ident {
        /// Identifier text.
        name: String,
    },
    /// `callee(args)`
    Call {
        /// Call target expression.
        callee: NodeId,
        /// Arguments, in source order.
        arguments: Vec<NodeId>,
    },
    /// `object.property` or `object[property]`
    Member {
        /// Base object.
        object: NodeId,
        /// Property (identifier when not computed).
        property: NodeId,
        /// Whether bracket syntax is used.
        computed: bool,
    },
    /// `(params) => body`
    ArrowFunction {
        /// Parameter patterns.
        params: Vec<NodeId>,
        /// Block or expression body.
        body: NodeId,
    },
    /// `function name?(params) { ... }` in expression position.
    FunctionExpr {
        /// Optional name identifier.
        name: Option<NodeId>,
        /// Parameter patterns.
        params: Vec<NodeId>,
        /// Body block.
        body: NodeId,
    },
    /// `[a, b, c]`
    ArrayLit {
        /// Elements, in source order.
        elements: Vec<NodeId>,
    },
    /// `{ key: value, shorthand }`
    ObjectLit {
        /// Properties.
        properties: Vec<NodeId>,
    },
    /// A single `key: value` entry of an object literal or pattern.
    Property {
        /// Key identifier.
        key: NodeId,
        /// Value expression or pattern.
        value: NodeId,
        /// Whether key and value are the same identifier.
        shorthand: bool,
    },
    /// `target = value`
    Assign {
        /// Assignment target.
        target: NodeId,
        /// Assigned value.
        value: NodeId,
    },
    /// Unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        argument: NodeId,
    },
    /// Binary or logical operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// `test ? consequent : alternate`
    Conditional {
        /// Condition.
        test: NodeId,
        /// Value when true.
        consequent: NodeId,
        /// Value when false.
        alternate: NodeId,
    },

    // === Literals ===
    /// String literal.
    StringLit(String),
    /// Number literal.
    NumberLit(f64),
    /// Boolean literal.
    BoolLit(bool),
    /// `null`
    NullLit,
}

impl NodeKind {
    /// Child node ids in source order.
    ///
    /// This is the single point of truth for tree shape: traversal,
    /// parent-link maintenance and structural comparison all go through
    /// it.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Program { body } | Self::Block { body } => body.clone(),
            Self::VarDecl { declarators, .. } => declarators.clone(),
            Self::VarDeclarator { pattern, init } => {
                let mut out = vec![*pattern];
                out.extend(init.iter().copied());
                out
            }
            Self::FunctionDecl { name, params, body } => {
                let mut out = vec![*name];
                out.extend(params.iter().copied());
                out.push(*body);
                out
            }
            Self::ExprStmt { expr } => vec![*expr],
            Self::Return { argument } => argument.iter().copied().collect(),
            Self::If {
                test,
                consequent,
                alternate,
            } => {
                let mut out = vec![*test, *consequent];
                out.extend(alternate.iter().copied());
                out
            }
            Self::ArrayPattern { elements } | Self::ArrayLit { elements } => elements.clone(),
            Self::ObjectPattern { properties } | Self::ObjectLit { properties } => {
                properties.clone()
            }
            Self::Ident { .. }
            | Self::StringLit(_)
            | Self::NumberLit(_)
            | Self::BoolLit(_)
            | Self::NullLit => Vec::new(),
            Self::Call { callee, arguments } => {
                let mut out = vec![*callee];
                out.extend(arguments.iter().copied());
                out
            }
            Self::Member {
                object, property, ..
            } => vec![*object, *property],
            Self::ArrowFunction { params, body } => {
                let mut out = params.clone();
                out.push(*body);
                out
            }
            Self::FunctionExpr { name, params, body } => {
                let mut out: Vec<NodeId> = name.iter().copied().collect();
                out.extend(params.iter().copied());
                out.push(*body);
                out
            }
            Self::Property { key, value, .. } => vec![*key, *value],
            Self::Assign { target, value } => vec![*target, *value],
            Self::Unary { argument, .. } => vec![*argument],
            Self::Binary { left, right, .. } => vec![*left, *right],
            Self::Conditional {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
        }
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Shape tag and children.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Enclosing node, `None` for the program root.
    pub parent: Option<NodeId>,
}

/// The arena: owns every node of one parsed file.
#[derive(Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and record it as the parent of its children.
    ///
    /// Children must already be allocated; the parser builds bottom-up so
    /// this holds by construction.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        for child in kind.children() {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    /// Mark the program root.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    /// The program root. Panics only on an unfinished tree, which the
    /// parser never exposes.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root.unwrap_or(NodeId::new(0))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Get a node's span.
    #[inline]
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Get a node's parent.
    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Identifier text, when the node is an identifier.
    #[must_use]
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Ident { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Walk ancestors from `id` upward (excluding `id` itself).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }
}
