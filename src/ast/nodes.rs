use thiserror::Error;

/// Raised when a traversal meets a tree that violates the root shape.
///
/// Every well-formed expression is a [`NodeKind::Root`] wrapping exactly
/// one child. The uniform children representation makes other shapes
/// representable, so the evaluator, the renderers, and the analyses all
/// check and refuse them instead of producing nonsense.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("expression root must have exactly one child, found {found}")]
    RootArity { found: usize },
}

/// The kind of a parse-tree node, carrying any literal payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Artificial top node produced by every successful parse.
    Root,

    // Boolean connectives
    /// Logical AND, short-circuiting
    And,
    /// Logical OR, short-circuiting
    Or,
    /// Logical NOT
    Not,

    // Comparisons
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    /// `<=`
    AtMost,
    /// `>=`
    AtLeast,

    // Arithmetic
    Plus,
    Minus,
    Mult,
    Div,
    /// Unary minus
    Negation,

    // Literals
    LitNull,
    LitBoolean(bool),
    LitInteger(i64),
    LitDouble(f64),
    /// String literal, stored exactly as written with its surrounding
    /// quote characters. Consumers unquote when they need the content.
    LitString(String),

    /// Variable reference. The identifier is stored as written, so a
    /// next-state read keeps its trailing prime (`balance'`).
    Variable(String),

    /// Function call; the children are the argument expressions.
    Function(String),
}

impl NodeKind {
    /// Surface symbol of a binary operator, `None` for anything else.
    pub fn operator_symbol(&self) -> Option<&'static str> {
        match self {
            NodeKind::And => Some("&&"),
            NodeKind::Or => Some("||"),
            NodeKind::Equal => Some("=="),
            NodeKind::NotEqual => Some("!="),
            NodeKind::LessThan => Some("<"),
            NodeKind::GreaterThan => Some(">"),
            NodeKind::AtMost => Some("<="),
            NodeKind::AtLeast => Some(">="),
            NodeKind::Plus => Some("+"),
            NodeKind::Minus => Some("-"),
            NodeKind::Mult => Some("*"),
            NodeKind::Div => Some("/"),
            _ => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.operator_symbol().is_some()
    }

    /// One of the six comparison kinds.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            NodeKind::Equal
                | NodeKind::NotEqual
                | NodeKind::LessThan
                | NodeKind::GreaterThan
                | NodeKind::AtMost
                | NodeKind::AtLeast
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::LitNull
                | NodeKind::LitBoolean(_)
                | NodeKind::LitInteger(_)
                | NodeKind::LitDouble(_)
                | NodeKind::LitString(_)
        )
    }
}

/// A node of the uniform parse tree: a kind plus ordered children.
///
/// Leaves carry their payload inside [`NodeKind`] and have no children.
/// The typed constructors assert their arity; [`Node::new`] builds any
/// shape and exists for hosts (and tests) that assemble trees by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    /// Builds a node without shape checking.
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Node {
        Node { kind, children }
    }

    pub fn leaf(kind: NodeKind) -> Node {
        debug_assert!(
            kind.is_literal() || matches!(kind, NodeKind::Variable(_)),
            "leaf constructor used for {kind:?}"
        );
        Node { kind, children: Vec::new() }
    }

    pub fn unary(kind: NodeKind, child: Node) -> Node {
        debug_assert!(
            matches!(kind, NodeKind::Not | NodeKind::Negation),
            "unary constructor used for {kind:?}"
        );
        Node { kind, children: vec![child] }
    }

    pub fn binary(kind: NodeKind, lhs: Node, rhs: Node) -> Node {
        debug_assert!(kind.is_binary(), "binary constructor used for {kind:?}");
        Node { kind, children: vec![lhs, rhs] }
    }

    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node {
            kind: NodeKind::Function(name.into()),
            children: args,
        }
    }

    pub fn root(child: Node) -> Node {
        Node {
            kind: NodeKind::Root,
            children: vec![child],
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Consumes the node, yielding its children. Combination uses this
    /// to detach a root's child before reparenting it.
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// The single child of a well-formed root.
    pub fn single_child(&self) -> Result<&Node, StructuralError> {
        match self.children.as_slice() {
            [child] => Ok(child),
            other => Err(StructuralError::RootArity { found: other.len() }),
        }
    }
}

/// Strips the surrounding quote characters of a stored string literal.
/// Text that is not quoted comes back unchanged.
pub fn unquote(raw: &str) -> &str {
    raw.strip_prefix(['"', '\''])
        .and_then(|s| s.strip_suffix(['"', '\'']))
        .unwrap_or(raw)
}
