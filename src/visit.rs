//! Visitor dispatch over the parse tree.
//!
//! Every traversal in the crate (evaluation, rendering, analysis) is a
//! [`Visitor`]: one method per node kind, dispatched by an exhaustive
//! match on the kind. Default method bodies recurse depth-first through
//! the children and produce `Output::default()`, so a concrete visitor
//! only overrides the kinds it cares about.
//!
//! The default [`Visitor::visit_root`] enforces the one-child root
//! shape, which means every visitor rejects malformed roots without
//! writing any code for it.

use crate::ast::{Node, NodeKind, StructuralError};

pub trait Visitor {
    /// Result of visiting a subtree. `Default` supplies the value for
    /// the pure-traversal case where a visitor only accumulates state.
    type Output: Default;

    /// Failure type; must absorb structural violations so the root
    /// check can fail through any visitor.
    type Error: From<StructuralError>;

    /// Dispatches on the node kind.
    fn visit(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        match node.kind() {
            NodeKind::Root => self.visit_root(node),
            NodeKind::And => self.visit_and(node),
            NodeKind::Or => self.visit_or(node),
            NodeKind::Not => self.visit_not(node),
            NodeKind::Equal => self.visit_equal(node),
            NodeKind::NotEqual => self.visit_not_equal(node),
            NodeKind::LessThan => self.visit_less_than(node),
            NodeKind::GreaterThan => self.visit_greater_than(node),
            NodeKind::AtMost => self.visit_at_most(node),
            NodeKind::AtLeast => self.visit_at_least(node),
            NodeKind::Plus => self.visit_plus(node),
            NodeKind::Minus => self.visit_minus(node),
            NodeKind::Mult => self.visit_mult(node),
            NodeKind::Div => self.visit_div(node),
            NodeKind::Negation => self.visit_negation(node),
            NodeKind::LitNull => self.visit_lit_null(node),
            NodeKind::LitBoolean(_) => self.visit_lit_boolean(node),
            NodeKind::LitInteger(_) => self.visit_lit_integer(node),
            NodeKind::LitDouble(_) => self.visit_lit_double(node),
            NodeKind::LitString(_) => self.visit_lit_string(node),
            NodeKind::Variable(_) => self.visit_variable(node),
            NodeKind::Function(_) => self.visit_function(node),
        }
    }

    /// Visits all children in order, discarding their outputs.
    fn visit_children(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        for child in node.children() {
            self.visit(child)?;
        }
        Ok(Self::Output::default())
    }

    /// Validates the one-child shape, then delegates to the child.
    fn visit_root(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        let child = node.single_child()?;
        self.visit(child)
    }

    fn visit_and(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_or(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_not(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_equal(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_plus(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_minus(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_mult(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_div(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_negation(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_lit_null(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_variable(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }

    fn visit_function(&mut self, node: &Node) -> Result<Self::Output, Self::Error> {
        self.visit_children(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeKind};

    struct LeafCounter {
        leaves: usize,
    }

    impl Visitor for LeafCounter {
        type Output = ();
        type Error = StructuralError;

        fn visit_lit_integer(&mut self, _node: &Node) -> Result<(), StructuralError> {
            self.leaves += 1;
            Ok(())
        }

        fn visit_variable(&mut self, _node: &Node) -> Result<(), StructuralError> {
            self.leaves += 1;
            Ok(())
        }
    }

    #[test]
    fn default_traversal_reaches_leaves() {
        let tree = Node::root(Node::binary(
            NodeKind::Plus,
            Node::leaf(NodeKind::Variable("x".to_string())),
            Node::binary(
                NodeKind::Mult,
                Node::leaf(NodeKind::LitInteger(2)),
                Node::leaf(NodeKind::LitInteger(3)),
            ),
        ));
        let mut counter = LeafCounter { leaves: 0 };
        counter.visit(&tree).unwrap();
        assert_eq!(counter.leaves, 3);
    }

    #[test]
    fn multi_child_root_is_rejected() {
        let bad = Node::new(
            NodeKind::Root,
            vec![
                Node::leaf(NodeKind::LitInteger(1)),
                Node::leaf(NodeKind::LitInteger(2)),
            ],
        );
        let mut counter = LeafCounter { leaves: 0 };
        let err = counter.visit(&bad).unwrap_err();
        assert_eq!(err, StructuralError::RootArity { found: 2 });
    }
}
