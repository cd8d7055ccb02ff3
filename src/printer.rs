//! Text renderers for guard trees.
//!
//! Three independent forms, all total over well-formed trees:
//!
//! - [`canonical`] is the compact, fully parenthesized form used for
//!   stable comparison and round-tripping through the parser;
//! - [`pretty`] is a one-line human form with configurable spacing;
//! - [`tree`] is a multi-line form that splits every `&&`/`||` onto
//!   three lines so the boolean skeleton of a guard stands out.
//!
//! Like every traversal, all three reject a root with more than one
//! child.

use crate::ast::{Node, NodeKind, StructuralError};
use crate::value::fmt_double;
use crate::visit::Visitor;

/// Canonical form: every binary operator fully parenthesized, no
/// whitespace. Re-parsing the result yields a tree with the same
/// canonical form.
pub fn canonical(node: &Node) -> Result<String, StructuralError> {
    CanonicalPrinter.visit(node)
}

/// One-line form with `spaces` spaces around every operator symbol.
/// Only `&&` and `||` keep their parentheses.
pub fn pretty(node: &Node, spaces: usize) -> Result<String, StructuralError> {
    PrettyPrinter { spaces }.visit(node)
}

/// Multi-line form: each `&&`/`||` prints its operands and its symbol
/// on separate lines, operands one `indent` step deeper than the
/// operator. Everything else renders inline with single spaces.
pub fn tree(node: &Node, indent: usize) -> Result<String, StructuralError> {
    TreePrinter { step: indent, level: 0 }.visit(node)
}

fn leaf_text(kind: &NodeKind) -> String {
    match kind {
        NodeKind::LitNull => "null".to_string(),
        NodeKind::LitBoolean(b) => b.to_string(),
        NodeKind::LitInteger(n) => n.to_string(),
        NodeKind::LitDouble(n) => fmt_double(*n),
        NodeKind::LitString(text) | NodeKind::Variable(text) => text.clone(),
        other => unreachable!("leaf_text on non-leaf {other:?}"),
    }
}

fn symbol(kind: &NodeKind) -> &'static str {
    kind.operator_symbol()
        .expect("BUG: binary printer reached a non-operator node")
}

struct CanonicalPrinter;

impl CanonicalPrinter {
    fn binary(&mut self, node: &Node) -> Result<String, StructuralError> {
        let lhs = self.visit(&node.children()[0])?;
        let rhs = self.visit(&node.children()[1])?;
        Ok(format!("({lhs}{}{rhs})", symbol(node.kind())))
    }

    fn leaf(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(leaf_text(node.kind()))
    }
}

impl Visitor for CanonicalPrinter {
    type Output = String;
    type Error = StructuralError;

    fn visit_and(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_or(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_not(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("!({})", self.visit(&node.children()[0])?))
    }

    fn visit_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_plus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_minus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_mult(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_div(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_negation(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("-{}", self.visit(&node.children()[0])?))
    }

    fn visit_lit_null(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_variable(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_function(&mut self, node: &Node) -> Result<String, StructuralError> {
        let NodeKind::Function(name) = node.kind() else {
            unreachable!()
        };
        let args = node
            .children()
            .iter()
            .map(|arg| self.visit(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{name}({})", args.join(",")))
    }
}

struct PrettyPrinter {
    spaces: usize,
}

impl PrettyPrinter {
    fn binary(&mut self, node: &Node) -> Result<String, StructuralError> {
        let pad = " ".repeat(self.spaces);
        let lhs = self.visit(&node.children()[0])?;
        let rhs = self.visit(&node.children()[1])?;
        Ok(format!("{lhs}{pad}{}{pad}{rhs}", symbol(node.kind())))
    }

    // && and || keep parentheses so operand grouping stays visible.
    fn boolean(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node).map(|text| format!("({text})"))
    }

    fn leaf(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(leaf_text(node.kind()))
    }
}

impl Visitor for PrettyPrinter {
    type Output = String;
    type Error = StructuralError;

    fn visit_and(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.boolean(node)
    }

    fn visit_or(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.boolean(node)
    }

    fn visit_not(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("!({})", self.visit(&node.children()[0])?))
    }

    fn visit_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_plus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_minus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_mult(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_div(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.binary(node)
    }

    fn visit_negation(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("-{}", self.visit(&node.children()[0])?))
    }

    fn visit_lit_null(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_variable(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_function(&mut self, node: &Node) -> Result<String, StructuralError> {
        let NodeKind::Function(name) = node.kind() else {
            unreachable!()
        };
        let args = node
            .children()
            .iter()
            .map(|arg| self.visit(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{name}({})", args.join(", ")))
    }
}

struct TreePrinter {
    step: usize,
    level: usize,
}

impl TreePrinter {
    /// And/Or block: operand lines one step deeper, the operator on
    /// its own line at the current level.
    fn boolean_lines(&mut self, node: &Node) -> Result<String, StructuralError> {
        let here = " ".repeat(self.level);
        let sym = symbol(node.kind());
        self.level += self.step;
        let lhs = self.operand_line(&node.children()[0]);
        let rhs = self.operand_line(&node.children()[1]);
        self.level -= self.step;
        Ok(format!("{}\n{here}{sym}\n{}", lhs?, rhs?))
    }

    /// A boolean operand: nested And/Or blocks indent themselves,
    /// anything else becomes one indented line.
    fn operand_line(&mut self, node: &Node) -> Result<String, StructuralError> {
        match node.kind() {
            NodeKind::And | NodeKind::Or => self.visit(node),
            _ => Ok(format!("{}{}", " ".repeat(self.level), self.visit(node)?)),
        }
    }

    fn inline(&mut self, node: &Node) -> Result<String, StructuralError> {
        let lhs = self.visit(&node.children()[0])?;
        let rhs = self.visit(&node.children()[1])?;
        Ok(format!("{lhs} {} {rhs}", symbol(node.kind())))
    }

    fn leaf(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(leaf_text(node.kind()))
    }
}

impl Visitor for TreePrinter {
    type Output = String;
    type Error = StructuralError;

    fn visit_and(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.boolean_lines(node)
    }

    fn visit_or(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.boolean_lines(node)
    }

    fn visit_not(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("!({})", self.visit(&node.children()[0])?))
    }

    fn visit_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_plus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_minus(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_mult(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_div(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.inline(node)
    }

    fn visit_negation(&mut self, node: &Node) -> Result<String, StructuralError> {
        Ok(format!("-{}", self.visit(&node.children()[0])?))
    }

    fn visit_lit_null(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_variable(&mut self, node: &Node) -> Result<String, StructuralError> {
        self.leaf(node)
    }

    fn visit_function(&mut self, node: &Node) -> Result<String, StructuralError> {
        let NodeKind::Function(name) = node.kind() else {
            unreachable!()
        };
        let args = node
            .children()
            .iter()
            .map(|arg| self.visit(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{name}({})", args.join(",")))
    }
}

#[test]
fn test_canonical_binary_and_leaves() {
    let node = Node::binary(
        NodeKind::And,
        Node::binary(
            NodeKind::LessThan,
            Node::leaf(NodeKind::Variable("x".to_string())),
            Node::leaf(NodeKind::LitDouble(1.0)),
        ),
        Node::leaf(NodeKind::LitBoolean(true)),
    );
    assert_eq!(canonical(&node).unwrap(), "((x<1.0)&&true)");
}

#[test]
fn test_canonical_function_and_not() {
    let node = Node::unary(
        NodeKind::Not,
        Node::function(
            "min",
            vec![
                Node::leaf(NodeKind::Variable("a".to_string())),
                Node::leaf(NodeKind::LitInteger(2)),
            ],
        ),
    );
    assert_eq!(canonical(&node).unwrap(), "!(min(a,2))");
}

#[test]
fn test_pretty_spacing() {
    let node = Node::root(Node::binary(
        NodeKind::And,
        Node::binary(
            NodeKind::Equal,
            Node::leaf(NodeKind::Variable("x".to_string())),
            Node::leaf(NodeKind::LitInteger(1)),
        ),
        Node::binary(
            NodeKind::GreaterThan,
            Node::leaf(NodeKind::Variable("y".to_string())),
            Node::leaf(NodeKind::LitInteger(2)),
        ),
    ));
    assert_eq!(pretty(&node, 1).unwrap(), "(x == 1 && y > 2)");
    assert_eq!(pretty(&node, 0).unwrap(), "(x==1&&y>2)");
}

#[test]
fn test_tree_layout() {
    let node = Node::root(Node::binary(
        NodeKind::And,
        Node::binary(
            NodeKind::LessThan,
            Node::leaf(NodeKind::Variable("x".to_string())),
            Node::leaf(NodeKind::LitInteger(1)),
        ),
        Node::binary(
            NodeKind::Or,
            Node::leaf(NodeKind::Variable("y".to_string())),
            Node::leaf(NodeKind::Variable("z".to_string())),
        ),
    ));
    let expected = "  x < 1\n&&\n    y\n  ||\n    z";
    assert_eq!(tree(&node, 2).unwrap(), expected);
}

#[test]
fn test_renderers_reject_multi_child_root() {
    let bad = Node::new(
        NodeKind::Root,
        vec![
            Node::leaf(NodeKind::LitInteger(1)),
            Node::leaf(NodeKind::LitInteger(2)),
        ],
    );
    assert!(matches!(
        canonical(&bad),
        Err(StructuralError::RootArity { found: 2 })
    ));
    assert!(pretty(&bad, 1).is_err());
    assert!(tree(&bad, 2).is_err());
}
