//! Analysis passes over guard trees.
//!
//! Read-only visitors answering questions a model checker or editor
//! asks about a guard: which variables it reads, which literal values
//! it mentions, and how many comparisons it contains. Variables and
//! literals appearing as *direct* function arguments are skipped (a
//! bare variable argument is a by-name token, and literal arguments
//! belong to the call, not the guard's value domain); anything nested
//! deeper inside an argument expression still counts.

use std::collections::HashSet;

use crate::ast::{Node, NodeKind, StructuralError, unquote};
use crate::value::fmt_double;
use crate::visit::Visitor;

/// Every variable identifier in the tree, exactly as written (primes
/// kept), excluding direct function arguments.
pub fn variables(node: &Node) -> Result<HashSet<String>, StructuralError> {
    let mut collector = VariableCollector {
        names: HashSet::new(),
    };
    collector.visit(node)?;
    Ok(collector.names)
}

/// Current-state variable names: the unprimed subset of [`variables`].
pub fn normal_variables(node: &Node) -> Result<HashSet<String>, StructuralError> {
    Ok(variables(node)?
        .into_iter()
        .filter(|name| !name.ends_with('\''))
        .collect())
}

/// Next-state variable names, reported with the prime stripped.
pub fn prime_variables(node: &Node) -> Result<HashSet<String>, StructuralError> {
    Ok(variables(node)?
        .into_iter()
        .filter_map(|name| name.strip_suffix('\'').map(str::to_string))
        .collect())
}

struct VariableCollector {
    names: HashSet<String>,
}

impl Visitor for VariableCollector {
    type Output = ();
    type Error = StructuralError;

    fn visit_variable(&mut self, node: &Node) -> Result<(), StructuralError> {
        if let NodeKind::Variable(name) = node.kind() {
            self.names.insert(name.clone());
        }
        Ok(())
    }

    fn visit_function(&mut self, node: &Node) -> Result<(), StructuralError> {
        for arg in node.children() {
            if !matches!(arg.kind(), NodeKind::Variable(_)) {
                self.visit(arg)?;
            }
        }
        Ok(())
    }
}

/// The literal families a collection pass can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Boolean,
    Integer,
    Double,
    String,
}

/// Distinct literal texts of one kind, excluding direct function
/// arguments. String literals are unquoted; doubles keep a decimal
/// point so the text re-parses as a double.
pub fn literal_values(node: &Node, kind: LiteralKind) -> Result<HashSet<String>, StructuralError> {
    let mut collector = LiteralCollector {
        requested: kind,
        texts: HashSet::new(),
    };
    collector.visit(node)?;
    Ok(collector.texts)
}

struct LiteralCollector {
    requested: LiteralKind,
    texts: HashSet<String>,
}

impl LiteralCollector {
    fn collect(&mut self, node: &Node) {
        match (self.requested, node.kind()) {
            (LiteralKind::Boolean, NodeKind::LitBoolean(b)) => {
                self.texts.insert(b.to_string());
            }
            (LiteralKind::Integer, NodeKind::LitInteger(n)) => {
                self.texts.insert(n.to_string());
            }
            (LiteralKind::Double, NodeKind::LitDouble(n)) => {
                self.texts.insert(fmt_double(*n));
            }
            (LiteralKind::String, NodeKind::LitString(raw)) => {
                self.texts.insert(unquote(raw).to_string());
            }
            _ => {}
        }
    }
}

impl Visitor for LiteralCollector {
    type Output = ();
    type Error = StructuralError;

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.collect(node);
        Ok(())
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.collect(node);
        Ok(())
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.collect(node);
        Ok(())
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.collect(node);
        Ok(())
    }

    fn visit_function(&mut self, node: &Node) -> Result<(), StructuralError> {
        for arg in node.children() {
            if !arg.kind().is_literal() {
                self.visit(arg)?;
            }
        }
        Ok(())
    }
}

/// Number of comparison operators anywhere in the tree, nested uses
/// (inside function arguments or parenthesized operands) included.
/// A rough complexity metric for a guard.
pub fn count_comparison_atoms(node: &Node) -> Result<usize, StructuralError> {
    let mut counter = AtomCounter { count: 0 };
    counter.visit(node)?;
    Ok(counter.count)
}

struct AtomCounter {
    count: usize,
}

impl AtomCounter {
    fn counted(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.count += 1;
        self.visit_children(node)
    }
}

impl Visitor for AtomCounter {
    type Output = ();
    type Error = StructuralError;

    fn visit_equal(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<(), StructuralError> {
        self.counted(node)
    }
}

#[cfg(test)]
fn parse(text: &str) -> Node {
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    Parser::new(Lexer::new(text)).unwrap().parse().unwrap()
}

#[cfg(test)]
fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_variable_views() {
    let node = parse("x' == y && z > 1");
    assert_eq!(variables(&node).unwrap(), set(&["x'", "y", "z"]));
    assert_eq!(normal_variables(&node).unwrap(), set(&["y", "z"]));
    assert_eq!(prime_variables(&node).unwrap(), set(&["x"]));
}

#[test]
fn test_direct_function_arguments_are_not_reads() {
    let node = parse("f(x, y + 1) > g(z)");
    assert_eq!(variables(&node).unwrap(), set(&["y"]));
}

#[test]
fn test_literal_collection() {
    let node = parse("x == 'a' || x == \"b\" && n > 1");
    assert_eq!(
        literal_values(&node, LiteralKind::String).unwrap(),
        set(&["a", "b"])
    );
    assert_eq!(
        literal_values(&node, LiteralKind::Integer).unwrap(),
        set(&["1"])
    );
    assert!(literal_values(&node, LiteralKind::Double).unwrap().is_empty());
}

#[test]
fn test_literal_collection_skips_direct_arguments() {
    let node = parse("max(1, x) > 2 && max(1.5, 0.5 + 0.25) < 9");
    assert_eq!(
        literal_values(&node, LiteralKind::Integer).unwrap(),
        set(&["2", "9"])
    );
    // 1.5 is a direct argument; the operands of 0.5 + 0.25 are not.
    assert_eq!(
        literal_values(&node, LiteralKind::Double).unwrap(),
        set(&["0.5", "0.25"])
    );
}

#[test]
fn test_double_literals_keep_decimal_point() {
    let node = parse("x == 2.0");
    assert_eq!(
        literal_values(&node, LiteralKind::Double).unwrap(),
        set(&["2.0"])
    );
}

#[test]
fn test_atom_count() {
    assert_eq!(count_comparison_atoms(&parse("x > 1")).unwrap(), 1);
    assert_eq!(
        count_comparison_atoms(&parse("x > 1 && y <= 2 || z != null")).unwrap(),
        3
    );
    assert_eq!(count_comparison_atoms(&parse("f(1 < 2) == 3")).unwrap(), 2);
    assert_eq!(count_comparison_atoms(&parse("1 + 2")).unwrap(), 0);
}

#[test]
fn test_analyses_reject_multi_child_root() {
    let bad = Node::new(
        NodeKind::Root,
        vec![
            Node::leaf(NodeKind::Variable("a".to_string())),
            Node::leaf(NodeKind::Variable("b".to_string())),
        ],
    );
    assert!(variables(&bad).is_err());
    assert!(literal_values(&bad, LiteralKind::Integer).is_err());
    assert!(count_comparison_atoms(&bad).is_err());
}
