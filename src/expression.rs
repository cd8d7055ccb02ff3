//! The public guard handle.
//!
//! [`Expression`] wraps a validated parse tree and exposes every
//! operation a host needs: evaluation against variable and function
//! providers, the three renderers, the analysis passes, and
//! combination into larger guards. An `Expression` is immutable after
//! construction; [`Expression::and`] and [`Expression::or`] consume
//! their operands because they detach and reparent the operand
//! subtrees instead of copying them.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::analysis::{self, LiteralKind};
use crate::ast::{Node, NodeKind, StructuralError};
use crate::evaluator::{self, EvalError};
use crate::lexer::Lexer;
use crate::parser::{ParseError, Parser};
use crate::printer;
use crate::provider::{FunctionProvider, NoFunctions, NoVariables, VariableProvider};
use crate::value::Value;

static TRUE_INSTANCE: LazyLock<Expression> =
    LazyLock::new(|| Expression::parse("true").expect("BUG: failed to parse 'true'"));
static FALSE_INSTANCE: LazyLock<Expression> =
    LazyLock::new(|| Expression::parse("false").expect("BUG: failed to parse 'false'"));

/// A parsed guard over some set of variables.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use guard_lang::{Expression, Value};
///
/// let guard: Expression = "amount > 100 && status == 'open'".parse()?;
///
/// let mut bindings = HashMap::new();
/// bindings.insert("amount".to_string(), Value::Integer(250));
/// bindings.insert("status".to_string(), Value::from("open"));
///
/// assert!(guard.is_true_with(&bindings)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Node,
}

impl Expression {
    /// Parses a guard from source text.
    pub fn parse(text: &str) -> Result<Expression, ParseError> {
        log::trace!("parsing guard {text:?}");
        let root = Parser::new(Lexer::new(text))?.parse()?;
        Ok(Expression { root })
    }

    /// Wraps an already-built tree. A `Root` node is validated for the
    /// single-child shape; any other node becomes the child of a fresh
    /// root.
    pub fn new(node: Node) -> Result<Expression, StructuralError> {
        let root = match node.kind() {
            NodeKind::Root => {
                node.single_child()?;
                node
            }
            _ => Node::root(node),
        };
        Ok(Expression { root })
    }

    /// The underlying tree, for custom [`crate::visit::Visitor`]
    /// passes.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The process-wide constant `true` guard. Clone it before
    /// combining.
    pub fn always_true() -> &'static Expression {
        &TRUE_INSTANCE
    }

    /// The process-wide constant `false` guard.
    pub fn always_false() -> &'static Expression {
        &FALSE_INSTANCE
    }

    pub fn evaluate(
        &self,
        variables: &dyn VariableProvider,
        functions: &dyn FunctionProvider,
    ) -> Result<Value, EvalError> {
        evaluator::evaluate(&self.root, variables, functions)
    }

    /// Evaluates without a function namespace. A `HashMap<String,
    /// Value>` works directly as the variable provider.
    pub fn evaluate_with(&self, variables: &dyn VariableProvider) -> Result<Value, EvalError> {
        self.evaluate(variables, &NoFunctions)
    }

    /// Evaluates and requires a boolean result.
    pub fn is_true(
        &self,
        variables: &dyn VariableProvider,
        functions: &dyn FunctionProvider,
    ) -> Result<bool, EvalError> {
        match self.evaluate(variables, functions)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::BooleanValueRequired {
                op: "guard",
                operands: other.to_string(),
            }),
        }
    }

    pub fn is_true_with(&self, variables: &dyn VariableProvider) -> Result<bool, EvalError> {
        self.is_true(variables, &NoFunctions)
    }

    /// `is_false` is the complement of [`Expression::is_true`], so a
    /// non-boolean guard is an error here too, not `false`.
    pub fn is_false(
        &self,
        variables: &dyn VariableProvider,
        functions: &dyn FunctionProvider,
    ) -> Result<bool, EvalError> {
        self.is_true(variables, functions).map(|b| !b)
    }

    pub fn is_false_with(&self, variables: &dyn VariableProvider) -> Result<bool, EvalError> {
        self.is_false(variables, &NoFunctions)
    }

    /// Whether the guard is provably true without any bindings. A
    /// guard reading any variable, current- or next-state, yields
    /// `Ok(false)` without evaluating.
    pub fn is_constant_true(&self) -> Result<bool, EvalError> {
        if !self.variables().is_empty() {
            return Ok(false);
        }
        self.is_true(&NoVariables, &NoFunctions)
    }

    pub fn is_constant_false(&self) -> Result<bool, EvalError> {
        if !self.variables().is_empty() {
            return Ok(false);
        }
        self.is_false(&NoVariables, &NoFunctions)
    }

    /// Structural conjunction. Consumes both operands: their root
    /// children are detached and reparented under the new `&&` node,
    /// which is what makes reuse of a combined operand impossible by
    /// construction.
    pub fn and(self, rhs: Expression) -> Expression {
        Expression::combine(NodeKind::And, self, rhs)
    }

    /// Structural disjunction; see [`Expression::and`].
    pub fn or(self, rhs: Expression) -> Expression {
        Expression::combine(NodeKind::Or, self, rhs)
    }

    /// Textual negation: re-parses `!(<canonical form>)`. Unlike
    /// [`Expression::and`] this borrows its operand, at the price of a
    /// round trip through the parser.
    pub fn not(&self) -> Result<Expression, ParseError> {
        Expression::parse(&format!("!({})", self.canonical()))
    }

    fn combine(kind: NodeKind, lhs: Expression, rhs: Expression) -> Expression {
        Expression {
            root: Node::root(Node::binary(kind, lhs.detach(), rhs.detach())),
        }
    }

    fn detach(self) -> Node {
        self.root
            .into_children()
            .into_iter()
            .next()
            .expect("BUG: validated expression root lost its child")
    }

    /// All variable identifiers as written, primes kept. Direct
    /// function arguments do not count as variable reads.
    pub fn variables(&self) -> HashSet<String> {
        self.traverse(analysis::variables(&self.root))
    }

    /// Current-state (unprimed) variable names.
    pub fn normal_variables(&self) -> HashSet<String> {
        self.traverse(analysis::normal_variables(&self.root))
    }

    /// Next-state variable names, primes stripped.
    pub fn prime_variables(&self) -> HashSet<String> {
        self.traverse(analysis::prime_variables(&self.root))
    }

    /// Distinct literal texts of the given kind.
    pub fn literal_values(&self, kind: LiteralKind) -> HashSet<String> {
        self.traverse(analysis::literal_values(&self.root, kind))
    }

    /// Number of comparison operators in the guard.
    pub fn atom_count(&self) -> usize {
        self.traverse(analysis::count_comparison_atoms(&self.root))
    }

    /// Batch-checks that every referenced base name is declared.
    /// Primed reads check against their unprimed base name. The
    /// complete missing set is reported in a single error.
    pub fn check_variables(&self, declared: &HashSet<String>) -> Result<(), EvalError> {
        let mut missing: BTreeSet<String> = BTreeSet::new();
        missing.extend(
            self.normal_variables()
                .into_iter()
                .chain(self.prime_variables())
                .filter(|name| !declared.contains(name)),
        );
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EvalError::MissingVariables(missing))
        }
    }

    /// Compact, fully parenthesized form; stable under re-parsing.
    pub fn canonical(&self) -> String {
        self.traverse(printer::canonical(&self.root))
    }

    /// One-line form with `spaces` spaces around operators.
    pub fn pretty(&self, spaces: usize) -> String {
        self.traverse(printer::pretty(&self.root, spaces))
    }

    /// Multi-line form exposing the `&&`/`||` skeleton.
    pub fn tree(&self, indent: usize) -> String {
        self.traverse(printer::tree(&self.root, indent))
    }

    // The root shape is validated at construction, so traversals over
    // it cannot fail structurally.
    fn traverse<T>(&self, result: Result<T, StructuralError>) -> T {
        result.expect("BUG: traversal failed on a validated expression")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Expression::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_constant() {
        assert_eq!(Expression::always_true().is_constant_true(), Ok(true));
        assert_eq!(Expression::always_true().is_constant_false(), Ok(false));
        assert_eq!(Expression::always_false().is_constant_false(), Ok(true));
    }

    #[test]
    fn combination_matches_parsed_form() {
        let lhs = Expression::parse("x > 1").unwrap();
        let rhs = Expression::parse("y < 2").unwrap();
        let combined = lhs.and(rhs);
        let parsed = Expression::parse("(x>1)&&(y<2)").unwrap();
        assert_eq!(combined.canonical(), parsed.canonical());
        assert_eq!(combined, parsed);
    }

    #[test]
    fn not_round_trips_through_parser() {
        let guard = Expression::parse("x > 1 && y < 2").unwrap();
        let negated = guard.not().unwrap();
        assert_eq!(negated.canonical(), "!(((x>1)&&(y<2)))");
        // The original is still usable afterwards.
        assert_eq!(guard.canonical(), "((x>1)&&(y<2))");
    }

    #[test]
    fn new_validates_root_shape() {
        let bad = Node::new(
            NodeKind::Root,
            vec![
                Node::leaf(NodeKind::LitBoolean(true)),
                Node::leaf(NodeKind::LitBoolean(false)),
            ],
        );
        assert!(matches!(
            Expression::new(bad),
            Err(StructuralError::RootArity { found: 2 })
        ));

        let wrapped = Expression::new(Node::leaf(NodeKind::LitInteger(7))).unwrap();
        assert_eq!(wrapped.canonical(), "7");
    }
}
