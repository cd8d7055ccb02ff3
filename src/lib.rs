pub mod analysis;
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod datetime;
pub mod evaluator;
pub mod expression;
pub mod ident;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod provider;
pub mod value;
pub mod visit;

pub use analysis::LiteralKind;
pub use ast::{Node, NodeKind, StructuralError, Token};
pub use evaluator::{evaluate, EvalError, COMPARISON_TOLERANCE};
pub use expression::Expression;
pub use ident::{is_valid_identifier, to_valid_identifier, InvalidIdentifierError};
pub use lexer::{Lexer, LexError};
pub use parser::{Parser, ParseError};
pub use provider::{BasicMath, FunctionProvider, NoFunctions, NoVariables, VariableProvider};
pub use value::Value;
pub use visit::Visitor;
