//! # Guard Expression Language - Abstract Syntax Tree
//!
//! This module defines the parse tree for the guard expression language,
//! a typed boolean/arithmetic language used to annotate transitions of
//! data-aware process models.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[nodes]** - The uniform parse-tree node and its kinds
//!
//! ## Tree Shape
//!
//! Every successful parse produces an artificial `Root` node wrapping
//! exactly one child, so host code can hold a uniform handle regardless
//! of what was parsed:
//!
//! ```text
//! Root
//! └── And
//!     ├── Equal
//!     │   ├── Variable("x'")
//!     │   └── Variable("y")
//!     └── GreaterThan
//!         ├── Variable("z")
//!         └── LitInteger(1)
//! ```
//!
//! Nodes are deliberately untyped at the tree level: a node is a kind
//! plus ordered children. Shape violations that matter (a root with
//! more or fewer than one child) are caught by every traversal; the
//! rest are programming errors guarded by debug assertions in the
//! typed constructors.
//!
//! ## Core Concepts
//!
//! ### Primed Variables
//!
//! An identifier may end in a single prime (`balance'`), marking a read
//! of the variable's next-state value. The prime is purely a naming
//! convention: it stays part of the identifier through lexing,
//! evaluation, and printing, and only the variable collectors ever
//! strip it.
//!
//! ### Literals Stay as Written
//!
//! String literals keep their surrounding quotes in the tree, so the
//! canonical renderer can reproduce the source exactly and consumers
//! unquote on demand.
//!
//! ## Examples
//!
//! ### A typical guard
//!
//! ```text
//! (amount > 1000 && approved == true) || override'
//! ```
//!
//! ### Function calls
//!
//! ```text
//! max(amount, limit) <= budget
//! ```
pub mod nodes;
pub mod tokens;

pub use nodes::{unquote, Node, NodeKind, StructuralError};
pub use tokens::Token;
