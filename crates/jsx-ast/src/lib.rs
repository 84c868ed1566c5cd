//! JavaScript/JSX syntax tree for vue-jsx-rs.
//!
//! This crate provides the tree the transforms operate on:
//! - Closed AST types for statements, expressions, patterns and JSX nodes
//! - A read-only visitor
//! - A lexical scope stack and a collision-free uid generator
//! - A deterministic printer
//!
//! # Example
//!
//! ```
//! use jsx_ast::{print_program, Expr, Program, Stmt};
//!
//! let program = Program::module(vec![Stmt::expr(Expr::call(
//!     Expr::ident("render"),
//!     vec![Expr::str("app")],
//! ))]);
//! assert_eq!(print_program(&program), "render(\"app\");\n");
//! ```

mod ast;
mod printer;
mod scope;
mod span;
pub mod visit;

pub use ast::*;
pub use printer::{print_expr, print_program, print_stmt, Printer};
pub use scope::{to_identifier, ScopeStack, UidGenerator};
pub use span::{ByteOffset, Span};
