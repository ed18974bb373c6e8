//! # gridcalc-formula
//!
//! Formula classification, parsing and evaluation for gridcalc.
//!
//! This crate provides:
//! - Formula classification (literal text, plain number or `=` expression)
//! - Expression parsing (text → AST) by recursive descent
//! - Expression evaluation (AST → [`Value`](gridcalc_core::Value)) against an
//!   [`EvaluationContext`] that resolves cell references
//! - Dependency tracking for cells that want propagated invalidation
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::Value;
//! use gridcalc_formula::{classify, EmptyContext};
//!
//! let content = classify("=1+2*3");
//! assert_eq!(content.evaluate(&mut EmptyContext), Value::Number(7.0));
//!
//! let content = classify("'123");
//! assert_eq!(content.evaluate(&mut EmptyContext), Value::text("123"));
//! ```

pub mod ast;
pub mod content;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use content::{classify, parse_number, CellContent};
pub use dependency::DependencyGraph;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EmptyContext, EvaluationContext};
pub use parser::{parse_expression, parse_formula, MAX_NESTING};
