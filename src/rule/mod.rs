//! Rule parsing, combination and evaluation
//!
//! This module turns rule strings like "age > 30 AND department == 'Sales'"
//! into an AST and evaluates it against a [`Record`](crate::record::Record).

mod ast;
pub mod cache;
mod combiner;
mod condition;
mod evaluator;
pub mod parser;


pub use ast::*;
pub use cache::*;
pub use combiner::*;
pub use condition::*;
pub use evaluator::*;
pub use parser::*;
