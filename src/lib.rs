//! Rule AST Core - a small rule-expression engine
//!
//! Parses rule strings such as `age > 30 AND department == 'Sales'` into an
//! AST of AND/OR operators over leaf comparisons, combines several rules into
//! one tree, and evaluates trees against a [`Record`] of field values.
//!
//! ```
//! use rule_ast_core::{combine, parse, LogicalOp, Record};
//!
//! let record = Record::new()
//!     .with("age", 35)
//!     .with("department", "Sales")
//!     .with("salary", 60000)
//!     .with("experience", 3);
//!
//! let rule = parse("age > 30 AND department == 'Sales'");
//! assert!(rule.evaluate(&record).unwrap());
//!
//! let combined = combine(
//!     ["age > 30 AND department == 'Sales'", "salary > 50000 OR experience > 5"],
//!     LogicalOp::And,
//! )
//! .unwrap();
//! assert!(combined.evaluate(&record).unwrap());
//! ```
//!
//! Python bindings via PyO3 are available behind the `python` feature.

pub mod config;
pub mod error;
pub mod record;
pub mod rule;

#[cfg(feature = "python")]
mod python;

pub use config::RuleSet;
pub use error::{Result, RuleError};
pub use record::{FieldValue, Record};
pub use rule::{
    combine, evaluate, evaluate_combined, parse, ComparisonOp, Condition, LogicalOp, RuleNode,
};
