//! Declarative rule sets
//!
//! A host can describe a combination of rules as data, e.g.
//! `{"rules": ["age > 30", "salary > 50000"], "operator": "OR"}`,
//! instead of calling the combiner by hand.

use crate::error::Result;
use crate::record::Record;
use crate::rule::{combine, evaluate_combined, LogicalOp, RuleNode};
use serde::{Deserialize, Serialize};

/// A list of rule strings and the operator that joins them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<String>,
    /// Defaults to AND when omitted
    #[serde(default)]
    pub operator: LogicalOp,
}

impl RuleSet {
    pub fn new<I, S>(rules: I, operator: LogicalOp) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            operator,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Combined tree, or `None` when the set is empty
    pub fn build(&self) -> Option<RuleNode> {
        combine(&self.rules, self.operator)
    }

    pub fn evaluate(&self, record: &Record) -> Result<bool> {
        evaluate_combined(self.build().as_ref(), record)
    }
}
