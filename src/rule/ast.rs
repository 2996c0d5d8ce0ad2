//! Abstract Syntax Tree for rule expressions

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AST node for rule expressions
///
/// Children are exclusively owned, so a tree never shares structure and is
/// never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuleNode {
    /// Raw condition text like "age > 30", split into its parts only when evaluated
    Operand { value: String },
    /// AND/OR over two subtrees
    Operator {
        value: LogicalOp,
        left: Box<RuleNode>,
        right: Box<RuleNode>,
    },
}

impl RuleNode {
    pub fn operand(value: impl Into<String>) -> Self {
        RuleNode::Operand {
            value: value.into(),
        }
    }

    pub fn operator(value: LogicalOp, left: RuleNode, right: RuleNode) -> Self {
        RuleNode::Operator {
            value,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, RuleNode::Operand { .. })
    }

    /// Condition text of an operand
    pub fn condition(&self) -> Option<&str> {
        match self {
            RuleNode::Operand { value } => Some(value),
            RuleNode::Operator { .. } => None,
        }
    }

    pub fn logical_op(&self) -> Option<LogicalOp> {
        match self {
            RuleNode::Operator { value, .. } => Some(*value),
            RuleNode::Operand { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&RuleNode> {
        match self {
            RuleNode::Operator { left, .. } => Some(left),
            RuleNode::Operand { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&RuleNode> {
        match self {
            RuleNode::Operator { right, .. } => Some(right),
            RuleNode::Operand { .. } => None,
        }
    }

    /// Height of the tree; a lone operand has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let RuleNode::Operator { left, right, .. } = node {
                stack.push((left.as_ref(), level + 1));
                stack.push((right.as_ref(), level + 1));
            }
        }
        deepest
    }
}

/// Combined trees can be as deep as the number of rules; unlink children
/// iteratively so dropping one never recurses.
impl Drop for RuleNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach_children(&mut node, &mut stack);
        }
    }
}

fn detach_children(node: &mut RuleNode, stack: &mut Vec<RuleNode>) {
    if let RuleNode::Operator { left, right, .. } = node {
        stack.push(std::mem::replace(left.as_mut(), RuleNode::operand(String::new())));
        stack.push(std::mem::replace(right.as_mut(), RuleNode::operand(String::new())));
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleNode::Operand { value } => write!(f, "Operand({})", value),
            RuleNode::Operator { value, left, right } => {
                write!(f, "Operator({}) with left: {} and right: {}", value, left, right)
            }
        }
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Both sides must hold (AND)
    #[default]
    #[serde(rename = "AND")]
    And,
    /// Either side may hold (OR)
    #[serde(rename = "OR")]
    Or,
}

impl LogicalOp {
    /// Keyword as it appears in rule text
    pub const fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }

    #[inline]
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            LogicalOp::And => left && right,
            LogicalOp::Or => left || right,
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for LogicalOp {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(LogicalOp::And),
            "OR" => Ok(LogicalOp::Or),
            other => Err(RuleError::UnknownLogicalOperator(other.to_string())),
        }
    }
}
