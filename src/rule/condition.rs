//! Leaf comparisons: `<field> <operator> <literal>`

use crate::error::{Result, RuleError};
use crate::record::{FieldValue, Record};
use std::cmp::Ordering;

/// Comparison operators understood in a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// String equality (==)
    Equal,
    /// Anything else; always evaluates to false
    Unsupported,
}

impl ComparisonOp {
    pub fn from_token(token: &str) -> Self {
        match token {
            ">" => ComparisonOp::Greater,
            "<" => ComparisonOp::Less,
            "==" => ComparisonOp::Equal,
            _ => ComparisonOp::Unsupported,
        }
    }
}

/// A single comparison borrowed out of an operand's text
///
/// Only the first three whitespace-separated tokens count. Anything after
/// them, including the tail of a quoted literal with spaces, is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition<'a> {
    pub field: &'a str,
    pub operator: ComparisonOp,
    pub literal: &'a str,
}

impl<'a> Condition<'a> {
    pub fn parse(text: &'a str) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(field), Some(op), Some(literal)) => Ok(Condition {
                field,
                operator: ComparisonOp::from_token(op),
                literal,
            }),
            _ => Err(RuleError::MalformedCondition(text.trim().to_string())),
        }
    }

    /// Check the comparison against a record. A missing field is false, not an error.
    pub fn check(&self, record: &Record) -> Result<bool> {
        let Some(value) = record.get(self.field) else {
            return Ok(false);
        };

        match self.operator {
            ComparisonOp::Greater => Ok(self.compare_numeric(value)? == Some(Ordering::Greater)),
            ComparisonOp::Less => Ok(self.compare_numeric(value)? == Some(Ordering::Less)),
            ComparisonOp::Equal => Ok(value.to_string() == self.literal.trim_matches('\'')),
            ComparisonOp::Unsupported => Ok(false),
        }
    }

    /// Literal is coerced before the record value, so a bad literal is reported first.
    /// `None` means unordered (NaN on either side).
    fn compare_numeric(&self, value: &FieldValue) -> Result<Option<Ordering>> {
        let rhs = parse_number(self.literal).ok_or_else(|| RuleError::NumericCoercion {
            field: self.field.to_string(),
            value: self.literal.to_string(),
        })?;
        if let FieldValue::Text(text) = value {
            return Err(RuleError::NumericCoercion {
                field: self.field.to_string(),
                value: text.clone(),
            });
        }
        Ok(value.partial_cmp_number(rhs))
    }
}

/// Parse a float literal. Underscores are accepted only between two digits (`1_000`).
fn parse_number(literal: &str) -> Option<f64> {
    if !literal.contains('_') {
        return literal.parse().ok();
    }

    let bytes = literal.as_bytes();
    let grouped_digits = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !grouped_digits {
        return None;
    }
    literal.replace('_', "").parse().ok()
}
