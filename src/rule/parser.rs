//! Rule string parser
//!
//! A rule is split once, at the first `AND` token if there is one, otherwise
//! at the first `OR` token. Neither side is parsed further: any remaining
//! keywords stay inside the operand text.

use crate::rule::ast::{LogicalOp, RuleNode};
use smallvec::SmallVec;
use tracing::debug;

/// Keywords in the order they are tried
const SPLIT_KEYWORDS: [LogicalOp; 2] = [LogicalOp::And, LogicalOp::Or];

/// Parse a rule string into an AST. Never fails; bad conditions surface at evaluation.
pub fn parse(rule: &str) -> RuleNode {
    let tokens: SmallVec<[&str; 16]> = rule.split_whitespace().collect();

    for keyword in SPLIT_KEYWORDS {
        if let Some(pos) = tokens.iter().position(|t| *t == keyword.keyword()) {
            debug!(rule, keyword = keyword.keyword(), position = pos, "splitting rule");
            let left = tokens[..pos].join(" ");
            let right = tokens[pos + 1..].join(" ");
            return RuleNode::operator(keyword, RuleNode::operand(left), RuleNode::operand(right));
        }
    }

    RuleNode::operand(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_condition() {
        let ast = parse("age > 30");
        assert_eq!(ast, RuleNode::operand("age > 30"));
    }

    #[test]
    fn test_parse_single_condition_keeps_text() {
        // No keyword, so whitespace is left exactly as written
        let ast = parse("  age   >  30 ");
        assert_eq!(ast, RuleNode::operand("  age   >  30 "));
    }

    #[test]
    fn test_parse_and_condition() {
        let ast = parse("age > 30 AND department == 'Sales'");
        match &ast {
            RuleNode::Operator { value, left, right } => {
                assert_eq!(*value, LogicalOp::And);
                assert_eq!(**left, RuleNode::operand("age > 30"));
                assert_eq!(**right, RuleNode::operand("department == 'Sales'"));
            }
            _ => panic!("Expected AND operator"),
        }
    }

    #[test]
    fn test_parse_or_condition() {
        let ast = parse("salary > 50000 OR experience > 5");
        match &ast {
            RuleNode::Operator { value, left, right } => {
                assert_eq!(*value, LogicalOp::Or);
                assert_eq!(**left, RuleNode::operand("salary > 50000"));
                assert_eq!(**right, RuleNode::operand("experience > 5"));
            }
            _ => panic!("Expected OR operator"),
        }
    }

    #[test]
    fn test_and_wins_over_earlier_or() {
        let ast = parse("a > 1 OR b > 2 AND c > 3");
        assert_eq!(
            ast,
            RuleNode::operator(
                LogicalOp::And,
                RuleNode::operand("a > 1 OR b > 2"),
                RuleNode::operand("c > 3"),
            )
        );
    }

    #[test]
    fn test_only_first_keyword_splits() {
        let ast = parse("a > 1 AND b > 2 AND c > 3");
        assert_eq!(
            ast,
            RuleNode::operator(
                LogicalOp::And,
                RuleNode::operand("a > 1"),
                RuleNode::operand("b > 2 AND c > 3"),
            )
        );
    }

    #[test]
    fn test_split_normalizes_whitespace() {
        let ast = parse("  age   > 30\tAND  dept ==   'Sales'  ");
        assert_eq!(
            ast,
            RuleNode::operator(
                LogicalOp::And,
                RuleNode::operand("age > 30"),
                RuleNode::operand("dept == 'Sales'"),
            )
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive_tokens() {
        assert!(parse("a > 1 and b > 2").is_operand());
        assert!(parse("brand == ANDROID").is_operand());
    }

    #[test]
    fn test_keyword_at_edges() {
        assert_eq!(
            parse("AND a > 1"),
            RuleNode::operator(LogicalOp::And, RuleNode::operand(""), RuleNode::operand("a > 1"))
        );
        assert_eq!(
            parse("a > 1 OR"),
            RuleNode::operator(LogicalOp::Or, RuleNode::operand("a > 1"), RuleNode::operand(""))
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let rule = "x > 1 OR y < 2";
        assert_eq!(parse(rule), parse(rule));
    }
}
