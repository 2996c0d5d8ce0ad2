//! Rule tree evaluator

use crate::error::{Result, RuleError};
use crate::record::Record;
use crate::rule::ast::{LogicalOp, RuleNode};
use crate::rule::condition::Condition;
use tracing::trace;

/// Evaluate a rule tree against a record
///
/// Both sides of an operator are always evaluated, left first, so an error on
/// the right side surfaces even when the left side already decides the result.
///
/// Combined rules form a left-leaning chain as deep as the number of rules, so
/// the left spine is walked iteratively. Only right children recurse.
pub fn evaluate(node: &RuleNode, record: &Record) -> Result<bool> {
    let mut pending: Vec<(LogicalOp, &RuleNode)> = Vec::new();
    let mut current = node;

    let mut verdict = loop {
        match current {
            RuleNode::Operand { value } => break check_operand(value, record)?,
            RuleNode::Operator { value, left, right } => {
                pending.push((*value, right.as_ref()));
                current = left.as_ref();
            }
        }
    };

    // Innermost operator first, matching left-to-right evaluation order
    while let Some((op, right)) = pending.pop() {
        let right = evaluate(right, record)?;
        verdict = op.apply(verdict, right);
    }

    Ok(verdict)
}

fn check_operand(text: &str, record: &Record) -> Result<bool> {
    let condition = Condition::parse(text)?;
    let verdict = condition.check(record)?;
    trace!(
        field = condition.field,
        operator = ?condition.operator,
        literal = condition.literal,
        verdict,
        "evaluated condition"
    );
    Ok(verdict)
}

/// Evaluate the output of [`combine`](crate::rule::combine), which is absent for zero rules
pub fn evaluate_combined(node: Option<&RuleNode>, record: &Record) -> Result<bool> {
    let node = node.ok_or(RuleError::EmptyCombination)?;
    evaluate(node, record)
}

impl RuleNode {
    /// Evaluate this tree against a record
    #[inline]
    pub fn evaluate(&self, record: &Record) -> Result<bool> {
        evaluate(self, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::combiner::combine;
    use crate::rule::parser::parse;

    fn sample_record() -> Record {
        Record::new()
            .with("age", 35)
            .with("department", "Sales")
            .with("salary", 60000)
            .with("experience", 3)
    }

    #[test]
    fn test_and_rule() {
        let ast = parse("age > 30 AND department == 'Sales'");
        assert!(evaluate(&ast, &sample_record()).unwrap());
    }

    #[test]
    fn test_or_rule() {
        let ast = parse("salary > 50000 OR experience > 5");
        let record = Record::new().with("salary", 60000).with("experience", 3);
        assert!(evaluate(&ast, &record).unwrap());
    }

    #[test]
    fn test_simple_false() {
        let record = Record::new().with("age", 20);
        assert!(!evaluate(&parse("age > 30"), &record).unwrap());
    }

    #[test]
    fn test_missing_field() {
        assert!(!evaluate(&parse("age > 30"), &Record::new()).unwrap());
    }

    #[test]
    fn test_combined_rules() {
        let combined = combine(
            [
                "age > 30 AND department == 'Sales'",
                "salary > 50000 OR experience > 5",
            ],
            LogicalOp::And,
        );
        assert!(evaluate_combined(combined.as_ref(), &sample_record()).unwrap());
    }

    #[test]
    fn test_unknown_operator_token() {
        let record = Record::new().with("age", 35);
        assert!(!evaluate(&parse("age >> 30"), &record).unwrap());
    }

    #[test]
    fn test_empty_combination_fails() {
        let combined = combine(Vec::<&str>::new(), LogicalOp::And);
        assert_eq!(
            evaluate_combined(combined.as_ref(), &sample_record()),
            Err(RuleError::EmptyCombination)
        );
    }

    #[test]
    fn test_no_short_circuit_for_or() {
        // Left side is already true; the right side must still be evaluated and fail
        let ast = parse("age > 30 OR salary > lots");
        let err = evaluate(&ast, &sample_record()).unwrap_err();
        assert!(matches!(err, RuleError::NumericCoercion { .. }));
    }

    #[test]
    fn test_no_short_circuit_for_and() {
        let ast = parse("age < 30 AND department > 5");
        let err = evaluate(&ast, &sample_record()).unwrap_err();
        assert_eq!(
            err,
            RuleError::NumericCoercion {
                field: "department".to_string(),
                value: "Sales".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_operand_fails() {
        let ast = parse("age > 30 AND department");
        assert_eq!(
            evaluate(&ast, &sample_record()),
            Err(RuleError::MalformedCondition("department".to_string()))
        );
    }

    #[test]
    fn test_malformed_wins_over_missing_field() {
        assert!(matches!(
            evaluate(&parse("height >"), &Record::new()),
            Err(RuleError::MalformedCondition(_))
        ));
    }

    #[test]
    fn test_right_operand_absorbs_keywords() {
        // Right side "b > 2 AND c > 3" only reads its first three tokens
        let record = Record::new().with("a", 5).with("b", 5).with("c", 0);
        assert!(evaluate(&parse("a > 1 AND b > 2 AND c > 3"), &record).unwrap());
    }

    #[test]
    fn test_method_form() {
        let record = Record::new().with("age", 40);
        assert!(parse("age > 30").evaluate(&record).unwrap());
    }
    fn chained_rules(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("x > {}", i % 7)).collect()
    }

    #[test]
    fn test_deep_combination_does_not_overflow() {
        let rules = chained_rules(100_000);
        let tree = combine(&rules, LogicalOp::Or).unwrap();
        let record = Record::new().with("x", 3);
        assert!(evaluate(&tree, &record).unwrap());

        let tree = combine(&rules, LogicalOp::And).unwrap();
        assert!(!evaluate(&tree, &record).unwrap());
    }

    #[test]
    fn test_deep_combination_reports_first_failure() {
        let mut rules = chained_rules(50_000);
        rules[10] = "y > many".to_string();
        rules.push("z".to_string());
        let tree = combine(&rules, LogicalOp::Or).unwrap();
        let record = Record::new().with("x", 3).with("y", 1);
        assert_eq!(
            evaluate(&tree, &record),
            Err(RuleError::NumericCoercion {
                field: "y".to_string(),
                value: "many".to_string()
            })
        );
    }

    #[test]
    fn test_trees_and_records_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleNode>();
        assert_send_sync::<Record>();

        let tree = combine(
            [
                "age > 30 AND department == 'Sales'",
                "salary > 50000 OR experience > 5",
            ],
            LogicalOp::And,
        )
        .unwrap();
        let shared = sample_record();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let tree = &tree;
                    let shared = &shared;
                    s.spawn(move || {
                        let own = Record::new()
                            .with("age", 20 + i * 5)
                            .with("department", "Sales");
                        (evaluate(tree, shared).unwrap(), evaluate(tree, &own).unwrap())
                    })
                })
                .collect();
            for handle in handles {
                let (on_shared, on_own) = handle.join().unwrap();
                assert!(on_shared);
                // `own` has no salary or experience, so the second rule is false
                assert!(!on_own);
            }
        });
    }
}
