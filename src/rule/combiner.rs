//! Folding several rule strings into one tree

use crate::rule::ast::{LogicalOp, RuleNode};
use crate::rule::parser::parse;
use tracing::debug;

/// Parse each rule and chain them left to right under `operator`
///
/// Returns `None` for an empty input. A single rule comes back as its own
/// tree, with no wrapping operator node.
pub fn combine<I, S>(rules: I, operator: LogicalOp) -> Option<RuleNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combined: Option<RuleNode> = None;
    let mut count = 0usize;

    for rule in rules {
        let tree = parse(rule.as_ref());
        count += 1;
        combined = Some(match combined {
            None => tree,
            Some(acc) => RuleNode::operator(operator, acc, tree),
        });
    }

    debug!(rules = count, operator = operator.keyword(), "combined rules");
    combined
}
