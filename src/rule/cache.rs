//! Rule parsing cache

use crate::error::Result;
use crate::record::Record;
use crate::rule::ast::RuleNode;
use crate::rule::{evaluator, parser};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

/// Maximum number of cached rules; the cache is emptied when a new rule would exceed it
pub const CACHE_CAPACITY: usize = 256;

/// Global rule cache keyed by the raw rule string
static RULE_CACHE: Lazy<RwLock<AHashMap<String, RuleNode>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(CACHE_CAPACITY)));

/// Get or parse a rule string, using the cache for repeated rules
#[inline]
pub fn get_or_parse(rule: &str) -> RuleNode {
    {
        let cache = RULE_CACHE.read();
        if let Some(ast) = cache.get(rule) {
            return ast.clone();
        }
    }

    debug!(rule, "rule cache miss");
    let ast = parser::parse(rule);
    {
        let mut cache = RULE_CACHE.write();
        if cache.len() >= CACHE_CAPACITY && !cache.contains_key(rule) {
            debug!(entries = cache.len(), "rule cache full, clearing");
            cache.clear();
        }
        cache.insert(rule.to_string(), ast.clone());
    }
    ast
}

/// Parse (through the cache) and evaluate a rule string against a record
#[inline]
pub fn check_rule(rule: &str, record: &Record) -> Result<bool> {
    let ast = get_or_parse(rule);
    evaluator::evaluate(&ast, record)
}

pub fn clear_cache() {
    RULE_CACHE.write().clear();
}

pub fn cache_size() -> usize {
    RULE_CACHE.read().len()
}
