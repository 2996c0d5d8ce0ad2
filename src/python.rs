//! Python bindings via PyO3 (enabled with the `python` feature)

use crate::error::RuleError;
use crate::record::{FieldValue, Record};
use crate::rule::{combine, evaluate_combined, parse, LogicalOp, RuleNode};
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Immutable parsed rule tree exposed to Python
#[pyclass(name = "RuleTree", frozen)]
#[derive(Clone)]
pub struct RuleTree {
    inner: RuleNode,
}

#[pymethods]
impl RuleTree {
    fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __eq__(&self, other: PyRef<'_, RuleTree>) -> bool {
        self.inner == other.inner
    }

    /// Evaluate against a dict of field name to number or string
    fn evaluate(&self, data: &Bound<'_, PyDict>) -> PyResult<bool> {
        let record = deserialize_record(data)?;
        Ok(self.inner.evaluate(&record)?)
    }

    /// JSON rendering of the tree
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| RuleError::Deserialization(e.to_string()).into())
    }
}

/// Convert a Python dict into a Record; values must be int, float or str
fn deserialize_record(dict: &Bound<'_, PyDict>) -> PyResult<Record> {
    let mut record = Record::new();
    for (key, value) in dict.iter() {
        let name: String = key.extract()?;
        let field = if let Ok(i) = value.extract::<i64>() {
            FieldValue::Integer(i)
        } else if let Ok(f) = value.extract::<f64>() {
            FieldValue::Float(f)
        } else if let Ok(s) = value.extract::<String>() {
            FieldValue::Text(s)
        } else {
            return Err(RuleError::Deserialization(format!(
                "field {:?} must be a number or a string",
                name
            ))
            .into());
        };
        record.insert(name, field);
    }
    Ok(record)
}

/// Parse a rule string into a tree
#[pyfunction]
fn create_rule(rule_string: &str) -> RuleTree {
    RuleTree {
        inner: parse(rule_string),
    }
}

/// Combine rule strings under `operator` ("AND" or "OR"); returns None for an empty list
#[pyfunction]
#[pyo3(signature = (rules, operator="AND"))]
fn combine_rules(rules: Vec<String>, operator: &str) -> PyResult<Option<RuleTree>> {
    let operator: LogicalOp = operator.parse()?;
    Ok(combine(&rules, operator).map(|inner| RuleTree { inner }))
}

/// Evaluate a tree against a dict
///
/// # Raises
/// ValueError if `node` is None, a condition is malformed, or a numeric
/// comparison meets a non-number
#[pyfunction]
#[pyo3(signature = (node, data))]
fn evaluate_rule(node: Option<PyRef<'_, RuleTree>>, data: &Bound<'_, PyDict>) -> PyResult<bool> {
    let record = deserialize_record(data)?;
    let tree = node.as_deref().map(|t| &t.inner);
    Ok(evaluate_combined(tree, &record)?)
}

/// Python module definition
#[pymodule]
fn rule_ast_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(create_rule, m)?)?;
    m.add_function(wrap_pyfunction!(combine_rules, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_rule, m)?)?;
    m.add_class::<RuleTree>()?;
    Ok(())
}
