//! Attribute-based change statistics: sender, receiver, matching,
//! matching-reciprocity, continuous difference, dyadic covariate, and
//! attribute interaction terms.

use std::collections::HashMap;

use crate::error::StatError;
use crate::graph::{Graph, NodeAttributes};
use crate::types::NodeId;

pub(crate) fn lookup<'g>(graph: &'g Graph, name: &str) -> Result<&'g NodeAttributes, StatError> {
    graph
        .attributes()
        .get(name)
        .ok_or_else(|| StatError::UnknownAttribute {
            name: name.to_owned(),
        })
}

/// Change in the sender statistic: contributes the tail's attribute value
/// (treated as `1.0`/`0.0` for binary, the raw value for categorical).
///
/// # Errors
/// Returns [`StatError::UnknownAttribute`] if `attribute` was not loaded.
pub fn delta_sender(
    graph: &Graph,
    attribute: &str,
    tail: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    let table = lookup(graph, attribute)?;
    let value = attribute_numeric(table, tail);
    Ok(signed(value, is_delete))
}

/// Change in the receiver statistic: contributes the head's attribute value.
///
/// # Errors
/// Returns [`StatError::UnknownAttribute`] if `attribute` was not loaded.
pub fn delta_receiver(
    graph: &Graph,
    attribute: &str,
    head: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    let table = lookup(graph, attribute)?;
    let value = attribute_numeric(table, head);
    Ok(signed(value, is_delete))
}

/// Change in the matching statistic: `1.0` if tail and head share the same
/// categorical (or binary) value, else `0.0`. Missing values never match.
///
/// # Errors
/// Returns [`StatError::UnknownAttribute`] if `attribute` was not loaded.
pub fn delta_matching(
    graph: &Graph,
    attribute: &str,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    let table = lookup(graph, attribute)?;
    Ok(signed(f64::from(values_match(table, tail, head)), is_delete))
}

/// Change in the matching-reciprocity statistic: `1.0` if tail and head
/// match on `attribute` AND the dyad is (or, for a delete, was) mutual.
///
/// # Errors
/// Returns [`StatError::UnknownAttribute`] if `attribute` was not loaded.
pub fn delta_matching_reciprocity(
    graph: &Graph,
    attribute: &str,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    let table = lookup(graph, attribute)?;
    if !values_match(table, tail, head) || !graph.is_arc(head, tail) {
        return Ok(0.0);
    }
    Ok(if is_delete { -1.0 } else { 1.0 })
}

/// Change in the continuous-difference statistic: absolute difference of a
/// continuous covariate between tail and head. Missing values contribute
/// zero.
///
/// # Errors
/// Returns [`StatError::UnknownAttribute`] if `attribute` was not loaded.
pub fn delta_continuous_difference(
    graph: &Graph,
    attribute: &str,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    let table = lookup(graph, attribute)?;
    let (Some(a), Some(b)) = (table.continuous(tail), table.continuous(head)) else {
        return Ok(0.0);
    };
    Ok(signed((a - b).abs(), is_delete))
}

/// Change in a dyadic-covariate statistic: the covariate value for the
/// `(tail, head)` dyad, looked up from a caller-supplied matrix.
#[must_use]
pub fn delta_dyadic_covariate(
    covariate: &HashMap<(NodeId, NodeId), f64>,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> f64 {
    let value = covariate.get(&(tail, head)).copied().unwrap_or(0.0);
    signed(value, is_delete)
}

/// Change in an attribute-interaction term: product of two already-computed
/// change-statistic contributions. The aggregator in [`super::calc_change_stats`]
/// looks up each operand's value by position in the same
/// [`super::StatSelection`] and passes them in here.
#[must_use]
pub fn delta_attribute_interaction(left_value: f64, right_value: f64) -> f64 {
    left_value * right_value
}

pub(crate) fn attribute_numeric(table: &NodeAttributes, node: NodeId) -> f64 {
    match table {
        NodeAttributes::Binary(_) => f64::from(table.binary(node).unwrap_or(false)),
        NodeAttributes::Categorical(_) => table.categorical(node).unwrap_or(0) as f64,
        NodeAttributes::Continuous(_) => table.continuous(node).unwrap_or(0.0),
        NodeAttributes::SetValued(_) => table
            .set_valued(node)
            .map_or(0.0, |set| set.len() as f64),
    }
}

pub(crate) fn values_match(table: &NodeAttributes, tail: NodeId, head: NodeId) -> bool {
    match table {
        NodeAttributes::Binary(_) => match (table.binary(tail), table.binary(head)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        NodeAttributes::Categorical(_) => {
            match (table.categorical(tail), table.categorical(head)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        NodeAttributes::SetValued(_) => match (table.set_valued(tail), table.set_valued(head)) {
            (Some(a), Some(b)) => !a.is_disjoint(b),
            _ => false,
        },
        NodeAttributes::Continuous(_) => false,
    }
}

fn signed(value: f64, is_delete: bool) -> f64 {
    if is_delete { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn graph_with_sex() -> Graph {
        let mut graph = Graph::new(3);
        graph
            .load_attribute(
                "sex",
                NodeAttributes::Binary(vec![Some(true), Some(true), Some(false)]),
            )
            .expect("load sex");
        graph
    }

    #[test]
    fn matching_is_true_only_when_values_are_equal_and_present() {
        let graph = graph_with_sex();
        assert_eq!(delta_matching(&graph, "sex", 0, 1, false).expect("ok"), 1.0);
        assert_eq!(delta_matching(&graph, "sex", 0, 2, false).expect("ok"), 0.0);
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let graph = Graph::new(2);
        let err = delta_sender(&graph, "missing", 0, false).expect_err("unknown attribute");
        assert!(matches!(err, StatError::UnknownAttribute { .. }));
    }

    #[test]
    fn delete_negates_sender_contribution() {
        let graph = graph_with_sex();
        let add = delta_sender(&graph, "sex", 0, false).expect("ok");
        let del = delta_sender(&graph, "sex", 0, true).expect("ok");
        assert_eq!(add, -del);
    }
}
