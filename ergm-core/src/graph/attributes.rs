//! Node attribute storage: binary, categorical, continuous, and set-valued
//! vectors, each entry optionally missing.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::types::NodeId;

/// Error raised when constructing or querying [`NodeAttributes`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AttributeError {
    /// An attribute table had a row count different from the graph's node count.
    #[error("attribute `{name}` has {rows} rows but the graph has {node_count} nodes")]
    RowCountMismatch {
        /// Name of the offending attribute.
        name: String,
        /// Number of rows actually supplied.
        rows: usize,
        /// Expected row count (the graph's node count).
        node_count: usize,
    },
}

/// A single node-attribute table, keyed by attribute name at the call site.
///
/// Each variant stores one `Option<T>` per node; `None` is the "missing"
/// marker that causes statistics touching that node to contribute zero.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeAttributes {
    /// A binary (0/1) attribute.
    Binary(Vec<Option<bool>>),
    /// A categorical attribute, stored as small integers.
    Categorical(Vec<Option<i64>>),
    /// A continuous real-valued attribute.
    Continuous(Vec<Option<f64>>),
    /// A set-of-integers-valued attribute.
    SetValued(Vec<Option<HashSet<i64>>>),
}

impl NodeAttributes {
    /// Validates that the attribute has exactly `node_count` entries.
    ///
    /// # Errors
    /// Returns [`AttributeError::RowCountMismatch`] otherwise.
    pub fn validate(&self, name: &str, node_count: usize) -> Result<(), AttributeError> {
        let rows = self.len();
        if rows != node_count {
            return Err(AttributeError::RowCountMismatch {
                name: name.to_owned(),
                rows,
                node_count,
            });
        }
        Ok(())
    }

    fn len(&self) -> usize {
        match self {
            Self::Binary(values) => values.len(),
            Self::Categorical(values) => values.len(),
            Self::Continuous(values) => values.len(),
            Self::SetValued(values) => values.len(),
        }
    }

    /// Returns `true` if `node`'s value is missing.
    #[must_use]
    pub fn is_missing(&self, node: NodeId) -> bool {
        let idx = node as usize;
        match self {
            Self::Binary(values) => values.get(idx).is_none_or(Option::is_none),
            Self::Categorical(values) => values.get(idx).is_none_or(Option::is_none),
            Self::Continuous(values) => values.get(idx).is_none_or(Option::is_none),
            Self::SetValued(values) => values.get(idx).is_none_or(Option::is_none),
        }
    }

    /// Reads `node`'s binary value, if this is a [`NodeAttributes::Binary`]
    /// table and the value is present.
    #[must_use]
    pub fn binary(&self, node: NodeId) -> Option<bool> {
        match self {
            Self::Binary(values) => values.get(node as usize).copied().flatten(),
            _ => None,
        }
    }

    /// Reads `node`'s categorical value, if present.
    #[must_use]
    pub fn categorical(&self, node: NodeId) -> Option<i64> {
        match self {
            Self::Categorical(values) => values.get(node as usize).copied().flatten(),
            _ => None,
        }
    }

    /// Reads `node`'s continuous value, if present.
    #[must_use]
    pub fn continuous(&self, node: NodeId) -> Option<f64> {
        match self {
            Self::Continuous(values) => values.get(node as usize).copied().flatten(),
            _ => None,
        }
    }

    /// Reads `node`'s set value, if present.
    #[must_use]
    pub fn set_valued(&self, node: NodeId) -> Option<&HashSet<i64>> {
        match self {
            Self::SetValued(values) => values.get(node as usize).and_then(Option::as_ref),
            _ => None,
        }
    }
}

/// A graph's full collection of loaded node-attribute tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeTable {
    tables: BTreeMap<String, NodeAttributes>,
}

impl AttributeTable {
    /// Creates an empty attribute table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a named attribute, validating its row count against
    /// `node_count`.
    ///
    /// # Errors
    /// Returns [`AttributeError::RowCountMismatch`] if the attribute's length
    /// does not equal `node_count`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        node_count: usize,
        attribute: NodeAttributes,
    ) -> Result<(), AttributeError> {
        let name = name.into();
        attribute.validate(&name, node_count)?;
        self.tables.insert(name, attribute);
        Ok(())
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NodeAttributes> {
        self.tables.get(name)
    }

    /// Returns the number of loaded attribute tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no attributes are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
