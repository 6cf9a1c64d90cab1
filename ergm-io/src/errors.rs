//! Error types for Pajek, attribute-table, and configuration-file I/O.

use std::path::PathBuf;

use ergm_core::{AttributeError as GraphAttributeError, GraphError, StatError};
use thiserror::Error;

/// Error raised while reading or writing a Pajek arc-list file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PajekError {
    /// Underlying file I/O failed.
    #[error("i/o error reading {path}: {source}")]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file did not begin with a `*vertices N` header.
    #[error("line {line}: expected `*vertices N` header, found `{text}`")]
    MissingVerticesHeader {
        /// 1-based line number.
        line: usize,
        /// The offending line's text.
        text: String,
    },
    /// No `*arcs` marker was found after the vertex section.
    #[error("line {line}: expected `*arcs` marker, found `{text}`")]
    MissingArcsMarker {
        /// 1-based line number.
        line: usize,
        /// The offending line's text.
        text: String,
    },
    /// A `tail head` arc line could not be parsed as two integers.
    #[error("line {line}: malformed arc line `{text}`")]
    MalformedArcLine {
        /// 1-based line number.
        line: usize,
        /// The offending line's text.
        text: String,
    },
    /// A 1-based node ID in an arc line fell outside `1..=node_count`.
    #[error("line {line}: node id {node_id} is out of range for {node_count} vertices")]
    NodeIdOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending 1-based node ID.
        node_id: i64,
        /// Vertex count declared by the header.
        node_count: usize,
    },
    /// An arc line named `i i` but `allowLoops` was not set.
    #[error("line {line}: self-loop at node {node} is not permitted")]
    SelfLoopNotAllowed {
        /// 1-based line number.
        line: usize,
        /// The repeated 0-based node ID.
        node: u32,
    },
    /// The graph rejected an arc insertion (duplicate arc in the file).
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Error raised while reading a whitespace-separated attribute table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AttributeError {
    /// Underlying file I/O failed.
    #[error("i/o error reading {path}: {source}")]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file had no header line naming the attribute.
    #[error("attribute file {path} is empty; expected a header line")]
    EmptyFile {
        /// Path of the offending file.
        path: PathBuf,
    },
    /// A data row's value could not be parsed for the attribute's kind.
    #[error("line {line}: cannot parse `{text}` as a {kind} value")]
    MalformedValue {
        /// 1-based line number within the data rows (excluding the header).
        line: usize,
        /// The offending token.
        text: String,
        /// Human-readable name of the expected value kind.
        kind: &'static str,
    },
    /// The table's row count did not match the graph's node count.
    #[error(transparent)]
    RowCount(#[from] GraphAttributeError),
}

/// Error raised while parsing a `key = value` configuration file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying file I/O failed.
    #[error("i/o error reading {path}: {source}")]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A non-comment, non-blank line was not a `key = value` pair.
    #[error("line {line}: malformed configuration line `{text}`")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line's text.
        text: String,
    },
    /// A key was not among the recognized configuration options.
    #[error("line {line}: unknown configuration key `{key}`")]
    UnknownKey {
        /// 1-based line number.
        line: usize,
        /// The offending key, as written (case preserved for the message).
        key: String,
    },
    /// A required key was never set.
    #[error("missing required configuration key `{key}`")]
    MissingRequiredKey {
        /// Name of the missing key.
        key: &'static str,
    },
    /// `useIFDsampler` and `useTNTsampler` were both set.
    #[error("useIFDsampler and useTNTsampler are mutually exclusive")]
    ContradictorySamplerFlags,
    /// A key's value could not be parsed as the type it requires.
    #[error("line {line}: key `{key}` has invalid value `{value}`")]
    InvalidValue {
        /// 1-based line number.
        line: usize,
        /// The offending key.
        key: &'static str,
        /// The unparseable value text.
        value: String,
    },
    /// A `structParams`/`attrParams`/`dyadicParams`/`attrInteractionParams`
    /// entry named an unrecognized statistic.
    #[error(transparent)]
    Stat(#[from] StatError),
}
