//! Pajek arc-list format: `*vertices N`, optional vertex label lines, an
//! `*arcs` marker, then `tail head` lines using 1-based node IDs.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use ergm_core::Graph;

use crate::errors::PajekError;

/// Loads a directed graph from a Pajek arc-list file.
///
/// Node IDs are renumbered `1..=N` (as written in the file) to `0..N`. A
/// self-loop line is either dropped (`allow_loops = true`) or rejected
/// (`allow_loops = false`); the in-memory [`Graph`] never stores self-loops
/// either way.
///
/// # Errors
/// Returns [`PajekError`] if the file cannot be opened, the header or
/// `*arcs` marker is missing or malformed, an arc line is malformed or
/// references an out-of-range node, or an arc is duplicated in the file.
pub fn read_pajek(path: &Path, allow_loops: bool) -> Result<Graph, PajekError> {
    let file = File::open(path).map_err(|source| PajekError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines().enumerate();

    let (header_no, header) = lines.next().ok_or_else(|| PajekError::MissingVerticesHeader {
        line: 1,
        text: String::new(),
    })?;
    let header = header.map_err(|source| PajekError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let node_count = parse_vertices_header(header_no + 1, &header)?;

    let mut found_arcs_marker = false;
    let mut graph = Graph::new(node_count);
    for (line_no, line) in lines {
        let line = line.map_err(|source| PajekError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !found_arcs_marker {
            if trimmed.eq_ignore_ascii_case("*arcs") {
                found_arcs_marker = true;
            }
            // Between the header and the marker, every other line is an
            // optional vertex label; the graph store has no use for them.
            continue;
        }
        parse_arc_line(line_no, trimmed, node_count, allow_loops, &mut graph)?;
    }
    if !found_arcs_marker {
        return Err(PajekError::MissingArcsMarker {
            line: header_no + 2,
            text: String::new(),
        });
    }
    Ok(graph)
}

fn parse_vertices_header(line: usize, text: &str) -> Result<usize, PajekError> {
    let mut parts = text.split_whitespace();
    let marker = parts.next().unwrap_or_default();
    let count = parts.next();
    if !marker.eq_ignore_ascii_case("*vertices") {
        return Err(PajekError::MissingVerticesHeader {
            line,
            text: text.to_owned(),
        });
    }
    count
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(|| PajekError::MissingVerticesHeader {
            line,
            text: text.to_owned(),
        })
}

fn parse_arc_line(
    line: usize,
    text: &str,
    node_count: usize,
    allow_loops: bool,
    graph: &mut Graph,
) -> Result<(), PajekError> {
    let mut parts = text.split_whitespace();
    let tail = parts.next().and_then(|value| value.parse::<i64>().ok());
    let head = parts.next().and_then(|value| value.parse::<i64>().ok());
    let (Some(tail), Some(head)) = (tail, head) else {
        return Err(PajekError::MalformedArcLine {
            line,
            text: text.to_owned(),
        });
    };

    let tail = one_based_to_zero_based(line, tail, node_count)?;
    let head = one_based_to_zero_based(line, head, node_count)?;
    if tail == head {
        return if allow_loops {
            Ok(())
        } else {
            Err(PajekError::SelfLoopNotAllowed { line, node: tail })
        };
    }
    graph.insert_arc(tail, head)?;
    Ok(())
}

fn one_based_to_zero_based(line: usize, node_id: i64, node_count: usize) -> Result<u32, PajekError> {
    if node_id < 1 || node_id as u64 > node_count as u64 {
        return Err(PajekError::NodeIdOutOfRange {
            line,
            node_id,
            node_count,
        });
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node_id was already bounds-checked against node_count, which fits in u32 everywhere else in this crate"
    )]
    let zero_based = (node_id - 1) as u32;
    Ok(zero_based)
}

/// Writes `graph` as a Pajek arc-list file, renumbering `0..N` back to
/// `1..=N`.
///
/// # Errors
/// Returns [`PajekError::Io`] if the file cannot be created or written.
pub fn write_pajek(path: &Path, graph: &Graph) -> Result<(), PajekError> {
    let mut file = File::create(path).map_err(|source| PajekError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| PajekError::Io {
        path: path.to_path_buf(),
        source,
    };
    writeln!(file, "*vertices {}", graph.node_count()).map_err(write_err)?;
    writeln!(file, "*arcs").map_err(write_err)?;
    for (tail, head) in graph.arcs() {
        writeln!(file, "{} {}", tail + 1, head + 1).map_err(write_err)?;
    }
    Ok(())
}
