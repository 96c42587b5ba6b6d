//! Edge-list files.
//!
//! One edge per line as `source,target,weight`, no header. Undirected graphs
//! list each edge once.

use crate::edge::{Edge, Weight};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read the edges stored in `path`
pub fn read_edges<P: AsRef<Path>>(path: P) -> Result<Vec<Edge<String>>> {
    let file = File::open(&path)?;
    let edges = parse_edges(file)?;
    debug!("Read {} edges from {:?}", edges.len(), path.as_ref());
    Ok(edges)
}

/// Parse edges from any reader. Blank lines are skipped and fields are
/// trimmed; a line without three fields or with a non-integer weight fails.
pub fn parse_edges<R: Read>(input: R) -> Result<Vec<Edge<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut edges = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 3 {
            return Err(Error::malformed(
                line,
                format!("expected source,target,weight but found {} field(s)", record.len()),
            ));
        }
        let weight: Weight = record[2]
            .parse()
            .map_err(|_| Error::malformed(line, format!("invalid weight {:?}", &record[2])))?;
        edges.push(Edge::new(record[0].to_string(), record[1].to_string(), weight));
    }
    Ok(edges)
}

/// Split a comma-separated vertex list such as `A, B,C`. Empty labels are
/// dropped; a list with no labels at all is rejected.
pub fn parse_vertex_list(list: &str) -> Result<Vec<String>> {
    let vertices: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if vertices.is_empty() {
        return Err(Error::invalid_input(format!("no vertex labels in {:?}", list)));
    }
    Ok(vertices)
}

/// Write `edges` to `path`, returning the number of lines written
pub fn write_edges<V: Serialize, P: AsRef<Path>>(edges: &[Edge<V>], path: P) -> Result<usize> {
    let file = File::create(&path)?;
    let count = write_edges_to(edges, file)?;
    info!("Wrote {} edges to {:?}", count, path.as_ref());
    Ok(count)
}

pub fn write_edges_to<V: Serialize, W: Write>(edges: &[Edge<V>], output: W) -> Result<usize> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;
    Ok(edges.len())
}
