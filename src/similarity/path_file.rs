//! Precomputed multi-hop path labels for G, keyed by `(v1, v2)` internal
//! vertex ids — an optional shortcut `h_p` checks before falling back
//! to a live BFS (§4.6).

use crate::error::ParseError;
use crate::graph::VertexMap;
use crate::io::{file_name, parse_error, significant_lines};
use crate::graph::VertexId;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Default)]
pub struct PathTable {
    paths: HashMap<(VertexId, VertexId), String>,
}

impl PathTable {
    /// Lines are `<v1_id> <v2_id> <path_labels>`, with `;` and `,`
    /// treated as label separators alongside whitespace. Endpoints not
    /// present in `vertex_map` are skipped rather than rejected — the
    /// path file may reference vertices pruned from a restricted load.
    pub fn load(path: &str, reader: BufReader<File>, vertex_map: &VertexMap) -> Result<Self, ParseError> {
        let mut paths = HashMap::new();

        for line in significant_lines(reader) {
            let (line_no, line) = line.map_err(|e| parse_error(path, 0, e.to_string()))?;
            let mut it = line.splitn(3, char::is_whitespace);
            let v1_str = it
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| parse_error(path, line_no, "expected '<v1> <v2> <labels>'"))?;
            let v2_str = it
                .next()
                .ok_or_else(|| parse_error(path, line_no, "expected '<v1> <v2> <labels>'"))?;
            let labels = it.next().unwrap_or("").trim();

            let v1: i64 = v1_str
                .parse()
                .map_err(|_| parse_error(path, line_no, format!("invalid vertex id: {v1_str}")))?;
            let v2: i64 = v2_str
                .parse()
                .map_err(|_| parse_error(path, line_no, format!("invalid vertex id: {v2_str}")))?;

            let (Some(v1), Some(v2)) = (vertex_map.get_internal(v1), vertex_map.get_internal(v2)) else {
                continue;
            };

            let normalized = labels
                .replace([';', ','], " ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();

            paths.insert((v1, v2), normalized);
        }

        tracing::info!(file = %file_name(path), entries = paths.len(), "loaded path table");
        Ok(PathTable { paths })
    }

    pub fn lookup(&self, v1: VertexId, v2: VertexId) -> Option<&str> {
        self.paths.get(&(v1, v2)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
