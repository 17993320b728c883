//! Precomputed descendant lists for G, keyed by internal vertex id — an
//! optional shortcut `h_r` checks for target-graph queries before
//! falling back to a live BFS (§4.6).

use super::Depth;
use crate::error::ParseError;
use crate::graph::{VertexId, VertexMap};
use crate::io::{file_name, parse_error, significant_lines};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Default)]
pub struct DescendantTable {
    descendants: HashMap<VertexId, Vec<(VertexId, Depth)>>,
}

impl DescendantTable {
    /// Lines are `<v_id> [<desc_id> <depth>]*`. A vertex id not present
    /// in `vertex_map` (for the source `v_id` or any descendant) drops
    /// just that entry, not the whole line — precomputed files may
    /// reference vertices outside a restricted load.
    pub fn load(path: &str, reader: BufReader<File>, vertex_map: &VertexMap) -> Result<Self, ParseError> {
        let mut descendants = HashMap::new();

        for line in significant_lines(reader) {
            let (line_no, line) = line.map_err(|e| parse_error(path, 0, e.to_string()))?;
            let mut tokens = line.split_whitespace();
            let v_str = tokens
                .next()
                .ok_or_else(|| parse_error(path, line_no, "expected '<v_id> [<desc_id> <depth>]*'"))?;
            let v: i64 = v_str
                .parse()
                .map_err(|_| parse_error(path, line_no, format!("invalid vertex id: {v_str}")))?;
            let Some(v) = vertex_map.get_internal(v) else {
                continue;
            };

            let mut entries = Vec::new();
            loop {
                let Some(desc_str) = tokens.next() else { break };
                let depth_str = tokens
                    .next()
                    .ok_or_else(|| parse_error(path, line_no, "descendant missing depth"))?;
                let desc: i64 = desc_str
                    .parse()
                    .map_err(|_| parse_error(path, line_no, format!("invalid descendant id: {desc_str}")))?;
                let depth: Depth = depth_str
                    .parse()
                    .map_err(|_| parse_error(path, line_no, format!("invalid depth: {depth_str}")))?;
                if let Some(desc) = vertex_map.get_internal(desc) {
                    entries.push((desc, depth));
                }
            }

            descendants.insert(v, entries);
        }

        tracing::info!(file = %file_name(path), entries = descendants.len(), "loaded descendant table");
        Ok(DescendantTable { descendants })
    }

    pub fn lookup(&self, v: VertexId) -> Option<&[(VertexId, Depth)]> {
        self.descendants.get(&v).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }
}
