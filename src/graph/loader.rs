//! Loads a [`Graph`] from a vertex file and an edge file (§6).
//!
//! Vertex lines: `<external_id> <label remainder>`. Edge lines:
//! `<src_id> <dst_id> <label remainder>`. Blank lines and lines starting
//! with `#` are skipped. Labels are trimmed and lowercased at load time
//! (the normalization invariant in §3) — edge labels too, matching the
//! original loader's behavior of lowercasing both vertex and edge data
//! right after the graph is built.

use super::store::{Graph, GraphBuilder};
use crate::error::ParseError;
use crate::io::{file_name, parse_error, significant_lines};
use std::fs::File;
use std::io::BufReader;

/// Parses `vfile`/`efile` into a finished [`Graph`]. The caller is
/// expected to have already validated both paths exist (§7 Configuration
/// errors are raised earlier, before this function is called).
pub fn load_graph(vfile_path: &str, vfile: BufReader<File>, efile_path: &str, efile: BufReader<File>) -> Result<Graph, ParseError> {
    let mut builder = GraphBuilder::new();

    for line in significant_lines(vfile) {
        let (line_no, line) = line.map_err(|e| parse_error(vfile_path, 0, e.to_string()))?;
        let (oid_str, label) = crate::io::split_first_token(&line)
            .ok_or_else(|| parse_error(vfile_path, line_no, "expected '<id> <label>'"))?;
        let oid: i64 = oid_str
            .parse()
            .map_err(|_| parse_error(vfile_path, line_no, format!("invalid vertex id: {oid_str}")))?;
        let label = label.trim().to_lowercase();

        if builder.add_vertex(oid, label).is_err() {
            return Err(parse_error(
                vfile_path,
                line_no,
                format!("duplicate vertex id: {oid}"),
            ));
        }
    }

    for line in significant_lines(efile) {
        let (line_no, line) = line.map_err(|e| parse_error(efile_path, 0, e.to_string()))?;
        let (src_str, rest) = crate::io::split_first_token(&line)
            .ok_or_else(|| parse_error(efile_path, line_no, "expected '<src> <dst> <label>'"))?;
        let (dst_str, label) = crate::io::split_first_token(rest).unwrap_or((rest, ""));

        let src: i64 = src_str
            .parse()
            .map_err(|_| parse_error(efile_path, line_no, format!("invalid src id: {src_str}")))?;
        let dst: i64 = dst_str
            .parse()
            .map_err(|_| parse_error(efile_path, line_no, format!("invalid dst id: {dst_str}")))?;

        let src_internal = builder.get_internal(src).ok_or_else(|| {
            parse_error(
                efile_path,
                line_no,
                format!("edge references unknown src vertex: {src}"),
            )
        })?;
        let dst_internal = builder.get_internal(dst).ok_or_else(|| {
            parse_error(
                efile_path,
                line_no,
                format!("edge references unknown dst vertex: {dst}"),
            )
        })?;

        builder.add_edge(src_internal, dst_internal, label.trim().to_lowercase());
    }

    let vertex_count = builder.vertex_count();
    let edge_count = builder.edge_count();
    let graph = builder.build();
    tracing::info!(
        vfile = %file_name(vfile_path),
        efile = %file_name(efile_path),
        vertices = vertex_count,
        edges = edge_count,
        "loaded graph"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn reader_for(contents: &str) -> (NamedTempFile, BufReader<File>) {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{contents}").unwrap();
        let path = f.path().to_path_buf();
        (f, BufReader::new(File::open(path).unwrap()))
    }

    #[test]
    fn loads_vertices_and_edges_lowercased() {
        let (_vf, vreader) = reader_for("1 Cat\n2 DOG\n# a comment\n\n3 Has\n");
        let (_ef, ereader) = reader_for("1 2 HAS\n2 3 likes\n");
        let g = load_graph("v.txt", vreader, "e.txt", ereader).unwrap();

        assert_eq!(g.vertex_count(), 3);
        let v0 = g.get_internal(1).unwrap();
        let v1 = g.get_internal(2).unwrap();
        assert_eq!(g.label(v0), "cat");
        assert_eq!(g.label(v1), "dog");
        let edges: Vec<_> = g.out_edges(v0).collect();
        assert_eq!(edges[0].label, "has");
    }

    #[test]
    fn edge_to_unknown_vertex_is_fatal() {
        let (_vf, vreader) = reader_for("1 cat\n");
        let (_ef, ereader) = reader_for("1 99 has\n");
        let err = load_graph("v.txt", vreader, "e.txt", ereader).unwrap_err();
        assert!(err.message.contains("unknown dst vertex"));
    }

    #[test]
    fn duplicate_vertex_is_fatal() {
        let (_vf, vreader) = reader_for("1 cat\n1 dog\n");
        let (_ef, ereader) = reader_for("");
        let err = load_graph("v.txt", vreader, "e.txt", ereader).unwrap_err();
        assert!(err.message.contains("duplicate vertex"));
    }
}
