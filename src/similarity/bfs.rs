//! Breadth-first traversal helpers shared by the default `h_r` (bounded
//! descendant enumeration) and `h_p` (path-label concatenation) tiers.

use super::Depth;
use crate::graph::{Graph, VertexId};
use std::collections::{HashMap, VecDeque};

/// Breadth-first descendants of `src`, stopping once either `depth_limit`
/// levels have been explored or `k` descendants have been collected
/// (whichever comes first). `src` itself is never included. Ties within
/// a level follow CSR edge order.
pub fn bfs(graph: &Graph, src: VertexId, depth_limit: Depth, k: usize) -> Vec<(VertexId, Depth)> {
    let mut visited = std::collections::HashSet::new();
    visited.insert(src);
    let mut queue: VecDeque<(VertexId, Depth)> = VecDeque::new();
    queue.push_back((src, 0));
    let mut result = Vec::new();

    while let Some((v, depth)) = queue.pop_front() {
        if depth >= depth_limit || result.len() >= k {
            continue;
        }
        for edge in graph.out_edges(v) {
            if visited.insert(edge.target) {
                result.push((edge.target, depth + 1));
                if result.len() >= k {
                    break;
                }
                queue.push_back((edge.target, depth + 1));
            }
        }
        if result.len() >= k {
            break;
        }
    }

    result
}

/// Concatenates the edge labels along the shortest (first-discovered)
/// BFS path from `src` to `dst`, joined by `delimiter`. Returns an empty
/// string if `dst` is unreachable from `src` (including `src == dst`).
pub fn concat_edge_label(graph: &Graph, src: VertexId, dst: VertexId, delimiter: &str) -> String {
    if src == dst {
        return String::new();
    }

    let mut visited = std::collections::HashSet::new();
    visited.insert(src);
    let mut parent: HashMap<VertexId, (VertexId, String)> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(src);

    'search: while let Some(v) = queue.pop_front() {
        for edge in graph.out_edges(v) {
            if visited.insert(edge.target) {
                parent.insert(edge.target, (v, edge.label.to_string()));
                if edge.target == dst {
                    break 'search;
                }
                queue.push_back(edge.target);
            }
        }
    }

    if !parent.contains_key(&dst) {
        return String::new();
    }

    let mut labels = Vec::new();
    let mut cur = dst;
    while let Some((prev, label)) = parent.get(&cur) {
        labels.push(label.clone());
        cur = *prev;
    }
    labels.reverse();
    labels.join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn chain_graph() -> (Graph, VertexId, VertexId, VertexId) {
        let mut b = GraphBuilder::new();
        let a = b.add_vertex(1, "a".into()).unwrap();
        let c = b.add_vertex(2, "b".into()).unwrap();
        let d = b.add_vertex(3, "c".into()).unwrap();
        b.add_edge(a, c, "has".into());
        b.add_edge(c, d, "causes".into());
        (b.build(), a, c, d)
    }

    #[test]
    fn bfs_respects_depth_limit() {
        let (g, a, c, _d) = chain_graph();
        let result = bfs(&g, a, 1, 10);
        assert_eq!(result, vec![(c, 1)]);
    }

    #[test]
    fn bfs_respects_k_limit() {
        let (g, a, c, _d) = chain_graph();
        let result = bfs(&g, a, 10, 1);
        assert_eq!(result, vec![(c, 1)]);
    }

    #[test]
    fn concat_edge_label_joins_path() {
        let (g, a, _c, d) = chain_graph();
        assert_eq!(concat_edge_label(&g, a, d, " "), "has causes");
    }

    #[test]
    fn concat_edge_label_empty_when_unreachable() {
        let (g, _a, c, d) = chain_graph();
        assert_eq!(concat_edge_label(&g, d, c, " "), "");
    }
}
