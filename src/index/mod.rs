//! # Inverted Index
//!
//! Maps a word to the set of G-vertices whose (source-labeled) label
//! contains that word. Built once over G; queried many times during
//! APair candidate generation.
//!
//! ## Asymmetry between build and query
//!
//! Stopwords (`and`, `or`, `for`, `in`, `on`, `of`) are dropped while
//! *building* the index, but **not** while *querying* it — a query token
//! that happens to be a stopword simply misses the map and contributes
//! nothing to the intersection. This is observable (see the test below)
//! and is preserved intentionally rather than "fixed" to be symmetric.

use crate::graph::{Graph, VertexId};
use std::collections::{BTreeSet, HashMap, HashSet};

const STOPWORDS: &[&str] = &["and", "or", "for", "in", "on", "of"];

fn tokenize(label: &str) -> impl Iterator<Item = &str> {
    label.split(|c: char| c == '\t' || c == ' ').filter(|t| !t.is_empty())
}

/// Word → ordered set of target vertices, built once over a graph's
/// source-labeled vertices.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_index: HashMap<String, BTreeSet<VertexId>>,
}

impl InvertedIndex {
    /// Builds the index over `graph`'s vertices whose label is in
    /// `source_labels` and whose out-degree is nonzero (§4.2 Build).
    pub fn build(graph: &Graph, source_labels: &HashSet<String>) -> Self {
        let mut word_index: HashMap<String, BTreeSet<VertexId>> = HashMap::new();
        let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();

        for v in graph.vertices() {
            if graph.out_degree(v) == 0 {
                continue;
            }
            let label = graph.label(v);
            if !source_labels.contains(label) {
                continue;
            }
            let mut seen_tokens: HashSet<&str> = HashSet::new();
            for token in tokenize(label) {
                if stopwords.contains(token) || !seen_tokens.insert(token) {
                    continue;
                }
                word_index.entry(token.to_string()).or_default().insert(v);
            }
        }

        InvertedIndex { word_index }
    }

    /// Tokenizes `label` identically to [`InvertedIndex::build`] but does
    /// *not* drop stopwords, and returns the intersection of posting
    /// lists over tokens present in the index (§4.2 Query).
    pub fn query(&self, label: &str) -> BTreeSet<VertexId> {
        let mut result: Option<BTreeSet<VertexId>> = None;

        for token in tokenize(label) {
            let Some(posting) = self.word_index.get(token) else {
                continue;
            };
            result = Some(match result {
                None => posting.clone(),
                Some(acc) => {
                    let intersected: BTreeSet<VertexId> = acc.intersection(posting).copied().collect();
                    if intersected.is_empty() {
                        return BTreeSet::new();
                    }
                    intersected
                }
            });
        }

        result.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn build_graph(labels: &[&str]) -> Graph {
        let mut b = GraphBuilder::new();
        for (i, label) in labels.iter().enumerate() {
            b.add_vertex(i as i64, label.to_string()).unwrap();
        }
        // Connect each vertex to vertex 0 so out_degree(v) > 0 for all v.
        for i in 0..labels.len() {
            let src = b.get_internal(i as i64).unwrap();
            let dst = b.get_internal(0).unwrap();
            b.add_edge(src, dst, "rel".to_string());
        }
        b.build()
    }

    #[test]
    fn s5_inverted_index_intersection() {
        let g = build_graph(&["heart attack", "heart failure"]);
        let mut source_labels = HashSet::new();
        source_labels.insert("heart attack".to_string());
        source_labels.insert("heart failure".to_string());
        let idx = InvertedIndex::build(&g, &source_labels);

        let v0 = g.get_internal(0).unwrap();
        let v1 = g.get_internal(1).unwrap();

        let result = idx.query("heart");
        assert_eq!(result, BTreeSet::from([v0, v1]));

        // stopword "and" is dropped at build time but kept (and missed) at query time
        let result = idx.query("heart attack and failure");
        assert!(result.is_empty());
    }

    #[test]
    fn query_with_no_matching_token_is_empty() {
        let g = build_graph(&["cat"]);
        let mut source_labels = HashSet::new();
        source_labels.insert("cat".to_string());
        let idx = InvertedIndex::build(&g, &source_labels);
        assert!(idx.query("dog").is_empty());
    }
}
