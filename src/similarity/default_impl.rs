//! The default, production `h_v`/`h_p`/`h_r` triple (§4.6): equality and
//! synonym-table shortcuts in front of a cosine-similarity fallback over
//! averaged word embeddings, with optional precomputed path/descendant
//! tables in front of a live BFS.

use super::bfs::{bfs, concat_edge_label};
use super::descendants_file::DescendantTable;
use super::embedding::{cosine_similarity, text_to_vector, WordEmbeddings};
use super::path_file::PathTable;
use super::synonym::SynonymTable;
use super::{Depth, DescendantProducer, PathScorer, VertexScorer};
use crate::graph::{Graph, VertexId};

pub struct DefaultSimilarity {
    embeddings: WordEmbeddings,
    synonyms: SynonymTable,
    path_table: Option<PathTable>,
    descendant_table: Option<DescendantTable>,
    bfs_depth: Depth,
}

impl DefaultSimilarity {
    pub fn new(
        embeddings: WordEmbeddings,
        synonyms: SynonymTable,
        path_table: Option<PathTable>,
        descendant_table: Option<DescendantTable>,
        bfs_depth: Depth,
    ) -> Self {
        DefaultSimilarity {
            embeddings,
            synonyms,
            path_table,
            descendant_table,
            bfs_depth,
        }
    }

    /// Exact match, then synonym table, then cosine similarity over
    /// averaged word vectors — the three-tier scoring shared by `h_v`
    /// and `h_p` once both sides have been reduced to a label string.
    fn score_label_pair(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        if let Some(score) = self.synonyms.lookup(a, b) {
            return score;
        }
        let va = text_to_vector(&self.embeddings, a);
        let vb = text_to_vector(&self.embeddings, b);
        cosine_similarity(&va, &vb)
    }
}

impl VertexScorer for DefaultSimilarity {
    fn score_vertex(&self, gd: &Graph, u: VertexId, g: &Graph, v: VertexId) -> f64 {
        self.score_label_pair(gd.label(u), g.label(v))
    }
}

impl PathScorer for DefaultSimilarity {
    fn score_path(&self, gd: &Graph, u: VertexId, u1: VertexId, g: &Graph, v: VertexId, v1: VertexId) -> f64 {
        let query_label = concat_edge_label(gd, u, u1, " ");

        let target_label = self
            .path_table
            .as_ref()
            .and_then(|t| t.lookup(v, v1))
            .map(str::to_string)
            .unwrap_or_else(|| concat_edge_label(g, v, v1, " "));

        if query_label.is_empty() || target_label.is_empty() {
            return 0.0;
        }

        self.score_label_pair(&query_label, &target_label)
    }
}

impl DescendantProducer for DefaultSimilarity {
    fn descendants(&self, graph: &Graph, v: VertexId, k: usize, is_target: bool) -> Vec<(VertexId, Depth)> {
        if is_target {
            if let Some(table) = &self.descendant_table {
                if let Some(entries) = table.lookup(v) {
                    return entries.iter().take(k).copied().collect();
                }
            }
        }
        bfs(graph, v, self.bfs_depth, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use std::io::BufReader;

    fn empty_similarity(bfs_depth: Depth) -> DefaultSimilarity {
        DefaultSimilarity::new(
            WordEmbeddings::default(),
            SynonymTable::default(),
            None,
            None,
            bfs_depth,
        )
    }

    fn two_vertex_graphs() -> (Graph, Graph, VertexId, VertexId, VertexId, VertexId) {
        let mut qb = GraphBuilder::new();
        let u0 = qb.add_vertex(1, "heart".into()).unwrap();
        let u1 = qb.add_vertex(2, "attack".into()).unwrap();
        qb.add_edge(u0, u1, "has".into());
        let gd = qb.build();

        let mut tb = GraphBuilder::new();
        let v0 = tb.add_vertex(10, "heart".into()).unwrap();
        let v1 = tb.add_vertex(11, "attack".into()).unwrap();
        tb.add_edge(v0, v1, "has".into());
        let g = tb.build();

        (gd, g, u0, u1, v0, v1)
    }

    #[test]
    fn exact_label_match_scores_one() {
        let sim = empty_similarity(3);
        let (gd, g, u0, _u1, v0, _v1) = two_vertex_graphs();
        assert_eq!(sim.score_vertex(&gd, u0, &g, v0), 1.0);
    }

    #[test]
    fn distinct_unrelated_labels_score_zero() {
        let sim = empty_similarity(3);
        let (gd, g, u0, _u1, _v0, v1) = two_vertex_graphs();
        assert_eq!(sim.score_vertex(&gd, u0, &g, v1), 0.0);
    }

    #[test]
    fn matching_edge_labels_score_one() {
        let sim = empty_similarity(3);
        let (gd, g, u0, u1, v0, v1) = two_vertex_graphs();
        assert_eq!(sim.score_path(&gd, u0, u1, &g, v0, v1), 1.0);
    }

    #[test]
    fn unreachable_target_pair_scores_zero() {
        let sim = empty_similarity(3);
        let (gd, g, u0, u1, v1, v0) = two_vertex_graphs();
        // v1 -> v0 is the reverse direction: unreachable in this DAG.
        assert_eq!(sim.score_path(&gd, u0, u1, &g, v1, v0), 0.0);
    }

    #[test]
    fn synonym_table_overrides_cosine_fallback() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(f, "heart,cardiac,0.8\n").unwrap();
        let synonyms =
            SynonymTable::load("s.csv", BufReader::new(std::fs::File::open(f.path()).unwrap())).unwrap();
        let sim = DefaultSimilarity::new(WordEmbeddings::default(), synonyms, None, None, 3);

        let mut qb = GraphBuilder::new();
        let u0 = qb.add_vertex(1, "heart".into()).unwrap();
        let gd = qb.build();
        let mut tb = GraphBuilder::new();
        let v0 = tb.add_vertex(10, "cardiac".into()).unwrap();
        let g = tb.build();

        assert_eq!(sim.score_vertex(&gd, u0, &g, v0), 0.8);
    }
}
