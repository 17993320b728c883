//! # Similarity Callables
//!
//! `h_v`, `h_p`, and `h_r` are the capability set the SPair engine treats
//! as an opaque, pure collaborator (§4, §9). The core only depends on
//! these three traits; `default_impl` supplies the production
//! implementations (cosine similarity over word embeddings, a synonym
//! table, and BFS) that a caller can swap out entirely.

pub mod bfs;
pub mod default_impl;
pub mod descendants_file;
pub mod embedding;
pub mod path_file;
pub mod synonym;

use crate::graph::{Graph, VertexId};

/// BFS/traversal depth, matching the original `depth_t` width.
pub type Depth = u16;

/// `h_v(u, v) → [0,1]`: similarity between a G_D vertex and a G vertex.
pub trait VertexScorer: Sync {
    fn score_vertex(&self, gd: &Graph, u: VertexId, g: &Graph, v: VertexId) -> f64;
}

/// `h_p(u, u', v, v') → [0,1]`: similarity between the G_D edge `u→u'`
/// and the G edge `v→v'`.
pub trait PathScorer: Sync {
    #[allow(clippy::too_many_arguments)]
    fn score_path(
        &self,
        gd: &Graph,
        u: VertexId,
        u1: VertexId,
        g: &Graph,
        v: VertexId,
        v1: VertexId,
    ) -> f64;
}

/// `h_r(graph, vertex, k, is_target) → [(descendant, depth)]`, ordered by
/// the producer's own policy (BFS level, in this crate's default impl).
pub trait DescendantProducer: Sync {
    fn descendants(&self, graph: &Graph, v: VertexId, k: usize, is_target: bool) -> Vec<(VertexId, Depth)>;
}

pub use default_impl::DefaultSimilarity;
