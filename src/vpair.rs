//! VPair: one-to-many matching from a single query vertex `u` (§4.4).

use crate::graph::{Graph, VertexId};
use crate::similarity::{DescendantProducer, PathScorer, VertexScorer};
use crate::spair::SPair;

/// Runs VPair for a single `u`, owning its own [`SPair`] engine — per
/// §9, VPair and APair each get a fresh engine rather than sharing one.
pub fn vpair<S>(gd: &Graph, g: &Graph, similarity: &S, u: VertexId, sigma: f64, delta: f64, k: usize) -> Vec<VertexId>
where
    S: VertexScorer + PathScorer + DescendantProducer,
{
    let mut candidates: Vec<VertexId> = g
        .vertices()
        .filter(|&v| similarity.score_vertex(gd, u, g, v) >= sigma)
        .collect();
    candidates.sort_by_key(|&v| g.out_degree(v));

    let mut spair = SPair::new(gd, g, similarity, sigma, delta, k);
    let mut matches = Vec::new();
    for v in candidates {
        let matched = spair.cached(u, v).unwrap_or_else(|| spair.query(u, v));
        if matched {
            matches.push(v);
        }
    }
    tracing::info!(u, matches = matches.len(), cache_entries = spair.cache_len(), "vpair finished");
    matches
}
