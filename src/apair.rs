//! APair: the distributed, multi-threaded all-pairs driver (§4.5).
//!
//! Candidate generation is split into pure, unit-testable pieces
//! (shuffle, chunking, per-`u` filtering) and a thin MPI-orchestration
//! function (`run_apair`) that wires them to an actual `mpi::World`.
//! Only the orchestration touches MPI; everything else is plain data.

use crate::graph::{Graph, VertexId};
use crate::index::InvertedIndex;
use crate::similarity::{DescendantProducer, PathScorer, VertexScorer};
use crate::spair::SPair;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;

/// One query vertex and the target candidates that survived `h_v ≥ σ`
/// plus source-label/out-degree filtering.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub u: VertexId,
    pub candidates: Vec<VertexId>,
}

/// A decided positive match, already resolved to external ids and
/// labels for output (§6's `apair_r` file format).
#[derive(Debug, Clone)]
pub struct ApairMatch {
    pub u_oid: i64,
    pub v_oid: i64,
    pub u_label: String,
    pub v_label: String,
}

/// Deterministic seed-0 shuffle of G_D's vertices, used identically by
/// every rank so the candidate→rank assignment is reproducible (S6).
pub fn deterministic_shuffle(mut items: Vec<VertexId>) -> Vec<VertexId> {
    let mut rng = SmallRng::seed_from_u64(0);
    items.shuffle(&mut rng);
    items
}

/// The contiguous chunk `rank` owns out of `size` ranks; the last rank
/// absorbs any remainder from uneven division.
pub fn rank_chunk(items: &[VertexId], rank: usize, size: usize) -> &[VertexId] {
    if size == 0 || items.is_empty() {
        return &[];
    }
    let n = items.len();
    let base = n / size;
    let start = rank * base;
    let end = if rank + 1 == size { n } else { start + base };
    &items[start.min(n)..end.min(n)]
}

/// Splits a rank's chunk into `parallelism` contiguous sub-chunks, one
/// per worker thread. `parallelism` of 0 is treated as 1.
pub fn thread_subchunks(chunk: &[VertexId], parallelism: usize) -> Vec<&[VertexId]> {
    let parallelism = parallelism.max(1);
    if chunk.is_empty() {
        return Vec::new();
    }
    let n = chunk.len();
    let base = n.div_ceil(parallelism).max(1);
    chunk.chunks(base).collect()
}

/// Step "per-worker filtering" of §4.5 for a single `u`. Returns `None`
/// if `u` is skipped (zero out-degree, not source-labeled) or has no
/// surviving candidates.
#[allow(clippy::too_many_arguments)]
fn filter_candidates_for_u<S>(
    gd: &Graph,
    g: &Graph,
    similarity: &S,
    index: &InvertedIndex,
    gd_source_labels: &HashSet<String>,
    g_source_labels: &HashSet<String>,
    u: VertexId,
    sigma: f64,
) -> Option<CandidateSet>
where
    S: VertexScorer,
{
    if gd.out_degree(u) == 0 {
        return None;
    }
    let label = gd.label(u);
    if !gd_source_labels.contains(label) {
        return None;
    }

    let mut candidates: Vec<VertexId> = index
        .query(label)
        .into_iter()
        .filter(|&v| g.out_degree(v) > 0)
        .filter(|&v| g_source_labels.contains(g.label(v)))
        .filter(|&v| similarity.score_vertex(gd, u, g, v) >= sigma)
        .collect();

    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by_key(|&v| g.out_degree(v));
    Some(CandidateSet { u, candidates })
}

/// Runs candidate generation for one rank's chunk across `parallelism`
/// worker threads, merging results under a single mutex (§4.5 Merge).
/// Order across `u` is not globally deterministic by design.
#[allow(clippy::too_many_arguments)]
pub fn generate_candidates<S>(
    gd: &Graph,
    g: &Graph,
    similarity: &S,
    index: &InvertedIndex,
    gd_source_labels: &HashSet<String>,
    g_source_labels: &HashSet<String>,
    chunk: &[VertexId],
    parallelism: usize,
    sigma: f64,
) -> Vec<CandidateSet>
where
    S: VertexScorer + Sync,
{
    let subchunks = thread_subchunks(chunk, parallelism);
    let merged = Mutex::new(Vec::new());

    subchunks.into_par_iter().for_each(|sub| {
        let mut local = Vec::new();
        for &u in sub {
            if let Some(set) =
                filter_candidates_for_u(gd, g, similarity, index, gd_source_labels, g_source_labels, u, sigma)
            {
                local.push(set);
            }
        }
        merged.lock().extend(local);
    });

    merged.into_inner()
}

/// The serial decision phase (§4.5 Decision phase): one [`SPair`]
/// engine shared across every candidate pair in the rank.
pub fn decide<S>(
    gd: &Graph,
    g: &Graph,
    similarity: &S,
    candidates: Vec<CandidateSet>,
    sigma: f64,
    delta: f64,
    k: usize,
) -> Vec<ApairMatch>
where
    S: VertexScorer + PathScorer + DescendantProducer,
{
    let mut spair = SPair::new(gd, g, similarity, sigma, delta, k);
    let mut matches = Vec::new();

    for set in candidates {
        for v in set.candidates {
            let matched = spair.cached(set.u, v).unwrap_or_else(|| spair.query(set.u, v));
            if matched {
                matches.push(ApairMatch {
                    u_oid: gd.get_external(set.u),
                    v_oid: g.get_external(v),
                    u_label: gd.label(set.u).to_string(),
                    v_label: g.label(v).to_string(),
                });
            }
        }
    }

    tracing::info!(matches = matches.len(), cache_entries = spair.cache_len(), "apair decision phase finished");
    matches
}

/// Formats one [`ApairMatch`] as the `u_oid|v_oid|u_label|v_label` line
/// specified for the `apair_r` output file (§6).
pub fn format_match_line(m: &ApairMatch) -> String {
    format!("{}|{}|{}|{}", m.u_oid, m.v_oid, m.u_label, m.v_label)
}

/// The full per-rank pipeline, given this rank's `rank`/`size` and
/// already-broadcast shuffled candidate list. MPI world setup and the
/// broadcast/barrier calls themselves live in `main` (§5: "a barrier
/// synchronizes ranks, used only for accurate timing").
#[allow(clippy::too_many_arguments)]
pub fn run_rank<S>(
    gd: &Graph,
    g: &Graph,
    similarity: &S,
    index: &InvertedIndex,
    gd_source_labels: &HashSet<String>,
    g_source_labels: &HashSet<String>,
    shuffled: &[VertexId],
    rank: usize,
    size: usize,
    parallelism: usize,
    sigma: f64,
    delta: f64,
    k: usize,
) -> Vec<ApairMatch>
where
    S: VertexScorer + PathScorer + DescendantProducer + Sync,
{
    let chunk = rank_chunk(shuffled, rank, size);
    let candidates = generate_candidates(
        gd,
        g,
        similarity,
        index,
        gd_source_labels,
        g_source_labels,
        chunk,
        parallelism,
        sigma,
    );
    decide(gd, g, similarity, candidates, sigma, delta, k)
}
