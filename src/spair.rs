//! The SPair engine: the recursive, memoized similarity-simulation
//! decision procedure (§4.3). This is the part of the system where
//! correctness is subtle — optimistic positive marking breaks cycles
//! among mutually-recursive calls, and a reverse-dependency index lets
//! a later negative decision invalidate exactly the ancestors that
//! relied on it, instead of flushing the whole cache.

use crate::cache::Cache;
use crate::graph::{Graph, VertexId};
use crate::similarity::{Depth, DescendantProducer, PathScorer, VertexScorer};
use std::collections::HashMap;

/// Recursion is unconditionally cut off below this depth (§4.3); this is
/// a safeguard against cyclic graphs, not part of the semantic
/// definition of `match`.
const MAX_DEPTH: u32 = 10;

#[derive(Debug, Default)]
struct Stats {
    positive_decisions: u64,
    sum_of_sums: f64,
    max_sum: f64,
}

impl Stats {
    fn record(&mut self, sum: f64) {
        self.positive_decisions += 1;
        self.sum_of_sums += sum;
        if sum > self.max_sum {
            self.max_sum = sum;
        }
    }

    fn average(&self) -> f64 {
        if self.positive_decisions == 0 {
            0.0
        } else {
            self.sum_of_sums / self.positive_decisions as f64
        }
    }
}

/// Owns the memoization cache and per-graph descendant caches for one
/// query session. Borrows the two graphs and the similarity callables;
/// a fresh `SPair` is created per VPair/APair invocation (§9: "VPair and
/// APair each instantiate their own SPair engine").
pub struct SPair<'a, S> {
    gd: &'a Graph,
    g: &'a Graph,
    similarity: &'a S,
    sigma: f64,
    delta: f64,
    k: usize,
    cache: Cache,
    gd_desc_cache: HashMap<VertexId, Vec<(VertexId, Depth)>>,
    g_desc_cache: HashMap<VertexId, Vec<(VertexId, Depth)>>,
    stats: Stats,
}

impl<'a, S> SPair<'a, S>
where
    S: VertexScorer + PathScorer + DescendantProducer,
{
    pub fn new(gd: &'a Graph, g: &'a Graph, similarity: &'a S, sigma: f64, delta: f64, k: usize) -> Self {
        SPair {
            gd,
            g,
            similarity,
            sigma,
            delta,
            k,
            cache: Cache::new(),
            gd_desc_cache: HashMap::new(),
            g_desc_cache: HashMap::new(),
            stats: Stats::default(),
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Read-only cache probe, used by VPair/APair before falling back
    /// to a full [`SPair::query`].
    pub fn cached(&self, u: VertexId, v: VertexId) -> Option<bool> {
        self.cache.get(u, v)
    }

    /// Top-level entry point: decide `match(u, v)`.
    pub fn query(&mut self, u: VertexId, v: VertexId) -> bool {
        self.query_depth(u, v, 1)
    }

    fn gd_descendants(&mut self, u: VertexId) -> Vec<(VertexId, Depth)> {
        self.gd_desc_cache
            .entry(u)
            .or_insert_with(|| self.similarity.descendants(self.gd, u, self.k, false))
            .clone()
    }

    fn g_descendants(&mut self, v: VertexId) -> Vec<(VertexId, Depth)> {
        self.g_desc_cache
            .entry(v)
            .or_insert_with(|| self.similarity.descendants(self.g, v, self.k, true))
            .clone()
    }

    fn query_depth(&mut self, u: VertexId, v: VertexId, depth: u32) -> bool {
        // Step 1: cache hit.
        if let Some(matched) = self.cache.get(u, v) {
            return matched;
        }

        // Step 2: depth cutoff, uncached on purpose (§4.3, §9).
        if depth > MAX_DEPTH {
            return false;
        }

        // Step 3: vertex score.
        let s = self.similarity.score_vertex(self.gd, u, self.g, v);
        if s < self.sigma {
            self.cache.mark_definitive(u, v, false);
            return false;
        }

        // Step 4: leaf of G_D matches trivially.
        if self.gd.out_degree(u) == 0 {
            self.cache.mark_definitive(u, v, true);
            return true;
        }

        // Step 5: lazily populate descendant caches.
        let u_descendants = self.gd_descendants(u);
        let v_descendants = self.g_descendants(v);

        // Step 6: optimistic tentative positive marking breaks cycles.
        self.cache.mark_tentative_positive(u, v);

        // Step 7: accumulate weighted descendant-path score.
        let mut sum = 0.0;
        for &(u1, d_u) in &u_descendants {
            // Sort by h_p descending, stable so ties keep CSR/BFS order.
            let mut scored: Vec<(VertexId, Depth, f64)> = v_descendants
                .iter()
                .filter(|&&(v1, _)| self.similarity.score_vertex(self.gd, u1, self.g, v1) >= self.sigma)
                .map(|&(v1, d_v)| (v1, d_v, self.similarity.score_path(self.gd, u, u1, self.g, v, v1)))
                .collect();
            scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

            for (v1, d_v, hp) in scored {
                let matched = match self.cache.get(u1, v1) {
                    Some(m) => m,
                    None => self.query_depth(u1, v1, depth + 1),
                };
                if matched {
                    let denom = d_u.max(d_v).max(1) as f64;
                    sum += hp / denom;
                    self.cache.add_support(u, v, u1, v1);
                    break;
                }
            }

            if sum >= self.delta {
                self.stats.record(sum);
                return true;
            }
        }

        // Step 8: no witness set reached delta — cleanup and invalidate.
        let parents = self.cache.invalidate(u, v);
        for (up, vp) in parents {
            self.cache.erase(up, vp);
            self.query_depth(up, vp, depth + 1);
        }
        false
    }
}

impl<'a, S> Drop for SPair<'a, S> {
    fn drop(&mut self) {
        tracing::debug!(
            positive_decisions = self.stats.positive_decisions,
            max_sum = self.stats.max_sum,
            avg_sum = self.stats.average(),
            cache_entries = self.cache.len(),
            "spair engine finished"
        );
    }
}
