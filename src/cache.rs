//! Memoization cache for SPair decisions, plus the reverse-dependency
//! index that makes targeted invalidation-on-backtrack possible (§4.3,
//! §9). `(u, v)` is packed into a single `u64` so the cache key is
//! `Copy` and hashes in one instruction instead of hashing a tuple.

use crate::graph::VertexId;
use std::collections::{HashMap, HashSet};

/// `(u, v)` packed as `u << 32 | v`.
pub type PairKey = u64;

pub fn pack(u: VertexId, v: VertexId) -> PairKey {
    (u as PairKey) << 32 | v as PairKey
}

pub fn unpack(key: PairKey) -> (VertexId, VertexId) {
    ((key >> 32) as VertexId, key as u32 as VertexId)
}

/// A decided (or tentatively-decided, see step 6 of §4.3) pair.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub matched: bool,
    /// The `(u', v')` pairs whose positive decision this entry's
    /// positive decision depends on. Always empty for a negative entry.
    pub supporting_set: HashSet<PairKey>,
}

/// The SPair memoization cache and its reverse-dependency index.
///
/// Invariant (§3): for every `(u', v')` in `cache[(u,v)].supporting_set`
/// where `cache[(u,v)].matched`, `(u,v) ∈ reverse[(u',v')]`. Every
/// mutating method here maintains that invariant; callers must not
/// reach into `entries`/`reverse` directly from outside this module.
#[derive(Debug, Default)]
pub struct Cache {
    entries: HashMap<PairKey, CacheEntry>,
    reverse: HashMap<PairKey, HashSet<PairKey>>,
}

impl Cache {
    pub fn new() -> Self {
        Cache::default()
    }

    pub fn get(&self, u: VertexId, v: VertexId) -> Option<bool> {
        self.entries.get(&pack(u, v)).map(|e| e.matched)
    }

    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.entries.contains_key(&pack(u, v))
    }

    /// Step 6: install an optimistic positive decision with an empty
    /// supporting set, before the recursion that will populate it.
    pub fn mark_tentative_positive(&mut self, u: VertexId, v: VertexId) {
        self.entries.insert(
            pack(u, v),
            CacheEntry {
                matched: true,
                supporting_set: HashSet::new(),
            },
        );
    }

    /// Steps 3/4: install a definitive decision with no supporting set.
    pub fn mark_definitive(&mut self, u: VertexId, v: VertexId, matched: bool) {
        self.entries.insert(
            pack(u, v),
            CacheEntry {
                matched,
                supporting_set: HashSet::new(),
            },
        );
    }

    /// Step 7c: record that `(u,v)`'s positive decision relies on the
    /// witness `(u', v')`, and index the reverse dependency.
    pub fn add_support(&mut self, u: VertexId, v: VertexId, u1: VertexId, v1: VertexId) {
        let key = pack(u, v);
        let witness = pack(u1, v1);
        self.entries
            .entry(key)
            .or_insert_with(|| CacheEntry {
                matched: true,
                supporting_set: HashSet::new(),
            })
            .supporting_set
            .insert(witness);
        self.reverse.entry(witness).or_default().insert(key);
    }

    /// Step 8: flips `(u,v)` negative and returns the snapshot of
    /// parents that depended on it, clearing the reverse entry so each
    /// parent is invalidated at most once per cleanup.
    pub fn invalidate(&mut self, u: VertexId, v: VertexId) -> Vec<(VertexId, VertexId)> {
        let key = pack(u, v);
        self.entries.insert(
            key,
            CacheEntry {
                matched: false,
                supporting_set: HashSet::new(),
            },
        );
        self.reverse
            .remove(&key)
            .into_iter()
            .flatten()
            .map(unpack)
            .collect()
    }

    /// Erases a cache entry outright so a parent can be re-decided from
    /// scratch (step 8's "erase Cache[(up,vp)]").
    pub fn erase(&mut self, u: VertexId, v: VertexId) {
        self.entries.remove(&pack(u, v));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Testable property 8: the reverse-cache coherence check, used by
    /// tests and debug assertions rather than the hot path.
    #[cfg(test)]
    pub fn is_coherent(&self) -> bool {
        for (&key, entry) in &self.entries {
            if !entry.matched {
                continue;
            }
            for &witness in &entry.supporting_set {
                if !self.reverse.get(&witness).is_some_and(|parents| parents.contains(&key)) {
                    return false;
                }
            }
        }
        true
    }
}
