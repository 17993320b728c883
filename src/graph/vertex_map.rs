//! External-id ↔ internal-id mapping for one graph.
//!
//! Internal ids are dense integers assigned in first-seen order, matching
//! the order vertices appear in the vertex file. This is what lets the
//! graph store use a plain `Vec`-backed label array and CSR adjacency.

use std::collections::HashMap;

/// Bidirectional map between caller-facing external vertex ids and the
/// dense internal ids (`0..n`) used everywhere inside a [`Graph`](super::store::Graph).
#[derive(Debug, Default)]
pub struct VertexMap {
    external_to_internal: HashMap<i64, u32>,
    internal_to_external: Vec<i64>,
}

impl VertexMap {
    pub fn new() -> Self {
        VertexMap::default()
    }

    /// Assigns a fresh internal id to `external` if it hasn't been seen
    /// before. Returns `(internal_id, is_new)`.
    pub fn add(&mut self, external: i64) -> (u32, bool) {
        if let Some(&internal) = self.external_to_internal.get(&external) {
            return (internal, false);
        }
        let internal = self.internal_to_external.len() as u32;
        self.external_to_internal.insert(external, internal);
        self.internal_to_external.push(external);
        (internal, true)
    }

    pub fn get_internal(&self, external: i64) -> Option<u32> {
        self.external_to_internal.get(&external).copied()
    }

    pub fn get_external(&self, internal: u32) -> Option<i64> {
        self.internal_to_external.get(internal as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.internal_to_external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal_to_external.is_empty()
    }
}
