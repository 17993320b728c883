//! # Graph Store
//!
//! An immutable, labeled, directed graph with dense integer vertex ids and
//! CSR (compressed-sparse-row) outgoing adjacency. Built once at load time
//! and shared by reference across every thread in a rank — there are no
//! locks because there is no mutation after [`GraphBuilder::build`].
//!
//! ```text
//! label:        ["cat", "dog", "has"]
//! out_offsets:   [0, 2, 2, 2]
//! out_targets:   [1, 2]
//! out_labels:    ["has", "is"]
//! ```

use super::vertex_map::VertexMap;

/// Dense internal vertex id, `0..graph.vertex_count()`.
pub type VertexId = u32;

/// One outgoing edge: the target vertex and the (lowercased) edge label.
#[derive(Debug, Clone, Copy)]
pub struct OutEdge<'g> {
    pub target: VertexId,
    pub label: &'g str,
}

/// An immutable labeled directed graph.
///
/// Labels are normalized to lowercase at load time (§3 invariant); callers
/// never need to re-normalize before comparing labels.
#[derive(Debug)]
pub struct Graph {
    labels: Vec<String>,
    out_offsets: Vec<u32>,
    out_targets: Vec<VertexId>,
    out_labels: Vec<String>,
    vertex_map: VertexMap,
}

impl Graph {
    /// Ordered `0..|V|-1` vertex iterator.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        0..self.labels.len() as VertexId
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// O(1) label lookup.
    pub fn label(&self, v: VertexId) -> &str {
        &self.labels[v as usize]
    }

    /// O(out_degree) iteration over `v`'s outgoing edges, in CSR insertion
    /// order (the order edges were read from the edge file).
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = OutEdge<'_>> + '_ {
        let start = self.out_offsets[v as usize] as usize;
        let end = self.out_offsets[v as usize + 1] as usize;
        (start..end).map(move |i| OutEdge {
            target: self.out_targets[i],
            label: &self.out_labels[i],
        })
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        let start = self.out_offsets[v as usize] as usize;
        let end = self.out_offsets[v as usize + 1] as usize;
        end - start
    }

    pub fn get_internal(&self, external: i64) -> Option<VertexId> {
        self.vertex_map.get_internal(external)
    }

    pub fn get_external(&self, v: VertexId) -> i64 {
        self.vertex_map
            .get_external(v)
            .expect("internal vertex id out of range")
    }

    pub fn vertex_map(&self) -> &VertexMap {
        &self.vertex_map
    }
}

/// Accumulates vertices and edges while a graph is being parsed, then
/// produces an immutable [`Graph`] via [`GraphBuilder::build`].
pub struct GraphBuilder {
    vertex_map: VertexMap,
    labels: Vec<String>,
    // (src, dst, label) triples, in edge-file order.
    edges: Vec<(VertexId, VertexId, String)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            vertex_map: VertexMap::new(),
            labels: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Registers a vertex. Returns its internal id. Returns `Err` if the
    /// external id was already registered (duplicate vertex).
    pub fn add_vertex(&mut self, external: i64, label: String) -> Result<VertexId, VertexId> {
        let (internal, is_new) = self.vertex_map.add(external);
        if !is_new {
            return Err(internal);
        }
        debug_assert_eq!(internal as usize, self.labels.len());
        self.labels.push(label);
        Ok(internal)
    }

    pub fn get_internal(&self, external: i64) -> Option<VertexId> {
        self.vertex_map.get_internal(external)
    }

    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, label: String) {
        self.edges.push((src, dst, label));
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Finalizes the graph, laying out outgoing adjacency as CSR. Edges
    /// appear within each vertex's adjacency in the order they were added.
    pub fn build(mut self) -> Graph {
        let n = self.labels.len();
        let mut degree = vec![0u32; n + 1];
        for (src, _, _) in &self.edges {
            degree[*src as usize + 1] += 1;
        }
        for i in 0..n {
            degree[i + 1] += degree[i];
        }
        let out_offsets = degree.clone();
        let mut cursor = degree;
        let mut out_targets = vec![0 as VertexId; self.edges.len()];
        let mut out_labels: Vec<String> = (0..self.edges.len()).map(|_| String::new()).collect();

        for (src, dst, label) in self.edges.drain(..) {
            let pos = cursor[src as usize] as usize;
            out_targets[pos] = dst;
            out_labels[pos] = label;
            cursor[src as usize] += 1;
        }

        Graph {
            labels: self.labels,
            out_offsets,
            out_targets,
            out_labels,
            vertex_map: self.vertex_map,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        GraphBuilder::new()
    }
}
