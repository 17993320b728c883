//! Graph store: immutable labeled directed graphs with dense integer ids.

mod loader;
mod store;
mod vertex_map;

pub use loader::load_graph;
pub use store::{Graph, GraphBuilder, OutEdge, VertexId};
pub use vertex_map::VertexMap;
