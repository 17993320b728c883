//! Integration tests exercising the concrete matching scenarios end to
//! end: graph loading from files through to SPair/VPair decisions.

use graphmatch::graph::{load_graph, GraphBuilder};
use graphmatch::similarity::default_impl::DefaultSimilarity;
use graphmatch::similarity::embedding::WordEmbeddings;
use graphmatch::similarity::synonym::SynonymTable;
use graphmatch::spair::SPair;
use graphmatch::vpair::vpair;
use std::fs::File;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;

fn reader_for(contents: &str) -> (NamedTempFile, BufReader<File>) {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "{contents}").unwrap();
    let path = f.path().to_path_buf();
    (f, BufReader::new(File::open(path).unwrap()))
}

fn default_sim() -> DefaultSimilarity {
    DefaultSimilarity::new(WordEmbeddings::default(), SynonymTable::default(), None, None, 3)
}

#[test]
fn s1_trivial_leaf_matches_only_identical_label() {
    let (_vf, vr) = reader_for("1 cat\n");
    let (_ef, er) = reader_for("");
    let gd = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let (_vf, vr) = reader_for("10 cat\n11 dog\n");
    let (_ef, er) = reader_for("");
    let g = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let u0 = gd.get_internal(1).unwrap();
    let v0 = g.get_internal(10).unwrap();
    let v1 = g.get_internal(11).unwrap();

    let sim = default_sim();
    let mut spair = SPair::new(&gd, &g, &sim, 0.5, 0.9, 10);
    assert!(spair.query(u0, v0));
    assert!(!spair.query(u0, v1));
}

#[test]
fn s2_one_hop_exact_labels_caches_descendant_pair_positive() {
    let (_vf, vr) = reader_for("1 a\n2 b\n");
    let (_ef, er) = reader_for("1 2 has\n");
    let gd = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let (_vf, vr) = reader_for("10 a\n11 b\n");
    let (_ef, er) = reader_for("10 11 has\n");
    let g = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let u0 = gd.get_internal(1).unwrap();
    let u1 = gd.get_internal(2).unwrap();
    let v0 = g.get_internal(10).unwrap();
    let v1 = g.get_internal(11).unwrap();

    let sim = default_sim();
    let mut spair = SPair::new(&gd, &g, &sim, 0.5, 0.5, 10);
    assert!(spair.query(u0, v0));
    assert_eq!(spair.cached(u1, v1), Some(true));
}

#[test]
fn s3_cycle_terminates_within_depth_bound() {
    let (_vf, vr) = reader_for("1 a\n2 b\n");
    let (_ef, er) = reader_for("1 2 x\n2 1 x\n");
    let gd = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let (_vf, vr) = reader_for("10 a\n11 b\n");
    let (_ef, er) = reader_for("10 11 x\n11 10 x\n");
    let g = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let a = gd.get_internal(1).unwrap();
    let ta = g.get_internal(10).unwrap();

    let sim = default_sim();
    let mut spair = SPair::new(&gd, &g, &sim, 1.0, 1.0, 10);
    assert!(spair.query(a, ta));
}

#[test]
fn s4_threshold_miss_yields_no_matches() {
    let mut qb = GraphBuilder::new();
    let u0 = qb.add_vertex(1, "heart attack".into()).unwrap();
    let gd = qb.build();

    let mut tb = GraphBuilder::new();
    tb.add_vertex(10, "cardiac arrest".into()).unwrap();
    let g = tb.build();

    // A synonym table scoring the pair at 0.9 still misses sigma=0.95.
    let (_sf, sr) = reader_for("heart attack,cardiac arrest,0.9\n");
    let synonyms = SynonymTable::load("s.csv", sr).unwrap();
    let sim = DefaultSimilarity::new(WordEmbeddings::default(), synonyms, None, None, 3);

    let matches = vpair(&gd, &g, &sim, u0, 0.95, 0.9, 10);
    assert!(matches.is_empty());
}

#[test]
fn universal_property_leaf_law() {
    let mut qb = GraphBuilder::new();
    let u0 = qb.add_vertex(1, "cat".into()).unwrap();
    let gd = qb.build();
    let mut tb = GraphBuilder::new();
    let v0 = tb.add_vertex(10, "cat".into()).unwrap();
    let v1 = tb.add_vertex(11, "dog".into()).unwrap();
    let g = tb.build();

    let sim = default_sim();
    let mut spair = SPair::new(&gd, &g, &sim, 0.5, 0.9, 10);
    assert_eq!(spair.query(u0, v0), sim_ge_sigma(&sim, &gd, u0, &g, v0, 0.5));
    assert_eq!(spair.query(u0, v1), sim_ge_sigma(&sim, &gd, u0, &g, v1, 0.5));
}

fn sim_ge_sigma(
    sim: &DefaultSimilarity,
    gd: &graphmatch::graph::Graph,
    u: graphmatch::graph::VertexId,
    g: &graphmatch::graph::Graph,
    v: graphmatch::graph::VertexId,
    sigma: f64,
) -> bool {
    use graphmatch::similarity::VertexScorer;
    sim.score_vertex(gd, u, g, v) >= sigma
}

#[test]
fn universal_property_vpair_equals_filtered_spair() {
    let mut qb = GraphBuilder::new();
    let u0 = qb.add_vertex(1, "cat".into()).unwrap();
    let gd = qb.build();
    let mut tb = GraphBuilder::new();
    let v0 = tb.add_vertex(10, "cat".into()).unwrap();
    let v1 = tb.add_vertex(11, "dog".into()).unwrap();
    let v2 = tb.add_vertex(12, "cat".into()).unwrap();
    let g = tb.build();

    let sim = default_sim();
    let vpair_matches: Vec<_> = vpair(&gd, &g, &sim, u0, 0.5, 0.9, 10);

    let mut spair = SPair::new(&gd, &g, &sim, 0.5, 0.9, 10);
    let direct_matches: Vec<_> = g.vertices().filter(|&v| spair.query(u0, v)).collect();

    let mut a = vpair_matches.clone();
    let mut b = direct_matches;
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert!(vpair_matches.contains(&v0));
    assert!(vpair_matches.contains(&v2));
    assert!(!vpair_matches.contains(&v1));
}

#[test]
fn universal_property_cache_idempotence() {
    let (_vf, vr) = reader_for("1 a\n2 b\n3 c\n");
    let (_ef, er) = reader_for("1 2 has\n2 3 has\n");
    let gd = load_graph("v.txt", vr, "e.txt", er).unwrap();
    let (_vf, vr) = reader_for("10 a\n11 b\n12 c\n");
    let (_ef, er) = reader_for("10 11 has\n11 12 has\n");
    let g = load_graph("v.txt", vr, "e.txt", er).unwrap();

    let u0 = gd.get_internal(1).unwrap();
    let v0 = g.get_internal(10).unwrap();

    let sim = default_sim();
    let mut spair = SPair::new(&gd, &g, &sim, 0.5, 0.5, 10);
    let first = spair.query(u0, v0);
    let second = spair.query(u0, v0);
    assert_eq!(first, second);
    assert_eq!(spair.cached(u0, v0), Some(first));
}
