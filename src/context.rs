//! The top-level owner of everything read-only: both graphs, the
//! inverted index, and the default similarity callables' backing
//! tables. SPair/VPair/APair borrow from a `MatchContext`; nothing here
//! is mutated once [`MatchContext::load`] returns (§9 "no cyclic
//! ownership").

use crate::cli::Cli;
use crate::config::MatchingConfig;
use crate::error::GraphMatchError;
use crate::graph::{load_graph, Graph};
use crate::index::InvertedIndex;
use crate::io::{open_flagged, significant_lines};
use crate::similarity::default_impl::DefaultSimilarity;
use crate::similarity::descendants_file::DescendantTable;
use crate::similarity::embedding::WordEmbeddings;
use crate::similarity::path_file::PathTable;
use crate::similarity::synonym::SynonymTable;
use std::collections::HashSet;

pub struct MatchContext {
    pub gd: Graph,
    pub g: Graph,
    pub gd_source_labels: HashSet<String>,
    pub g_source_labels: HashSet<String>,
    pub index: InvertedIndex,
    pub similarity: DefaultSimilarity,
}

fn load_label_set(flag: &'static str, path: &str) -> Result<HashSet<String>, GraphMatchError> {
    let reader = open_flagged(flag, path)?;
    let mut set = HashSet::new();
    for line in significant_lines(reader) {
        let (_, line) = line.map_err(|e| crate::io::parse_error(path, 0, e.to_string()))?;
        set.insert(line.trim().to_lowercase());
    }
    Ok(set)
}

impl MatchContext {
    pub fn load(cli: &Cli, matching: &MatchingConfig) -> Result<Self, GraphMatchError> {
        // Component (a) of the concurrency model: load G_D and G in
        // parallel — they share no state during parsing.
        let (gd_result, g_result) = rayon::join(
            || -> Result<Graph, GraphMatchError> {
                let vfile = open_flagged("gd-vfile", &cli.gd_vfile)?;
                let efile = open_flagged("gd-efile", &cli.gd_efile)?;
                Ok(load_graph(&cli.gd_vfile, vfile, &cli.gd_efile, efile)?)
            },
            || -> Result<Graph, GraphMatchError> {
                let vfile = open_flagged("g-vfile", &cli.g_vfile)?;
                let efile = open_flagged("g-efile", &cli.g_efile)?;
                Ok(load_graph(&cli.g_vfile, vfile, &cli.g_efile, efile)?)
            },
        );
        let gd = gd_result?;
        let g = g_result?;

        let gd_source_labels = load_label_set("gd-slabel-file", &cli.gd_slabel_file)?;
        let g_source_labels = load_label_set("g-slabel-file", &cli.g_slabel_file)?;

        let embeddings = match &cli.embedding_file {
            Some(path) => WordEmbeddings::load(path, open_flagged("embedding-file", path)?)?,
            None => WordEmbeddings::default(),
        };
        let synonyms = match &cli.synonym_file {
            Some(path) => SynonymTable::load(path, open_flagged("synonym-file", path)?)?,
            None => SynonymTable::default(),
        };
        let path_table = match &cli.path_file {
            Some(path) => Some(PathTable::load(path, open_flagged("path-file", path)?, g.vertex_map())?),
            None => None,
        };
        let descendant_table = match &cli.desc_file {
            Some(path) => Some(DescendantTable::load(
                path,
                open_flagged("desc-file", path)?,
                g.vertex_map(),
            )?),
            None => None,
        };

        let index = InvertedIndex::build(&g, &g_source_labels);
        let similarity = DefaultSimilarity::new(embeddings, synonyms, path_table, descendant_table, matching.bfs_depth);

        Ok(MatchContext {
            gd,
            g,
            gd_source_labels,
            g_source_labels,
            index,
            similarity,
        })
    }
}
