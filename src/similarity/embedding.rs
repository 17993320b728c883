//! Word embedding table, bag-of-words vectorization, and cosine
//! similarity — the numeric fallback tier of the default `h_v`/`h_p`.

use crate::error::ParseError;
use crate::io::{file_name, parse_error, significant_lines};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

/// `word → dense vector`, loaded once from `embedding_file` (§6). The
/// dimension is inferred from the first line and every subsequent line
/// is checked against it.
#[derive(Debug, Default)]
pub struct WordEmbeddings {
    table: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl WordEmbeddings {
    pub fn load(path: &str, reader: BufReader<File>) -> Result<Self, ParseError> {
        let mut table = HashMap::new();
        let mut dim = 0usize;

        for line in significant_lines(reader) {
            let (line_no, line) = line.map_err(|e| parse_error(path, 0, e.to_string()))?;
            let mut it = line.split_whitespace();
            let word = it
                .next()
                .ok_or_else(|| parse_error(path, line_no, "empty embedding line"))?
                .to_lowercase();
            let values: Vec<f32> = it
                .map(|tok| {
                    tok.parse::<f32>()
                        .map_err(|_| parse_error(path, line_no, format!("bad float: {tok}")))
                })
                .collect::<Result<_, _>>()?;

            if dim == 0 {
                dim = values.len();
            } else if values.len() != dim {
                return Err(parse_error(
                    path,
                    line_no,
                    format!("bad word vector: seen unmatched dim {dim} vs {}", values.len()),
                ));
            }

            table.insert(word, values);
        }

        tracing::info!(file = %file_name(path), words = table.len(), dim, "loaded word embeddings");
        Ok(WordEmbeddings { table, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.table.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

const TOKEN_SEPARATORS: &[char] = &['\t', ' ', ',', ';', '|'];

/// Averages the embedding vectors of every recognized token in `text`.
/// Out-of-vocabulary tokens are skipped; an empty result (no token
/// matched) is a valid zero-similarity vector, not an error.
pub fn text_to_vector(embeddings: &WordEmbeddings, text: &str) -> Vec<f32> {
    let mut sum: Option<Vec<f32>> = None;
    let mut word_count = 0usize;

    for token in text.split(TOKEN_SEPARATORS) {
        if token.is_empty() {
            continue;
        }
        word_count += 1;
        if let Some(vec_of_word) = embeddings.get(token) {
            let acc = sum.get_or_insert_with(|| vec![0.0; vec_of_word.len()]);
            for (a, b) in acc.iter_mut().zip(vec_of_word) {
                *a += *b;
            }
        }
    }

    match sum {
        None => Vec::new(),
        Some(mut v) if word_count > 0 => {
            for x in &mut v {
                *x /= word_count as f32;
            }
            v
        }
        Some(v) => v,
    }
}

/// Cosine similarity between two dense vectors. Zero-length vectors
/// yield 0.0 rather than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)) as f64
}
