//! A flat, symmetric synonym table loaded from a CSV of
//! `word_a,word_b,score` triples — the first similarity tier checked
//! before falling back to embeddings in the default `h_v`/`h_p`.

use crate::error::ParseError;
use crate::io::{file_name, parse_error, significant_lines};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

#[derive(Debug, Default)]
pub struct SynonymTable {
    scores: HashMap<(String, String), f64>,
}

impl SynonymTable {
    /// Loads `word_a,word_b,score` lines. `score` must be in `(0, 1]`.
    /// Each row is inserted symmetrically — `lookup(a, b)` and
    /// `lookup(b, a)` agree.
    pub fn load(path: &str, reader: BufReader<File>) -> Result<Self, ParseError> {
        let mut scores = HashMap::new();

        for line in significant_lines(reader) {
            let (line_no, line) = line.map_err(|e| parse_error(path, 0, e.to_string()))?;
            let mut fields = line.split(',');
            let word_a = fields
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| parse_error(path, line_no, "expected 'word_a,word_b,score'"))?
                .trim()
                .to_lowercase();
            let word_b = fields
                .next()
                .ok_or_else(|| parse_error(path, line_no, "expected 'word_a,word_b,score'"))?
                .trim()
                .to_lowercase();
            let score_str = fields
                .next()
                .ok_or_else(|| parse_error(path, line_no, "expected 'word_a,word_b,score'"))?
                .trim();
            let score: f64 = score_str
                .parse()
                .map_err(|_| parse_error(path, line_no, format!("invalid score: {score_str}")))?;
            if !(0.0 < score && score <= 1.0) {
                return Err(parse_error(
                    path,
                    line_no,
                    format!("score out of range (0,1]: {score}"),
                ));
            }

            scores.insert((word_a.clone(), word_b.clone()), score);
            scores.insert((word_b, word_a), score);
        }

        tracing::info!(file = %file_name(path), pairs = scores.len() / 2, "loaded synonym table");
        Ok(SynonymTable { scores })
    }

    /// `None` if the pair has no recorded synonym score.
    pub fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        self.scores.get(&(a.to_string(), b.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
