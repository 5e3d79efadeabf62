//! TF-IDF vectors with cosine scoring.
//!
//! ## Algorithm
//! 1. Tokenize: split on anything that isn't a letter or digit, keep tokens
//!    of two or more characters, drop stop words
//! 2. Vocabulary: every surviving token, indexed in sorted order
//! 3. IDF (smoothed): ln((1 + n) / (1 + df)) + 1
//! 4. Rows: raw term counts times IDF, L2-normalized
//! 5. Score: dot product of the normalized query and row vectors
//!
//! The query is transformed with the fitted vocabulary; unseen terms are
//! ignored, never added.

use super::ContentSimilarity;
use crate::error::{PipelineError, Result};
use crate::stopwords::{Language, is_stop_word};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Document used to refit when the real corpus has no usable terms
pub const FALLBACK_DOCUMENT: &str = "event activity";

/// Sparse vector as (term index, weight), sorted by term index
pub type SparseVector = Vec<(usize, f32)>;

/// Fitted vocabulary, IDF weights and one normalized row per document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    languages: Vec<Language>,
    rows: Vec<SparseVector>,
    /// True when the rows came from the synthetic fallback corpus
    fallback: bool,
}

impl TfIdfIndex {
    /// Fit over a corpus.
    ///
    /// Fails with [`PipelineError::DegenerateCorpus`] when no document has
    /// a single term left after stop-word removal.
    pub fn fit(documents: &[String], languages: &[Language]) -> Result<Self> {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|document| tokenize(document, languages))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(PipelineError::DegenerateCorpus {
                documents: documents.len(),
            });
        }

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            languages: languages.to_vec(),
            rows: Vec::new(),
            fallback: false,
        };
        index.rows = tokenized
            .par_iter()
            .map(|tokens| index.vectorize(tokens))
            .collect();

        debug!(
            "Fitted TF-IDF over {} documents ({} terms)",
            index.rows.len(),
            index.idf.len()
        );
        Ok(index)
    }

    /// Fit over a corpus, refitting on a synthetic corpus of the same size
    /// when the real one is degenerate.
    pub fn fit_or_fallback(documents: &[String], languages: &[Language]) -> Self {
        match Self::fit(documents, languages) {
            Ok(index) => index,
            Err(err) => {
                warn!("{err}; refitting on synthetic corpus");
                let synthetic = vec![FALLBACK_DOCUMENT.to_string(); documents.len().max(1)];
                // The synthetic document never tokenizes to nothing
                let mut index = Self::fit(&synthetic, &[]).unwrap_or_else(|_| Self::empty());
                index.rows.truncate(documents.len());
                index.languages = languages.to_vec();
                index.fallback = true;
                index
            }
        }
    }

    fn empty() -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            languages: Vec::new(),
            rows: Vec::new(),
            fallback: true,
        }
    }

    /// Vectorize text with the fitted vocabulary
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&tokenize(text, &self.languages))
    }

    /// Number of terms in the vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// True when the index was refit on the synthetic corpus
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Stop-word languages the vocabulary was fitted with
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn row(&self, row: usize) -> Option<&SparseVector> {
        self.rows.get(row)
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokens {
            if let Some(&term) = self.vocabulary.get(token) {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(term, count)| (term, count * self.idf[term]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }
}

impl ContentSimilarity for TfIdfIndex {
    fn name(&self) -> &str {
        "TfIdf"
    }

    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn scores(&self, interests: &[String]) -> Vec<f32> {
        let query = self.transform(&interests.join(" "));
        self.rows
            .par_iter()
            .map(|row| dot(row, &query).clamp(0.0, 1.0))
            .collect()
    }
}

/// Split into lower-cased word tokens of two or more characters, minus stop words
pub fn tokenize(text: &str, languages: &[Language]) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token, languages))
        .collect()
}

/// Dot product of two sparse vectors sorted by term index
fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn interests(items: &[&str]) -> Vec<String> {
        docs(items)
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("The Jazz night, at the club! a 42", &[Language::English]);
        assert_eq!(tokens, vec!["jazz", "night", "club", "42"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let index = TfIdfIndex::fit(&docs(&["music", "food music"]), &[Language::English]).unwrap();
        assert_eq!(index.vocabulary_size(), 2);

        // "food" (index 0) appears in one of two documents, "music" in both
        assert!((index.idf[0] - ((3.0f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
        assert!((index.idf[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rows_are_normalized() {
        let index =
            TfIdfIndex::fit(&docs(&["jazz live music", "food wine"]), &[Language::English]).unwrap();

        for row in 0..index.rows() {
            let norm: f32 = index.row(row).unwrap().iter().map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cosine_scores() {
        let index = TfIdfIndex::fit(&docs(&["music", "food music", "painting"]), &[Language::English])
            .unwrap();

        let scores = index.scores(&interests(&["music"]));
        assert!((scores[0] - 1.0).abs() < 1e-5);
        assert!(scores[1] > 0.0 && scores[1] < 1.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_unseen_query_terms_are_ignored() {
        let index = TfIdfIndex::fit(&docs(&["music"]), &[Language::English]).unwrap();
        let scores = index.scores(&interests(&["astronomy"]));
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_degenerate_corpus() {
        let corpus = docs(&["the and of", "a"]);
        assert!(matches!(
            TfIdfIndex::fit(&corpus, &[Language::English]),
            Err(PipelineError::DegenerateCorpus { documents: 2 })
        ));

        let index = TfIdfIndex::fit_or_fallback(&corpus, &[Language::English]);
        assert!(index.is_fallback());
        assert_eq!(index.rows(), 2);

        // Fallback users share "activity" with the synthetic rows
        let scores = index.scores(&interests(&["meetup", "social", "activity"]));
        assert!(scores.iter().all(|s| *s > 0.0 && *s <= 1.0));
    }
}
