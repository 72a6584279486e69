use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::DocumentId;

/// A single indexed page. `text` holds the normalized token stream joined
/// with single spaces.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub url: String,
    pub text: String,
    #[serde(rename = "norm", alias = "length_norm")]
    pub length_norm: f64,
}

impl Document {
    pub fn new<S: AsRef<str>>(id: DocumentId, title: &str, url: &str, tokens: &[S]) -> Document {
        let text = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let length_norm = Self::compute_length_norm(tokens);
        Document {
            id,
            title: title.to_string(),
            url: url.to_string(),
            text,
            length_norm,
        }
    }

    /// Euclidean norm of the document's term-frequency vector.
    pub fn compute_length_norm<S: AsRef<str>>(tokens: &[S]) -> f64 {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_ref()).or_insert(0) += 1;
        }
        counts
            .values()
            .map(|c| (*c as f64).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Whole-token occurrences of `term` in the document text.
    pub fn term_count(&self, term: &str) -> usize {
        self.terms().filter(|t| *t == term).count()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms().any(|t| t == term)
    }

    /// Leading excerpt of the text, cut on a character boundary.
    pub fn snippet(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_pos, _)) => format!("{}...", &self.text[..byte_pos]),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> Document {
        Document::new(0, "title", "https://example.org/", tokens)
    }

    #[test]
    fn test_text_is_joined_tokens() {
        let d = doc(&["grado", "ingenieria", "grado"]);
        assert_eq!(d.text, "grado ingenieria grado");
    }

    #[test]
    fn test_length_norm_is_tf_vector_norm() {
        // tf = {grado: 2, ingenieria: 1} => sqrt(4 + 1)
        let d = doc(&["grado", "ingenieria", "grado"]);
        assert!((d.length_norm - 5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_has_zero_norm() {
        let d = doc(&[]);
        assert_eq!(d.length_norm, 0.0);
        assert_eq!(d.text, "");
    }

    #[test]
    fn test_term_count_matches_whole_tokens_only() {
        let d = doc(&["master", "masters", "master"]);
        assert_eq!(d.term_count("master"), 2);
        assert_eq!(d.term_count("masters"), 1);
        assert_eq!(d.term_count("mast"), 0);
        assert!(!d.contains_term("mast"));
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let d = doc(&["añoñ", "ñu"]);
        assert_eq!(d.snippet(3), "año...");
        assert_eq!(d.snippet(7), "añoñ ñu");
        assert_eq!(d.snippet(100), "añoñ ñu");
    }
}
