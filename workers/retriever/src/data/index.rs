use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::data::{document::Document, DocumentId, IndexError, Postings};

/// Inverted index: lowercased term -> postings, plus the document table the
/// postings point into. Read-only once built.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Index {
    pub postings: HashMap<String, Postings>,
    pub documents: Vec<Document>,
}

impl Index {
    /// Postings for the lowercased `term`, or an empty slice when the term
    /// was never indexed.
    pub fn postings_for(&self, term: &str) -> &[DocumentId] {
        self.postings
            .get(&term.to_lowercase())
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Every document id known to the index, ascending.
    pub fn universe(&self) -> impl Iterator<Item = DocumentId> {
        0..self.documents.len()
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            n_words: self.postings.len(),
            n_docs: self.documents.len(),
            building_time: Duration::ZERO,
        }
    }

    /// Check the structural invariants: sequential document ids, postings that
    /// only reference existing documents, ascending unique postings lists.
    pub fn validate(&self) -> Result<(), IndexError> {
        for (position, document) in self.documents.iter().enumerate() {
            if document.id != position {
                return Err(IndexError::InvalidIndex(format!(
                    "document at position {} has id {}",
                    position, document.id
                )));
            }
        }

        let n_docs = self.documents.len();
        for (term, postings) in self.postings.iter() {
            if let Some(bad) = postings.iter().find(|id| **id >= n_docs) {
                return Err(IndexError::InvalidIndex(format!(
                    "postings for '{}' reference unknown document {}",
                    term, bad
                )));
            }
            if postings.windows(2).any(|w| w[0] >= w[1]) {
                return Err(IndexError::InvalidIndex(format!(
                    "postings for '{}' are not strictly ascending",
                    term
                )));
            }
        }
        Ok(())
    }
}

/// Incrementally assembles an [`Index`] from normalized documents.
#[derive(Default)]
pub struct IndexBuilder {
    index: Index,
}

impl IndexBuilder {
    pub fn new() -> IndexBuilder {
        IndexBuilder::default()
    }

    /// Append a document and register it in the postings of each distinct
    /// token. Returns the id assigned to the document.
    pub fn add_document<S: AsRef<str>>(&mut self, title: &str, url: &str, tokens: &[S]) -> DocumentId {
        let id = self.index.documents.len();
        self.index
            .documents
            .push(Document::new(id, title, url, tokens));

        let mut seen: HashSet<&str> = HashSet::new();
        for token in tokens.iter().map(|t| t.as_ref()) {
            if seen.insert(token) {
                self.index
                    .postings
                    .entry(token.to_string())
                    .or_default()
                    .push(id);
            }
        }
        id
    }

    pub fn len(&self) -> usize {
        self.index.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.documents.is_empty()
    }

    pub fn build(self) -> Index {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub n_words: usize,
    pub n_docs: usize,
    pub building_time: Duration,
}

impl IndexStats {
    pub fn with_building_time(mut self, building_time: Duration) -> IndexStats {
        self.building_time = building_time;
        self
    }
}

impl Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Words: {}\nDocs: {}\nTime: {}",
            self.n_words,
            self.n_docs,
            self.building_time.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> Index {
        let mut builder = IndexBuilder::new();
        builder.add_document("a", "https://a.example/", &["grado", "master"]);
        builder.add_document("b", "https://b.example/", &["grado", "grado"]);
        builder.add_document("c", "https://c.example/", &["docencia"]);
        builder.build()
    }

    #[test]
    fn test_builder_assigns_sequential_ids() {
        let index = sample_index();
        for (position, doc) in index.documents.iter().enumerate() {
            assert_eq!(doc.id, position);
        }
    }

    #[test]
    fn test_postings_reference_the_documents_containing_the_term() {
        let index = sample_index();
        for (term, postings) in index.postings.iter() {
            let expected: Vec<DocumentId> = index
                .documents
                .iter()
                .filter(|d| d.contains_term(term))
                .map(|d| d.id)
                .collect();
            assert_eq!(postings, &expected, "postings for {}", term);
        }
        assert_eq!(index.postings_for("grado"), &[0, 1]);
        assert_eq!(index.postings_for("docencia"), &[2]);
    }

    #[test]
    fn test_first_document_is_in_postings() {
        let mut builder = IndexBuilder::new();
        let id = builder.add_document("only", "https://only.example/", &["solo"]);
        let index = builder.build();
        assert_eq!(id, 0);
        assert_eq!(index.postings_for("solo"), &[0]);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_unknown_term_has_empty_postings() {
        let index = sample_index();
        assert!(index.postings_for("zzz_not_in_index").is_empty());
    }

    #[test]
    fn test_lookup_lowercases_the_term() {
        let index = sample_index();
        assert_eq!(index.postings_for("GRADO"), &[0, 1]);
        assert_eq!(index.postings_for("Docencia"), &[2]);
    }

    #[test]
    fn test_uppercase_keys_are_not_reachable() {
        let mut index = sample_index();
        index.postings.insert("BECAS".to_string(), vec![2]);
        assert!(index.postings_for("BECAS").is_empty());
        assert!(index.postings_for("becas").is_empty());
    }

    #[test]
    fn test_universe_covers_all_documents() {
        let index = sample_index();
        assert_eq!(index.universe().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_postings() {
        let mut index = sample_index();
        index.postings.insert("ghost".to_string(), vec![7]);
        assert!(matches!(index.validate(), Err(IndexError::InvalidIndex(_))));
    }

    #[test]
    fn test_validate_rejects_misnumbered_documents() {
        let mut index = sample_index();
        index.documents[1].id = 2;
        assert!(matches!(index.validate(), Err(IndexError::InvalidIndex(_))));
    }

    #[test]
    fn test_stats_display() {
        let stats = sample_index().stats();
        assert_eq!(stats.to_string(), "Words: 3\nDocs: 3\nTime: 0");

        let timed = stats.with_building_time(Duration::from_millis(1500));
        assert_eq!(timed.to_string(), "Words: 3\nDocs: 3\nTime: 1.5");
    }
}
