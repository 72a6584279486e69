use std::{cmp::Ordering, fmt::Display};

use crate::data::{index::Index, DocumentId};

/// Describes an expression node in the query AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Word(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn word<S: Into<String>>(word: S) -> Self {
        Expr::Word(word.into())
    }

    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Resolve the expression to the ascending ids of the matching documents.
    ///
    /// Terms missing from the index match nothing; `Not` complements against
    /// every document in `index`.
    pub fn evaluate(&self, index: &Index) -> Vec<DocumentId> {
        match self {
            Expr::Word(word) => index.postings_for(word).to_vec(),
            Expr::Not(inner) => complement(&inner.evaluate(index), index.len()),
            Expr::And(left, right) => intersect(&left.evaluate(index), &right.evaluate(index)),
            Expr::Or(left, right) => union(&left.evaluate(index), &right.evaluate(index)),
        }
    }

    /// Collect every [`Expr::Word`] term, left to right, duplicates included.
    pub fn collect_terms(&self) -> Vec<&str> {
        match self {
            Expr::Word(word) => vec![word.as_str()],
            Expr::Not(inner) => inner.collect_terms(),
            Expr::And(left, right) | Expr::Or(left, right) => {
                let mut terms = left.collect_terms();
                terms.extend(right.collect_terms());
                terms
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Word(word) => write!(f, "{}", word),
            Expr::Not(inner) => write!(f, "NOT ({})", inner),
            Expr::And(left, right) => write!(f, "({} AND {})", left, right),
            Expr::Or(left, right) => write!(f, "({} OR {})", left, right),
        }
    }
}

// The set operations below take and return ascending, duplicate-free slices.

fn intersect(left: &[DocumentId], right: &[DocumentId]) -> Vec<DocumentId> {
    let mut out = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn union(left: &[DocumentId], right: &[DocumentId]) -> Vec<DocumentId> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            Ordering::Less => {
                out.push(left[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(right[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}

fn complement(excluded: &[DocumentId], n_docs: usize) -> Vec<DocumentId> {
    let mut out = Vec::with_capacity(n_docs.saturating_sub(excluded.len()));
    let mut excluded = excluded.iter().peekable();
    for id in 0..n_docs {
        if excluded.peek() == Some(&&id) {
            excluded.next();
        } else {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::document::Document;

    /// Seven documents (ids 0..=6) with hand-written postings.
    fn fixture_index() -> Index {
        let mut postings = HashMap::new();
        postings.insert("grado".to_string(), vec![1, 2, 3]);
        postings.insert("master".to_string(), vec![3, 4, 5]);
        postings.insert("docencia".to_string(), vec![6]);
        let documents = (0..7)
            .map(|id| Document::new::<&str>(id, "", "", &[]))
            .collect();
        Index {
            postings,
            documents,
        }
    }

    #[test]
    fn test_word_lookup() {
        let index = fixture_index();
        assert_eq!(Expr::word("grado").evaluate(&index), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_word_is_empty() {
        let index = fixture_index();
        assert!(Expr::word("zzz_not_in_index").evaluate(&index).is_empty());
    }

    #[test]
    fn test_left_to_right_mixed_query() {
        // grado AND NOT master OR docencia
        let index = fixture_index();
        let expr = Expr::word("grado")
            .and(Expr::word("master").not())
            .or(Expr::word("docencia"));
        assert_eq!(expr.evaluate(&index), vec![1, 2, 6]);
    }

    #[test]
    fn test_grouped_query() {
        // (grado OR docencia) AND NOT master
        let index = fixture_index();
        let expr = Expr::word("grado")
            .or(Expr::word("docencia"))
            .and(Expr::word("master").not());
        assert_eq!(expr.evaluate(&index), vec![1, 2, 6]);
    }

    #[test]
    fn test_not_of_unknown_is_universe() {
        let index = fixture_index();
        assert_eq!(
            Expr::word("xyzzy").not().evaluate(&index),
            (0..7).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_collect_terms_keeps_order_and_duplicates() {
        let expr = Expr::word("a")
            .and(Expr::word("b").not())
            .or(Expr::word("a"));
        assert_eq!(expr.collect_terms(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_display_rendering() {
        let expr = Expr::word("grado")
            .and(Expr::word("master").not())
            .or(Expr::word("docencia"));
        assert_eq!(expr.to_string(), "((grado AND NOT (master)) OR docencia)");
    }

    #[test]
    fn test_set_helpers() {
        assert_eq!(intersect(&[1, 3, 5, 7], &[3, 4, 5]), vec![3, 5]);
        assert_eq!(union(&[1, 5], &[0, 5, 9]), vec![0, 1, 5, 9]);
        assert_eq!(complement(&[0, 2], 4), vec![1, 3]);
        assert_eq!(complement(&[], 2), vec![0, 1]);
    }
}
