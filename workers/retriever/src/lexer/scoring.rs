use std::collections::HashMap;

use crate::data::document::Document;

/// Score a single document against the literal terms of a query.
///
/// `tf` sums the occurrences of every query term (repeated terms count again),
/// `acc` sums the squared query multiplicity of each distinct term present in
/// the document, and the score is `tf / (length_norm * sqrt(acc))`. Documents
/// sharing no term with the query score `0.0`.
pub fn score_document(terms: &[&str], document: &Document) -> f64 {
    let mut doc_tf: HashMap<&str, usize> = HashMap::new();
    for token in document.terms() {
        *doc_tf.entry(token).or_insert(0) += 1;
    }

    let mut query_tf: HashMap<String, usize> = HashMap::new();
    for term in terms {
        *query_tf.entry(term.to_lowercase()).or_insert(0) += 1;
    }

    let mut tf = 0usize;
    let mut acc = 0f64;
    for (term, multiplicity) in query_tf.iter() {
        let occurrences = doc_tf.get(term.as_str()).copied().unwrap_or(0);
        tf += occurrences * multiplicity;
        if occurrences > 0 {
            acc += (*multiplicity as f64).powi(2);
        }
    }

    if acc == 0.0 || document.length_norm == 0.0 {
        return 0.0;
    }
    tf as f64 / (document.length_norm * acc.sqrt())
}
