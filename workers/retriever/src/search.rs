//! Ranked retrieval: evaluates parsed queries against a loaded [`Index`],
//! scores the matches and keeps the best ones.

use std::{fmt::Display, fs, path::Path, sync::Arc, time::Instant};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    config::RetrieverConfig,
    data::{encoding::load_index, index::Index, DocumentId, IndexError},
    engine_debug, engine_log, engine_warn,
    lexer::{ast::Expr, parse_query, scoring::score_document, QueryError},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub doc_id: DocumentId,
    pub url: String,
    pub snippet: String,
    pub score: f64,
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {} -> {}", self.score, self.url, self.snippet)
    }
}

/// Outcome of one line of a query file. `query` is the canonical rendering of
/// the parsed query, or the trimmed raw line when it failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub line: usize,
    pub query: String,
    pub outcome: Result<Vec<SearchResult>, QueryError>,
}

/// Resolves queries against a shared, read-only index. Cheap to clone and
/// safe to use from many threads at once.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<Index>,
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(index: Index, config: RetrieverConfig) -> Retriever {
        Self::from_shared(Arc::new(index), config)
    }

    pub fn from_shared(index: Arc<Index>, config: RetrieverConfig) -> Retriever {
        Retriever { index, config }
    }

    /// Load the index snapshot at `path`. Any failure here is fatal for the
    /// caller: no query can be served without an index.
    pub fn load<P: AsRef<Path>>(path: P, config: RetrieverConfig) -> Result<Retriever, IndexError> {
        Ok(Self::new(load_index(path)?, config))
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Evaluate `query`, rank the matches by descending score (ties by
    /// ascending document id) and return at most `max_results` of them.
    pub fn search(&self, query: &Expr) -> Vec<SearchResult> {
        let terms = query.collect_terms();
        let matches = query.evaluate(&self.index);
        engine_debug!(
            "Retriever",
            query,
            "terms={:?}, matches={}",
            terms,
            matches.len()
        );

        let mut ranked: Vec<(DocumentId, f64)> = matches
            .into_iter()
            .filter_map(|id| {
                self.index
                    .document(id)
                    .map(|doc| (id, score_document(&terms, doc)))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.config.max_results);

        ranked
            .into_iter()
            .filter_map(|(id, score)| {
                let doc = self.index.document(id)?;
                Some(SearchResult {
                    doc_id: id,
                    url: doc.url.clone(),
                    snippet: doc.snippet(self.config.snippet_length),
                    score,
                })
            })
            .collect()
    }

    pub fn search_str(&self, query: &str) -> Result<Vec<SearchResult>, QueryError> {
        let ast = parse_query(query)?;
        Ok(self.search(&ast))
    }

    fn search_line(&self, line: usize, raw: &str) -> BatchEntry {
        match parse_query(raw) {
            Ok(ast) => BatchEntry {
                line,
                query: ast.to_string(),
                outcome: Ok(self.search(&ast)),
            },
            Err(err) => {
                engine_warn!("Retriever", line, "'{}': {}", raw.trim(), err);
                BatchEntry {
                    line,
                    query: raw.trim().to_string(),
                    outcome: Err(err),
                }
            }
        }
    }

    /// Resolve one query per line, in parallel. Every non-blank line gets its
    /// own entry, in input order; a malformed line only fails its own entry.
    /// Line numbers start at 1.
    pub fn search_batch<I, S>(&self, lines: I) -> Vec<BatchEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let queries: Vec<(usize, String)> = lines
            .into_iter()
            .enumerate()
            .map(|(n, line)| (n + 1, line.as_ref().to_string()))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        let entries: Vec<BatchEntry> = queries
            .par_iter()
            .map(|(line, raw)| self.search_line(*line, raw))
            .collect();

        let failed = entries.iter().filter(|e| e.outcome.is_err()).count();
        engine_log!(
            "Retriever",
            "batch",
            "solved {} queries ({} failed) in {:?}",
            entries.len(),
            failed,
            started.elapsed()
        );
        entries
    }

    pub fn search_from_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<Vec<BatchEntry>> {
        let contents = fs::read_to_string(path.as_ref())?;
        Ok(self.search_batch(contents.lines()))
    }
}
