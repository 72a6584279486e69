use std::{path::Path, time::Instant};

use boolsearch::{
    data::{encoding::save_index, index::IndexBuilder, index::IndexStats, DocumentId},
    engine_log, engine_warn, Index,
};
use url::Url;

use crate::{
    data::{pages::collect_pages, CrawledPage, IndexerError},
    lexer::DocumentLexer,
};

/// Accumulates crawled pages into an inverted index.
#[derive(Default)]
pub struct Indexer {
    builder: IndexBuilder,
    skipped: usize,
}

impl Indexer {
    pub fn new() -> Indexer {
        Indexer::default()
    }

    /// Normalize and index a single page, returning its document id.
    pub fn add_page(&mut self, page: &CrawledPage) -> Result<DocumentId, IndexerError> {
        let url = Url::parse(&page.url).map_err(|_| IndexerError::InvalidUrl(page.url.clone()))?;
        let lexer = DocumentLexer::new(page);
        let tokens = lexer.tokens();
        Ok(self
            .builder
            .add_document(&lexer.title(), url.as_str(), &tokens))
    }

    /// Index every page found below `dir`. Pages that cannot be indexed are
    /// skipped with a warning. Returns the number of pages indexed.
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize, IndexerError> {
        let context = dir.display().to_string();
        let mut added = 0usize;
        for (path, page) in collect_pages(dir)? {
            match self.add_page(&page) {
                Ok(_) => added += 1,
                Err(err) => {
                    self.skipped += 1;
                    engine_warn!("Indexer", &context, "{}: {}", path.display(), err);
                }
            }
        }
        Ok(added)
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Index {
        self.builder.build()
    }

    /// Build the index for `input_dir` and write its snapshot to `output`.
    pub fn run(input_dir: &Path, output: &Path) -> Result<IndexStats, IndexerError> {
        let started = Instant::now();
        let mut indexer = Indexer::new();
        indexer.add_directory(input_dir)?;
        let skipped = indexer.skipped();
        let index = indexer.finish();
        let elapsed = started.elapsed();

        save_index(&index, output)?;
        let stats = index.stats().with_building_time(elapsed);
        engine_log!(
            "Indexer",
            input_dir.display(),
            "words={}, docs={}, skipped={}, time={:?}",
            stats.n_words,
            stats.n_docs,
            skipped,
            stats.building_time
        );
        Ok(stats)
    }
}
