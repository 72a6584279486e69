//! Builds boolsearch index snapshots from the pages written by the crawler.
#![forbid(unsafe_code)]

pub mod data;
pub mod indexer;
pub mod lexer;

pub use data::{CrawledPage, IndexerError, PageKind};
pub use indexer::Indexer;
