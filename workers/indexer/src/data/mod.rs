use serde::{Deserialize, Serialize};
use thiserror::Error;

use boolsearch::IndexError;

pub static PAGE_FILE_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed page '{path}': {source}")]
    Page {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid page URL '{0}'")]
    InvalidUrl(String),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Html,
    Pdf,
    #[serde(other)]
    Text,
}

/// One page as written by the crawler: `{"url", "text", "type"}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CrawledPage {
    pub url: String,
    pub text: String,
    #[serde(rename = "type", default = "default_page_kind")]
    pub kind: PageKind,
}

fn default_page_kind() -> PageKind {
    PageKind::Html
}

pub mod pages;
