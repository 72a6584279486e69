use std::{
    fs,
    path::{Path, PathBuf},
};

use boolsearch::{engine_debug, engine_warn};

use crate::data::{CrawledPage, IndexerError, PAGE_FILE_EXTENSION};

fn io_error(path: &Path, source: std::io::Error) -> IndexerError {
    IndexerError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Every page file under `dir`, recursively, in sorted path order so that
/// document ids are reproducible between runs.
pub fn page_files(dir: &Path) -> Result<Vec<PathBuf>, IndexerError> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).map_err(|e| io_error(&current, e))? {
            let path = entry.map_err(|e| io_error(&current, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some(PAGE_FILE_EXTENSION) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

pub fn read_page(path: &Path) -> Result<CrawledPage, IndexerError> {
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&raw).map_err(|source| IndexerError::Page {
        path: path.display().to_string(),
        source,
    })
}

/// Load all crawled pages below `dir`. Unreadable or malformed files are
/// logged and skipped; only a failure to walk `dir` itself is an error.
pub fn collect_pages(dir: &Path) -> Result<Vec<(PathBuf, CrawledPage)>, IndexerError> {
    let files = page_files(dir)?;
    let context = dir.display().to_string();
    engine_debug!("Pages", &context, "found {} page files", files.len());

    let mut pages = Vec::with_capacity(files.len());
    for path in files {
        match read_page(&path) {
            Ok(page) => pages.push((path, page)),
            Err(err) => engine_warn!("Pages", &context, "skipping page: {}", err),
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PageKind;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_collects_nested_pages_in_sorted_order() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "www.ulpgc.es/b/content.json",
            r#"{"url": "https://www.ulpgc.es/b", "text": "b", "type": "html"}"#,
        );
        write(
            tmp.path(),
            "www.ulpgc.es/a/content.json",
            r#"{"url": "https://www.ulpgc.es/a", "text": "a", "type": "pdf"}"#,
        );
        write(tmp.path(), "www.ulpgc.es/a/notes.txt", "ignored");

        let pages = collect_pages(tmp.path()).unwrap();
        let urls: Vec<&str> = pages.iter().map(|(_, p)| p.url.as_str()).collect();
        assert_eq!(urls, vec!["https://www.ulpgc.es/a", "https://www.ulpgc.es/b"]);
        assert_eq!(pages[0].1.kind, PageKind::Pdf);
        assert_eq!(pages[1].1.kind, PageKind::Html);
    }

    #[test]
    fn test_malformed_pages_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "bad/content.json", "{ not json");
        write(
            tmp.path(),
            "good/content.json",
            r#"{"url": "https://example.org/", "text": "hola"}"#,
        );

        let pages = collect_pages(tmp.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].1.kind, PageKind::Html);
    }

    #[test]
    fn test_unknown_page_type_is_text() {
        let page: CrawledPage =
            serde_json::from_str(r#"{"url": "u", "text": "t", "type": "markdown"}"#).unwrap();
        assert_eq!(page.kind, PageKind::Text);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_pages(&tmp.path().join("absent")),
            Err(IndexerError::Io { .. })
        ));
    }
}
