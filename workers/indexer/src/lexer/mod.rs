//! Text normalization for crawled pages: HTML to text, punctuation and
//! stopword removal, lowercasing and tokenization.

use html5ever::{parse_document, tendril::TendrilSink, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::data::{CrawledPage, PageKind};

pub mod stopwords;

static PUNCTUATION: &str = "<>¿?,;:.()[]\"'¡!";

/// Elements of the page block whose text is indexed.
static CONTENT_TAGS: [&str; 7] = ["h1", "h2", "h3", "b", "i", "p", "a"];

fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(html)
}

fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn has_class(node: &Handle, class: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs.borrow().iter().any(|attr| {
            &*attr.name.local == "class" && attr.value.split_whitespace().any(|c| c == class)
        }),
        _ => false,
    }
}

/// First node, in document order, matching `pred`.
fn find_first(node: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    if pred(node) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_first(child, pred))
}

fn push_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if matches!(&*name.local, "script" | "style") => {}
        _ => {
            for child in node.children.borrow().iter() {
                push_text(child, out);
            }
        }
    }
}

/// Text of the outermost content elements below `node`; nested content
/// elements are covered by their ancestor and not repeated.
fn collect_content(node: &Handle, out: &mut Vec<String>) {
    for child in node.children.borrow().iter() {
        if tag_name(child).is_some_and(|tag| CONTENT_TAGS.contains(&tag)) {
            let mut text = String::new();
            push_text(child, &mut text);
            out.push(text);
        } else {
            collect_content(child, out);
        }
    }
}

/// Text of the headings, paragraphs, links and emphasis inside the first
/// `<div class="page">` block. Pages without that block have no indexable
/// text.
pub fn extract_html_text(html: &str) -> String {
    let dom = parse_html(html);
    let page = find_first(&dom.document, &|node: &Handle| {
        tag_name(node) == Some("div") && has_class(node, "page")
    });
    let Some(page) = page else {
        return String::new();
    };
    let mut texts = Vec::new();
    collect_content(&page, &mut texts);
    texts.join(" ")
}

pub fn extract_html_title(html: &str) -> Option<String> {
    let dom = parse_html(html);
    let title = find_first(&dom.document, &|node: &Handle| tag_name(node) == Some("title"))?;
    let mut raw = String::new();
    push_text(&title, &mut raw);
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Lowercased, punctuation free, stopword filtered tokens of `text`.
pub fn normalize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| match c {
            '\n' | '\t' | '\r' => ' ',
            _ => c,
        })
        .filter(|c| !PUNCTUATION.contains(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !stopwords::is_stopword(word))
        .map(|word| word.to_string())
        .collect()
}

/// Turns one crawled page into the title and token stream stored in the index.
pub struct DocumentLexer<'a> {
    page: &'a CrawledPage,
}

impl<'a> DocumentLexer<'a> {
    pub fn new(page: &'a CrawledPage) -> Self {
        DocumentLexer { page }
    }

    pub fn title(&self) -> String {
        let title = match self.page.kind {
            PageKind::Html => extract_html_title(&self.page.text),
            _ => None,
        };
        title.unwrap_or_else(|| self.page.url.clone())
    }

    pub fn tokens(&self) -> Vec<String> {
        match self.page.kind {
            PageKind::Html => normalize(&extract_html_text(&self.page.text)),
            _ => normalize(&self.page.text),
        }
    }
}
