use std::path::PathBuf;

use anyhow::Context;
use boolsearch::{engine_error, BatchEntry, Retriever, RetrieverConfig, SearchResult};
use structopt::StructOpt;

/// Answer boolean queries (AND, OR, NOT, parentheses) against an index
/// snapshot built by the indexer.
#[derive(StructOpt, Debug)]
#[structopt(name = "retriever")]
struct Opt {
    /// Path of the index snapshot
    #[structopt(short = "i", long = "index-file", parse(from_os_str))]
    index_file: PathBuf,

    /// Query to resolve
    #[structopt(short = "q", long = "query", conflicts_with = "file", required_unless = "file")]
    query: Option<String>,

    /// Text file with one query per line
    #[structopt(short = "f", long = "file", parse(from_os_str))]
    file: Option<PathBuf>,

    /// Maximum number of results per query
    #[structopt(short = "n", long = "max-results")]
    max_results: Option<usize>,

    /// Characters of document text shown per result
    #[structopt(long = "snippet-length")]
    snippet_length: Option<usize>,

    /// Print results as JSON
    #[structopt(long)]
    json: bool,

    /// Enable debug logging
    #[structopt(short, long)]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct BatchRow<'a> {
    line: usize,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [SearchResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for BatchRow<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        let (results, error) = match &entry.outcome {
            Ok(results) => (Some(results.as_slice()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        BatchRow {
            line: entry.line,
            query: &entry.query,
            results,
            error,
        }
    }
}

fn config_from(opt: &Opt) -> RetrieverConfig {
    let mut config = RetrieverConfig::from_env();
    if let Some(max_results) = opt.max_results {
        config = config.with_max_results(max_results);
    }
    if let Some(snippet_length) = opt.snippet_length {
        config = config.with_snippet_length(snippet_length);
    }
    config
}

fn run(opt: Opt) -> anyhow::Result<()> {
    let config = config_from(&opt);
    let retriever = Retriever::load(&opt.index_file, config)
        .with_context(|| format!("cannot load index '{}'", opt.index_file.display()))?;

    if let Some(query) = opt.query.as_deref() {
        let results = retriever.search_str(query)?;
        if opt.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            for result in results.iter() {
                println!("{}", result);
            }
        }
    } else if let Some(file) = opt.file.as_ref() {
        let entries = retriever
            .search_from_file(file)
            .with_context(|| format!("cannot read queries from '{}'", file.display()))?;
        if opt.json {
            let rows: Vec<BatchRow> = entries.iter().map(BatchRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for entry in entries.iter() {
                println!("#### {} ####", entry.query);
                match &entry.outcome {
                    Ok(results) => results.iter().for_each(|r| println!("{}", r)),
                    Err(err) => println!("{}", err),
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    boolsearch::init_logging(opt.verbose);

    if let Err(err) = run(opt) {
        engine_error!("Retriever", "main", "{:#}", err);
        std::process::exit(1);
    }
}
