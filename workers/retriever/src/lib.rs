//! Boolean query engine over an inverted index snapshot.
//!
//! Query text flows through the [`lexer`] module (tokenizer, parser, AST),
//! is resolved against a loaded [`data::index::Index`], and is ranked by the
//! [`search::Retriever`].
#![forbid(unsafe_code)]

pub mod config;
pub mod data;
pub mod lexer;
pub mod search;

pub use config::RetrieverConfig;
pub use data::{document::Document, index::Index, IndexError};
pub use lexer::{ast::Expr, parse_query, QueryError};
pub use search::{BatchEntry, Retriever, SearchResult};

/// Install the stderr `tracing` subscriber used by the binaries. `RUST_LOG`
/// directives win over the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[macro_export]
macro_rules! engine_log {
    ($module:expr, $context:expr, $msg:expr $(, $args:expr)* $(,)?) => {
        ::tracing::info!(
            "[{}][{}] {}",
            $module,
            $context,
            format!($msg $(, $args)*)
        )
    };
}

#[macro_export]
macro_rules! engine_warn {
    ($module:expr, $context:expr, $msg:expr $(, $args:expr)* $(,)?) => {
        ::tracing::warn!(
            "[{}][{}] {}",
            $module,
            $context,
            format!($msg $(, $args)*)
        )
    };
}

#[macro_export]
macro_rules! engine_error {
    ($module:expr, $context:expr, $msg:expr $(, $args:expr)* $(,)?) => {
        ::tracing::error!(
            "[{}][{}] {}",
            $module,
            $context,
            format!($msg $(, $args)*)
        )
    };
}

#[macro_export]
macro_rules! engine_debug {
    ($module:expr, $context:expr, $msg:expr $(, $args:expr)* $(,)?) => {
        ::tracing::debug!(
            "[{}][{}] {}",
            $module,
            $context,
            format!($msg $(, $args)*)
        )
    };
}
