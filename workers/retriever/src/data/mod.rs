use thiserror::Error;

pub type DocumentId = usize;

/// Postings list: ascending, unique ids of the documents containing a term.
pub type Postings = Vec<DocumentId>;

pub static SNAPSHOT_MAGIC: &[u8; 4] = b"BSIX";

pub const SNAPSHOT_VERSION_V1: u8 = 1u8;

/// Failure to load, decode or validate an index snapshot. Always fatal for
/// the process serving queries.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read index snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Not an index snapshot (bad magic bytes)")]
    BadMagic,
    #[error("Unsupported snapshot version {actual}, expected <= {expected}")]
    UnsupportedVersion { expected: u8, actual: u8 },
    #[error("Snapshot truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("Snapshot checksum mismatch, the payload is corrupt")]
    ChecksumMismatch,
    #[error("Serialization/Deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid index: {0}")]
    InvalidIndex(String),
}

pub mod document;
pub mod encoding;
pub mod index;
