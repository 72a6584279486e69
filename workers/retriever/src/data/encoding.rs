//! Snapshot codec for [`Index`].
//!
//! Layout, all integers little endian:
//!
//! ```text
//! magic "BSIX" | version u8 | payload_len u32 | sha256(payload) 32B | payload
//! ```
//!
//! The payload is the JSON encoding of the index.

use std::{
    fs,
    io::{Cursor, Read},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};
use sha2::{Digest, Sha256};

use crate::{
    data::{index::Index, IndexError, SNAPSHOT_MAGIC, SNAPSHOT_VERSION_V1},
    engine_debug, engine_log,
};

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = 4 + 1 + 4 + DIGEST_LEN;

fn checksum(payload: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hasher.finalize().into()
}

pub fn encode_snapshot(index: &Index) -> Result<Vec<u8>, IndexError> {
    let payload = serde_json::to_vec(index)?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        IndexError::InvalidIndex(format!("payload of {} bytes is too large", payload.len()))
    })?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(SNAPSHOT_MAGIC);
    out.push(SNAPSHOT_VERSION_V1);
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(&checksum(&payload));
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Index, IndexError> {
    if bytes.len() < HEADER_LEN {
        return Err(IndexError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| IndexError::BadMagic)?;
    if &magic != SNAPSHOT_MAGIC {
        return Err(IndexError::BadMagic);
    }

    let version = cursor.read_u8().map_err(|_| IndexError::BadMagic)?;
    if version == 0 || version > SNAPSHOT_VERSION_V1 {
        return Err(IndexError::UnsupportedVersion {
            expected: SNAPSHOT_VERSION_V1,
            actual: version,
        });
    }

    let payload_len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| IndexError::BadMagic)? as usize;
    let mut digest = [0u8; DIGEST_LEN];
    cursor
        .read_exact(&mut digest)
        .map_err(|_| IndexError::BadMagic)?;

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != payload_len {
        return Err(IndexError::Truncated {
            expected: HEADER_LEN + payload_len,
            actual: bytes.len(),
        });
    }
    if checksum(payload) != digest {
        return Err(IndexError::ChecksumMismatch);
    }

    let index: Index = serde_json::from_slice(payload)?;
    index.validate()?;
    Ok(index)
}

/// Read and decode a snapshot from disk.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<Index, IndexError> {
    let path = path.as_ref();
    let location = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| IndexError::Io {
        path: location.clone(),
        source,
    })?;
    engine_debug!("Snapshot", &location, "read {} bytes", bytes.len());

    let index = decode_snapshot(&bytes)?;
    let stats = index.stats();
    engine_log!(
        "Snapshot",
        &location,
        "loaded index words={}, docs={}",
        stats.n_words,
        stats.n_docs
    );
    Ok(index)
}

pub fn save_index<P: AsRef<Path>>(index: &Index, path: P) -> Result<(), IndexError> {
    let path = path.as_ref();
    let location = path.display().to_string();
    let bytes = encode_snapshot(index)?;
    fs::write(path, &bytes).map_err(|source| IndexError::Io {
        path: location.clone(),
        source,
    })?;
    engine_log!("Snapshot", &location, "wrote {} bytes", bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::index::IndexBuilder;

    fn sample_index() -> Index {
        let mut builder = IndexBuilder::new();
        builder.add_document("uno", "https://uno.example/", &["grado", "master"]);
        builder.add_document("dos", "https://dos.example/", &["docencia"]);
        builder.build()
    }

    #[test]
    fn test_snapshot_restores_index() {
        let index = sample_index();
        let bytes = encode_snapshot(&index).unwrap();
        assert_eq!(&bytes[..4], SNAPSHOT_MAGIC);
        assert_eq!(decode_snapshot(&bytes).unwrap(), index);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut bytes = encode_snapshot(&sample_index()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode_snapshot(&bytes), Err(IndexError::BadMagic)));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let mut bytes = encode_snapshot(&sample_index()).unwrap();
        bytes[4] = SNAPSHOT_VERSION_V1 + 1;
        assert!(matches!(
            decode_snapshot(&bytes),
            Err(IndexError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_corrupt_payload_fails_checksum() {
        let mut bytes = encode_snapshot(&sample_index()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert!(matches!(
            decode_snapshot(&bytes),
            Err(IndexError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_truncated_snapshot_is_rejected() {
        let bytes = encode_snapshot(&sample_index()).unwrap();
        assert!(matches!(
            decode_snapshot(&bytes[..bytes.len() - 3]),
            Err(IndexError::Truncated { .. })
        ));
        assert!(matches!(
            decode_snapshot(&bytes[..10]),
            Err(IndexError::Truncated { .. })
        ));
    }

    #[test]
    fn test_header_records_payload_length() {
        let bytes = encode_snapshot(&sample_index()).unwrap();
        let mut len = [0u8; 4];
        len.copy_from_slice(&bytes[5..9]);
        assert_eq!(u32::from_le_bytes(len) as usize, bytes.len() - HEADER_LEN);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_index(dir.path().join("missing.idx")).unwrap_err();
        match err {
            IndexError::Io { path, .. } => assert!(path.ends_with("missing.idx")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_into_missing_directory_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("absent").join("index.idx");
        match save_index(&sample_index(), &target).unwrap_err() {
            IndexError::Io { path, .. } => assert_eq!(path, target.display().to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.idx");
        let index = sample_index();
        save_index(&index, &path).unwrap();
        assert_eq!(load_index(&path).unwrap(), index);
    }
}
