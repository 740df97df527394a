//! Zlib compression adapter for stored frames.
//!
//! Frames are compressed before they hit the backend and decompressed after
//! retrieval. The pair is lossless: `decompress(compress(x)) == x`. A stream
//! that fails to decompress surfaces as [`StoreError::CorruptStream`] and is
//! never swallowed.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{StoreError, StoreResult};

/// Compress a byte buffer into a zlib stream.
pub fn compress(data: &[u8]) -> StoreResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a zlib stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> StoreResult<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| StoreError::CorruptStream(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_is_lossless() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn compresses_repetitive_input() {
        let data = vec![0x42u8; 4096];
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn empty_input_roundtrips() {
        let compressed = compress(b"").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn garbage_stream_is_corrupt() {
        let err = decompress(b"definitely not zlib").unwrap_err();
        assert!(matches!(err, StoreError::CorruptStream(_)));
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let compressed = compress(b"some payload worth truncating").unwrap();
        let err = decompress(&compressed[..compressed.len() / 2]).unwrap_err();
        assert!(matches!(err, StoreError::CorruptStream(_)));
    }
}
