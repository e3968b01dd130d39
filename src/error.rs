use std::io;
use thiserror::Error;

use crate::replay::inflate::InflateError;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("short read: wanted {wanted} bytes")]
    ShortRead { wanted: usize },
    #[error("unexpected {what}: expected {expected:02x?}, found {found:02x?}")]
    FormatMismatch {
        what: &'static str,
        expected: Vec<u8>,
        found: Vec<u8>,
    },
    #[error("invalid header block length: {0}")]
    InvalidBlockLength(u32),
    #[error("decompress: {0}")]
    Decompression(io::Error),
    #[error("decompressed header exceeds limit of {limit} bytes")]
    DecompressionLimit { limit: u64 },
    #[error("unmapped {kind} code: {code}")]
    UnmappedCode { kind: &'static str, code: i64 },
    #[error("io: {0}")]
    Io(io::Error),
}

impl DecodeError {
    /// Classifies an error from the byte source for a read that wanted `wanted` bytes.
    pub(crate) fn from_io(err: io::Error, wanted: usize) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            return DecodeError::ShortRead { wanted };
        }

        let from_inflater = err
            .get_ref()
            .map_or(false, |inner| inner.is::<InflateError>());
        if !from_inflater {
            return DecodeError::Io(err);
        }

        match err.into_inner().map(|inner| inner.downcast::<InflateError>()) {
            Some(Ok(inflate)) => match *inflate {
                InflateError::Corrupt(source) => DecodeError::Decompression(source),
                InflateError::LimitExceeded { limit } => DecodeError::DecompressionLimit { limit },
            },
            _ => DecodeError::Decompression(io::Error::new(
                io::ErrorKind::InvalidData,
                "corrupt deflate stream",
            )),
        }
    }
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
