//! Raw deflate stream over the compressed header block.
//!
//! The block is decompressed lazily: bytes are only inflated as the
//! [`HeaderBuff`](super::buffer::HeaderBuff) asks for them, so a truncated or
//! corrupt stream is noticed at the first field that reaches it.

use flate2::read::DeflateDecoder;
use std::io::{self, Read};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InflateError {
    #[error("corrupt deflate stream: {0}")]
    Corrupt(io::Error),
    #[error("decompressed header exceeds {limit} bytes")]
    LimitExceeded { limit: u64 },
}

pub struct Inflater<'a> {
    inner: DeflateDecoder<&'a [u8]>,
    produced: u64,
    limit: u64,
}

impl<'a> Inflater<'a> {
    pub fn new(compressed: &'a [u8], limit: u64) -> Self {
        Self {
            inner: DeflateDecoder::new(compressed),
            produced: 0,
            limit,
        }
    }

    pub fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    pub fn total_out(&self) -> u64 {
        self.produced
    }
}

impl Read for Inflater<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => {
                self.produced += n as u64;
                if self.produced > self.limit {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        InflateError::LimitExceeded { limit: self.limit },
                    ));
                }
                Ok(n)
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(err),
            Err(err) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                InflateError::Corrupt(err),
            )),
        }
    }
}
