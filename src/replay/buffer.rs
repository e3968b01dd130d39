use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

use super::types::TaggedString;
use crate::error::{DecodeError, Result};

pub const TAGGED_STRING_MAGIC: [u8; 2] = [0x60, 0x0A];
pub const SEPARATOR: [u8; 4] = [0xA3, 0x5F, 0x02, 0x00];

/// Little-endian cursor over a sequential byte source that counts what it consumes.
#[derive(Debug)]
pub struct HeaderBuff<R> {
    inner: R,
    position: u64,
}

impl<R: Read> HeaderBuff<R> {
    pub fn new(inner: R) -> Self {
        HeaderBuff { inner, position: 0 }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    fn advance(&mut self, n: usize) {
        self.position += n as u64;
    }

    pub fn read_fixed(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; n];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| DecodeError::from_io(e, n))?;
        self.advance(n);
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| DecodeError::from_io(e, N))?;
        self.advance(N);
        Ok(buf)
    }

    /// Reads an `n` byte region without allocating it up front, so a bogus
    /// length fails as a short read instead of a huge allocation.
    pub fn read_block(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner)
            .take(n as u64)
            .read_to_end(&mut buf)
            .map_err(|e| DecodeError::from_io(e, n))?;
        if buf.len() < n {
            return Err(DecodeError::ShortRead { wanted: n });
        }
        self.advance(n);
        Ok(buf)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        let copied = io::copy(&mut (&mut self.inner).take(n as u64), &mut io::sink())
            .map_err(|e| DecodeError::from_io(e, n))?;
        if copied < n as u64 {
            return Err(DecodeError::ShortRead { wanted: n });
        }
        self.advance(n);
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.inner.read_u8().map_err(|e| DecodeError::from_io(e, 1))?;
        self.advance(1);
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let value = self
            .inner
            .read_u16::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(e, 2))?;
        self.advance(2);
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(e, 4))?;
        self.advance(4);
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let value = self
            .inner
            .read_u64::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(e, 8))?;
        self.advance(8);
        Ok(value)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self
            .inner
            .read_i32::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(e, 4))?;
        self.advance(4);
        Ok(value)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let value = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(e, 4))?;
        self.advance(4);
        Ok(value)
    }

    /// Only `0x01` is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? == 0x01)
    }

    pub fn read_cstring(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            match self.read_u8()? {
                0x00 => break,
                byte => bytes.push(byte),
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn read_tagged_string(&mut self) -> Result<TaggedString> {
        let magic = self.read_array::<2>()?;
        if magic != TAGGED_STRING_MAGIC {
            return Err(DecodeError::FormatMismatch {
                what: "tagged string marker",
                expected: TAGGED_STRING_MAGIC.to_vec(),
                found: magic.to_vec(),
            });
        }
        let length = self.read_u16()?;
        let value = self.read_fixed(length as usize)?;

        Ok(TaggedString { length, value })
    }

    pub fn expect_separator(&mut self) -> Result<()> {
        let found = self.read_array::<4>()?;
        if found != SEPARATOR {
            return Err(DecodeError::FormatMismatch {
                what: "separator",
                expected: SEPARATOR.to_vec(),
                found: found.to_vec(),
            });
        }
        Ok(())
    }
}
