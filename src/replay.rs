pub mod buffer;
pub mod codes;
pub mod decoder;
pub mod gates;
pub mod inflate;
pub mod types;

#[cfg(test)]
pub(crate) mod fixture;

use crate::config::DecoderConfig;
use crate::error::Result;
use decoder::HeaderDecoder;
use std::io::Read;
use types::RecordedGame;

/// Decodes the header of a recorded game with the default configuration.
///
/// `source` must be positioned at the start of the file. Only the header
/// block is consumed; the body that follows it is left unread.
pub fn decode<R: Read>(source: R) -> Result<RecordedGame> {
    decode_with_config(source, &DecoderConfig::default())
}

pub fn decode_with_config<R: Read>(source: R, config: &DecoderConfig) -> Result<RecordedGame> {
    let header = HeaderDecoder::new(config).decode(source)?;

    Ok(RecordedGame { header })
}
