pub mod config;
pub mod error;
pub mod replay;
pub mod version;

use config::DecoderConfig;
use error::{DecodeError, Result};
use replay::types::RecordedGame;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use replay::{decode, decode_with_config};

pub fn load_replay_file<P: AsRef<Path>>(path: P) -> Result<RecordedGame> {
    load_replay_file_with_config(path, &DecoderConfig::default())
}

pub fn load_replay_file_with_config<P: AsRef<Path>>(
    path: P,
    config: &DecoderConfig,
) -> Result<RecordedGame> {
    let file = File::open(path).map_err(DecodeError::Io)?;
    decode_with_config(BufReader::new(file), config)
}
