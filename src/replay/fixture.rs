//! Synthetic header builder for tests.

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

use super::buffer::{SEPARATOR, TAGGED_STRING_MAGIC};
use super::decoder::HeaderDecoder;
use super::types::{GameSettings, MAX_PLAYERS, NUM_STRATEGIC_NUMBERS, NUM_STRING_SLOTS};
use crate::config::DecoderConfig;

#[derive(Default)]
struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn u8(&mut self, value: u8) {
        self.out.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.out.write_u16::<LittleEndian>(value).unwrap();
    }

    fn u32(&mut self, value: u32) {
        self.out.write_u32::<LittleEndian>(value).unwrap();
    }

    fn u64(&mut self, value: u64) {
        self.out.write_u64::<LittleEndian>(value).unwrap();
    }

    fn i32(&mut self, value: i32) {
        self.out.write_i32::<LittleEndian>(value).unwrap();
    }

    fn f32(&mut self, value: f32) {
        self.out.write_f32::<LittleEndian>(value).unwrap();
    }

    fn zeros(&mut self, n: usize) {
        self.out.resize(self.out.len() + n, 0);
    }

    fn bytes(&mut self, value: &[u8]) {
        self.out.extend_from_slice(value);
    }

    fn separator(&mut self) {
        self.out.extend_from_slice(&SEPARATOR);
    }

    fn tagged(&mut self, value: &str) {
        self.out.extend_from_slice(&TAGGED_STRING_MAGIC);
        self.u16(value.len() as u16);
        self.out.extend_from_slice(value.as_bytes());
    }
}

struct Offsets {
    first_separator: usize,
    after_string_slot: Vec<usize>,
}

/// Opaque bytes of one player slot.
#[derive(Clone, Copy, Default)]
struct PlayerRegions {
    dat_crc: [u8; 8],
    reserved: [u8; 3],
    reserved2: [u8; 4],
}

#[derive(Clone)]
struct AiFileEntry {
    unknown: [u8; 4],
    name: String,
    unknown2: [u8; 4],
}

#[derive(Clone)]
pub struct HeaderFixture {
    save_version: f32,
    dlc_ids: Vec<u32>,
    difficulty: u32,
    victory_type: u32,
    num_players: u32,
    player_names: Vec<String>,
    list_codes: Vec<Vec<u32>>,
    strategic_numbers: [i32; NUM_STRATEGIC_NUMBERS],
    player_regions: Vec<PlayerRegions>,
    ai_files: Vec<AiFileEntry>,
    guid_tail: [u8; 8],
    lobby_name: String,
    legacy_string: String,
    has_ai: u32,
    timing_players: (u8, u16),
}

impl HeaderFixture {
    pub fn new(save_version: f32) -> Self {
        HeaderFixture {
            save_version,
            dlc_ids: Vec::new(),
            difficulty: 0,
            victory_type: 0,
            num_players: 0,
            player_names: vec![String::new(); MAX_PLAYERS],
            list_codes: vec![vec![0]; NUM_STRING_SLOTS],
            strategic_numbers: [0; NUM_STRATEGIC_NUMBERS],
            player_regions: vec![PlayerRegions::default(); MAX_PLAYERS],
            ai_files: Vec::new(),
            guid_tail: [0; 8],
            lobby_name: String::new(),
            legacy_string: String::new(),
            has_ai: 0,
            timing_players: (0, 0),
        }
    }

    pub fn dlc_ids(mut self, ids: &[u32]) -> Self {
        self.dlc_ids = ids.to_vec();
        self
    }

    pub fn difficulty(mut self, code: u32) -> Self {
        self.difficulty = code;
        self
    }

    pub fn victory_type(mut self, code: u32) -> Self {
        self.victory_type = code;
        self
    }

    pub fn num_players(mut self, num_players: u32) -> Self {
        self.num_players = num_players;
        self
    }

    pub fn player_name(mut self, slot: usize, name: &str) -> Self {
        self.player_names[slot] = name.to_string();
        self
    }

    /// Codes written after string slot `slot`, in order, with no terminal code added.
    pub fn list_codes(mut self, slot: usize, codes: &[u32]) -> Self {
        self.list_codes[slot] = codes.to_vec();
        self
    }

    pub fn strategic_number(mut self, index: usize, value: i32) -> Self {
        self.strategic_numbers[index] = value;
        self
    }

    pub fn player_regions(
        mut self,
        slot: usize,
        dat_crc: [u8; 8],
        reserved: [u8; 3],
        reserved2: [u8; 4],
    ) -> Self {
        self.player_regions[slot] = PlayerRegions {
            dat_crc,
            reserved,
            reserved2,
        };
        self
    }

    pub fn ai_file(self, name: &str) -> Self {
        self.ai_file_with_regions(name, [0; 4], [0; 4])
    }

    /// AI file entry with the given bytes around its name.
    pub fn ai_file_with_regions(
        mut self,
        name: &str,
        unknown: [u8; 4],
        unknown2: [u8; 4],
    ) -> Self {
        self.ai_files.push(AiFileEntry {
            unknown,
            name: name.to_string(),
            unknown2,
        });
        self
    }

    /// Last eight bytes of the game GUID.
    pub fn guid_tail(mut self, data4: [u8; 8]) -> Self {
        self.guid_tail = data4;
        self
    }

    pub fn lobby_name(mut self, name: &str) -> Self {
        self.lobby_name = name.to_string();
        self
    }

    /// String of the pre-13.17 legacy block.
    pub fn legacy_string(mut self, value: &str) -> Self {
        self.legacy_string = value.to_string();
        self
    }

    pub fn has_ai(self, has_ai: bool) -> Self {
        self.has_ai_flag(u32::from(has_ai))
    }

    /// Raw has-AI dword; any nonzero value is followed by the AI data region.
    pub fn has_ai_flag(mut self, raw: u32) -> Self {
        self.has_ai = raw;
        self
    }

    pub fn timing_players(mut self, with_gaia: u8, rec_player: u16) -> Self {
        self.timing_players = (with_gaia, rec_player);
        self
    }

    /// Inflated header bytes.
    pub fn payload(&self) -> Vec<u8> {
        self.write().0
    }

    /// Deflated header behind its length prefix and the uninterpreted dword.
    pub fn container(&self) -> Vec<u8> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.payload()).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut w = Writer::default();
        w.u32(8 + compressed.len() as u32);
        w.u32(0);
        w.out.extend_from_slice(&compressed);
        w.out
    }

    pub fn first_separator_offset(&self) -> usize {
        self.write().1.first_separator
    }

    pub fn offset_after_string_slot(&self, slot: usize) -> usize {
        self.write().1.after_string_slot[slot]
    }

    fn write(&self) -> (Vec<u8>, Offsets) {
        let v = self.save_version;
        let mut w = Writer::default();

        w.out.extend_from_slice(b"VER 9.4\0");
        w.f32(v);
        w.f32(v);
        w.u32(0);
        w.u32(0);
        w.u32(self.dlc_ids.len() as u32);
        for id in &self.dlc_ids {
            w.u32(*id);
        }
        w.u32(0);
        w.u32(self.difficulty);
        w.u32(0);
        w.u32(0);
        w.u32(0);
        w.u32(self.victory_type);
        w.i32(0);
        w.i32(0);
        w.i32(0);
        w.u32(0);

        let first_separator = w.out.len();
        w.separator();
        w.separator();

        w.f32(1.7);
        w.u32(0);
        w.u32(200);
        w.u32(self.num_players);
        w.u32(0);
        w.u32(0);
        w.separator();

        w.zeros(15);
        if v >= 13.34 {
            w.zeros(8);
        }
        w.separator();

        for (i, (name, regions)) in self
            .player_names
            .iter()
            .zip(&self.player_regions)
            .enumerate()
        {
            w.u32(0);
            w.u32(i as u32);
            w.u8(i as u8);
            w.u8(0);
            w.u8(0);
            w.bytes(&regions.dat_crc);
            w.u8(0);
            w.u8(0);
            w.bytes(&regions.reserved);
            w.tagged("");
            w.u8(0);
            w.tagged("");
            w.tagged(name);
            w.u32(2);
            w.u32(0);
            w.bytes(&regions.reserved2);
            w.i32(i as i32 + 1);
            w.u32(0);
            w.u32(0);
            w.u8(0);
            w.u8(0);
        }

        w.zeros(3);
        w.zeros(9);
        w.separator();
        w.zeros(12);
        if v >= 13.13 {
            w.zeros(5);
        }

        let mut after_string_slot = Vec::with_capacity(NUM_STRING_SLOTS);
        for codes in &self.list_codes {
            w.tagged("");
            for code in codes {
                w.u32(*code);
            }
            after_string_slot.push(w.out.len());
        }

        for number in &self.strategic_numbers {
            w.i32(*number);
        }

        w.u64(self.ai_files.len() as u64);
        for entry in &self.ai_files {
            w.bytes(&entry.unknown);
            w.tagged(&entry.name);
            w.bytes(&entry.unknown2);
        }

        w.u32(0x1234_5678);
        w.u16(0x9abc);
        w.u16(0xdef0);
        w.bytes(&self.guid_tail);
        w.tagged(&self.lobby_name);
        w.tagged("");

        w.zeros(19);
        if v >= 13.13 {
            w.zeros(5);
        }
        if v >= 13.17 {
            w.zeros(9);
        }
        w.tagged("");
        w.zeros(5);
        if v >= 13.13 {
            w.zeros(1);
        }
        if v < 13.17 {
            w.tagged(&self.legacy_string);
            w.u32(0);
            w.zeros(4);
        }
        if v >= 13.17 {
            w.zeros(2);
        }

        w.u32(self.has_ai);
        if self.has_ai != 0 {
            w.zeros(4096);
        }

        w.zeros(5 * 4);
        w.f32(0.0);
        w.f32(1.7);
        w.u8(0);
        w.u32(0);
        w.i32(-1);
        w.u32(0);
        w.u16(self.timing_players.1);
        w.u8(self.timing_players.0);

        (
            w.out,
            Offsets {
                first_separator,
                after_string_slot,
            },
        )
    }
}

/// Settings of a default 13.34 header with standard difficulty.
pub fn settings() -> GameSettings {
    let payload = HeaderFixture::new(13.34).difficulty(3).payload();
    let config = DecoderConfig::default();
    let mut buff = super::buffer::HeaderBuff::new(payload.as_slice());
    HeaderDecoder::new(&config)
        .decode_inflated(&mut buff, 0)
        .unwrap()
        .de
}
