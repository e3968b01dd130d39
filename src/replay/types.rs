use serde::{Serialize, Serializer};
use std::fmt;

use super::codes::{Age, Difficulty, PlayerType, ResourceLevel, VictoryType};
use crate::version::{parse_game_version, GameVersion};

pub const MAX_PLAYERS: usize = 8;
pub const NUM_STRING_SLOTS: usize = 23;
pub const NUM_STRATEGIC_NUMBERS: usize = 59;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedGame {
    pub header: Header,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    #[serde(skip)]
    pub(crate) length: u32,
    pub version: String,
    pub save_version: f32,
    pub de: GameSettings,
    pub ai: AiInfo,
    pub replay: ReplayTiming,
    pub timing_check: TimingCheck,
}

impl Header {
    /// Outer block length: the 8 prefix bytes plus the compressed header.
    pub fn block_length(&self) -> u32 {
        self.length
    }

    pub fn game_version(&self) -> Option<GameVersion> {
        match parse_game_version(&self.version) {
            Ok(("", version)) => Some(version),
            _ => None,
        }
    }
}

/// The DE game settings section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSettings {
    pub version: f32,
    pub interval_version: u32,
    pub game_options_version: u32,
    pub dlc_count: u32,
    pub dlc_ids: Vec<u32>,
    pub dataset_ref: u32,
    pub difficulty: Difficulty,
    pub selected_map_id: u32,
    pub resolved_map_id: u32,
    pub reveal_map: u32,
    pub victory_type: VictoryType,
    pub starting_resources: ResourceLevel,
    pub starting_age: Age,
    pub ending_age: Age,
    pub game_type: u32,
    pub speed: f32,
    pub treaty_length: u32,
    pub population_limit: u32,
    pub num_players: u32,
    pub unused_player_color: u32,
    pub victory_amount: u32,
    pub trade_enabled: bool,
    pub team_bonus_disabled: bool,
    pub random_positions: bool,
    pub all_techs: bool,
    pub num_starting_units: u8,
    pub lock_teams: bool,
    pub lock_speed: bool,
    pub multiplayer: bool,
    pub cheats: bool,
    pub record_game: bool,
    pub animals_enabled: bool,
    pub predators_enabled: bool,
    pub turbo_enabled: bool,
    pub shared_exploration: bool,
    pub team_positions: bool,
    pub players: [Player; MAX_PLAYERS],
    pub fog_of_war: bool,
    pub cheat_notifications: bool,
    pub colored_chat: bool,
    #[serde(serialize_with = "serialize_seq")]
    pub strings: [StringSlot; NUM_STRING_SLOTS],
    #[serde(serialize_with = "serialize_seq")]
    pub strategic_numbers: [i32; NUM_STRATEGIC_NUMBERS],
    pub num_ai_files: u64,
    pub ai_files: Vec<AiFile>,
    pub guid: Guid,
    pub lobby_name: TaggedString,
    pub modded_dataset: TaggedString,
    pub misc_string: TaggedString,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Player {
    pub dlc_id: u32,
    pub color_id: u32,
    pub selected_color: u8,
    pub selected_team_id: u8,
    pub resolved_team_id: u8,
    pub dat_crc: [u8; 8],
    pub mp_game_version: u8,
    pub civ_id: u8,
    #[serde(skip)]
    pub reserved: [u8; 3],
    pub ai_type: TaggedString,
    pub ai_civ_name_index: u8,
    pub ai_name: TaggedString,
    pub name: TaggedString,
    pub player_type: PlayerType,
    pub profile_id: u32,
    #[serde(skip)]
    pub reserved2: [u8; 4],
    pub player_number: i32,
    pub hd_rm_elo: u32,
    pub hd_dm_elo: u32,
    pub animated_destruction_enabled: bool,
    pub custom_ai: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StringSlot {
    pub value: TaggedString,
    /// First list code after the string that is not in the ignorable set.
    pub list_code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiFile {
    #[serde(skip)]
    pub unknown: [u8; 4],
    pub name: TaggedString,
    #[serde(skip)]
    pub unknown2: [u8; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AiInfo {
    pub has_ai: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayTiming {
    pub old_time: u32,
    pub world_time: u32,
    pub old_world_time: u32,
    pub game_speed_id: u32,
    pub world_time_delta_seconds: u32,
    pub timer: f32,
    pub game_speed: f32,
    pub temp_pause: u8,
    pub next_object_id: u32,
    pub next_reusable_object_id: i32,
    pub random_seed: u32,
    pub rec_player: u16,
    /// Includes Gaia.
    pub num_players: u8,
}

/// Whether the timing block agrees with the game settings read before it.
///
/// The offsets leading up to the timing block are not confirmed for every
/// save version, so a decoded timing block is only trusted when it is
/// `Consistent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimingCheck {
    Consistent,
    Inconsistent,
}

impl TimingCheck {
    pub fn evaluate(settings: &GameSettings, timing: &ReplayTiming) -> Self {
        let with_gaia = u32::from(timing.num_players);
        if with_gaia == settings.num_players + 1 && u32::from(timing.rec_player) < with_gaia {
            TimingCheck::Consistent
        } else {
            TimingCheck::Inconsistent
        }
    }
}

/// Magic-prefixed, length-prefixed string. The bytes are kept as they are;
/// they may hold NULs and are not guaranteed to be UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedString {
    pub length: u16,
    pub value: Vec<u8>,
}

impl TaggedString {
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

impl fmt::Display for TaggedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.value))
    }
}

impl Serialize for TaggedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-",
            self.data1, self.data2, self.data3, self.data4[0], self.data4[1]
        )?;
        for byte in &self.data4[2..] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn serialize_seq<S, T, const N: usize>(values: &[T; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(values.iter())
}
