use std::io::Read;
use tracing::{debug, warn};

use super::buffer::HeaderBuff;
use super::codes::{Age, Coded, Difficulty, PlayerType, ResourceLevel, VictoryType};
use super::gates::{apply_gates, GatePoint};
use super::inflate::Inflater;
use super::types::*;
use crate::config::DecoderConfig;
use crate::error::{DecodeError, Result};

/// List codes that may follow a string slot without ending it.
pub const IGNORED_LIST_CODES: [u32; 6] = [3, 21, 23, 42, 44, 45];

pub const AI_DATA_SIZE: usize = 4096;

pub struct HeaderDecoder<'a> {
    config: &'a DecoderConfig,
}

impl<'a> HeaderDecoder<'a> {
    pub fn new(config: &'a DecoderConfig) -> Self {
        Self { config }
    }

    /// Reads the outer length prefix and the compressed block from `source`,
    /// then decodes the inflated header.
    pub fn decode<R: Read>(&self, source: R) -> Result<Header> {
        let mut outer = HeaderBuff::new(source);
        let length = outer.read_u32()?;
        if length < 8 {
            return Err(DecodeError::InvalidBlockLength(length));
        }
        outer.skip(4)?;
        let compressed = outer.read_block((length - 8) as usize)?;
        debug!(length, compressed = compressed.len(), "read header block");

        let mut buff = HeaderBuff::new(Inflater::new(&compressed, self.config.max_header_size));
        let header = self.decode_inflated(&mut buff, length)?;
        let inflater = buff.get_ref();
        debug!(
            consumed = outer.position(),
            inflated = inflater.total_out(),
            compressed_read = inflater.total_in(),
            "decoded header"
        );

        Ok(header)
    }

    pub(crate) fn decode_inflated<R: Read>(
        &self,
        buff: &mut HeaderBuff<R>,
        length: u32,
    ) -> Result<Header> {
        let version = buff.read_cstring()?;
        let save_version = buff.read_f32()?;
        debug!(%version, save_version, "read versions");

        let de = self.read_settings(buff, save_version)?;

        let has_ai = buff.read_u32()? != 0;
        if has_ai {
            buff.skip(AI_DATA_SIZE)?;
        }

        let replay = read_timing(buff)?;
        let timing_check = TimingCheck::evaluate(&de, &replay);
        if timing_check == TimingCheck::Inconsistent {
            warn!(
                num_players = de.num_players,
                timing_players = replay.num_players,
                rec_player = replay.rec_player,
                "replay timing block does not line up with the game settings"
            );
        }

        Ok(Header {
            length,
            version,
            save_version,
            de,
            ai: AiInfo { has_ai },
            replay,
            timing_check,
        })
    }

    fn code<T: Coded>(&self, value: T) -> Result<T> {
        if self.config.strict_codes && !value.is_mapped() {
            return Err(DecodeError::UnmappedCode {
                kind: T::KIND,
                code: value.raw_code(),
            });
        }
        Ok(value)
    }

    fn read_settings<R: Read>(
        &self,
        buff: &mut HeaderBuff<R>,
        save_version: f32,
    ) -> Result<GameSettings> {
        let version = buff.read_f32()?;
        let interval_version = buff.read_u32()?;
        let game_options_version = buff.read_u32()?;
        let dlc_count = buff.read_u32()?;
        let mut dlc_ids = Vec::new();
        for _ in 0..dlc_count {
            dlc_ids.push(buff.read_u32()?);
        }

        let dataset_ref = buff.read_u32()?;
        let difficulty = self.code(Difficulty::from_code(buff.read_u32()?))?;
        let selected_map_id = buff.read_u32()?;
        let resolved_map_id = buff.read_u32()?;
        let reveal_map = buff.read_u32()?;
        let victory_type = self.code(VictoryType::from_code(buff.read_u32()?))?;
        let starting_resources = self.code(ResourceLevel::from_code(buff.read_i32()?))?;
        let starting_age = self.code(Age::from_code(buff.read_i32()?))?;
        let ending_age = self.code(Age::from_code(buff.read_i32()?))?;
        let game_type = buff.read_u32()?;

        buff.expect_separator()?;
        buff.expect_separator()?;

        let speed = buff.read_f32()?;
        let treaty_length = buff.read_u32()?;
        let population_limit = buff.read_u32()?;
        let num_players = buff.read_u32()?;
        let unused_player_color = buff.read_u32()?;
        let victory_amount = buff.read_u32()?;

        buff.expect_separator()?;

        let trade_enabled = buff.read_bool()?;
        let team_bonus_disabled = buff.read_bool()?;
        let random_positions = buff.read_bool()?;
        let all_techs = buff.read_bool()?;
        let num_starting_units = buff.read_u8()?;
        let lock_teams = buff.read_bool()?;
        let lock_speed = buff.read_bool()?;
        let multiplayer = buff.read_bool()?;
        let cheats = buff.read_bool()?;
        let record_game = buff.read_bool()?;
        let animals_enabled = buff.read_bool()?;
        let predators_enabled = buff.read_bool()?;
        let turbo_enabled = buff.read_bool()?;
        let shared_exploration = buff.read_bool()?;
        let team_positions = buff.read_bool()?;

        apply_gates(buff, GatePoint::AfterToggles, save_version)?;
        buff.expect_separator()?;

        let mut players: [Player; MAX_PLAYERS] = Default::default();
        for player in players.iter_mut() {
            *player = self.read_player(buff)?;
        }
        debug!(num_players, "read player slots");

        let fog_of_war = buff.read_bool()?;
        let cheat_notifications = buff.read_bool()?;
        let colored_chat = buff.read_bool()?;

        buff.skip(9)?;
        buff.expect_separator()?;
        buff.skip(12)?;
        apply_gates(buff, GatePoint::BeforeStringSlots, save_version)?;

        let mut strings: [StringSlot; NUM_STRING_SLOTS] = Default::default();
        for slot in strings.iter_mut() {
            *slot = read_string_slot(buff)?;
        }

        let mut strategic_numbers = [0i32; NUM_STRATEGIC_NUMBERS];
        for number in strategic_numbers.iter_mut() {
            *number = buff.read_i32()?;
        }

        let num_ai_files = buff.read_u64()?;
        let mut ai_files = Vec::new();
        for _ in 0..num_ai_files {
            ai_files.push(AiFile {
                unknown: buff.read_array()?,
                name: buff.read_tagged_string()?,
                unknown2: buff.read_array()?,
            });
        }

        let guid = Guid {
            data1: buff.read_u32()?,
            data2: buff.read_u16()?,
            data3: buff.read_u16()?,
            data4: buff.read_array()?,
        };
        let lobby_name = buff.read_tagged_string()?;
        let modded_dataset = buff.read_tagged_string()?;

        buff.skip(19)?;
        apply_gates(buff, GatePoint::AfterModdedDataset, save_version)?;

        let misc_string = buff.read_tagged_string()?;

        buff.skip(5)?;
        apply_gates(buff, GatePoint::AfterMiscString, save_version)?;
        debug!(%guid, %lobby_name, "read game settings");

        Ok(GameSettings {
            version,
            interval_version,
            game_options_version,
            dlc_count,
            dlc_ids,
            dataset_ref,
            difficulty,
            selected_map_id,
            resolved_map_id,
            reveal_map,
            victory_type,
            starting_resources,
            starting_age,
            ending_age,
            game_type,
            speed,
            treaty_length,
            population_limit,
            num_players,
            unused_player_color,
            victory_amount,
            trade_enabled,
            team_bonus_disabled,
            random_positions,
            all_techs,
            num_starting_units,
            lock_teams,
            lock_speed,
            multiplayer,
            cheats,
            record_game,
            animals_enabled,
            predators_enabled,
            turbo_enabled,
            shared_exploration,
            team_positions,
            players,
            fog_of_war,
            cheat_notifications,
            colored_chat,
            strings,
            strategic_numbers,
            num_ai_files,
            ai_files,
            guid,
            lobby_name,
            modded_dataset,
            misc_string,
        })
    }

    fn read_player<R: Read>(&self, buff: &mut HeaderBuff<R>) -> Result<Player> {
        Ok(Player {
            dlc_id: buff.read_u32()?,
            color_id: buff.read_u32()?,
            selected_color: buff.read_u8()?,
            selected_team_id: buff.read_u8()?,
            resolved_team_id: buff.read_u8()?,
            dat_crc: buff.read_array()?,
            mp_game_version: buff.read_u8()?,
            civ_id: buff.read_u8()?,
            reserved: buff.read_array()?,
            ai_type: buff.read_tagged_string()?,
            ai_civ_name_index: buff.read_u8()?,
            ai_name: buff.read_tagged_string()?,
            name: buff.read_tagged_string()?,
            player_type: self.code(PlayerType::from_code(buff.read_u32()?))?,
            profile_id: buff.read_u32()?,
            reserved2: buff.read_array()?,
            player_number: buff.read_i32()?,
            hd_rm_elo: buff.read_u32()?,
            hd_dm_elo: buff.read_u32()?,
            animated_destruction_enabled: buff.read_bool()?,
            custom_ai: buff.read_bool()?,
        })
    }
}

fn read_string_slot<R: Read>(buff: &mut HeaderBuff<R>) -> Result<StringSlot> {
    let value = buff.read_tagged_string()?;
    let mut list_code = buff.read_u32()?;
    while IGNORED_LIST_CODES.contains(&list_code) {
        list_code = buff.read_u32()?;
    }

    Ok(StringSlot { value, list_code })
}

fn read_timing<R: Read>(buff: &mut HeaderBuff<R>) -> Result<ReplayTiming> {
    Ok(ReplayTiming {
        old_time: buff.read_u32()?,
        world_time: buff.read_u32()?,
        old_world_time: buff.read_u32()?,
        game_speed_id: buff.read_u32()?,
        world_time_delta_seconds: buff.read_u32()?,
        timer: buff.read_f32()?,
        game_speed: buff.read_f32()?,
        temp_pause: buff.read_u8()?,
        next_object_id: buff.read_u32()?,
        next_reusable_object_id: buff.read_i32()?,
        random_seed: buff.read_u32()?,
        rec_player: buff.read_u16()?,
        num_players: buff.read_u8()?,
    })
}
