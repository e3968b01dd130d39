use anyhow::{Context, Result};
use aoe2rec::config::{DecoderConfig, DEFAULT_MAX_HEADER_SIZE};
use aoe2rec::load_replay_file_with_config;
use aoe2rec::replay::codes::Coded;
use aoe2rec::replay::types::{Header, TimingCheck};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Decode the header of an Age of Empires II: DE recorded game.
#[derive(Parser, Debug)]
#[command(name = "aoe2rec", version)]
struct Cli {
    /// The .aoe2record file to decode
    file: PathBuf,

    /// Print the decoded header as JSON
    #[arg(long, env = "AOE2REC_JSON")]
    json: bool,

    /// Fail on codes without a known label
    #[arg(long, env = "AOE2REC_STRICT_CODES")]
    strict_codes: bool,

    /// Largest inflated header accepted, in bytes
    #[arg(long, env = "AOE2REC_MAX_HEADER_SIZE", default_value_t = DEFAULT_MAX_HEADER_SIZE)]
    max_header_size: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "aoe2rec=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DecoderConfig::default()
        .with_max_header_size(cli.max_header_size)
        .with_strict_codes(cli.strict_codes);

    let game = load_replay_file_with_config(&cli.file, &config)
        .with_context(|| format!("Failed to decode {}", cli.file.display()))?;
    tracing::info!(file = %cli.file.display(), "decoded header");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        print_summary(&game.header);
    }

    Ok(())
}

fn print_summary(header: &Header) {
    let de = &header.de;
    match header.game_version() {
        Some(version) => println!("Version: {} ({})", header.version, version),
        None => println!("Version: {}", header.version),
    }
    println!("Save version: {}", header.save_version);
    println!("Difficulty: {}", de.difficulty.label());
    println!("Victory Type: {}", de.victory_type.label());
    println!("Starting Resources: {}", de.starting_resources.label());
    println!(
        "Starting Age: {} - Ending Age: {}",
        de.starting_age.label(),
        de.ending_age.label()
    );
    println!("Lobby: {}", de.lobby_name);
    println!("Game ID: {}", de.guid);

    for (i, player) in de.players.iter().enumerate() {
        println!(
            "Player {}: {} civ={} team={} type={} profile={}",
            i,
            player.name,
            player.civ_id,
            player.resolved_team_id,
            player.player_type.label(),
            player.profile_id
        );
    }

    let replay = &header.replay;
    println!(
        "Replay: world_time={} speed={} random_seed={} rec_player={} players={}",
        replay.world_time,
        replay.game_speed,
        replay.random_seed,
        replay.rec_player,
        replay.num_players
    );
    if header.timing_check == TimingCheck::Inconsistent {
        println!("Replay timing block could not be verified against the game settings");
    }
}
