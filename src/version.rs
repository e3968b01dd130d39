pub mod parsers;

use nom::{combinator::map, IResult};
use parsers::parse_major_minor;
use serde::Serialize;
use std::fmt;

/// Game build parsed from the header's format version string (`"VER 9.4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

pub fn parse_game_version(input: &str) -> IResult<&str, GameVersion> {
    map(parse_major_minor, |(major, minor)| GameVersion { major, minor })(input)
}

#[test]
fn it_parses_game_versions_with_no_error() {
    let Ok((rest, version)) = parse_game_version("VER 9.4") else {
        panic!("parse_game_version failed.")
    };
    assert_eq!(rest, "");
    assert_eq!(version, GameVersion { major: 9, minor: 4 });
    assert_eq!(version.to_string(), "9.4");
    assert!(version < GameVersion { major: 9, minor: 10 });
}

#[test]
fn it_leaves_trailing_input() {
    let Ok((rest, _)) = parse_game_version("VER 9.4 beta") else {
        panic!("parse_game_version failed.")
    };
    assert_eq!(rest, " beta");
}
