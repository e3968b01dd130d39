//! Small integer codes stored in the settings section, with their labels.
//!
//! Every mapping is total: a code without a known meaning becomes the
//! `Unmapped` variant (label `"Unknown"`) and keeps the raw value, so a replay
//! written by a newer game patch still decodes.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

pub const UNKNOWN_LABEL: &str = "Unknown";

pub trait Coded: Copy {
    const KIND: &'static str;

    fn raw_code(self) -> i64;
    fn label(self) -> &'static str;
    fn is_mapped(self) -> bool;
}

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty) {
            $($variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Unmapped($repr),
        }

        impl $name {
            pub fn from_code(code: $repr) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Unmapped(other),
                }
            }

            pub fn code(self) -> $repr {
                match self {
                    $($name::$variant => $code,)+
                    $name::Unmapped(code) => code,
                }
            }
        }

        impl Coded for $name {
            const KIND: &'static str = stringify!($name);

            fn raw_code(self) -> i64 {
                i64::from(self.code())
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unmapped(_) => UNKNOWN_LABEL,
                }
            }

            fn is_mapped(self) -> bool {
                !matches!(self, $name::Unmapped(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::from_code(0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut state = serializer.serialize_struct(stringify!($name), 2)?;
                state.serialize_field("code", &self.code())?;
                state.serialize_field("label", self.label())?;
                state.end()
            }
        }
    };
}

coded_enum! {
    Difficulty(u32) {
        Hardest = 0 => "Hardest",
        Hard = 1 => "Hard",
        Moderate = 2 => "Moderate",
        Standard = 3 => "Standard",
        Easiest = 4 => "Easiest",
        Extreme = 5 => "Extreme",
    }
}

coded_enum! {
    VictoryType(u32) {
        Standard = 0 => "Standard",
        Conquest = 1 => "Conquest",
        Exploration = 2 => "Exploration",
        Ruins = 3 => "Ruins",
        Artifacts = 4 => "Artifacts",
        Discoveries = 5 => "Discoveries",
        Gold = 6 => "Gold",
        TimeLimit = 7 => "TimeLimit",
        Score = 8 => "Score",
        Standard2 = 9 => "Standard2",
        Regicide = 10 => "Regicide",
        LastMan = 11 => "LastMan",
    }
}

coded_enum! {
    ResourceLevel(i32) {
        None = -1 => "None",
        Standard = 0 => "Standard",
        Low = 1 => "Low",
        Medium = 2 => "Medium",
        High = 3 => "High",
        Unknown1 = 4 => "Unknown1",
        Unknown2 = 5 => "Unknown2",
    }
}

coded_enum! {
    Age(i32) {
        Unknown = -2 => "Unknown",
        Unset = -1 => "Unset",
        Standard = 0 => "Standard",
        Feudal = 1 => "Feudal",
        Castle = 2 => "Castle",
        Imperial = 3 => "Imperial",
        PostImperial = 4 => "PostImperial",
        DmPostImperial = 6 => "DMPostImperial",
    }
}

coded_enum! {
    /// Slot occupancy of a roster entry.
    PlayerType(u32) {
        Absent = 0 => "Absent",
        Closed = 1 => "Closed",
        Human = 2 => "Human",
        Eliminated = 3 => "Eliminated",
        Computer = 4 => "Computer",
        Cyborg = 5 => "Cyborg",
        Spectator = 6 => "Spectator",
    }
}
