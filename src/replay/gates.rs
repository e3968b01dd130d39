//! Save-version dependent regions of the settings section.
//!
//! Each row says where in the decode sequence it applies, which save versions
//! it applies to and what it does to the stream. Rows sharing a point are
//! applied in table order.

use std::io::Read;
use tracing::trace;

use super::buffer::HeaderBuff;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePoint {
    /// After the starting toggles, before the separator preceding the roster.
    AfterToggles,
    /// After the post-roster padding, before the 23 string slots.
    BeforeStringSlots,
    /// After the unconditional 19 bytes following the modded dataset name.
    AfterModdedDataset,
    /// After the 5 bytes following the misc string.
    AfterMiscString,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    AtLeast(f32),
    Below(f32),
}

impl Condition {
    pub fn holds(self, save_version: f32) -> bool {
        match self {
            Condition::AtLeast(threshold) => save_version >= threshold,
            Condition::Below(threshold) => save_version < threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Skip(usize),
    /// A tagged string and a u32 that later versions moved elsewhere, then 4 bytes.
    LegacyFields,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionGate {
    pub name: char,
    pub point: GatePoint,
    pub condition: Condition,
    pub effect: Effect,
}

pub static VERSION_GATES: [VersionGate; 7] = [
    VersionGate {
        name: 'A',
        point: GatePoint::AfterToggles,
        condition: Condition::AtLeast(13.34),
        effect: Effect::Skip(8),
    },
    VersionGate {
        name: 'B',
        point: GatePoint::BeforeStringSlots,
        condition: Condition::AtLeast(13.13),
        effect: Effect::Skip(5),
    },
    VersionGate {
        name: 'C',
        point: GatePoint::AfterModdedDataset,
        condition: Condition::AtLeast(13.13),
        effect: Effect::Skip(5),
    },
    VersionGate {
        name: 'D',
        point: GatePoint::AfterModdedDataset,
        condition: Condition::AtLeast(13.17),
        effect: Effect::Skip(9),
    },
    VersionGate {
        name: 'E',
        point: GatePoint::AfterMiscString,
        condition: Condition::AtLeast(13.13),
        effect: Effect::Skip(1),
    },
    VersionGate {
        name: 'F',
        point: GatePoint::AfterMiscString,
        condition: Condition::Below(13.17),
        effect: Effect::LegacyFields,
    },
    VersionGate {
        name: 'G',
        point: GatePoint::AfterMiscString,
        condition: Condition::AtLeast(13.17),
        effect: Effect::Skip(2),
    },
];

pub fn active_gates(
    point: GatePoint,
    save_version: f32,
) -> impl Iterator<Item = &'static VersionGate> {
    VERSION_GATES
        .iter()
        .filter(move |gate| gate.point == point && gate.condition.holds(save_version))
}

pub fn apply_gates<R: Read>(
    buff: &mut HeaderBuff<R>,
    point: GatePoint,
    save_version: f32,
) -> Result<()> {
    for gate in active_gates(point, save_version) {
        trace!(gate = %gate.name, ?point, save_version, "applying version gate");
        match gate.effect {
            Effect::Skip(n) => buff.skip(n)?,
            Effect::LegacyFields => {
                buff.read_tagged_string()?;
                buff.read_u32()?;
                buff.skip(4)?;
            }
        }
    }
    Ok(())
}
