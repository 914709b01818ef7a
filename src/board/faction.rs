//! Faction identifiers and their static display metadata.
//!
//! The five playable factions act in a fixed turn order. `Unowned` is a
//! sentinel that the generator never assigns; it only appears on loaded
//! boards and in ownership comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// The number of playable factions.
pub const FACTION_COUNT: usize = 5;

/// A side in the game, or the unowned sentinel.
///
/// The `#[repr(u8)]` discriminant doubles as the persisted integer value and
/// as the index into per-faction arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Faction {
    #[default]
    Red = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
    Purple = 4,
    Unowned = 5,
}

/// Playable factions in fixed turn order.
pub const TURN_ORDER: [Faction; FACTION_COUNT] = [
    Faction::Red,
    Faction::Blue,
    Faction::Green,
    Faction::Yellow,
    Faction::Purple,
];

/// Static metadata for a faction.
pub struct FactionInfo {
    pub name: &'static str,
    pub color: &'static str,
    pub cb_color: &'static str,
}

/// Lookup table: index by `Faction as usize`.
pub static FACTION_INFO: [FactionInfo; FACTION_COUNT + 1] = [
    FactionInfo { name: "Red", color: "#E53935", cb_color: "#D55E00" },
    FactionInfo { name: "Blue", color: "#1E88E5", cb_color: "#0072B2" },
    FactionInfo { name: "Green", color: "#43A047", cb_color: "#009E73" },
    FactionInfo { name: "Yellow", color: "#FDD835", cb_color: "#F0E442" },
    FactionInfo { name: "Purple", color: "#8E24AA", cb_color: "#CC79A7" },
    FactionInfo { name: "Unowned", color: "#404040", cb_color: "#404040" },
];

impl Faction {
    /// The human player's faction.
    pub const PLAYER: Faction = Faction::Red;

    /// Returns the index used for per-faction arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the display name.
    pub const fn name(self) -> &'static str {
        FACTION_INFO[self as usize].name
    }

    /// Returns the standard display colour as a hex string.
    pub const fn color(self) -> &'static str {
        FACTION_INFO[self as usize].color
    }

    /// Returns the colour-blind-safe display colour as a hex string.
    pub const fn cb_color(self) -> &'static str {
        FACTION_INFO[self as usize].cb_color
    }

    /// Returns true for the five playable factions.
    pub const fn is_playable(self) -> bool {
        !matches!(self, Faction::Unowned)
    }

    /// Looks up a faction by its persisted integer value.
    pub fn from_index(index: u8) -> Option<Faction> {
        match index {
            0 => Some(Faction::Red),
            1 => Some(Faction::Blue),
            2 => Some(Faction::Green),
            3 => Some(Faction::Yellow),
            4 => Some(Faction::Purple),
            5 => Some(Faction::Unowned),
            _ => None,
        }
    }

    /// Parses a faction from its name (case-insensitive) or integer index.
    pub fn parse(s: &str) -> Option<Faction> {
        if let Ok(index) = s.parse::<u8>() {
            return Faction::from_index(index);
        }
        FACTION_INFO
            .iter()
            .position(|info| info.name.eq_ignore_ascii_case(s))
            .and_then(|i| Faction::from_index(i as u8))
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Faction> for u8 {
    fn from(faction: Faction) -> u8 {
        faction as u8
    }
}

impl TryFrom<u8> for Faction {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Faction::from_index(value).ok_or(BoardError::UnknownFaction(value))
    }
}
