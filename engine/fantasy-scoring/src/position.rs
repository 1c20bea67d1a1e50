//! Position codes and the categories lineups are built from
//!
//! The NHL API reports single-letter position codes (`C`, `L`, `R`, `D`, `G`),
//! while rosters and cards sometimes carry the two-letter wing labels
//! (`LW`, `RW`). Every code collapses into one of three categories, and slot
//! matching is always done on the category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw position code as reported by the NHL API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PositionCode {
    Center,
    LeftWing,
    RightWing,
    Defense,
    Goalie,
}

/// Category a position collapses into for roster constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PositionCategory {
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "G")]
    Goalie,
}

/// Error returned for codes outside the known table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown position code: '{0}'")]
pub struct UnknownPosition(pub String);

impl PositionCode {
    pub const ALL: [PositionCode; 5] = [
        PositionCode::Center,
        PositionCode::LeftWing,
        PositionCode::RightWing,
        PositionCode::Defense,
        PositionCode::Goalie,
    ];

    /// Category used to match a player against a lineup slot
    pub fn category(self) -> PositionCategory {
        match self {
            PositionCode::Center | PositionCode::LeftWing | PositionCode::RightWing => {
                PositionCategory::Forward
            }
            PositionCode::Defense => PositionCategory::Defense,
            PositionCode::Goalie => PositionCategory::Goalie,
        }
    }

    /// The single-letter code the NHL API uses
    pub fn api_code(self) -> &'static str {
        match self {
            PositionCode::Center => "C",
            PositionCode::LeftWing => "L",
            PositionCode::RightWing => "R",
            PositionCode::Defense => "D",
            PositionCode::Goalie => "G",
        }
    }

    /// Label shown on player cards (`LW`/`RW` instead of `L`/`R`)
    pub fn display_label(self) -> &'static str {
        match self {
            PositionCode::LeftWing => "LW",
            PositionCode::RightWing => "RW",
            other => other.api_code(),
        }
    }

    pub fn is_goalie(self) -> bool {
        self == PositionCode::Goalie
    }
}

impl FromStr for PositionCode {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(PositionCode::Center),
            "L" | "LW" => Ok(PositionCode::LeftWing),
            "R" | "RW" => Ok(PositionCode::RightWing),
            "D" => Ok(PositionCode::Defense),
            "G" => Ok(PositionCode::Goalie),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for PositionCode {
    type Error = UnknownPosition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PositionCode> for &'static str {
    fn from(code: PositionCode) -> Self {
        code.api_code()
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 3] =
        [PositionCategory::Forward, PositionCategory::Defense, PositionCategory::Goalie];

    /// Short label (`F`, `D`, `G`), also the slot-id prefix
    pub fn short_label(self) -> &'static str {
        match self {
            PositionCategory::Forward => "F",
            PositionCategory::Defense => "D",
            PositionCategory::Goalie => "G",
        }
    }

    pub fn plural_name(self) -> &'static str {
        match self {
            PositionCategory::Forward => "Forwards",
            PositionCategory::Defense => "Defensemen",
            PositionCategory::Goalie => "Goalies",
        }
    }
}

impl FromStr for PositionCategory {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Ok(PositionCategory::Forward),
            "D" => Ok(PositionCategory::Defense),
            "G" => Ok(PositionCategory::Goalie),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// Normalize an untyped raw code into its category
///
/// Unknown codes yield `None` and therefore never match a slot.
pub fn normalize(raw: &str) -> Option<PositionCategory> {
    raw.parse::<PositionCode>().ok().map(PositionCode::category)
}
