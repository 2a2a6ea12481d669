//! Tagged replacements for the raw `-1` sentinels used on the wire.
//!
//! Intel payloads encode "never observed" and "no owner" as `-1`. Inside the
//! crate both are explicit variants so a report age of zero turns can never be
//! mistaken for an unexplored record, and player zero is never mistaken for
//! an unowned object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::PlayerNum;

/// Raw wire value shared by [`ReportAge::Unexplored`] and [`Owner::Unowned`].
pub const RAW_SENTINEL: i64 = -1;

/// How many turns old a piece of intel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ReportAge {
    /// No trusted observation has happened yet.
    #[default]
    Unexplored,
    /// Turns elapsed since the last trusted observation; 0 is current.
    Turns(u32),
}

impl ReportAge {
    pub const CURRENT: ReportAge = ReportAge::Turns(0);

    pub fn is_explored(self) -> bool {
        !matches!(self, ReportAge::Unexplored)
    }

    pub fn is_current(self) -> bool {
        self == Self::CURRENT
    }

    pub fn turns(self) -> Option<u32> {
        match self {
            ReportAge::Unexplored => None,
            ReportAge::Turns(turns) => Some(turns),
        }
    }

    /// One more turn has passed. Unexplored stays unexplored.
    pub fn aged(self) -> Self {
        match self {
            ReportAge::Unexplored => ReportAge::Unexplored,
            ReportAge::Turns(turns) => ReportAge::Turns(turns.saturating_add(1)),
        }
    }

    pub fn as_raw(self) -> i64 {
        match self {
            ReportAge::Unexplored => RAW_SENTINEL,
            ReportAge::Turns(turns) => i64::from(turns),
        }
    }

    /// Any negative value decodes as unexplored.
    pub fn from_raw(value: i64) -> Self {
        if value < 0 {
            ReportAge::Unexplored
        } else {
            ReportAge::Turns(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }
}

impl From<i64> for ReportAge {
    fn from(value: i64) -> Self {
        ReportAge::from_raw(value)
    }
}

impl From<ReportAge> for i64 {
    fn from(value: ReportAge) -> Self {
        value.as_raw()
    }
}

impl fmt::Display for ReportAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportAge::Unexplored => f.write_str("unexplored"),
            ReportAge::Turns(turns) => write!(f, "{turns} turns"),
        }
    }
}

/// Owner of a map object, as perceived by whoever holds the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Owner {
    #[default]
    Unowned,
    Player(PlayerNum),
}

impl Owner {
    pub fn player(self) -> Option<PlayerNum> {
        match self {
            Owner::Unowned => None,
            Owner::Player(num) => Some(num),
        }
    }

    /// True only for a real owner equal to `num`; unowned never matches.
    pub fn is_player(self, num: PlayerNum) -> bool {
        self.player() == Some(num)
    }

    pub fn as_raw(self) -> i64 {
        match self {
            Owner::Unowned => RAW_SENTINEL,
            Owner::Player(num) => i64::from(num.0),
        }
    }

    pub fn from_raw(value: i64) -> Self {
        match u32::try_from(value) {
            Ok(num) => Owner::Player(PlayerNum(num)),
            Err(_) => Owner::Unowned,
        }
    }
}

impl From<PlayerNum> for Owner {
    fn from(num: PlayerNum) -> Self {
        Owner::Player(num)
    }
}

impl From<i64> for Owner {
    fn from(value: i64) -> Self {
        Owner::from_raw(value)
    }
}

impl From<Owner> for i64 {
    fn from(value: Owner) -> Self {
        value.as_raw()
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Unowned => f.write_str("unowned"),
            Owner::Player(num) => write!(f, "player {num}"),
        }
    }
}
