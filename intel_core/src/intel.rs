//! Player-scoped observation records.
//!
//! Every record belongs to exactly one player and describes what that player
//! believes about a single object. Records are only written by the discovery
//! functions in [`crate::discovery`]; the transient `changed` flag tells the
//! persistence layer which records need to be written back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cargo::{Cargo, Mineral},
    environment::MineFieldType,
    ids::PlayerId,
    sentinels::{Owner, ReportAge},
    world::{Hab, MapObjectType, ShipDesignSlot, Vector},
};

/// Base observation record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Intel {
    /// Storage identity; zero until persisted.
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when the record differs from what was last saved. Never serialized.
    #[serde(skip)]
    pub changed: bool,
    pub game_id: u64,
    pub name: String,
    /// Object number of the observed object.
    pub num: u32,
    /// Perceived owner of the observed object.
    pub player_num: Owner,
    /// Player holding this record; `None` until the record is claimed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    pub report_age: ReportAge,
}

impl Intel {
    pub fn new(player_num: Owner, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player_num,
            ..Default::default()
        }
    }
}

impl fmt::Display for Intel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameID: {:5}, ID: {:5}, Num: {:3} {}",
            self.game_id, self.id, self.num, self.name
        )
    }
}

/// Intel about something with a position on the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapObjectIntel {
    #[serde(flatten)]
    pub intel: Intel,
    #[serde(rename = "type")]
    pub kind: MapObjectType,
    pub position: Vector,
}

/// Common access to the base record of every intel kind.
pub trait IntelRecord {
    fn intel(&self) -> &Intel;
    fn intel_mut(&mut self) -> &mut Intel;

    fn is_changed(&self) -> bool {
        self.intel().changed
    }

    fn mark_changed(&mut self) {
        self.intel_mut().changed = true;
    }

    fn clear_changed(&mut self) {
        self.intel_mut().changed = false;
    }
}

macro_rules! map_object_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntelRecord for $ty {
                fn intel(&self) -> &Intel {
                    &self.map_object.intel
                }

                fn intel_mut(&mut self) -> &mut Intel {
                    &mut self.map_object.intel
                }
            }
        )+
    };
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanetIntel {
    #[serde(flatten)]
    pub map_object: MapObjectIntel,
    pub hab: Hab,
    pub mineral_concentration: Mineral,
    pub population: u32,
    /// The planet's starbase, owned by this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starbase: Option<FleetIntel>,
    pub cargo: Cargo,
    pub cargo_discovered: bool,
}

impl PlanetIntel {
    /// True while no trusted observation has been made.
    pub fn unexplored(&self) -> bool {
        !self.explored()
    }

    pub fn explored(&self) -> bool {
        self.map_object.intel.report_age.is_explored()
    }

    /// True once some player has claimed this slot.
    pub fn is_claimed(&self) -> bool {
        self.map_object.intel.player_id.is_some()
    }
}

impl fmt::Display for PlanetIntel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Planet {}", self.map_object.intel)
    }
}

/// Lookup key for fleet intel: the fleet's owner and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FleetKey {
    pub owner: Owner,
    pub name: String,
}

impl FleetKey {
    pub fn new(owner: Owner, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

impl fmt::Display for FleetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {}, Fleet: {}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FleetIntel {
    #[serde(flatten)]
    pub map_object: MapObjectIntel,
    /// Storage id of the planet intel that owns this fleet, for starbases.
    #[serde(skip)]
    pub planet_intel_id: Option<u64>,
    pub cargo: Cargo,
    pub cargo_discovered: bool,
}

impl FleetIntel {
    pub fn new(owner: Owner, name: impl Into<String>) -> Self {
        Self {
            map_object: MapObjectIntel {
                intel: Intel::new(owner, name),
                kind: MapObjectType::Fleet,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn key(&self) -> FleetKey {
        FleetKey::new(
            self.map_object.intel.player_num,
            self.map_object.intel.name.clone(),
        )
    }
}

impl fmt::Display for FleetIntel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipDesignIntel {
    #[serde(flatten)]
    pub intel: Intel,
    pub uuid: Uuid,
    pub hull: String,
    pub hull_set_number: u32,
    pub version: u32,
    pub armor: u32,
    pub shields: u32,
    /// Empty until a scanner capable of slot detection sees the design.
    pub slots: Vec<ShipDesignSlot>,
}

impl ShipDesignIntel {
    pub fn slots_discovered(&self) -> bool {
        !self.slots.is_empty()
    }
}

impl IntelRecord for ShipDesignIntel {
    fn intel(&self) -> &Intel {
        &self.intel
    }

    fn intel_mut(&mut self) -> &mut Intel {
        &mut self.intel
    }
}

impl fmt::Display for ShipDesignIntel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player: {}, Design: {}",
            self.intel.player_num, self.intel.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MineralPacketIntel {
    #[serde(flatten)]
    pub map_object: MapObjectIntel,
    pub warp_factor: u32,
    pub heading: Vector,
    pub cargo: Cargo,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalvageIntel {
    #[serde(flatten)]
    pub map_object: MapObjectIntel,
    pub cargo: Cargo,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MineFieldIntel {
    #[serde(flatten)]
    pub map_object: MapObjectIntel,
    pub num_mines: u32,
    pub mine_field_type: MineFieldType,
}

map_object_record!(
    PlanetIntel,
    FleetIntel,
    MineralPacketIntel,
    SalvageIntel,
    MineFieldIntel,
);
