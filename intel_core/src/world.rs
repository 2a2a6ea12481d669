//! Authoritative world objects. The intel layer only ever reads these.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cargo::{Cargo, Mineral},
    ids::PlayerNum,
    sentinels::Owner,
};

/// Colonists are carried in kT; each kT is this many people.
pub const COLONISTS_PER_KT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Habitability values for gravity, temperature and radiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hab {
    pub grav: i32,
    pub temp: i32,
    pub rad: i32,
}

impl Hab {
    pub fn new(grav: i32, temp: i32, rad: i32) -> Self {
        Self { grav, temp, rad }
    }
}

/// Kind tag carried by every map object and its intel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapObjectType {
    #[default]
    #[serde(rename = "")]
    None,
    Planet,
    Fleet,
    ShipDesign,
    MineralPacket,
    Salvage,
    MineField,
}

/// Fields shared by every object placed on the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapObject {
    pub game_id: u64,
    /// Stable per-game object number. Planets are numbered from 1.
    pub num: u32,
    pub player_num: Owner,
    pub name: String,
    pub position: Vector,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Planet {
    #[serde(flatten)]
    pub map_object: MapObject,
    pub hab: Hab,
    pub mineral_concentration: Mineral,
    pub cargo: Cargo,
}

impl Planet {
    pub fn population(&self) -> u32 {
        u32::try_from(self.cargo.colonists)
            .unwrap_or(0)
            .saturating_mul(COLONISTS_PER_KT)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fleet {
    #[serde(flatten)]
    pub map_object: MapObject,
    pub cargo: Cargo,
}

/// A single placement of a hull component in a design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipDesignSlot {
    pub hull_component: String,
    pub hull_slot_index: u32,
    pub quantity: u32,
}

/// Values computed from a design's hull and slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipDesignSpec {
    pub armor: u32,
    pub shield: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipDesign {
    pub game_id: u64,
    pub uuid: Uuid,
    pub name: String,
    pub player_num: PlayerNum,
    pub hull: String,
    pub hull_set_number: u32,
    pub version: u32,
    pub slots: Vec<ShipDesignSlot>,
    pub spec: ShipDesignSpec,
}

/// Live objects of a single game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct World {
    pub planets: Vec<Planet>,
    pub fleets: Vec<Fleet>,
    pub designs: Vec<ShipDesign>,
}

impl World {
    /// Planets are normally stored in number order; fall back to a scan otherwise.
    pub fn planet(&self, num: u32) -> Option<&Planet> {
        let by_position = num
            .checked_sub(1)
            .and_then(|index| self.planets.get(index as usize))
            .filter(|planet| planet.map_object.num == num);
        by_position.or_else(|| {
            self.planets
                .iter()
                .find(|planet| planet.map_object.num == num)
        })
    }

    pub fn fleet(&self, owner: PlayerNum, num: u32) -> Option<&Fleet> {
        self.fleets.iter().find(|fleet| {
            fleet.map_object.num == num && fleet.map_object.player_num.is_player(owner)
        })
    }

    pub fn design(&self, uuid: Uuid) -> Option<&ShipDesign> {
        self.designs.iter().find(|design| design.uuid == uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(num: u32) -> Planet {
        Planet {
            map_object: MapObject {
                num,
                name: format!("Planet {num}"),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn population_is_colonists_times_hundred() {
        let mut world_planet = planet(1);
        world_planet.cargo.colonists = 5;
        assert_eq!(world_planet.population(), 500);

        world_planet.cargo.colonists = -3;
        assert_eq!(world_planet.population(), 0);
    }

    #[test]
    fn planet_lookup_tolerates_unordered_storage() {
        let world = World {
            planets: vec![planet(2), planet(1), planet(3)],
            ..Default::default()
        };
        assert_eq!(world.planet(1).map(|p| p.map_object.num), Some(1));
        assert_eq!(world.planet(3).map(|p| p.map_object.num), Some(3));
        assert!(world.planet(0).is_none());
        assert!(world.planet(4).is_none());
    }

    #[test]
    fn fleet_lookup_requires_matching_owner() {
        let fleet = Fleet {
            map_object: MapObject {
                num: 7,
                player_num: Owner::Player(PlayerNum(1)),
                ..Default::default()
            },
            ..Default::default()
        };
        let world = World {
            fleets: vec![fleet],
            ..Default::default()
        };
        assert!(world.fleet(PlayerNum(1), 7).is_some());
        assert!(world.fleet(PlayerNum(2), 7).is_none());
    }
}
