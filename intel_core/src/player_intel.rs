//! Per-player intel store.
//!
//! Planet intel lives in a fixed array with one slot per planet in the game,
//! addressed by `planet number - 1`. Fleet and design intel are append-only
//! lists with a secondary index for key lookups.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ids::{PlayerId, PlayerNum},
    intel::{FleetIntel, FleetKey, IntelRecord, PlanetIntel, ShipDesignIntel},
};

/// Serialized form of a [`PlayerIntel`]: just the records, no indexes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerIntelRecords {
    pub planet_intels: Vec<PlanetIntel>,
    pub fleet_intels: Vec<FleetIntel>,
    pub design_intels: Vec<ShipDesignIntel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PlayerIntelRecords", into = "PlayerIntelRecords")]
pub struct PlayerIntel {
    planet_intels: Vec<PlanetIntel>,
    fleet_intels: Vec<FleetIntel>,
    fleet_index: HashMap<FleetKey, usize>,
    design_intels: Vec<ShipDesignIntel>,
    design_index: HashMap<Uuid, usize>,
}

impl PlayerIntel {
    /// Create a store with one unclaimed planet slot per planet in the game.
    pub fn with_planet_slots(count: usize) -> Self {
        Self {
            planet_intels: vec![PlanetIntel::default(); count],
            ..Default::default()
        }
    }

    pub fn planet_slot_count(&self) -> usize {
        self.planet_intels.len()
    }

    /// Slot index for a planet number, if it falls inside the slot array.
    #[inline]
    fn planet_index(&self, num: u32) -> Option<usize> {
        let index = num.checked_sub(1)? as usize;
        (index < self.planet_intels.len()).then_some(index)
    }

    pub fn planet_intels(&self) -> &[PlanetIntel] {
        &self.planet_intels
    }

    pub fn planet_intel(&self, num: u32) -> Option<&PlanetIntel> {
        self.planet_index(num).map(|idx| &self.planet_intels[idx])
    }

    pub(crate) fn planet_intel_mut(&mut self, num: u32) -> Option<&mut PlanetIntel> {
        let idx = self.planet_index(num)?;
        self.planet_intels.get_mut(idx)
    }

    pub fn fleet_intels(&self) -> &[FleetIntel] {
        &self.fleet_intels
    }

    /// Most recently added fleet intel for `key`.
    pub fn fleet_intel(&self, key: &FleetKey) -> Option<&FleetIntel> {
        self.fleet_index
            .get(key)
            .and_then(|&idx| self.fleet_intels.get(idx))
    }

    pub(crate) fn fleet_intel_mut(&mut self, key: &FleetKey) -> Option<&mut FleetIntel> {
        let idx = *self.fleet_index.get(key)?;
        self.fleet_intels.get_mut(idx)
    }

    /// Append a fleet record and point its key at it, even if the key was already indexed.
    pub(crate) fn push_fleet_intel(&mut self, intel: FleetIntel) -> &mut FleetIntel {
        let idx = self.fleet_intels.len();
        self.fleet_index.insert(intel.key(), idx);
        self.fleet_intels.push(intel);
        &mut self.fleet_intels[idx]
    }

    pub fn design_intels(&self) -> &[ShipDesignIntel] {
        &self.design_intels
    }

    pub fn design_intel(&self, uuid: Uuid) -> Option<&ShipDesignIntel> {
        self.design_index
            .get(&uuid)
            .and_then(|&idx| self.design_intels.get(idx))
    }

    pub(crate) fn design_intel_mut(&mut self, uuid: Uuid) -> Option<&mut ShipDesignIntel> {
        let idx = *self.design_index.get(&uuid)?;
        self.design_intels.get_mut(idx)
    }

    pub(crate) fn push_design_intel(&mut self, intel: ShipDesignIntel) -> &mut ShipDesignIntel {
        let idx = self.design_intels.len();
        self.design_index.insert(intel.uuid, idx);
        self.design_intels.push(intel);
        &mut self.design_intels[idx]
    }

    /// Age every explored planet report by one turn. Returns how many were aged.
    pub fn age_reports(&mut self) -> usize {
        let mut aged = 0;
        for intel in self.planet_intels.iter_mut().filter(|i| i.explored()) {
            let report = &mut intel.map_object.intel;
            report.report_age = report.report_age.aged();
            report.changed = true;
            aged += 1;
        }
        aged
    }

    pub fn changed_planet_intels(&self) -> impl Iterator<Item = &PlanetIntel> {
        self.planet_intels.iter().filter(|i| i.is_changed())
    }

    pub fn changed_fleet_intels(&self) -> impl Iterator<Item = &FleetIntel> {
        self.fleet_intels.iter().filter(|i| i.is_changed())
    }

    pub fn changed_design_intels(&self) -> impl Iterator<Item = &ShipDesignIntel> {
        self.design_intels.iter().filter(|i| i.is_changed())
    }

    pub fn changed_count(&self) -> usize {
        self.changed_planet_intels().count()
            + self.changed_fleet_intels().count()
            + self.changed_design_intels().count()
    }

    /// Called by the persistence layer after writing changed records.
    pub fn mark_saved(&mut self, saved_at: DateTime<Utc>) {
        let planets = self.planet_intels.iter_mut().map(|i| i as &mut dyn IntelRecord);
        let fleets = self.fleet_intels.iter_mut().map(|i| i as &mut dyn IntelRecord);
        let designs = self.design_intels.iter_mut().map(|i| i as &mut dyn IntelRecord);

        for record in planets.chain(fleets).chain(designs) {
            if !record.is_changed() {
                continue;
            }
            let intel = record.intel_mut();
            intel.created_at.get_or_insert(saved_at);
            intel.updated_at = Some(saved_at);
            intel.changed = false;
        }
    }
}

impl From<PlayerIntelRecords> for PlayerIntel {
    fn from(records: PlayerIntelRecords) -> Self {
        let mut intel = PlayerIntel {
            planet_intels: records.planet_intels,
            ..Default::default()
        };
        for fleet in records.fleet_intels {
            intel.push_fleet_intel(fleet);
        }
        for design in records.design_intels {
            intel.push_design_intel(design);
        }
        intel
    }
}

impl From<PlayerIntel> for PlayerIntelRecords {
    fn from(intel: PlayerIntel) -> Self {
        PlayerIntelRecords {
            planet_intels: intel.planet_intels,
            fleet_intels: intel.fleet_intels,
            design_intels: intel.design_intels,
        }
    }
}

/// A player and the intel it exclusively owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub num: PlayerNum,
    pub name: String,
    pub intel: PlayerIntel,
}

impl Player {
    pub fn new(id: PlayerId, num: PlayerNum, name: impl Into<String>, planet_count: usize) -> Self {
        Self {
            id,
            num,
            name: name.into(),
            intel: PlayerIntel::with_planet_slots(planet_count),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({})", self.num, self.name)
    }
}
