//! Per-turn scan pass.
//!
//! For every player, in order:
//! 1. age existing planet reports,
//! 2. apply the player's sightings through the discovery protocol,
//! 3. run player-level discovery.
//!
//! Intel records are never removed. A fleet the player already has intel on
//! is refreshed in place rather than recorded again, so what earlier turns
//! revealed (cargo in particular) is kept.
//!
//! Players run in parallel. Each worker owns exactly one player's store and
//! draws from that player's own random stream, so the outcome matches a
//! sequential pass.

use std::collections::HashMap;
use std::ops::AddAssign;

use bitflags::bitflags;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug_span, info, trace, warn};
use uuid::Uuid;

use crate::{
    discovery::{
        discover_design, discover_fleet, discover_fleet_cargo, discover_planet,
        discover_planet_cargo, DiscoveryError,
    },
    ids::PlayerNum,
    intel::FleetKey,
    player_discovery::PlayerInfoDiscoverer,
    player_intel::Player,
    rules::Rules,
    sentinels::ReportAge,
    world::{Fleet, World},
};

bitflags! {
    /// What a sighting was able to reveal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ScanFlags: u8 {
        /// Trusted scan: reveals owner, habitability, minerals and population.
        const PENETRATING = 1 << 0;
        /// Reveals cargo of planets and fleets.
        const CARGO = 1 << 1;
        /// Reveals the slots of a ship design.
        const DESIGN_SLOTS = 1 << 2;
    }
}

/// One object a player's scanners picked up this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Sighting {
    Planet {
        num: u32,
        #[serde(default)]
        flags: ScanFlags,
    },
    Fleet {
        owner: PlayerNum,
        num: u32,
        #[serde(default)]
        flags: ScanFlags,
    },
    Design {
        uuid: Uuid,
        #[serde(default)]
        flags: ScanFlags,
    },
}

/// Everything one player saw this turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerScan {
    pub player: PlayerNum,
    pub sightings: Vec<Sighting>,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("player {player} sighted planet {num}, which is not in the world")]
    UnknownPlanet { player: PlayerNum, num: u32 },
    #[error("player {player} sighted fleet {num} of player {owner}, which is not in the world")]
    UnknownFleet {
        player: PlayerNum,
        owner: PlayerNum,
        num: u32,
    },
    #[error("player {player} sighted design {uuid}, which is not in the world")]
    UnknownDesign { player: PlayerNum, uuid: Uuid },
    #[error("scan submitted for unknown player {0}")]
    UnknownPlayer(PlayerNum),
}

/// Counts gathered over a scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub players: usize,
    pub reports_aged: usize,
    pub planets_scanned: usize,
    pub fleets_discovered: usize,
    pub designs_known: usize,
    /// Records flagged for the persistence layer after the pass.
    pub changed_records: usize,
}

impl AddAssign for ScanSummary {
    fn add_assign(&mut self, other: Self) {
        self.players += other.players;
        self.reports_aged += other.reports_aged;
        self.planets_scanned += other.planets_scanned;
        self.fleets_discovered += other.fleets_discovered;
        self.designs_known += other.designs_known;
        self.changed_records += other.changed_records;
    }
}

/// Run one turn of discovery for every player.
pub fn run_scan_pass<D>(
    rules: &Rules,
    turn: u64,
    world: &World,
    players: &mut [Player],
    scans: &[PlayerScan],
    discoverer: &D,
) -> Result<ScanSummary, ScanError>
where
    D: PlayerInfoDiscoverer + ?Sized,
{
    let mut sightings: HashMap<PlayerNum, Vec<&Sighting>> = HashMap::new();
    for scan in scans {
        if !players.iter().any(|player| player.num == scan.player) {
            return Err(ScanError::UnknownPlayer(scan.player));
        }
        sightings
            .entry(scan.player)
            .or_default()
            .extend(scan.sightings.iter());
    }

    info!(
        target: "stellar::scan",
        turn,
        players = players.len(),
        sightings = scans.iter().map(|scan| scan.sightings.len()).sum::<usize>(),
        "scan_pass.start"
    );

    let results: Vec<ScanSummary> = players
        .par_iter_mut()
        .map(|player| {
            let seen = sightings
                .get(&player.num)
                .map(Vec::as_slice)
                .unwrap_or_default();
            scan_player(rules, turn, world, player, seen, discoverer)
        })
        .collect::<Result<_, _>>()?;

    let mut summary = ScanSummary::default();
    for result in results {
        summary += result;
    }

    info!(
        target: "stellar::scan",
        turn,
        planets_scanned = summary.planets_scanned,
        fleets_discovered = summary.fleets_discovered,
        changed_records = summary.changed_records,
        "scan_pass.end"
    );
    Ok(summary)
}

fn scan_player<D>(
    rules: &Rules,
    turn: u64,
    world: &World,
    player: &mut Player,
    sightings: &[&Sighting],
    discoverer: &D,
) -> Result<ScanSummary, ScanError>
where
    D: PlayerInfoDiscoverer + ?Sized,
{
    let _span = debug_span!(target: "stellar::scan", "scan_player", player = %player.num, turn)
        .entered();

    let mut rng = rules.rng_for(turn, player.num);
    let mut summary = ScanSummary {
        players: 1,
        reports_aged: player.intel.age_reports(),
        ..Default::default()
    };

    for sighting in sightings {
        match **sighting {
            Sighting::Planet { num, flags } => {
                let planet = world.planet(num).ok_or(ScanError::UnknownPlanet {
                    player: player.num,
                    num,
                })?;
                discover_planet(
                    rules,
                    &mut rng,
                    player,
                    planet,
                    flags.contains(ScanFlags::PENETRATING),
                )
                .inspect_err(|err| {
                    warn!(target: "stellar::scan", error = %err, "scan_pass.planet_rejected")
                })?;
                if flags.contains(ScanFlags::CARGO) {
                    discover_planet_cargo(player, planet)?;
                }
                summary.planets_scanned += 1;
            }
            Sighting::Fleet { owner, num, flags } => {
                let fleet = world.fleet(owner, num).ok_or(ScanError::UnknownFleet {
                    player: player.num,
                    owner,
                    num,
                })?;
                if !refresh_known_fleet(player, fleet) {
                    discover_fleet(player, fleet);
                }
                if flags.contains(ScanFlags::CARGO) {
                    discover_fleet_cargo(player, fleet);
                }
                summary.fleets_discovered += 1;
            }
            Sighting::Design { uuid, flags } => {
                let design = world.design(uuid).ok_or(ScanError::UnknownDesign {
                    player: player.num,
                    uuid,
                })?;
                discover_design(player, design, flags.contains(ScanFlags::DESIGN_SLOTS));
            }
        }
    }

    discoverer.discover_player_info(player);

    summary.designs_known = player.intel.design_intels().len();
    summary.changed_records = player.intel.changed_count();
    Ok(summary)
}

/// Update the always-visible fields of existing fleet intel. Returns false
/// when the player has no intel on this fleet yet.
fn refresh_known_fleet(player: &mut Player, fleet: &Fleet) -> bool {
    let key = FleetKey::new(fleet.map_object.player_num, fleet.map_object.name.clone());
    let Some(intel) = player.intel.fleet_intel_mut(&key) else {
        return false;
    };

    let record = &mut intel.map_object.intel;
    record.game_id = fleet.map_object.game_id;
    record.num = fleet.map_object.num;
    record.report_age = ReportAge::CURRENT;
    record.changed = true;
    intel.map_object.position = fleet.map_object.position;

    trace!(
        target: "stellar::scan",
        player = %player.num,
        fleet = %key,
        "scan_pass.fleet_refreshed"
    );
    true
}
