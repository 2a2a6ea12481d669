//! Discovery protocol: reconcile a live world object against a player's intel.
//!
//! Trusted observations (the player owns the object, or a penetrating scan
//! saw it) overwrite what the player knows and reset the report age. Anything
//! less refreshes only the always-visible fields, so older trusted knowledge
//! is never replaced with worse information.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ids::PlayerNum,
    intel::{FleetIntel, FleetKey, Intel, IntelRecord, PlanetIntel, ShipDesignIntel},
    player_intel::Player,
    rules::Rules,
    sentinels::{Owner, ReportAge},
    world::{Fleet, MapObjectType, Planet, ShipDesign},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error(
        "player {player} cannot discover planet {planet_num}: \
         slot index out of range for {slots} planet slots"
    )]
    PlanetIndexOutOfRange {
        player: PlayerNum,
        planet_num: u32,
        slots: usize,
    },
}

fn planet_slot<'p>(
    player: &'p mut Player,
    planet: &Planet,
) -> Result<&'p mut PlanetIntel, DiscoveryError> {
    let player_num = player.num;
    let slots = player.intel.planet_slot_count();
    player
        .intel
        .planet_intel_mut(planet.map_object.num)
        .ok_or(DiscoveryError::PlanetIndexOutOfRange {
            player: player_num,
            planet_num: planet.map_object.num,
            slots,
        })
}

/// Population as seen by a scanner that does not belong to the owner.
///
/// The true value is scaled by `1 - e` with `e` uniform in `[-max_error, max_error]`.
pub fn estimate_population<R: Rng + ?Sized>(population: u32, max_error: f64, rng: &mut R) -> u32 {
    let error = rng.gen::<f64>() * (2.0 * max_error) - max_error;
    let estimate = f64::from(population) * (1.0 - error);
    estimate.max(0.0) as u32
}

/// Discover a planet and record it in the player's planet intel.
pub fn discover_planet<R: Rng + ?Sized>(
    rules: &Rules,
    rng: &mut R,
    player: &mut Player,
    planet: &Planet,
    pen_scanned: bool,
) -> Result<(), DiscoveryError> {
    let player_id = player.id;
    let player_num = player.num;
    let intel = planet_slot(player, planet)?;

    // New records are always saved. After that only trusted scans flag them.
    if !intel.is_claimed() {
        let record = &mut intel.map_object.intel;
        record.player_id = Some(player_id);
        record.changed = true;
        record.report_age = ReportAge::Unexplored;
        record.player_num = Owner::Unowned;
        intel.map_object.kind = MapObjectType::Planet;
    }

    // Visible to everyone.
    let record = &mut intel.map_object.intel;
    record.game_id = planet.map_object.game_id;
    record.name.clone_from(&planet.map_object.name);
    record.num = planet.map_object.num;
    intel.map_object.position = planet.map_object.position;

    let owned_by_player = planet.map_object.player_num.is_player(player_num);

    if pen_scanned || owned_by_player {
        let record = &mut intel.map_object.intel;
        record.changed = true;
        record.player_num = planet.map_object.player_num;
        record.report_age = ReportAge::CURRENT;

        intel.hab = planet.hab;
        intel.mineral_concentration = planet.mineral_concentration;
        intel.population = if owned_by_player {
            planet.population()
        } else {
            estimate_population(planet.population(), rules.population_scanner_error, rng)
        };
    }

    debug!(
        target: "stellar::discovery",
        player = %player_num,
        planet = planet.map_object.num,
        pen_scanned,
        owned_by_player,
        report_age = %intel.map_object.intel.report_age,
        "discovery.planet"
    );
    Ok(())
}

/// Reveal the minerals sitting on a planet's surface. Colonists are not revealed.
pub fn discover_planet_cargo(player: &mut Player, planet: &Planet) -> Result<(), DiscoveryError> {
    let player_num = player.num;
    let intel = planet_slot(player, planet)?;

    intel.cargo_discovered = true;
    intel.cargo = planet.cargo.minerals_only();
    intel.mark_changed();

    debug!(
        target: "stellar::discovery",
        player = %player_num,
        planet = planet.map_object.num,
        "discovery.planet_cargo"
    );
    Ok(())
}

/// Record a sighting of a fleet.
///
/// This always appends a new record; it never looks for an existing one.
/// Discovering the same fleet twice in a turn leaves two records, with the
/// key index pointing at the newer one.
pub fn discover_fleet(player: &mut Player, fleet: &Fleet) {
    let mut intel = FleetIntel::new(fleet.map_object.player_num, fleet.map_object.name.clone());
    let record = &mut intel.map_object.intel;
    record.game_id = fleet.map_object.game_id;
    record.num = fleet.map_object.num;
    record.report_age = ReportAge::CURRENT;
    record.changed = true;
    intel.map_object.position = fleet.map_object.position;

    debug!(
        target: "stellar::discovery",
        player = %player.num,
        fleet = %intel.key(),
        "discovery.fleet"
    );
    player.intel.push_fleet_intel(intel);
}

/// Reveal the cargo of a fleet previously recorded with [`discover_fleet`].
///
/// A fleet the player never discovered is silently ignored.
pub fn discover_fleet_cargo(player: &mut Player, fleet: &Fleet) {
    let key = FleetKey::new(fleet.map_object.player_num, fleet.map_object.name.clone());
    match player.intel.fleet_intel_mut(&key) {
        Some(intel) => {
            intel.cargo = fleet.cargo;
            intel.cargo_discovered = true;
            intel.mark_changed();
            debug!(
                target: "stellar::discovery",
                player = %player.num,
                fleet = %key,
                "discovery.fleet_cargo"
            );
        }
        None => {
            trace!(
                target: "stellar::discovery",
                player = %player.num,
                fleet = %key,
                "discovery.fleet_cargo skipped=unknown_fleet"
            );
        }
    }
}

/// Discover a ship design, optionally including its slots.
///
/// Known designs are left alone unless slots are being discovered for the
/// first time, so slot knowledge is never lost or duplicated.
pub fn discover_design(player: &mut Player, design: &ShipDesign, discover_slots: bool) {
    let player_num = player.num;

    if player.intel.design_intel(design.uuid).is_none() {
        let intel = ShipDesignIntel {
            intel: Intel {
                game_id: design.game_id,
                name: design.name.clone(),
                player_num: Owner::Player(design.player_num),
                report_age: ReportAge::CURRENT,
                changed: true,
                ..Default::default()
            },
            uuid: design.uuid,
            hull: design.hull.clone(),
            hull_set_number: design.hull_set_number,
            version: design.version,
            ..Default::default()
        };
        player.intel.push_design_intel(intel);
        debug!(
            target: "stellar::discovery",
            player = %player_num,
            design = %design.uuid,
            "discovery.design"
        );
    }

    let Some(intel) = player.intel.design_intel_mut(design.uuid) else {
        return;
    };

    if discover_slots && intel.slots.is_empty() {
        intel.slots = design.slots.clone();
        intel.armor = design.spec.armor;
        intel.shields = design.spec.shield;
        intel.mark_changed();
        debug!(
            target: "stellar::discovery",
            player = %player_num,
            design = %design.uuid,
            slots = intel.slots.len(),
            "discovery.design_slots"
        );
    }
}
