use intel_core::{
    discover_design, discover_fleet, discover_fleet_cargo, discover_planet, discover_planet_cargo,
    Cargo, DiscoveryError, Fleet, FleetKey, Hab, MapObject, Mineral, Owner, Planet, Player,
    PlayerId, PlayerNum, ReportAge, Rules, ShipDesign, ShipDesignSlot, ShipDesignSpec, Vector,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn planet(num: u32, owner: Owner, population: i32) -> Planet {
    Planet {
        map_object: MapObject {
            game_id: 7,
            num,
            player_num: owner,
            name: format!("Planet {num}"),
            position: Vector::new(f64::from(num) * 20.0, 40.0),
        },
        hab: Hab::new(40, 60, 80),
        mineral_concentration: Mineral::new(30, 60, 90),
        cargo: Cargo::new(100, 200, 300, population / 100),
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2024)
}

/// Three planet slots, planet 2 penetrating-scanned with no scanner error,
/// then passively re-observed after being renamed and moved.
#[test]
fn trusted_scan_survives_passive_reobservation() {
    let rules = Rules::default().with_population_scanner_error(0.0);
    let mut rng = rng();
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 3);
    let mut target = planet(2, Owner::Player(PlayerNum(2)), 500);

    discover_planet(&rules, &mut rng, &mut player, &target, true).unwrap();

    let intel = player.intel.planet_intel(2).unwrap();
    assert_eq!(intel.map_object.intel.report_age, ReportAge::CURRENT);
    assert_eq!(intel.population, 500);
    assert!(intel.map_object.intel.changed);
    let trusted = intel.clone();

    target.map_object.name = "Renamed".to_string();
    target.map_object.position = Vector::new(1.0, 2.0);
    target.hab = Hab::new(1, 1, 1);
    target.cargo.colonists = 99;

    discover_planet(&rules, &mut rng, &mut player, &target, false).unwrap();

    let intel = player.intel.planet_intel(2).unwrap();
    assert_eq!(intel.map_object.intel.name, "Renamed");
    assert_eq!(intel.map_object.position, Vector::new(1.0, 2.0));
    assert_eq!(intel.map_object.intel.report_age, trusted.map_object.intel.report_age);
    assert_eq!(intel.map_object.intel.player_num, Owner::Player(PlayerNum(2)));
    assert_eq!(intel.hab, trusted.hab);
    assert_eq!(intel.mineral_concentration, trusted.mineral_concentration);
    assert_eq!(intel.population, 500);
}

#[test]
fn first_passive_sighting_leaves_planet_unexplored() {
    let rules = Rules::default();
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 3);

    discover_planet(
        &rules,
        &mut rng(),
        &mut player,
        &planet(3, Owner::Player(PlayerNum(4)), 800),
        false,
    )
    .unwrap();

    let intel = player.intel.planet_intel(3).unwrap();
    assert!(intel.unexplored());
    assert!(intel.map_object.intel.changed);
    assert_eq!(intel.map_object.intel.player_num, Owner::Unowned);
    assert_eq!(intel.map_object.intel.player_id, Some(PlayerId(1)));
    assert_eq!(intel.hab, Hab::default());
    assert_eq!(intel.population, 0);
}

#[test]
fn foreign_population_stays_within_scanner_error() {
    let rules = Rules::default().with_population_scanner_error(0.25);
    let mut rng = rng();
    let target = planet(1, Owner::Player(PlayerNum(9)), 40_000);

    for _ in 0..200 {
        let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 1);
        discover_planet(&rules, &mut rng, &mut player, &target, true).unwrap();
        let population = player.intel.planet_intel(1).unwrap().population;
        assert!(
            (29_999..=50_000).contains(&population),
            "estimate {population} outside scanner error"
        );
    }
}

#[test]
fn out_of_range_planet_numbers_are_rejected() {
    let rules = Rules::default();
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 3);

    for num in [0, 4] {
        let err = discover_planet(
            &rules,
            &mut rng(),
            &mut player,
            &planet(num, Owner::Unowned, 0),
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::PlanetIndexOutOfRange {
                player: PlayerNum(1),
                planet_num: num,
                slots: 3,
            }
        );

        let err = discover_planet_cargo(&mut player, &planet(num, Owner::Unowned, 0)).unwrap_err();
        assert!(matches!(err, DiscoveryError::PlanetIndexOutOfRange { .. }));
    }
}

#[test]
fn cargo_discovery_is_one_way() {
    let rules = Rules::default();
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 2);
    let target = planet(1, Owner::Unowned, 1_000);

    discover_planet_cargo(&mut player, &target).unwrap();
    discover_planet(&rules, &mut rng(), &mut player, &target, false).unwrap();
    discover_planet(&rules, &mut rng(), &mut player, &target, true).unwrap();

    let intel = player.intel.planet_intel(1).unwrap();
    assert!(intel.cargo_discovered);
    assert_eq!(intel.cargo, Cargo::new(100, 200, 300, 0));
}

#[test]
fn repeated_fleet_discovery_appends_duplicates() {
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 0);
    let fleet = Fleet {
        map_object: MapObject {
            num: 4,
            player_num: Owner::Player(PlayerNum(2)),
            name: "Scout #4".to_string(),
            ..Default::default()
        },
        cargo: Cargo::new(0, 0, 0, 10),
    };

    discover_fleet(&mut player, &fleet);
    discover_fleet(&mut player, &fleet);
    discover_fleet_cargo(&mut player, &fleet);

    let fleets = player.intel.fleet_intels();
    assert_eq!(fleets.len(), 2);
    assert!(!fleets[0].cargo_discovered);
    assert!(fleets[1].cargo_discovered);

    let key = FleetKey::new(Owner::Player(PlayerNum(2)), "Scout #4");
    assert_eq!(player.intel.fleet_intel(&key), Some(&fleets[1]));
}

#[test]
fn design_slots_are_discovered_once() {
    let mut player = Player::new(PlayerId(1), PlayerNum(1), "Observer", 0);
    let mut design = ShipDesign {
        uuid: Uuid::from_u128(0xfeed),
        name: "Warship".to_string(),
        player_num: PlayerNum(3),
        hull: "Destroyer".to_string(),
        version: 2,
        slots: vec![ShipDesignSlot {
            hull_component: "Laser".to_string(),
            hull_slot_index: 1,
            quantity: 2,
        }],
        spec: ShipDesignSpec {
            armor: 200,
            shield: 40,
        },
        ..Default::default()
    };

    discover_design(&mut player, &design, false);
    assert!(player.intel.design_intel(design.uuid).unwrap().slots.is_empty());

    discover_design(&mut player, &design, true);
    let first = player.intel.design_intel(design.uuid).unwrap().clone();
    assert_eq!(first.slots.len(), 1);
    assert_eq!(first.armor, 200);
    assert_eq!(first.shields, 40);

    design.slots.push(ShipDesignSlot {
        hull_component: "Shield".to_string(),
        hull_slot_index: 2,
        quantity: 1,
    });
    design.spec.armor = 999;
    discover_design(&mut player, &design, true);

    let again = player.intel.design_intel(design.uuid).unwrap();
    assert_eq!(again, &first);
    assert_eq!(player.intel.design_intels().len(), 1);
}
