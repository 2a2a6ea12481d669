#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};
use intel_core::{Player, PlayerId, PlayerNum, PlayerScan, World, RULES_PATH_ENV};
use serde::Deserialize;

static INIT: Once = Once::new();

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn ensure_test_rules() {
    INIT.call_once(|| {
        let rules_path = fixture("test_rules.json");

        debug_assert!(
            rules_path.exists(),
            "missing test rules at {}",
            rules_path.display()
        );

        std::env::set_var(RULES_PATH_ENV, &rules_path);
    });
}

#[derive(Debug, Deserialize)]
struct ScenarioPlayer {
    id: PlayerId,
    num: PlayerNum,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    turn: u64,
    world: World,
    players: Vec<ScenarioPlayer>,
    scans: Vec<PlayerScan>,
}

pub struct Scenario {
    pub turn: u64,
    pub world: World,
    pub players: Vec<Player>,
    pub scans: Vec<PlayerScan>,
}

impl Scenario {
    pub fn player(&self, num: u32) -> &Player {
        self.players
            .iter()
            .find(|player| player.num == PlayerNum(num))
            .expect("scenario player")
    }
}

pub fn load_scenario() -> Result<Scenario> {
    let path = fixture("scenario.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read scenario at {}", path.display()))?;
    let file: ScenarioFile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse scenario at {}", path.display()))?;

    let planet_count = file.world.planets.len();
    let players = file
        .players
        .into_iter()
        .map(|p| Player::new(p.id, p.num, p.name, planet_count))
        .collect();

    Ok(Scenario {
        turn: file.turn,
        world: file.world,
        players,
        scans: file.scans,
    })
}
