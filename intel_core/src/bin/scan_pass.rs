use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use intel_core::{
    load_rules_from_env, run_scan_pass, NoopPlayerInfoDiscoverer, Player, PlayerId, PlayerNum,
    PlayerScan, Rules, ScanSummary, World,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one intel scan pass over a scenario", long_about = None)]
struct Args {
    /// Path to scenario JSON file
    #[arg(long)]
    scenario: PathBuf,

    /// Rules JSON file (defaults to INTEL_RULES_PATH, then the builtin rules)
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    #[serde(default)]
    turn: u64,
    world: World,
    players: Vec<ScenarioPlayer>,
    #[serde(default)]
    scans: Vec<PlayerScan>,
}

#[derive(Debug, Deserialize)]
struct ScenarioPlayer {
    id: PlayerId,
    num: PlayerNum,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    turn: u64,
    summary: ScanSummary,
    players: &'a [Player],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => Arc::new(
            Rules::from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => load_rules_from_env().0,
    };

    let scenario_json = fs::read_to_string(&args.scenario)
        .with_context(|| format!("Failed to read scenario at {}", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&scenario_json).with_context(|| {
        format!(
            "Failed to parse scenario JSON at {}",
            args.scenario.display()
        )
    })?;

    let planet_count = scenario.world.planets.len();
    let mut players: Vec<Player> = scenario
        .players
        .into_iter()
        .map(|p| Player::new(p.id, p.num, p.name, planet_count))
        .collect();

    info!(
        target: "stellar::scan",
        scenario = %args.scenario.display(),
        players = players.len(),
        planets = planet_count,
        "scenario.loaded"
    );

    let summary = run_scan_pass(
        &rules,
        scenario.turn,
        &scenario.world,
        &mut players,
        &scenario.scans,
        &NoopPlayerInfoDiscoverer,
    )
    .with_context(|| format!("Scan pass failed for turn {}", scenario.turn))?;

    let report = Report {
        turn: scenario.turn,
        summary,
        players: &players,
    };
    let output =
        serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize report")?;
    println!("{output}");
    Ok(())
}
