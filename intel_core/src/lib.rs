//! Fog-of-war intel for the Stellar headless server.
//!
//! Each player keeps a private, possibly stale picture of the galaxy. The
//! [`discovery`] functions reconcile live world objects into that picture,
//! and [`run_scan_pass`] drives them once per turn for every player.

pub mod cargo;
pub mod discovery;
pub mod environment;
pub mod ids;
pub mod intel;
pub mod player_discovery;
pub mod player_intel;
pub mod rules;
pub mod scan;
pub mod sentinels;
pub mod world;

pub use cargo::{Cargo, Mineral};
pub use discovery::{
    discover_design, discover_fleet, discover_fleet_cargo, discover_planet, discover_planet_cargo,
    estimate_population, DiscoveryError,
};
pub use environment::{MineFieldType, WormholeStability, WormholeStats};
pub use ids::{PlayerId, PlayerNum};
pub use intel::{
    FleetIntel, FleetKey, Intel, IntelRecord, MapObjectIntel, MineFieldIntel, MineralPacketIntel,
    PlanetIntel, SalvageIntel, ShipDesignIntel,
};
pub use player_discovery::{NoopPlayerInfoDiscoverer, PlayerInfoDiscoverer};
pub use player_intel::{Player, PlayerIntel, PlayerIntelRecords};
pub use rules::{load_rules_from_env, Rules, RulesError, RulesMetadata, RULES_PATH_ENV};
pub use scan::{run_scan_pass, PlayerScan, ScanError, ScanFlags, ScanSummary, Sighting};
pub use sentinels::{Owner, ReportAge};
pub use world::{
    Fleet, Hab, MapObject, MapObjectType, Planet, ShipDesign, ShipDesignSlot, ShipDesignSpec,
    Vector, World,
};
