//! Stability and type classifications for environmental map objects.

use serde::{Deserialize, Serialize};

/// How stable a wormhole is. Wormholes degrade toward `ExtremelyVolatile` over time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum WormholeStability {
    RockSolid,
    Stable,
    MostlyStable,
    #[default]
    Average,
    SlightlyVolatile,
    Volatile,
    ExtremelyVolatile,
}

impl WormholeStability {
    pub const ALL: [WormholeStability; 7] = [
        WormholeStability::RockSolid,
        WormholeStability::Stable,
        WormholeStability::MostlyStable,
        WormholeStability::Average,
        WormholeStability::SlightlyVolatile,
        WormholeStability::Volatile,
        WormholeStability::ExtremelyVolatile,
    ];

    /// Next, more volatile classification. `ExtremelyVolatile` is terminal.
    pub fn degrade(self) -> Self {
        match self {
            WormholeStability::RockSolid => WormholeStability::Stable,
            WormholeStability::Stable => WormholeStability::MostlyStable,
            WormholeStability::MostlyStable => WormholeStability::Average,
            WormholeStability::Average => WormholeStability::SlightlyVolatile,
            WormholeStability::SlightlyVolatile => WormholeStability::Volatile,
            WormholeStability::Volatile | WormholeStability::ExtremelyVolatile => {
                WormholeStability::ExtremelyVolatile
            }
        }
    }

    pub fn is_terminal(self) -> bool {
        self == WormholeStability::ExtremelyVolatile
    }
}

/// Behaviour of a wormhole at a given stability.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WormholeStats {
    /// Years before the wormhole degrades; `None` means it never does.
    pub years_to_degrade: Option<u32>,
    pub chance_to_jump: f64,
    pub jiggle_distance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MineFieldType {
    #[default]
    Standard,
    Heavy,
    SpeedBump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrade_walks_toward_volatile() {
        let mut stability = WormholeStability::RockSolid;
        let mut steps = 0;
        while !stability.is_terminal() {
            let next = stability.degrade();
            assert!(next > stability);
            stability = next;
            steps += 1;
        }
        assert_eq!(steps, WormholeStability::ALL.len() - 1);
        assert_eq!(
            WormholeStability::ExtremelyVolatile.degrade(),
            WormholeStability::ExtremelyVolatile
        );
    }

    #[test]
    fn stability_serializes_by_name() {
        let json = serde_json::to_string(&WormholeStability::SlightlyVolatile).unwrap();
        assert_eq!(json, "\"SlightlyVolatile\"");
    }
}
