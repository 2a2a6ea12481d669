use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Mineral quantities, in kT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mineral {
    pub ironium: i32,
    pub boranium: i32,
    pub germanium: i32,
}

impl Mineral {
    pub fn new(ironium: i32, boranium: i32, germanium: i32) -> Self {
        Self {
            ironium,
            boranium,
            germanium,
        }
    }

    pub fn total(&self) -> i32 {
        self.ironium
            .saturating_add(self.boranium)
            .saturating_add(self.germanium)
    }
}

/// Contents of a cargo hold or a planet's surface stockpile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cargo {
    pub ironium: i32,
    pub boranium: i32,
    pub germanium: i32,
    /// Colonists in kT (100 people each).
    pub colonists: i32,
}

impl Cargo {
    pub fn new(ironium: i32, boranium: i32, germanium: i32, colonists: i32) -> Self {
        Self {
            ironium,
            boranium,
            germanium,
            colonists,
        }
    }

    pub fn add_mineral(self, mineral: Mineral) -> Self {
        Self {
            ironium: self.ironium.saturating_add(mineral.ironium),
            boranium: self.boranium.saturating_add(mineral.boranium),
            germanium: self.germanium.saturating_add(mineral.germanium),
            colonists: self.colonists,
        }
    }

    pub fn to_mineral(self) -> Mineral {
        Mineral::new(self.ironium, self.boranium, self.germanium)
    }

    /// The same bundle with colonists removed.
    pub fn minerals_only(self) -> Self {
        Self {
            colonists: 0,
            ..self
        }
    }

    pub fn total(&self) -> i32 {
        self.ironium
            .saturating_add(self.boranium)
            .saturating_add(self.germanium)
            .saturating_add(self.colonists)
    }

    /// True if `amount` can be taken out of this cargo without going negative.
    pub fn can_transfer(&self, amount: &Cargo) -> bool {
        self.ironium >= amount.ironium
            && self.boranium >= amount.boranium
            && self.germanium >= amount.germanium
            && self.colonists >= amount.colonists
    }
}

impl Add for Cargo {
    type Output = Cargo;

    fn add(self, other: Cargo) -> Cargo {
        Cargo {
            ironium: self.ironium.saturating_add(other.ironium),
            boranium: self.boranium.saturating_add(other.boranium),
            germanium: self.germanium.saturating_add(other.germanium),
            colonists: self.colonists.saturating_add(other.colonists),
        }
    }
}

impl Sub for Cargo {
    type Output = Cargo;

    fn sub(self, other: Cargo) -> Cargo {
        Cargo {
            ironium: self.ironium.saturating_sub(other.ironium),
            boranium: self.boranium.saturating_sub(other.boranium),
            germanium: self.germanium.saturating_sub(other.germanium),
            colonists: self.colonists.saturating_sub(other.colonists),
        }
    }
}
