//! Player records and partial updates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::game::InsuranceKind;

/// Unique identifier for a player, assigned by the store.
pub type PlayerId = u32;

/// Starting money for a fresh record.
pub const DEFAULT_MONEY: u64 = 1000;

/// Starting salary for a fresh record.
pub const DEFAULT_SALARY: u64 = 500;

/// Starting rent for a fresh record.
pub const DEFAULT_RENT: u64 = 100;

/// One player's record as held by the player store.
///
/// The store owns these; the engine reads a record, derives a
/// [`PlayerPatch`], and writes the patch back. It never keeps a copy past
/// one resolution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Cash on hand, never negative.
    #[serde(default = "default_money")]
    pub money: u64,
    /// Credited when the salary tile is crossed or landed on.
    #[serde(default = "default_salary")]
    pub salary: u64,
    /// Debited when the rent tile is crossed or landed on.
    #[serde(default = "default_rent")]
    pub rent: u64,
    /// Current tile index.
    #[serde(default)]
    pub position: usize,
    /// Insurance lines held, at most one of each.
    #[serde(default)]
    pub insurances: BTreeSet<InsuranceKind>,
    /// The next turn is forfeited.
    #[serde(default)]
    pub skip: bool,
}

fn default_money() -> u64 {
    DEFAULT_MONEY
}

fn default_salary() -> u64 {
    DEFAULT_SALARY
}

fn default_rent() -> u64 {
    DEFAULT_RENT
}

impl Player {
    /// Fresh record with the standard starting economy, at tile 0.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            money: DEFAULT_MONEY,
            salary: DEFAULT_SALARY,
            rent: DEFAULT_RENT,
            position: 0,
            insurances: BTreeSet::new(),
            skip: false,
        }
    }

    /// Whether this player holds the given insurance line.
    #[must_use]
    pub fn has_insurance(&self, kind: InsuranceKind) -> bool {
        self.insurances.contains(&kind)
    }

    /// Whether every line in the catalog is held (the win condition).
    #[must_use]
    pub fn has_full_coverage(&self) -> bool {
        self.insurances.len() == InsuranceKind::ALL.len()
    }

    /// Add an insurance line to the set.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateInsurance`] if the line is already held.
    /// Offer resolution pre-filters held lines, so this only fires when the
    /// store record drifted between read and write.
    pub fn add_insurance(&mut self, kind: InsuranceKind) -> EngineResult<()> {
        if self.insurances.insert(kind) {
            Ok(())
        } else {
            Err(EngineError::DuplicateInsurance(kind))
        }
    }
}

/// Partial field update sent to the player store.
///
/// Only populated fields are applied; the engine never replaces a whole
/// record it does not own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPatch {
    /// New money balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<u64>,
    /// New salary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    /// New rent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<u64>,
    /// New tile index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Replacement insurance set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurances: Option<BTreeSet<InsuranceKind>>,
    /// New skip flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<bool>,
}

impl PlayerPatch {
    /// Apply the populated fields to a record.
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(money) = self.money {
            player.money = money;
        }
        if let Some(salary) = self.salary {
            player.salary = salary;
        }
        if let Some(rent) = self.rent {
            player.rent = rent;
        }
        if let Some(position) = self.position {
            player.position = position;
        }
        if let Some(insurances) = &self.insurances {
            player.insurances.clone_from(insurances);
        }
        if let Some(skip) = self.skip {
            player.skip = skip;
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == PlayerPatch::default()
    }
}
