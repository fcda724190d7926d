//! Event catalog: insurance lines, per-tile effects, and external events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, TileKind};

/// A purchasable insurance line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceKind {
    /// Health insurance.
    Health,
    /// Life insurance.
    Life,
    /// Car insurance.
    Car,
    /// Travel insurance.
    Travel,
    /// Home insurance.
    Home,
    /// Civil liability insurance.
    Liability,
    /// Savings account coverage.
    Savings,
}

impl InsuranceKind {
    /// Every insurance line, in catalog order.
    ///
    /// Holding one of each is the win condition.
    pub const ALL: [InsuranceKind; 7] = [
        InsuranceKind::Health,
        InsuranceKind::Life,
        InsuranceKind::Car,
        InsuranceKind::Travel,
        InsuranceKind::Home,
        InsuranceKind::Liability,
        InsuranceKind::Savings,
    ];

    /// Catalog purchase cost in currency units.
    #[must_use]
    pub const fn cost(self) -> u64 {
        match self {
            InsuranceKind::Health | InsuranceKind::Liability => 200,
            InsuranceKind::Life => 300,
            InsuranceKind::Car | InsuranceKind::Travel => 400,
            InsuranceKind::Home => 500,
            InsuranceKind::Savings => 50,
        }
    }

    /// Human-readable line name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            InsuranceKind::Health => "Health",
            InsuranceKind::Life => "Life",
            InsuranceKind::Car => "Car",
            InsuranceKind::Travel => "Travel",
            InsuranceKind::Home => "Home",
            InsuranceKind::Liability => "Liability",
            InsuranceKind::Savings => "Savings",
        }
    }
}

impl fmt::Display for InsuranceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The effect a tile carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    /// Unconditional salary credit.
    Salary,
    /// Unconditional rent debit.
    Rent,
    /// Purchase offer for an insurance line.
    InsuranceOffer {
        /// Line offered.
        kind: InsuranceKind,
        /// Purchase cost.
        cost: u64,
    },
    /// Deferred effect: the resolver draws a [`RandomEvent`] from the
    /// external supplier when a token lands here.
    External,
}

/// Look up the effect for a tile.
///
/// Lookup order per index: fixed economic effect, then insurance offer, then
/// external-event marker. Exactly one applies per tile; neutral tiles yield
/// `None`.
#[must_use]
pub fn effect_for_tile(board: &Board, index: usize) -> Option<EventEffect> {
    match board.kind(index) {
        TileKind::Salary => Some(EventEffect::Salary),
        TileKind::Rent => Some(EventEffect::Rent),
        TileKind::InsuranceOffer(kind) => Some(EventEffect::InsuranceOffer {
            kind,
            cost: kind.cost(),
        }),
        TileKind::ExternalEvent => Some(EventEffect::External),
        TileKind::Neutral => None,
    }
}

/// Which player variable a random event mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventVariable {
    /// Cash on hand.
    Money,
    /// Salary credited per lap.
    Salary,
    /// Rent debited per lap.
    Rent,
}

/// An externally drawn economic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    /// Insurance line that covers this event, if any.
    #[serde(default)]
    pub insurance: Option<InsuranceKind>,
    /// Description shown to the player.
    pub text: String,
    /// Signed delta in currency units.
    pub amount: i64,
    /// Variable the delta applies to.
    pub variable: EventVariable,
    /// Fraction waived for covered players: 1 waives the event, 0.5 halves it.
    #[serde(default = "default_discount")]
    pub discount: f64,
}

fn default_discount() -> f64 {
    1.0
}

impl RandomEvent {
    /// Amount applied to the player, given their coverage.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn effective_amount(&self, insured: bool) -> i64 {
        if insured {
            (self.amount as f64 * (1.0 - self.discount)).round() as i64
        } else {
            self.amount
        }
    }

    /// Whether the event waives the full amount for covered players.
    #[must_use]
    pub fn waives_in_full(&self) -> bool {
        (self.discount - 1.0).abs() < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup_order() {
        let board = Board::standard();
        assert_eq!(effect_for_tile(&board, 0), Some(EventEffect::Salary));
        assert_eq!(effect_for_tile(&board, 11), Some(EventEffect::Rent));
        assert_eq!(
            effect_for_tile(&board, 12),
            Some(EventEffect::InsuranceOffer {
                kind: InsuranceKind::Health,
                cost: 200
            })
        );
        assert_eq!(effect_for_tile(&board, 16), Some(EventEffect::External));
    }

    #[test]
    fn test_catalog_costs() {
        assert_eq!(InsuranceKind::Savings.cost(), 50);
        assert_eq!(InsuranceKind::Home.cost(), 500);
        assert_eq!(InsuranceKind::Car.cost(), InsuranceKind::Travel.cost());
    }

    #[test]
    fn test_effective_amount_uninsured() {
        let event = RandomEvent {
            insurance: Some(InsuranceKind::Car),
            text: "crash".to_string(),
            amount: -400,
            variable: EventVariable::Money,
            discount: 0.5,
        };
        assert_eq!(event.effective_amount(false), -400);
    }

    #[test]
    fn test_effective_amount_half_coverage() {
        let event = RandomEvent {
            insurance: Some(InsuranceKind::Car),
            text: "crash".to_string(),
            amount: -401,
            variable: EventVariable::Money,
            discount: 0.5,
        };
        // Rounded to the nearest unit.
        assert_eq!(event.effective_amount(true), -201);
    }

    #[test]
    fn test_effective_amount_full_waiver() {
        let event = RandomEvent {
            insurance: Some(InsuranceKind::Health),
            text: "clinic".to_string(),
            amount: -300,
            variable: EventVariable::Money,
            discount: 1.0,
        };
        assert!(event.waives_in_full());
        assert_eq!(event.effective_amount(true), 0);
    }

    #[test]
    fn test_event_json_round_trip() {
        let json = r#"{
            "insurance": "LIABILITY",
            "text": "Your neighbor bills you for a broken window.",
            "amount": -300,
            "variable": "money",
            "discount": 1.0
        }"#;
        let event: RandomEvent = serde_json::from_str(json).expect("valid event");
        assert_eq!(event.insurance, Some(InsuranceKind::Liability));
        assert_eq!(event.variable, EventVariable::Money);
    }

    #[test]
    fn test_generic_event_defaults() {
        let json = r#"{"text": "Tax refund.", "amount": 200, "variable": "money"}"#;
        let event: RandomEvent = serde_json::from_str(json).expect("valid event");
        assert_eq!(event.insurance, None);
        assert!(event.waives_in_full());
    }
}
