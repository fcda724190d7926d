//! Random event deck.
//!
//! Implements [`EventSupplier`] over a list of event records, mirroring a
//! remote supplier that serves one uniformly drawn record per request. The
//! deck is JSON-loadable and the draw order is fixed by a seed, so whole
//! games replay bit-for-bit.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{EngineError, EngineResult};
use crate::game::{EventVariable, InsuranceKind, RandomEvent};
use crate::ports::EventSupplier;

/// Event deck with a seeded uniform draw.
#[derive(Debug)]
pub struct EventDeck {
    events: Vec<RandomEvent>,
    rng: Mutex<ChaCha8Rng>,
}

impl EventDeck {
    /// Deck over the given events.
    #[must_use]
    pub fn new(events: Vec<RandomEvent>, seed: u64) -> Self {
        Self {
            events,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Deck parsed from a JSON array of event records.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error on malformed JSON.
    pub fn from_json(json: &str, seed: u64) -> Result<Self, serde_json::Error> {
        let events: Vec<RandomEvent> = serde_json::from_str(json)?;
        Ok(Self::new(events, seed))
    }

    /// Built-in deck covering every insurance line plus generic events.
    #[must_use]
    pub fn standard(seed: u64) -> Self {
        fn event(
            insurance: Option<InsuranceKind>,
            text: &str,
            amount: i64,
            variable: EventVariable,
            discount: f64,
        ) -> RandomEvent {
            RandomEvent {
                insurance,
                text: text.to_string(),
                amount,
                variable,
                discount,
            }
        }

        use EventVariable::{Money, Rent, Salary};
        use InsuranceKind::{Car, Health, Home, Liability, Life, Savings, Travel};

        Self::new(
            vec![
                event(
                    Some(Health),
                    "A sudden illness lands you in the clinic.",
                    -300,
                    Money,
                    1.0,
                ),
                event(
                    Some(Health),
                    "A dental emergency needs paying for.",
                    -150,
                    Money,
                    0.5,
                ),
                event(
                    Some(Life),
                    "A specialist check-up runs long and expensive.",
                    -250,
                    Money,
                    1.0,
                ),
                event(
                    Some(Life),
                    "An insurance medical exam has a co-pay.",
                    -100,
                    Money,
                    0.5,
                ),
                event(
                    Some(Car),
                    "Your car breaks down on the ring road.",
                    -400,
                    Money,
                    0.5,
                ),
                event(
                    Some(Car),
                    "A parking scrape needs bodywork.",
                    -200,
                    Money,
                    1.0,
                ),
                event(
                    Some(Travel),
                    "Your flight is cancelled the night before.",
                    -350,
                    Money,
                    1.0,
                ),
                event(
                    Some(Home),
                    "A burst pipe floods the kitchen.",
                    -450,
                    Money,
                    0.5,
                ),
                event(
                    Some(Liability),
                    "Your neighbor bills you for a broken window.",
                    -300,
                    Money,
                    1.0,
                ),
                event(
                    Some(Savings),
                    "Bank fees pile up on your account.",
                    -100,
                    Money,
                    1.0,
                ),
                event(None, "A tax refund arrives.", 200, Money, 1.0),
                event(None, "You win the office raffle.", 150, Money, 1.0),
                event(
                    None,
                    "Your boss bumps your salary after a strong quarter.",
                    100,
                    Salary,
                    1.0,
                ),
                event(None, "Your hours are cut back.", -50, Salary, 1.0),
                event(None, "Your landlord raises the rent.", 75, Rent, 1.0),
                event(None, "You renegotiate your lease down.", -25, Rent, 1.0),
            ],
            seed,
        )
    }

    /// Number of events in the deck.
    #[must_use]
    pub fn size(&self) -> usize {
        self.events.len()
    }

    /// Validate every record, returning the problems found.
    ///
    /// Checks the constraints a remote supplier would enforce on insert:
    /// non-empty text and a discount of either 0.5 or 1.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (index, event) in self.events.iter().enumerate() {
            if event.text.trim().is_empty() {
                problems.push(format!("event {index}: empty text"));
            }
            let half = (event.discount - 0.5).abs() < f64::EPSILON;
            if !half && !event.waives_in_full() {
                problems.push(format!(
                    "event {index}: discount {} is neither 0.5 nor 1",
                    event.discount
                ));
            }
        }
        problems
    }
}

impl EventSupplier for EventDeck {
    fn fetch_random_event(&self) -> EngineResult<RandomEvent> {
        if self.events.is_empty() {
            return Err(EngineError::EventSupplierUnavailable {
                reason: "deck is empty".to_string(),
            });
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EngineError::EventSupplierUnavailable {
                reason: "deck lock poisoned".to_string(),
            })?;
        let index = rng.gen_range(0..self.events.len());
        Ok(self.events[index].clone())
    }
}
