//! Effect resolution for one dice roll.
//!
//! Applies, in order: lap effects for every crossed tile, then the landed
//! tile's effect, persisting each mutation through the player store as it
//! happens. A store or supplier outage degrades the affected step to a
//! logged no-op instead of stalling the turn; game flow stays live even
//! when the economy briefly does not.

use std::fmt;

use log::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::game::{
    effect_for_tile, Board, EventEffect, EventVariable, InsuranceKind, Movement, Player, PlayerId,
    PlayerPatch, TileKind,
};
use crate::ports::{DecisionPrompt, EventSupplier, InsuranceDecision, InsuranceOffer, Notice,
    PlayerStore};

/// Outcome of resolving the effects of one roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Winner's display name, when the landed tile completed the catalog.
    pub winner: Option<String>,
}

/// Resolves tile effects against the injected collaborators.
#[derive(Clone, Copy)]
pub struct EffectEngine<'a> {
    board: &'a Board,
    store: &'a dyn PlayerStore,
    events: &'a dyn EventSupplier,
    prompt: &'a dyn DecisionPrompt,
}

impl fmt::Debug for EffectEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectEngine")
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl<'a> EffectEngine<'a> {
    /// Engine over the given board and collaborators.
    #[must_use]
    pub fn new(
        board: &'a Board,
        store: &'a dyn PlayerStore,
        events: &'a dyn EventSupplier,
        prompt: &'a dyn DecisionPrompt,
    ) -> Self {
        Self {
            board,
            store,
            events,
            prompt,
        }
    }

    /// Resolve every effect of `movement` for the player, in order: lap
    /// tiles crossed without landing first, then the landed tile.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlayerNotFound`] if the player vanished from a
    /// reachable store, and [`EngineError::DuplicateInsurance`] if the store
    /// record drifted underneath an accepted purchase. Store and supplier
    /// outages degrade to no-ops instead of erroring.
    pub fn resolve(&self, player_id: PlayerId, movement: &Movement) -> EngineResult<Resolution> {
        for &tile in movement.crossed() {
            if self.board.kind(tile).triggers_on_pass() {
                self.apply_lap_effect(tile, player_id)?;
            }
        }

        match effect_for_tile(self.board, movement.new_position) {
            Some(EventEffect::Salary | EventEffect::Rent) => {
                self.apply_lap_effect(movement.new_position, player_id)?;
                Ok(Resolution::default())
            }
            Some(EventEffect::External) => {
                self.apply_external_event(player_id)?;
                Ok(Resolution::default())
            }
            Some(EventEffect::InsuranceOffer { kind, cost }) => {
                self.resolve_offer(movement.new_position, kind, cost, player_id)
            }
            None => Ok(Resolution::default()),
        }
    }

    /// Apply the fixed effect of a lap tile: salary credit or rent debit.
    ///
    /// Never pauses the turn and never prompts. Rent that cannot be covered
    /// clamps money to zero and arms the skip penalty.
    fn apply_lap_effect(&self, tile: usize, player_id: PlayerId) -> EngineResult<()> {
        let Some(player) = self.fetch_player(player_id)? else {
            return Ok(());
        };

        match self.board.kind(tile) {
            TileKind::Salary => {
                let money = player.money.saturating_add(player.salary);
                let patch = PlayerPatch {
                    money: Some(money),
                    ..PlayerPatch::default()
                };
                self.persist(player.id, &patch)?;
                self.show(&Notice::plain(format!(
                    "You collected your salary of {}. New balance: {money}.",
                    player.salary
                )));
            }
            TileKind::Rent => {
                if player.money >= player.rent {
                    let money = player.money - player.rent;
                    let patch = PlayerPatch {
                        money: Some(money),
                        ..PlayerPatch::default()
                    };
                    self.persist(player.id, &patch)?;
                    self.show(&Notice::plain(format!(
                        "You paid your rent of {}. New balance: {money}.",
                        player.rent
                    )));
                } else {
                    let patch = PlayerPatch {
                        money: Some(0),
                        skip: Some(true),
                        ..PlayerPatch::default()
                    };
                    self.persist(player.id, &patch)?;
                    self.show(&Notice::plain(format!(
                        "You cannot cover the rent of {}. Your money drops to 0 \
                         and you lose your next turn.",
                        player.rent
                    )));
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Draw a random event from the supplier and apply it to the player.
    fn apply_external_event(&self, player_id: PlayerId) -> EngineResult<()> {
        let event = match self.events.fetch_random_event() {
            Ok(event) => event,
            Err(e) => {
                warn!("event supplier unreachable, treating tile as a no-op: {e}");
                return Ok(());
            }
        };

        let Some(player) = self.fetch_player(player_id)? else {
            return Ok(());
        };

        let insured = event
            .insurance
            .is_some_and(|kind| player.has_insurance(kind));
        let amount = event.effective_amount(insured);
        debug!(
            "external event for player {player_id}: {amount:+} on {:?} (insured: {insured})",
            event.variable
        );

        let mut message = event.text.clone();
        let mut patch = PlayerPatch::default();
        match event.variable {
            EventVariable::Money => match add_signed(player.money, amount) {
                Some(money) => patch.money = Some(money),
                None => {
                    patch.money = Some(0);
                    patch.skip = Some(true);
                    message.push_str(
                        " You cannot cover the cost: your money drops to 0 \
                         and you lose your next turn.",
                    );
                }
            },
            EventVariable::Salary => {
                patch.salary = Some(add_signed_clamped(player.salary, amount));
            }
            EventVariable::Rent => {
                patch.rent = Some(add_signed_clamped(player.rent, amount));
            }
        }
        self.persist(player.id, &patch)?;

        if insured {
            if let Some(kind) = event.insurance {
                if event.waives_in_full() {
                    message.push_str(&format!(" Your {kind} insurance covers it in full."));
                } else {
                    message.push_str(&format!(" Your {kind} insurance covers part of it."));
                }
            }
        }
        self.show(&Notice {
            message,
            icon: event.insurance,
        });

        Ok(())
    }

    /// Resolve an insurance-offer landing: pre-filter, prompt, purchase.
    fn resolve_offer(
        &self,
        tile: usize,
        kind: InsuranceKind,
        cost: u64,
        player_id: PlayerId,
    ) -> EngineResult<Resolution> {
        let Some(player) = self.fetch_player(player_id)? else {
            return Ok(Resolution::default());
        };

        if player.has_insurance(kind) {
            self.show(&Notice::with_icon(
                format!("You already hold {kind} insurance."),
                kind,
            ));
            return Ok(Resolution::default());
        }

        if player.money < cost {
            self.show(&Notice::with_icon(
                format!(
                    "You cannot afford {kind} insurance. Cost: {cost}, your money: {}.",
                    player.money
                ),
                kind,
            ));
            return Ok(Resolution::default());
        }

        let offer = InsuranceOffer { tile, kind, cost };
        let decision = match self.prompt.request_insurance_decision(&offer) {
            Ok(decision) => decision,
            Err(e) => {
                warn!("decision prompt failed, treating the offer as declined: {e}");
                InsuranceDecision { accepted: false }
            }
        };
        if !decision.accepted {
            debug!("player {player_id} declined {kind} insurance");
            return Ok(Resolution::default());
        }

        let mut insurances = player.insurances.clone();
        if !insurances.insert(kind) {
            return Err(EngineError::DuplicateInsurance(kind));
        }
        let money = player.money - cost;
        let won = insurances.len() == InsuranceKind::ALL.len();
        let patch = PlayerPatch {
            money: Some(money),
            insurances: Some(insurances),
            ..PlayerPatch::default()
        };
        self.persist(player.id, &patch)?;
        debug!("player {player_id} bought {kind} insurance for {cost}");

        if won {
            return Ok(Resolution {
                winner: Some(player.name),
            });
        }
        Ok(Resolution::default())
    }

    /// Current record for the player, or `None` when the store is down.
    fn fetch_player(&self, player_id: PlayerId) -> EngineResult<Option<Player>> {
        match self.store.list_players() {
            Ok(players) => match players.into_iter().find(|p| p.id == player_id) {
                Some(player) => Ok(Some(player)),
                None => Err(EngineError::PlayerNotFound(player_id)),
            },
            Err(e) => {
                warn!("player store unreachable, treating step as a no-op: {e}");
                Ok(None)
            }
        }
    }

    /// Write a patch back to the store, absorbing outages.
    fn persist(&self, id: PlayerId, patch: &PlayerPatch) -> EngineResult<()> {
        match self.store.update_player(id, patch) {
            Ok(_) => Ok(()),
            Err(EngineError::StoreUnavailable { reason }) => {
                warn!("dropping update for player {id}: {reason}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Surface a notice, logging instead of failing when the UI is gone.
    fn show(&self, notice: &Notice) {
        if let Err(e) = self.prompt.notify(notice) {
            warn!("notification dropped: {e}");
        }
    }
}

/// Sum of a balance and a signed delta, `None` when it would go negative.
fn add_signed(value: u64, delta: i64) -> Option<u64> {
    let sum = i128::from(value) + i128::from(delta);
    if sum < 0 {
        None
    } else {
        Some(u64::try_from(sum).unwrap_or(u64::MAX))
    }
}

/// Same as [`add_signed`], clamping negative results to zero.
fn add_signed_clamped(value: u64, delta: i64) -> u64 {
    add_signed(value, delta).unwrap_or(0)
}
