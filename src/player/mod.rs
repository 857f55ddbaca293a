//! Automated participants.
//!
//! A [`Player`] fills in a fleet and picks attack targets for a side the
//! engine drives on its own. [`AiPlayer`] is the uniform-random opponent.

use rand::rngs::SmallRng;

use crate::{attack::AttackOutcome, board::BB, common::EngineError, fleet::PlayerState};

/// Interface implemented by automated sides.
pub trait Player: Send {
    /// Place every unplaced ship of `side`.
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        side: &mut PlayerState,
        attempts: Option<u32>,
    ) -> Result<(), EngineError>;

    /// Choose the next cell to attack given the cells already attacked on
    /// the opponent's board.
    fn select_target(&mut self, rng: &mut SmallRng, attacked: &BB) -> Option<(usize, usize)>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(&mut self, _coord: (usize, usize), _outcome: AttackOutcome) {}
}

mod ai;
pub use ai::AiPlayer;
