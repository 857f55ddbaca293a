use rand::rngs::SmallRng;

use crate::{ai, board::BB, common::EngineError, fleet::PlayerState};

use super::Player;

/// Opponent that places at random and attacks a uniformly random open cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        side: &mut PlayerState,
        attempts: Option<u32>,
    ) -> Result<(), EngineError> {
        side.place_remaining(rng, attempts)
    }

    fn select_target(&mut self, rng: &mut SmallRng, attacked: &BB) -> Option<(usize, usize)> {
        ai::choose_attack(attacked, rng)
    }
}
