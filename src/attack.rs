//! Attack resolution against one side's board and fleet.

use core::fmt;

use crate::board::{AttackMark, CellContent};
use crate::common::EngineError;
use crate::fleet::PlayerState;
use crate::ship::ShipId;

/// What an attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AttackOutcome {
    /// The cell was attacked before; nothing changed.
    AlreadyAttacked,
    Miss,
    Hit { ship: ShipId },
    HitAndSunk { ship: ShipId, name: &'static str },
    /// The last afloat ship went down.
    HitAndWin { ship: ShipId, name: &'static str },
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AttackOutcome::Hit { .. } | AttackOutcome::HitAndSunk { .. } | AttackOutcome::HitAndWin { .. }
        )
    }

    /// Whether the attacker keeps the turn. Only a miss passes it.
    pub fn keeps_turn(&self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    /// Whether the attack changed any state.
    pub fn is_applied(&self) -> bool {
        !matches!(self, AttackOutcome::AlreadyAttacked)
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackOutcome::AlreadyAttacked => f.write_str("already attacked"),
            AttackOutcome::Miss => f.write_str("miss"),
            AttackOutcome::Hit { .. } => f.write_str("hit"),
            AttackOutcome::HitAndSunk { name, .. } => write!(f, "hit, sunk {}", name),
            AttackOutcome::HitAndWin { name, .. } => write!(f, "hit, sunk {}, fleet destroyed", name),
        }
    }
}

/// Apply an attack at (row, col) on `defender`.
///
/// Marks the cell, counts the hit on the occupying ship and reports sinking
/// and fleet destruction. Phase and turn rules are the caller's business.
pub fn resolve_attack(
    defender: &mut PlayerState,
    row: usize,
    col: usize,
) -> Result<AttackOutcome, EngineError> {
    let (board, fleet) = defender.parts_mut();
    // the occupant must exist before the cell is marked
    if let CellContent::Occupied(id) = board.cell(row, col)? {
        if fleet.ship(id).is_none() {
            log::error!("cell ({}, {}) points at missing ship {:?}", row, col, id);
            return Err(EngineError::InvalidCoordinate { row, col });
        }
    }
    let id = match board.mark_attack(row, col)? {
        AttackMark::AlreadyAttacked => return Ok(AttackOutcome::AlreadyAttacked),
        AttackMark::Miss => return Ok(AttackOutcome::Miss),
        AttackMark::Hit(id) => id,
    };
    let ship = fleet
        .ship_mut(id)
        .ok_or(EngineError::InvalidCoordinate { row, col })?;
    if !ship.register_hit() {
        return Ok(AttackOutcome::Hit { ship: id });
    }
    let name = ship.name();
    if fleet.all_sunk() {
        Ok(AttackOutcome::HitAndWin { ship: id, name })
    } else {
        Ok(AttackOutcome::HitAndSunk { ship: id, name })
    }
}
