//! Placement validation and random placement.
//!
//! Everything here is read-only with respect to the board; committing a
//! placement is [`PlayerState::place`](crate::PlayerState::place).

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{EngineError, PlacementError};
use crate::config::GRID;
use crate::ship::{span, Orientation};

/// Whether a ship of `length` fits at `origin` without leaving the board or
/// touching an occupied cell.
pub fn can_place(
    board: &Board,
    origin: (usize, usize),
    length: usize,
    orientation: Orientation,
) -> bool {
    check_placement(board, origin, length, orientation).is_ok()
}

/// The cells a placement would cover, or why it is illegal. Bounds are
/// checked before overlap so a ship hanging off the edge reports
/// `OutOfBounds` even if its in-bounds part overlaps.
pub fn check_placement(
    board: &Board,
    origin: (usize, usize),
    length: usize,
    orientation: Orientation,
) -> Result<Vec<(usize, usize)>, PlacementError> {
    let mut cells = Vec::with_capacity(length);
    for cell in span(origin, length, orientation) {
        match cell {
            Some((r, c)) if Board::in_bounds(r, c) => cells.push((r, c)),
            _ => return Err(PlacementError::OutOfBounds),
        }
    }
    if cells.iter().any(|&(r, c)| board.is_occupied(r, c)) {
        return Err(PlacementError::Overlap);
    }
    Ok(cells)
}

/// Hover feedback for a pending placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Spanned cells that fall on the board.
    pub cells: Vec<(usize, usize)>,
    pub legal: bool,
}

/// Cells to highlight for a ship of `length` at `origin`, and whether
/// dropping it there would succeed.
pub fn preview(
    board: &Board,
    origin: (usize, usize),
    length: usize,
    orientation: Orientation,
) -> Preview {
    let cells = span(origin, length, orientation)
        .flatten()
        .filter(|&(r, c)| Board::in_bounds(r, c))
        .collect();
    Preview {
        cells,
        legal: can_place(board, origin, length, orientation),
    }
}

/// Every legal `(row, col, orientation)` for a ship of `length`.
pub fn legal_placements(board: &Board, length: usize) -> Vec<(usize, usize, Orientation)> {
    let mut out = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        for r in 0..GRID {
            for c in 0..GRID {
                if can_place(board, (r, c), length, orientation) {
                    out.push((r, c, orientation));
                }
            }
        }
    }
    out
}

/// Draw a uniformly random origin and a 50/50 orientation until the ship
/// fits.
///
/// With `attempts == None` this retries without bound: on a 10×10 board with
/// the standard fleet it terminates with probability 1, not with certainty.
/// With a cap, running out of draws falls back to picking uniformly among
/// [`legal_placements`], which is the same distribution rejection sampling
/// converges to.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    length: usize,
    attempts: Option<u32>,
) -> Result<(usize, usize, Orientation), EngineError> {
    let mut tries = 0u32;
    while attempts.map_or(true, |max| tries < max) {
        tries += 1;
        let orientation = if rng.random::<bool>() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let r = rng.random_range(0..GRID);
        let c = rng.random_range(0..GRID);
        if can_place(board, (r, c), length, orientation) {
            return Ok((r, c, orientation));
        }
    }

    log::debug!(
        "no fit for length {} after {} draws, enumerating legal spots",
        length,
        tries
    );
    let legal = legal_placements(board, length);
    if legal.is_empty() {
        return Err(EngineError::UnableToPlaceShip);
    }
    Ok(legal[rng.random_range(0..legal.len())])
}
