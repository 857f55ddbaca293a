//! One player's grid: ship occupancy plus the marks left by attacks.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::EngineError;
use crate::config::GRID;
use crate::ship::ShipId;

/// Bitboard sized for the game grid.
pub type BB = BitBoard<u128, GRID>;

/// What sits in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Occupied(ShipId),
}

/// Result of marking an attack on a board, before fleet bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMark {
    Miss,
    Hit(ShipId),
    AlreadyAttacked,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[CellContent; GRID]; GRID],
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// An all-water board with no attacks.
    pub fn new() -> Self {
        Board {
            cells: [[CellContent::Empty; GRID]; GRID],
            ship_map: BB::new(),
            hits: BB::new(),
            misses: BB::new(),
        }
    }

    /// Side length of the grid.
    pub const fn size(&self) -> usize {
        GRID
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < GRID && col < GRID
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<CellContent, EngineError> {
        if !Self::in_bounds(row, col) {
            return Err(EngineError::InvalidCoordinate { row, col });
        }
        Ok(self.cells[row][col])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.ship_map.contains(row, col)
    }

    /// Occupancy of every ship.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Every cell that has been attacked, hit or miss.
    pub fn attacked(&self) -> BB {
        self.hits | self.misses
    }

    pub fn is_attacked(&self, row: usize, col: usize) -> bool {
        self.attacked().contains(row, col)
    }

    /// Cells still open to attack.
    pub fn unattacked(&self) -> BB {
        !self.attacked()
    }

    /// Write `ship` into the given cells. The caller has validated them.
    pub(crate) fn occupy(&mut self, ship: ShipId, cells: &[(usize, usize)]) {
        for &(r, c) in cells {
            debug_assert_eq!(self.cells[r][c], CellContent::Empty);
            self.cells[r][c] = CellContent::Occupied(ship);
            let placed = self.ship_map.set(r, c);
            debug_assert!(placed.is_ok());
        }
    }

    /// Record an attack at (row, col).
    pub(crate) fn mark_attack(&mut self, row: usize, col: usize) -> Result<AttackMark, EngineError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Ok(AttackMark::AlreadyAttacked);
        }
        match self.cells[row][col] {
            CellContent::Occupied(id) => {
                self.hits.set(row, col)?;
                Ok(AttackMark::Hit(id))
            }
            CellContent::Empty => {
                self.misses.set(row, col)?;
                Ok(AttackMark::Miss)
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..GRID {
            for c in 0..GRID {
                let ch = if self.hits.contains(r, c) {
                    'X'
                } else if self.misses.contains(r, c) {
                    'o'
                } else if self.ship_map.contains(r, c) {
                    'S'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
