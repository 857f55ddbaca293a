//! Read-only render state handed to the presentation layer.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::GRID;
use crate::fleet::Fleet;
use crate::game::{Mode, Notice, Phase, PlayerId};
use crate::ship::Orientation;

/// How a single cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum CellView {
    #[default]
    Empty,
    /// Only on the viewer's own board, or on any board once the game is over.
    Ship,
    Hit,
    Miss,
    /// Part of a sunk ship.
    Sunk,
}

impl CellView {
    /// One-character rendering used by the terminal shell.
    pub fn symbol(self) -> char {
        match self {
            CellView::Empty => '.',
            CellView::Ship => 'S',
            CellView::Hit => 'X',
            CellView::Miss => 'o',
            CellView::Sunk => '#',
        }
    }
}

/// Render state of a whole board, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct BoardView {
    pub cells: [[CellView; GRID]; GRID],
}

impl BoardView {
    pub fn from_fn<F: FnMut(usize, usize) -> CellView>(mut f: F) -> Self {
        let mut cells = [[CellView::Empty; GRID]; GRID];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = f(r, c);
            }
        }
        BoardView { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellView> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn count(&self, kind: CellView) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == kind).count()
    }
}

/// Per-ship summary for a fleet panel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipStatus {
    pub name: &'static str,
    pub length: usize,
    pub placed: bool,
    pub hits: usize,
    pub sunk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct FleetStatus {
    pub ships: Vec<ShipStatus>,
}

impl FleetStatus {
    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| s.placed && !s.sunk).count()
    }
}

impl From<&Fleet> for FleetStatus {
    fn from(fleet: &Fleet) -> Self {
        let ships = fleet
            .ships()
            .iter()
            .map(|s| ShipStatus {
                name: s.name(),
                length: s.length(),
                placed: s.is_placed(),
                hits: s.hit_count(),
                sunk: s.is_sunk(),
            })
            .collect();
        FleetStatus { ships }
    }
}

/// Full redraw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Snapshot {
    pub epoch: u64,
    pub phase: Phase,
    pub current_player: PlayerId,
    pub mode: Option<Mode>,
    pub orientation: Orientation,
    pub selected_ship: Option<&'static str>,
    pub ready_enabled: bool,
    pub winner: Option<PlayerId>,
    pub notice: Notice,
    pub message: String,
    pub boards: [BoardView; 2],
    pub fleets: [FleetStatus; 2],
}

impl Snapshot {
    pub fn board(&self, owner: PlayerId) -> &BoardView {
        &self.boards[owner.index()]
    }
}
