//! Per-player fleet bookkeeping and the board it sits on.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, CellContent};
use crate::common::EngineError;
use crate::placement::{check_placement, random_placement};
use crate::ship::{Orientation, ShipId, ShipInstance, ShipType};

/// All ship instances belonging to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<ShipInstance>,
}

impl Fleet {
    /// One unplaced instance per count unit of each catalog entry, in catalog
    /// order.
    pub fn from_catalog(catalog: &[ShipType]) -> Self {
        let ships = catalog
            .iter()
            .flat_map(|ty| (0..ty.count()).map(move |_| ShipInstance::new(*ty)))
            .collect();
        Fleet { ships }
    }

    pub fn ships(&self) -> &[ShipInstance] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipInstance> {
        self.ships.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// First unplaced instance with this type name.
    pub fn next_unplaced(&self, name: &str) -> Option<ShipId> {
        self.ships
            .iter()
            .position(|s| !s.is_placed() && s.name() == name)
            .map(ShipId)
    }

    /// Whether the catalog this fleet was built from contains `name`.
    pub fn has_type(&self, name: &str) -> bool {
        self.ships.iter().any(|s| s.name() == name)
    }

    pub fn unplaced_count(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_placed()).count()
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(|s| s.is_placed())
    }

    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    /// Ships still afloat.
    pub fn remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Option<&mut ShipInstance> {
        self.ships.get_mut(id.0)
    }
}

/// Board and fleet of one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    board: Board,
    fleet: Fleet,
}

impl PlayerState {
    pub fn new(catalog: &[ShipType]) -> Self {
        PlayerState {
            board: Board::new(),
            fleet: Fleet::from_catalog(catalog),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Commit the next unplaced ship of type `name` at `origin`.
    ///
    /// Either every cell and the fleet entry are updated, or nothing is.
    pub fn place(
        &mut self,
        name: &str,
        origin: (usize, usize),
        orientation: Orientation,
    ) -> Result<ShipId, EngineError> {
        let id = match self.fleet.next_unplaced(name) {
            Some(id) => id,
            None if self.fleet.has_type(name) => return Err(EngineError::ShipAlreadyPlaced),
            None => return Err(EngineError::UnknownShipType),
        };
        let length = self.fleet.ships[id.0].length();
        let cells = check_placement(&self.board, origin, length, orientation)?;
        self.board.occupy(id, &cells);
        self.fleet.ships[id.0].mark_placed(cells);
        log::debug!("placed {} at {:?} {}", name, origin, orientation);
        Ok(id)
    }

    /// Randomly place every ship not yet on the board.
    ///
    /// Placements made before a failure stay; a failure only happens when the
    /// remaining ships cannot fit at all.
    pub fn place_remaining<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        attempts: Option<u32>,
    ) -> Result<(), EngineError> {
        for i in 0..self.fleet.ships.len() {
            let ship = &self.fleet.ships[i];
            if ship.is_placed() {
                continue;
            }
            let (name, length) = (ship.name(), ship.length());
            let (r, c, o) = random_placement(rng, &self.board, length, attempts)?;
            self.place(name, (r, c), o)?;
        }
        Ok(())
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Board, &mut Fleet) {
        (&mut self.board, &mut self.fleet)
    }

    /// Whether the cell belongs to a ship that has been sunk.
    pub fn is_sunk_cell(&self, row: usize, col: usize) -> bool {
        match self.board.cell(row, col) {
            Ok(CellContent::Occupied(id)) => {
                self.fleet.ship(id).map_or(false, |s| s.is_sunk())
            }
            _ => false,
        }
    }
}
