//! Ship catalog entries and per-player ship instances.

use alloc::vec::Vec;
use core::fmt;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Cells extend along increasing columns.
    #[default]
    Horizontal,
    /// Cells extend along increasing rows.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Row/column step applied per ship segment.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// A catalog entry: how many ships of this name and length each fleet gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipType {
    name: &'static str,
    length: usize,
    count: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self {
            name,
            length,
            count,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Instances of this type in every fleet.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Index of a ship instance within its owner's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipId(pub usize);

/// One ship of a player's fleet, placed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipInstance {
    ship_type: ShipType,
    cells: Vec<(usize, usize)>,
    hit_count: usize,
    placed: bool,
}

impl ShipInstance {
    pub(crate) fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            cells: Vec::new(),
            hit_count: 0,
            placed: false,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    /// Occupied cells in placement order, empty until placed.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_sunk(&self) -> bool {
        self.placed && self.hit_count == self.length()
    }

    pub(crate) fn mark_placed(&mut self, cells: Vec<(usize, usize)>) {
        debug_assert!(!self.placed);
        debug_assert_eq!(cells.len(), self.length());
        self.cells = cells;
        self.placed = true;
    }

    /// Count one more hit. Returns `true` when this hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hit_count += 1;
        self.is_sunk()
    }
}

/// Cells covered by a ship of `length` starting at `origin`.
///
/// Yields `None` for a segment whose coordinate would overflow `usize`; bounds
/// against the board are checked by the caller.
pub fn span(
    origin: (usize, usize),
    length: usize,
    orientation: Orientation,
) -> impl Iterator<Item = Option<(usize, usize)>> {
    let (dr, dc) = orientation.step();
    (0..length).map(move |i| {
        let r = origin.0.checked_add(dr * i)?;
        let c = origin.1.checked_add(dc * i)?;
        Some((r, c))
    })
}
