//! Error types shared by the engine modules.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::game::{Phase, PlayerId};

/// Why a candidate placement is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// At least one cell falls off the board.
    OutOfBounds,
    /// At least one cell is already occupied.
    Overlap,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => f.write_str("ship would extend past the board"),
            PlacementError::Overlap => f.write_str("ship would overlap another ship"),
        }
    }
}

/// Problems with an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyCatalog,
    DuplicateName(&'static str),
    InvalidLength { name: &'static str, length: usize },
    ZeroCount(&'static str),
    FleetTooLarge { cells: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCatalog => f.write_str("ship catalog is empty"),
            ConfigError::DuplicateName(name) => write!(f, "ship type {} listed twice", name),
            ConfigError::InvalidLength { name, length } => {
                write!(f, "ship type {} has unusable length {}", name, length)
            }
            ConfigError::ZeroCount(name) => write!(f, "ship type {} has a count of zero", name),
            ConfigError::FleetTooLarge { cells } => {
                write!(f, "fleet needs {} cells, more than the board holds", cells)
            }
        }
    }
}

/// A rejected command. Engine state is untouched whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The command is not valid in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// Issued on behalf of a player whose turn it is not.
    NotYourTurn { player: PlayerId },
    /// `place_ship` without a prior `select_ship`.
    NoShipSelected,
    /// Placement out of bounds or overlapping.
    IllegalPlacement(PlacementError),
    /// Name not in the fleet catalog.
    UnknownShipType,
    /// Every instance of the requested type is already on the board.
    ShipAlreadyPlaced,
    /// `ready` while ships are still unplaced.
    FleetIncomplete { remaining: usize },
    /// Coordinate outside the board.
    InvalidCoordinate { row: usize, col: usize },
    /// Random placement found no legal spot at all.
    UnableToPlaceShip,
    /// The automated opponent found nothing left to attack before the game
    /// ended. Indicates corrupted state.
    NoTargetsRemaining,
    /// The automated opponent chose a cell that is off the board or already
    /// attacked.
    IllegalTarget { row: usize, col: usize },
    Config(ConfigError),
}

impl EngineError {
    /// Whether the rejection points at a broken invariant rather than a bad
    /// request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            EngineError::NoTargetsRemaining | EngineError::IllegalTarget { .. }
        )
    }
}

impl From<BitBoardError> for EngineError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => {
                EngineError::InvalidCoordinate { row, col }
            }
        }
    }
}

impl From<PlacementError> for EngineError {
    fn from(err: PlacementError) -> Self {
        EngineError::IllegalPlacement(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WrongPhase { expected, actual } => {
                write!(f, "only allowed during {}, game is in {}", expected, actual)
            }
            EngineError::NotYourTurn { player } => write!(f, "it is not {}'s turn", player),
            EngineError::NoShipSelected => f.write_str("Please select a ship first!"),
            EngineError::IllegalPlacement(e) => {
                write!(f, "Cannot place ship here! {}", e)
            }
            EngineError::UnknownShipType => f.write_str("no such ship type in the fleet"),
            EngineError::ShipAlreadyPlaced => f.write_str("that ship is already placed"),
            EngineError::FleetIncomplete { remaining } => {
                write!(f, "{} ship(s) still to place", remaining)
            }
            EngineError::InvalidCoordinate { row, col } => {
                write!(f, "({}, {}) is not on the board", row, col)
            }
            EngineError::UnableToPlaceShip => f.write_str("no legal spot left for the ship"),
            EngineError::NoTargetsRemaining => {
                f.write_str("no unattacked cells left before the game ended")
            }
            EngineError::IllegalTarget { row, col } => {
                write!(f, "automated opponent chose unusable cell ({}, {})", row, col)
            }
            EngineError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
