//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, AttackReport, CellView, EngineConfig, EngineError, GameEngine, Mode,
    Orientation, Phase, PlayerId, Snapshot,
};

#[cfg(feature = "std")]
pub use crate::{Command, Session, SessionHandle, Update};
