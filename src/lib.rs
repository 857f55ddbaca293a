#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod attack;
mod bitboard;
mod board;
mod common;
mod config;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
mod player;
pub mod prelude;
#[cfg(feature = "std")]
mod session;
mod ship;
#[cfg(feature = "std")]
mod ui;
mod view;

pub use ai::*;
pub use attack::*;
pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
pub use placement::{can_place, check_placement, legal_placements, random_placement, Preview};
pub use player::*;
#[cfg(feature = "std")]
pub use session::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use ui::*;
pub use view::*;
