#![cfg(feature = "std")]

//! Plain-text rendering of snapshots for the terminal shell.

use std::fmt::Write as _;

use crate::{
    config::GRID,
    game::{Phase, PlayerId},
    view::{BoardView, FleetStatus, Snapshot},
};

/// Column letter for `col`, `A` for 0.
pub fn column_label(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// "B7"-style name of a cell.
pub fn coord_to_string(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col), row + 1)
}

/// Parse "B7" (case-insensitive) into (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or_else(|| "empty coordinate".to_string())?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("'{}' is not a column letter", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= GRID {
        return Err(format!(
            "column '{}' is off the board (A-{})",
            col_ch,
            column_label(GRID - 1)
        ));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("'{}' is not a row number", row_str))?;
    if row == 0 || row > GRID {
        return Err(format!("row {} is off the board (1-{})", row, GRID));
    }
    Ok((row - 1, col))
}

/// Grid with column letters and row numbers.
pub fn render_board(title: &str, board: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "   {}", title);
    out.push_str("   ");
    for c in 0..GRID {
        let _ = write!(out, " {}", column_label(c));
    }
    out.push('\n');
    for (r, row) in board.cells.iter().enumerate() {
        let _ = write!(out, "{:2} ", r + 1);
        for cell in row {
            let _ = write!(out, " {}", cell.symbol());
        }
        out.push('\n');
    }
    out
}

pub fn render_fleet(fleet: &FleetStatus) -> String {
    let mut out = String::new();
    for ship in &fleet.ships {
        let status = if ship.sunk {
            "SUNK"
        } else if ship.placed {
            "afloat"
        } else {
            "to place"
        };
        let _ = writeln!(out, "   {:<11} ({}) {}", ship.name, ship.length, status);
    }
    out
}

/// Both boards, the status line and the last message.
pub fn render_snapshot(snap: &Snapshot) -> String {
    let mut out = String::new();
    if snap.phase == Phase::ModeSelection {
        let _ = writeln!(out, "{}", snap.message);
        return out;
    }
    let _ = writeln!(out, "== {} | {} ==", snap.phase, snap.current_player);
    for id in [PlayerId::One, PlayerId::Two] {
        out.push_str(&render_board(&id.to_string(), snap.board(id)));
    }
    if snap.phase == Phase::Placement {
        let _ = writeln!(out, "   Orientation: {}", snap.orientation);
        if let Some(name) = snap.selected_ship {
            let _ = writeln!(out, "   Selected: {}", name);
        }
        out.push_str(&render_fleet(&snap.fleets[snap.current_player.index()]));
        if snap.ready_enabled {
            out.push_str("   (type 'ready' to continue)\n");
        }
    }
    let _ = writeln!(out, "{}", snap.message);
    out
}

pub const HELP: &str = "\
commands:
  mode human|ai        choose opponent
  select <ship>        pick a ship to place (e.g. select carrier)
  rotate               toggle horizontal/vertical
  place <cell>         place the selected ship (e.g. place B3)
  auto                 place your remaining ships at random
  ready                finish placement
  fire <cell>          attack the enemy board (e.g. fire E5)
  new                  start a new game
  help                 show this text
  quit                 leave";
