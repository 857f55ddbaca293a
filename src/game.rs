//! Match state and the command/query surface a UI drives.
//!
//! [`GameEngine`] owns one [`GameState`] at a time and processes commands to
//! completion; every rejected command returns an [`EngineError`] and leaves
//! the state as it was. When the automated side gains the turn the engine
//! arms a [`ScheduledMove`]: the presentation layer waits out its delay and
//! hands it back through [`GameEngine::play_scheduled`]. Tickets are bound to
//! the game epoch, so a ticket that outlives [`GameEngine::new_game`] does
//! nothing.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use core::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    attack::{resolve_attack, AttackOutcome},
    board::Board,
    common::EngineError,
    config::{ship_type_named, EngineConfig},
    fleet::PlayerState,
    placement::{self, Preview},
    player::{AiPlayer, Player},
    ship::{Orientation, ShipType},
    view::{BoardView, CellView, FleetStatus, Snapshot},
};

/// Stage of a match. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Phase {
    ModeSelection,
    Placement,
    Battle,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::ModeSelection => "Mode Selection",
            Phase::Placement => "Ship Placement",
            Phase::Battle => "Battle",
            Phase::GameOver => "Game Over",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 0 for player 1, 1 for player 2.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Who sits on the player 2 side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Mode {
    VsHuman,
    VsAutomated,
}

/// Outcome category of the last accepted command. `Display` gives the text
/// a UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Notice {
    ChooseMode,
    ModeSelected { mode: Mode },
    ShipSelected { name: &'static str, length: usize },
    OrientationChanged { orientation: Orientation },
    ShipPlaced { name: &'static str },
    AllShipsPlaced,
    PlayerToPlace { player: PlayerId },
    BattleStart,
    AlreadyAttacked,
    Miss { next: PlayerId },
    Hit { attacker: PlayerId },
    Sunk { attacker: PlayerId, ship: &'static str },
    Win { winner: PlayerId, ship: &'static str },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ChooseMode => f.write_str("Choose a game mode to begin."),
            Notice::ModeSelected { .. } => {
                f.write_str("Select a ship, then place it on your board!")
            }
            Notice::ShipSelected { name, length } => write!(
                f,
                "Selected {} ({} cells). Choose a cell on your board to place it.",
                name, length
            ),
            Notice::OrientationChanged { orientation } => {
                write!(f, "Ship orientation: {}", orientation)
            }
            Notice::ShipPlaced { .. } => f.write_str("Continue placing your ships."),
            Notice::AllShipsPlaced => f.write_str("All ships placed! Ready when you are."),
            Notice::PlayerToPlace { player } => write!(f, "{}: Place your ships!", player),
            Notice::BattleStart => {
                f.write_str("Battle begins! Player 1, attack the enemy waters!")
            }
            Notice::AlreadyAttacked => f.write_str("You already attacked this cell!"),
            Notice::Miss { next } => write!(f, "Miss! {}'s turn.", next),
            Notice::Hit { attacker } => write!(f, "Hit! {} gets another turn!", attacker),
            Notice::Sunk { ship, .. } => write!(f, "Hit! You sunk the {}!", ship),
            Notice::Win { winner, .. } => write!(f, "Game Over! {} wins!", winner),
        }
    }
}

/// A deferred automated move. Valid for exactly one
/// [`GameEngine::play_scheduled`] call in the epoch it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMove {
    pub epoch: u64,
    pub seq: u64,
    /// How long the UI should wait before playing it.
    pub delay: Duration,
}

/// An applied (or repeated) attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub row: usize,
    pub col: usize,
    pub outcome: AttackOutcome,
}

/// Everything that describes one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    phase: Phase,
    current_player: PlayerId,
    mode: Option<Mode>,
    orientation: Orientation,
    selected_ship: Option<ShipType>,
    players: [PlayerState; 2],
    winner: Option<PlayerId>,
    notice: Notice,
}

impl GameState {
    /// Fresh match waiting for a mode choice.
    pub fn new(catalog: &[ShipType]) -> Self {
        GameState {
            phase: Phase::ModeSelection,
            current_player: PlayerId::One,
            mode: None,
            orientation: Orientation::Horizontal,
            selected_ship: None,
            players: [PlayerState::new(catalog), PlayerState::new(catalog)],
            winner: None,
            notice: Notice::ChooseMode,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn selected_ship(&self) -> Option<ShipType> {
        self.selected_ship
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn notice(&self) -> Notice {
        self.notice
    }

    /// Whether `id` is played by the engine itself.
    pub fn is_automated(&self, id: PlayerId) -> bool {
        self.mode == Some(Mode::VsAutomated) && id == PlayerId::Two
    }

    /// Whether the active player may signal ready.
    pub fn ready_enabled(&self) -> bool {
        self.phase == Phase::Placement && self.player(self.current_player).fleet().all_placed()
    }

    fn require_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn require_turn(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.current_player == player {
            Ok(())
        } else {
            Err(EngineError::NotYourTurn { player })
        }
    }
}

/// Command processor for a sequence of matches.
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    rng: SmallRng,
    opponent: Box<dyn Player>,
    epoch: u64,
    next_seq: u64,
    scheduled: Option<ScheduledMove>,
    delivered: bool,
}

impl GameEngine {
    /// Engine seeded from the thread RNG with the uniform-random opponent.
    #[cfg(feature = "std")]
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::build(config, rng, Box::new(AiPlayer::new()))
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::build(config, SmallRng::seed_from_u64(seed), Box::new(AiPlayer::new()))
    }

    /// Engine with a custom automated opponent.
    pub fn with_player(
        config: EngineConfig,
        seed: u64,
        opponent: Box<dyn Player>,
    ) -> Result<Self, EngineError> {
        Self::build(config, SmallRng::seed_from_u64(seed), opponent)
    }

    fn build(
        config: EngineConfig,
        rng: SmallRng,
        opponent: Box<dyn Player>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let state = GameState::new(&config.catalog);
        Ok(GameEngine {
            config,
            state,
            rng,
            opponent,
            epoch: 0,
            next_seq: 0,
            scheduled: None,
            delivered: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    pub fn notice(&self) -> Notice {
        self.state.notice
    }

    /// Text for the last accepted command.
    pub fn message(&self) -> String {
        self.state.notice.to_string()
    }

    pub fn ready_enabled(&self) -> bool {
        self.state.ready_enabled()
    }

    /// Number of `new_game` calls so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ---- commands ----

    /// Pick the mode. Against the automated side its fleet is placed right
    /// away.
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), EngineError> {
        self.state.require_phase(Phase::ModeSelection).map_err(rejected)?;
        if mode == Mode::VsAutomated {
            let mut side = self.state.players[PlayerId::Two.index()].clone();
            self.opponent
                .place_ships(&mut self.rng, &mut side, self.config.placement_attempts)
                .map_err(rejected)?;
            let remaining = side.fleet().unplaced_count();
            if remaining > 0 {
                log::error!("automated side left {} ship(s) unplaced", remaining);
                return Err(rejected(EngineError::FleetIncomplete { remaining }));
            }
            self.state.players[PlayerId::Two.index()] = side;
        }
        self.state.mode = Some(mode);
        self.state.phase = Phase::Placement;
        self.state.current_player = PlayerId::One;
        self.state.notice = Notice::ModeSelected { mode };
        log::info!("mode {:?} selected, placement begins", mode);
        Ok(())
    }

    /// Select the next ship of type `name` for the active player.
    pub fn select_ship(&mut self, name: &str) -> Result<ShipType, EngineError> {
        self.state.require_phase(Phase::Placement).map_err(rejected)?;
        let ty = ship_type_named(&self.config.catalog, name)
            .ok_or(EngineError::UnknownShipType)
            .map_err(rejected)?;
        let fleet = self.state.player(self.state.current_player).fleet();
        if fleet.next_unplaced(ty.name()).is_none() {
            return Err(rejected(EngineError::ShipAlreadyPlaced));
        }
        self.state.selected_ship = Some(ty);
        self.state.notice = Notice::ShipSelected {
            name: ty.name(),
            length: ty.length(),
        };
        Ok(ty)
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.state.orientation = orientation;
        self.state.notice = Notice::OrientationChanged { orientation };
    }

    /// Flip between horizontal and vertical.
    pub fn rotate(&mut self) -> Orientation {
        let next = self.state.orientation.toggled();
        self.set_orientation(next);
        next
    }

    /// Highlight for the selected ship at (row, col), if one is selected.
    pub fn preview(&self, row: usize, col: usize) -> Option<Preview> {
        if self.state.phase != Phase::Placement {
            return None;
        }
        let ty = self.state.selected_ship?;
        let board = self.state.player(self.state.current_player).board();
        Some(placement::preview(
            board,
            (row, col),
            ty.length(),
            self.state.orientation,
        ))
    }

    /// Place the selected ship for the active player.
    pub fn place_ship(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        self.place_ship_as(self.state.current_player, row, col)
    }

    /// Place the selected ship on behalf of `player`.
    pub fn place_ship_as(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<(), EngineError> {
        self.state.require_phase(Phase::Placement).map_err(rejected)?;
        self.state.require_turn(player).map_err(rejected)?;
        let ty = self
            .state
            .selected_ship
            .ok_or(EngineError::NoShipSelected)
            .map_err(rejected)?;
        let orientation = self.state.orientation;
        let side = &mut self.state.players[player.index()];
        side.place(ty.name(), (row, col), orientation)
            .map_err(rejected)?;
        self.state.selected_ship = None;
        self.state.notice = if side.fleet().all_placed() {
            Notice::AllShipsPlaced
        } else {
            Notice::ShipPlaced { name: ty.name() }
        };
        Ok(())
    }

    /// Randomly place the active player's remaining ships.
    pub fn auto_place(&mut self) -> Result<(), EngineError> {
        self.state.require_phase(Phase::Placement).map_err(rejected)?;
        let idx = self.state.current_player.index();
        let mut side = self.state.players[idx].clone();
        side.place_remaining(&mut self.rng, self.config.placement_attempts)
            .map_err(rejected)?;
        self.state.players[idx] = side;
        self.state.selected_ship = None;
        self.state.notice = Notice::AllShipsPlaced;
        Ok(())
    }

    /// The active player has finished placing.
    pub fn ready(&mut self) -> Result<(), EngineError> {
        self.state.require_phase(Phase::Placement).map_err(rejected)?;
        let current = self.state.current_player;
        let remaining = self.state.player(current).fleet().unplaced_count();
        if remaining > 0 {
            return Err(rejected(EngineError::FleetIncomplete { remaining }));
        }
        if current == PlayerId::One && self.state.mode == Some(Mode::VsHuman) {
            self.state.current_player = PlayerId::Two;
            self.state.selected_ship = None;
            self.state.notice = Notice::PlayerToPlace {
                player: PlayerId::Two,
            };
            log::info!("player 1 ready, player 2 places");
        } else {
            self.start_battle();
        }
        Ok(())
    }

    fn start_battle(&mut self) {
        self.state.phase = Phase::Battle;
        self.state.current_player = PlayerId::One;
        self.state.selected_ship = None;
        self.state.notice = Notice::BattleStart;
        log::info!("battle begins");
        if self.state.is_automated(self.state.current_player) {
            self.arm(self.config.ai_turn_delay);
        }
    }

    /// Attack for the human whose turn it is.
    ///
    /// Rejected while the automated side holds the turn.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackReport, EngineError> {
        let current = self.state.current_player;
        if self.state.phase == Phase::Battle && self.state.is_automated(current) {
            return Err(rejected(EngineError::NotYourTurn {
                player: current.other(),
            }));
        }
        self.attack_as(current, row, col)
    }

    /// Attack on behalf of `player`. The automated side only moves through
    /// [`GameEngine::play_scheduled`].
    pub fn attack_as(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<AttackReport, EngineError> {
        self.state.require_phase(Phase::Battle).map_err(rejected)?;
        self.state.require_turn(player).map_err(rejected)?;
        if self.state.is_automated(player) {
            return Err(rejected(EngineError::NotYourTurn { player }));
        }
        if !Board::in_bounds(row, col) {
            return Err(rejected(EngineError::InvalidCoordinate { row, col }));
        }
        self.apply_attack(player, row, col)
    }

    fn apply_attack(
        &mut self,
        attacker: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<AttackReport, EngineError> {
        let defender = attacker.other();
        let outcome = resolve_attack(&mut self.state.players[defender.index()], row, col)?;
        log::debug!("{} attacks ({}, {}): {}", attacker, row, col, outcome);

        match outcome {
            AttackOutcome::AlreadyAttacked => {
                self.state.notice = Notice::AlreadyAttacked;
            }
            AttackOutcome::Miss => {
                self.state.current_player = defender;
                self.state.notice = Notice::Miss { next: defender };
                if self.state.is_automated(defender) {
                    self.arm(self.config.ai_turn_delay);
                }
            }
            AttackOutcome::Hit { .. } => {
                self.state.notice = Notice::Hit { attacker };
                if self.state.is_automated(attacker) {
                    self.arm(self.config.ai_followup_delay);
                }
            }
            AttackOutcome::HitAndSunk { name, .. } => {
                self.state.notice = Notice::Sunk {
                    attacker,
                    ship: name,
                };
                if self.state.is_automated(attacker) {
                    self.arm(self.config.ai_followup_delay);
                }
            }
            AttackOutcome::HitAndWin { name, .. } => {
                self.state.phase = Phase::GameOver;
                self.state.winner = Some(attacker);
                self.state.notice = Notice::Win {
                    winner: attacker,
                    ship: name,
                };
                self.scheduled = None;
                log::info!("{} wins", attacker);
            }
        }

        Ok(AttackReport {
            attacker,
            row,
            col,
            outcome,
        })
    }

    /// Abandon the current match and start over at mode selection.
    ///
    /// Bumps the epoch so tickets issued for the old match are ignored.
    pub fn new_game(&mut self) {
        self.epoch += 1;
        self.scheduled = None;
        self.state = GameState::new(&self.config.catalog);
        log::info!("new game, epoch {}", self.epoch);
    }

    // ---- automated turns ----

    fn arm(&mut self, delay: Duration) {
        let ticket = ScheduledMove {
            epoch: self.epoch,
            seq: self.next_seq,
            delay,
        };
        self.next_seq += 1;
        self.scheduled = Some(ticket);
        self.delivered = false;
        log::debug!("automated move armed: {:?}", ticket);
    }

    /// The outstanding automated move, if any.
    pub fn scheduled_move(&self) -> Option<ScheduledMove> {
        self.scheduled
    }

    /// Hand the outstanding automated move to the caller once. Later calls
    /// return `None` until another move is armed.
    pub fn take_scheduled(&mut self) -> Option<ScheduledMove> {
        if self.delivered {
            return None;
        }
        let ticket = self.scheduled?;
        self.delivered = true;
        Some(ticket)
    }

    /// Play the automated move `ticket` stands for.
    ///
    /// `Ok(None)` when the ticket is stale: issued before a `new_game`,
    /// already played, or superseded. An unusable target from the opponent
    /// is an internal error and leaves the ticket live.
    pub fn play_scheduled(
        &mut self,
        ticket: ScheduledMove,
    ) -> Result<Option<AttackReport>, EngineError> {
        let live = self.scheduled.map_or(false, |s| {
            s.epoch == ticket.epoch && s.seq == ticket.seq && ticket.epoch == self.epoch
        });
        if !live
            || self.state.phase != Phase::Battle
            || !self.state.is_automated(self.state.current_player)
        {
            log::debug!("ignoring stale automated move {:?}", ticket);
            return Ok(None);
        }

        let attacker = self.state.current_player;
        let attacked = self.state.player(attacker.other()).board().attacked();
        let (row, col) = match self.opponent.select_target(&mut self.rng, &attacked) {
            Some(cell) => cell,
            None => {
                log::error!("automated side has no cell left to attack");
                return Err(EngineError::NoTargetsRemaining);
            }
        };
        if !Board::in_bounds(row, col) || attacked.contains(row, col) {
            log::error!("automated side chose unusable cell ({}, {})", row, col);
            return Err(EngineError::IllegalTarget { row, col });
        }
        self.scheduled = None;
        let report = self.apply_attack(attacker, row, col)?;
        self.opponent.handle_attack_result((row, col), report.outcome);
        Ok(Some(report))
    }

    /// Play the outstanding automated move now, ignoring its delay.
    pub fn play_pending(&mut self) -> Result<Option<AttackReport>, EngineError> {
        match self.scheduled {
            Some(ticket) => {
                self.delivered = true;
                self.play_scheduled(ticket)
            }
            None => Ok(None),
        }
    }

    // ---- queries ----

    /// Whose ships the presentation may reveal: the automated game always
    /// shows player 1, a two-human game shows whoever is active.
    fn perspective(&self) -> PlayerId {
        match self.state.mode {
            Some(Mode::VsAutomated) => PlayerId::One,
            _ => self.state.current_player,
        }
    }

    /// Render state of one cell of `owner`'s board.
    pub fn cell_view(&self, owner: PlayerId, row: usize, col: usize) -> CellView {
        let side = self.state.player(owner);
        let board = side.board();
        if side.is_sunk_cell(row, col) {
            CellView::Sunk
        } else if board.hits().contains(row, col) {
            CellView::Hit
        } else if board.misses().contains(row, col) {
            CellView::Miss
        } else if board.is_occupied(row, col)
            && (self.state.phase == Phase::GameOver || owner == self.perspective())
        {
            CellView::Ship
        } else {
            CellView::Empty
        }
    }

    pub fn board_view(&self, owner: PlayerId) -> BoardView {
        BoardView::from_fn(|r, c| self.cell_view(owner, r, c))
    }

    pub fn fleet_status(&self, owner: PlayerId) -> FleetStatus {
        FleetStatus::from(self.state.player(owner).fleet())
    }

    /// Everything a UI needs to redraw.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            epoch: self.epoch,
            phase: self.state.phase,
            current_player: self.state.current_player,
            mode: self.state.mode,
            orientation: self.state.orientation,
            selected_ship: self.state.selected_ship.map(|t| t.name()),
            ready_enabled: self.ready_enabled(),
            winner: self.state.winner,
            notice: self.state.notice,
            message: self.message(),
            boards: [
                self.board_view(PlayerId::One),
                self.board_view(PlayerId::Two),
            ],
            fleets: [
                self.fleet_status(PlayerId::One),
                self.fleet_status(PlayerId::Two),
            ],
        }
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("epoch", &self.epoch)
            .field("state", &self.state)
            .field("scheduled", &self.scheduled)
            .finish()
    }
}

fn rejected(err: EngineError) -> EngineError {
    log::warn!("command rejected: {}", err);
    err
}
