#![cfg(feature = "std")]

//! Async driver that owns a [`GameEngine`] inside one task.
//!
//! Commands arrive over an unbounded mpsc channel and are applied in the
//! order they were sent. When a command arms an automated move the session
//! spawns a timer that posts the ticket back into the same channel after its
//! delay, so the move always lands after the command that caused it. Timers
//! are never cancelled; the engine drops tickets from an older epoch.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::{
    common::EngineError,
    game::{AttackReport, GameEngine, Mode, ScheduledMove},
    ship::Orientation,
    view::Snapshot,
};

/// A UI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectMode(Mode),
    SelectShip(String),
    SetOrientation(Orientation),
    Rotate,
    PlaceShip { row: usize, col: usize },
    AutoPlace,
    Ready,
    Attack { row: usize, col: usize },
    NewGame,
}

/// Answer to an accepted command.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Set for attacks.
    pub report: Option<AttackReport>,
    pub snapshot: Snapshot,
}

/// Pushed to the UI when something happens without a command.
#[derive(Debug, Clone)]
pub enum Update {
    AutomatedMove {
        report: AttackReport,
        snapshot: Snapshot,
    },
    /// The automated move hit a broken invariant.
    Failed(EngineError),
}

enum Envelope {
    Command(Command, oneshot::Sender<Result<Reply, EngineError>>),
    Query(oneshot::Sender<Snapshot>),
    Deferred(ScheduledMove),
}

/// Cloneable sender side of a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl SessionHandle {
    /// Apply `command` and wait for its result.
    pub async fn send(&self, command: Command) -> anyhow::Result<Result<Reply, EngineError>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Command(command, reply_tx))
            .map_err(|_| anyhow::anyhow!("session has stopped"))?;
        Ok(reply_rx.await?)
    }

    /// Current render state.
    pub async fn snapshot(&self) -> anyhow::Result<Snapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Query(reply_tx))
            .map_err(|_| anyhow::anyhow!("session has stopped"))?;
        Ok(reply_rx.await?)
    }
}

pub struct Session {
    engine: GameEngine,
    rx: mpsc::UnboundedReceiver<Envelope>,
    timers: mpsc::WeakUnboundedSender<Envelope>,
    updates: mpsc::UnboundedSender<Update>,
}

impl Session {
    /// Start the session task. It stops once every [`SessionHandle`] is
    /// dropped and returns the engine.
    pub fn spawn(
        engine: GameEngine,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<Update>,
        JoinHandle<GameEngine>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (updates, updates_rx) = mpsc::unbounded_channel();
        let session = Session {
            engine,
            rx,
            timers: tx.downgrade(),
            updates,
        };
        let task = tokio::spawn(session.run());
        (SessionHandle { tx }, updates_rx, task)
    }

    async fn run(mut self) -> GameEngine {
        while let Some(envelope) = self.rx.recv().await {
            match envelope {
                Envelope::Command(command, reply) => {
                    let result = self.apply(command);
                    let _ = reply.send(result);
                }
                Envelope::Query(reply) => {
                    let _ = reply.send(self.engine.snapshot());
                }
                Envelope::Deferred(ticket) => match self.engine.play_scheduled(ticket) {
                    Ok(Some(report)) => {
                        let _ = self.updates.send(Update::AutomatedMove {
                            report,
                            snapshot: self.engine.snapshot(),
                        });
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("automated move failed: {}", e);
                        let _ = self.updates.send(Update::Failed(e));
                    }
                },
            }
            self.arm_timer();
        }
        log::debug!("session closed");
        self.engine
    }

    fn apply(&mut self, command: Command) -> Result<Reply, EngineError> {
        log::debug!("command {:?}", command);
        let engine = &mut self.engine;
        let report = match command {
            Command::SelectMode(mode) => engine.select_mode(mode).map(|_| None)?,
            Command::SelectShip(name) => engine.select_ship(&name).map(|_| None)?,
            Command::SetOrientation(o) => {
                engine.set_orientation(o);
                None
            }
            Command::Rotate => {
                engine.rotate();
                None
            }
            Command::PlaceShip { row, col } => engine.place_ship(row, col).map(|_| None)?,
            Command::AutoPlace => engine.auto_place().map(|_| None)?,
            Command::Ready => engine.ready().map(|_| None)?,
            Command::Attack { row, col } => Some(engine.attack(row, col)?),
            Command::NewGame => {
                engine.new_game();
                None
            }
        };
        Ok(Reply {
            report,
            snapshot: self.engine.snapshot(),
        })
    }

    fn arm_timer(&mut self) {
        let Some(ticket) = self.engine.take_scheduled() else {
            return;
        };
        let timers = self.timers.clone();
        tokio::spawn(async move {
            sleep(ticket.delay).await;
            if let Some(tx) = timers.upgrade() {
                let _ = tx.send(Envelope::Deferred(ticket));
            }
        });
    }
}
