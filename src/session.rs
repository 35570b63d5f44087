#![cfg(feature = "std")]

//! Async host for a [`GameEngine`].
//!
//! The session keeps the engine behind a tokio mutex so every mutation runs
//! one at a time, and turns each [`ScheduledMove`] the engine hands out into
//! a spawned task that sleeps for the move's delay before running it. Turn
//! changes are published on a watch channel.

use std::sync::Arc;

use log::debug;
use tokio::sync::{watch, Mutex};

use crate::game::{GameEngine, GameError, GameSnapshot, GameState, ScheduledMove};

#[derive(Clone)]
pub struct MatchSession {
    engine: Arc<Mutex<GameEngine>>,
    turn: Arc<watch::Sender<GameState>>,
}

impl MatchSession {
    pub fn new(engine: GameEngine) -> Self {
        let (turn, _) = watch::channel(engine.state());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            turn: Arc::new(turn),
        }
    }

    /// Fire at the computer's board and, if the turn passed to the computer,
    /// schedule its reply. Must be called from within a tokio runtime.
    pub async fn player_shoot(&self, row: usize, col: usize) -> Result<bool, GameError> {
        let mut engine = self.engine.lock().await;
        let fired = engine.player_shoot(row, col)?;
        self.turn.send_replace(engine.state());
        if let Some(ticket) = engine.take_scheduled_move() {
            self.schedule(ticket);
        }
        Ok(fired)
    }

    fn schedule(&self, ticket: ScheduledMove) {
        let engine = Arc::clone(&self.engine);
        let turn = Arc::clone(&self.turn);
        tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            let mut engine = engine.lock().await;
            if let Some(shot) = engine.computer_move(ticket) {
                debug!("computer fired at {}", shot);
            }
            turn.send_replace(engine.state());
        });
    }

    /// Start a new match. A computer move still sleeping from the previous
    /// match wakes up stale and does nothing.
    pub async fn reset(&self) -> Result<(), GameError> {
        let mut engine = self.engine.lock().await;
        let res = engine.reset();
        self.turn.send_replace(engine.state());
        res
    }

    pub async fn state(&self) -> GameState {
        self.engine.lock().await.state()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// Receiver that observes every turn change.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.turn.subscribe()
    }

    /// Wait until the computer has finished its move.
    ///
    /// Never resolves if the computer is left without a target, which a
    /// standard fleet cannot cause.
    pub async fn wait_for_player(&self) -> GameState {
        let mut rx = self.turn.subscribe();
        let seen = rx
            .wait_for(|s| *s != GameState::ComputerTurn)
            .await
            .map(|s| *s);
        match seen {
            Ok(state) => state,
            Err(_) => self.state().await,
        }
    }
}
