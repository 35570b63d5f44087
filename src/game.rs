//! Turn-based match between the player and the computer.
//!
//! [`GameEngine`] owns both boards and the computer's [`TargetingAgent`].
//! It is fully synchronous: a player shot that does not end the match leaves
//! behind a [`ScheduledMove`] ticket, and whoever hosts the engine runs
//! [`GameEngine::computer_move`] with that ticket once the delay has passed.
//! Tickets carry the epoch they were issued in, and [`GameEngine::reset`]
//! bumps the epoch, so a move scheduled before a reset is ignored.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::agent::TargetingAgent;
use crate::board::{Board, GridView, Perspective};
use crate::common::{BoardError, GuessResult, Position};
use crate::config::{ship_class, MatchConfig, FLEET, STARTING_MESSAGE};
use crate::ship::ShipStats;

const ALREADY_SHOT_MESSAGE: &str = "You already shot at this location!";
const PLAYER_WON_MESSAGE: &str = "🎉 You won! All enemy ships are sunk!";
const SUNK_NOTICE: &str = " sunk!";
const COMPUTER_WON_NOTICE: &str = " 💥 Game Over! Computer sunk all your ships!";

/// Whose move it is, or who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    PlayerTurn,
    ComputerTurn,
    PlayerWon,
    ComputerWon,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::PlayerWon | GameState::ComputerWon)
    }
}

/// Errors returned by [`GameEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The player tried to shoot while it was not their turn.
    NotPlayersTurn,
    /// The player aimed outside the grid.
    OutOfBounds(Position),
    /// A fleet could not be deployed within the configured attempts.
    FleetPlacement(BoardError),
    /// Unexpected board failure while resolving a shot.
    Board(BoardError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotPlayersTurn => write!(f, "Not player's turn"),
            GameError::OutOfBounds(p) => {
                write!(f, "Cell ({}, {}) is outside the grid", p.row, p.col)
            }
            GameError::FleetPlacement(e) => write!(f, "Could not deploy fleet: {}", e),
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Permission for one computer move, valid only in the epoch that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMove {
    epoch: u64,
    delay: Duration,
}

impl ScheduledMove {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// How long the host should wait before running the move.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Everything a presentation layer needs to draw the match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub state: GameState,
    pub player_won: bool,
    pub game_over: bool,
    pub message: String,
    pub player_board: GridView,
    pub computer_board: GridView,
    pub player_ships: Vec<ShipStats>,
    pub computer_ships: Vec<ShipStats>,
}

pub struct GameEngine {
    player_board: Board,
    computer_board: Board,
    agent: TargetingAgent,
    state: GameState,
    message: String,
    epoch: u64,
    pending: Option<ScheduledMove>,
    rng: SmallRng,
    config: MatchConfig,
}

impl GameEngine {
    /// Start a match with both fleets deployed. Uses `config.seed` when set,
    /// fresh entropy otherwise.
    #[cfg(feature = "std")]
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, rng)
    }

    /// Start a match drawing all randomness from `rng`. `config.seed` is ignored.
    pub fn with_rng(config: MatchConfig, rng: SmallRng) -> Result<Self, GameError> {
        let mut engine = Self {
            player_board: Board::new(),
            computer_board: Board::new(),
            agent: TargetingAgent::new(),
            state: GameState::PlayerTurn,
            message: String::from(STARTING_MESSAGE),
            epoch: 0,
            pending: None,
            rng,
            config,
        };
        engine.deploy_fleets()?;
        Ok(engine)
    }

    /// Seeded constructor for reproducible matches.
    pub fn from_seed(seed: u64) -> Result<Self, GameError> {
        Self::with_rng(
            MatchConfig::default().with_seed(seed),
            SmallRng::seed_from_u64(seed),
        )
    }

    fn deploy_fleets(&mut self) -> Result<(), GameError> {
        let attempts = self.config.fleet_setup_attempts.max(1);
        deploy_fleet(&mut self.player_board, &mut self.rng, "player", attempts)
            .map_err(GameError::FleetPlacement)?;
        deploy_fleet(&mut self.computer_board, &mut self.rng, "computer", attempts)
            .map_err(GameError::FleetPlacement)?;
        Ok(())
    }

    /// Fire at the computer's board.
    ///
    /// Returns `Ok(false)` without using up the turn if the cell was already
    /// shot. Otherwise resolves the shot, and unless that wins the match,
    /// hands the turn to the computer and leaves a [`ScheduledMove`] for the
    /// host to collect with [`GameEngine::take_scheduled_move`].
    pub fn player_shoot(&mut self, row: usize, col: usize) -> Result<bool, GameError> {
        if self.state != GameState::PlayerTurn {
            return Err(GameError::NotPlayersTurn);
        }
        let target = Position::new(row, col);
        if !target.in_bounds() {
            return Err(GameError::OutOfBounds(target));
        }
        if self.computer_board.has_been_shot(row, col) {
            self.message = String::from(ALREADY_SHOT_MESSAGE);
            return Ok(false);
        }

        let result = self.computer_board.fire(row, col).map_err(GameError::Board)?;
        self.message = String::from(if result.is_hit() { "Hit!" } else { "Miss!" });
        announce_sinking(&mut self.message, &self.computer_board, result, "Computer");

        if self.computer_board.all_ships_sunk() {
            self.state = GameState::PlayerWon;
            self.message = String::from(PLAYER_WON_MESSAGE);
            info!("player won (epoch {})", self.epoch);
            return Ok(true);
        }

        self.state = GameState::ComputerTurn;
        self.pending = Some(ScheduledMove {
            epoch: self.epoch,
            delay: self.config.computer_delay,
        });
        Ok(true)
    }

    /// The move the computer owes, if any, without claiming it.
    pub fn scheduled_move(&self) -> Option<ScheduledMove> {
        self.pending
    }

    /// Claim the outstanding computer move so it can be run later.
    pub fn take_scheduled_move(&mut self) -> Option<ScheduledMove> {
        self.pending.take()
    }

    /// Run the computer's move for `ticket`. Returns the cell it fired at.
    ///
    /// Stale tickets (issued before a reset, or arriving when it is not the
    /// computer's turn) are ignored. If the agent has nothing left to shoot,
    /// or the board rejects its pick, the move is a pass and the state is
    /// left alone.
    pub fn computer_move(&mut self, ticket: ScheduledMove) -> Option<Position> {
        if ticket.epoch != self.epoch || self.state != GameState::ComputerTurn {
            debug!(
                "ignoring computer move from epoch {} (current epoch {}, state {:?})",
                ticket.epoch, self.epoch, self.state
            );
            return None;
        }
        if self.pending == Some(ticket) {
            self.pending = None;
        }

        let Some(shot) = self.agent.next_shot(&mut self.rng, &self.player_board) else {
            debug!("computer has no target left; passing");
            return None;
        };
        let result = match self.player_board.fire(shot.row, shot.col) {
            Ok(result) => result,
            Err(e) => {
                warn!("computer shot at {} rejected: {}; passing", shot, e);
                return None;
            }
        };
        self.agent
            .record_shot_result(shot, result.is_hit(), &self.player_board);

        self.message.push_str(if result.is_hit() {
            " Computer hit!"
        } else {
            " Computer missed!"
        });
        announce_sinking(&mut self.message, &self.player_board, result, "Your");

        if self.player_board.all_ships_sunk() {
            self.state = GameState::ComputerWon;
            self.message.push_str(COMPUTER_WON_NOTICE);
            info!("computer won (epoch {})", self.epoch);
        } else {
            self.state = GameState::PlayerTurn;
        }
        Some(shot)
    }

    /// Run the outstanding computer move immediately, ignoring its delay.
    pub fn run_scheduled_move(&mut self) -> Option<Position> {
        let ticket = self.pending.take()?;
        self.computer_move(ticket)
    }

    /// Clear both boards and the agent, redeploy both fleets and hand the
    /// turn back to the player. Any outstanding computer move becomes stale.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = None;
        self.player_board.reset();
        self.computer_board.reset();
        self.agent.reset();
        self.state = GameState::PlayerTurn;
        self.message = String::from(STARTING_MESSAGE);
        self.deploy_fleets()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player_won(&self) -> bool {
        self.state == GameState::PlayerWon
    }

    pub fn game_over(&self) -> bool {
        self.state.is_over()
    }

    /// Latest events, oldest first.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Increments on every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    pub fn agent(&self) -> &TargetingAgent {
        &self.agent
    }

    /// The player's own board, ships revealed.
    pub fn player_view(&self) -> GridView {
        self.player_board.view(Perspective::Owner)
    }

    /// The computer's board as the player may see it.
    pub fn computer_view(&self) -> GridView {
        self.computer_board.view(Perspective::Opponent)
    }

    pub fn player_ships(&self) -> Vec<ShipStats> {
        self.player_board.ship_stats()
    }

    pub fn computer_ships(&self) -> Vec<ShipStats> {
        self.computer_board.ship_stats()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            player_won: self.player_won(),
            game_over: self.game_over(),
            message: self.message.clone(),
            player_board: self.player_view(),
            computer_board: self.computer_view(),
            player_ships: self.player_ships(),
            computer_ships: self.computer_ships(),
        }
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("message", &self.message)
            .field("pending", &self.pending)
            .field("player_board", &self.player_board)
            .field("computer_board", &self.computer_board)
            .finish()
    }
}

/// Place the standard fleet on `board`, starting over on a cleared board
/// whenever a ship cannot be placed.
fn deploy_fleet<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    owner: &str,
    attempts: usize,
) -> Result<(), BoardError> {
    for attempt in 1..=attempts {
        board.reset();
        let placed = FLEET
            .iter()
            .all(|def| board.place_ship(rng, &format!("{}-{}", owner, def.key()), def.length()));
        if placed {
            return Ok(());
        }
        warn!(
            "{} fleet placement failed on attempt {}/{}",
            owner, attempt, attempts
        );
    }
    board.reset();
    Err(BoardError::UnableToPlaceShip)
}

/// Append a notice when `result` sank a ship on `board`. A message carries
/// at most one sunk notice, so a sinking reply to a sinking shot goes
/// unannounced.
fn announce_sinking(message: &mut String, board: &Board, result: GuessResult, owner: &str) {
    if message.contains(SUNK_NOTICE) {
        return;
    }
    if let GuessResult::Sink(id) = result {
        let class = board.ship(id).map_or("Ship", |s| ship_class(s.size()));
        message.push_str(&format!(" {} {}{}", owner, class, SUNK_NOTICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRID_SIZE;
    use crate::ship::Orientation;

    /// Engine with hand-placed fleets: a one-cell ship and a battleship per side.
    fn engine_with_dinghies() -> GameEngine {
        let mut engine = GameEngine::from_seed(9).unwrap();
        engine.player_board = Board::new();
        engine.computer_board = Board::new();
        engine
            .player_board
            .place_ship_at("player-dinghy", 1, Position::new(0, 0), Orientation::Horizontal)
            .unwrap();
        engine
            .player_board
            .place_ship_at("player-battleship", 5, Position::new(9, 0), Orientation::Horizontal)
            .unwrap();
        engine
            .computer_board
            .place_ship_at("computer-dinghy", 1, Position::new(5, 5), Orientation::Horizontal)
            .unwrap();
        engine
            .computer_board
            .place_ship_at("computer-battleship", 5, Position::new(0, 0), Orientation::Horizontal)
            .unwrap();
        engine
    }

    fn shots_on(board: &Board) -> usize {
        (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| board.has_been_shot(r, c))
            .count()
    }

    #[test]
    fn test_one_sunk_notice_per_cycle() {
        let mut engine = engine_with_dinghies();
        // steer the agent's next shot onto the player's dinghy
        engine.agent.record_shot_result(Position::new(1, 0), true, &|p: Position| {
            p != Position::new(0, 0)
        });

        assert_eq!(engine.player_shoot(5, 5), Ok(true));
        assert_eq!(engine.message(), "Hit! Computer Ship sunk!");

        assert_eq!(engine.run_scheduled_move(), Some(Position::new(0, 0)));
        assert!(engine.player_board.is_ship_sunk("player-dinghy"));
        assert_eq!(engine.message(), "Hit! Computer Ship sunk! Computer hit!");
        assert_eq!(engine.message().matches(SUNK_NOTICE).count(), 1);
        assert_eq!(engine.state(), GameState::PlayerTurn);
    }

    #[test]
    fn test_computer_sinking_is_announced_after_plain_shot() {
        let mut engine = engine_with_dinghies();
        engine.agent.record_shot_result(Position::new(1, 0), true, &|p: Position| {
            p != Position::new(0, 0)
        });

        assert_eq!(engine.player_shoot(9, 9), Ok(true));
        assert_eq!(engine.run_scheduled_move(), Some(Position::new(0, 0)));
        assert_eq!(engine.message(), "Miss! Computer hit! Your Ship sunk!");
    }

    /// Mark every cell except `keep` as already offered by the agent.
    fn exhaust_agent_except(engine: &mut GameEngine, keep: Option<Position>) {
        let none_shot = |_: Position| false;
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                let p = Position::new(r, c);
                if Some(p) != keep {
                    engine.agent.record_shot_result(p, false, &none_shot);
                }
            }
        }
    }

    #[test]
    fn test_exhausted_agent_passes() {
        let mut engine = GameEngine::from_seed(10).unwrap();
        exhaust_agent_except(&mut engine, None);
        assert_eq!(engine.agent.available_targets(), 0);

        engine.player_shoot(4, 4).unwrap();
        let message = String::from(engine.message());
        let ticket = engine.take_scheduled_move().unwrap();

        assert_eq!(engine.computer_move(ticket), None);
        assert_eq!(engine.state(), GameState::ComputerTurn);
        assert_eq!(engine.message(), message);
        assert_eq!(shots_on(&engine.player_board), 0);
    }

    #[test]
    fn test_rejected_computer_shot_passes() {
        let mut engine = GameEngine::from_seed(12).unwrap();
        let last = Position::new(3, 3);
        exhaust_agent_except(&mut engine, Some(last));
        // resolved without the agent knowing
        engine.player_board.fire(last.row, last.col).unwrap();

        engine.player_shoot(4, 4).unwrap();
        let message = String::from(engine.message());
        let ticket = engine.take_scheduled_move().unwrap();

        assert_eq!(engine.computer_move(ticket), None);
        assert_eq!(engine.state(), GameState::ComputerTurn);
        assert_eq!(engine.message(), message);
        assert_eq!(shots_on(&engine.player_board), 1);
    }
}
