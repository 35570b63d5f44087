//! Shared types for the engine: grid positions, shot results and board errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::GRID_SIZE;
use crate::ship::ShipId;

/// A zero-based `(row, col)` cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether both coordinates lie in `[0, GRID_SIZE)`.
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Orthogonal neighbours that stay on the grid, in up, down, left, right order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(Position::in_bounds)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::coord::format_coordinate(self.row, self.col) {
            Some(label) => f.write_str(&label),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// Result of a shot that resolved a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Shot landed on a ship that is still afloat.
    Hit,
    /// Shot landed in open water.
    Miss,
    /// Shot landed on the last intact cell of a ship.
    Sink(ShipId),
}

impl GuessResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (a cell outside the grid).
    BitBoardError(BitBoardError),
    /// Shot targeted a cell that is already a hit or a miss.
    AlreadyShot,
    /// Ship would extend past the edge of the grid.
    ShipOutOfBounds,
    /// Ship would occupy or touch (even diagonally) another ship.
    ShipTooClose,
    /// Ships must cover between 1 and `GRID_SIZE` cells.
    InvalidShipSize(usize),
    /// Another ship on this board already uses the id.
    DuplicateShipId,
    /// No valid random placement was found within the attempt budget.
    UnableToPlaceShip,
    /// No ship with that id or index exists on this board.
    UnknownShip,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::AlreadyShot => write!(f, "Cell was already shot"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipTooClose => write!(f, "Ship placement touches another ship"),
            BoardError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            BoardError::DuplicateShipId => write!(f, "Ship id is already in use on this board"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::UnknownShip => write!(f, "No such ship on this board"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
