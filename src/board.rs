//! One side's grid: ship placement, shot resolution and sunk tracking.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, GuessResult, Position};
use crate::config::{GRID_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{ship_cells, Orientation, Ship, ShipId, ShipStats};

type BB = BitBoard<u128, GRID_SIZE>;

/// State of a single grid square.
///
/// The only legal transitions are `Empty -> Miss` and `Ship -> Hit`; both
/// happen in [`Board::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Miss,
    Ship(ShipId),
    Hit(ShipId),
}

impl Cell {
    /// True once the cell has been resolved by a shot.
    pub fn is_shot(&self) -> bool {
        matches!(self, Cell::Hit(_) | Cell::Miss)
    }

    pub fn ship(&self) -> Option<ShipId> {
        match self {
            Cell::Ship(id) | Cell::Hit(id) => Some(*id),
            Cell::Empty | Cell::Miss => None,
        }
    }
}

/// Whose eyes a [`Board::view`] is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// The board's owner sees every ship.
    Owner,
    /// The opponent sees shots only; a hit names its ship once that ship is sunk.
    Opponent,
}

/// What a presentation layer may show for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellView {
    Empty,
    Miss,
    Ship(ShipId),
    Hit(Option<ShipId>),
}

pub type GridView = [[CellView; GRID_SIZE]; GRID_SIZE];

/// Grid of cells plus the ships placed on it, in placement order.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; GRID_SIZE]; GRID_SIZE],
    ships: Vec<Ship>,
    ship_map: BB,
}

impl Board {
    /// An all-empty board with no ships.
    pub fn new() -> Self {
        Board {
            grid: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
            ships: Vec::new(),
            ship_map: BB::new(),
        }
    }

    pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
        Position::new(row, col).in_bounds()
    }

    /// Cell at (row, col), or `None` off the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row)?.get(col).copied()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    /// Ship by its string id.
    pub fn find_ship(&self, id: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    /// Occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Cells a ship would cover at `anchor`, if it fits and touches no other ship.
    pub fn can_place(
        &self,
        anchor: Position,
        size: usize,
        orientation: Orientation,
    ) -> Result<Vec<Position>, BoardError> {
        let cells = ship_cells(anchor, size, orientation)?;
        let mut mask = BB::new();
        for p in &cells {
            mask.set(p.row, p.col)?;
        }
        if !(mask.halo() & self.ship_map).is_empty() {
            return Err(BoardError::ShipTooClose);
        }
        Ok(cells)
    }

    /// Place a ship at a chosen anchor and orientation.
    pub fn place_ship_at(
        &mut self,
        id: &str,
        size: usize,
        anchor: Position,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        if self.find_ship(id).is_some() {
            return Err(BoardError::DuplicateShipId);
        }
        let cells = self.can_place(anchor, size, orientation)?;
        let ship_id = ShipId(self.ships.len());
        for p in &cells {
            self.grid[p.row][p.col] = Cell::Ship(ship_id);
            self.ship_map.set(p.row, p.col)?;
        }
        self.ships.push(Ship::new(String::from(id), cells));
        Ok(ship_id)
    }

    /// Search for a random valid anchor and orientation for a ship of `size`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(Position, Orientation), BoardError> {
        if size == 0 || size > GRID_SIZE {
            return Err(BoardError::InvalidShipSize(size));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_r = if orient == Orientation::Vertical {
                GRID_SIZE - size
            } else {
                GRID_SIZE - 1
            };
            let max_c = if orient == Orientation::Horizontal {
                GRID_SIZE - size
            } else {
                GRID_SIZE - 1
            };
            let anchor = Position::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.can_place(anchor, size, orient).is_ok() {
                return Ok((anchor, orient));
            }
        }
        debug!(
            "no placement for a ship of size {} after {} attempts",
            size, MAX_PLACEMENT_ATTEMPTS
        );
        Err(BoardError::UnableToPlaceShip)
    }

    /// Place a ship at a random valid position. Leaves the board untouched on failure.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        id: &str,
        size: usize,
    ) -> Result<ShipId, BoardError> {
        if self.find_ship(id).is_some() {
            return Err(BoardError::DuplicateShipId);
        }
        let (anchor, orient) = self.random_placement(rng, size)?;
        self.place_ship_at(id, size, anchor, orient)
    }

    /// Boolean form of [`Board::place_random`].
    pub fn place_ship<R: Rng + ?Sized>(&mut self, rng: &mut R, id: &str, size: usize) -> bool {
        self.place_random(rng, id, size).is_ok()
    }

    /// Resolve a shot at (row, col).
    pub fn fire(&mut self, row: usize, col: usize) -> Result<GuessResult, BoardError> {
        let cell = self
            .cell(row, col)
            .ok_or(crate::bitboard::BitBoardError::IndexOutOfBounds { row, col })?;
        match cell {
            Cell::Hit(_) | Cell::Miss => Err(BoardError::AlreadyShot),
            Cell::Empty => {
                self.grid[row][col] = Cell::Miss;
                Ok(GuessResult::Miss)
            }
            Cell::Ship(id) => {
                let ship = self
                    .ships
                    .get_mut(id.index())
                    .ok_or(BoardError::UnknownShip)?;
                ship.register_hit();
                self.grid[row][col] = Cell::Hit(id);
                if ship.is_sunk() {
                    Ok(GuessResult::Sink(id))
                } else {
                    Ok(GuessResult::Hit)
                }
            }
        }
    }

    /// Boolean form of [`Board::fire`]: true on a hit, false on a miss or a
    /// rejected shot.
    pub fn record_shot(&mut self, row: usize, col: usize) -> bool {
        matches!(self.fire(row, col), Ok(result) if result.is_hit())
    }

    pub fn has_been_shot(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|c| c.is_shot())
    }

    /// False for an unknown id.
    pub fn is_ship_sunk(&self, id: &str) -> bool {
        self.find_ship(id).is_some_and(Ship::is_sunk)
    }

    pub fn sunk_ship_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    /// A board without ships is never "all sunk".
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Back to the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Snapshot of the grid as seen from `perspective`.
    pub fn view(&self, perspective: Perspective) -> GridView {
        let mut view = [[CellView::Empty; GRID_SIZE]; GRID_SIZE];
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                view[r][c] = match (*cell, perspective) {
                    (Cell::Empty, _) => CellView::Empty,
                    (Cell::Miss, _) => CellView::Miss,
                    (Cell::Ship(id), Perspective::Owner) => CellView::Ship(id),
                    (Cell::Ship(_), Perspective::Opponent) => CellView::Empty,
                    (Cell::Hit(id), Perspective::Owner) => CellView::Hit(Some(id)),
                    (Cell::Hit(id), Perspective::Opponent) => {
                        let sunk = self.ship(id).is_some_and(Ship::is_sunk);
                        CellView::Hit(sunk.then_some(id))
                    }
                };
            }
        }
        view
    }

    pub fn ship_stats(&self) -> Vec<ShipStats> {
        self.ships.iter().map(Ship::stats).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.grid.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Miss => 'o',
                    Cell::Ship(_) => 'S',
                    Cell::Hit(_) => 'X',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}", self.ships)?;
        write!(f, "}}")
    }
}
