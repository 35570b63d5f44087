//! Ship definitions and the per-board ship record.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Position};
use crate::config::GRID_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Index of a ship in its board's placement order.
///
/// Cells refer to their ship through this index rather than owning it, so
/// the board stays the only owner of its ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl ShipId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Entry of the fixed fleet: id suffix, display class and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    key: &'static str,
    class: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(key: &'static str, class: &'static str, length: usize) -> Self {
        Self { key, class, length }
    }

    /// Suffix used to build a unique ship id, e.g. `destroyer-2`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Name shown to players, e.g. `Destroyer`.
    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Cells covered by a ship of `size` anchored at `anchor`, or an error if
/// the ship would leave the grid.
pub fn ship_cells(
    anchor: Position,
    size: usize,
    orientation: Orientation,
) -> Result<Vec<Position>, BoardError> {
    if size == 0 || size > GRID_SIZE {
        return Err(BoardError::InvalidShipSize(size));
    }
    let fits = match orientation {
        Orientation::Horizontal => anchor.row < GRID_SIZE && anchor.col + size <= GRID_SIZE,
        Orientation::Vertical => anchor.col < GRID_SIZE && anchor.row + size <= GRID_SIZE,
    };
    if !fits {
        return Err(BoardError::ShipOutOfBounds);
    }
    Ok((0..size)
        .map(|i| match orientation {
            Orientation::Horizontal => Position::new(anchor.row, anchor.col + i),
            Orientation::Vertical => Position::new(anchor.row + i, anchor.col),
        })
        .collect())
}

/// A ship placed on a board.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: String,
    size: usize,
    hits: usize,
    positions: Vec<Position>,
}

impl Ship {
    pub(crate) fn new(id: String, positions: Vec<Position>) -> Self {
        Self {
            id,
            size: positions.len(),
            hits: 0,
            positions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Cells occupied by the ship, from its anchor outwards.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_sunk(&self) -> bool {
        self.hits == self.size
    }

    /// Only the board calls this, once per cell turned from ship to hit.
    pub(crate) fn register_hit(&mut self) {
        debug_assert!(self.hits < self.size);
        self.hits = (self.hits + 1).min(self.size);
    }

    pub fn stats(&self) -> ShipStats {
        ShipStats {
            id: self.id.clone(),
            size: self.size,
            hits: self.hits,
            sunk: self.is_sunk(),
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {:?}, size: {}, hits: {}, positions: {:?} }}",
            self.id, self.size, self.hits, self.positions,
        )
    }
}

/// Read-only ship summary for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStats {
    pub id: String,
    pub size: usize,
    pub hits: usize,
    pub sunk: bool,
}
