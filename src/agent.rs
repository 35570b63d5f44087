//! Hunt-and-target shot selection for the computer player.
//!
//! While hunting the agent fires at uniformly random cells it has not offered
//! before. Every hit pushes the hit's unshot orthogonal neighbours onto the
//! front of a target queue, so the newest hit is followed first and a ship
//! is usually finished off before hunting resumes.
//!
//! The agent never looks inside the board it is shooting at. Whether a cell
//! has already been resolved comes from a [`ShotOracle`] supplied per call.

use alloc::collections::VecDeque;

use log::trace;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::common::Position;
use crate::config::GRID_SIZE;

type BB = BitBoard<u128, GRID_SIZE>;

/// Answers "has this cell already been shot?" for the board under attack.
pub trait ShotOracle {
    fn has_been_shot(&self, pos: Position) -> bool;
}

impl ShotOracle for Board {
    fn has_been_shot(&self, pos: Position) -> bool {
        Board::has_been_shot(self, pos.row, pos.col)
    }
}

impl<F> ShotOracle for F
where
    F: Fn(Position) -> bool,
{
    fn has_been_shot(&self, pos: Position) -> bool {
        self(pos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetingAgent {
    /// Cells this agent has not offered yet.
    available: BB,
    /// Follow-up cells around recent hits, newest first.
    queue: VecDeque<Position>,
}

impl TargetingAgent {
    pub fn new() -> Self {
        Self {
            available: BB::full(),
            queue: VecDeque::new(),
        }
    }

    /// Number of cells still eligible for a random hunt shot.
    pub fn available_targets(&self) -> usize {
        self.available.count_ones()
    }

    pub fn is_available(&self, pos: Position) -> bool {
        self.available.get(pos.row, pos.col).unwrap_or(false)
    }

    /// Pending follow-up cells, front first.
    pub fn target_queue(&self) -> &VecDeque<Position> {
        &self.queue
    }

    /// Pick the next cell to fire at, or `None` once nothing is left.
    ///
    /// Queued follow-ups are drained first. An entry that the oracle reports
    /// as shot, or that was already offered, is dropped and the next entry is
    /// tried within the same call.
    pub fn next_shot<R, O>(&mut self, rng: &mut R, oracle: &O) -> Option<Position>
    where
        R: Rng + ?Sized,
        O: ShotOracle + ?Sized,
    {
        while let Some(target) = self.queue.pop_front() {
            if oracle.has_been_shot(target) || !self.is_available(target) {
                trace!("dropping stale follow-up {}", target);
                continue;
            }
            self.take(target);
            trace!("targeting {} from the follow-up queue", target);
            return Some(target);
        }

        let remaining = self.available.count_ones();
        if remaining == 0 {
            return None;
        }
        let (row, col) = self.available.nth_set_bit(rng.random_range(0..remaining))?;
        let target = Position::new(row, col);
        self.take(target);
        trace!("hunting at {} ({} cells left)", target, remaining - 1);
        Some(target)
    }

    /// Feed back the outcome of a shot at `pos`.
    pub fn record_shot_result<O>(&mut self, pos: Position, is_hit: bool, oracle: &O)
    where
        O: ShotOracle + ?Sized,
    {
        self.take(pos);
        if !is_hit {
            return;
        }
        for neighbor in pos.neighbors() {
            if !oracle.has_been_shot(neighbor) {
                self.queue.push_front(neighbor);
            }
        }
    }

    /// Forget all history: every cell becomes available and the queue empties.
    pub fn reset(&mut self) {
        self.available.fill();
        self.queue.clear();
    }

    fn take(&mut self, pos: Position) {
        // Off-grid positions were never available.
        let _ = self.available.clear(pos.row, pos.col);
    }
}

impl Default for TargetingAgent {
    fn default() -> Self {
        Self::new()
    }
}
