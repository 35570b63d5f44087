use core::time::Duration;

use crate::ship::ShipDef;

pub const GRID_SIZE: usize = 10;

/// Random anchors tried by a single `place_ship` call before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Whole-fleet placements tried before a match refuses to start.
pub const FLEET_SETUP_ATTEMPTS: usize = 16;

pub const NUM_SHIPS: usize = 3;
/// Fleet deployed by both sides, in placement order.
pub const FLEET: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("battleship", "Battleship", 5),
    ShipDef::new("destroyer-1", "Destroyer", 4),
    ShipDef::new("destroyer-2", "Destroyer", 4),
];

/// Delay between the player's shot and the computer's answer.
pub const COMPUTER_WAIT_MS: u64 = 500;

pub const STARTING_MESSAGE: &str = "Game started! Shoot your shot!";

/// Display class for a ship of `size` cells, e.g. "Destroyer".
pub fn ship_class(size: usize) -> &'static str {
    FLEET
        .iter()
        .find(|def| def.length() == size)
        .map(|def| def.class())
        .unwrap_or("Ship")
}

/// Runtime knobs for a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Fix the RNG for reproducible fleets and computer shots.
    pub seed: Option<u64>,
    /// How long the computer "thinks" before shooting back.
    pub computer_delay: Duration,
    pub fleet_setup_attempts: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            computer_delay: Duration::from_millis(COMPUTER_WAIT_MS),
            fleet_setup_attempts: FLEET_SETUP_ATTEMPTS,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_computer_delay(mut self, delay: Duration) -> Self {
        self.computer_delay = delay;
        self
    }
}
