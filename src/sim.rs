//! Unattended matches: the player's side is driven by a second targeting agent.

use alloc::string::String;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::agent::TargetingAgent;
use crate::board::Cell;
use crate::game::{GameEngine, GameError, GameState};

/// Outcome of one simulated match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    pub seed: u64,
    pub outcome: GameState,
    pub player_shots: usize,
    pub computer_shots: usize,
    pub message: String,
}

/// Play a full match from `seed`. The same seed always gives the same report.
pub fn simulate(seed: u64) -> Result<SimReport, GameError> {
    let mut engine = GameEngine::from_seed(seed)?;
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut shooter = TargetingAgent::new();
    let mut player_shots = 0;
    let mut computer_shots = 0;

    while !engine.game_over() {
        let Some(target) = shooter.next_shot(&mut rng, engine.computer_board()) else {
            break;
        };
        if !engine.player_shoot(target.row, target.col)? {
            continue;
        }
        player_shots += 1;
        let hit = matches!(
            engine.computer_board().cell(target.row, target.col),
            Some(Cell::Hit(_))
        );
        shooter.record_shot_result(target, hit, engine.computer_board());

        if engine.run_scheduled_move().is_some() {
            computer_shots += 1;
        }
    }

    Ok(SimReport {
        seed,
        outcome: engine.state(),
        player_shots,
        computer_shots,
        message: String::from(engine.message()),
    })
}
