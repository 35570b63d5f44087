use std::collections::HashSet;

use broadside::{Board, Orientation, Position, TargetingAgent, GRID_SIZE};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn never_shot(_: Position) -> bool {
    false
}

fn is_neighbor(a: Position, b: Position) -> bool {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
}

#[test]
fn test_fresh_agent_offers_in_bounds_shot() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(agent.available_targets(), GRID_SIZE * GRID_SIZE);
    let shot = agent.next_shot(&mut rng, &never_shot).unwrap();
    assert!(shot.in_bounds());
    assert!(!agent.is_available(shot));
    assert_eq!(agent.available_targets(), GRID_SIZE * GRID_SIZE - 1);
}

#[test]
fn test_hunt_covers_grid_once_then_stops() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(2);
    let mut shot = HashSet::new();

    for _ in 0..GRID_SIZE * GRID_SIZE {
        let target = agent
            .next_shot(&mut rng, &|p: Position| shot.contains(&p))
            .unwrap();
        assert!(target.in_bounds());
        assert!(shot.insert(target), "{} offered twice", target);
        agent.record_shot_result(target, false, &|p: Position| shot.contains(&p));
    }
    assert_eq!(agent.next_shot(&mut rng, &never_shot), None);
}

#[test]
fn test_hit_queues_orthogonal_neighbors() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(3);
    let hit = Position::new(4, 4);

    agent.record_shot_result(hit, true, &never_shot);
    assert_eq!(agent.target_queue().len(), 4);
    assert!(agent.target_queue().iter().all(|p| is_neighbor(*p, hit)));

    let next = agent.next_shot(&mut rng, &never_shot).unwrap();
    assert!(is_neighbor(next, hit));
    // the last neighbour examined sits at the front
    assert_eq!(next, Position::new(4, 5));
}

#[test]
fn test_miss_queues_nothing() {
    let mut agent = TargetingAgent::new();
    agent.record_shot_result(Position::new(4, 4), false, &never_shot);
    assert!(agent.target_queue().is_empty());
    assert!(!agent.is_available(Position::new(4, 4)));
}

#[test]
fn test_newest_hit_is_followed_first() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(4);
    agent.record_shot_result(Position::new(2, 2), true, &never_shot);
    agent.record_shot_result(Position::new(7, 7), true, &never_shot);

    let next = agent.next_shot(&mut rng, &never_shot).unwrap();
    assert!(is_neighbor(next, Position::new(7, 7)));
}

#[test]
fn test_corner_hit_skips_off_grid_and_shot_neighbors() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(5);
    let oracle = |p: Position| p == Position::new(0, 1);

    agent.record_shot_result(Position::new(0, 0), true, &oracle);
    assert_eq!(
        agent.target_queue().iter().copied().collect::<Vec<_>>(),
        vec![Position::new(1, 0)]
    );
    assert_eq!(agent.next_shot(&mut rng, &oracle), Some(Position::new(1, 0)));
}

#[test]
fn test_stale_queue_entries_are_skipped_within_one_call() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(6);
    agent.record_shot_result(Position::new(5, 5), true, &never_shot);

    // right and left neighbours got shot in the meantime
    let oracle = |p: Position| p == Position::new(5, 6) || p == Position::new(5, 4);
    assert_eq!(agent.next_shot(&mut rng, &oracle), Some(Position::new(6, 5)));
    assert_eq!(agent.next_shot(&mut rng, &oracle), Some(Position::new(4, 5)));
    assert!(agent.target_queue().is_empty());
}

#[test]
fn test_queued_cell_is_not_offered_twice() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(7);
    // both hits queue (3, 4)
    agent.record_shot_result(Position::new(3, 3), true, &never_shot);
    agent.record_shot_result(Position::new(3, 5), true, &never_shot);

    let mut offered = HashSet::new();
    while !agent.target_queue().is_empty() {
        let target = agent.next_shot(&mut rng, &never_shot).unwrap();
        assert!(offered.insert(target), "{} offered twice", target);
    }
}

#[test]
fn test_reset_restores_all_targets() {
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(8);
    for _ in 0..10 {
        let shot = agent.next_shot(&mut rng, &never_shot).unwrap();
        agent.record_shot_result(shot, true, &never_shot);
    }
    agent.reset();
    assert_eq!(agent.available_targets(), GRID_SIZE * GRID_SIZE);
    assert!(agent.target_queue().is_empty());
    assert_eq!(agent, TargetingAgent::new());
}

#[test]
fn test_board_serves_as_oracle() {
    let mut board = Board::new();
    board.record_shot(3, 3);
    let mut agent = TargetingAgent::new();
    agent.record_shot_result(Position::new(3, 4), true, &board);
    assert!(!agent.target_queue().contains(&Position::new(3, 3)));
    assert_eq!(agent.target_queue().len(), 3);
}

#[test]
fn test_neighbors_stay_on_grid() {
    let corner: Vec<_> = Position::new(0, 0).neighbors().collect();
    assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);
    let edge: Vec<_> = Position::new(9, 5).neighbors().collect();
    assert_eq!(
        edge,
        vec![Position::new(8, 5), Position::new(9, 4), Position::new(9, 6)]
    );
    assert_eq!(Position::new(5, 5).neighbors().count(), 4);
}

#[test]
fn test_agent_sinks_a_ship() {
    let mut board = Board::new();
    board
        .place_ship_at("target", 4, Position::new(6, 2), Orientation::Horizontal)
        .unwrap();
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(9);

    let mut shots = 0;
    while !board.all_ships_sunk() {
        let target = agent.next_shot(&mut rng, &board).unwrap();
        assert!(!board.has_been_shot(target.row, target.col));
        let hit = board.record_shot(target.row, target.col);
        agent.record_shot_result(target, hit, &board);
        shots += 1;
    }
    assert!(shots <= GRID_SIZE * GRID_SIZE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn agent_never_repeats_against_a_real_board(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        for (i, size) in [5, 4, 4].into_iter().enumerate() {
            board.place_ship(&mut rng, &format!("ship-{}", i), size);
        }

        let mut agent = TargetingAgent::new();
        let mut seen = HashSet::new();
        while let Some(target) = agent.next_shot(&mut rng, &board) {
            prop_assert!(target.in_bounds());
            prop_assert!(seen.insert(target));
            let hit = board.record_shot(target.row, target.col);
            agent.record_shot_result(target, hit, &board);
        }
        prop_assert_eq!(seen.len(), GRID_SIZE * GRID_SIZE);
        prop_assert!(board.all_ships_sunk());
    }

    #[test]
    fn follow_up_is_a_fresh_neighbor(seed in any::<u64>(), row in 0..GRID_SIZE, col in 0..GRID_SIZE) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut agent = TargetingAgent::new();
        let hit = Position::new(row, col);
        agent.record_shot_result(hit, true, &never_shot);
        let next = agent.next_shot(&mut rng, &never_shot).unwrap();
        prop_assert!(is_neighbor(next, hit));
        prop_assert!(next.in_bounds());
    }
}
