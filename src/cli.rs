#![cfg(feature = "std")]

//! Terminal front end: board rendering and the interactive game loop.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::board::{CellView, GridView};
use crate::config::{ship_class, GRID_SIZE};
use crate::coord::parse_coordinate;
use crate::game::{GameError, GameSnapshot, GameState};
use crate::session::MatchSession;
use crate::ship::ShipStats;

fn print_grid(view: &GridView, reveal: bool) {
    std::println!("    ╔═══════════════════════╗");
    std::print!("    ║  ");
    for c in 0..GRID_SIZE {
        let ch = (b'A' + c as u8) as char;
        std::print!(" {}", ch);
    }
    std::println!(" ║");
    std::println!("    ╠═══════════════════════╣");
    for (r, row) in view.iter().enumerate() {
        std::print!("    ║ {:2}", r + 1);
        for cell in row.iter() {
            let ch = match cell {
                CellView::Hit(Some(_)) => '#',
                CellView::Hit(None) => 'X',
                CellView::Miss => 'o',
                CellView::Ship(_) => 'S',
                CellView::Empty => '.',
            };
            std::print!(" {}", ch);
        }
        std::println!(" ║");
    }
    std::println!("    ╚═══════════════════════╝");

    if reveal {
        std::println!("    Legend: S=Ship  X/#=Hit  o=Miss  .=Water");
    } else {
        std::println!("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown");
    }
}

fn print_fleet(title: &str, ships: &[ShipStats]) {
    std::println!("    {}:", title);
    for ship in ships {
        let status = if ship.sunk { "SUNK" } else { "Active" };
        std::println!(
            "      {} ({}, {}/{} hit): {}",
            ship_class(ship.size),
            ship.id,
            ship.hits,
            ship.size,
            status
        );
    }
}

/// Display the computer's board (top) and the player's board (bottom).
pub fn print_snapshot(snapshot: &GameSnapshot) {
    std::println!("Enemy waters:");
    print_grid(&snapshot.computer_board, false);
    print_fleet("Enemy fleet", &snapshot.computer_ships);
    std::println!("\nYour board:");
    print_grid(&snapshot.player_board, true);
    print_fleet("Your fleet", &snapshot.player_ships);
    std::println!("\n>> {}", snapshot.message);
}

fn print_help() {
    std::println!("\nCommands:");
    std::println!("  <column><row>  fire at a cell, e.g. A1 or j10");
    std::println!("  reset          start a new match");
    std::println!("  help           show this help");
    std::println!("  quit           leave the game\n");
}

/// Play against the computer on stdin/stdout until the player quits or
/// stdin closes.
pub async fn run_interactive(session: MatchSession) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();
    loop {
        let snapshot = session.snapshot().await;
        print_snapshot(&snapshot);

        if snapshot.game_over {
            match snapshot.state {
                GameState::PlayerWon => std::println!("\nVICTORY! You have sunk all enemy ships!"),
                _ => std::println!("\nDEFEAT. All your ships have been destroyed."),
            }
            std::print!("Play again? [y/N]: ");
            io::stdout().flush()?;
            match lines.next_line().await? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                    session.reset().await?;
                    continue;
                }
                _ => break,
            }
        }

        std::print!("Target: ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }
        if input.eq_ignore_ascii_case("reset") {
            session.reset().await?;
            continue;
        }

        let Some(target) = parse_coordinate(input) else {
            std::println!("'{}' is not a cell. Use a letter A-J and a number 1-10, e.g. B7.", input);
            continue;
        };
        match session.player_shoot(target.row, target.col).await {
            Ok(true) => {
                std::println!("Firing at {}...", target);
                session.wait_for_player().await;
            }
            Ok(false) => {}
            Err(e @ GameError::NotPlayersTurn) => std::println!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
    std::println!("Goodbye!");
    Ok(())
}
