#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod agent;
mod bitboard;
mod board;
#[cfg(feature = "std")]
mod cli;
mod common;
mod config;
pub mod coord;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session;
mod ship;
mod sim;

pub use agent::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
#[cfg(feature = "std")]
pub use cli::*;
pub use common::*;
pub use config::*;
pub use coord::{format_coordinate, is_valid_coordinate, parse_coordinate};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use session::MatchSession;
pub use ship::*;
pub use sim::*;
