//! Conversion between typed labels such as `B7` and grid positions.
//!
//! The letter picks the column (`A` is column 0) and the number picks the
//! row (`1` is row 0). Parsing ignores case and surrounding whitespace.

use alloc::format;
use alloc::string::String;

use crate::common::Position;
use crate::config::GRID_SIZE;

/// Parse a label like `"a1"` or `" J10 "`. Returns `None` for anything that
/// is not a column letter followed by a one- or two-digit row on the grid.
pub fn parse_coordinate(input: &str) -> Option<Position> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= GRID_SIZE {
        return None;
    }

    let digits = chars.as_str();
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 || row > GRID_SIZE {
        return None;
    }
    Some(Position::new(row - 1, col))
}

/// Inverse of [`parse_coordinate`]: `(9, 9)` becomes `"J10"`.
pub fn format_coordinate(row: usize, col: usize) -> Option<String> {
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return None;
    }
    let letter = (b'A' + col as u8) as char;
    Some(format!("{}{}", letter, row + 1))
}

pub fn is_valid_coordinate(input: &str) -> bool {
    parse_coordinate(input).is_some()
}
