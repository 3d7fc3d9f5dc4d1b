use log::warn;

use crate::board::{Player, COLS, ROWS};
use crate::engine::DEFAULT_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub depth: u32,
    pub first: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            depth: DEFAULT_DEPTH,
            first: Player::Human,
        }
    }
}

/// Search depth from the raw command-line argument.
///
/// The leading integer is read and anything after it ignored, so `3abc` is depth 3.
/// An argument with no leading integer, or one outside `0..=total_cells`, falls back to
/// [`DEFAULT_DEPTH`].
pub fn depth_from_arg(arg: Option<&str>, total_cells: usize) -> u32 {
    let Some(raw) = arg else {
        return DEFAULT_DEPTH;
    };
    match leading_integer(raw) {
        Some(depth) if depth >= 0 && depth as u64 <= total_cells as u64 => depth as u32,
        _ => {
            warn!("Invalid command line argument, using default depth = {}.", DEFAULT_DEPTH);
            DEFAULT_DEPTH
        }
    }
}

/// Optional sign and digits at the start of `raw`, after any whitespace.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign = usize::from(raw.starts_with(['+', '-']));
    let digits = raw[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    raw[..sign + digits].parse().ok()
}
