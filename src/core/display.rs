//! Display collaborator interface.
//!
//! The rules modules push change notifications outward and never read
//! anything back. A frontend can consume single-cell deltas, full-board
//! refreshes, or both; every callback defaults to a no-op so observers
//! implement only what they care about.

use tracing::{debug, trace};

use crate::core::board::Board;
use crate::core::game::GameStats;
use crate::types::Cell;

/// Receiver for board and statistics changes.
pub trait GameDisplay {
    /// One board cell changed.
    fn cell_changed(&mut self, _x: i8, _y: i8, _cell: Cell) {}

    /// The board changed wholesale (row clears, resets). Redraw everything.
    fn board_changed(&mut self, _board: &Board) {}

    /// Score, level, line or piece counters changed.
    fn stats_changed(&mut self, _stats: &GameStats) {}
}

/// Display that ignores every notification. For tests and benches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl GameDisplay for NullDisplay {}

/// Forwards display traffic to `tracing` events.
///
/// The terminal frontend redraws from state every frame, so this observer
/// carries the diagnostic record instead: cell writes at trace level,
/// refreshes and stat updates at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventLog;

impl GameDisplay for EventLog {
    fn cell_changed(&mut self, x: i8, y: i8, cell: Cell) {
        trace!(x, y, occupied = cell.is_some(), "cell changed");
    }

    fn board_changed(&mut self, board: &Board) {
        debug!(occupied = board.occupied_cells(), "board refreshed");
    }

    fn stats_changed(&mut self, stats: &GameStats) {
        debug!(
            score = stats.score,
            level = stats.level,
            lines = stats.lines_cleared,
            pieces = stats.pieces_placed,
            "stats changed"
        );
    }
}
