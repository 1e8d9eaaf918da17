//! Game session orchestrator.
//!
//! Owns the board, the active piece and the bag, and runs the
//! spawn -> fall -> fix -> clear -> score -> spawn loop. Every mutating
//! entry point takes the display collaborator that should observe the
//! resulting changes; the session never reads anything back from it.

use tracing::{debug, info};

use crate::core::bag::PieceBag;
use crate::core::board::Board;
use crate::core::display::GameDisplay;
use crate::core::piece::ActivePiece;
use crate::core::scoring;
use crate::types::{GameAction, GamePhase, MoveDirection, PieceKind, BASE_FALL_DELAY};

/// Session statistics, reset on every new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub pieces_placed: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            pieces_placed: 0,
        }
    }
}

/// One game session. Created once and reused across games; `Restart`
/// resets it in place.
#[derive(Debug, Clone)]
pub struct Game {
    phase: GamePhase,
    stats: GameStats,
    board: Board,
    active: Option<ActivePiece>,
    next_kind: Option<PieceKind>,
    bag: PieceBag,
    base_fall_delay: f32,
    fall_delay: f32,
    fall_timer: f32,
}

impl Game {
    pub fn new(seed: u32) -> Self {
        Self {
            phase: GamePhase::Menu,
            stats: GameStats::default(),
            board: Board::new(),
            active: None,
            next_kind: None,
            bag: PieceBag::new(seed),
            base_fall_delay: BASE_FALL_DELAY,
            fall_delay: BASE_FALL_DELAY,
            fall_timer: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Kind queued to spawn after the current piece settles.
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next_kind
    }

    /// Seconds between gravity steps at the current level.
    pub fn fall_delay(&self) -> f32 {
        self.fall_delay
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Reset everything and start playing: fresh stats, empty board, new
    /// piece on the board and another on deck.
    pub fn start_new_game(&mut self, display: &mut dyn GameDisplay) {
        self.stats = GameStats::default();
        self.board.clear(display);
        self.active = None;
        self.fall_delay = self.base_fall_delay;
        self.fall_timer = 0.0;
        self.next_kind = Some(self.bag.draw());

        self.spawn_piece(display);
        self.phase = GamePhase::Playing;
        display.stats_changed(&self.stats);
        info!("new game started");
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Pause toggle: the only input honored from both `Playing` and
    /// `Paused`.
    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.pause();
                true
            }
            GamePhase::Paused => {
                self.resume();
                true
            }
            _ => false,
        }
    }

    /// Terminal transition: gameplay stops, the board keeps its cells for
    /// display, the active piece is dropped.
    pub fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.active = None;
        info!(
            score = self.stats.score,
            lines = self.stats.lines_cleared,
            pieces = self.stats.pieces_placed,
            "game over"
        );
    }

    /// Replace the active piece with the on-deck kind and queue a new one.
    /// Ends the game instead when the top row is occupied or the fresh
    /// piece cannot legally sit at its spawn cells; an aborted spawn does
    /// not count a placed piece.
    fn spawn_piece(&mut self, display: &mut dyn GameDisplay) {
        self.active = None;

        let kind = self.next_kind.take().unwrap_or_else(|| self.bag.draw());
        let piece = ActivePiece::spawn(kind);
        self.next_kind = Some(self.bag.draw());

        if self.board.is_game_over() || !piece.is_valid_on(&self.board) {
            self.end_game();
            return;
        }

        debug!(kind = ?piece.kind(), "piece spawned");
        self.active = Some(piece);
        self.stats.pieces_placed += 1;
        display.stats_changed(&self.stats);
    }

    /// Settle the active piece: fix it into the board, resolve completed
    /// rows, then spawn the next piece. The order holds even when nothing
    /// clears.
    pub fn fix_active(&mut self, display: &mut dyn GameDisplay) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        piece.fix(&mut self.board, display);

        self.process_completed_rows(display);
        self.spawn_piece(display);
    }

    fn process_completed_rows(&mut self, display: &mut dyn GameDisplay) {
        let rows = self.board.complete_rows();
        if rows.is_empty() {
            return;
        }

        self.board.clear_rows(&rows, display);

        let points = scoring::scaled_line_score(rows.len(), self.stats.level);
        self.stats.score += points;
        self.stats.lines_cleared += rows.len() as u32;
        debug!(rows = rows.len(), points, "rows cleared");

        self.check_level_up();
        display.stats_changed(&self.stats);
    }

    fn check_level_up(&mut self) {
        let level = scoring::level_for_lines(self.stats.lines_cleared);
        if level > self.stats.level {
            self.stats.level = level;
            self.update_fall_delay();
            info!(level, "level up");
        }
    }

    fn update_fall_delay(&mut self) {
        self.fall_delay = scoring::fall_delay(self.base_fall_delay, self.stats.level);
    }

    /// Advance gravity by `dt` seconds. Does nothing outside `Playing`.
    /// When the accumulated time crosses the fall delay, the timer resets
    /// and the live piece takes one downward step; a blocked step settles
    /// it and spawns the next piece.
    pub fn advance(&mut self, dt: f32, display: &mut dyn GameDisplay) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.fall_timer += dt;
        if self.fall_timer < self.fall_delay {
            return;
        }
        self.fall_timer = 0.0;

        let Some(piece) = self.active.as_mut() else {
            return;
        };
        if piece.is_fixed() {
            return;
        }

        if !piece.shift(MoveDirection::Down, &mut self.board, display) {
            self.fix_active(display);
        }
    }

    /// Route one input event. Movement, rotation and drops apply only
    /// while `Playing`; pause toggles between `Playing` and `Paused`;
    /// restart always starts over. Returns whether anything changed.
    pub fn handle(&mut self, action: GameAction, display: &mut dyn GameDisplay) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.start_new_game(display);
                true
            }
            _ if self.phase != GamePhase::Playing => false,
            GameAction::MoveLeft => self.shift_active(MoveDirection::Left, display),
            GameAction::MoveRight => self.shift_active(MoveDirection::Right, display),
            GameAction::SoftDrop => self.soft_drop(display),
            GameAction::HardDrop => self.hard_drop(display),
            GameAction::RotateCw => self.rotate_active(true),
            GameAction::RotateCcw => self.rotate_active(false),
        }
    }

    fn shift_active(&mut self, direction: MoveDirection, display: &mut dyn GameDisplay) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.shift(direction, &mut self.board, display)
    }

    fn rotate_active(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.rotate(clockwise, &self.board)
    }

    /// Manual downward step: 1 point per row actually descended. A
    /// blocked step has already fixed the piece, so the settle pipeline
    /// runs right away instead of waiting for the next gravity tick.
    fn soft_drop(&mut self, display: &mut dyn GameDisplay) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if piece.shift(MoveDirection::Down, &mut self.board, display) {
            self.add_score(scoring::drop_score(1, false), display);
            true
        } else {
            self.fix_active(display);
            false
        }
    }

    /// Instant drop: 2 points per row descended, then the piece always
    /// settles - even from a standstill.
    fn hard_drop(&mut self, display: &mut dyn GameDisplay) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let distance = piece.hard_drop(&mut self.board, display);
        self.add_score(scoring::drop_score(distance, true), display);
        self.fix_active(display);
        true
    }

    fn add_score(&mut self, points: u32, display: &mut dyn GameDisplay) {
        self.stats.score += points;
        display.stats_changed(&self.stats);
    }
}
