//! Shared types and tuning constants.
//!
//! Pure data with no I/O dependencies. Everything gameplay-tunable lives
//! here so the rules modules stay free of magic numbers.

/// Board dimensions in cells. Row 0 is the top row; y grows downward.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Frame tick in milliseconds.
pub const TICK_MS: u32 = 16;

/// Gravity pacing (seconds between automatic downward steps).
pub const BASE_FALL_DELAY: f32 = 1.0;
pub const MIN_FALL_DELAY: f32 = 0.1;
pub const FALL_DELAY_STEP: f32 = 0.1;

/// Level curve.
pub const LINES_PER_LEVEL: u32 = 10;
pub const MAX_LEVEL: u32 = 15;

/// Base line-clear scores, before level scaling.
pub const SCORE_SINGLE: u32 = 100;
pub const SCORE_DOUBLE: u32 = 300;
pub const SCORE_TRIPLE: u32 = 500;
pub const SCORE_TETRIS: u32 = 800;

/// Held-key repeat tuning (milliseconds): initial delay, then fixed rate.
pub const REPEAT_DELAY_MS: u32 = 300;
pub const REPEAT_RATE_MS: u32 = 50;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order. One full piece bag.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Board cell: `None` when empty, `Some(kind)` when occupied. The kind tag
/// exists for rendering; occupancy and tag can never disagree.
pub type Cell = Option<PieceKind>;

/// Directions the active piece can be stepped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Board-space delta for one step.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Discrete input events delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Restart,
}

/// Session phase. Gameplay input only applies while `Playing`; pause
/// toggles between `Playing` and `Paused`; restart leaves `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}
