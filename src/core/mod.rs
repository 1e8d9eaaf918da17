//! Pure game logic: deterministic, I/O-free, unit-testable.
//!
//! `board` and `piece` are the two state machines; `game` orchestrates
//! them; `bag` and `scoring` supply randomness and rules; `display` is the
//! outward-facing notification seam.

pub mod bag;
pub mod board;
pub mod display;
pub mod game;
pub mod piece;
pub mod scoring;

pub use bag::PieceBag;
pub use board::Board;
pub use display::{EventLog, GameDisplay, NullDisplay};
pub use game::{Game, GameStats};
pub use piece::ActivePiece;
