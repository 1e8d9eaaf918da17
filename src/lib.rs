//! Terminal falling-block puzzle game.
//!
//! `core` holds the deterministic rules, `input` turns held keys into
//! repeated actions, `term` renders to a terminal. The binary wires the
//! three together in a fixed-tick loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
