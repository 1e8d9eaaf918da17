//! Input: key bindings and held-key repeat timing.

pub mod handler;
pub mod map;

pub use handler::InputHandler;
