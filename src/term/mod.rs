//! Terminal frontend: framebuffer, state-to-frame view, crossterm flush.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{FrameBuffer, Glyph, Rgb};
pub use renderer::TerminalRenderer;
pub use view::GameView;
