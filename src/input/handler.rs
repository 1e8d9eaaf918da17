//! Held-key repeat handling.
//!
//! Terminals deliver discrete key events; held movement keys must still
//! produce a steady stream of steps. Each repeatable action owns its own
//! timer state: an initial delay before repeating starts, then a fixed
//! rate. Down repeats with no initial delay.
//!
//! Terminals that never emit key-release events get a safety net: a key
//! with no press activity for a timeout is treated as released.

use std::time::Instant;

use arrayvec::ArrayVec;

use crate::types::{GameAction, REPEAT_DELAY_MS, REPEAT_RATE_MS};

/// Timer state for one repeatable key.
#[derive(Debug, Clone, Copy)]
struct RepeatKey {
    held: bool,
    /// Milliseconds before the first repeat fires.
    delay: u32,
    /// Milliseconds between repeats once started.
    rate: u32,
    held_for: u32,
    accumulator: u32,
}

impl RepeatKey {
    fn new(delay: u32, rate: u32) -> Self {
        Self {
            held: false,
            delay,
            rate,
            held_for: 0,
            accumulator: 0,
        }
    }

    /// Returns true when this is a fresh press (not terminal auto-repeat).
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.held_for = 0;
        self.accumulator = 0;
        true
    }

    fn release(&mut self) {
        self.held = false;
        self.held_for = 0;
        self.accumulator = 0;
    }

    /// Advance by `elapsed_ms`; returns how many repeats fire this tick.
    fn update(&mut self, elapsed_ms: u32) -> u32 {
        if !self.held {
            return 0;
        }

        let before = self.held_for;
        self.held_for += elapsed_ms;
        if self.held_for < self.delay {
            return 0;
        }

        // Only time past the delay counts toward repeats.
        let excess = if before < self.delay {
            self.held_for - self.delay
        } else {
            elapsed_ms
        };
        self.accumulator += excess;

        let fired = self.accumulator / self.rate;
        self.accumulator %= self.rate;
        fired
    }
}

/// Per-key repeat state for the three held directions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: RepeatKey,
    right: RepeatKey,
    down: RepeatKey,
    last_press: Instant,
    auto_release_ms: u32,
}

// Keys without release events auto-release after this long, so one tap
// cannot become a sustained hold.
const AUTO_RELEASE_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(REPEAT_DELAY_MS, REPEAT_RATE_MS)
    }

    /// Custom delay/rate for the horizontal keys. Down always repeats at
    /// the rate with no initial delay.
    pub fn with_config(delay_ms: u32, rate_ms: u32) -> Self {
        Self {
            left: RepeatKey::new(delay_ms, rate_ms),
            right: RepeatKey::new(delay_ms, rate_ms),
            down: RepeatKey::new(0, rate_ms),
            last_press: Instant::now(),
            auto_release_ms: AUTO_RELEASE_MS,
        }
    }

    pub fn with_auto_release_ms(mut self, timeout_ms: u32) -> Self {
        self.auto_release_ms = timeout_ms;
        self
    }

    /// Record a key press. For a repeatable action, returns the action
    /// when this press is fresh (the caller applies it once immediately);
    /// non-repeatable actions pass through untouched.
    pub fn key_press(&mut self, action: GameAction) -> Option<GameAction> {
        let key = match action {
            GameAction::MoveLeft => &mut self.left,
            GameAction::MoveRight => &mut self.right,
            GameAction::SoftDrop => &mut self.down,
            other => return Some(other),
        };

        self.last_press = Instant::now();
        key.press().then_some(action)
    }

    /// Record a key release for a repeatable action.
    pub fn key_release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.left.release(),
            GameAction::MoveRight => self.right.release(),
            GameAction::SoftDrop => self.down.release(),
            _ => {}
        }
    }

    /// Advance all repeat timers by one tick and collect the actions due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::new();

        if self.last_press.elapsed().as_millis() as u32 > self.auto_release_ms {
            self.left.release();
            self.right.release();
            self.down.release();
        }

        for _ in 0..self.left.update(elapsed_ms) {
            let _ = actions.try_push(GameAction::MoveLeft);
        }
        for _ in 0..self.right.update(elapsed_ms) {
            let _ = actions.try_push(GameAction::MoveRight);
        }
        for _ in 0..self.down.update(elapsed_ms) {
            let _ = actions.try_push(GameAction::SoftDrop);
        }

        actions
    }

    /// Drop all held state (pause screens, focus loss).
    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.last_press = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
