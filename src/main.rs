//! Terminal runner.
//!
//! Fixed 16 ms tick: poll keys until the tick deadline, drain held-key
//! repeats, advance gravity, redraw. Logging goes to stderr so the
//! alternate screen stays clean; run with `RUST_LOG=debug 2>game.log` to
//! capture it.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use blockfall::core::{EventLog, Game};
use blockfall::input::{map, InputHandler};
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::{GameAction, GamePhase, TICK_MS};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always restore the terminal, even on error.
    let _ = term.exit();
    result
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = Game::new(seed_from_clock());
    let mut log = EventLog;
    let view = GameView;
    let mut input = InputHandler::new();

    let tick = Duration::from_millis(TICK_MS as u64);
    let dt = TICK_MS as f32 / 1000.0;
    let mut last_tick = Instant::now();

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut frame = view.render(&game, width, height);
        term.draw(&mut frame)?;

        let deadline = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(deadline)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if map::should_quit(key) {
                            return Ok(());
                        }
                        if game.phase() == GamePhase::Menu && key.code == KeyCode::Enter {
                            game.start_new_game(&mut log);
                            continue;
                        }
                        if let Some(action) = map::key_action(key) {
                            if let Some(fresh) = input.key_press(action) {
                                if matches!(fresh, GameAction::Pause) {
                                    // Held directions must not leak across
                                    // the pause screen.
                                    input.reset();
                                }
                                game.handle(fresh, &mut log);
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = map::key_action(key) {
                            input.key_release(action);
                        }
                    }
                    // Held-key repeats are timed here, not by the terminal.
                    KeyEventKind::Repeat => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                game.handle(action, &mut log);
            }
            game.advance(dt, &mut log);
        }
    }
}
