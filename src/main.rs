//! Terminal runner (default binary).
//!
//! Single-threaded loop: draw, wait for a key until the next gravity tick is
//! due, apply whatever happened. Completed rows are shown empty for the
//! configured flash time before they collapse.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;

use tetrish::config::{Command, GameConfig, USAGE};
use tetrish::core::{GameSnapshot, GameState};
use tetrish::input::{handle_key_event, should_quit};
use tetrish::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// How a session ended, reported once the terminal is restored
#[derive(Debug, Clone, Copy)]
struct Summary {
    seed: u32,
    pieces_locked: u32,
    rows_cleared: u32,
    game_over: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match GameConfig::from_env().parse_args(&args) {
        Ok(Command::Play(config)) => config,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}\n", USAGE);
            return Err(e.context("invalid command line"));
        }
    };

    let seed = config.resolved_seed();

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to enter raw mode")?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    let restored = term.exit();

    let summary = result?;
    restored?;
    eprintln!(
        "[tetrish] {}: {} pieces locked, {} rows cleared (seed {})",
        if summary.game_over { "game over" } else { "quit" },
        summary.pieces_locked,
        summary.rows_cleared,
        summary.seed,
    );
    Ok(())
}

/// Everything needed to put a frame on screen.
///
/// The engine's flash observer cannot return errors, so the first failure is
/// parked in `error` and raised by the loop once the engine call returns.
struct Screen<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    snap: GameSnapshot,
    flash: Duration,
    error: Option<anyhow::Error>,
}

impl Screen<'_> {
    fn draw(&mut self, game: &GameState) -> Result<()> {
        game.snapshot_into(&mut self.snap);
        self.present()
    }

    fn present(&mut self) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(&self.snap, Viewport::new(w, h), &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }

    /// Show a flash frame from the engine, then hold it
    fn flash_row(&mut self, frame: &GameSnapshot) {
        if self.flash.is_zero() || self.error.is_some() {
            return;
        }

        self.snap = *frame;

        match self.present() {
            Ok(()) => thread::sleep(self.flash),
            Err(e) => self.error = Some(e),
        }
    }

    fn take_error(&mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Timer for the automatic descent
#[derive(Debug, Clone, Copy)]
struct Gravity {
    interval: Duration,
    last: Instant,
}

impl Gravity {
    fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// How long input may be awaited before the next descent is due
    fn timeout(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    fn is_due(&self, now: Instant) -> bool {
        self.timeout(now).is_zero()
    }

    fn restart(&mut self, now: Instant) {
        self.last = now;
    }

    /// A lock may have paused on flashing rows; the next piece gets a full interval
    fn restart_if_locked(&mut self, locked: bool, now: Instant) {
        if locked {
            self.restart(now);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, seed: u32) -> Result<Summary> {
    let mut game = GameState::new(seed);
    game.spawn();

    let mut screen = Screen {
        term,
        view: GameView::default(),
        fb: FrameBuffer::new(0, 0),
        snap: GameSnapshot::default(),
        flash: Duration::from_millis(config.flash_ms),
        error: None,
    };

    let mut gravity = Gravity::new(Duration::from_millis(config.tick_ms), Instant::now());

    loop {
        screen.draw(&game)?;

        if game.game_over() {
            wait_for_key(&mut screen, &game)?;
            return Ok(summary(&game, true));
        }

        // Input with timeout until next tick.
        if event::poll(gravity.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(summary(&game, false));
                    }
                    if let Some(action) = handle_key_event(key) {
                        let outcome = game.apply_action_with(action, |f| screen.flash_row(f));
                        gravity.restart_if_locked(outcome.is_locked(), Instant::now());
                        screen.take_error()?;
                    }
                }
                Event::Resize(_, _) => screen.term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if gravity.is_due(now) {
            gravity.restart(now);
            let outcome = game.tick_with(|f| screen.flash_row(f));
            gravity.restart_if_locked(outcome.is_locked(), Instant::now());
            screen.take_error()?;
        }
    }
}

fn wait_for_key(screen: &mut Screen<'_>, game: &GameState) -> Result<()> {
    loop {
        match event::read()? {
            Event::Key(key) if is_press(&key) => return Ok(()),
            Event::Resize(_, _) => {
                screen.term.invalidate();
                screen.draw(game)?;
            }
            _ => {}
        }
    }
}

/// Terminals that report key releases would otherwise act twice per key
fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

fn summary(game: &GameState, game_over: bool) -> Summary {
    Summary {
        seed: game.seed(),
        pieces_locked: game.pieces_locked(),
        rows_cleared: game.rows_cleared(),
        game_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrish::core::pieces::SQUARE;
    use tetrish::types::GameAction;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn gravity_waits_out_the_interval() {
        let t0 = Instant::now();
        let gravity = Gravity::new(SECOND, t0);
        assert_eq!(gravity.timeout(t0), SECOND);
        assert!(!gravity.is_due(t0 + Duration::from_millis(999)));
        assert!(gravity.is_due(t0 + SECOND));
        assert_eq!(gravity.timeout(t0 + 2 * SECOND), Duration::ZERO);
    }

    #[test]
    fn key_lock_restarts_gravity() {
        let t0 = Instant::now();
        let mut gravity = Gravity::new(SECOND, t0);
        let mut game = GameState::new(9);
        game.spawn_shape(&SQUARE);

        let moved = game.apply_action(GameAction::SoftDrop);
        gravity.restart_if_locked(moved.is_locked(), t0 + Duration::from_millis(100));
        assert!(gravity.is_due(t0 + SECOND));

        // Hard drop late in the interval, after a one second flash
        let locked = game.apply_action(GameAction::HardDrop);
        let after_flash = t0 + Duration::from_millis(1900);
        gravity.restart_if_locked(locked.is_locked(), after_flash);
        assert!(!gravity.is_due(t0 + 2 * SECOND));
        assert_eq!(gravity.timeout(after_flash), SECOND);
        assert!(gravity.is_due(after_flash + SECOND));
    }
}
