use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::config::{adjacent_speed_preset, GameConfig};
use crate::error::ConfigError;
use crate::game::{GameSession, GameStatus, PauseReason, Snapshot};
use crate::input::{Direction, GameInput};
use crate::score::ScoreStore;

/// Host-facing command surface for one game window.
///
/// Owns the live [`GameSession`], the [`SimulationClock`] that drives it and
/// the best-score store. Every input transport (keys, swipes, scripted
/// tests) goes through the same methods.
pub struct GameController<S: ScoreStore> {
    config: GameConfig,
    session: GameSession,
    clock: SimulationClock,
    store: S,
    seed: Option<u64>,
    games_started: u64,
}

impl<S: ScoreStore> GameController<S> {
    /// Validates `config`, loads the best score and prepares a `Ready` session.
    ///
    /// With `seed` set every session is deterministic; restarts derive their
    /// seed from it so consecutive games still differ.
    pub fn new(config: GameConfig, store: S, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = SimulationClock::from_config(&config)?;
        let best_score = store.load();
        info!(best_score, grid_size = config.grid_size, "loaded best score");

        let session = new_session(&config, best_score, seed, 0)?;
        Ok(Self {
            config,
            session,
            clock,
            store,
            seed,
            games_started: 0,
        })
    }

    /// Forwards a direction request to the session.
    ///
    /// From `Ready` this starts the game heading that way.
    pub fn submit_direction(&mut self, direction: Direction) {
        let was_ready = self.session.status() == GameStatus::Ready;
        let accepted = self.session.submit_direction(direction);

        if was_ready && accepted {
            self.games_started += 1;
            self.clock.arm();
        } else if !accepted {
            debug!(?direction, "direction ignored");
        }
    }

    /// Starts from `Ready` or `Over`. Finished sessions are replaced.
    pub fn request_start(&mut self) {
        match self.session.status() {
            GameStatus::Ready => {
                self.session.start(None);
                self.games_started += 1;
                self.clock.arm();
            }
            GameStatus::Over => self.request_restart(),
            GameStatus::Running | GameStatus::Paused => {}
        }
    }

    /// Pauses a running game or resumes a paused one.
    pub fn request_pause_toggle(&mut self) {
        match self.session.status() {
            GameStatus::Running => self.pause(PauseReason::Manual),
            GameStatus::Paused => self.resume(),
            GameStatus::Ready | GameStatus::Over => {}
        }
    }

    /// Starts when idle, resumes when paused.
    pub fn request_confirm(&mut self) {
        match self.session.status() {
            GameStatus::Ready | GameStatus::Over => self.request_start(),
            GameStatus::Paused => self.resume(),
            GameStatus::Running => {}
        }
    }

    /// Throws away the current session and starts a fresh one.
    pub fn request_restart(&mut self) {
        self.flush_best();
        let best_score = self.session.best_score();
        self.session = match new_session(&self.config, best_score, self.seed, self.games_started) {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "restart rejected");
                return;
            }
        };
        self.session.start(None);
        self.games_started += 1;
        self.clock.arm();
        info!(game = self.games_started, "game restarted");
    }

    /// Treated exactly like a manual pause.
    pub fn focus_lost(&mut self) {
        if self.session.status() == GameStatus::Running {
            self.pause(PauseReason::FocusLost);
        }
    }

    /// Changes the tick rate; invalid rates are ignored.
    pub fn set_speed(&mut self, ticks_per_second: f64) {
        match self.clock.set_ticks_per_second(ticks_per_second) {
            Ok(()) => debug!(ticks_per_second, "speed changed"),
            Err(error) => warn!(%error, "speed change rejected"),
        }
    }

    /// Applies one mapped input event. Returns `false` when the host should quit.
    pub fn handle_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Direction(direction) => self.submit_direction(direction),
            GameInput::PauseToggle => self.request_pause_toggle(),
            GameInput::Confirm => self.request_confirm(),
            GameInput::Restart => self.request_restart(),
            GameInput::SpeedUp => {
                self.set_speed(adjacent_speed_preset(self.clock.ticks_per_second(), true));
            }
            GameInput::SpeedDown => {
                self.set_speed(adjacent_speed_preset(self.clock.ticks_per_second(), false));
            }
            GameInput::FocusLost => self.focus_lost(),
            GameInput::Quit => {
                self.flush_best();
                return false;
            }
        }
        true
    }

    /// Runs the ticks covered by `delta` and persists any new best score.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        let ticks = self.clock.advance(delta, &mut self.session);
        self.flush_best();
        ticks
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.session.snapshot()
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn pause(&mut self, reason: PauseReason) {
        if self.session.pause(reason) {
            self.clock.halt();
        }
    }

    fn resume(&mut self) {
        if self.session.resume() {
            self.clock.arm();
        }
    }

    fn flush_best(&mut self) {
        if let Some(best) = self.session.take_unsaved_best() {
            info!(best, "new best score");
            self.store.save(best);
        }
    }
}

fn new_session(
    config: &GameConfig,
    best_score: u32,
    seed: Option<u64>,
    game: u64,
) -> Result<GameSession, ConfigError> {
    match seed {
        Some(seed) => {
            GameSession::new_with_seed(config.clone(), best_score, seed.wrapping_add(game))
        }
        None => GameSession::new(config.clone(), best_score),
    }
}
