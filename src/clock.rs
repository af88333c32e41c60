use std::time::Duration;

use tracing::debug;

use crate::config::{step_duration_for, GameConfig};
use crate::error::ConfigError;
use crate::game::{GameSession, GameStatus};

/// Fixed-timestep accumulator driving [`GameSession::step`].
///
/// The host measures elapsed time once per frame and hands it to
/// [`SimulationClock::advance`]; the clock turns it into whole ticks and
/// carries the remainder to the next frame.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    ticks_per_second: f64,
    step: Duration,
    accumulator: Duration,
    armed: bool,
    max_catch_up_ticks: u32,
}

impl SimulationClock {
    /// Creates a halted clock. A `max_catch_up_ticks` of zero means unbounded.
    pub fn new(ticks_per_second: f64, max_catch_up_ticks: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            ticks_per_second,
            step: step_duration_for(ticks_per_second)?,
            accumulator: Duration::ZERO,
            armed: false,
            max_catch_up_ticks,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::new(config.ticks_per_second, config.max_catch_up_ticks)
    }

    /// Starts issuing ticks from an empty accumulator.
    pub fn arm(&mut self) {
        self.armed = true;
        self.accumulator = Duration::ZERO;
    }

    /// Stops issuing ticks and discards any partial tick.
    pub fn halt(&mut self) {
        self.armed = false;
        self.accumulator = Duration::ZERO;
    }

    /// Changes the tick rate. The accumulator is kept, so the new rate
    /// applies from the next tick.
    pub fn set_ticks_per_second(&mut self, ticks_per_second: f64) -> Result<(), ConfigError> {
        self.step = step_duration_for(ticks_per_second)?;
        self.ticks_per_second = ticks_per_second;
        Ok(())
    }

    /// Adds `delta` and runs every whole tick it covers.
    ///
    /// Stops early when the session leaves `Running`, halting the clock.
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, delta: Duration, session: &mut GameSession) -> u32 {
        if !self.armed {
            return 0;
        }

        if session.status() != GameStatus::Running {
            self.halt();
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(delta);
        let mut ticks = 0;

        while self.accumulator >= self.step {
            if self.max_catch_up_ticks > 0 && ticks >= self.max_catch_up_ticks {
                debug!(dropped = ?self.accumulator, ticks, "catch-up limit reached");
                self.accumulator = Duration::ZERO;
                break;
            }

            self.accumulator -= self.step;
            ticks += 1;
            session.step();

            if session.status() != GameStatus::Running {
                self.halt();
                break;
            }
        }

        ticks
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    #[must_use]
    pub fn step_duration(&self) -> Duration {
        self.step
    }

    #[must_use]
    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SimulationClock;
    use crate::config::GameConfig;
    use crate::game::{GameSession, GameStatus};
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::SnakeBody;

    /// A long board so a snake heading right runs many ticks without food.
    fn open_session() -> GameSession {
        let config = GameConfig {
            grid_size: 200,
            ..GameConfig::default()
        };
        let snake = SnakeBody::straight(Cell::new(2, 0), Direction::Right, 3);
        GameSession::from_layout(config, 1, snake, Direction::Right, Some(Cell::new(0, 199)))
            .expect("valid config")
    }

    #[test]
    fn halted_clock_runs_nothing() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        let mut session = open_session();

        assert_eq!(clock.advance(Duration::from_secs(5), &mut session), 0);
        assert_eq!(session.tick_count(), 0);
    }

    #[test]
    fn partial_ticks_carry_over_between_frames() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        let mut session = open_session();
        clock.arm();

        assert_eq!(clock.advance(Duration::from_millis(60), &mut session), 0);
        assert_eq!(clock.advance(Duration::from_millis(60), &mut session), 1);
        assert_eq!(clock.accumulator(), Duration::from_millis(20));
    }

    #[test]
    fn long_frame_catches_up_with_several_ticks() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        let mut session = open_session();
        clock.arm();

        assert_eq!(clock.advance(Duration::from_millis(350), &mut session), 3);
        assert_eq!(session.snake().head(), Cell::new(5, 0));
        assert_eq!(clock.accumulator(), Duration::from_millis(50));
    }

    #[test]
    fn catch_up_cap_drops_backlog() {
        let mut clock = SimulationClock::new(10.0, 4).expect("valid rate");
        let mut session = open_session();
        clock.arm();

        assert_eq!(clock.advance(Duration::from_secs(3), &mut session), 4);
        assert_eq!(clock.accumulator(), Duration::ZERO);
    }

    #[test]
    fn default_config_catches_up_every_due_tick() {
        let mut session = open_session();
        let mut clock = SimulationClock::from_config(session.config()).expect("valid config");
        clock.arm();

        // Two seconds at 9 ticks per second.
        assert_eq!(clock.advance(Duration::from_secs(2), &mut session), 18);
        assert_eq!(session.tick_count(), 18);
        assert!(clock.accumulator() < clock.step_duration());
    }

    #[test]
    fn game_over_aborts_remaining_ticks() {
        let config = GameConfig {
            grid_size: 8,
            ..GameConfig::default()
        };
        let snake = SnakeBody::straight(Cell::new(6, 0), Direction::Right, 3);
        let mut session =
            GameSession::from_layout(config, 2, snake, Direction::Right, Some(Cell::new(0, 7)))
                .expect("valid config");
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        clock.arm();

        // Ten ticks are due but the second one hits the wall.
        assert_eq!(clock.advance(Duration::from_secs(1), &mut session), 2);
        assert_eq!(session.status(), GameStatus::Over);
        assert!(!clock.is_armed());
        assert_eq!(clock.accumulator(), Duration::ZERO);
    }

    #[test]
    fn speed_change_keeps_accumulator() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        let mut session = open_session();
        clock.arm();
        clock.advance(Duration::from_millis(80), &mut session);

        clock.set_ticks_per_second(20.0).expect("valid rate");

        assert_eq!(clock.accumulator(), Duration::from_millis(80));
        assert_eq!(clock.step_duration(), Duration::from_millis(50));
        assert_eq!(clock.advance(Duration::from_millis(30), &mut session), 2);
    }

    #[test]
    fn invalid_speed_is_rejected_and_previous_rate_kept() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");

        assert!(clock.set_ticks_per_second(0.0).is_err());
        assert!(clock.set_ticks_per_second(-3.0).is_err());
        assert_eq!(clock.ticks_per_second(), 10.0);
        assert_eq!(clock.step_duration(), Duration::from_millis(100));
    }

    #[test]
    fn halt_discards_partial_tick() {
        let mut clock = SimulationClock::new(10.0, 0).expect("valid rate");
        let mut session = open_session();
        clock.arm();
        clock.advance(Duration::from_millis(90), &mut session);

        clock.halt();
        clock.arm();

        assert_eq!(clock.accumulator(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(20), &mut session), 0);
    }
}
