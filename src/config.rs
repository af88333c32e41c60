use std::fs;
use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default board side length.
pub const DEFAULT_GRID_SIZE: u16 = 22;

/// Smallest board that still fits a turning snake.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest board accepted from configuration.
pub const MAX_GRID_SIZE: u16 = 200;

/// Score granted per food eaten.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Segments in a freshly reset snake.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Pending turns kept before the oldest is evicted.
pub const DEFAULT_QUEUE_CAPACITY: usize = 3;

/// Random draws before the food spawner falls back to a board scan.
pub const DEFAULT_MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 9.0;

/// Ticks one frame may run to catch up after a stall. Zero means no cap.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 0;

/// Speed presets cycled by the `+`/`-` keys, in ticks per second.
pub const SPEED_PRESETS: &[f64] = &[6.0, 9.0, 12.0, 15.0];

/// Host frame pacing for input polling and redraws.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tunable game parameters.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_size: u16,
    pub points_per_food: u32,
    pub initial_length: usize,
    pub queue_capacity: usize,
    pub max_spawn_attempts: u32,
    pub ticks_per_second: f64,
    /// Zero disables the catch-up cap.
    pub max_catch_up_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            initial_length: DEFAULT_INITIAL_LENGTH,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_spawn_attempts: DEFAULT_MAX_SPAWN_ATTEMPTS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
                got: self.grid_size,
            });
        }

        // The starting snake extends from the center to the edge in any direction.
        let room = usize::from(self.grid_size - self.grid_size / 2);
        if self.initial_length == 0 || self.initial_length > room {
            return Err(ConfigError::InitialLength {
                length: self.initial_length,
                grid_size: self.grid_size,
            });
        }

        if self.queue_capacity == 0 {
            return Err(ConfigError::QueueCapacity);
        }

        if self.points_per_food == 0 {
            return Err(ConfigError::PointsPerFood);
        }

        step_duration_for(self.ticks_per_second)?;
        Ok(())
    }
}

/// Converts a tick rate into the fixed step duration.
pub fn step_duration_for(ticks_per_second: f64) -> Result<Duration, ConfigError> {
    if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
        return Err(ConfigError::TicksPerSecond(ticks_per_second));
    }

    match Duration::try_from_secs_f64(1.0 / ticks_per_second) {
        Ok(step) if !step.is_zero() => Ok(step),
        _ => Err(ConfigError::TicksPerSecond(ticks_per_second)),
    }
}

/// Returns the preset one step faster or slower than `current`.
#[must_use]
pub fn adjacent_speed_preset(current: f64, faster: bool) -> f64 {
    let (Some(&slowest), Some(&fastest)) = (SPEED_PRESETS.first(), SPEED_PRESETS.last()) else {
        return current;
    };

    if faster {
        SPEED_PRESETS
            .iter()
            .copied()
            .find(|preset| *preset > current)
            .unwrap_or(fastest)
    } else {
        SPEED_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|preset| *preset < current)
            .unwrap_or(slowest)
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub board_light: Color,
    pub board_dark: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Slate board with a cyan snake and orange food.
pub const THEME: Theme = Theme {
    snake_head: Color::Rgb(0x22, 0xd3, 0xee),
    snake_body: Color::Rgb(0x38, 0xbd, 0xf8),
    food: Color::Rgb(0xf9, 0x73, 0x16),
    board_light: Color::Rgb(0x1e, 0x29, 0x3b),
    board_dark: Color::Rgb(0x0f, 0x17, 0x2a),
    border_fg: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Glyph drawn for each half of a board cell (cells are two columns wide).
pub const GLYPH_CELL: &str = "██";

/// Glyph drawn for food.
pub const GLYPH_FOOD: &str = "●";
