use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be between {min} and {max}, got {got}")]
    GridSize { min: u16, max: u16, got: u16 },

    #[error("initial snake length {length} does not fit a {grid_size}x{grid_size} grid")]
    InitialLength { length: usize, grid_size: u16 },

    #[error("direction queue capacity must be at least 1")]
    QueueCapacity,

    #[error("points per food must be at least 1")]
    PointsPerFood,

    #[error("ticks per second must be a positive finite number, got {0}")]
    TicksPerSecond(f64),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reading or writing the best-score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Invalid explicit snake body.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SnakeError {
    #[error("snake body must contain at least one segment")]
    Empty,

    #[error("snake body visits ({x}, {y}) more than once")]
    DuplicateSegment { x: i32, y: i32 },
}

/// Unknown direction key.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown direction {0:?}, expected one of up, down, left, right")]
pub struct ParseDirectionError(pub String);
