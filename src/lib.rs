//! Fixed-timestep grid snake.
//!
//! The simulation core ([`game`], [`clock`] and the modules they build on)
//! has no terminal dependency; [`renderer`], [`ui`] and [`terminal_runtime`]
//! are the ratatui/crossterm host around it.

pub mod app;
pub mod clock;
pub mod config;
pub mod direction_queue;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
