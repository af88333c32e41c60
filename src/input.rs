use std::io;
use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::error::ParseDirectionError;

/// Minimum horizontal drag, in terminal columns, recognised as a swipe.
pub const SWIPE_THRESHOLD_COLUMNS: u16 = 2;

/// Minimum vertical drag, in terminal rows, recognised as a swipe.
pub const SWIPE_THRESHOLD_ROWS: u16 = 1;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Returns true when the two deltas cancel out.
    #[must_use]
    pub fn is_opposite_of(self, other: Self) -> bool {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax + bx == 0 && ay + by == 0
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    PauseToggle,
    Confirm,
    Restart,
    SpeedUp,
    SpeedDown,
    FocusLost,
    Quit,
}

/// Returns whether a direction change is legal: no 180° turns and no repeats.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    !next.is_opposite_of(current) && next != current
}

/// Turns a left-button drag into a direction.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn press(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Finishes the drag at `(column, row)`.
    ///
    /// Drags shorter than the thresholds on both axes are ignored. The
    /// horizontal axis wins only when it is strictly dominant.
    pub fn release(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_column, start_row) = self.start.take()?;
        let dx = i32::from(column) - i32::from(start_column);
        let dy = i32::from(row) - i32::from(start_row);

        if dx.unsigned_abs() < u32::from(SWIPE_THRESHOLD_COLUMNS)
            && dy.unsigned_abs() < u32::from(SWIPE_THRESHOLD_ROWS)
        {
            return None;
        }

        if dx.unsigned_abs() > dy.unsigned_abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// Polls crossterm for keyboard, mouse and focus events.
#[derive(Debug, Default)]
pub struct InputHandler {
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one event and maps it to a [`GameInput`].
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse),
            Event::FocusLost => Some(GameInput::FocusLost),
            _ => None,
        })
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.press(mouse.column, mouse.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .release(mouse.column, mouse.row)
                .map(GameInput::Direction),
            _ => None,
        }
    }
}

/// Maps a key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char(' ') => Some(GameInput::PauseToggle),
        KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Char('r' | 'R') => Some(GameInput::Restart),
        KeyCode::Char('+' | '=') => Some(GameInput::SpeedUp),
        KeyCode::Char('-' | '_') => Some(GameInput::SpeedDown),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
