use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::direction_queue::DirectionQueue;
use crate::error::ConfigError;
use crate::food::FoodSpawner;
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::SnakeBody;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Ready,
    Running,
    Paused,
    Over,
}

/// Why the session is paused.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PauseReason {
    Manual,
    FocusLost,
}

/// What ended the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

/// Result of a single [`GameSession::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The session was not running; nothing changed.
    Idle,
    Moved,
    Ate { score: u32, new_best: bool },
    Collided { kind: CollisionKind, final_score: u32 },
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub snake: &'a SnakeBody,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub status: GameStatus,
    pub pause_reason: Option<PauseReason>,
    pub collision: Option<CollisionKind>,
    pub score: u32,
    pub best_score: u32,
    /// This game has beaten the best score it started with.
    pub new_best: bool,
    pub tick_count: u64,
}

impl Snapshot<'_> {
    /// Snake cells from head to tail.
    #[must_use]
    pub fn snake_cells(&self) -> Vec<Cell> {
        self.snake.segments().copied().collect()
    }
}

/// Complete mutable game state for one game.
///
/// A session is created in [`GameStatus::Ready`] with a snake already laid
/// out so there is something to draw before the first start.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: SnakeBody,
    direction: Direction,
    queue: DirectionQueue,
    spawner: FoodSpawner,
    food: Option<Cell>,
    score: u32,
    best_score: u32,
    status: GameStatus,
    pause_reason: Option<PauseReason>,
    collision: Option<CollisionKind>,
    tick_count: u64,
    unsaved_best: Option<u32>,
    new_best_this_game: bool,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from OS entropy.
    pub fn new(config: GameConfig, best_score: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, best_score, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(
        config: GameConfig,
        best_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, best_score, StdRng::seed_from_u64(seed))
    }

    /// Creates a running session from an explicit board layout.
    ///
    /// Used to script scenarios: the snake, heading and food are taken as
    /// given instead of being laid out by a reset.
    pub fn from_layout(
        config: GameConfig,
        seed: u64,
        snake: SnakeBody,
        direction: Direction,
        food: Option<Cell>,
    ) -> Result<Self, ConfigError> {
        let mut session = Self::new_with_seed(config, 0, seed)?;
        session.snake = snake;
        session.direction = direction;
        session.food = food;
        session.status = GameStatus::Running;
        Ok(session)
    }

    fn with_rng(config: GameConfig, best_score: u32, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size);
        let snake = SnakeBody::straight(grid.center(), Direction::Right, config.initial_length);

        let mut session = Self {
            grid,
            snake,
            direction: Direction::Right,
            queue: DirectionQueue::new(config.queue_capacity),
            spawner: FoodSpawner::new(config.max_spawn_attempts),
            food: None,
            score: 0,
            best_score,
            status: GameStatus::Ready,
            pause_reason: None,
            collision: None,
            tick_count: 0,
            unsaved_best: None,
            new_best_this_game: false,
            rng,
            config,
        };
        session.reset(Direction::Right);
        Ok(session)
    }

    /// Lays out a fresh snake and food. Does not change the status.
    pub fn reset(&mut self, initial_direction: Direction) {
        self.direction = initial_direction;
        self.queue.clear();
        self.snake = SnakeBody::straight(
            self.grid.center(),
            initial_direction,
            self.config.initial_length,
        );
        self.food = self
            .spawner
            .spawn(&mut self.rng, self.snake.occupancy(), self.grid);
        self.score = 0;
        self.new_best_this_game = false;
        self.tick_count = 0;
        self.pause_reason = None;
        self.collision = None;
    }

    /// Starts play from `Ready` or `Over`, resetting the board first.
    ///
    /// Returns `false` when the session is already running or paused.
    pub fn start(&mut self, initial_direction: Option<Direction>) -> bool {
        if !matches!(self.status, GameStatus::Ready | GameStatus::Over) {
            return false;
        }

        self.reset(initial_direction.unwrap_or(Direction::Right));
        self.status = GameStatus::Running;
        info!(direction = ?self.direction, "game started");
        true
    }

    /// Pauses a running session.
    pub fn pause(&mut self, reason: PauseReason) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        self.status = GameStatus::Paused;
        self.pause_reason = Some(reason);
        debug!(?reason, "game paused");
        true
    }

    /// Resumes a paused session.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }

        self.status = GameStatus::Running;
        self.pause_reason = None;
        debug!("game resumed");
        true
    }

    /// Applies a direction request.
    ///
    /// From `Ready` this is an implicit start heading that way. While running
    /// the turn is queued if legal. Paused and finished sessions ignore it.
    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        match self.status {
            GameStatus::Ready => self.start(Some(direction)),
            GameStatus::Running => self.queue.enqueue(direction, self.direction),
            GameStatus::Paused | GameStatus::Over => false,
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Self-collision is tested against the body as it stands before the
    /// move, tail included: the head may not enter the cell the tail is
    /// about to leave.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Idle;
        }

        self.tick_count += 1;
        if let Some(direction) = self.queue.dequeue() {
            self.direction = direction;
        }

        let next_head = self.snake.head().step(self.direction);
        let collision = if !self.grid.contains(next_head) {
            Some(CollisionKind::Wall)
        } else if self.snake.occupies(next_head) {
            Some(CollisionKind::SelfCollision)
        } else {
            None
        };

        if let Some(kind) = collision {
            self.status = GameStatus::Over;
            self.collision = Some(kind);
            info!(?kind, score = self.score, ticks = self.tick_count, "game over");
            return StepOutcome::Collided {
                kind,
                final_score: self.score,
            };
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.score = self.score.saturating_add(self.config.points_per_food);
            let new_best = self.score > self.best_score;
            if new_best {
                self.best_score = self.score;
                self.unsaved_best = Some(self.score);
                self.new_best_this_game = true;
            }

            self.food = self
                .spawner
                .spawn(&mut self.rng, self.snake.occupancy(), self.grid);
            match self.food {
                Some(food) => debug!(score = self.score, ?food, "food eaten"),
                None => info!(length = self.snake.len(), "board full, no food left"),
            }

            return StepOutcome::Ate {
                score: self.score,
                new_best,
            };
        }

        let _ = self.snake.pop_tail();
        StepOutcome::Moved
    }

    /// Takes the best score raised since the last call, if any.
    pub fn take_unsaved_best(&mut self) -> Option<u32> {
        self.unsaved_best.take()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            direction: self.direction,
            status: self.status,
            pause_reason: self.pause_reason,
            collision: self.collision,
            score: self.score,
            best_score: self.best_score,
            new_best: self.new_best_this_game,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_directions(&self) -> &DirectionQueue {
        &self.queue
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
