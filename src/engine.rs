//! The game engine: owns the snake, the food and the run state, and advances the simulation
//! when driven with frame timestamps.
//!
//! Commands only record intent. Movement happens exclusively inside [`Engine::advance`], and
//! only once the tick interval for the current difficulty has elapsed. Commands that make no
//! sense for the current state are ignored rather than reported, so input handlers can forward
//! every key press without checking the state first.

use crate::effects::{DeferredEffects, Effect};
use crate::geometry::{cells, random_cell, Coordinate, Direction};
use crate::rules::{check_collision, is_feeding, CollisionKind};
use crate::score::HighScoreStore;
use crate::snake::{Snake, SEED};
use crate::speed::{tick_interval, Difficulty, SpeedFactor};
use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::time::Duration;

/// Random draws before falling back to scanning the board for a free cell.
const SPAWN_ATTEMPTS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Everything an input collaborator can ask of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    TogglePause,
    Start,
    Restart,
    SetDifficulty(Difficulty),
    /// Out of range values are clamped.
    SetSpeedFactor(i32),
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub speed_factor: SpeedFactor,
    /// How long the "just ate" flag stays up after feeding.
    pub just_ate_for: Duration,
    /// How long the "just spawned" flag stays up after food appears.
    pub just_spawned_for: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            difficulty: Difficulty::default(),
            speed_factor: SpeedFactor::default(),
            just_ate_for: Duration::from_millis(300),
            just_spawned_for: Duration::from_millis(300),
        }
    }
}

/// Read-only view handed to renderers after each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Tail first, head last.
    pub snake: Vec<Coordinate>,
    pub food: Coordinate,
    pub score: u32,
    pub high_score: u32,
    pub state: GameState,
    pub just_ate: bool,
    pub just_spawned: bool,
    pub direction: Direction,
    pub difficulty: Difficulty,
    pub speed_factor: u8,
    pub tick_interval: Duration,
    /// What the snake hit to end the last run. `None` while a run is live, or when the run
    /// ended because the snake filled the board.
    pub last_collision: Option<CollisionKind>,
}

pub struct Engine<R = ThreadRng> {
    rng: R,
    config: EngineConfig,
    store: HighScoreStore,
    state: GameState,
    snake: Snake,
    food: Coordinate,
    // Direction of the last applied step.
    heading: Direction,
    // Direction the next step will take.
    direction: Direction,
    last_tick: Duration,
    last_seen: Duration,
    effects: DeferredEffects,
    last_collision: Option<CollisionKind>,
}

impl Engine<ThreadRng> {
    pub fn new(config: EngineConfig, store: HighScoreStore) -> Self {
        Engine::with_rng(config, store, rand::thread_rng())
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: EngineConfig, store: HighScoreStore, rng: R) -> Self {
        let mut engine = Engine {
            rng,
            config,
            store,
            state: GameState::NotStarted,
            snake: Snake::seed(),
            food: Coordinate::new(0, 0),
            heading: Direction::Right,
            direction: Direction::Right,
            last_tick: Duration::ZERO,
            last_seen: Duration::ZERO,
            effects: DeferredEffects::new(),
            last_collision: None,
        };
        if let Some(food) = engine.spawn_food() {
            engine.food = food;
        }
        engine
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coordinate {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn speed_factor(&self) -> SpeedFactor {
        self.config.speed_factor
    }

    pub fn score(&self) -> u32 {
        (self.snake.len() - SEED.len()) as u32
    }

    pub fn high_score(&self) -> u32 {
        self.store.best()
    }

    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.config.difficulty, self.config.speed_factor)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.set_direction(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Start => self.start(),
            Command::Restart => self.restart(),
            Command::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            Command::SetSpeedFactor(n) => self.set_speed_factor(n),
        }
    }

    pub fn start(&mut self) {
        if self.can_launch() {
            info!("Starting run on {} difficulty", self.config.difficulty);
            self.launch();
        } else {
            debug!("Ignoring start while {:?}", self.state);
        }
    }

    pub fn restart(&mut self) {
        if self.can_launch() {
            info!("Restarting, high score {}", self.store.best());
            self.launch();
        } else {
            debug!("Ignoring restart while {:?}", self.state);
        }
    }

    /// Queues `requested` for the next step. A reversal of either the queued direction or the
    /// last step taken is refused, so two quick turns cannot fold the head onto the neck.
    pub fn set_direction(&mut self, requested: Direction) {
        if !matches!(self.state, GameState::Running | GameState::Paused) {
            debug!("Ignoring {:?} while {:?}", requested, self.state);
            return;
        }
        if self.direction.is_opposite(requested) || self.heading.is_opposite(requested) {
            debug!(
                "Ignoring reversal to {:?} (queued {:?}, moving {:?})",
                requested, self.direction, self.heading
            );
            return;
        }
        self.direction = requested;
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            other => {
                debug!("Ignoring pause toggle while {:?}", other);
                other
            }
        };
    }

    /// Difficulty is locked once the first run begins.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.state == GameState::NotStarted {
            self.config.difficulty = difficulty;
        } else {
            debug!("Ignoring difficulty change while {:?}", self.state);
        }
    }

    pub fn set_speed_factor(&mut self, n: i32) {
        self.config.speed_factor = SpeedFactor::clamped(n);
    }

    /// Called once per frame. Steps the simulation at most once, and only when more than one
    /// tick interval has passed since the previous step.
    pub fn advance(&mut self, timestamp: Duration) {
        self.last_seen = self.last_seen.max(timestamp);
        self.effects.expire(timestamp);

        if self.state != GameState::Running {
            // Keeps the first frame after a resume from counting the paused time.
            self.last_tick = timestamp;
            return;
        }

        let delta = timestamp.saturating_sub(self.last_tick);
        if delta <= self.tick_interval() {
            return;
        }
        self.last_tick = timestamp;
        self.step(timestamp);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().collect(),
            food: self.food,
            score: self.score(),
            high_score: self.store.best(),
            state: self.state,
            just_ate: self.effects.is_active(Effect::JustAte),
            just_spawned: self.effects.is_active(Effect::JustSpawned),
            direction: self.direction,
            difficulty: self.config.difficulty,
            speed_factor: self.config.speed_factor.get(),
            tick_interval: self.tick_interval(),
            last_collision: self.last_collision,
        }
    }

    fn can_launch(&self) -> bool {
        matches!(self.state, GameState::NotStarted | GameState::GameOver)
    }

    fn launch(&mut self) {
        self.snake = Snake::seed();
        self.heading = Direction::Right;
        self.direction = Direction::Right;
        self.last_collision = None;
        self.effects.cancel_all();
        if let Some(food) = self.spawn_food() {
            self.food = food;
        }
        self.effects
            .arm(Effect::JustSpawned, self.last_seen, self.config.just_spawned_for);
        self.last_tick = self.last_seen;
        self.state = GameState::Running;
    }

    fn step(&mut self, now: Duration) {
        let new_head = self.snake.head().moved(self.direction);

        // Checked against the body before it shifts, tail included
        if let Some(kind) = check_collision(new_head, &self.snake) {
            self.end_run(Some(kind));
            return;
        }

        let ate = is_feeding(new_head, self.food);
        self.snake.slither(new_head, ate);
        self.heading = self.direction;

        if ate {
            let Some(food) = self.spawn_food() else {
                info!("Board filled");
                self.end_run(None);
                return;
            };
            self.food = food;
            self.effects.arm(Effect::JustAte, now, self.config.just_ate_for);
            self.effects
                .arm(Effect::JustSpawned, now, self.config.just_spawned_for);
            debug!("Nommed at {:?}, score {}", new_head, self.score());
        }
    }

    /// `cause` is `None` when the snake filled the whole board.
    fn end_run(&mut self, cause: Option<CollisionKind>) {
        let final_score = self.score();
        self.state = GameState::GameOver;
        self.last_collision = cause;
        let high_score = self.store.commit(final_score);
        info!(
            "Game over ({:?}), final score {}, high score {}",
            cause, final_score, high_score
        );
    }

    /// `None` once the snake covers every cell.
    fn spawn_food(&mut self) -> Option<Coordinate> {
        for _ in 0..SPAWN_ATTEMPTS {
            let pos = random_cell(&mut self.rng);
            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }

        let snake = &self.snake;
        let pos = cells()
            .filter(|c| !snake.occupies(*c))
            .choose(&mut self.rng);
        if pos.is_none() {
            warn!("No free cell left for food");
        }
        pos
    }
}
