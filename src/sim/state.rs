//! Game state and core simulation types
//!
//! Everything the update loop reads or writes lives in [`GameState`]. It is
//! mutated only through the transition methods here and the tick functions in
//! the sibling modules; the renderer only ever borrows it immutably.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::resolve_collisions;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh state, waiting for the first start
    Idle,
    /// Active gameplay, clock running
    Running,
    /// Clock stopped, state frozen
    Paused,
    /// Run ended (terminal until restart)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    FuelExhausted,
    BirdStrike { bird_id: u64 },
}

/// Moving entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bird,
    Parachute,
    FallingStar,
    Cloud,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Bird,
        EntityKind::Parachute,
        EntityKind::FallingStar,
        EntityKind::Cloud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bird => "bird",
            EntityKind::Parachute => "parachute",
            EntityKind::FallingStar => "star",
            EntityKind::Cloud => "cloud",
        }
    }
}

/// A moving entity on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    pub kind: EntityKind,
    pub pos: Vec2,
}

impl Entity {
    /// True once the entity has drifted past the left or bottom edge far
    /// enough that it can never touch the airplane again
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -COLLISION_DISTANCE
            || self.pos.y > PLAYFIELD_HEIGHT as f32 + COLLISION_DISTANCE
    }
}

/// Airplane movement direction (one arrow key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in playfield coordinates (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Something noteworthy that happened during a transition or tick.
/// Drained by the host for logging and effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    Spawned { kind: EntityKind, id: u64 },
    FuelPickup { id: u64, fuel: i32 },
    StarCollected { id: u64, stars: u32 },
    DifficultyRaised { difficulty: f32 },
    GameOver { cause: GameOverCause },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Whole seconds survived this run
    pub elapsed_seconds: u32,
    /// Remaining fuel (game over at or below zero)
    pub fuel: i32,
    /// Stars collected this run
    pub stars_collected: u32,
    /// Feeds bird speed
    pub difficulty: f32,
    /// Airplane position, clamped to the playfield
    pub airplane: IVec2,
    pub birds: Vec<Entity>,
    pub parachutes: Vec<Entity>,
    pub falling_stars: Vec<Entity>,
    pub clouds: Vec<Entity>,
    /// Set when the phase becomes GameOver
    pub game_over_cause: Option<GameOverCause>,
    /// Periodic trigger scheduler
    pub clock: Clock,
    /// Game balance
    pub tuning: Tuning,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u64,
}

impl GameState {
    /// Create a fresh idle state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            elapsed_seconds: 0,
            fuel: START_FUEL,
            stars_collected: 0,
            difficulty: START_DIFFICULTY,
            airplane: IVec2::new(AIRPLANE_START_X, AIRPLANE_START_Y),
            birds: Vec::new(),
            parachutes: Vec::new(),
            falling_stars: Vec::new(),
            clouds: Vec::new(),
            game_over_cause: None,
            clock: Clock::default(),
            tuning,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID (unique across all kinds, never reused)
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Collection holding entities of `kind`
    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Bird => &self.birds,
            EntityKind::Parachute => &self.parachutes,
            EntityKind::FallingStar => &self.falling_stars,
            EntityKind::Cloud => &self.clouds,
        }
    }

    pub fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Bird => &mut self.birds,
            EntityKind::Parachute => &mut self.parachutes,
            EntityKind::FallingStar => &mut self.falling_stars,
            EntityKind::Cloud => &mut self.clouds,
        }
    }

    /// All live entities, in kind order
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.birds
            .iter()
            .chain(&self.parachutes)
            .chain(&self.falling_stars)
            .chain(&self.clouds)
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a run. From GameOver this restarts first; ignored while a run
    /// is already in progress.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle => {}
            GamePhase::GameOver => self.restart(),
            GamePhase::Running | GamePhase::Paused => return,
        }
        self.phase = GamePhase::Running;
        self.clock.reset();
        self.events.push(GameEvent::Started);
        log::info!("Run started (fuel {})", self.fuel);
    }

    /// Reset the run to its starting values and return to Idle
    pub fn restart(&mut self) {
        self.phase = GamePhase::Idle;
        self.elapsed_seconds = 0;
        self.fuel = START_FUEL;
        self.stars_collected = 0;
        self.difficulty = START_DIFFICULTY;
        self.airplane = IVec2::new(AIRPLANE_START_X, AIRPLANE_START_Y);
        self.birds.clear();
        self.parachutes.clear();
        self.falling_stars.clear();
        self.clouds.clear();
        self.game_over_cause = None;
        self.clock.reset();
        self.events.push(GameEvent::Restarted);
    }

    /// Running <-> Paused. Ignored when idle or game over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                // Cancel in-progress triggers; resuming starts them fresh
                self.clock.reset();
                self.events.push(GameEvent::Paused);
                log::info!("Paused at {}s", self.elapsed_seconds);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.clock.reset();
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Move the airplane one step, clamped to the playfield, then check
    /// collisions. Only while running.
    pub fn move_airplane(&mut self, direction: Direction) {
        if !self.is_running() {
            return;
        }
        let moved = self.airplane + direction.delta() * AIRPLANE_STEP;
        self.airplane = moved.clamp(
            IVec2::ZERO,
            IVec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        );
        resolve_collisions(self);
    }

    /// Enter GameOver (idempotent)
    pub fn end_game(&mut self, cause: GameOverCause) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.clock.reset();
        self.events.push(GameEvent::GameOver { cause });
        log::info!(
            "Game over ({:?}) after {}s with {} stars",
            cause,
            self.elapsed_seconds,
            self.stars_collected
        );
    }
}
