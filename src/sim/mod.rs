//! Game simulation module
//!
//! All gameplay logic lives here:
//! - One consolidated `GameState`, mutated only through transitions and `tick`
//! - Timers are a pure clock fed elapsed milliseconds
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Clock, Trigger};
pub use collision::{overlaps, resolve_collisions};
pub use spawn::spawn_entities;
pub use state::{
    Direction, Entity, EntityKind, GameEvent, GameOverCause, GamePhase, GameState,
};
pub use tick::{TickInput, tick};
