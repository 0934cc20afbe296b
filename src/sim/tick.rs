//! Simulation tick
//!
//! The single authoritative update: applies player input, advances the clock,
//! and runs every trigger that came due against the one `GameState`.

use rand::Rng;

use super::clock::Trigger;
use super::collision::resolve_collisions;
use super::spawn::spawn_entities;
use super::state::{Direction, EntityKind, GameEvent, GameOverCause, GameState};

/// Input commands gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start (or restart after game over)
    pub start: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Arrow key presses, in order
    pub moves: Vec<Direction>,
}

impl TickInput {
    /// Clear one-shot inputs after they have been applied
    pub fn clear(&mut self) {
        self.start = false;
        self.toggle_pause = false;
        self.moves.clear();
    }
}

/// Advance the game by `dt_ms` of wall time
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if input.start {
        state.start();
    }
    if input.toggle_pause {
        state.toggle_pause();
    }
    for direction in &input.moves {
        state.move_airplane(*direction);
    }

    // Clock only runs while playing
    if !state.is_running() {
        return;
    }

    let fired = state.clock.advance(dt_ms, &state.tuning);
    for trigger in fired {
        // A trigger may end the run; later ones are cancelled with it
        if !state.is_running() {
            break;
        }
        match trigger {
            Trigger::Second => burn_fuel(state),
            Trigger::Spawn => spawn_and_advance(state),
            Trigger::Cloud => drift_clouds(state),
            Trigger::Difficulty => raise_difficulty(state),
        }
    }
}

/// One second elapsed: time +1, fuel -1, out of fuel ends the run
pub fn burn_fuel(state: &mut GameState) {
    state.elapsed_seconds += 1;
    state.fuel -= state.tuning.fuel_per_second;
    if state.fuel <= 0 {
        state.end_game(GameOverCause::FuelExhausted);
    }
}

/// Spawn, then move birds left and parachutes/stars down, then collide.
/// Entities spawned this tick move on the same tick.
pub fn spawn_and_advance(state: &mut GameState) {
    spawn_entities(state);

    let bird_speed = state.tuning.bird_speed(state.difficulty);
    let fall_speed = state.tuning.fall_speed;
    for bird in &mut state.birds {
        bird.pos.x -= bird_speed;
    }
    for entity in state.parachutes.iter_mut().chain(state.falling_stars.iter_mut()) {
        entity.pos.y += fall_speed;
    }

    if state.tuning.prune_offscreen {
        for kind in [EntityKind::Bird, EntityKind::Parachute, EntityKind::FallingStar] {
            state.entities_mut(kind).retain(|e| !e.is_offscreen());
        }
    }

    resolve_collisions(state);
}

/// Clouds drift left with a little vertical jitter
pub fn drift_clouds(state: &mut GameState) {
    let speed = state.tuning.cloud_speed;
    let jitter = state.tuning.cloud_jitter;
    let count = state.clouds.len();
    let offsets: Vec<f32> = (0..count)
        .map(|_| (state.rng().random::<f32>() - 0.5) * 2.0 * jitter)
        .collect();
    for (cloud, dy) in state.clouds.iter_mut().zip(offsets) {
        cloud.pos.x -= speed;
        cloud.pos.y += dy;
    }

    if state.tuning.prune_offscreen {
        state.clouds.retain(|c| !c.is_offscreen());
    }
}

/// Difficulty step (speeds up birds)
pub fn raise_difficulty(state: &mut GameState) {
    state.difficulty += state.tuning.difficulty_step;
    state.events.push(GameEvent::DifficultyRaised {
        difficulty: state.difficulty,
    });
    log::debug!("Difficulty raised to {}", state.difficulty);
}
