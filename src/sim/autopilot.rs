//! Autopilot - picks an arrow key for the airplane
//!
//! Used by the native headless runner and the in-browser demo toggle. Dodges
//! the most threatening bird first, otherwise heads for the nearest
//! parachute (when fuel is low) or star.

use glam::Vec2;

use super::state::{Direction, Entity, GameState};
use crate::consts::COLLISION_DISTANCE;

/// How far ahead (px, along x) a bird counts as a threat
const THREAT_RANGE: f32 = 120.0;
/// Fuel level below which parachutes beat stars
const LOW_FUEL: i32 = 5;

/// Choose the next move, or `None` to hold position
pub fn steer(state: &GameState) -> Option<Direction> {
    if !state.is_running() {
        return None;
    }
    let plane = state.airplane.as_vec2();

    if let Some(bird) = nearest_threat(&state.birds, plane) {
        // Step away vertically; near an edge, step the other way
        let dodge_up = bird.pos.y >= plane.y;
        return Some(if dodge_up && plane.y > COLLISION_DISTANCE {
            Direction::Up
        } else if !dodge_up && plane.y < crate::consts::PLAYFIELD_HEIGHT as f32 - COLLISION_DISTANCE {
            Direction::Down
        } else if dodge_up {
            Direction::Down
        } else {
            Direction::Up
        });
    }

    let targets = if state.fuel < LOW_FUEL && !state.parachutes.is_empty() {
        &state.parachutes
    } else {
        &state.falling_stars
    };
    let target = targets
        .iter()
        .min_by(|a, b| a.pos.distance_squared(plane).total_cmp(&b.pos.distance_squared(plane)))?;
    head_toward(plane, target.pos)
}

/// Bird that is ahead of the plane, within range and lined up vertically
fn nearest_threat(birds: &[Entity], plane: Vec2) -> Option<&Entity> {
    birds
        .iter()
        .filter(|b| {
            let ahead = b.pos.x - plane.x;
            ahead > -COLLISION_DISTANCE
                && ahead < THREAT_RANGE
                && (b.pos.y - plane.y).abs() < COLLISION_DISTANCE * 1.5
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
}

fn head_toward(plane: Vec2, target: Vec2) -> Option<Direction> {
    let delta = target - plane;
    if delta.x.abs() < 5.0 && delta.y.abs() < 5.0 {
        return None;
    }
    Some(if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;
    use glam::IVec2;

    fn with(state: &mut GameState, kind: EntityKind, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.entities_mut(kind).push(Entity {
            id,
            kind,
            pos: Vec2::new(x, y),
        });
    }

    #[test]
    fn test_idle_state_holds() {
        let state = GameState::new(1);
        assert_eq!(steer(&state), None);
    }

    #[test]
    fn test_dodges_incoming_bird() {
        let mut state = GameState::new(1);
        state.start();
        with(&mut state, EntityKind::Bird, 580.0, 310.0);
        assert_eq!(steer(&state), Some(Direction::Up));
    }

    #[test]
    fn test_dodges_down_at_top_edge() {
        let mut state = GameState::new(1);
        state.start();
        state.airplane = IVec2::new(512, 10);
        with(&mut state, EntityKind::Bird, 580.0, 20.0);
        assert_eq!(steer(&state), Some(Direction::Down));
    }

    #[test]
    fn test_ignores_birds_behind() {
        let mut state = GameState::new(1);
        state.start();
        with(&mut state, EntityKind::Bird, 300.0, 300.0);
        with(&mut state, EntityKind::FallingStar, 700.0, 300.0);
        assert_eq!(steer(&state), Some(Direction::Right));
    }

    #[test]
    fn test_prefers_parachute_when_fuel_low() {
        let mut state = GameState::new(1);
        state.start();
        state.fuel = 2;
        with(&mut state, EntityKind::FallingStar, 530.0, 300.0);
        with(&mut state, EntityKind::Parachute, 512.0, 100.0);
        assert_eq!(steer(&state), Some(Direction::Up));
    }
}
