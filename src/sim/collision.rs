//! Collision detection and response
//!
//! Axis-independent proximity: an entity touches the airplane when it is
//! within `COLLISION_DISTANCE` on both axes. A plain scan per collection is
//! plenty at this scale.

use glam::{IVec2, Vec2};

use super::state::{GameEvent, GameOverCause, GameState};
use crate::consts::COLLISION_DISTANCE;

/// Check whether an entity at `pos` touches the airplane
#[inline]
pub fn overlaps(pos: Vec2, airplane: IVec2) -> bool {
    let plane = airplane.as_vec2();
    (pos.x - plane.x).abs() < COLLISION_DISTANCE && (pos.y - plane.y).abs() < COLLISION_DISTANCE
}

/// Apply every collision between the airplane and the current entities.
///
/// Birds end the run. Parachutes add fuel and stars add to the tally; both
/// are removed by id so each is consumed exactly once. Clouds never collide.
pub fn resolve_collisions(state: &mut GameState) {
    let airplane = state.airplane;

    if let Some(bird) = state.birds.iter().find(|b| overlaps(b.pos, airplane)) {
        let bird_id = bird.id;
        log::debug!("Bird {} hit the airplane", bird_id);
        state.end_game(GameOverCause::BirdStrike { bird_id });
    }

    let refuel = state.tuning.parachute_fuel;
    let events = &mut state.events;
    let mut fuel = state.fuel;
    state.parachutes.retain(|p| {
        if !overlaps(p.pos, airplane) {
            return true;
        }
        fuel += refuel;
        log::debug!("Parachute {} picked up, fuel {}", p.id, fuel);
        events.push(GameEvent::FuelPickup { id: p.id, fuel });
        false
    });
    state.fuel = fuel;

    let mut stars = state.stars_collected;
    state.falling_stars.retain(|s| {
        if !overlaps(s.pos, airplane) {
            return true;
        }
        stars += 1;
        log::debug!("Star {} collected, total {}", s.id, stars);
        events.push(GameEvent::StarCollected { id: s.id, stars });
        false
    });
    state.stars_collected = stars;
}
