//! Entity spawner
//!
//! Each spawn tick rolls once per entity kind; a roll above the kind's
//! threshold spawns one entity at a random point of its spawn region.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, GameEvent, GameState};
use crate::tuning::SpawnRule;

/// Roll for every entity kind and spawn the winners
pub fn spawn_entities(state: &mut GameState) {
    for kind in EntityKind::ALL {
        let rule = spawn_rule(state, kind);
        if let Some(pos) = roll_spawn(state.rng(), &rule) {
            let id = state.next_entity_id();
            state.entities_mut(kind).push(Entity { id, kind, pos });
            state.events.push(GameEvent::Spawned { kind, id });
        }
    }
}

fn spawn_rule(state: &GameState, kind: EntityKind) -> SpawnRule {
    let tuning = &state.tuning;
    match kind {
        EntityKind::Bird => tuning.bird,
        EntityKind::Parachute => tuning.parachute,
        EntityKind::FallingStar => tuning.falling_star,
        EntityKind::Cloud => tuning.cloud,
    }
}

/// Roll once against `rule`; on success sample a spawn position
pub fn roll_spawn<R: Rng>(rng: &mut R, rule: &SpawnRule) -> Option<Vec2> {
    let roll: f32 = rng.random();
    if roll <= rule.threshold {
        return None;
    }
    let x = rule.x.sample(rng);
    let y = rule.y.sample(rng);
    Some(Vec2::new(x, y))
}
