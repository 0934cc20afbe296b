//! Rendering module
//!
//! Builds a read-only scene (sprites + HUD text) from the game state. The DOM
//! backend positions one absolutely placed glyph per sprite.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use crate::session::Session;
use crate::sim::{EntityKind, GameState};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Airplane,
    Entity(EntityKind),
}

impl SpriteKind {
    /// CSS class
    pub fn class(&self) -> &'static str {
        match self {
            SpriteKind::Airplane => "airplane",
            SpriteKind::Entity(kind) => kind.as_str(),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            SpriteKind::Airplane => "🛩️",
            SpriteKind::Entity(EntityKind::Bird) => "🦅",
            SpriteKind::Entity(EntityKind::Parachute) => "🪂",
            SpriteKind::Entity(EntityKind::FallingStar) => "⭐",
            SpriteKind::Entity(EntityKind::Cloud) => "☁️",
        }
    }
}

/// One positioned glyph. `id` is 0 for the airplane and the entity id otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl Sprite {
    /// Stable key for reusing DOM nodes across frames
    pub fn key(&self) -> String {
        format!("{}-{}", self.kind.class(), self.id)
    }
}

/// Sprites to draw, back to front. The playfield is hidden once the run ends.
pub fn build_scene(state: &GameState) -> Vec<Sprite> {
    if state.is_game_over() {
        return Vec::new();
    }

    let mut sprites = Vec::with_capacity(1 + state.all_entities().count());
    // Clouds sit behind everything
    for kind in [
        EntityKind::Cloud,
        EntityKind::Bird,
        EntityKind::Parachute,
        EntityKind::FallingStar,
    ] {
        sprites.extend(state.entities(kind).iter().map(|e| Sprite {
            kind: SpriteKind::Entity(kind),
            id: e.id,
            x: e.pos.x,
            y: e.pos.y,
        }));
    }
    sprites.push(Sprite {
        kind: SpriteKind::Airplane,
        id: 0,
        x: state.airplane.x as f32,
        y: state.airplane.y as f32,
    });
    sprites
}

/// Status line under the title
pub fn hud_text(state: &GameState) -> String {
    format!(
        "Time: {}s | Fuel: {} | Stars: {}",
        state.elapsed_seconds, state.fuel, state.stars_collected
    )
}

/// Label on the submit button
pub fn submit_label(session: &Session) -> &'static str {
    if session.submission.is_in_flight() {
        "Submitting..."
    } else {
        "Submit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Entity, GameOverCause};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_scene_layers_and_airplane_last() {
        let mut state = GameState::new(1);
        state.start();
        for kind in [EntityKind::Bird, EntityKind::Cloud] {
            let id = state.next_entity_id();
            state.entities_mut(kind).push(Entity {
                id,
                kind,
                pos: Vec2::new(800.0, 50.0),
            });
        }

        let scene = build_scene(&state);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene[0].kind, SpriteKind::Entity(EntityKind::Cloud));
        assert_eq!(scene[1].kind, SpriteKind::Entity(EntityKind::Bird));
        assert_eq!(scene[2].kind, SpriteKind::Airplane);
        assert_eq!((scene[2].x, scene[2].y), (512.0, 300.0));
        assert_eq!(scene[1].key(), format!("bird-{}", scene[1].id));
    }

    #[test]
    fn test_scene_empty_after_game_over() {
        let mut state = GameState::new(1);
        state.start();
        state.end_game(GameOverCause::FuelExhausted);
        assert!(build_scene(&state).is_empty());
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1);
        state.elapsed_seconds = 12;
        state.fuel = 7;
        state.stars_collected = 3;
        assert_eq!(hud_text(&state), "Time: 12s | Fuel: 7 | Stars: 3");
    }

    #[test]
    fn test_submit_label_while_in_flight() {
        let mut session = Session::new(1, Tuning::default());
        session.state.start();
        session.state.end_game(GameOverCause::FuelExhausted);
        assert_eq!(submit_label(&session), "Submit");
        session.begin_submission("Ada").unwrap();
        assert_eq!(submit_label(&session), "Submitting...");
    }
}
