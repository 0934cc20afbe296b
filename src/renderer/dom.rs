//! DOM backend
//!
//! Sprites become absolutely positioned `<div>`s inside the game area; nodes
//! are keyed by sprite so they are reused frame to frame. The leaderboard and
//! HUD are plain element updates.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use super::{Sprite, build_scene, hud_text, submit_label};
use crate::ranking::Leaderboard;
use crate::session::Session;

/// Element ids the page must provide
pub mod ids {
    pub const GAME_AREA: &str = "game-area";
    pub const HUD: &str = "hud";
    pub const PRIMARY_BTN: &str = "primary-btn";
    pub const GAME_OVER_MESSAGE: &str = "game-over-message";
    pub const SCORE_FORM: &str = "score-form";
    pub const USERNAME: &str = "username";
    pub const SUBMIT_BTN: &str = "submit-btn";
    pub const RANKING: &str = "ranking";
    pub const RANKING_BODY: &str = "ranking-body";
    pub const PREV_BTN: &str = "prev-btn";
    pub const NEXT_BTN: &str = "next-btn";
}

pub struct DomRenderer {
    document: Document,
    game_area: Element,
    nodes: HashMap<String, HtmlElement>,
    /// (page, entry count) last drawn, to skip rebuilding the table
    drawn_ranking: Option<(usize, usize)>,
}

impl DomRenderer {
    /// None if the page lacks the game area
    pub fn new(document: Document) -> Option<Self> {
        let game_area = document.get_element_by_id(ids::GAME_AREA)?;
        Some(Self {
            document,
            game_area,
            nodes: HashMap::new(),
            drawn_ranking: None,
        })
    }

    /// Redraw everything from the session
    pub fn render(&mut self, session: &Session) {
        self.render_sprites(&build_scene(&session.state));
        self.render_controls(session);
        self.render_ranking(session.leaderboard.as_ref());
    }

    fn render_sprites(&mut self, sprites: &[Sprite]) {
        let mut live = HashMap::with_capacity(sprites.len());
        for sprite in sprites {
            let key = sprite.key();
            let node = match self.nodes.remove(&key) {
                Some(node) => node,
                None => match self.create_sprite_node(sprite) {
                    Some(node) => node,
                    None => continue,
                },
            };
            let style = node.style();
            let _ = style.set_property("left", &format!("{}px", sprite.x));
            let _ = style.set_property("top", &format!("{}px", sprite.y));
            live.insert(key, node);
        }

        // Whatever is left was consumed or the run ended
        for (_, node) in self.nodes.drain() {
            node.remove();
        }
        self.nodes = live;
    }

    fn create_sprite_node(&self, sprite: &Sprite) -> Option<HtmlElement> {
        let node = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        node.set_class_name(sprite.kind.class());
        node.set_text_content(Some(sprite.kind.glyph()));
        if self.game_area.append_child(&node).is_err() {
            log::warn!("Could not attach sprite {}", sprite.key());
            return None;
        }
        Some(node)
    }

    fn render_controls(&self, session: &Session) {
        if let Some(el) = self.document.get_element_by_id(ids::HUD) {
            el.set_text_content(Some(&hud_text(&session.state)));
        }

        if let Some(btn) = self.button(ids::PRIMARY_BTN) {
            btn.set_text_content(Some(session.primary_action().label()));
            btn.set_disabled(!session.can_start());
        }

        self.set_visible(ids::GAME_OVER_MESSAGE, session.show_game_over_banner());
        self.set_visible(ids::SCORE_FORM, session.score_form_visible());
        self.set_visible(ids::RANKING, session.ranking_visible());

        if let Some(btn) = self.button(ids::SUBMIT_BTN) {
            btn.set_text_content(Some(submit_label(session)));
            btn.set_disabled(!session.can_submit());
        }
    }

    fn render_ranking(&mut self, leaderboard: Option<&Leaderboard>) {
        let Some(board) = leaderboard else {
            self.drawn_ranking = None;
            return;
        };
        let stamp = (board.page(), board.len());
        if self.drawn_ranking == Some(stamp) {
            return;
        }

        let Some(body) = self.document.get_element_by_id(ids::RANKING_BODY) else {
            log::warn!("Missing #{}", ids::RANKING_BODY);
            return;
        };
        body.set_text_content(None);
        for entry in board.current_page() {
            let Ok(row) = self.document.create_element("tr") else {
                continue;
            };
            let cells = [
                ("rank", entry.rank.to_string()),
                ("name", entry.name.clone()),
                ("stars", entry.stars.to_string()),
                ("time", entry.time.to_string()),
            ];
            for (class, text) in cells {
                if let Ok(cell) = self.document.create_element("td") {
                    cell.set_class_name(class);
                    // Names come from other players: text only, never HTML
                    cell.set_text_content(Some(&text));
                    let _ = row.append_child(&cell);
                }
            }
            let _ = body.append_child(&row);
        }

        if let Some(btn) = self.button(ids::PREV_BTN) {
            btn.set_disabled(!board.has_previous());
        }
        if let Some(btn) = self.button(ids::NEXT_BTN) {
            btn.set_disabled(!board.has_next());
        }
        self.drawn_ranking = Some(stamp);
    }

    fn button(&self, id: &str) -> Option<HtmlButtonElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlButtonElement>()
            .ok()
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}
