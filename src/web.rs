//! Browser bindings
//!
//! A JS presentation layer drives a `WebGame` from `requestAnimationFrame`,
//! feeds it input axes and renders from the snapshot. Collaborator
//! requests (effects, camera shake, indicator) come back as a JSON array.

use wasm_bindgen::prelude::*;

use crate::platform;
use crate::session::Session;
use crate::sim::TickInput;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    platform::init_logging();
    log::info!("Asteroid Run starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    input: TickInput,
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game at the menu. `tuning_json` may be partial.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json_str(&json).map_err(js_err)?,
            None => Tuning::default(),
        };
        Ok(Self {
            session: Session::new(tuning, platform::default_store()),
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.input = TickInput::default();
        self.session.start(platform::clock_seed());
    }

    pub fn restart(&mut self) {
        self.input = TickInput::default();
        self.session.restart(platform::clock_seed());
    }

    pub fn return_to_menu(&mut self) {
        self.session.return_to_menu();
    }

    pub fn set_axes(&mut self, lateral: f32, vertical: f32) {
        self.input.lateral = lateral;
        self.input.vertical = vertical;
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
        log::info!("Idle mode: {idle}");
    }

    /// Advance one frame (`dt` in seconds); returns the raised events as JSON
    pub fn update(&mut self, dt: f32) -> Result<String, JsValue> {
        let events = self.session.update(dt, &self.input);
        self.input.pause = false;
        serde_json::to_string(&events).map_err(js_err)
    }

    pub fn snapshot_json(&self) -> Result<Option<String>, JsValue> {
        self.session
            .snapshot()
            .map(|s| s.to_json())
            .transpose()
            .map_err(js_err)
    }

    pub fn integrity_text(&self) -> String {
        self.session.hud.integrity_text()
    }

    pub fn distance_text(&self) -> String {
        self.session.hud.distance_text()
    }

    /// Panel tint as `[r, g, b, a]`
    pub fn panel_colour(&self) -> Vec<f32> {
        self.session.hud.panel_colour().to_array().to_vec()
    }

    pub fn text_colour(&self) -> Vec<f32> {
        self.session.hud.text_colour().to_array().to_vec()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn results_distance_text(&self) -> String {
        self.session.results.distance_text()
    }

    pub fn results_best_text(&self) -> String {
        self.session.results.best_text()
    }

    pub fn best_distance(&self) -> u32 {
        self.session.best().best_distance
    }
}
