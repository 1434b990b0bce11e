//! Browser binding
//!
//! A JS presentation layer owns the canvas, audio and keyboard. It calls
//! `tick` once per animation frame with the frame delta and the pressed
//! direction of each human, then reads events and a state snapshot as JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Layout, Session, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Corners starting...");
}

/// Session handle for JS
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    accumulator: f32,
    input: TickInput,
}

#[wasm_bindgen]
impl WebSession {
    /// Build a session from stored settings and an optional layout JSON.
    /// Configuration faults surface as a JS exception.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: Option<String>) -> Result<WebSession, JsValue> {
        let layout = match layout_json {
            Some(json) => serde_json::from_str::<Layout>(&json)
                .map_err(|e| JsValue::from_str(&format!("bad layout: {}", e)))?,
            None => Layout::standard(),
        };
        let session = Session::new(Settings::load(), layout)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session,
            accumulator: 0.0,
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.input.start = true;
    }

    /// Set a human's movement direction (slot 0 or 1)
    pub fn set_move(&mut self, slot: usize, dx: f32, dy: f32) {
        if let Some(dir) = self.input.moves.get_mut(slot) {
            *dir = Vec2::new(dx, dy);
        }
    }

    /// Advance by one animation frame (`dt` in seconds)
    pub fn tick(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.session, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.input.start = false;
        }
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_else(|e| {
            log::error!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    /// Current actors and round data, as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.session.state()).unwrap_or_else(|e| {
            log::error!("Failed to encode state: {}", e);
            "{}".to_string()
        })
    }

    /// Settings in use, as JSON
    pub fn settings(&self) -> String {
        serde_json::to_string(self.session.settings()).unwrap_or_default()
    }

    /// Validate settings JSON and store it; the next session picks it up.
    /// A bad value is reported and nothing is stored.
    pub fn save_settings(json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        Ok(())
    }

    /// Layout in use, as JSON
    pub fn layout(&self) -> String {
        serde_json::to_string(self.session.layout()).unwrap_or_default()
    }
}
