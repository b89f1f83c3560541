use wasm_bindgen::prelude::*;

pub mod belt;
pub mod bodies;
pub mod camera_controller;
pub mod config;
pub mod error;
pub mod features;
pub mod game;
pub mod hierarchy;
pub mod intent;
pub mod orbit;
pub mod selection;

use game::Orrery;

orrery_web::export_game!(Orrery, "solar-system");

/// Info panel JSON for the selected body, or `undefined`.
#[wasm_bindgen]
pub fn get_selected_info() -> Option<String> {
    with_runner(|r| r.game().selected_info_json()).flatten()
}

/// Flat body list with parent indices, names and rings.
#[wasm_bindgen]
pub fn get_catalog_json() -> Option<String> {
    with_runner(|r| {
        r.game()
            .catalog_json()
            .map_err(|e| log::error!("catalog json: {e}"))
            .ok()
    })
    .flatten()
}

/// Texture manifest the host should load and report back via `game_texture_loaded`.
#[wasm_bindgen]
pub fn get_texture_manifest() -> Option<String> {
    with_runner(|r| {
        r.ctx()
            .manifest
            .to_json()
            .map_err(|e| log::error!("texture manifest json: {e}"))
            .ok()
    })
    .flatten()
}

fn not_initialized() -> JsValue {
    JsValue::from_str("solar-system: game_init() has not run")
}

/// Replace the body table. Rejected tables leave the current one active.
#[wasm_bindgen]
pub fn game_apply_body_table(json: &str) -> Result<(), JsValue> {
    with_runner(|r| {
        let (game, ctx) = r.parts_mut();
        game.apply_body_table(json, ctx)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
    .unwrap_or_else(|| Err(not_initialized()))
}

/// Replace the exhibit tuning. Rejected configs leave the current one active.
#[wasm_bindgen]
pub fn game_apply_config(json: &str) -> Result<(), JsValue> {
    with_runner(|r| {
        let (game, ctx) = r.parts_mut();
        game.apply_config(json, ctx)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
    .unwrap_or_else(|| Err(not_initialized()))
}
