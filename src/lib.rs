// ==================== Imports ====================
use anyhow::Result;
use wasm_bindgen::prelude::*;

#[macro_use]
pub mod browser;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod game;
pub mod render;
pub mod sprite;
pub mod world;

use engine::{GameLoop, Point, Renderer};
use game::Explorer;

const ERROR_COLOR: &str = "#ff4d4f";
const ERROR_FONT: &str = "16px sans-serif";

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - loads the chunk and sprite sheet
/// - starts the explorer loop
/// - on failure, writes the error on the canvas instead of the world
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    // better panic messages in the console
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Explorer::new(), controls::is_mapped).await {
            error!("Explorer failed to start : {:?}", err);
            if let Err(draw_err) = show_error(&err) {
                error!("Could not display error : {:#}", draw_err);
            }
        }
    });

    Ok(())
}

fn show_error(err: &anyhow::Error) -> Result<()> {
    let renderer = Renderer::new(browser::context()?);
    renderer.draw_text(
        &format!("Failed to load: {:#}", err),
        &Point { x: 16.0, y: 32.0 },
        ERROR_COLOR,
        ERROR_FONT,
    );
    Ok(())
}
