//! Croc Site core crate.
//!
//! Everything behind the crocodile education page: the page router, the sound
//! explorer, zoomable images, the hamburger menu and the "catch the fish" hunt.
//! Game and controller logic is plain Rust and tested on the host; the browser
//! bindings are thin layers started from `start_site()`.

use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
pub mod error;
pub mod hunt;
mod logging;
pub mod site;

pub use config::{HuntConfig, SiteConfig};
pub use error::SiteError;
pub use hunt::{HuntEngine, HuntEvent, Outcome, Phase, Rating};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(SiteConfig::default().log_level);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    mount(SiteConfig::default())
}

/// Start with a JSON override of [`SiteConfig`]; absent fields keep defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_site_with_config(json: &str) -> Result<(), JsValue> {
    mount(SiteConfig::from_json(json)?)
}

/// Navigate to the page with element id `id` (e.g. `"game-page"`).
#[wasm_bindgen]
pub fn show_page(id: &str) -> Result<(), JsValue> {
    site::show_page(id)?;
    Ok(())
}

fn mount(cfg: SiteConfig) -> Result<(), JsValue> {
    cfg.validate()?;
    logging::init(cfg.log_level);
    let doc = dom::document()?;
    site::mount(&doc, &cfg)?;
    hunt::view::mount(&doc, cfg.hunt)?;
    log::info!("croc site ready");
    Ok(())
}
