//! INS Widgets
//!
//! Header bar and collapsible side navigation, rendered from declarative JSON
//! item trees and exposed as the `ins-header` / `ins-sidenav` custom elements.

pub mod actions;
pub mod components;
pub mod config;
pub mod context;
pub mod elements;
pub mod logging;
pub mod models;
pub mod patcher;
pub mod store;
pub mod tree;

use wasm_bindgen::prelude::*;

use crate::store::UserDataPatch;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();

    if let Err(e) = elements::register_all() {
        tracing::error!(error = %e, "widgets not registered");
    }
}

/// Merge a partial `{ userName?, userAvatar? }` object into the current user
#[wasm_bindgen(js_name = setUserData)]
pub fn set_user_data(partial: JsValue) -> Result<(), JsValue> {
    let patch: UserDataPatch = serde_wasm_bindgen::from_value(partial)?;
    let ctx = elements::app_context().ok_or_else(|| JsValue::from_str("widgets not initialized"))?;
    ctx.user().update(patch);
    Ok(())
}
