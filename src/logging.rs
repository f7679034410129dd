//! Logging
//!
//! Routes `tracing` events to the browser console.

use tracing::Level;

/// Install the console subscriber; call once at module start
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(max_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}

/// Debug builds log everything down to `DEBUG`
pub fn max_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
