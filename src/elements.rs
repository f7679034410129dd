//! Custom Element Registration
//!
//! Defines `ins-header` and `ins-sidenav`. A small JS shim provides the
//! `HTMLElement` subclass; its `connectedCallback` hands the element back to
//! Rust, which mounts the Leptos view into it.

use std::cell::OnceCell;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::components::{Header, Sidenav};
use crate::config::{self, ConfigError};
use crate::context::AppContext;

pub const HEADER_TAG: &str = "ins-header";
pub const SIDENAV_TAG: &str = "ins-sidenav";

#[wasm_bindgen(inline_js = r#"
export function define_widget(tag, mount) {
    customElements.define(tag, class extends HTMLElement {
        connectedCallback() {
            if (this.__insMounted) {
                return;
            }
            this.__insMounted = true;
            mount(this);
        }
    });
}
"#)]
extern "C" {
    fn define_widget(tag: &str, mount: &Closure<dyn FnMut(web_sys::HtmlElement)>);
}

thread_local! {
    static APP_CONTEXT: OnceCell<AppContext> = const { OnceCell::new() };
}

/// The process-wide context, once [`register_all`] has run
pub fn app_context() -> Option<AppContext> {
    APP_CONTEXT.with(|cell| cell.get().copied())
}

fn is_defined(tag: &str) -> bool {
    web_sys::window()
        .map(|w| w.custom_elements().get(tag))
        .is_some_and(|existing| !existing.is_undefined())
}

/// Define `tag` unless something already did; returns whether it was defined now
fn register<F>(tag: &'static str, mount: F) -> bool
where
    F: FnMut(web_sys::HtmlElement) + 'static,
{
    if is_defined(tag) {
        tracing::info!(tag, "custom element already defined, skipping");
        return false;
    }
    let mount = Closure::<dyn FnMut(web_sys::HtmlElement)>::new(mount);
    define_widget(tag, &mount);
    mount.forget();
    tracing::info!(tag, "custom element defined");
    true
}

/// Build the app context and define both widgets.
///
/// A widget whose config fails to load is skipped; the other still registers.
pub fn register_all() -> Result<(), ConfigError> {
    let settings = config::load_app_settings()?;
    let ctx = APP_CONTEXT.with(|cell| *cell.get_or_init(|| AppContext::new(settings)));

    match config::load_header_config() {
        Ok(header) => {
            register(HEADER_TAG, move |element| {
                let config = header.clone();
                leptos::mount::mount_to(element, move || view! { <Header ctx=ctx config=config /> }).forget();
            });
        }
        Err(e) => tracing::error!(tag = HEADER_TAG, error = %e, "header config invalid, not registering"),
    }

    match config::load_sidenav_config() {
        Ok(sidenav) => {
            register(SIDENAV_TAG, move |element| {
                let config = sidenav.clone();
                leptos::mount::mount_to(element, move || view! { <Sidenav ctx=ctx config=config /> }).forget();
            });
        }
        Err(e) => tracing::error!(tag = SIDENAV_TAG, error = %e, "sidenav config invalid, not registering"),
    }

    Ok(())
}
