//! Leptos Route Observer
//!
//! Tracks the browser's current route as a signal.
//! Supports hash-based and path-based routing. Programmatic navigation goes
//! through [`Navigator`], which publishes on a [`NavBus`] so observers never
//! depend on patched history methods.

use std::sync::Arc;

use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

// ========================
// Normalization
// ========================

/// Normalize a route: drop leading `#` / `/` and trailing `/`.
///
/// `#/dashboard`, `#dashboard`, `/dashboard/` and `dashboard` all map to `dashboard`.
pub fn normalize(url: &str) -> String {
    url.trim_start_matches(|c| c == '#' || c == '/')
        .trim_end_matches('/')
        .to_string()
}

/// True iff `current` equals `candidate` or lies below it as a `/`-delimited sub-path.
pub fn is_active(current: &str, candidate: &str) -> bool {
    let current = normalize(current);
    let candidate = normalize(candidate);
    if current == candidate {
        return true;
    }
    current
        .strip_prefix(candidate.as_str())
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Anything that can answer "is this route active?"
pub trait ActiveRoute {
    fn is_active_route(&self, candidate: &str) -> bool;
}

/// Owned, already-normalized route value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSnapshot(String);

impl RouteSnapshot {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ActiveRoute for RouteSnapshot {
    fn is_active_route(&self, candidate: &str) -> bool {
        is_active(&self.0, candidate)
    }
}

// ========================
// Route mode
// ========================

/// Which part of the location carries the route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// `location.hash`, updated via `hashchange`
    #[default]
    Hash,
    /// `location.pathname`, updated via `popstate` and pushState/replaceState
    Path,
}

/// Read the raw route from the browser location
pub fn read_location(mode: RouteMode) -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return String::new();
    };
    let raw = match mode {
        RouteMode::Hash => location.hash(),
        RouteMode::Path => location.pathname(),
    };
    raw.unwrap_or_default()
}

// ========================
// Navigation bus
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Push,
    Replace,
    HashChange,
    PopState,
}

/// One navigation, programmatic or user-driven
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    pub kind: NavKind,
    pub route: String,
}

type Subscriber = Arc<dyn Fn(&NavEvent) + Send + Sync>;

/// Explicit navigation event bus.
///
/// All navigation call sites publish here; subscribers run synchronously.
#[derive(Clone, Copy)]
pub struct NavBus {
    subscribers: StoredValue<Vec<Subscriber>>,
}

impl NavBus {
    pub fn new() -> Self {
        Self {
            subscribers: StoredValue::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn(&NavEvent) + Send + Sync + 'static,
    {
        self.subscribers.update_value(|subs| subs.push(Arc::new(f)));
    }

    pub fn publish(&self, event: NavEvent) {
        // Snapshot so a subscriber may subscribe/publish re-entrantly
        let subs = self.subscribers.with_value(|subs| subs.clone());
        tracing::debug!(kind = ?event.kind, route = %event.route, subscribers = subs.len(), "nav event");
        for sub in subs {
            sub(&event);
        }
    }
}

impl Default for NavBus {
    fn default() -> Self {
        Self::new()
    }
}

// ========================
// Navigator
// ========================

/// Performs navigation and announces it on the bus
#[derive(Clone, Copy)]
pub struct Navigator {
    mode: RouteMode,
    bus: NavBus,
}

impl Navigator {
    pub fn new(mode: RouteMode, bus: NavBus) -> Self {
        Self { mode, bus }
    }

    pub fn mode(&self) -> RouteMode {
        self.mode
    }

    /// Navigate to `route`, adding a history entry
    pub fn navigate(&self, route: &str) {
        tracing::info!(route, mode = ?self.mode, "navigating");
        let result = match self.mode {
            RouteMode::Hash => set_hash(route),
            RouteMode::Path => push_state(route),
        };
        if let Err(e) = result {
            tracing::warn!(route, error = ?e, "navigation failed");
            return;
        }
        self.bus.publish(NavEvent {
            kind: NavKind::Push,
            route: route.to_string(),
        });
    }

    /// Navigate to `route`, replacing the current history entry
    pub fn replace(&self, route: &str) {
        let target = match self.mode {
            RouteMode::Hash => format!("#{}", route.trim_start_matches('#')),
            RouteMode::Path => route.to_string(),
        };
        if let Err(e) = replace_state(&target) {
            tracing::warn!(route, error = ?e, "history replace failed");
            return;
        }
        self.bus.publish(NavEvent {
            kind: NavKind::Replace,
            route: route.to_string(),
        });
    }
}

fn set_hash(route: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().set_hash(route)
}

fn push_state(route: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.history()?.push_state_with_url(&JsValue::NULL, "", Some(route))
}

fn replace_state(url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.history()?.replace_state_with_url(&JsValue::NULL, "", Some(url))
}

// ========================
// Route observer
// ========================

/// Reactive, always-normalized current route
#[derive(Clone, Copy)]
pub struct RouteObserver {
    mode: RouteMode,
    current: RwSignal<String>,
}

impl RouteObserver {
    /// Observer bound to the browser location and the given bus.
    ///
    /// Listeners live for the rest of the process; there is no teardown.
    pub fn new(mode: RouteMode, bus: NavBus) -> Self {
        let observer = Self::detached(mode, &read_location(mode));

        observer.attach(bus, move |_event| read_location(mode));
        bind_window_listener("hashchange", bus, NavKind::HashChange, mode);
        bind_window_listener("popstate", bus, NavKind::PopState, mode);

        observer
    }

    /// Observer not attached to any browser signal
    pub fn detached(mode: RouteMode, initial: &str) -> Self {
        Self {
            mode,
            current: RwSignal::new(normalize(initial)),
        }
    }

    /// Re-derive the route after every event on `bus`, using `read` to fetch the raw value
    pub fn attach<F>(&self, bus: NavBus, read: F)
    where
        F: Fn(&NavEvent) -> String + Send + Sync + 'static,
    {
        let observer = *self;
        bus.subscribe(move |event| observer.set_route(&read(event)));
    }

    pub fn mode(&self) -> RouteMode {
        self.mode
    }

    /// Current route (tracked)
    pub fn current_route(&self) -> String {
        self.current.get()
    }

    /// Current route as an owned snapshot (tracked)
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot(self.current.get())
    }

    /// Store a new raw route; no-op when the normalized value is unchanged
    pub fn set_route(&self, raw: &str) {
        let next = normalize(raw);
        if self.current.get_untracked() != next {
            tracing::debug!(route = %next, "route changed");
            self.current.set(next);
        }
    }
}

impl ActiveRoute for RouteObserver {
    fn is_active_route(&self, candidate: &str) -> bool {
        self.current.with(|current| is_active(current, candidate))
    }
}

/// Forward a native window event onto the bus
fn bind_window_listener(event: &'static str, bus: NavBus, kind: NavKind, mode: RouteMode) {
    let on_event = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        bus.publish(NavEvent {
            kind,
            route: read_location(mode),
        });
    });

    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback(event, on_event.as_ref().unchecked_ref());
    }
    on_event.forget();
}
