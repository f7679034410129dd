//! Application Context
//!
//! The route observer, navigator and user store, constructed once and handed
//! to every widget.

use leptos::prelude::*;
use leptos_route_observer::{NavBus, Navigator, RouteObserver};

use crate::config::AppSettings;
use crate::store::UserDataStore;

/// Shared services for both widgets
#[derive(Clone, Copy)]
pub struct AppContext {
    routes: RouteObserver,
    navigator: Navigator,
    user: UserDataStore,
    settings: StoredValue<AppSettings>,
}

impl AppContext {
    /// Context bound to the browser location
    pub fn new(settings: AppSettings) -> Self {
        let bus = NavBus::new();
        let routes = RouteObserver::new(settings.route_mode, bus);
        Self::with_observer(settings, routes, bus)
    }

    /// Context around an existing observer and bus
    pub fn with_observer(settings: AppSettings, routes: RouteObserver, bus: NavBus) -> Self {
        tracing::info!(mode = ?settings.route_mode, "app context created");
        Self {
            routes,
            navigator: Navigator::new(settings.route_mode, bus),
            user: UserDataStore::new(settings.initial_user.clone()),
            settings: StoredValue::new(settings),
        }
    }

    pub fn routes(&self) -> RouteObserver {
        self.routes
    }

    pub fn navigator(&self) -> Navigator {
        self.navigator
    }

    pub fn user(&self) -> UserDataStore {
        self.user
    }

    pub fn login_route(&self) -> String {
        self.settings.with_value(|s| s.login_route.clone())
    }

    pub fn user_role(&self) -> Option<String> {
        self.settings.with_value(|s| s.user_role.clone())
    }

    pub fn row_height(&self) -> f32 {
        self.settings.with_value(|s| s.indicator_row_height_rem)
    }
}
