//! Header Component
//!
//! Logo, search shortcut and a user dropdown, all driven by the header config.

use leptos::prelude::*;

use crate::actions::{resolve, HeaderAction, HEADER_ACTIONS};
use crate::components::RenderItems;
use crate::context::AppContext;
use crate::models::{DynamicClasses, DynamicState, HeaderConfig, ItemClickEvent, ItemStyles};
use crate::patcher::{header_dynamic_data, ConfigPatcher};

const DROPDOWN_CONDITION: &str = "dropdownOpen";
const USER_INFO_ID: &str = "user-info";
const LOGOUT_ID: &str = "logout";

/// Routes the header can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRoutes {
    pub login: String,
    pub search: Option<String>,
}

/// Dropdown open/closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub dropdown_open: bool,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderEffect {
    #[default]
    None,
    Navigate(String),
}

impl HeaderState {
    /// Apply a click; unknown actions leave the state untouched
    pub fn dispatch(&mut self, event: &ItemClickEvent, routes: &HeaderRoutes) -> HeaderEffect {
        match resolve(HEADER_ACTIONS, &event.action) {
            Some(action) => self.apply(action, &event.item_id, routes),
            None => HeaderEffect::None,
        }
    }

    pub fn apply(&mut self, action: HeaderAction, item_id: &str, routes: &HeaderRoutes) -> HeaderEffect {
        match action {
            HeaderAction::UserInfoClick => {
                self.dropdown_open = !self.dropdown_open;
                HeaderEffect::None
            }
            HeaderAction::MenuItemClick => {
                self.dropdown_open = false;
                if item_id == LOGOUT_ID {
                    tracing::info!("logout selected");
                    HeaderEffect::Navigate(routes.login.clone())
                } else {
                    tracing::info!(item_id, "dropdown item clicked");
                    HeaderEffect::None
                }
            }
            HeaderAction::Logout => {
                self.dropdown_open = false;
                tracing::info!("logging out");
                HeaderEffect::Navigate(routes.login.clone())
            }
            HeaderAction::SearchClick => match &routes.search {
                Some(route) => HeaderEffect::Navigate(route.clone()),
                None => {
                    tracing::warn!("search clicked but no search route configured");
                    HeaderEffect::None
                }
            },
        }
    }

    pub fn dynamic_state(&self) -> DynamicState {
        DynamicState::from([(DROPDOWN_CONDITION.to_string(), self.dropdown_open)])
    }

    pub fn dynamic_classes(&self) -> DynamicClasses {
        let mut classes = DynamicClasses::new();
        if self.dropdown_open {
            classes.insert(USER_INFO_ID.to_string(), "open".to_string());
        }
        classes
    }
}

/// Header widget
#[component]
pub fn Header(ctx: AppContext, config: HeaderConfig) -> impl IntoView {
    let patcher = StoredValue::new(ConfigPatcher::new(&config.items, &config.routes));
    let routes = HeaderRoutes {
        login: ctx.login_route(),
        search: config.routes.get("search").cloned(),
    };
    let state = RwSignal::new(HeaderState::default());

    let items = Memo::new(move |_| {
        let data = header_dynamic_data(&ctx.user().current());
        let route = ctx.routes().snapshot();
        tracing::debug!(route = route.as_str(), "patching header");
        patcher.with_value(|p| p.patch(&data, &route))
    });
    let dynamic_state = Signal::derive(move || state.get().dynamic_state());
    let dynamic_classes = Signal::derive(move || state.get().dynamic_classes());
    let item_styles = Signal::derive(ItemStyles::new);

    let on_item_click = Callback::new(move |event: ItemClickEvent| {
        let mut next = state.get_untracked();
        let effect = next.dispatch(&event, &routes);
        if next != state.get_untracked() {
            state.set(next);
        }
        if let HeaderEffect::Navigate(route) = effect {
            ctx.navigator().navigate(&route);
        }
    });

    let container_class = config.container_classes.join(" ");

    view! {
        <header class=container_class>
            <RenderItems
                items=items
                dynamic_state=dynamic_state
                item_styles=item_styles
                dynamic_classes=dynamic_classes
                on_item_click=on_item_click
            />
        </header>
    }
}
