//! Sidenav Component
//!
//! Collapsible side navigation with generated menu entries, a sliding
//! active-route indicator and tooltips while collapsed.

use gloo_timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::actions::{resolve, SidenavAction, SIDENAV_ACTIONS};
use crate::components::RenderItems;
use crate::context::AppContext;
use crate::models::{
    DynamicClasses, DynamicState, ItemClickEvent, ItemPointerEvent, ItemStyles, MenuItemsConfig,
    PointerPhase, SidenavConfig,
};
use crate::patcher::{indicator_position, sidenav_dynamic_data, ConfigPatcher, INDICATOR_OFFSCREEN};
use crate::tree::visible_menu;

/// Logo fade before the collapse flips
pub const TOGGLE_DELAY_MS: u32 = 150;

/// Grace period before a tooltip hides on pointer-leave
pub const TOOLTIP_HIDE_DELAY_MS: u32 = 100;

const LOGO_ID: &str = "logo-image";
const INDICATOR_ID: &str = "sidenav-active-indicator";

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Pixels from the top of the sidenav container
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidenavState {
    pub collapsed: bool,
    pub logo_opacity: f64,
    pub tooltip: Option<Tooltip>,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SidenavEffect {
    #[default]
    None,
    /// Call [`SidenavState::finish_toggle`] after the delay
    FinishToggleAfter(u32),
    Navigate(String),
}

impl SidenavState {
    pub fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            logo_opacity: 1.0,
            tooltip: None,
        }
    }

    /// Apply a click; unknown actions and unroutable items leave the state untouched
    pub fn dispatch(&mut self, event: &ItemClickEvent, patcher: &ConfigPatcher) -> SidenavEffect {
        match resolve(SIDENAV_ACTIONS, &event.action) {
            Some(SidenavAction::ToggleMenu) => {
                tracing::info!(collapsed = self.collapsed, "toggling sidenav");
                self.begin_toggle();
                SidenavEffect::FinishToggleAfter(TOGGLE_DELAY_MS)
            }
            Some(SidenavAction::MenuItemClick) => {
                if event.item_id.is_empty() {
                    return SidenavEffect::None;
                }
                tracing::info!(item_id = %event.item_id, "menu item clicked");
                match patcher.route_for_item(&event.item_id) {
                    Some(route) => SidenavEffect::Navigate(route.to_string()),
                    None => {
                        tracing::warn!(item_id = %event.item_id, "failed to navigate for item");
                        SidenavEffect::None
                    }
                }
            }
            None => SidenavEffect::None,
        }
    }

    /// First phase: fade the logo out
    pub fn begin_toggle(&mut self) {
        self.logo_opacity = 0.0;
    }

    /// Second phase: flip collapse and fade the logo back in
    pub fn finish_toggle(&mut self) {
        self.collapsed = !self.collapsed;
        self.logo_opacity = 1.0;
        if !self.collapsed {
            self.tooltip = None;
        }
    }

    /// Tooltips only appear while collapsed
    pub fn show_tooltip(&mut self, text: String, offset: f64) -> bool {
        if !self.collapsed {
            return false;
        }
        self.tooltip = Some(Tooltip { text, offset });
        true
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    /// Document click outside the widget; re-collapses when expanded
    pub fn outside_click(&mut self) -> bool {
        if self.collapsed {
            return false;
        }
        self.collapsed = true;
        self.tooltip = None;
        true
    }

    pub fn dynamic_state(&self) -> DynamicState {
        DynamicState::from([("collapsed".to_string(), self.collapsed)])
    }
}

/// Menu label shown in the tooltip for a generated menu button
pub fn tooltip_label(patcher: &ConfigPatcher, menu: &MenuItemsConfig, item_id: &str) -> Option<String> {
    let bind_key = patcher.lookup().id_to_bind_key.get(item_id)?;
    menu.get(bind_key).map(|entry| entry.label.clone())
}

/// Inline styles for the logo fade and the indicator position
pub fn sidenav_item_styles(logo_opacity: f64, indicator: f32) -> ItemStyles {
    let decl = |p: &str, v: String| (p.to_string(), v);
    let mut styles = ItemStyles::new();
    styles.insert(LOGO_ID.to_string(), vec![decl("opacity", logo_opacity.to_string())]);

    let indicator_style = if indicator >= 0.0 {
        vec![
            decl("top", format!("{}rem", indicator)),
            decl("opacity", "1".into()),
            decl("visibility", "visible".into()),
        ]
    } else {
        vec![
            decl("top", INDICATOR_OFFSCREEN.into()),
            decl("opacity", "0".into()),
            decl("visibility", "hidden".into()),
        ]
    };
    styles.insert(INDICATOR_ID.to_string(), indicator_style);
    styles
}

pub fn container_class(base: &[String], collapsed: bool) -> String {
    let mut classes = base.to_vec();
    if collapsed {
        classes.push("collapsed".to_string());
    }
    classes.join(" ")
}

/// Sidenav widget
#[component]
pub fn Sidenav(ctx: AppContext, config: SidenavConfig) -> impl IntoView {
    let template = config.menu_item_template.clone().unwrap_or_default();
    let visible = visible_menu(&config.menu_items_config, ctx.user_role().as_deref());
    let patcher = StoredValue::new(ConfigPatcher::with_menu(&config.items, &visible, &template));
    let menu = StoredValue::new(visible);
    let row_height = ctx.row_height();

    let state = RwSignal::new(SidenavState::new(config.start_collapsed));
    let collapsed = Memo::new(move |_| state.with(|s| s.collapsed));
    let logo_opacity = Memo::new(move |_| state.with(|s| s.logo_opacity));
    let tooltip = Memo::new(move |_| state.with(|s| s.tooltip.clone()));

    let data = Memo::new(move |_| {
        let route = ctx.routes().snapshot();
        menu.with_value(|m| sidenav_dynamic_data(m, collapsed.get(), &route, row_height))
    });
    let items = Memo::new(move |_| {
        let route = ctx.routes().snapshot();
        tracing::debug!(route = route.as_str(), "patching sidenav");
        data.with(|d| patcher.with_value(|p| p.patch(d, &route)))
    });
    let position = Memo::new(move |_| {
        let route = ctx.routes().snapshot();
        menu.with_value(|m| indicator_position(m, &route, row_height))
    });

    let item_styles = Signal::derive(move || sidenav_item_styles(logo_opacity.get(), position.get()));
    let dynamic_state = Signal::derive(move || state.with(|s| s.dynamic_state()));
    let dynamic_classes = Signal::derive(DynamicClasses::new);

    let container_ref = NodeRef::<html::Aside>::new();

    let on_item_click = Callback::new(move |event: ItemClickEvent| {
        let mut next = state.get_untracked();
        let effect = patcher.with_value(|p| next.dispatch(&event, p));
        if next != state.get_untracked() {
            state.set(next);
        }
        match effect {
            SidenavEffect::None => {}
            SidenavEffect::FinishToggleAfter(delay) => {
                Timeout::new(delay, move || state.update(|s| s.finish_toggle())).forget();
            }
            SidenavEffect::Navigate(route) => ctx.navigator().navigate(&route),
        }
    });

    let on_item_pointer = Callback::new(move |event: ItemPointerEvent| match event.phase {
        PointerPhase::Enter => {
            if !state.with_untracked(|s| s.collapsed) {
                return;
            }
            let label = patcher.with_value(|p| menu.with_value(|m| tooltip_label(p, m, &event.item_id)));
            let Some(label) = label else {
                return;
            };
            let top = container_ref
                .get_untracked()
                .map(|el| el.get_bounding_client_rect().top())
                .unwrap_or(0.0);
            state.update(|s| {
                s.show_tooltip(label, event.center_y - top);
            });
        }
        PointerPhase::Leave => {
            Timeout::new(TOOLTIP_HIDE_DELAY_MS, move || state.update(|s| s.hide_tooltip())).forget();
        }
    });

    if config.collapse_on_outside_click {
        bind_outside_click(container_ref, state);
    }

    let base_classes = config.container_classes.clone();

    view! {
        <aside
            node_ref=container_ref
            class=move || container_class(&base_classes, collapsed.get())
            on:pointerleave=move |_| {
                if state.with_untracked(|s| s.tooltip.is_some()) {
                    state.update(|s| s.hide_tooltip());
                }
            }
        >
            <RenderItems
                items=items
                dynamic_state=dynamic_state
                item_styles=item_styles
                dynamic_classes=dynamic_classes
                on_item_click=on_item_click
                on_item_pointer=on_item_pointer
            />
            {move || {
                tooltip
                    .get()
                    .map(|t| {
                        view! {
                            <div class="sidenav-tooltip" style=format!("top: {}px", t.offset)>
                                {t.text}
                            </div>
                        }
                    })
            }}
        </aside>
    }
}

/// Collapse when the document is clicked outside the expanded sidenav
fn bind_outside_click(container_ref: NodeRef<html::Aside>, state: RwSignal<SidenavState>) {
    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if container.contains(target.as_ref()) {
            return;
        }
        if !state.with_untracked(|s| s.collapsed) {
            tracing::debug!("outside click, collapsing sidenav");
            state.update(|s| {
                s.outside_click();
            });
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
    }
    on_click.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_sidenav_config;

    fn make_patcher() -> (ConfigPatcher, MenuItemsConfig) {
        let config = load_sidenav_config().unwrap();
        let template = config.menu_item_template.clone().unwrap();
        let patcher = ConfigPatcher::with_menu(&config.items, &config.menu_items_config, &template);
        (patcher, config.menu_items_config)
    }

    fn click(action: &str, item_id: &str) -> ItemClickEvent {
        ItemClickEvent {
            action: action.into(),
            item_id: item_id.into(),
        }
    }

    #[test]
    fn test_toggle_is_staged() {
        let (patcher, _) = make_patcher();
        let mut state = SidenavState::new(false);

        let effect = state.dispatch(&click("onToggleMenu", "toggle-button"), &patcher);
        assert_eq!(effect, SidenavEffect::FinishToggleAfter(TOGGLE_DELAY_MS));
        // Fade happens first; collapse waits for the timer
        assert_eq!(state.logo_opacity, 0.0);
        assert!(!state.collapsed);

        state.finish_toggle();
        assert!(state.collapsed);
        assert_eq!(state.logo_opacity, 1.0);
    }

    #[test]
    fn test_menu_item_click_navigates() {
        let (patcher, _) = make_patcher();
        let mut state = SidenavState::new(false);
        let effect = state.dispatch(&click("onMenuItemClick", "reports-item"), &patcher);
        assert_eq!(effect, SidenavEffect::Navigate("/reports".into()));
        assert_eq!(state, SidenavState::new(false));
    }

    #[test]
    fn test_unroutable_item_is_skipped() {
        let (patcher, _) = make_patcher();
        let mut state = SidenavState::new(false);
        assert_eq!(state.dispatch(&click("onMenuItemClick", "logo-image"), &patcher), SidenavEffect::None);
        assert_eq!(state.dispatch(&click("onMenuItemClick", ""), &patcher), SidenavEffect::None);
    }

    #[test]
    fn test_unknown_action_does_not_mutate() {
        let (patcher, _) = make_patcher();
        let mut state = SidenavState::new(true);
        state.show_tooltip("Reports".into(), 40.0);
        let before = state.clone();

        let effect = state.dispatch(&click("onLogout", "toggle-button"), &patcher);
        assert_eq!(effect, SidenavEffect::None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_tooltip_only_when_collapsed() {
        let mut state = SidenavState::new(false);
        assert!(!state.show_tooltip("Reports".into(), 10.0));
        assert!(state.tooltip.is_none());

        let mut state = SidenavState::new(true);
        assert!(state.show_tooltip("Reports".into(), 10.0));
        assert_eq!(
            state.tooltip,
            Some(Tooltip {
                text: "Reports".into(),
                offset: 10.0
            })
        );
        state.hide_tooltip();
        assert!(state.tooltip.is_none());
    }

    #[test]
    fn test_expanding_clears_tooltip() {
        let mut state = SidenavState::new(true);
        state.show_tooltip("Reports".into(), 10.0);
        state.begin_toggle();
        state.finish_toggle();
        assert!(!state.collapsed);
        assert!(state.tooltip.is_none());
    }

    #[test]
    fn test_outside_click_collapses_when_expanded() {
        let mut state = SidenavState::new(false);
        assert!(state.outside_click());
        assert!(state.collapsed);
        assert!(!state.outside_click());
    }

    #[test]
    fn test_tooltip_label_lookup() {
        let (patcher, menu) = make_patcher();
        assert_eq!(tooltip_label(&patcher, &menu, "total-count-item").as_deref(), Some("Total Count"));
        assert_eq!(tooltip_label(&patcher, &menu, "toggle-button"), None);
    }

    #[test]
    fn test_item_styles() {
        let styles = sidenav_item_styles(0.0, 7.0);
        assert_eq!(styles[LOGO_ID], vec![("opacity".to_string(), "0".to_string())]);
        assert_eq!(styles[INDICATOR_ID][0], ("top".to_string(), "7rem".to_string()));
        assert_eq!(styles[INDICATOR_ID][2], ("visibility".to_string(), "visible".to_string()));

        let hidden = sidenav_item_styles(1.0, -1.0);
        assert_eq!(hidden[INDICATOR_ID][0], ("top".to_string(), "-100px".to_string()));
        assert_eq!(hidden[INDICATOR_ID][1], ("opacity".to_string(), "0".to_string()));
    }

    #[test]
    fn test_container_class() {
        let base = vec!["ins-sidenav".to_string()];
        assert_eq!(container_class(&base, false), "ins-sidenav");
        assert_eq!(container_class(&base, true), "ins-sidenav collapsed");
    }
}
