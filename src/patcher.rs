//! Config Patcher
//!
//! Binds dynamic values into an expanded item tree. Expansion happens once in
//! [`ConfigPatcher::new`]; [`ConfigPatcher::patch`] is a pure function of the
//! current dynamic data and route and always returns a fresh tree.

use std::collections::BTreeMap;

use leptos_route_observer::ActiveRoute;

use crate::models::{DynamicData, Item, MenuItemTemplate, MenuItemsConfig};
use crate::store::UserData;
use crate::tree::{expand_menu_items, menu_routes, ordered_menu, to_camel_case, LookupMaps};

pub const ACTIVE_CLASS: &str = "active";

/// Bind-key of the container marking the active menu row
pub const MENU_INDICATOR_KEY: &str = "menuIndicator";

/// Indicator offset used when no menu route is active
pub const INDICATOR_OFFSCREEN: &str = "-100px";

/// Sentinel position when no menu route is active
pub const NO_ACTIVE_POSITION: f32 = -1.0;

pub const DEFAULT_ROW_HEIGHT_REM: f32 = 3.5;

const ACTIVE_ICON_SUFFIX: &str = "-blue";

/// Expanded tree plus lookup tables; cheap to share, immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPatcher {
    expanded: Vec<Item>,
    lookup: LookupMaps,
}

impl ConfigPatcher {
    /// Patcher for a tree without menu placeholders
    pub fn new(items: &[Item], routes: &BTreeMap<String, String>) -> Self {
        let expanded = items.to_vec();
        let lookup = LookupMaps::build(&expanded, routes);
        Self { expanded, lookup }
    }

    /// Patcher that expands `menuItem` placeholders from `template`
    pub fn with_menu(items: &[Item], menu: &MenuItemsConfig, template: &MenuItemTemplate) -> Self {
        let expanded = expand_menu_items(items, menu, template);
        let lookup = LookupMaps::build(&expanded, &menu_routes(menu));
        tracing::debug!(
            menu_entries = menu.len(),
            items = lookup.id_to_item.len(),
            "menu items expanded"
        );
        Self { expanded, lookup }
    }

    pub fn expanded(&self) -> &[Item] {
        &self.expanded
    }

    pub fn lookup(&self) -> &LookupMaps {
        &self.lookup
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.lookup.id_to_item.get(item_id)
    }

    /// Route a clicked item navigates to, if any; callers report misses
    pub fn route_for_item(&self, item_id: &str) -> Option<&str> {
        self.lookup.route_for_item(item_id)
    }

    /// Produce a patched copy of the expanded tree
    pub fn patch(&self, data: &DynamicData, route: &impl ActiveRoute) -> Vec<Item> {
        let mut items = self.expanded.clone();
        for item in &mut items {
            self.patch_item(item, data, route);
        }
        items
    }

    fn patch_item(&self, item: &mut Item, data: &DynamicData, route: &impl ActiveRoute) {
        if let Some(bind_key) = item.bind_key().map(str::to_string) {
            let value = data.get(&bind_key).filter(|v| !v.is_empty());

            let activate = match item {
                Item::Text(text) => {
                    if let Some(value) = value {
                        text.content = value.clone();
                    }
                    false
                }
                Item::Image(image) => {
                    if let Some(value) = value {
                        image.image_src = value.clone();
                    }
                    false
                }
                Item::Container(_) => {
                    bind_key == MENU_INDICATOR_KEY && value.is_some_and(|v| v != INDICATOR_OFFSCREEN)
                }
                Item::Button(_) => self
                    .lookup
                    .bind_key_to_route
                    .get(&bind_key)
                    .is_some_and(|target| route.is_active_route(target)),
                Item::Modal(_) | Item::MenuItem(_) => false,
            };
            if activate {
                item.add_class(ACTIVE_CLASS);
            }

            if value.is_none() && matches!(item, Item::Text(_) | Item::Image(_)) {
                tracing::debug!(bind_key = %bind_key, item_id = item.id(), "no dynamic value for bind-key");
            }
        }

        if let Some(children) = item.children_mut() {
            for child in children {
                self.patch_item(child, data, route);
            }
        }
    }
}

// ========================
// Dynamic data derivations
// ========================

/// `(order - 1) × row_height` of the first active menu entry, or [`NO_ACTIVE_POSITION`]
pub fn indicator_position(menu: &MenuItemsConfig, route: &impl ActiveRoute, row_height: f32) -> f32 {
    ordered_menu(menu)
        .into_iter()
        .find(|(_, config)| route.is_active_route(&config.route))
        .map(|(_, config)| (config.order.saturating_sub(1)) as f32 * row_height)
        .unwrap_or(NO_ACTIVE_POSITION)
}

/// CSS offset for an indicator position; the sentinel maps off-screen
pub fn indicator_offset(position: f32) -> String {
    if position >= 0.0 {
        format!("{}rem", position)
    } else {
        INDICATOR_OFFSCREEN.to_string()
    }
}

pub fn icon_path(icon_base: &str, active: bool) -> String {
    let suffix = if active { ACTIVE_ICON_SUFFIX } else { "" };
    format!("assets/icons/{}{}.svg", icon_base, suffix)
}

/// Values bound into the sidenav tree
pub fn sidenav_dynamic_data(
    menu: &MenuItemsConfig,
    collapsed: bool,
    route: &impl ActiveRoute,
    row_height: f32,
) -> DynamicData {
    let mut data = DynamicData::new();

    let logo = if collapsed {
        "assets/images/logo.svg"
    } else {
        "assets/images/extended-logo.svg"
    };
    let toggle = if collapsed {
        "assets/icons/caret-right.svg"
    } else {
        "assets/icons/caret-left.svg"
    };
    data.insert("logoSrc".into(), logo.into());
    data.insert("toggleIcon".into(), toggle.into());
    data.insert(
        MENU_INDICATOR_KEY.into(),
        indicator_offset(indicator_position(menu, route, row_height)),
    );

    for (bind_key, config) in menu {
        let camel = to_camel_case(bind_key);
        let active = route.is_active_route(&config.route);
        data.insert(format!("{}Icon", camel), icon_path(&config.icon_base, active));
        data.insert(format!("{}Label", camel), config.label.clone());
    }

    data
}

/// Values bound into the header tree
pub fn header_dynamic_data(user: &UserData) -> DynamicData {
    let mut data = DynamicData::new();
    data.insert("userName".into(), user.user_name.clone());
    data.insert("userAvatar".into(), user.user_avatar.clone());
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuItemConfig;
    use crate::tree::visible_menu;
    use leptos_route_observer::RouteSnapshot;

    fn make_menu() -> MenuItemsConfig {
        let entries = [
            ("reports", "/reports", "Reports", "reports", 2),
            ("dashboard", "/dashboard", "Dashboard", "dashboard", 1),
            ("total-count", "/total-count", "Total Count", "count", 3),
        ];
        entries
            .into_iter()
            .map(|(key, route, label, icon, order)| {
                (
                    key.to_string(),
                    MenuItemConfig {
                        route: route.into(),
                        label: label.into(),
                        icon_base: icon.into(),
                        order,
                        roles: None,
                    },
                )
            })
            .collect()
    }

    fn make_patcher() -> ConfigPatcher {
        let items: Vec<Item> = serde_json::from_str(
            r#"[
                {"type": "image", "id": "logo-image", "bindKey": "logoSrc", "imageSrc": ""},
                {"type": "container", "id": "menu", "children": [
                    {"type": "container", "id": "sidenav-active-indicator", "bindKey": "menuIndicator"},
                    {"type": "menuItem", "id": "menu-placeholder"}
                ]},
                {"type": "text", "id": "orphan", "bindKey": "nothingHere", "content": "static"}
            ]"#,
        )
        .unwrap();
        let template: MenuItemTemplate = serde_json::from_str(
            r#"{
                "classes": ["menu-item"],
                "clickAction": "onMenuItemClick",
                "children": [{"type": "image"}, {"type": "text"}]
            }"#,
        )
        .unwrap();
        ConfigPatcher::with_menu(&items, &make_menu(), &template)
    }

    fn find<'a>(items: &'a [Item], id: &str) -> &'a Item {
        let mut found = None;
        crate::models::walk(items, &mut |item| {
            if item.id() == id {
                found = Some(item);
            }
        });
        found.unwrap_or_else(|| panic!("item {} not found", id))
    }

    #[test]
    fn test_indicator_position_formula() {
        let menu = make_menu();
        let pos = |route: &str| indicator_position(&menu, &RouteSnapshot::new(route), DEFAULT_ROW_HEIGHT_REM);

        assert_eq!(pos("/dashboard"), 0.0);
        assert_eq!(pos("/reports/monthly"), 3.5);
        assert_eq!(pos("/total-count"), 7.0);
        assert_eq!(pos("/settings"), NO_ACTIVE_POSITION);
    }

    #[test]
    fn test_indicator_offset() {
        assert_eq!(indicator_offset(0.0), "0rem");
        assert_eq!(indicator_offset(7.0), "7rem");
        assert_eq!(indicator_offset(3.5), "3.5rem");
        assert_eq!(indicator_offset(NO_ACTIVE_POSITION), INDICATOR_OFFSCREEN);
    }

    #[test]
    fn test_icon_path() {
        assert_eq!(icon_path("dashboard", false), "assets/icons/dashboard.svg");
        assert_eq!(icon_path("dashboard", true), "assets/icons/dashboard-blue.svg");
    }

    #[test]
    fn test_sidenav_dynamic_data() {
        let menu = make_menu();
        let data = sidenav_dynamic_data(&menu, true, &RouteSnapshot::new("#/reports"), DEFAULT_ROW_HEIGHT_REM);

        assert_eq!(data["logoSrc"], "assets/images/logo.svg");
        assert_eq!(data["toggleIcon"], "assets/icons/caret-right.svg");
        assert_eq!(data["menuIndicator"], "3.5rem");
        assert_eq!(data["reportsIcon"], "assets/icons/reports-blue.svg");
        assert_eq!(data["dashboardIcon"], "assets/icons/dashboard.svg");
        assert_eq!(data["totalCountLabel"], "Total Count");

        let expanded = sidenav_dynamic_data(&menu, false, &RouteSnapshot::new("/nowhere"), DEFAULT_ROW_HEIGHT_REM);
        assert_eq!(expanded["logoSrc"], "assets/images/extended-logo.svg");
        assert_eq!(expanded["menuIndicator"], INDICATOR_OFFSCREEN);
    }

    #[test]
    fn test_patch_binds_fields_and_active_classes() {
        let patcher = make_patcher();
        let route = RouteSnapshot::new("/reports");
        let data = sidenav_dynamic_data(&make_menu(), false, &route, DEFAULT_ROW_HEIGHT_REM);
        let patched = patcher.patch(&data, &route);

        match find(&patched, "logo-image") {
            Item::Image(img) => assert_eq!(img.image_src, "assets/images/extended-logo.svg"),
            _ => panic!("logo should be an image"),
        }
        match find(&patched, "reports-label") {
            Item::Text(text) => assert_eq!(text.content, "Reports"),
            _ => panic!("label should be text"),
        }
        match find(&patched, "reports-icon") {
            Item::Image(img) => assert_eq!(img.image_src, "assets/icons/reports-blue.svg"),
            _ => panic!("icon should be an image"),
        }
        assert!(find(&patched, "reports-item").has_class(ACTIVE_CLASS));
        assert!(!find(&patched, "dashboard-item").has_class(ACTIVE_CLASS));
        assert!(find(&patched, "sidenav-active-indicator").has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_patch_unknown_bind_key_keeps_default() {
        let patcher = make_patcher();
        let route = RouteSnapshot::new("/reports");
        let patched = patcher.patch(&DynamicData::new(), &route);

        match find(&patched, "orphan") {
            Item::Text(text) => assert_eq!(text.content, "static"),
            _ => panic!("orphan should be text"),
        }
        // Indicator has no value, so it stays inactive
        assert!(!find(&patched, "sidenav-active-indicator").has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_patch_is_pure() {
        let patcher = make_patcher();
        let original = patcher.expanded().to_vec();

        let r1 = RouteSnapshot::new("/dashboard");
        let r2 = RouteSnapshot::new("/total-count");
        let first = patcher.patch(&sidenav_dynamic_data(&make_menu(), false, &r1, 3.5), &r1);
        let second = patcher.patch(&sidenav_dynamic_data(&make_menu(), true, &r2, 3.5), &r2);

        assert_eq!(patcher.expanded(), original.as_slice());
        assert_ne!(first, second);
        assert!(!find(patcher.expanded(), "dashboard-item").has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_no_active_route_hides_indicator() {
        let patcher = make_patcher();
        let route = RouteSnapshot::new("/settings");
        let data = sidenav_dynamic_data(&make_menu(), false, &route, DEFAULT_ROW_HEIGHT_REM);
        let patched = patcher.patch(&data, &route);

        assert_eq!(data[MENU_INDICATOR_KEY], INDICATOR_OFFSCREEN);
        assert!(!find(&patched, "sidenav-active-indicator").has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_hidden_entry_does_not_shift_indicator() {
        let mut menu = make_menu();
        menu.get_mut("total-count").unwrap().roles = Some(vec!["admin".into()]);
        let visible = visible_menu(&menu, Some("viewer"));

        let reports = RouteSnapshot::new("/reports");
        assert_eq!(indicator_position(&visible, &reports, DEFAULT_ROW_HEIGHT_REM), 3.5);

        // A hidden entry's route never lights the indicator
        let hidden = RouteSnapshot::new("/total-count");
        assert_eq!(indicator_position(&visible, &hidden, DEFAULT_ROW_HEIGHT_REM), NO_ACTIVE_POSITION);

        let data = sidenav_dynamic_data(&visible, false, &hidden, DEFAULT_ROW_HEIGHT_REM);
        assert_eq!(data[MENU_INDICATOR_KEY], INDICATOR_OFFSCREEN);
        assert!(!data.contains_key("totalCountLabel"));
    }

    #[test]
    fn test_route_for_item() {
        let patcher = make_patcher();
        assert_eq!(patcher.route_for_item("total-count-item"), Some("/total-count"));
        assert_eq!(patcher.route_for_item("logo-image"), None);
        assert!(patcher.item("reports-icon").is_some());
    }

    #[test]
    fn test_header_patch_with_user_data() {
        let items: Vec<Item> = serde_json::from_str(
            r#"[
                {"type": "button", "id": "search-section", "bindKey": "search", "children": []},
                {"type": "button", "id": "user-info", "children": [
                    {"type": "image", "id": "avatar", "bindKey": "userAvatar"},
                    {"type": "text", "id": "name", "bindKey": "userName"}
                ]}
            ]"#,
        )
        .unwrap();
        let mut routes = BTreeMap::new();
        routes.insert("search".to_string(), "/dashboard/search".to_string());
        let patcher = ConfigPatcher::new(&items, &routes);

        let user = UserData {
            user_name: "Ada".into(),
            user_avatar: "ada.png".into(),
        };
        let route = RouteSnapshot::new("#/dashboard/search");
        let patched = patcher.patch(&header_dynamic_data(&user), &route);

        assert!(find(&patched, "search-section").has_class(ACTIVE_CLASS));
        match find(&patched, "name") {
            Item::Text(text) => assert_eq!(text.content, "Ada"),
            _ => panic!("name should be text"),
        }
        match find(&patched, "avatar") {
            Item::Image(img) => assert_eq!(img.image_src, "ada.png"),
            _ => panic!("avatar should be an image"),
        }

        let elsewhere = patcher.patch(&header_dynamic_data(&user), &RouteSnapshot::new("#/dashboard"));
        assert!(!find(&elsewhere, "search-section").has_class(ACTIVE_CLASS));
    }
}
