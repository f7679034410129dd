//! Tree Expansion
//!
//! One-time expansion of `menuItem` placeholders and the lookup tables
//! built from the expanded tree.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    walk, CompositeItem, ImageItem, Item, ItemBase, MenuItemConfig, MenuItemTemplate,
    MenuItemsConfig, TextItem,
};

/// `group-products` → `groupProducts`
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Menu entries sorted ascending by `order`, ties broken by bind-key
pub fn ordered_menu(menu: &MenuItemsConfig) -> Vec<(&str, &MenuItemConfig)> {
    let mut entries: Vec<_> = menu.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|(ka, a), (kb, b)| a.order.cmp(&b.order).then_with(|| ka.cmp(kb)));
    entries
}

/// Entries the given role may see; everything else is dropped before expansion
pub fn visible_menu(menu: &MenuItemsConfig, role: Option<&str>) -> MenuItemsConfig {
    menu.iter()
        .filter(|(key, entry)| {
            let visible = entry.visible_to(role);
            if !visible {
                tracing::debug!(bind_key = %key, ?role, "menu entry hidden for role");
            }
            visible
        })
        .map(|(key, entry)| (key.clone(), entry.clone()))
        .collect()
}

/// Replace every placeholder with one generated button per menu entry
pub fn expand_menu_items(
    items: &[Item],
    menu: &MenuItemsConfig,
    template: &MenuItemTemplate,
) -> Vec<Item> {
    items
        .iter()
        .flat_map(|item| {
            if item.is_placeholder() {
                return generate_menu_items(menu, template);
            }
            let mut item = item.clone();
            if let Some(children) = item.children_mut() {
                *children = expand_menu_items(children, menu, template);
            }
            vec![item]
        })
        .collect()
}

fn generate_menu_items(menu: &MenuItemsConfig, template: &MenuItemTemplate) -> Vec<Item> {
    ordered_menu(menu)
        .into_iter()
        .map(|(bind_key, config)| menu_button(bind_key, config, template))
        .collect()
}

fn menu_button(bind_key: &str, config: &MenuItemConfig, template: &MenuItemTemplate) -> Item {
    let camel = to_camel_case(bind_key);

    let children = template
        .children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let suffix = if index == 0 { "icon" } else { "label" };
            let id = format!("{}-{}", bind_key, suffix);
            match child {
                Item::Image(image) => Item::Image(ImageItem {
                    base: ItemBase {
                        id,
                        bind_key: Some(format!("{}Icon", camel)),
                        ..image.base.clone()
                    },
                    image_src: String::new(),
                    alt_text: config.label.clone(),
                }),
                Item::Text(text) => Item::Text(TextItem {
                    base: ItemBase {
                        id,
                        bind_key: Some(format!("{}Label", camel)),
                        ..text.base.clone()
                    },
                    content: String::new(),
                }),
                other => {
                    let mut other = other.clone();
                    other.base_mut().id = id;
                    other
                }
            }
        })
        .collect();

    Item::Button(CompositeItem {
        base: ItemBase {
            id: format!("{}-item", bind_key),
            classes: template.classes.clone(),
            click_action: template.click_action.clone(),
            bind_key: Some(bind_key.to_string()),
        },
        children,
    })
}

/// Derived lookups over the expanded tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupMaps {
    /// Button id → bind-key
    pub id_to_bind_key: HashMap<String, String>,
    pub id_to_item: HashMap<String, Item>,
    pub bind_key_to_route: HashMap<String, String>,
}

impl LookupMaps {
    pub fn build(items: &[Item], routes: &BTreeMap<String, String>) -> Self {
        let mut maps = Self {
            bind_key_to_route: routes.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ..Default::default()
        };

        walk(items, &mut |item| {
            if !item.id().is_empty() {
                maps.id_to_item.insert(item.id().to_string(), item.clone());
            }
            if let (Item::Button(_), Some(key)) = (item, item.bind_key()) {
                maps.id_to_bind_key.insert(item.id().to_string(), key.to_string());
            }
        });

        maps
    }

    /// Item id → bind-key → route
    pub fn route_for_item(&self, item_id: &str) -> Option<&str> {
        let bind_key = self.id_to_bind_key.get(item_id)?;
        self.bind_key_to_route.get(bind_key).map(String::as_str)
    }
}

/// Route table of a menu, keyed by bind-key
pub fn menu_routes(menu: &MenuItemsConfig) -> BTreeMap<String, String> {
    menu.iter()
        .map(|(key, config)| (key.clone(), config.route.clone()))
        .collect()
}
