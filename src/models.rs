//! Widget Models
//!
//! Item tree and configuration structures, matching the JSON config documents.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ========================
// Item tree
// ========================

/// Fields shared by every item variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
    /// Names the dynamic-data field that feeds this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub image_src: String,
    #[serde(default)]
    pub alt_text: String,
}

/// Container or button: owns an ordered list of children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeItem {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub children: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalItem {
    #[serde(flatten)]
    pub base: ItemBase,
    /// Dynamic-state key deciding visibility
    pub show_condition: String,
    #[serde(default)]
    pub children: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_item_id: Option<String>,
}

/// A node of the configuration-driven UI tree, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Item {
    Text(TextItem),
    Image(ImageItem),
    Container(CompositeItem),
    Button(CompositeItem),
    Modal(ModalItem),
    /// Placeholder replaced by generated menu buttons before patching
    MenuItem(ItemBase),
}

/// Discriminant of [`Item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Text,
    Image,
    Container,
    Button,
    Modal,
    MenuItem,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Container => "container",
            ItemKind::Button => "button",
            ItemKind::Modal => "modal",
            ItemKind::MenuItem => "menuItem",
        }
    }
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Text(_) => ItemKind::Text,
            Item::Image(_) => ItemKind::Image,
            Item::Container(_) => ItemKind::Container,
            Item::Button(_) => ItemKind::Button,
            Item::Modal(_) => ItemKind::Modal,
            Item::MenuItem(_) => ItemKind::MenuItem,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Text(t) => &t.base,
            Item::Image(i) => &i.base,
            Item::Container(c) | Item::Button(c) => &c.base,
            Item::Modal(m) => &m.base,
            Item::MenuItem(b) => b,
        }
    }

    pub fn base_mut(&mut self) -> &mut ItemBase {
        match self {
            Item::Text(t) => &mut t.base,
            Item::Image(i) => &mut i.base,
            Item::Container(c) | Item::Button(c) => &mut c.base,
            Item::Modal(m) => &mut m.base,
            Item::MenuItem(b) => b,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn bind_key(&self) -> Option<&str> {
        self.base().bind_key.as_deref()
    }

    pub fn click_action(&self) -> Option<&str> {
        self.base().click_action.as_deref()
    }

    /// Container, button or modal
    pub fn is_composite(&self) -> bool {
        matches!(self, Item::Container(_) | Item::Button(_) | Item::Modal(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Item::MenuItem(_))
    }

    /// Any composite, even one whose child list is empty
    pub fn has_children(&self) -> bool {
        self.is_composite()
    }

    /// Children of composite variants; `None` for leaves
    pub fn children(&self) -> Option<&[Item]> {
        match self {
            Item::Container(c) | Item::Button(c) => Some(&c.children),
            Item::Modal(m) => Some(&m.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Item>> {
        match self {
            Item::Container(c) | Item::Button(c) => Some(&mut c.children),
            Item::Modal(m) => Some(&mut m.children),
            _ => None,
        }
    }

    /// Append a class unless already present
    pub fn add_class(&mut self, class: &str) {
        let classes = &mut self.base_mut().classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.base().classes.iter().any(|c| c == class)
    }
}

/// Visit every item depth-first, parents before children
pub fn walk<'a>(items: &'a [Item], visit: &mut impl FnMut(&'a Item)) {
    for item in items {
        visit(item);
        if let Some(children) = item.children() {
            walk(children, visit);
        }
    }
}

// ========================
// Menu configuration
// ========================

/// Navigation metadata for one generated menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemConfig {
    pub route: String,
    pub label: String,
    pub icon_base: String,
    /// 1-based, unique within a menu
    pub order: u32,
    /// Roles allowed to see the entry; absent means everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl MenuItemConfig {
    pub fn visible_to(&self, role: Option<&str>) -> bool {
        match &self.roles {
            None => true,
            Some(roles) => role.is_some_and(|role| roles.iter().any(|r| r == role)),
        }
    }
}

/// Template every generated menu button is built from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemTemplate {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub click_action: Option<String>,
    /// Icon first, then label
    #[serde(default)]
    pub children: Vec<Item>,
}

/// Bind-key → menu entry, as written in the sidenav config
pub type MenuItemsConfig = BTreeMap<String, MenuItemConfig>;

// ========================
// Widget documents
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    #[serde(default)]
    pub container_classes: Vec<String>,
    /// Bind-key → route for route-bound buttons
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidenavConfig {
    #[serde(default)]
    pub container_classes: Vec<String>,
    #[serde(default)]
    pub start_collapsed: bool,
    /// Collapse again when the document is clicked outside while expanded
    #[serde(default)]
    pub collapse_on_outside_click: bool,
    pub menu_items_config: MenuItemsConfig,
    #[serde(default)]
    pub menu_item_template: Option<MenuItemTemplate>,
    pub items: Vec<Item>,
}

// ========================
// Renderer-facing types
// ========================

/// Bind-key → current value, regenerated on every recomputation
pub type DynamicData = HashMap<String, String>;

/// Named boolean conditions for modal visibility
pub type DynamicState = HashMap<String, bool>;

/// Item id → ordered CSS declarations
pub type ItemStyles = HashMap<String, Vec<(String, String)>>;

/// Item id → extra class string
pub type DynamicClasses = HashMap<String, String>;

/// Emitted by the renderer when an item with a click action is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemClickEvent {
    pub action: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Leave,
}

/// Pointer entering or leaving an item; `center_y` is the viewport y of the item's center
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPointerEvent {
    pub item_id: String,
    pub phase: PointerPhase,
    pub center_y: f64,
}
