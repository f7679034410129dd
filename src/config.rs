//! Embedded Configuration
//!
//! JSON documents compiled into the module and parsed at start-up.

use std::collections::HashSet;

use leptos_route_observer::RouteMode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{walk, HeaderConfig, Item, SidenavConfig};
use crate::patcher::DEFAULT_ROW_HEIGHT_REM;
use crate::tree::expand_menu_items;
use crate::store::UserData;

const APP_JSON: &str = include_str!("../config/app.json");
const HEADER_JSON: &str = include_str!("../config/header.json");
const SIDENAV_JSON: &str = include_str!("../config/sidenav.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {document} config: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("menu entries {first} and {second} share order {order}")]
    DuplicateOrder { order: u32, first: String, second: String },

    #[error("menu entry {0} has order 0; orders are 1-based")]
    InvalidOrder(String),

    #[error("item id {0} appears more than once")]
    DuplicateItemId(String),

    #[error("config contains a menuItem placeholder but no menuItemTemplate")]
    MissingTemplate,
}

/// Process-wide settings shared by both widgets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub route_mode: RouteMode,
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Role matched against menu entries' `roles`
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default = "default_row_height")]
    pub indicator_row_height_rem: f32,
    #[serde(default)]
    pub initial_user: UserData,
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_row_height() -> f32 {
    DEFAULT_ROW_HEIGHT_REM
}

fn parse<T: for<'de> Deserialize<'de>>(document: &'static str, json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Parse { document, source })
}

pub fn load_app_settings() -> Result<AppSettings, ConfigError> {
    parse("app", APP_JSON)
}

pub fn load_header_config() -> Result<HeaderConfig, ConfigError> {
    parse_header(HEADER_JSON)
}

pub fn load_sidenav_config() -> Result<SidenavConfig, ConfigError> {
    parse_sidenav(SIDENAV_JSON)
}

pub fn parse_header(json: &str) -> Result<HeaderConfig, ConfigError> {
    let config: HeaderConfig = parse("header", json)?;
    check_unique_ids(&config.items)?;
    Ok(config)
}

pub fn parse_sidenav(json: &str) -> Result<SidenavConfig, ConfigError> {
    let config: SidenavConfig = parse("sidenav", json)?;
    validate_sidenav(&config)?;
    Ok(config)
}

fn validate_sidenav(config: &SidenavConfig) -> Result<(), ConfigError> {
    let mut seen: Vec<(u32, &str)> = Vec::new();
    for (key, entry) in &config.menu_items_config {
        if entry.order == 0 {
            return Err(ConfigError::InvalidOrder(key.clone()));
        }
        if let Some((_, first)) = seen.iter().find(|(order, _)| *order == entry.order) {
            return Err(ConfigError::DuplicateOrder {
                order: entry.order,
                first: first.to_string(),
                second: key.clone(),
            });
        }
        seen.push((entry.order, key));
    }

    let mut has_placeholder = false;
    walk(&config.items, &mut |item| has_placeholder |= item.is_placeholder());

    // Generated ids count too, so check the tree as it will be rendered
    match &config.menu_item_template {
        Some(template) => {
            let expanded = expand_menu_items(&config.items, &config.menu_items_config, template);
            check_unique_ids(&expanded)
        }
        None if has_placeholder => Err(ConfigError::MissingTemplate),
        None => check_unique_ids(&config.items),
    }
}

/// Non-empty ids must be unique so id-based lookups are unambiguous
fn check_unique_ids(items: &[Item]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    let mut duplicate = None;
    walk(items, &mut |item| {
        let id = item.id();
        if !id.is_empty() && !seen.insert(id) && duplicate.is_none() {
            duplicate = Some(id.to_string());
        }
    });
    match duplicate {
        Some(id) => Err(ConfigError::DuplicateItemId(id)),
        None => Ok(()),
    }
}
