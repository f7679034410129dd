//! Click Actions
//!
//! Config documents name actions by string. Each widget maps those names onto
//! a closed enum through a static table; unknown names are logged and ignored.

/// Actions understood by the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    UserInfoClick,
    MenuItemClick,
    Logout,
    SearchClick,
}

/// Actions understood by the sidenav
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidenavAction {
    ToggleMenu,
    MenuItemClick,
}

pub const HEADER_ACTIONS: &[(&str, HeaderAction)] = &[
    ("onUserInfoClick", HeaderAction::UserInfoClick),
    ("onMenuItemClick", HeaderAction::MenuItemClick),
    ("onLogout", HeaderAction::Logout),
    ("onSearchClick", HeaderAction::SearchClick),
];

pub const SIDENAV_ACTIONS: &[(&str, SidenavAction)] = &[
    ("onToggleMenu", SidenavAction::ToggleMenu),
    ("onMenuItemClick", SidenavAction::MenuItemClick),
];

/// Resolve an action name against a widget's table, warning on a miss
pub fn resolve<A: Copy>(table: &[(&str, A)], name: &str) -> Option<A> {
    let found = table
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, action)| *action);
    if found.is_none() {
        tracing::warn!(action = name, "no handler found for action");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_actions() {
        assert_eq!(resolve(HEADER_ACTIONS, "onLogout"), Some(HeaderAction::Logout));
        assert_eq!(resolve(SIDENAV_ACTIONS, "onToggleMenu"), Some(SidenavAction::ToggleMenu));
    }

    #[test]
    fn test_resolve_unknown_action() {
        assert_eq!(resolve(SIDENAV_ACTIONS, "onLogout"), None);
        assert_eq!(resolve(HEADER_ACTIONS, ""), None);
    }

    #[test]
    fn test_tables_have_unique_names() {
        for table in [
            HEADER_ACTIONS.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            SIDENAV_ACTIONS.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
        ] {
            let mut names = table.clone();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }
}
