//! User Data Store
//!
//! Uses Leptos reactive_stores for field-level reactivity over the current
//! user's display name and avatar.

use leptos::prelude::*;
use reactive_stores::Store;
use serde::{Deserialize, Serialize};

/// Current user identity shown by the header
#[derive(Clone, Debug, Default, PartialEq, Store, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_name: String,
    pub user_avatar: String,
}

/// Partial update; `None` fields are left untouched
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataPatch {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
}

impl UserData {
    /// Shallow merge of the supplied fields
    pub fn merge(&mut self, patch: UserDataPatch) {
        if let Some(name) = patch.user_name {
            self.user_name = name;
        }
        if let Some(avatar) = patch.user_avatar {
            self.user_avatar = avatar;
        }
    }
}

/// Reactive handle around the user record
#[derive(Clone, Copy)]
pub struct UserDataStore {
    store: Store<UserData>,
}

impl UserDataStore {
    pub fn new(initial: UserData) -> Self {
        Self {
            store: Store::new(initial),
        }
    }

    /// Snapshot of the record (tracked)
    pub fn current(&self) -> UserData {
        UserData {
            user_name: self.store.user_name().get(),
            user_avatar: self.store.user_avatar().get(),
        }
    }

    /// Replace only the supplied fields; untouched fields do not notify
    pub fn update(&self, patch: UserDataPatch) {
        tracing::debug!(
            user_name = patch.user_name.is_some(),
            user_avatar = patch.user_avatar.is_some(),
            "updating user data"
        );
        if let Some(name) = patch.user_name {
            *self.store.user_name().write() = name;
        }
        if let Some(avatar) = patch.user_avatar {
            *self.store.user_avatar().write() = avatar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> UserData {
        UserData {
            user_name: "John Doe".into(),
            user_avatar: "assets/images/profile.png".into(),
        }
    }

    #[test]
    fn test_merge_keeps_missing_fields() {
        let mut user = john();
        user.merge(UserDataPatch {
            user_name: Some("X".into()),
            user_avatar: None,
        });
        assert_eq!(user.user_name, "X");
        assert_eq!(user.user_avatar, "assets/images/profile.png");
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: UserDataPatch = serde_json::from_str(r#"{"userAvatar": "me.png"}"#).unwrap();
        assert_eq!(patch.user_name, None);
        assert_eq!(patch.user_avatar.as_deref(), Some("me.png"));
    }

    #[test]
    fn test_store_update_partial() {
        let owner = Owner::new();
        owner.set();

        let store = UserDataStore::new(john());
        store.update(UserDataPatch {
            user_name: Some("X".into()),
            ..Default::default()
        });

        let current = store.current();
        assert_eq!(current.user_name, "X");
        assert_eq!(current.user_avatar, "assets/images/profile.png");
    }
}
