use serde::{Deserialize, Serialize};

/// The `following/{uid}` record: who `uid` follows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FollowingList {
    #[serde(default)]
    pub users: Vec<FollowedUser>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FollowedUser {
    pub id: String,
}

impl FollowingList {
    pub fn contains(&self, id: &str) -> bool {
        self.users.iter().any(|u| u.id == id)
    }
}

/// Builds the id list the "following" query filters on.
///
/// The list always starts with an empty-string entry, so it is never empty even for a
/// user who follows nobody (or has no record yet).
// NOTE: the leading "" also matches posts with an empty `uid`. Kept as-is, see DESIGN.md.
pub fn followed_ids(list: Option<&FollowingList>) -> Vec<String> {
    let mut ids = vec![String::new()];
    if let Some(list) = list {
        ids.extend(list.users.iter().map(|u| u.id.clone()));
    }
    ids
}
