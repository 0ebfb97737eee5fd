use serde::{Deserialize, Serialize};

/// A named group of friends, referenced by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_ids: Vec::new(),
            photo_uri: None,
        }
    }

    pub fn has_member(&self, friend_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == friend_id)
    }

    /// Add a member; returns `false` if already present
    pub fn add_member(&mut self, friend_id: &str) -> bool {
        if self.has_member(friend_id) {
            return false;
        }
        self.member_ids.push(friend_id.to_string());
        true
    }

    /// Remove a member; returns whether it was present
    pub fn remove_member(&mut self, friend_id: &str) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|id| id != friend_id);
        self.member_ids.len() != before
    }
}
