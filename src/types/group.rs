use serde::{Deserialize, Serialize};

/// A named collection that owns zero or more bookmarks.
///
/// An empty `description` means the group has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: i64,
}

/// A group annotated with how many bookmarks currently reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub bookmark_count: i64,
}

impl GroupSummary {
    /// True when no bookmark references this group.
    pub fn is_empty(&self) -> bool {
        self.bookmark_count == 0
    }
}
