use serde::{Deserialize, Serialize};

/// Represents a saved bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub group_id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub created_at: i64,
}

/// The mutable fields of a bookmark, as written on insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFields {
    pub group_id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
}

impl BookmarkFields {
    pub fn new(group_id: i64, url: &str, title: &str, description: &str) -> Self {
        Self {
            group_id,
            url: url.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Where a freshly added bookmark ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub bookmark_id: i64,
    pub group_id: i64,
}

/// Result of deleting a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The owning group still has bookmarks; `redirect_group` is the group to show next.
    Removed { redirect_group: i64 },
    /// The bookmark was the last one in its group, so the group was deleted as well.
    GroupCascaded { group_id: i64 },
}
