use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// A single bookmark matched by a search, joined with its owning group's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub bookmark: Bookmark,
    pub group_name: String,
}

/// Matching bookmarks of one group. Never constructed with an empty `bookmarks` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub group_id: i64,
    pub group_name: String,
    pub bookmarks: Vec<Bookmark>,
}
