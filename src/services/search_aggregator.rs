//! Substring search over bookmarks, grouped by owning group.

use rusqlite::Connection;
use std::collections::HashMap;
use tracing::debug;

use crate::managers::bookmark_manager::{BookmarkManager, BookmarkStore};
use crate::types::errors::StoreError;
use crate::types::search::{SearchHit, SearchResult};

/// Runs bookmark searches and groups the matches for display.
pub struct SearchAggregator<'a> {
    conn: &'a Connection,
}

impl<'a> SearchAggregator<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Bookmarks whose title or description contains `query`, grouped by owning group.
    ///
    /// Groups are ordered by name and bookmarks by title within a group. A blank
    /// query yields no results rather than every bookmark.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, StoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let hits = BookmarkManager::new(self.conn).search(query)?;
        debug!(query, hits = hits.len(), "bookmark search");
        Ok(aggregate(hits))
    }
}

/// Groups `hits` by owning group, keeping the order in which groups first appear
/// and the order of bookmarks within each group.
pub fn aggregate(hits: Vec<SearchHit>) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = Vec::new();
    let mut slots: HashMap<i64, usize> = HashMap::new();

    for SearchHit { bookmark, group_name } in hits {
        let slot = *slots.entry(bookmark.group_id).or_insert_with(|| {
            results.push(SearchResult {
                group_id: bookmark.group_id,
                group_name,
                bookmarks: Vec::new(),
            });
            results.len() - 1
        });
        results[slot].bookmarks.push(bookmark);
    }

    results
}
