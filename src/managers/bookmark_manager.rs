//! Bookmark store for the link manager.
//!
//! Implements `BookmarkStore` — CRUD, per-group listing and substring search
//! for bookmarks, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};

use super::unix_now;
use crate::types::bookmark::{Bookmark, BookmarkFields};
use crate::types::errors::StoreError;
use crate::types::search::SearchHit;

/// Persistence operations on bookmarks. Carries no validation rules.
pub trait BookmarkStore {
    /// Inserts a bookmark and returns its store-assigned identifier.
    fn insert(&self, fields: &BookmarkFields) -> Result<i64, StoreError>;
    fn find(&self, id: i64) -> Result<Option<Bookmark>, StoreError>;
    /// Overwrites every mutable field. Returns `false` when no row matched `id`.
    fn update(&self, id: i64, fields: &BookmarkFields) -> Result<bool, StoreError>;
    /// Returns `false` when no row matched `id`.
    fn delete(&self, id: i64) -> Result<bool, StoreError>;
    fn count_in_group(&self, group_id: i64) -> Result<i64, StoreError>;
    /// Bookmarks of one group ordered by title.
    fn list_in_group(&self, group_id: i64) -> Result<Vec<Bookmark>, StoreError>;
    /// Bookmarks whose title or description contains `query`, ordered by
    /// owning group name, then title.
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, StoreError>;
}

/// Bookmark store backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            group_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

/// Builds a `LIKE` pattern that matches `query` literally anywhere in the column.
///
/// Pair with `ESCAPE '\'`.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl<'a> BookmarkStore for BookmarkManager<'a> {
    fn insert(&self, fields: &BookmarkFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO bookmarks (group_id, url, title, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![fields.group_id, fields.url, fields.title, fields.description, unix_now()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let bookmark = self
            .conn
            .query_row(
                "SELECT id, group_id, url, title, description, created_at FROM bookmarks WHERE id = ?1",
                params![id],
                Self::row_to_bookmark,
            )
            .optional()?;
        Ok(bookmark)
    }

    fn update(&self, id: i64, fields: &BookmarkFields) -> Result<bool, StoreError> {
        let affected = self.conn.execute(
            "UPDATE bookmarks SET group_id = ?1, url = ?2, title = ?3, description = ?4 WHERE id = ?5",
            params![fields.group_id, fields.url, fields.title, fields.description, id],
        )?;
        Ok(affected > 0)
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn count_in_group(&self, group_id: i64) -> Result<i64, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM bookmarks WHERE group_id = ?1",
            params![group_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn list_in_group(&self, group_id: i64) -> Result<Vec<Bookmark>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, group_id, url, title, description, created_at \
             FROM bookmarks WHERE group_id = ?1 ORDER BY title, id",
        )?;

        let rows = stmt.query_map(params![group_id], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Searches bookmarks by title or description using SQL LIKE, which is
    /// case-insensitive for ASCII.
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, StoreError> {
        let pattern = like_pattern(query);
        let mut stmt = self.conn.prepare(
            "SELECT b.id, b.group_id, b.url, b.title, b.description, b.created_at, g.name \
             FROM bookmarks b JOIN bookmark_groups g ON b.group_id = g.id \
             WHERE b.title LIKE ?1 ESCAPE '\\' OR b.description LIKE ?1 ESCAPE '\\' \
             ORDER BY g.name, b.title, b.id",
        )?;

        let rows = stmt.query_map(params![pattern], |row| {
            Ok(SearchHit {
                bookmark: Self::row_to_bookmark(row)?,
                group_name: row.get(6)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
