//! Group store for the link manager.
//!
//! Implements `GroupStore` — CRUD and count queries for bookmark groups,
//! backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};

use super::unix_now;
use crate::types::errors::StoreError;
use crate::types::group::{Group, GroupSummary};

/// Persistence operations on groups. Carries no validation rules.
pub trait GroupStore {
    /// Inserts a group and returns its store-assigned identifier.
    fn insert(&self, name: &str, description: &str) -> Result<i64, StoreError>;
    fn find(&self, id: i64) -> Result<Option<Group>, StoreError>;
    /// Exact, case-sensitive name lookup.
    fn find_by_name(&self, name: &str) -> Result<Option<Group>, StoreError>;
    fn exists(&self, id: i64) -> Result<bool, StoreError>;
    /// Returns `false` when no row matched `id`.
    fn update(&self, id: i64, name: &str, description: &str) -> Result<bool, StoreError>;
    /// Returns `false` when no row matched `id`.
    fn delete(&self, id: i64) -> Result<bool, StoreError>;
    /// All groups ordered by name, each with its bookmark count.
    fn list_with_counts(&self) -> Result<Vec<GroupSummary>, StoreError>;
}

/// Group store backed by a SQLite connection.
pub struct GroupManager<'a> {
    conn: &'a Connection,
}

impl<'a> GroupManager<'a> {
    /// Creates a new `GroupManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_group(row: &rusqlite::Row) -> rusqlite::Result<Group> {
        Ok(Group {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl<'a> GroupStore for GroupManager<'a> {
    fn insert(&self, name: &str, description: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO bookmark_groups (name, description, created_at) VALUES (?1, ?2, ?3)",
            params![name, description, unix_now()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find(&self, id: i64) -> Result<Option<Group>, StoreError> {
        let group = self
            .conn
            .query_row(
                "SELECT id, name, description, created_at FROM bookmark_groups WHERE id = ?1",
                params![id],
                Self::row_to_group,
            )
            .optional()?;
        Ok(group)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Group>, StoreError> {
        let group = self
            .conn
            .query_row(
                "SELECT id, name, description, created_at FROM bookmark_groups WHERE name = ?1",
                params![name],
                Self::row_to_group,
            )
            .optional()?;
        Ok(group)
    }

    fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM bookmark_groups WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn update(&self, id: i64, name: &str, description: &str) -> Result<bool, StoreError> {
        let affected = self.conn.execute(
            "UPDATE bookmark_groups SET name = ?1, description = ?2 WHERE id = ?3",
            params![name, description, id],
        )?;
        Ok(affected > 0)
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmark_groups WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn list_with_counts(&self) -> Result<Vec<GroupSummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT g.id, g.name, g.description, \
                    (SELECT COUNT(*) FROM bookmarks b WHERE b.group_id = g.id) AS bookmark_count \
             FROM bookmark_groups g ORDER BY g.name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(GroupSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                bookmark_count: row.get(3)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
