//! Group service for the link manager.
//!
//! Validates group input, enforces unique names and only deletes groups that no
//! bookmark references. Every check-then-act sequence runs in one immediate
//! transaction.

use rusqlite::Connection;
use tracing::info;

use crate::database::in_transaction;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkStore};
use crate::managers::group_manager::{GroupManager, GroupStore};
use crate::types::errors::{LinkError, StoreError};
use crate::types::group::GroupSummary;

pub const MSG_NAME_REQUIRED: &str = "Group name is required";
pub const MSG_INVALID_GROUP: &str = "Invalid group data";
pub const MSG_INVALID_GROUP_ID: &str = "Invalid group ID";
pub const MSG_GROUP_NOT_FOUND: &str = "Group not found";
pub const MSG_DUPLICATE_NAME: &str = "A group with this name already exists";
pub const MSG_NOT_EMPTY: &str = "Group is not empty. Delete all bookmarks in this group first.";

/// Trait defining group operations.
pub trait GroupServiceTrait {
    /// Creates a group and returns its identifier.
    fn add_group(&self, name: &str, description: &str) -> Result<i64, LinkError>;
    fn edit_group(&self, group_id: i64, name: &str, description: &str) -> Result<(), LinkError>;
    /// Deletes a group that owns no bookmarks.
    fn delete_group(&self, group_id: i64) -> Result<(), LinkError>;
    /// True iff no bookmark references `group_id`.
    fn is_empty(&self, group_id: i64) -> Result<bool, StoreError>;
    fn list_groups_with_counts(&self) -> Result<Vec<GroupSummary>, StoreError>;
}

/// Group service over a SQLite connection.
pub struct GroupService<'a> {
    conn: &'a Connection,
}

impl<'a> GroupService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> GroupServiceTrait for GroupService<'a> {
    fn add_group(&self, name: &str, description: &str) -> Result<i64, LinkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LinkError::validation(MSG_NAME_REQUIRED));
        }

        in_transaction(self.conn, |conn| {
            let groups = GroupManager::new(conn);
            if groups.find_by_name(name)?.is_some() {
                return Err(LinkError::conflict(MSG_DUPLICATE_NAME));
            }
            let id = groups.insert(name, description.trim())?;
            info!(group_id = id, name, "group added");
            Ok(id)
        })
    }

    fn edit_group(&self, group_id: i64, name: &str, description: &str) -> Result<(), LinkError> {
        let name = name.trim();
        if group_id <= 0 || name.is_empty() {
            return Err(LinkError::validation(MSG_INVALID_GROUP));
        }

        in_transaction(self.conn, |conn| {
            let groups = GroupManager::new(conn);
            let current = groups
                .find(group_id)?
                .ok_or_else(|| LinkError::not_found(MSG_GROUP_NOT_FOUND))?;

            // Keeping the current name is never a conflict.
            if name != current.name && groups.find_by_name(name)?.is_some() {
                return Err(LinkError::conflict(MSG_DUPLICATE_NAME));
            }

            groups.update(group_id, name, description.trim())?;
            info!(group_id, name, "group updated");
            Ok(())
        })
    }

    fn delete_group(&self, group_id: i64) -> Result<(), LinkError> {
        if group_id <= 0 {
            return Err(LinkError::validation(MSG_INVALID_GROUP_ID));
        }

        in_transaction(self.conn, |conn| {
            let groups = GroupManager::new(conn);
            if !groups.exists(group_id)? {
                return Err(LinkError::not_found(MSG_GROUP_NOT_FOUND));
            }
            if BookmarkManager::new(conn).count_in_group(group_id)? > 0 {
                return Err(LinkError::conflict(MSG_NOT_EMPTY));
            }
            groups.delete(group_id)?;
            info!(group_id, "group deleted");
            Ok(())
        })
    }

    fn is_empty(&self, group_id: i64) -> Result<bool, StoreError> {
        Ok(BookmarkManager::new(self.conn).count_in_group(group_id)? == 0)
    }

    fn list_groups_with_counts(&self) -> Result<Vec<GroupSummary>, StoreError> {
        GroupManager::new(self.conn).list_with_counts()
    }
}

/// Deletes `group_id` if no bookmark references it anymore.
///
/// Must run inside the caller's transaction; returns whether the group was deleted.
pub fn cascade_delete_if_empty(conn: &Connection, group_id: i64) -> Result<bool, StoreError> {
    if BookmarkManager::new(conn).count_in_group(group_id)? > 0 {
        return Ok(false);
    }
    let deleted = GroupManager::new(conn).delete(group_id)?;
    if deleted {
        info!(group_id, "empty group deleted after its last bookmark");
    }
    Ok(deleted)
}
