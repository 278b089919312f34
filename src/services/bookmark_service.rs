//! Bookmark service for the link manager.
//!
//! Validates bookmark input, checks that the owning group exists, and deletes a
//! group together with its last bookmark.

use rusqlite::Connection;
use tracing::info;

use super::group_service::cascade_delete_if_empty;
use crate::database::in_transaction;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkStore};
use crate::managers::group_manager::{GroupManager, GroupStore};
use crate::types::bookmark::{BookmarkFields, DeleteOutcome, Placement};
use crate::types::errors::LinkError;

pub const MSG_REQUIRED_FIELDS: &str = "URL, title, and group are required";
pub const MSG_INVALID_BOOKMARK: &str = "Invalid bookmark data";
pub const MSG_INVALID_BOOKMARK_ID: &str = "Invalid bookmark ID";
pub const MSG_BOOKMARK_NOT_FOUND: &str = "Bookmark not found";
pub const MSG_GROUP_MISSING: &str = "Selected group does not exist";

/// Trait defining bookmark operations.
pub trait BookmarkServiceTrait {
    fn add_bookmark(
        &self,
        group_id: i64,
        url: &str,
        title: &str,
        description: &str,
    ) -> Result<Placement, LinkError>;
    /// Overwrites every field, possibly moving the bookmark to another group.
    fn edit_bookmark(
        &self,
        bookmark_id: i64,
        group_id: i64,
        url: &str,
        title: &str,
        description: &str,
    ) -> Result<Placement, LinkError>;
    /// Deletes a bookmark, and its group too when it was the group's last bookmark.
    fn delete_bookmark(&self, bookmark_id: i64, requested_group_id: i64) -> Result<DeleteOutcome, LinkError>;
}

/// Bookmark service over a SQLite connection.
pub struct BookmarkService<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn fields(group_id: i64, url: &str, title: &str, description: &str) -> Option<BookmarkFields> {
        let (url, title) = (url.trim(), title.trim());
        if url.is_empty() || title.is_empty() || group_id <= 0 {
            return None;
        }
        Some(BookmarkFields::new(group_id, url, title, description.trim()))
    }
}

impl<'a> BookmarkServiceTrait for BookmarkService<'a> {
    fn add_bookmark(
        &self,
        group_id: i64,
        url: &str,
        title: &str,
        description: &str,
    ) -> Result<Placement, LinkError> {
        let fields = Self::fields(group_id, url, title, description)
            .ok_or_else(|| LinkError::validation(MSG_REQUIRED_FIELDS))?;

        in_transaction(self.conn, |conn| {
            if !GroupManager::new(conn).exists(fields.group_id)? {
                return Err(LinkError::not_found(MSG_GROUP_MISSING));
            }
            let bookmark_id = BookmarkManager::new(conn).insert(&fields)?;
            info!(bookmark_id, group_id = fields.group_id, "bookmark added");
            Ok(Placement { bookmark_id, group_id: fields.group_id })
        })
    }

    fn edit_bookmark(
        &self,
        bookmark_id: i64,
        group_id: i64,
        url: &str,
        title: &str,
        description: &str,
    ) -> Result<Placement, LinkError> {
        let fields = Self::fields(group_id, url, title, description)
            .filter(|_| bookmark_id > 0)
            .ok_or_else(|| LinkError::validation(MSG_INVALID_BOOKMARK))?;

        in_transaction(self.conn, |conn| {
            let bookmarks = BookmarkManager::new(conn);
            if bookmarks.find(bookmark_id)?.is_none() {
                return Err(LinkError::not_found(MSG_BOOKMARK_NOT_FOUND));
            }
            if !GroupManager::new(conn).exists(fields.group_id)? {
                return Err(LinkError::not_found(MSG_GROUP_MISSING));
            }
            bookmarks.update(bookmark_id, &fields)?;
            info!(bookmark_id, group_id = fields.group_id, "bookmark updated");
            Ok(Placement { bookmark_id, group_id: fields.group_id })
        })
    }

    fn delete_bookmark(&self, bookmark_id: i64, requested_group_id: i64) -> Result<DeleteOutcome, LinkError> {
        if bookmark_id <= 0 {
            return Err(LinkError::validation(MSG_INVALID_BOOKMARK_ID));
        }

        in_transaction(self.conn, |conn| {
            let bookmarks = BookmarkManager::new(conn);
            let owning_group = bookmarks
                .find(bookmark_id)?
                .ok_or_else(|| LinkError::not_found(MSG_BOOKMARK_NOT_FOUND))?
                .group_id;

            bookmarks.delete(bookmark_id)?;
            info!(bookmark_id, group_id = owning_group, "bookmark deleted");

            if cascade_delete_if_empty(conn, owning_group)? {
                return Ok(DeleteOutcome::GroupCascaded { group_id: owning_group });
            }

            let redirect_group = if requested_group_id > 0 { requested_group_id } else { owning_group };
            Ok(DeleteOutcome::Removed { redirect_group })
        })
    }
}
