// Link manager state managers
// Managers own persistence and session state: groups, bookmarks, flash messages.

pub mod bookmark_manager;
pub mod flash_manager;
pub mod group_manager;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current UNIX timestamp in seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
