//! Property-based tests for group lifecycle rules.
//!
//! These tests verify emptiness tracking, the delete-only-when-empty rule, the
//! cascade that removes a group with its last bookmark, and unique group names,
//! for arbitrary layouts of bookmarks across groups.

use std::collections::HashMap;

use linkmanager::database::Database;
use linkmanager::services::bookmark_service::{BookmarkService, BookmarkServiceTrait};
use linkmanager::services::group_service::{GroupService, GroupServiceTrait};
use linkmanager::types::bookmark::DeleteOutcome;
use linkmanager::types::errors::ErrorKind;
use proptest::prelude::*;

/// Strategy for a group count and the group index each bookmark goes into.
fn arb_layout() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..5).prop_flat_map(|groups| (Just(groups), prop::collection::vec(0..groups, 0..12)))
}

/// Strategy for group names. Letters only, so trimming never changes them.
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,20}[A-Za-z]"
}

fn populate(db: &Database, groups: usize, layout: &[usize]) -> (Vec<i64>, Vec<(i64, i64)>) {
    let group_svc = GroupService::new(db.connection());
    let bookmark_svc = BookmarkService::new(db.connection());

    let ids: Vec<i64> = (0..groups)
        .map(|i| group_svc.add_group(&format!("Group {}", i), "").unwrap())
        .collect();
    let bookmarks = layout
        .iter()
        .enumerate()
        .map(|(n, &g)| {
            let placed = bookmark_svc
                .add_bookmark(ids[g], &format!("https://site{}.io", n), &format!("Site {}", n), "")
                .unwrap();
            (placed.bookmark_id, placed.group_id)
        })
        .collect();
    (ids, bookmarks)
}

// **Property: emptiness and guarded deletion**
//
// *For any* layout, a group is empty iff its bookmark count is zero, and
// deleting it is a conflict iff it is not empty.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn delete_group_conflicts_iff_not_empty((groups, layout) in arb_layout()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let (ids, _) = populate(&db, groups, &layout);
        let svc = GroupService::new(db.connection());

        let counts: HashMap<i64, i64> = svc
            .list_groups_with_counts()
            .unwrap()
            .into_iter()
            .map(|g| (g.id, g.bookmark_count))
            .collect();

        for (index, id) in ids.iter().enumerate() {
            let expected = layout.iter().filter(|&&g| g == index).count() as i64;
            prop_assert_eq!(counts[id], expected);

            let empty = svc.is_empty(*id).unwrap();
            prop_assert_eq!(empty, expected == 0);

            match svc.delete_group(*id) {
                Ok(()) => prop_assert!(empty, "deleted a group that still had bookmarks"),
                Err(e) => {
                    prop_assert!(!empty);
                    prop_assert_eq!(e.kind(), ErrorKind::Conflict);
                }
            }
        }
    }
}

// **Property: cascade on last bookmark**
//
// *For any* layout, deleting every bookmark one at a time removes each group
// exactly when its last bookmark goes, and never earlier.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn group_disappears_with_its_last_bookmark((groups, layout) in arb_layout()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let (_, bookmarks) = populate(&db, groups, &layout);
        let bookmark_svc = BookmarkService::new(db.connection());
        let group_svc = GroupService::new(db.connection());

        let mut remaining: HashMap<i64, usize> = HashMap::new();
        for (_, group_id) in &bookmarks {
            *remaining.entry(*group_id).or_default() += 1;
        }

        for (bookmark_id, group_id) in bookmarks.iter().rev() {
            let left = remaining.get_mut(group_id).unwrap();
            *left -= 1;

            let outcome = bookmark_svc.delete_bookmark(*bookmark_id, *group_id).unwrap();
            if *left == 0 {
                prop_assert_eq!(outcome, DeleteOutcome::GroupCascaded { group_id: *group_id });
            } else {
                prop_assert_eq!(outcome, DeleteOutcome::Removed { redirect_group: *group_id });
            }

            let listed = group_svc.list_groups_with_counts().unwrap();
            prop_assert_eq!(listed.iter().any(|g| g.id == *group_id), *left > 0);
        }

        // Groups that never had a bookmark are untouched by the cascade.
        let untouched = groups - remaining.len();
        prop_assert_eq!(group_svc.list_groups_with_counts().unwrap().len(), untouched);
    }
}

// **Property: unique names**
//
// *For any* name, adding it twice is a conflict, renaming another group to it
// fails, and renaming a group to its own name succeeds.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn group_names_stay_unique(name in arb_name(), other in arb_name()) {
        prop_assume!(name != other);
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let svc = GroupService::new(db.connection());

        let first = svc.add_group(&name, "").unwrap();
        prop_assert_eq!(svc.add_group(&name, "again").unwrap_err().kind(), ErrorKind::Conflict);

        let second = svc.add_group(&other, "").unwrap();
        prop_assert_eq!(svc.edit_group(second, &name, "").unwrap_err().kind(), ErrorKind::Conflict);
        prop_assert!(svc.edit_group(first, &name, "renamed to itself").is_ok());

        prop_assert_eq!(svc.list_groups_with_counts().unwrap().len(), 2);
    }
}
