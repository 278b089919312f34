//! Property-based tests for search result grouping.
//!
//! These tests verify that search results are grouped by owning group, ordered
//! by group name then bookmark title, and contain exactly the matching
//! bookmarks, for arbitrary group names and titles.

use std::collections::BTreeSet;

use linkmanager::database::Database;
use linkmanager::services::bookmark_service::{BookmarkService, BookmarkServiceTrait};
use linkmanager::services::group_service::{GroupService, GroupServiceTrait};
use linkmanager::services::search_aggregator::{aggregate, SearchAggregator};
use linkmanager::types::bookmark::Bookmark;
use linkmanager::types::search::SearchHit;
use proptest::prelude::*;

const MARKER: &str = "zq";

/// Strategy for a set of distinct group names.
fn arb_group_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Za-z]{3,8}", 1..5).prop_map(|set| set.into_iter().collect())
}

/// Strategy for bookmarks as (group slot, marked, title stem).
fn arb_bookmarks() -> impl Strategy<Value = Vec<(usize, bool, String)>> {
    prop::collection::vec((0usize..5, any::<bool>(), "[a-zA-Z]{1,6}"), 0..15)
}

// **Property: grouped and ordered search results**
//
// *For any* set of groups and bookmarks, searching for a marker returns every
// bookmark whose title contains it, each under its own group, with groups in
// name order and bookmarks in title order.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn search_results_are_grouped_and_sorted(
        names in arb_group_names(),
        bookmarks in arb_bookmarks(),
    ) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let group_svc = GroupService::new(db.connection());
        let bookmark_svc = BookmarkService::new(db.connection());

        let ids: Vec<i64> = names.iter().map(|n| group_svc.add_group(n, "").unwrap()).collect();
        let mut expected = 0usize;
        for (slot, marked, stem) in &bookmarks {
            let title = if *marked { format!("{}{}", stem, MARKER.to_uppercase()) } else { stem.clone() };
            if title.to_lowercase().contains(MARKER) {
                expected += 1;
            }
            bookmark_svc
                .add_bookmark(ids[slot % ids.len()], "https://example.com", &title, "")
                .unwrap();
        }

        let results = SearchAggregator::new(db.connection()).search(MARKER).unwrap();

        let total: usize = results.iter().map(|r| r.bookmarks.len()).sum();
        prop_assert_eq!(total, expected);

        for pair in results.windows(2) {
            prop_assert!(pair[0].group_name < pair[1].group_name);
        }
        for result in &results {
            prop_assert!(!result.bookmarks.is_empty());
            prop_assert!(names.contains(&result.group_name));
            for bookmark in &result.bookmarks {
                prop_assert_eq!(bookmark.group_id, result.group_id);
                prop_assert!(bookmark.title.to_lowercase().contains(MARKER));
            }
            for pair in result.bookmarks.windows(2) {
                prop_assert!(pair[0].title <= pair[1].title);
            }
        }
    }
}

fn hit(id: i64, group_id: i64) -> SearchHit {
    SearchHit {
        bookmark: Bookmark {
            id,
            group_id,
            url: String::new(),
            title: format!("t{}", id),
            description: String::new(),
            created_at: 0,
        },
        group_name: format!("g{}", group_id),
    }
}

// **Property: aggregation preserves hits**
//
// *For any* hit sequence already ordered by group, aggregation yields one entry
// per distinct group and keeps every hit, in order, under its group.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn aggregate_preserves_every_hit(mut groups in prop::collection::vec(1i64..6, 0..20)) {
        groups.sort();
        let hits: Vec<SearchHit> = groups.iter().enumerate().map(|(i, &g)| hit(i as i64, g)).collect();

        let results = aggregate(hits);

        let distinct: BTreeSet<i64> = groups.iter().copied().collect();
        prop_assert_eq!(results.len(), distinct.len());

        let flattened: Vec<i64> = results
            .iter()
            .flat_map(|r| r.bookmarks.iter().map(|b| b.group_id))
            .collect();
        prop_assert_eq!(&flattened, &groups);

        let ids: Vec<i64> = results.iter().flat_map(|r| r.bookmarks.iter().map(|b| b.id)).collect();
        let in_order: Vec<i64> = (0..groups.len() as i64).collect();
        prop_assert_eq!(ids, in_order);
    }
}
