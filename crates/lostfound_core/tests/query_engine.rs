use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lostfound_core::{
    count_items, run_query, seed_items, ItemFilter, ItemQuery, ItemRecord, ItemStatus, SortKey,
    SortOrder,
};
use proptest::prelude::*;

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn record(id: &str, name: &str, status: ItemStatus, resolved: bool) -> ItemRecord {
    ItemRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        location: "Quad".to_string(),
        contact_info: "a@b.com".to_string(),
        status,
        resolved,
        date_created: base_instant(),
    }
}

fn ids(items: &[ItemRecord]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

#[test]
fn default_query_hides_resolved_and_sorts_newest_first() {
    let mut items = vec![
        record("old", "Old", ItemStatus::Lost, false),
        record("new", "New", ItemStatus::Found, false),
        record("done", "Done", ItemStatus::Lost, true),
    ];
    items[1].date_created = base_instant() + Duration::hours(2);
    items[2].date_created = base_instant() + Duration::hours(3);

    let result = run_query(&items, &ItemQuery::default());
    assert_eq!(ids(&result), vec!["new", "old"]);
}

#[test]
fn lost_filter_and_hidden_resolved_combine_with_and() {
    let items = vec![
        record("lost-open", "Bag", ItemStatus::Lost, false),
        record("lost-resolved", "Bag", ItemStatus::Lost, true),
        record("found-open", "Bag", ItemStatus::Found, false),
    ];

    let query = ItemQuery {
        filter: ItemFilter::Lost,
        ..ItemQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &query)), vec!["lost-open"]);

    let with_resolved = ItemQuery {
        show_resolved: true,
        ..query
    };
    assert_eq!(
        ids(&run_query(&items, &with_resolved)),
        vec!["lost-open", "lost-resolved"]
    );
}

#[test]
fn search_matches_name_description_or_location_case_insensitively() {
    let mut by_name = record("name", "Leather WALLET", ItemStatus::Lost, false);
    by_name.description = "brown".to_string();
    let mut by_description = record("desc", "Pouch", ItemStatus::Found, false);
    by_description.description = "small wallet with coins".to_string();
    let mut by_location = record("loc", "Card", ItemStatus::Lost, false);
    by_location.description = "plastic".to_string();
    by_location.location = "Wallet Repair Kiosk".to_string();
    let mut unrelated = record("none", "Umbrella", ItemStatus::Lost, false);
    unrelated.description = "black".to_string();
    let mut resolved_match = record("resolved", "Wallet", ItemStatus::Lost, true);
    resolved_match.description = "resolved".to_string();

    let items = vec![by_name, by_description, by_location, unrelated, resolved_match];
    let query = ItemQuery {
        search: "WaLLet".to_string(),
        ..ItemQuery::default()
    };

    let result = run_query(&items, &query);
    assert_eq!(ids(&result), vec!["name", "desc", "loc"]);
    for item in &result {
        let haystack = format!("{} {} {}", item.name, item.description, item.location);
        assert!(haystack.to_lowercase().contains("wallet"));
    }
}

#[test]
fn name_sort_is_case_insensitive_in_both_directions() {
    let items = vec![
        record("b", "banana", ItemStatus::Lost, false),
        record("a", "Apple", ItemStatus::Lost, false),
        record("c", "cherry", ItemStatus::Found, false),
    ];

    let mut query = ItemQuery {
        sort_key: SortKey::Name,
        sort_order: SortOrder::Ascending,
        ..ItemQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &query)), vec!["a", "b", "c"]);

    query.sort_order = SortOrder::Descending;
    assert_eq!(ids(&run_query(&items, &query)), vec!["c", "b", "a"]);
}

#[test]
fn incident_date_sort_orders_chronologically() {
    let mut early = record("early", "X", ItemStatus::Lost, false);
    early.date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
    let mut late = record("late", "Y", ItemStatus::Lost, false);
    late.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let items = vec![late, early];

    let query = ItemQuery {
        sort_key: SortKey::Date,
        sort_order: SortOrder::Ascending,
        ..ItemQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &query)), vec!["early", "late"]);
}

#[test]
fn equal_created_instants_keep_store_order() {
    let items = vec![
        record("first", "A", ItemStatus::Lost, false),
        record("second", "B", ItemStatus::Found, false),
        record("third", "C", ItemStatus::Lost, false),
    ];

    for order in [SortOrder::Ascending, SortOrder::Descending] {
        let query = ItemQuery {
            sort_key: SortKey::DateCreated,
            sort_order: order,
            ..ItemQuery::default()
        };
        assert_eq!(
            ids(&run_query(&items, &query)),
            vec!["first", "second", "third"],
            "order {order}"
        );
    }
}

#[test]
fn query_does_not_mutate_input() {
    let items = seed_items();
    let before = items.clone();
    let query = ItemQuery {
        sort_key: SortKey::Name,
        sort_order: SortOrder::Ascending,
        ..ItemQuery::default()
    };
    let _ = run_query(&items, &query);
    assert_eq!(items, before);
}

#[test]
fn counts_ignore_query_and_split_unresolved_by_status() {
    let items = vec![
        record("l1", "A", ItemStatus::Lost, false),
        record("l2", "B", ItemStatus::Lost, true),
        record("f1", "C", ItemStatus::Found, false),
        record("f2", "D", ItemStatus::Found, false),
        record("f3", "E", ItemStatus::Found, true),
    ];

    let counts = count_items(&items);
    assert_eq!(counts.total, 5);
    assert_eq!(counts.lost, 1);
    assert_eq!(counts.found, 2);
    assert_eq!(counts.resolved, 2);
    assert_eq!(counts.visible(false), 3);
    assert_eq!(counts.visible(true), 5);
}

fn arb_record() -> impl Strategy<Value = ItemRecord> {
    (
        "[a-zA-Z ]{1,12}",
        "[a-z ]{0,20}",
        "[a-z ]{1,10}",
        any::<bool>(),
        any::<bool>(),
        0i64..5,
        0u32..28,
    )
        .prop_map(|(name, description, location, lost, resolved, hours, day)| {
            let mut item = record(
                "placeholder",
                &name,
                if lost { ItemStatus::Lost } else { ItemStatus::Found },
                resolved,
            );
            item.description = description;
            item.location = location;
            item.date = NaiveDate::from_ymd_opt(2024, 1, day + 1).unwrap();
            item.date_created = base_instant() + Duration::hours(hours);
            item
        })
}

fn arb_records() -> impl Strategy<Value = Vec<ItemRecord>> {
    prop::collection::vec(arb_record(), 0..24).prop_map(|mut items| {
        for (index, item) in items.iter_mut().enumerate() {
            item.id = format!("item-{index}");
        }
        items
    })
}

fn arb_query() -> impl Strategy<Value = ItemQuery> {
    (
        prop_oneof![
            Just(ItemFilter::All),
            Just(ItemFilter::Lost),
            Just(ItemFilter::Found)
        ],
        "[a-z]{0,2}",
        prop_oneof![
            Just(SortKey::Name),
            Just(SortKey::Date),
            Just(SortKey::DateCreated)
        ],
        prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)],
        any::<bool>(),
    )
        .prop_map(|(filter, search, sort_key, sort_order, show_resolved)| ItemQuery {
            filter,
            search,
            sort_key,
            sort_order,
            show_resolved,
        })
}

proptest! {
    #[test]
    fn query_is_idempotent(items in arb_records(), query in arb_query()) {
        let first = run_query(&items, &query);
        let second = run_query(&items, &query);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_survivor_passes_all_filters(items in arb_records(), query in arb_query()) {
        let needle = query.search.to_lowercase();
        for item in run_query(&items, &query) {
            match query.filter {
                ItemFilter::All => {}
                ItemFilter::Lost => prop_assert_eq!(item.status, ItemStatus::Lost),
                ItemFilter::Found => prop_assert_eq!(item.status, ItemStatus::Found),
            }
            prop_assert!(query.show_resolved || !item.resolved);
            if !needle.is_empty() {
                let haystack = format!(
                    "{}\n{}\n{}",
                    item.name.to_lowercase(),
                    item.description.to_lowercase(),
                    item.location.to_lowercase()
                );
                prop_assert!(haystack.contains(&needle));
            }
        }
    }

    #[test]
    fn created_sort_ties_preserve_input_order(items in arb_records(), ascending in any::<bool>()) {
        let query = ItemQuery {
            filter: ItemFilter::All,
            show_resolved: true,
            sort_key: SortKey::DateCreated,
            sort_order: if ascending { SortOrder::Ascending } else { SortOrder::Descending },
            ..ItemQuery::default()
        };
        let result = run_query(&items, &query);
        prop_assert_eq!(result.len(), items.len());

        let position = |id: &str| items.iter().position(|item| item.id == id).unwrap();
        for pair in result.windows(2) {
            if pair[0].date_created == pair[1].date_created {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }
}
