//! Tests for the collection ledger

use chrono::Utc;
use kodegen_tools_searchtree::collection::{CollectedItem, CollectionId, CollectionLedger};
use kodegen_tools_searchtree::tree::SearchNode;

mod common;
use common::{leaf, payload};

fn two_result_node() -> SearchNode {
    SearchNode::new(
        "rust",
        Default::default(),
        payload(
            &[
                ("A", "first", "https://a.example"),
                ("B", "second", "https://b.example"),
            ],
            &[],
        ),
    )
}

#[test]
fn test_collected_id_is_derived_from_origin() {
    let node = two_result_node();
    let item = CollectedItem::from_node(&node, 1, Utc::now()).unwrap();
    assert_eq!(item.id, CollectionId::derive(&node.id, 1));
    assert_eq!(item.id.as_str(), format!("{}-1", node.id));
    assert_eq!(item.title, "B");
    assert_eq!(item.content, "second");
    assert_eq!(item.node_keyword, "rust");
}

#[test]
fn test_out_of_range_index_yields_nothing() {
    assert!(CollectedItem::from_node(&two_result_node(), 2, Utc::now()).is_none());
}

#[test]
fn test_collect_twice_keeps_one_entry() {
    let node = two_result_node();
    let item = CollectedItem::from_node(&node, 0, Utc::now()).unwrap();

    let ledger = CollectionLedger::new()
        .collect(item.clone())
        .collect(item.clone());

    assert_eq!(ledger.len(), 1);
    assert!(ledger.contains(&item.id));
}

#[test]
fn test_insertion_order_is_preserved() {
    let first = leaf("first");
    let second = two_result_node();
    let now = Utc::now();

    let ledger = CollectionLedger::new()
        .collect(CollectedItem::from_node(&second, 1, now).unwrap())
        .collect(CollectedItem::from_node(&first, 0, now).unwrap())
        .collect(CollectedItem::from_node(&second, 0, now).unwrap());

    let titles: Vec<&str> = ledger.items().iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["B", "first", "A"]);
}

#[test]
fn test_uncollect_removes_only_matching_entry() {
    let node = two_result_node();
    let now = Utc::now();
    let a = CollectedItem::from_node(&node, 0, now).unwrap();
    let b = CollectedItem::from_node(&node, 1, now).unwrap();

    let ledger = CollectionLedger::new().collect(a.clone()).collect(b.clone());
    let ledger = ledger.uncollect(&a.id);

    assert_eq!(ledger.len(), 1);
    assert!(!ledger.contains(&a.id));
    assert_eq!(ledger.get(&b.id), Some(&b));
}

#[test]
fn test_uncollect_unknown_is_a_no_op() {
    let node = two_result_node();
    let ledger = CollectionLedger::new().collect(CollectedItem::from_node(&node, 0, Utc::now()).unwrap());
    let same = ledger.clone().uncollect(&CollectionId::derive(&node.id, 7));
    assert_eq!(same, ledger);
}

#[test]
fn test_recollect_after_uncollect_appends_at_end() {
    let node = two_result_node();
    let now = Utc::now();
    let a = CollectedItem::from_node(&node, 0, now).unwrap();
    let b = CollectedItem::from_node(&node, 1, now).unwrap();

    let ledger = CollectionLedger::new()
        .collect(a.clone())
        .collect(b.clone())
        .uncollect(&a.id)
        .collect(a.clone());

    let ids: Vec<&CollectionId> = ledger.items().iter().map(|item| &item.id).collect();
    assert_eq!(ids, [&b.id, &a.id]);
}

#[test]
fn test_snapshot_survives_origin_refresh() {
    let node = two_result_node();
    let item = CollectedItem::from_node(&node, 0, Utc::now()).unwrap();
    let ledger = CollectionLedger::new().collect(item);

    let _refreshed = node.refreshed(payload(&[("Z", "changed", "https://z.example")], &[]), Utc::now());

    let kept = &ledger.items()[0];
    assert_eq!(kept.title, "A");
    assert_eq!(kept.content, "first");
}
