//! Tests for copy-on-path forest edits

use kodegen_tools_searchtree::tree::{
    Forest, NodeId, NodeStatus, SearchNode, locate_and_replace, locate_and_replace_reporting,
    project,
};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

mod common;
use common::{leaf, payload};

/// Two roots; the first has two children, the first child has one child
///
/// ```text
/// a ── a1 ── a1x
///   └─ a2
/// b
/// ```
fn sample_forest() -> Forest {
    let a1 = leaf("a1").with_child(leaf("a1x"));
    let a = leaf("a").with_child(a1).with_child(leaf("a2"));
    Forest::new().with_root(a).with_root(leaf("b"))
}

fn id_of(forest: &Forest, keyword: &str) -> NodeId {
    forest
        .walk()
        .find(|visit| visit.node.keyword == keyword)
        .map(|visit| visit.node.id.clone())
        .unwrap()
}

fn node_of<'a>(forest: &'a Forest, keyword: &str) -> &'a Arc<SearchNode> {
    forest.find(&id_of(forest, keyword)).unwrap()
}

#[test]
fn test_unknown_id_is_a_no_op() {
    let forest = sample_forest();
    let unknown = NodeId::from("not-in-forest");

    let (next, found) = locate_and_replace_reporting(&forest, &unknown, SearchNode::toggled);

    assert!(!found);
    assert_eq!(next, forest);
    for (old, new) in forest.roots().iter().zip(next.roots()) {
        assert!(Arc::ptr_eq(old, new));
    }
}

#[test]
fn test_only_target_and_ancestors_are_rebuilt() {
    let forest = sample_forest();
    let target = id_of(&forest, "a1x");

    let next = locate_and_replace(&forest, &target, SearchNode::toggled);

    assert!(next.find(&target).unwrap().is_expanded);
    // Ancestors are new values
    assert!(!Arc::ptr_eq(&forest.roots()[0], &next.roots()[0]));
    assert!(!Arc::ptr_eq(node_of(&forest, "a1"), node_of(&next, "a1")));
    // Siblings and unrelated roots are shared
    assert!(Arc::ptr_eq(node_of(&forest, "a2"), node_of(&next, "a2")));
    assert!(Arc::ptr_eq(&forest.roots()[1], &next.roots()[1]));
    // Input is untouched
    assert!(!forest.find(&target).unwrap().is_expanded);
}

#[test]
fn test_ancestor_data_is_preserved() {
    let forest = sample_forest();
    let target = id_of(&forest, "a2");

    let next = locate_and_replace(&forest, &target, |node| node.marked_busy(NodeStatus::Refreshing));

    let old_root = &forest.roots()[0];
    let new_root = &next.roots()[0];
    assert_eq!(old_root.id, new_root.id);
    assert_eq!(old_root.keyword, new_root.keyword);
    assert_eq!(old_root.search_results, new_root.search_results);
    assert_eq!(old_root.children.len(), new_root.children.len());
    assert_eq!(
        next.find(&target).unwrap().status,
        NodeStatus::Refreshing
    );
}

#[test]
fn test_append_child_grows_by_one_with_fresh_id() {
    let forest = sample_forest();
    let target = id_of(&forest, "a1");
    let before = forest.find(&target).unwrap().children.len();
    let existing: HashSet<NodeId> = forest.ids().into_iter().collect();

    let child = leaf("new");
    let child_id = child.id.clone();
    let next = locate_and_replace(&forest, &target, |node| node.with_child(child));

    let parent = next.find(&target).unwrap();
    assert_eq!(parent.children.len(), before + 1);
    assert_eq!(parent.children.last().unwrap().id, child_id);
    assert!(!existing.contains(&child_id));
    assert_eq!(next.node_count(), forest.node_count() + 1);
}

#[test]
fn test_children_keep_insertion_order() {
    let root = leaf("root");
    let root_id = root.id.clone();
    let mut forest = Forest::new().with_root(root);

    for keyword in ["first", "second", "third"] {
        let child = leaf(keyword);
        forest = locate_and_replace(&forest, &root_id, |node| node.with_child(child));
    }

    let keywords: Vec<&str> = forest.roots()[0]
        .children
        .iter()
        .map(|child| child.keyword.as_str())
        .collect();
    assert_eq!(keywords, ["first", "second", "third"]);
}

#[test]
fn test_refresh_replaces_results_and_clears_status() {
    let forest = sample_forest();
    let target = id_of(&forest, "b");
    let busy = locate_and_replace(&forest, &target, |node| node.marked_busy(NodeStatus::Refreshing));
    assert!(busy.find(&target).unwrap().is_loading());

    let fresh = payload(&[("B2", "new", "https://b2.example")], &["b next"]);
    let at = chrono::Utc::now();
    let refreshed = locate_and_replace(&busy, &target, |node| node.refreshed(fresh.clone(), at));

    let node = refreshed.find(&target).unwrap();
    assert!(!node.is_loading());
    assert_eq!(node.search_results, fresh.results);
    assert_eq!(node.generated_keywords, fresh.generated_keywords);
    assert_eq!(node.timestamp, at);
    assert_eq!(node.keyword, "b");
}

#[test]
fn test_settled_keeps_previous_data() {
    let forest = sample_forest();
    let target = id_of(&forest, "a");
    let original = forest.find(&target).unwrap().clone();

    let busy = locate_and_replace(&forest, &target, |node| node.marked_busy(NodeStatus::Expanding));
    let settled = locate_and_replace(&busy, &target, SearchNode::settled);

    assert_eq!(**settled.find(&target).unwrap(), *original);
}

#[test]
fn test_toggle_twice_restores_node() {
    let forest = sample_forest();
    let target = id_of(&forest, "a1");
    let twice = locate_and_replace(
        &locate_and_replace(&forest, &target, SearchNode::toggled),
        &target,
        SearchNode::toggled,
    );
    assert_eq!(twice, forest);
}

// =============================================================================
// Properties
// =============================================================================

/// Build a forest by inserting nodes one by one; `choice == 0` starts a new
/// root, otherwise the node becomes a child of the `choice`-th existing node.
fn build_forest(choices: &[usize]) -> Forest {
    let mut forest = Forest::new();
    let mut ids: Vec<NodeId> = Vec::new();
    for (i, choice) in choices.iter().enumerate() {
        let node = leaf(&format!("k{i}"));
        let id = node.id.clone();
        let slot = choice % (ids.len() + 1);
        forest = if slot == 0 {
            forest.with_root(node)
        } else {
            locate_and_replace(&forest, &ids[slot - 1], |parent| parent.with_child(node))
        };
        ids.push(id);
    }
    forest
}

fn ancestors_of(forest: &Forest, target: &NodeId) -> HashSet<NodeId> {
    let parents: std::collections::HashMap<NodeId, NodeId> = forest
        .walk()
        .filter_map(|visit| visit.parent.map(|p| (visit.node.id.clone(), p.clone())))
        .collect();
    let mut out = HashSet::new();
    let mut current = target.clone();
    while let Some(parent) = parents.get(&current) {
        out.insert(parent.clone());
        current = parent.clone();
    }
    out
}

proptest! {
    #[test]
    fn prop_unknown_id_returns_equal_forest(choices in prop::collection::vec(0usize..8, 0..24)) {
        let forest = build_forest(&choices);
        let next = locate_and_replace(&forest, &NodeId::from("missing"), SearchNode::toggled);
        prop_assert_eq!(next, forest);
    }

    #[test]
    fn prop_edit_touches_only_target_path(
        choices in prop::collection::vec(0usize..8, 1..24),
        pick in any::<prop::sample::Index>(),
    ) {
        let forest = build_forest(&choices);
        let ids = forest.ids();
        let target = ids[pick.index(ids.len())].clone();
        let spine = ancestors_of(&forest, &target);

        let next = locate_and_replace(&forest, &target, SearchNode::toggled);

        prop_assert_eq!(next.node_count(), forest.node_count());
        for visit in forest.walk() {
            let id = &visit.node.id;
            let after = next.find(id).unwrap();
            if *id == target {
                prop_assert_eq!(after.is_expanded, !visit.node.is_expanded);
            } else if spine.contains(id) {
                prop_assert!(!Arc::ptr_eq(visit.node, after));
                prop_assert_eq!(&after.search_results, &visit.node.search_results);
            } else {
                prop_assert!(Arc::ptr_eq(visit.node, after));
            }
        }
    }

    #[test]
    fn prop_ids_stay_unique(choices in prop::collection::vec(0usize..8, 0..32)) {
        let forest = build_forest(&choices);
        let ids = forest.ids();
        let unique: HashSet<&NodeId> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
        prop_assert_eq!(ids.len(), choices.len());
        let projected: usize = project(&forest).iter().map(|level| level.len()).sum();
        prop_assert_eq!(projected, choices.len());
    }
}
