//! Tests for the depth-grouped projection of the forest

use kodegen_tools_searchtree::tree::{Forest, NodeId, locate_and_replace, project};

mod common;
use common::leaf;

fn keywords(forest: &Forest) -> Vec<Vec<String>> {
    project(forest)
        .into_iter()
        .map(|level| {
            level
                .items
                .into_iter()
                .map(|item| item.node.keyword.clone())
                .collect()
        })
        .collect()
}

#[test]
fn test_empty_forest_has_no_levels() {
    assert!(project(&Forest::new()).is_empty());
}

#[test]
fn test_single_root_is_one_level() {
    let forest = Forest::new().with_root(leaf("rust"));
    let levels = project(&forest);
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].depth, 0);
    assert_eq!(levels[0].len(), 1);
    assert_eq!(levels[0].items[0].parent_id, None);
}

#[test]
fn test_children_interleave_in_root_order() {
    // r1 has c1a, c1b; r2 has c2a; c1a has g
    let r1 = leaf("r1")
        .with_child(leaf("c1a").with_child(leaf("g")))
        .with_child(leaf("c1b"));
    let r2 = leaf("r2").with_child(leaf("c2a"));
    let forest = Forest::new().with_root(r1).with_root(r2);

    assert_eq!(
        keywords(&forest),
        vec![
            vec!["r1".to_string(), "r2".to_string()],
            vec!["c1a".to_string(), "c1b".to_string(), "c2a".to_string()],
            vec!["g".to_string()],
        ]
    );
}

#[test]
fn test_parent_ids_point_one_level_up() {
    let root = leaf("root").with_child(leaf("child").with_child(leaf("grandchild")));
    let forest = Forest::new().with_root(root);
    let levels = project(&forest);

    for window in levels.windows(2) {
        let above: Vec<&NodeId> = window[0].items.iter().map(|item| &item.node.id).collect();
        for item in &window[1].items {
            let parent = item.parent_id.as_ref().unwrap();
            assert!(above.contains(&parent));
            assert_eq!(window[1].depth, window[0].depth + 1);
        }
    }
}

#[test]
fn test_projection_is_deterministic() {
    let forest = Forest::new()
        .with_root(leaf("a").with_child(leaf("a1")))
        .with_root(leaf("b"));
    assert_eq!(project(&forest), project(&forest));
}

#[test]
fn test_projection_follows_edits() {
    let root = leaf("rust");
    let root_id = root.id.clone();
    let forest = Forest::new().with_root(root);
    assert_eq!(project(&forest).len(), 1);

    let child = leaf("rust lang");
    let child_id = child.id.clone();
    let forest = locate_and_replace(&forest, &root_id, |node| node.with_child(child));

    let levels = project(&forest);
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[1].items[0].node.id, child_id);
    assert_eq!(levels[1].items[0].parent_id.as_ref(), Some(&root_id));
}
