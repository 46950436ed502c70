//! Integration tests for pt-tree.

use std::collections::BTreeSet;

use proptest::prelude::*;
use pt_tree::{Outline, PathTrie, SearchFilter, TreeView};

fn catalog() -> Vec<&'static str> {
    vec![
        "aero/coefficient/CD",
        "aero/coefficient/CL",
        "aero/qbar-psf",
        "position/h-sl-ft",
        "position/lat-gc-deg",
        "velocities/u-fps",
        "velocities/v-fps",
        "simulation/sim-time-sec",
    ]
}

#[test]
fn leaves_match_input_in_lexicographic_order() {
    let trie = PathTrie::from_leaves(catalog()).unwrap();
    let mut expected: Vec<String> = catalog().into_iter().map(String::from).collect();
    expected.sort();
    assert_eq!(trie.leaves(), expected);
}

#[test]
fn deep_sharing_builds_a_single_chain() {
    let paths: Vec<String> = (0..1000)
        .map(|i| format!("aero/coefficient/C{i:04}"))
        .collect();
    let trie = PathTrie::from_leaves(&paths).unwrap();
    // 2 shared internal nodes + 1000 leaves
    assert_eq!(trie.len(), 1002);
    let coeff = trie.find("aero/coefficient").unwrap();
    assert_eq!(trie.children(coeff).len(), 1000);
}

#[test]
fn search_then_select_yields_leaf_paths() {
    let trie = PathTrie::from_leaves(catalog()).unwrap();
    let mut view = TreeView::new(&trie, false);
    view.search(&trie, "fps");
    let rows = view.rows(&trie);
    let leaf_rows: Vec<_> = rows.iter().filter(|r| r.is_leaf).collect();
    assert_eq!(leaf_rows.len(), 2);

    for row in &leaf_rows {
        view.selection.add(row.id);
    }
    assert_eq!(
        view.selected_leaves(&trie),
        vec!["velocities/u-fps", "velocities/v-fps"]
    );
}

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec("[a-d]{1,2}", 1..4).prop_map(|segs| segs.join("/")),
        1..30,
    )
}

proptest! {
    #[test]
    fn leaves_are_the_sorted_input_set(paths in path_strategy()) {
        let trie = PathTrie::from_leaves(&paths).unwrap();
        let expected: Vec<String> = paths.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(trie.leaves(), expected);
    }

    #[test]
    fn filter_is_idempotent_and_reversible(paths in path_strategy(), pattern in "[a-d]{0,2}") {
        let trie = PathTrie::from_leaves(&paths).unwrap();
        let mut outline = Outline::new(&trie);
        let original: Vec<_> = outline.attached(trie.root());

        let mut filter = SearchFilter::new();
        let once = filter.apply(&trie, &mut outline, &pattern);
        let twice = filter.apply(&trie, &mut outline, &pattern);
        prop_assert_eq!(&once, &twice);

        filter.apply(&trie, &mut outline, "");
        prop_assert_eq!(outline.attached(trie.root()), original);
    }
}
