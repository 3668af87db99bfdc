//! Property tests for selection tree propagation and extraction.

use proptest::prelude::*;

use croptree::selection::{
    build_tree, checked_items, BuildItem, NodeId, SearchFilter, SearchMode, SelectionTree,
    SortOrder,
};

/// Folder paths drawn from a small alphabet so items actually share groups.
fn path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C")], 0..=3)
        .prop_map(|segments| segments.into_iter().map(String::from).collect())
}

fn items() -> impl Strategy<Value = Vec<BuildItem<u32>>> {
    proptest::collection::vec(("[a-e]{1,3}", path()), 1..=24).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, path))| BuildItem::new(i as u32, name, path))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    Check(usize, bool),
    Show(usize, bool),
    CheckAll,
    UncheckAll,
    Filter(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::Toggle),
        (any::<usize>(), any::<bool>()).prop_map(|(i, v)| Op::Check(i, v)),
        (any::<usize>(), any::<bool>()).prop_map(|(i, v)| Op::Show(i, v)),
        Just(Op::CheckAll),
        Just(Op::UncheckAll),
        "[a-e]{0,2}".prop_map(Op::Filter),
    ]
}

fn run(tree: &mut SelectionTree<u32>, ops: &[Op]) {
    let nodes: Vec<NodeId> = tree.walk().collect();
    let leaves: Vec<NodeId> = tree.leaves().collect();
    let filter = SearchFilter::new(SearchMode::Substring);

    for op in ops {
        match op {
            Op::Toggle(i) => tree.toggle(nodes[i % nodes.len()]),
            Op::Check(i, v) => tree.set_checked(nodes[i % nodes.len()], *v),
            Op::Show(i, v) => tree.set_visible(leaves[i % leaves.len()], *v),
            Op::CheckAll => tree.check_all(),
            Op::UncheckAll => tree.uncheck_all(),
            Op::Filter(query) => {
                filter.apply(tree, query);
            }
        }
    }
}

fn assert_aggregates(tree: &SelectionTree<u32>) -> Result<(), TestCaseError> {
    for id in tree.walk() {
        let node = &tree[id];
        if node.is_leaf() {
            continue;
        }
        let children = node.children();
        prop_assert!(!children.is_empty());
        prop_assert_eq!(
            node.checked(),
            children.iter().all(|&c| tree[c].checked()),
            "group '{}' checked disagrees with its children",
            node.name()
        );
        prop_assert_eq!(
            node.visible(),
            children.iter().any(|&c| tree[c].visible()),
            "group '{}' visible disagrees with its children",
            node.name()
        );
    }
    Ok(())
}

fn assert_leaves_attached(tree: &SelectionTree<u32>) -> Result<(), TestCaseError> {
    for id in tree.leaves() {
        let Some(parent) = tree[id].parent() else {
            return Err(TestCaseError::fail("leaf without a parent group"));
        };
        prop_assert!(!tree[parent].is_leaf());
        prop_assert!(tree[parent].children().contains(&id));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After any sequence of writes every group holds the AND of its
    /// children's checked flags and the OR of their visible flags.
    #[test]
    fn property_group_aggregates_hold(items in items(), ops in proptest::collection::vec(op(), 0..=16)) {
        let mut tree = build_tree(items, SortOrder::Ascending);
        run(&mut tree, &ops);
        assert_aggregates(&tree)?;
    }

    /// PROPERTY: Extraction yields exactly the checked, visible leaves in
    /// pre-order, whatever the group flags say.
    #[test]
    fn property_extraction_matches_leaf_scan(items in items(), ops in proptest::collection::vec(op(), 0..=16)) {
        let mut tree = build_tree(items, SortOrder::Ascending);
        run(&mut tree, &ops);

        let expected: Vec<u32> = tree
            .walk()
            .filter_map(|id| tree[id].as_leaf())
            .filter(|leaf| leaf.checked() && leaf.visible())
            .map(|leaf| *leaf.item())
            .collect();
        let extracted: Vec<u32> = checked_items(&tree).copied().collect();
        prop_assert_eq!(extracted, expected);
    }

    /// PROPERTY: Writing a group reaches every descendant.
    #[test]
    fn property_group_write_cascades(items in items(), pick in any::<usize>(), value in any::<bool>()) {
        let mut tree = build_tree(items, SortOrder::Ascending);
        let groups: Vec<NodeId> = tree.walk().filter(|&id| !tree[id].is_leaf()).collect();
        let group = groups[pick % groups.len()];

        tree.set_checked(group, value);

        for id in tree.walk_from(group) {
            prop_assert_eq!(tree[id].checked(), value);
        }
        assert_aggregates(&tree)?;
    }

    /// PROPERTY: Every item lands in the tree exactly once.
    #[test]
    fn property_build_keeps_every_item(items in items()) {
        let mut expected: Vec<u32> = items.iter().map(|i| i.item).collect();
        let tree = build_tree(items, SortOrder::Descending);

        let mut found: Vec<u32> = tree
            .leaves()
            .filter_map(|id| tree[id].as_leaf())
            .map(|leaf| *leaf.item())
            .collect();
        expected.sort_unstable();
        found.sort_unstable();
        prop_assert_eq!(found, expected);

        assert_leaves_attached(&tree)?;
    }

    /// PROPERTY: Sorting twice in the same direction changes nothing.
    #[test]
    fn property_sort_is_idempotent(items in items(), descending in any::<bool>()) {
        let order = if descending { SortOrder::Descending } else { SortOrder::Ascending };
        let mut tree = build_tree(items, order);
        let before: Vec<NodeId> = tree.walk().collect();

        tree.sort(order);
        let after: Vec<NodeId> = tree.walk().collect();
        prop_assert_eq!(before, after);
    }

    /// PROPERTY: Siblings list groups before leaves, each run in order.
    #[test]
    fn property_siblings_are_ordered(items in items()) {
        let tree = build_tree(items, SortOrder::Ascending);

        let mut lists: Vec<&[NodeId]> = vec![tree.roots()];
        lists.extend(tree.walk().map(|id| tree[id].children()));

        for siblings in lists {
            for pair in siblings.windows(2) {
                let (a, b) = (&tree[pair[0]], &tree[pair[1]]);
                prop_assert!(a.is_leaf() <= b.is_leaf());
                if a.is_leaf() == b.is_leaf() {
                    prop_assert_ne!(
                        SortOrder::Ascending.compare(a.name(), b.name()),
                        std::cmp::Ordering::Greater
                    );
                }
            }
        }
    }
}
