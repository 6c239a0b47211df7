mod operations;
mod traversal;
mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mosaic_common::ConversationId;

    use super::*;

    fn id(s: &str) -> ConversationId {
        ConversationId::from(s)
    }

    fn build(ids: &[&str], corner: Corner) -> LayoutTree {
        ids.iter().fold(LayoutTree::empty(), |tree, s| {
            tree.insert_at_corner(id(s), corner)
        })
    }

    #[test]
    fn insert_into_empty_is_single_leaf() {
        let tree = LayoutTree::empty().insert_at_corner(id("c1"), Corner::TopRight);
        assert_eq!(tree.root(), Some(&PaneNode::leaf("c1")));
        assert_eq!(tree.pane_count(), 1);
    }

    #[test]
    fn second_insert_top_right_splits_row() {
        let tree = build(&["c1", "c2"], Corner::TopRight);
        assert_eq!(
            tree.root(),
            Some(&PaneNode::row(PaneNode::leaf("c1"), PaneNode::leaf("c2")))
        );
    }

    #[test]
    fn third_insert_splits_orthogonally_to_parent() {
        let tree = build(&["c1", "c2", "c3"], Corner::TopRight);
        let expected = PaneNode::row(
            PaneNode::leaf("c1"),
            PaneNode::column(PaneNode::leaf("c3"), PaneNode::leaf("c2")),
        );
        assert_eq!(tree.root(), Some(&expected));
    }

    #[test]
    fn fourth_insert_alternates_back_to_row() {
        let tree = build(&["c1", "c2", "c3", "c4"], Corner::TopRight);
        let expected = PaneNode::row(
            PaneNode::leaf("c1"),
            PaneNode::column(
                PaneNode::row(PaneNode::leaf("c3"), PaneNode::leaf("c4")),
                PaneNode::leaf("c2"),
            ),
        );
        assert_eq!(tree.root(), Some(&expected));
    }

    #[test]
    fn top_left_puts_new_leaf_first() {
        let tree = build(&["c1", "c2"], Corner::TopLeft);
        assert_eq!(
            tree.root(),
            Some(&PaneNode::row(PaneNode::leaf("c2"), PaneNode::leaf("c1")))
        );
    }

    #[test]
    fn bottom_left_goes_below_leftmost_pane() {
        let tree = build(&["c1", "c2"], Corner::TopRight).insert_at_corner(id("c3"), Corner::BottomLeft);
        let expected = PaneNode::row(
            PaneNode::column(PaneNode::leaf("c1"), PaneNode::leaf("c3")),
            PaneNode::leaf("c2"),
        );
        assert_eq!(tree.root(), Some(&expected));
    }

    #[test]
    fn later_insert_is_nearer_the_corner() {
        for corner in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            let mut tree = LayoutTree::empty();
            for n in 0..6 {
                let a = id(&format!("a{n}"));
                let b = id(&format!("b{n}"));
                tree = tree.insert_at_corner(a.clone(), corner);
                tree = tree.insert_at_corner(b.clone(), corner);

                let at_corner = tree.node_at_path(&tree.path_to_corner(corner));
                assert_eq!(at_corner, Some(&PaneNode::Leaf { conversation_id: b.clone() }));

                // A sits right next to B under the same split, on the far side.
                let path_a = tree.path_to(&a).unwrap();
                let path_b = tree.path_to(&b).unwrap();
                assert_eq!(path_a.len(), path_b.len());
                assert_eq!(path_a[..path_a.len() - 1], path_b[..path_b.len() - 1]);
                assert_ne!(path_a.last(), path_b.last());
            }
        }
    }

    #[test]
    fn insert_never_duplicates_leaves() {
        let corners = [
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::TopLeft,
            Corner::BottomRight,
        ];
        let mut tree = LayoutTree::empty();
        for n in 0..20 {
            tree = tree.insert_at_corner(id(&format!("c{n}")), corners[n % corners.len()]);
        }
        assert_eq!(tree.pane_count(), 20);
        assert!(tree.duplicate_leaves().is_empty());
        assert_eq!(tree.list_placed_conversations().len(), 20);
    }

    #[test]
    fn try_insert_refuses_placed_id() {
        let tree = build(&["c1", "c2"], Corner::TopRight);
        let err = tree
            .try_insert_at_corner(id("c1"), Corner::BottomLeft)
            .unwrap_err();
        assert_eq!(err, mosaic_common::InvariantViolation::DuplicateLeaf(id("c1")));

        let grown = tree.try_insert_at_corner(id("c3"), Corner::TopRight).unwrap();
        assert_eq!(grown.pane_count(), 3);
    }

    #[test]
    fn insert_leaves_original_untouched_and_shares_siblings() {
        let before = build(&["c1", "c2"], Corner::TopRight);
        let after = before.insert_at_corner(id("c3"), Corner::TopRight);

        assert_eq!(before.leaves(), vec![id("c1"), id("c2")]);
        assert!(!before.ptr_eq(&after));

        let old_first = before.root().unwrap().child(Branch::First).unwrap();
        let new_first = after.root().unwrap().child(Branch::First).unwrap();
        assert!(Arc::ptr_eq(old_first, new_first));
    }

    #[test]
    fn list_placed_conversations_collects_all_leaves() {
        let tree = build(&["c2", "c1", "c3"], Corner::BottomRight);
        let placed = tree.list_placed_conversations();
        assert_eq!(
            placed.into_iter().collect::<Vec<_>>(),
            vec![id("c1"), id("c2"), id("c3")]
        );
        assert!(LayoutTree::empty().list_placed_conversations().is_empty());
    }

    #[test]
    fn path_to_corner_on_leaf_root_is_empty() {
        let tree = build(&["c1"], Corner::TopRight);
        assert!(tree.path_to_corner(Corner::BottomLeft).is_empty());
        assert!(LayoutTree::empty().path_to_corner(Corner::TopLeft).is_empty());
    }

    #[test]
    fn remove_leaf_promotes_sibling() {
        let tree = build(&["c1", "c2", "c3"], Corner::TopRight);
        let removed = tree.remove_leaf(&id("c3")).unwrap();
        assert_eq!(
            removed.root(),
            Some(&PaneNode::row(PaneNode::leaf("c1"), PaneNode::leaf("c2")))
        );
        // Untouched sibling subtree is shared.
        let old_first = tree.root().unwrap().child(Branch::First).unwrap();
        let new_first = removed.root().unwrap().child(Branch::First).unwrap();
        assert!(Arc::ptr_eq(old_first, new_first));
    }

    #[test]
    fn remove_last_leaf_empties_tree() {
        let tree = build(&["c1"], Corner::TopRight);
        let removed = tree.remove_leaf(&id("c1")).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn remove_absent_leaf_is_none() {
        let tree = build(&["c1", "c2"], Corner::TopRight);
        assert!(tree.remove_leaf(&id("nope")).is_none());
        assert!(LayoutTree::empty().remove_leaf(&id("c1")).is_none());
    }

    #[test]
    fn set_split_fraction_clamps() {
        let tree = build(&["c1", "c2"], Corner::TopRight);
        let resized = tree.set_split_fraction(&[], 0.97).unwrap();
        match resized.root() {
            Some(PaneNode::Split { split_fraction, .. }) => {
                assert!((*split_fraction - 0.9).abs() < 0.001);
            }
            other => panic!("expected split, got {other:?}"),
        }
        assert!(tree.set_split_fraction(&[Branch::First], 0.3).is_none());
    }

    #[test]
    fn replace_at_invalid_path_is_none() {
        let tree = build(&["c1"], Corner::TopRight);
        assert!(tree
            .replace_at_path(&[Branch::Second], PaneNode::leaf("x"))
            .is_none());
        assert!(LayoutTree::empty()
            .replace_at_path(&[], PaneNode::leaf("x"))
            .is_none());
    }

    #[test]
    fn duplicate_leaves_are_reported() {
        let tree = LayoutTree::from_root(PaneNode::row(
            PaneNode::leaf("c1"),
            PaneNode::column(PaneNode::leaf("c2"), PaneNode::leaf("c1")),
        ));
        assert_eq!(tree.duplicate_leaves(), vec![id("c1")]);
    }

    #[test]
    fn tree_deserializes_from_external_json() {
        let json = r#"{"Split":{"direction":"row","split_fraction":0.3,
            "first":{"Leaf":{"conversation_id":"c1"}},
            "second":{"Leaf":{"conversation_id":"c2"}}}}"#;
        let tree: LayoutTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.leaves(), vec![id("c1"), id("c2")]);
        assert_eq!(tree.root().and_then(PaneNode::direction), Some(Direction::Row));

        let empty: LayoutTree = serde_json::from_str("null").unwrap();
        assert!(empty.is_empty());
    }
}
