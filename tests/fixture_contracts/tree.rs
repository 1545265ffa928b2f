//! tree_depth contracts

use crate::common::*;
use faultline::tree::{height, max_depth, path_to, sample_tree, TreeNode};

#[test]
fn mirrored_sample_is_undercounted() {
    let mirrored = sample_tree().mirror();
    assert_eq!(height(Some(&mirrored)), 3);
    assert_eq!(max_depth(Some(&mirrored), 0), 2);
}

#[test]
fn right_leaning_chain_counts_one() {
    let chain = TreeNode::new(
        1,
        None,
        Some(TreeNode::new(2, None, Some(TreeNode::leaf(3)))),
    );
    assert_eq!(max_depth(Some(&chain), 0), 1);
    assert_eq!(height(Some(&chain)), 3);
}

#[test]
fn path_search_is_unaffected() {
    assert_eq!(path_to(&sample_tree(), 5), Some(vec![1, 2, 5]));
    assert_eq!(path_to(&sample_tree(), 42), None);
}

#[test]
fn fixture_reports_mirrored_depth() {
    let report = run_fixture("tree_depth");
    assert_eq!(observed(&report, "max depth (mirrored)"), "2");
}
